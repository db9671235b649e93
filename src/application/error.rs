use thiserror::Error;

use crate::domain::{AccountNumber, ClientError, LedgerError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(AccountNumber),

    #[error("No account selected")]
    NoAccountSelected,

    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::DuplicateAccount(number) => AppError::AccountAlreadyExists(number),
            ClientError::UnknownAccount(number) => AppError::AccountNotFound(number),
            ClientError::Ledger(err) => AppError::Ledger(err),
        }
    }
}
