use chrono::NaiveDate;

use super::{Account, AccountNumber, AccountRules, LedgerError, Operation, Transaction};

/// An individual account holder and the accounts they own.
#[derive(Debug, Clone)]
pub struct Client {
    pub name: String,
    /// National tax id (CPF for Brazilian individuals)
    pub tax_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    accounts: Vec<Account>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: None,
            birth_date: None,
            address: None,
            accounts: Vec::new(),
        }
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Open a new account for this client. Account numbers are unique per client.
    pub fn open_account(
        &mut self,
        number: AccountNumber,
        branch: impl Into<String>,
        rules: AccountRules,
    ) -> Result<&mut Account, ClientError> {
        if self.account(number).is_some() {
            return Err(ClientError::DuplicateAccount(number));
        }
        self.accounts.push(Account::new(number, branch, rules));
        let index = self.accounts.len() - 1;
        Ok(&mut self.accounts[index])
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Perform an operation on one of this client's accounts.
    pub fn perform(
        &mut self,
        number: AccountNumber,
        operation: Operation,
    ) -> Result<&Transaction, ClientError> {
        let account = self
            .account_mut(number)
            .ok_or(ClientError::UnknownAccount(number))?;
        Ok(account.apply(operation)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    DuplicateAccount(AccountNumber),
    UnknownAccount(AccountNumber),
    Ledger(LedgerError),
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        ClientError::Ledger(err)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::DuplicateAccount(number) => {
                write!(f, "Account {} already exists for this client", number)
            }
            ClientError::UnknownAccount(number) => {
                write!(f, "Account {} does not belong to this client", number)
            }
            ClientError::Ledger(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {}
