use tracing::{debug, info, warn};

use crate::domain::{
    Account, AccountNumber, AccountRules, Cents, Client, Operation, Statement, Transaction,
};

use super::AppError;

/// Application service providing the teller operations for one client.
/// This is the primary interface for any front end (menu, batch runner, tests).
pub struct TellerService {
    client: Client,
    active: Option<AccountNumber>,
}

/// Overview of the active account
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub number: AccountNumber,
    pub branch: String,
    pub holder: String,
    pub balance: Cents,
    pub withdrawal_limit: Cents,
    pub withdrawals_performed: u32,
    pub withdrawals_remaining: u32,
    pub transaction_count: usize,
}

impl TellerService {
    /// Create a service for the given client. The first account opened
    /// becomes the active one.
    pub fn new(client: Client) -> Self {
        let active = client.accounts().next().map(Account::number);
        Self { client, active }
    }

    /// Convenience constructor: a client with a single account, already selected.
    pub fn with_account(
        client: Client,
        number: AccountNumber,
        branch: impl Into<String>,
        rules: AccountRules,
    ) -> Result<Self, AppError> {
        let mut service = Self::new(client);
        service.open_account(number, branch, rules)?;
        Ok(service)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    // ========================
    // Account operations
    // ========================

    /// Open an account for the client.
    pub fn open_account(
        &mut self,
        number: AccountNumber,
        branch: impl Into<String>,
        rules: AccountRules,
    ) -> Result<&Account, AppError> {
        let branch = branch.into();
        self.client.open_account(number, branch.clone(), rules)?;
        info!(
            account = number,
            branch = %branch,
            holder = %self.client.name,
            withdrawal_limit = rules.withdrawal_limit,
            max_withdrawals = rules.max_withdrawals,
            "account opened"
        );
        if self.active.is_none() {
            self.active = Some(number);
        }
        self.client
            .account(number)
            .ok_or(AppError::AccountNotFound(number))
    }

    /// Make `number` the account subsequent operations act on.
    pub fn select_account(&mut self, number: AccountNumber) -> Result<(), AppError> {
        if self.client.account(number).is_none() {
            return Err(AppError::AccountNotFound(number));
        }
        debug!(account = number, "account selected");
        self.active = Some(number);
        Ok(())
    }

    /// The account operations currently act on.
    pub fn active_account(&self) -> Result<&Account, AppError> {
        let number = self.active.ok_or(AppError::NoAccountSelected)?;
        self.client
            .account(number)
            .ok_or(AppError::AccountNotFound(number))
    }

    // ========================
    // Ledger operations
    // ========================

    /// Deposit into the active account; returns the new balance.
    pub fn deposit(&mut self, amount_cents: Cents) -> Result<Cents, AppError> {
        self.perform(Operation::Deposit(amount_cents))
            .map(Transaction::balance_after_cents)
    }

    /// Withdraw from the active account; returns the new balance.
    pub fn withdraw(&mut self, amount_cents: Cents) -> Result<Cents, AppError> {
        self.perform(Operation::Withdraw(amount_cents))
            .map(Transaction::balance_after_cents)
    }

    /// Apply an operation to the active account and return the recorded transaction.
    pub fn perform(&mut self, operation: Operation) -> Result<&Transaction, AppError> {
        let number = self.active.ok_or(AppError::NoAccountSelected)?;
        match self.client.perform(number, operation) {
            Ok(transaction) => {
                info!(
                    account = number,
                    kind = transaction.kind().as_str(),
                    amount = transaction.amount_cents(),
                    balance = transaction.balance_after_cents(),
                    sequence = transaction.sequence(),
                    "transaction recorded"
                );
                Ok(transaction)
            }
            Err(err) => {
                warn!(
                    account = number,
                    amount = operation.amount_cents(),
                    error = %err,
                    "operation rejected"
                );
                Err(err.into())
            }
        }
    }

    /// Statement of the active account.
    pub fn statement(&self) -> Result<Statement<'_>, AppError> {
        let statement = self.active_account()?.statement();
        debug!(
            account = statement.account_number(),
            entries = statement.len(),
            "statement requested"
        );
        Ok(statement)
    }

    /// Overview of the active account.
    pub fn summary(&self) -> Result<AccountSummary, AppError> {
        let account = self.active_account()?;
        Ok(AccountSummary {
            number: account.number(),
            branch: account.branch().to_string(),
            holder: self.client.name.clone(),
            balance: account.balance(),
            withdrawal_limit: account.rules().withdrawal_limit,
            withdrawals_performed: account.withdrawals_performed(),
            withdrawals_remaining: account.withdrawals_remaining(),
            transaction_count: account.history().len(),
        })
    }
}
