use super::{format_money, Cents, History, Transaction, TransactionKind};

pub type AccountNumber = u32;

/// Branch code used when none is given.
pub const DEFAULT_BRANCH: &str = "0001";

/// Authorization rules of an account, fixed when the account is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRules {
    /// Largest amount allowed in a single withdrawal, independent of balance
    pub withdrawal_limit: Cents,
    /// Number of withdrawals allowed per session
    pub max_withdrawals: u32,
}

impl AccountRules {
    pub fn new(withdrawal_limit: Cents, max_withdrawals: u32) -> Self {
        Self {
            withdrawal_limit,
            max_withdrawals,
        }
    }
}

impl Default for AccountRules {
    fn default() -> Self {
        Self::new(50000, 3)
    }
}

/// A request to move money on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit(Cents),
    Withdraw(Cents),
}

impl Operation {
    pub fn amount_cents(&self) -> Cents {
        match *self {
            Operation::Deposit(amount) | Operation::Withdraw(amount) => amount,
        }
    }
}

/// Reasons a ledger operation can be refused. A refused operation never
/// changes the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount is zero, negative, or would overflow the balance
    InvalidAmount { amount: Cents },
    InsufficientFunds { balance: Cents, requested: Cents },
    LimitExceeded { limit: Cents, requested: Cents },
    WithdrawalCountExceeded { max_withdrawals: u32 },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::InvalidAmount { amount } => {
                write!(f, "The amount entered is invalid ({})", format_money(*amount))
            }
            LedgerError::InsufficientFunds { balance, requested } => write!(
                f,
                "Insufficient funds: balance {}, requested {}",
                format_money(*balance),
                format_money(*requested)
            ),
            LedgerError::LimitExceeded { limit, requested } => write!(
                f,
                "Withdrawal of {} exceeds the limit of {}",
                format_money(*requested),
                format_money(*limit)
            ),
            LedgerError::WithdrawalCountExceeded { max_withdrawals } => write!(
                f,
                "Maximum number of withdrawals reached ({})",
                max_withdrawals
            ),
        }
    }
}

impl std::error::Error for LedgerError {}

/// A bank account: balance, withdrawal rules, and the log of everything
/// that happened to it during the session.
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    rules: AccountRules,
    balance: Cents,
    withdrawals_performed: u32,
    history: History,
}

impl Account {
    /// Open an account with zero balance.
    pub fn new(number: AccountNumber, branch: impl Into<String>, rules: AccountRules) -> Self {
        Self {
            number,
            branch: branch.into(),
            rules,
            balance: 0,
            withdrawals_performed: 0,
            history: History::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn rules(&self) -> AccountRules {
        self.rules
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn withdrawals_performed(&self) -> u32 {
        self.withdrawals_performed
    }

    pub fn withdrawals_remaining(&self) -> u32 {
        self.rules
            .max_withdrawals
            .saturating_sub(self.withdrawals_performed)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Credit `amount` to the account and return the new balance.
    pub fn deposit(&mut self, amount: Cents) -> Result<Cents, LedgerError> {
        self.credit(amount).map(Transaction::balance_after_cents)
    }

    /// Debit `amount` from the account and return the new balance.
    ///
    /// Checks run in a fixed order and only the first failure is reported:
    /// positive amount, enough balance, within the per-withdrawal limit,
    /// withdrawals left this session.
    pub fn withdraw(&mut self, amount: Cents) -> Result<Cents, LedgerError> {
        self.debit(amount).map(Transaction::balance_after_cents)
    }

    /// Run the withdrawal checks without touching the account.
    pub fn authorize_withdrawal(&self, amount: Cents) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        if amount > self.rules.withdrawal_limit {
            return Err(LedgerError::LimitExceeded {
                limit: self.rules.withdrawal_limit,
                requested: amount,
            });
        }
        if self.withdrawals_performed >= self.rules.max_withdrawals {
            return Err(LedgerError::WithdrawalCountExceeded {
                max_withdrawals: self.rules.max_withdrawals,
            });
        }
        Ok(())
    }

    /// Apply an operation and return the transaction it recorded.
    pub fn apply(&mut self, operation: Operation) -> Result<&Transaction, LedgerError> {
        match operation {
            Operation::Deposit(amount) => self.credit(amount),
            Operation::Withdraw(amount) => self.debit(amount),
        }
    }

    fn credit(&mut self, amount: Cents) -> Result<&Transaction, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount { amount });
        }
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount { amount })?;

        self.balance = new_balance;
        Ok(self.history.append(
            TransactionKind::Deposit {
                amount_cents: amount,
            },
            new_balance,
        ))
    }

    fn debit(&mut self, amount: Cents) -> Result<&Transaction, LedgerError> {
        self.authorize_withdrawal(amount)?;

        self.balance -= amount;
        self.withdrawals_performed += 1;
        Ok(self.history.append(
            TransactionKind::Withdrawal {
                amount_cents: amount,
            },
            self.balance,
        ))
    }

    /// Read-only view of the transaction log and the current balance.
    pub fn statement(&self) -> Statement<'_> {
        Statement {
            number: self.number,
            branch: &self.branch,
            balance: self.balance,
            transactions: self.history.as_slice(),
        }
    }
}

/// Snapshot of an account's history and balance.
///
/// Iterating a statement never consumes it; every call to [`Statement::iter`]
/// starts again from the first transaction.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    number: AccountNumber,
    branch: &'a str,
    balance: Cents,
    transactions: &'a [Transaction],
}

impl<'a> Statement<'a> {
    pub fn account_number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &'a str {
        self.branch
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Transaction> {
        self.transactions.iter()
    }

    pub fn total_deposited(&self) -> Cents {
        self.iter()
            .filter(|t| t.is_deposit())
            .map(|t| t.amount_cents())
            .sum()
    }

    pub fn total_withdrawn(&self) -> Cents {
        self.iter()
            .filter(|t| t.is_withdrawal())
            .map(|t| t.amount_cents())
            .sum()
    }
}

impl<'a> IntoIterator for Statement<'a> {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

impl<'a> IntoIterator for &Statement<'a> {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
