use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Cents;

pub type TransactionId = Uuid;

/// What a transaction did to the account, with the amount it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit { amount_cents: Cents },
    Withdrawal { amount_cents: Cents },
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit { .. } => "deposit",
            TransactionKind::Withdrawal { .. } => "withdrawal",
        }
    }

    pub fn amount_cents(&self) -> Cents {
        match *self {
            TransactionKind::Deposit { amount_cents }
            | TransactionKind::Withdrawal { amount_cents } => amount_cents,
        }
    }

    /// Signed effect on the balance: positive for deposits, negative for withdrawals.
    pub fn signed_amount(&self) -> Cents {
        match *self {
            TransactionKind::Deposit { amount_cents } => amount_cents,
            TransactionKind::Withdrawal { amount_cents } => -amount_cents,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit { .. } => write!(f, "Deposit"),
            TransactionKind::Withdrawal { .. } => write!(f, "Withdrawal"),
        }
    }
}

/// A settled movement of money on one account.
/// Transactions are immutable and can only be created by the account ledger
/// as the result of a successful deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    /// Position in the account history, starting at 1
    sequence: u64,
    #[serde(flatten)]
    kind: TransactionKind,
    /// Balance right after this transaction was applied
    balance_after_cents: Cents,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(sequence: u64, kind: TransactionKind, balance_after_cents: Cents) -> Self {
        debug_assert!(kind.amount_cents() > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            sequence,
            kind,
            balance_after_cents,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount_cents(&self) -> Cents {
        self.kind.amount_cents()
    }

    pub fn balance_after_cents(&self) -> Cents {
        self.balance_after_cents
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_deposit(&self) -> bool {
        matches!(self.kind, TransactionKind::Deposit { .. })
    }

    pub fn is_withdrawal(&self) -> bool {
        matches!(self.kind, TransactionKind::Withdrawal { .. })
    }
}

/// Append-only, insertion-ordered log of the transactions of one account.
#[derive(Debug, Clone, Default)]
pub struct History {
    transactions: Vec<Transaction>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new transaction at the end of the log and return it.
    pub(crate) fn append(
        &mut self,
        kind: TransactionKind,
        balance_after_cents: Cents,
    ) -> &Transaction {
        let sequence = self.transactions.len() as u64 + 1;
        self.transactions
            .push(Transaction::new(sequence, kind, balance_after_cents));
        &self.transactions[self.transactions.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }
}
