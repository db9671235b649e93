use proptest::prelude::*;
use teller::domain::{Account, AccountRules, LedgerError, DEFAULT_BRANCH};

fn funded_account(balance: i64, limit: i64, max_withdrawals: u32) -> Account {
    let mut account = Account::new(1, DEFAULT_BRANCH, AccountRules::new(limit, max_withdrawals));
    if balance > 0 {
        account.deposit(balance).unwrap();
    }
    account
}

proptest! {
    #[test]
    fn non_positive_amounts_are_invalid(amount in i64::MIN..=0, balance in 0i64..1_000_000) {
        let mut account = funded_account(balance, 50_000, 3);
        let before = account.history().len();

        prop_assert_eq!(account.deposit(amount), Err(LedgerError::InvalidAmount { amount }));
        prop_assert_eq!(account.withdraw(amount), Err(LedgerError::InvalidAmount { amount }));
        prop_assert_eq!(account.balance(), balance);
        prop_assert_eq!(account.history().len(), before);
    }

    #[test]
    fn deposit_adds_to_balance_and_log(balance in 0i64..1_000_000_000, amount in 1i64..1_000_000_000) {
        let mut account = funded_account(balance, 50_000, 3);
        let before = account.statement().len();

        prop_assert_eq!(account.deposit(amount), Ok(balance + amount));

        let statement = account.statement();
        prop_assert_eq!(statement.len(), before + 1);
        let last = statement.iter().last().unwrap();
        prop_assert!(last.is_deposit());
        prop_assert_eq!(last.amount_cents(), amount);
    }

    #[test]
    fn overdraw_is_insufficient_funds(balance in 0i64..1_000_000, excess in 1i64..1_000_000) {
        let mut account = funded_account(balance, i64::MAX, 3);
        let amount = balance + excess;

        prop_assert_eq!(
            account.withdraw(amount),
            Err(LedgerError::InsufficientFunds { balance, requested: amount })
        );
        prop_assert_eq!(account.balance(), balance);
        prop_assert_eq!(account.withdrawals_performed(), 0);
    }

    #[test]
    fn over_limit_within_balance_is_limit_exceeded(limit in 1i64..100_000, excess in 1i64..100_000) {
        let amount = limit + excess;
        let mut account = funded_account(amount * 2, limit, 3);

        prop_assert_eq!(
            account.withdraw(amount),
            Err(LedgerError::LimitExceeded { limit, requested: amount })
        );
        prop_assert_eq!(account.balance(), amount * 2);
    }

    #[test]
    fn withdrawals_are_capped(max_withdrawals in 0u32..6, amount in 1i64..1_000) {
        let mut account = funded_account(1_000_000, 1_000, max_withdrawals);
        for _ in 0..max_withdrawals {
            prop_assert!(account.withdraw(amount).is_ok());
        }
        let balance = account.balance();

        prop_assert_eq!(
            account.withdraw(amount),
            Err(LedgerError::WithdrawalCountExceeded { max_withdrawals })
        );
        prop_assert_eq!(account.balance(), balance);
        prop_assert_eq!(account.withdrawals_performed(), max_withdrawals);
    }

    #[test]
    fn balance_matches_log(ops in proptest::collection::vec((any::<bool>(), -100i64..5_000), 0..40)) {
        let mut account = funded_account(0, 2_000, 10);
        for (is_deposit, amount) in ops {
            let _ = if is_deposit { account.deposit(amount) } else { account.withdraw(amount) };
            prop_assert!(account.balance() >= 0);
            prop_assert!(account.withdrawals_performed() <= 10);
        }

        let statement = account.statement();
        let net: i64 = statement.iter().map(|t| t.kind().signed_amount()).sum();
        prop_assert_eq!(net, statement.balance());
        prop_assert_eq!(statement.total_deposited() - statement.total_withdrawn(), statement.balance());
    }
}
