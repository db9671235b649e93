// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use clap::Parser;
use teller::application::TellerService;
use teller::cli::Cli;
use teller::domain::{AccountRules, Cents, Client, DEFAULT_BRANCH};

/// Helper to create a service with one selected account and the given rules
pub fn test_service(withdrawal_limit: Cents, max_withdrawals: u32) -> Result<TellerService> {
    let service = TellerService::with_account(
        Client::new("Test Holder"),
        1,
        DEFAULT_BRANCH,
        AccountRules::new(withdrawal_limit, max_withdrawals),
    )?;
    Ok(service)
}

/// Helper to create a service with the default rules (limit 500.00, 3 withdrawals)
pub fn default_service() -> Result<TellerService> {
    test_service(AccountRules::default().withdrawal_limit, 3)
}

/// Run the CLI with the given arguments and stdin, returning stdout
pub fn run_cli(args: &[&str], stdin: &str) -> Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("teller").chain(args.iter().copied()))?;
    let mut output = Vec::new();
    cli.run_with(stdin.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output)?)
}
