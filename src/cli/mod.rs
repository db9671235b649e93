use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use crate::application::{AppError, TellerService};
use crate::domain::{
    format_money, parse_cents, AccountNumber, AccountRules, Cents, Client, Operation, Statement,
    DEFAULT_BRANCH,
};
use crate::io::{ExportFormat, Exporter};

mod menu;
mod script;

pub use menu::{MenuChoice, MenuSession};
pub use script::{run_script, ScriptOp, ScriptReport};

/// Teller - single account bank ledger
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "A menu-driven bank account: deposit, withdraw, statement")]
#[command(version)]
pub struct Cli {
    /// Account holder name
    #[arg(long, default_value = "Account Holder", global = true)]
    pub holder: String,

    /// Branch code of the account
    #[arg(long, default_value = DEFAULT_BRANCH, global = true)]
    pub branch: String,

    /// Account number
    #[arg(long, default_value_t = 1, global = true)]
    pub account: AccountNumber,

    /// Maximum amount of a single withdrawal (e.g., "500.00" or "500")
    #[arg(long, default_value = "500.00", global = true)]
    pub limit: String,

    /// Number of withdrawals allowed in this session
    #[arg(long, default_value_t = 3, global = true)]
    pub max_withdrawals: u32,

    /// Write the final statement to this file when the session ends
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Export format: csv, json
    #[arg(short, long, default_value = "csv", global = true)]
    pub format: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Run a batch of operations and print the final statement
    Run {
        /// Operations: d:AMOUNT, s:AMOUNT, e (or deposit:, withdraw:, statement)
        #[arg(required = true)]
        ops: Vec<String>,
    },

    /// Replay the sample session: limit 1000.00, three withdrawals, the last one refused
    Demo,
}

impl Cli {
    /// Account rules from the command line flags.
    pub fn rules(&self) -> Result<AccountRules> {
        let limit = parse_cents(&self.limit).with_context(|| {
            format!("Invalid limit '{}'. Use '500.00' or '500'", self.limit)
        })?;
        if limit <= 0 {
            bail!("Withdrawal limit must be positive, got {}", self.limit);
        }
        Ok(AccountRules::new(limit, self.max_withdrawals))
    }

    fn export_target(&self) -> Result<Option<(PathBuf, ExportFormat)>> {
        let format: ExportFormat = self
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(self.export.clone().map(|path| (path, format)))
    }

    fn build_service(&self) -> Result<TellerService> {
        let rules = self.rules()?;
        let client = Client::new(self.holder.clone());
        Ok(TellerService::with_account(
            client,
            self.account,
            self.branch.clone(),
            rules,
        )?)
    }

    /// Run against the process stdin/stdout.
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run against arbitrary input/output streams.
    pub fn run_with<R: BufRead, W: Write>(self, input: R, mut output: W) -> Result<()> {
        let export = self.export_target()?;
        let command = self.command.clone().unwrap_or(Commands::Menu);

        let mut service = match command {
            Commands::Demo => demo_service()?,
            _ => self.build_service()?,
        };

        match command {
            Commands::Menu => {
                MenuSession::new(&mut service, input, &mut output).run()?;
            }
            Commands::Run { ops } => {
                run_script(&mut service, &ops, &mut output)?;
            }
            Commands::Demo => {
                run_demo(&mut service, &mut output)?;
            }
        }

        if let Some((path, format)) = export {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create export file {}", path.display()))?;
            let count = Exporter::new(service.statement()?).export(format, BufWriter::new(file))?;
            writeln!(
                output,
                "Exported {} transaction(s) to {} ({})",
                count,
                path.display(),
                format.as_str()
            )?;
        }

        Ok(())
    }
}

/// The sample client and account of the demo session.
pub fn demo_service() -> Result<TellerService> {
    let birth_date = NaiveDate::from_ymd_opt(1985, 5, 20).context("Invalid demo birth date")?;
    let client = Client::new("João Silva")
        .with_tax_id("123.456.789-00")
        .with_birth_date(birth_date)
        .with_address("Rua das Flores, 123");
    Ok(TellerService::with_account(
        client,
        1234,
        DEFAULT_BRANCH,
        AccountRules::new(100000, 3),
    )?)
}

/// Deposit 1500, then withdraw 300, 700 and 600; the last withdrawal is
/// refused because only 500 is left.
pub fn run_demo<W: Write>(service: &mut TellerService, output: &mut W) -> Result<()> {
    let operations = [
        Operation::Deposit(150000),
        Operation::Withdraw(30000),
        Operation::Withdraw(70000),
        Operation::Withdraw(60000),
    ];

    for operation in operations {
        let result = service.perform(operation).map(|tx| tx.balance_after_cents());
        report_outcome(output, operation, result)?;
    }

    writeln!(output)?;
    writeln!(output, "Account statement:")?;
    render_statement(output, &service.statement()?)?;
    Ok(())
}

/// Print the outcome of a ledger operation. Ledger rejections are reported
/// and swallowed; any other error is returned.
pub fn report_outcome<W: Write>(
    output: &mut W,
    operation: Operation,
    result: Result<Cents, AppError>,
) -> Result<bool> {
    match result {
        Ok(_) => {
            let label = match operation {
                Operation::Deposit(_) => "Deposit",
                Operation::Withdraw(_) => "Withdrawal",
            };
            writeln!(
                output,
                "{} of {} completed successfully!",
                label,
                format_money(operation.amount_cents())
            )?;
            Ok(true)
        }
        Err(AppError::Ledger(err)) => {
            writeln!(output, "Operation failed! {}.", err)?;
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Print a statement: one line per transaction, then the balance.
pub fn render_statement<W: Write>(output: &mut W, statement: &Statement<'_>) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "================== STATEMENT ==================")?;
    if statement.is_empty() {
        writeln!(output, "No transactions recorded.")?;
    } else {
        for transaction in statement {
            writeln!(
                output,
                "{}: {}",
                transaction.kind(),
                format_money(transaction.amount_cents())
            )?;
        }
    }
    writeln!(output)?;
    writeln!(output, "Balance: {}", format_money(statement.balance()))?;
    writeln!(output, "===============================================")?;
    Ok(())
}
