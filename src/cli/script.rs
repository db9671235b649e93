use anyhow::{Context, Result};
use std::io::Write;
use std::str::FromStr;

use crate::application::TellerService;
use crate::domain::{parse_cents, Operation};

use super::{render_statement, report_outcome};

/// One step of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOp {
    Apply(Operation),
    Statement,
}

impl FromStr for ScriptOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, amount) = match s.split_once(':') {
            Some((name, amount)) => (name, Some(amount)),
            None => (s, None),
        };

        match (name.to_lowercase().as_str(), amount) {
            ("e" | "statement", None) => Ok(ScriptOp::Statement),
            ("d" | "deposit", Some(amount)) => Ok(ScriptOp::Apply(Operation::Deposit(
                parse_cents(amount)
                    .with_context(|| format!("Invalid amount in '{}'", s))?,
            ))),
            ("s" | "withdraw", Some(amount)) => Ok(ScriptOp::Apply(Operation::Withdraw(
                parse_cents(amount)
                    .with_context(|| format!("Invalid amount in '{}'", s))?,
            ))),
            _ => anyhow::bail!(
                "Invalid operation '{}'. Use d:AMOUNT, s:AMOUNT or e",
                s
            ),
        }
    }
}

/// Outcome counts of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub applied: usize,
    pub rejected: usize,
}

/// Run a batch of operations against the service, then print the final
/// statement and the applied/rejected counts.
///
/// Every op is parsed before anything runs, so a malformed op leaves the
/// account untouched. Ledger rejections are reported and the batch goes on.
pub fn run_script<W: Write>(
    service: &mut TellerService,
    ops: &[String],
    output: &mut W,
) -> Result<ScriptReport> {
    let ops = ops
        .iter()
        .map(|op| op.parse::<ScriptOp>())
        .collect::<Result<Vec<_>>>()?;

    let mut report = ScriptReport::default();
    for op in ops {
        match op {
            ScriptOp::Apply(operation) => {
                let result = service
                    .perform(operation)
                    .map(|tx| tx.balance_after_cents());
                if report_outcome(output, operation, result)? {
                    report.applied += 1;
                } else {
                    report.rejected += 1;
                }
            }
            ScriptOp::Statement => render_statement(output, &service.statement()?)?,
        }
    }

    render_statement(output, &service.statement()?)?;
    writeln!(output, "{} applied, {} rejected", report.applied, report.rejected)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_ops() {
        assert_eq!(
            "d:1500".parse::<ScriptOp>().unwrap(),
            ScriptOp::Apply(Operation::Deposit(150000))
        );
        assert_eq!(
            "withdraw:12.50".parse::<ScriptOp>().unwrap(),
            ScriptOp::Apply(Operation::Withdraw(1250))
        );
        assert_eq!("E".parse::<ScriptOp>().unwrap(), ScriptOp::Statement);
        assert_eq!("statement".parse::<ScriptOp>().unwrap(), ScriptOp::Statement);
    }

    #[test]
    fn test_negative_amounts_parse_and_reach_the_ledger() {
        assert_eq!(
            "s:-5".parse::<ScriptOp>().unwrap(),
            ScriptOp::Apply(Operation::Withdraw(-500))
        );
    }

    #[test]
    fn test_parse_script_ops_invalid() {
        assert!("d".parse::<ScriptOp>().is_err());
        assert!("d:abc".parse::<ScriptOp>().is_err());
        assert!("e:10".parse::<ScriptOp>().is_err());
        assert!("x:10".parse::<ScriptOp>().is_err());
    }
}
