use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::application::TellerService;
use crate::domain::{parse_cents, Cents, Operation};

use super::{render_statement, report_outcome};

const MENU: &str = "
==================
[d] Deposit
[s] Withdraw
[e] Statement
[q] Quit
==================
=> ";

/// An option picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    Statement,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" => Ok(MenuChoice::Deposit),
            "s" => Ok(MenuChoice::Withdraw),
            "e" => Ok(MenuChoice::Statement),
            "q" => Ok(MenuChoice::Quit),
            other => Err(format!("unknown menu option '{}'", other)),
        }
    }
}

/// Interactive read-eval-print loop over one teller service.
pub struct MenuSession<'s, R, W> {
    service: &'s mut TellerService,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> MenuSession<'s, R, W> {
    pub fn new(service: &'s mut TellerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Loop until the user quits or input ends.
    pub fn run(mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Deposit) => {
                    if let Some(amount) = self.prompt_amount("Enter the deposit amount: ")? {
                        self.apply(Operation::Deposit(amount))?;
                    }
                }
                Ok(MenuChoice::Withdraw) => {
                    if let Some(amount) = self.prompt_amount("Enter the withdrawal amount: ")? {
                        self.apply(Operation::Withdraw(amount))?;
                    }
                }
                Ok(MenuChoice::Statement) => {
                    render_statement(&mut self.output, &self.service.statement()?)?;
                }
                Ok(MenuChoice::Quit) => break,
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid operation, please select the desired operation again."
                    )?;
                }
            }
        }

        writeln!(self.output, "Exiting... Thank you for using our system!")?;
        Ok(())
    }

    fn apply(&mut self, operation: Operation) -> Result<bool> {
        let result = self
            .service
            .perform(operation)
            .map(|tx| tx.balance_after_cents());
        report_outcome(&mut self.output, operation, result)
    }

    /// Ask for an amount. Returns `None` when the answer cannot be parsed
    /// or input has ended.
    fn prompt_amount(&mut self, prompt: &str) -> Result<Option<Cents>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        match parse_cents(&line) {
            Ok(amount) => Ok(Some(amount)),
            Err(err) => {
                writeln!(self.output, "Operation failed! {}: '{}'.", err, line.trim())?;
                Ok(None)
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!("d".parse::<MenuChoice>(), Ok(MenuChoice::Deposit));
        assert_eq!(" S \n".parse::<MenuChoice>(), Ok(MenuChoice::Withdraw));
        assert_eq!("E".parse::<MenuChoice>(), Ok(MenuChoice::Statement));
        assert_eq!("q".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
        assert!("x".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }
}
