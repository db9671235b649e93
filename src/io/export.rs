use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::domain::{AccountNumber, Cents, Statement, Transaction};

/// Statement snapshot written by the JSON export
#[derive(Debug, Clone, Serialize)]
pub struct StatementSnapshot<'a> {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub account: AccountNumber,
    pub branch: &'a str,
    pub balance_cents: Cents,
    pub transactions: Vec<&'a Transaction>,
}

/// Output formats supported by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown export format '{}'. Valid: csv, json", other)),
        }
    }
}

/// Exporter for writing an account statement to various formats
pub struct Exporter<'a> {
    statement: Statement<'a>,
}

impl<'a> Exporter<'a> {
    pub fn new(statement: Statement<'a>) -> Self {
        Self { statement }
    }

    /// Export in the given format; returns the number of transactions written.
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(writer),
            ExportFormat::Json => Ok(self.export_json(writer)?.transactions.len()),
        }
    }

    /// Export transactions to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "sequence",
            "id",
            "timestamp",
            "type",
            "amount_cents",
            "balance_after_cents",
        ])?;

        let mut count = 0;
        for transaction in &self.statement {
            csv_writer.write_record(&[
                transaction.sequence().to_string(),
                transaction.id().to_string(),
                transaction.timestamp().to_rfc3339(),
                transaction.kind().as_str().to_string(),
                transaction.amount_cents().to_string(),
                transaction.balance_after_cents().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the statement as a pretty-printed JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<StatementSnapshot<'a>> {
        let snapshot = StatementSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            account: self.statement.account_number(),
            branch: self.statement.branch(),
            balance_cents: self.statement.balance(),
            transactions: self.statement.iter().collect(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
