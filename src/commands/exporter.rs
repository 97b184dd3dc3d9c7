// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::storage::KeyValueStore;
use crate::utils::required_arg;
use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

/// Writes transactions in list order. Fields containing commas, quotes or
/// newlines are quoted.
pub fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for t in transactions {
        wtr.write_record([
            t.date.with_timezone(&Local).format("%d/%m/%Y").to_string(),
            t.kind.to_string(),
            t.category.clone(),
            t.amount.to_string(),
            t.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_transactions<S: KeyValueStore, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    let transactions = &ledger.data().transactions;

    match fmt.as_str() {
        "csv" => {
            let file = std::fs::File::create(out)
                .with_context(|| format!("Failed to create {}", out))?;
            write_csv(transactions, file)?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(transactions)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}
