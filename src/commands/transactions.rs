// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::categories_for;
use crate::clock::Clock;
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{NewTransaction, TransactionType};
use crate::storage::KeyValueStore;
use crate::utils::{
    fmt_money, local_day_start, maybe_print_json, optional_arg, parse_amount, parse_date,
    pretty_table, required_arg,
};
use anyhow::Result;
use chrono::{Local, Utc};
use serde::Serialize;

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = required_arg(sub, "type")?.parse()?;
    let amount = parse_amount(required_arg(sub, "amount")?)?;
    let cat = required_arg(sub, "category")?.trim().to_string();
    let description = required_arg(sub, "description")?.trim().to_string();
    if description.is_empty() {
        anyhow::bail!("Description must not be empty");
    }
    let allowed = categories_for(kind);
    if !allowed.iter().any(|c| c.id == cat) {
        let known: Vec<&str> = allowed.iter().map(|c| c.id).collect();
        anyhow::bail!(
            "Unknown category '{}' (for {} use one of: {})",
            cat,
            kind,
            known.join(", ")
        );
    }
    let date = match optional_arg(sub, "date") {
        Some(d) => local_day_start(parse_date(d)?),
        None => ledger.clock().now().with_timezone(&Utc),
    };

    let tx = ledger.add_transaction(NewTransaction {
        kind,
        amount,
        category: cat,
        description,
        date,
    })?;
    let ccy = ledger.data().settings.currency;
    println!(
        "Recorded {} {} '{}' ({}) as {}",
        tx.kind,
        fmt_money(&tx.amount, ccy),
        tx.description,
        tx.category,
        tx.id
    );
    Ok(())
}

fn list<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "ID")?;
    if ledger.delete_transaction(id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Transactions matching the list filters, newest first.
pub fn query_rows<S: KeyValueStore, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = optional_arg(sub, "type")
        .map(str::parse::<TransactionType>)
        .transpose()?;
    let filter = TransactionFilter {
        search: optional_arg(sub, "search").map(str::to_string),
        kind,
        category: optional_arg(sub, "category").map(str::to_string),
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(ledger
        .filter_transactions(&filter)
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t
                .date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: format!("{:.2}", t.amount),
            description: t.description.clone(),
        })
        .collect())
}
