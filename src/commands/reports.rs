// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::category_label;
use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::storage::KeyValueStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use serde_json::json;

const RECENT_DEFAULT: usize = 5;

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(ledger, sub)?,
        Some(("categories", sub)) => categories(ledger, sub)?,
        Some(("recent", sub)) => recent(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn month<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let stats = ledger.monthly_stats();
    let payload = json!({
        "income": stats.income,
        "expenses": stats.expenses,
        "savings": stats.savings(),
    });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        return Ok(());
    }
    let ccy = ledger.data().settings.currency;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Savings"],
            vec![vec![
                fmt_money(&stats.income, ccy),
                fmt_money(&stats.expenses, ccy),
                fmt_money(&stats.savings(), ccy),
            ]],
        )
    );
    Ok(())
}

fn categories<S: KeyValueStore, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let breakdown = ledger.category_breakdown();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &breakdown)? {
        return Ok(());
    }
    let ccy = ledger.data().settings.currency;
    let rows = breakdown
        .iter()
        .map(|(cat, total)| vec![category_label(cat), fmt_money(total, ccy)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total"], rows));
    Ok(())
}

fn recent<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let n = sub.get_one::<usize>("limit").copied().unwrap_or(RECENT_DEFAULT);
    let ccy = ledger.data().settings.currency;
    let rows = ledger
        .recent_transactions(n)
        .iter()
        .map(|t| {
            let sign = match t.kind {
                crate::models::TransactionType::Income => "+",
                crate::models::TransactionType::Expense => "-",
            };
            vec![
                t.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
                t.description.clone(),
                category_label(&t.category),
                format!("{} {}", sign, fmt_money(&t.amount, ccy)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount"], rows)
    );
    Ok(())
}
