// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::category_label;
use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::models::{BudgetHealth, BudgetPatch, NewBudget};
use crate::storage::KeyValueStore;
use crate::utils::{
    fmt_money, maybe_print_json, month_key, optional_arg, parse_amount, parse_month,
    pretty_table, required_arg,
};
use anyhow::Result;

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let month = match optional_arg(sub, "month") {
        Some(m) => parse_month(m)?,
        None => month_key(ledger.clock().now().date_naive()),
    };
    let cat = required_arg(sub, "category")?.trim().to_string();
    let limit = parse_amount(required_arg(sub, "limit")?)?;
    let b = ledger.add_budget(NewBudget {
        category: cat,
        limit,
        month,
    })?;
    println!(
        "Budget {} set for {} / {} = {}",
        b.id,
        b.month,
        b.category,
        fmt_money(&b.limit, ledger.data().settings.currency)
    );
    Ok(())
}

fn set<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "ID")?;
    let patch = BudgetPatch {
        category: optional_arg(sub, "category").map(|c| c.trim().to_string()),
        limit: optional_arg(sub, "limit").map(parse_amount).transpose()?,
        month: optional_arg(sub, "month").map(parse_month).transpose()?,
    };
    if ledger.update_budget(id, patch)? {
        println!("Updated budget {}", id);
    } else {
        println!("No budget with id {}", id);
    }
    Ok(())
}

fn list<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = optional_arg(sub, "month").map(parse_month).transpose()?;
    let statuses = ledger.budget_statuses(month.as_deref());
    if maybe_print_json(json_flag, jsonl_flag, &statuses)? {
        return Ok(());
    }
    let ccy = ledger.data().settings.currency;
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|s| {
            let flag = match s.health {
                BudgetHealth::Ok => "ok",
                BudgetHealth::Warning => "near limit",
                BudgetHealth::Over => "OVER",
            };
            vec![
                s.id.clone(),
                s.month.clone(),
                category_label(&s.category),
                fmt_money(&s.spent, ccy),
                fmt_money(&s.limit, ccy),
                format!("{:.0}%", s.percent_used),
                flag.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Month", "Category", "Spent", "Limit", "Used", "Status"],
            rows
        )
    );
    Ok(())
}
