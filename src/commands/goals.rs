// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::models::{GoalPatch, NewGoal};
use crate::storage::KeyValueStore;
use crate::utils::{
    fmt_money, maybe_print_json, optional_arg, parse_amount, parse_date, parse_decimal,
    pretty_table, required_arg,
};
use anyhow::Result;
use chrono::Days;
use rust_decimal::Decimal;

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("contribute", sub)) => contribute(ledger, sub)?,
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let name = required_arg(sub, "name")?.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Goal name must not be empty");
    }
    let target = parse_amount(required_arg(sub, "target")?)?;
    let deadline = match optional_arg(sub, "deadline") {
        Some(d) => parse_date(d)?,
        None => {
            let today = ledger.clock().now().date_naive();
            today.checked_add_days(Days::new(365)).unwrap_or(today)
        }
    };
    let category = optional_arg(sub, "category").unwrap_or("savings").to_string();
    let g = ledger.add_goal(NewGoal {
        name,
        target_amount: target,
        current_amount: Decimal::ZERO,
        deadline,
        category,
    })?;
    println!("Added goal {} '{}' (target {}, by {})", g.id, g.name, g.target_amount, g.deadline);
    Ok(())
}

fn contribute<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = required_arg(sub, "ID")?;
    let amount = parse_amount(required_arg(sub, "AMOUNT")?)?;
    match ledger.contribute_to_goal(id, amount)? {
        Some(g) => {
            let ccy = ledger.data().settings.currency;
            println!(
                "'{}': {} of {} ({:.0}%)",
                g.name,
                fmt_money(&g.current_amount, ccy),
                fmt_money(&g.target_amount, ccy),
                g.progress_percent()
            );
        }
        None => println!("No goal with id {}", id),
    }
    Ok(())
}

fn set<S: KeyValueStore, C: Clock>(ledger: &mut Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "ID")?;
    let patch = GoalPatch {
        name: optional_arg(sub, "name").map(|n| n.trim().to_string()),
        target_amount: optional_arg(sub, "target").map(parse_amount).transpose()?,
        current_amount: optional_arg(sub, "current").map(parse_decimal).transpose()?,
        deadline: optional_arg(sub, "deadline").map(parse_date).transpose()?,
        category: None,
    };
    if ledger.update_goal(id, patch)? {
        println!("Updated goal {}", id);
    } else {
        println!("No goal with id {}", id);
    }
    Ok(())
}

fn list<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = &ledger.data().goals;
    if maybe_print_json(json_flag, jsonl_flag, goals)? {
        return Ok(());
    }
    let ccy = ledger.data().settings.currency;
    let today = ledger.clock().now().date_naive();
    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            vec![
                g.id.clone(),
                g.name.clone(),
                fmt_money(&g.current_amount, ccy),
                fmt_money(&g.target_amount, ccy),
                format!("{:.0}%", g.progress_percent()),
                g.deadline.to_string(),
                match g.days_left(today) {
                    d if d > 0 => format!("{} days", d),
                    _ => "deadline passed".to_string(),
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Goal", "Saved", "Target", "Progress", "Deadline", "Days left"], rows)
    );
    Ok(())
}
