// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate, TimeZone};
use finplan::clock::FixedClock;
use finplan::ledger::Ledger;
use finplan::models::{Currency, NewTransaction, TransactionType};
use finplan::storage::MemoryStore;
use finplan::utils::local_day_start;
use finplan::{cli, commands::exporter};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn ledger() -> Ledger<MemoryStore, FixedClock> {
    let now = Local.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap();
    Ledger::open(MemoryStore::new(), FixedClock(now), Currency::Brl).unwrap()
}

fn run_export(ledger: &Ledger<MemoryStore, FixedClock>, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "finplan",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(ledger, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn csv_quotes_awkward_descriptions() {
    let mut ledger = ledger();
    ledger.clear_all().unwrap();
    ledger
        .add_transaction(NewTransaction {
            kind: TransactionType::Expense,
            amount: Decimal::new(4250, 2),
            category: "food".into(),
            description: r#"Dinner, "the good one""#.into(),
            date: local_day_start(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap()),
        })
        .unwrap();

    let mut buf = Vec::new();
    exporter::write_csv(&ledger.data().transactions, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Date,Type,Category,Amount,Description");
    assert_eq!(
        lines[1],
        r#"03/08/2025,expense,food,42.50,"Dinner, ""the good one""""#
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn csv_export_keeps_list_order() {
    let ledger = ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("transactions.csv");
    run_export(&ledger, "csv", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][1], "income");
    assert_eq!(&rows[0][4], "Monthly Salary");
    assert_eq!(&rows[0][0], "01/08/2025");
    assert_eq!(&rows[1][2], "food");
}

#[test]
fn json_export_writes_stored_records() {
    let ledger = ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("transactions.json");
    run_export(&ledger, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[0]["type"], "income");
    assert_eq!(items[1]["description"], "Coffee & Lunch");
}

#[test]
fn unknown_format_is_rejected_before_writing() {
    let ledger = ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    assert!(run_export(&ledger, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
