// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use finplan::clock::FixedClock;
use finplan::ledger::{Ledger, TransactionFilter, STORAGE_KEY};
use finplan::models::{
    BudgetHealth, BudgetPatch, Currency, FinancialData, NewBudget, NewGoal, NewTransaction,
    SettingsPatch, Theme, TransactionType,
};
use finplan::storage::{KeyValueStore, MemoryStore, SqliteStore};
use finplan::utils::local_day_start;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    local_day_start(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn seeded() -> Ledger<MemoryStore, FixedClock> {
    Ledger::open(MemoryStore::new(), FixedClock(now()), Currency::Usd).unwrap()
}

fn empty() -> Ledger<MemoryStore, FixedClock> {
    let mut l = seeded();
    l.clear_all().unwrap();
    l
}

fn tx(kind: TransactionType, amount: Decimal, category: &str, at: DateTime<Utc>) -> NewTransaction {
    NewTransaction {
        kind,
        amount,
        category: category.to_string(),
        description: format!("{} {}", category, amount),
        date: at,
    }
}

#[test]
fn empty_store_yields_sample_data_without_writing() {
    let ledger = seeded();
    let data = ledger.data();
    let ids: Vec<&str> = data.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    assert_eq!(data.settings.currency, Currency::Usd);
    assert_eq!(data.settings.theme, Theme::Light);
    assert_eq!(data.goals.len(), 1);
    assert_eq!(data.budgets.len(), 4);

    let stats = ledger.monthly_stats();
    assert_eq!(stats.income, Decimal::new(5000, 0));
    assert_eq!(stats.expenses, Decimal::new(39550, 2));

    let store = ledger.into_store();
    assert!(store.get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn sample_currency_follows_configuration() {
    let ledger = Ledger::open(MemoryStore::new(), FixedClock(now()), Currency::Brl).unwrap();
    assert_eq!(ledger.data().settings.currency, Currency::Brl);
}

#[test]
fn malformed_blob_falls_back_to_sample_data() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, "{not json").unwrap();
    let ledger = Ledger::open(store, FixedClock(now()), Currency::Usd).unwrap();
    assert_eq!(ledger.data().transactions.len(), 5);
}

#[test]
fn reads_blob_with_numeric_amounts_and_timestamps() {
    let mut store = MemoryStore::new();
    let blob = r#"{
        "transactions": [
            {"id": "1723600000000", "type": "expense", "amount": 45.5, "category": "food",
             "description": "Coffee & Lunch", "date": "2025-08-14T15:00:00.000Z"}
        ],
        "goals": [
            {"id": "g", "name": "Trip", "targetAmount": 1000, "currentAmount": 100,
             "deadline": "2026-01-31T12:00:00.000Z", "category": "savings"}
        ],
        "settings": {"currency": "BRL", "theme": "dark"}
    }"#;
    store.set(STORAGE_KEY, blob).unwrap();
    let ledger = Ledger::open(store, FixedClock(now()), Currency::Usd).unwrap();
    let data = ledger.data();
    assert_eq!(data.transactions[0].amount, Decimal::new(455, 1));
    assert_eq!(
        data.transactions[0].date,
        Utc.with_ymd_and_hms(2025, 8, 14, 15, 0, 0).unwrap()
    );
    assert!(data.budgets.is_empty());
    assert_eq!(data.goals[0].target_amount, Decimal::new(1000, 0));
    assert_eq!(data.settings.currency, Currency::Brl);
    assert_eq!(data.settings.theme, Theme::Dark);
}

#[test]
fn mutations_persist_and_reload() {
    let mut ledger = empty();
    let added = ledger
        .add_transaction(tx(TransactionType::Income, Decimal::new(1200, 0), "freelance", day(2025, 8, 3)))
        .unwrap();
    let store = ledger.into_store();

    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    let parsed: FinancialData = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.transactions, vec![added.clone()]);

    let reloaded = Ledger::open(store, FixedClock(now()), Currency::Usd).unwrap();
    assert_eq!(reloaded.data().transactions, vec![added]);
}

#[test]
fn add_prepends_with_unique_ids() {
    let mut ledger = empty();
    let a = ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(10, 0), "food", day(2025, 8, 1)))
        .unwrap();
    let b = ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(20, 0), "food", day(2025, 7, 1)))
        .unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.id, now().timestamp_millis().to_string());
    let order: Vec<&str> = ledger.data().transactions.iter().map(|t| t.id.as_str()).collect();
    // insertion order, not date order
    assert_eq!(order, [b.id.as_str(), a.id.as_str()]);
}

#[test]
fn delete_undoes_add() {
    let mut ledger = seeded();
    let before = ledger.data().transactions.clone();
    let t = ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(99, 0), "shopping", day(2025, 8, 15)))
        .unwrap();
    assert!(ledger.delete_transaction(&t.id).unwrap());
    assert_eq!(ledger.data().transactions, before);
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let mut ledger = seeded();
    assert!(!ledger.delete_transaction("nope").unwrap());
    assert_eq!(ledger.data().transactions.len(), 5);
}

#[test]
fn monthly_stats_only_counts_current_month() {
    let mut ledger = empty();
    ledger
        .add_transaction(tx(TransactionType::Income, Decimal::new(5000, 0), "salary", day(2025, 8, 1)))
        .unwrap();
    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(4550, 2), "food", day(2025, 7, 31)))
        .unwrap();
    let stats = ledger.monthly_stats();
    assert_eq!(stats.income, Decimal::new(5000, 0));
    assert_eq!(stats.expenses, Decimal::ZERO);
    assert_eq!(stats.savings(), Decimal::new(5000, 0));
}

#[test]
fn contributions_clamp_at_target() {
    let mut ledger = seeded();
    let goal = ledger.data().goals[0].clone();
    assert_eq!(goal.current_amount, Decimal::new(2500, 0));
    assert_eq!(goal.target_amount, Decimal::new(5000, 0));

    let updated = ledger
        .contribute_to_goal(&goal.id, Decimal::new(3000, 0))
        .unwrap()
        .unwrap();
    assert_eq!(updated.current_amount, Decimal::new(5000, 0));
    assert_eq!(updated.progress_percent(), Decimal::ONE_HUNDRED);
    assert!(ledger.contribute_to_goal("missing", Decimal::ONE).unwrap().is_none());
}

#[test]
fn added_goal_starts_at_given_amount() {
    let mut ledger = empty();
    let g = ledger
        .add_goal(NewGoal {
            name: "Laptop".into(),
            target_amount: Decimal::new(2000, 0),
            current_amount: Decimal::ZERO,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            category: "savings".into(),
        })
        .unwrap();
    let g = ledger.contribute_to_goal(&g.id, Decimal::new(500, 0)).unwrap().unwrap();
    assert_eq!(g.progress_percent(), Decimal::new(25, 0));
}

#[test]
fn goal_days_left_counts_from_today() {
    let ledger = seeded();
    let goal = &ledger.data().goals[0];
    let today = now().date_naive();
    assert_eq!(goal.days_left(today), 365);
    let after = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    assert!(goal.days_left(after) < 0);
    assert_eq!(goal.days_left(goal.deadline), 0);
}

#[test]
fn budget_spent_tracks_expenses_of_that_month() {
    let mut ledger = empty();
    let b = ledger
        .add_budget(NewBudget {
            category: "food".into(),
            limit: Decimal::new(100, 0),
            month: "2025-08".into(),
        })
        .unwrap();
    assert_eq!(b.spent, Decimal::ZERO);

    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(90, 0), "food", day(2025, 8, 2)))
        .unwrap();
    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(500, 0), "food", day(2025, 7, 2)))
        .unwrap();
    ledger
        .add_transaction(tx(TransactionType::Income, Decimal::new(500, 0), "food", day(2025, 8, 2)))
        .unwrap();
    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(500, 0), "transport", day(2025, 8, 2)))
        .unwrap();

    let statuses = ledger.budget_statuses(Some("2025-08"));
    let status = &statuses[0];
    assert_eq!(status.spent, Decimal::new(90, 0));
    assert_eq!(status.health, BudgetHealth::Warning);
    assert_eq!(ledger.data().budgets[0].spent, Decimal::new(90, 0));

    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(20, 0), "food", day(2025, 8, 9)))
        .unwrap();
    let statuses = ledger.budget_statuses(None);
    let status = &statuses[0];
    assert_eq!(status.health, BudgetHealth::Over);
    assert_eq!(status.percent_used, Decimal::new(110, 0));
    assert!(ledger.budget_statuses(Some("2025-07")).is_empty());
}

#[test]
fn update_budget_merges_fields() {
    let mut ledger = seeded();
    let id = ledger.data().budgets[0].id.clone();
    let patch = BudgetPatch {
        limit: Some(Decimal::new(50, 0)),
        ..Default::default()
    };
    assert!(ledger.update_budget(&id, patch.clone()).unwrap());
    let b = &ledger.data().budgets[0];
    assert_eq!(b.limit, Decimal::new(50, 0));
    assert_eq!(b.category, "food");
    assert!(!ledger.update_budget("missing", patch).unwrap());
}

#[test]
fn settings_patch_keeps_unset_fields() {
    let mut ledger = seeded();
    ledger
        .update_settings(SettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ledger.data().settings.theme, Theme::Dark);
    assert_eq!(ledger.data().settings.currency, Currency::Usd);
}

#[test]
fn cleared_ledger_stays_empty_after_reload() {
    let mut ledger = seeded();
    ledger
        .update_settings(SettingsPatch {
            currency: Some(Currency::Eur),
            ..Default::default()
        })
        .unwrap();
    ledger.clear_all().unwrap();
    let reloaded = Ledger::open(ledger.into_store(), FixedClock(now()), Currency::Usd).unwrap();
    let data = reloaded.data();
    assert!(data.transactions.is_empty());
    assert!(data.budgets.is_empty());
    assert!(data.goals.is_empty());
    assert_eq!(data.settings.currency, Currency::Eur);
}

#[test]
fn filters_and_breakdowns() {
    let ledger = seeded();
    let filter = TransactionFilter {
        search: Some("BILL".into()),
        ..Default::default()
    };
    let hits = ledger.filter_transactions(&filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, "utilities");

    let expenses = ledger.filter_transactions(&TransactionFilter {
        kind: Some(TransactionType::Expense),
        ..Default::default()
    });
    assert_eq!(expenses.len(), 4);

    let cats: Vec<String> = ledger.category_breakdown().into_iter().map(|(c, _)| c).collect();
    assert_eq!(cats, ["salary", "food", "transport", "entertainment", "utilities"]);

    assert_eq!(ledger.recent_transactions(2).len(), 2);
    assert_eq!(ledger.recent_transactions(50).len(), 5);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("finplan.sqlite");

    let mut ledger = Ledger::open(SqliteStore::open(&path).unwrap(), FixedClock(now()), Currency::Usd).unwrap();
    ledger.clear_all().unwrap();
    ledger
        .add_transaction(tx(TransactionType::Expense, Decimal::new(1250, 2), "food", day(2025, 8, 5)))
        .unwrap();
    drop(ledger);

    let reopened = Ledger::open(SqliteStore::open(&path).unwrap(), FixedClock(now()), Currency::Usd).unwrap();
    assert_eq!(reopened.data().transactions.len(), 1);
    assert_eq!(reopened.data().transactions[0].amount, Decimal::new(1250, 2));

    let mut store = reopened.into_store();
    store.remove(STORAGE_KEY).unwrap();
    assert!(store.get(STORAGE_KEY).unwrap().is_none());
}
