// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    Budget, Currency, FinancialData, Goal, Settings, Theme, Transaction, TransactionType,
};
use crate::utils::{local_day_start, month_key};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate};
use rust_decimal::Decimal;

fn seed_tx(
    id: &str,
    kind: TransactionType,
    amount: Decimal,
    category: &str,
    description: &str,
    day: NaiveDate,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount,
        category: category.to_string(),
        description: description.to_string(),
        date: local_day_start(day),
    }
}

/// Sample dataset used when nothing has been stored yet. Dates are relative to `now`.
pub fn sample_data(now: DateTime<Local>, currency: Currency) -> FinancialData {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
    let month = month_key(today);

    let transactions = vec![
        seed_tx("1", TransactionType::Income, Decimal::new(5000, 0), "salary", "Monthly Salary", first),
        seed_tx("2", TransactionType::Expense, Decimal::new(4550, 2), "food", "Coffee & Lunch", ago(1)),
        seed_tx("3", TransactionType::Expense, Decimal::new(120, 0), "transport", "Gas", ago(2)),
        seed_tx("4", TransactionType::Expense, Decimal::new(80, 0), "entertainment", "Movie tickets", ago(3)),
        seed_tx("5", TransactionType::Expense, Decimal::new(150, 0), "utilities", "Electricity bill", ago(5)),
    ];

    let budgets = [
        ("b1", "food", 600),
        ("b2", "transport", 300),
        ("b3", "entertainment", 200),
        ("b4", "utilities", 400),
    ]
    .into_iter()
    .map(|(id, category, limit)| Budget {
        id: id.to_string(),
        category: category.to_string(),
        limit: Decimal::new(limit, 0),
        spent: Decimal::ZERO,
        month: month.clone(),
    })
    .collect();

    let goals = vec![Goal {
        id: "g1".to_string(),
        name: "Emergency Fund".to_string(),
        target_amount: Decimal::new(5000, 0),
        current_amount: Decimal::new(2500, 0),
        deadline: today
            .checked_add_days(Days::new(365))
            .unwrap_or(today),
        category: "savings".to_string(),
    }];

    FinancialData {
        transactions,
        budgets,
        goals,
        settings: Settings {
            currency,
            theme: Theme::Light,
        },
    }
}
