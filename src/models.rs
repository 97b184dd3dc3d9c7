// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// A transaction as entered by the user, before the ledger assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl NewTransaction {
    pub(crate) fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub month: String, // YYYY-MM
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
    pub month: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub limit: Option<Decimal>,
    pub month: Option<String>,
}

impl Budget {
    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(c) = patch.category {
            self.category = c;
        }
        if let Some(l) = patch.limit {
            self.limit = l;
        }
        if let Some(m) = patch.month {
            self.month = m;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(deserialize_with = "day_or_timestamp")]
    pub deadline: NaiveDate,
    pub category: String,
}

// Older blobs stored deadlines as full ISO-8601 timestamps.
fn day_or_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    if let Ok(day) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .map_err(serde::de::Error::custom)
}

impl Goal {
    /// Share of the target already saved, in percent. Not capped at 100.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount * Decimal::ONE_HUNDRED
    }

    /// Whole days from `today` until the deadline; zero or negative once it has passed.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(n) = patch.name {
            self.name = n;
        }
        if let Some(t) = patch.target_amount {
            self.target_amount = t;
        }
        if let Some(c) = patch.current_amount {
            self.current_amount = c;
        }
        if let Some(d) = patch.deadline {
            self.deadline = d;
        }
        if let Some(c) = patch.category {
            self.category = c;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "BRL")]
    Brl,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(anyhow::anyhow!(
                "Unsupported currency '{}', expected one of BRL|USD|EUR|GBP",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::anyhow!(
                "Invalid theme '{}', expected light|dark",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: Currency,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: Currency::Usd,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub currency: Option<Currency>,
    pub theme: Option<Theme>,
}

/// The whole ledger aggregate, persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub transactions: Vec<Transaction>, // newest first
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub settings: Settings,
}

impl FinancialData {
    pub fn empty(settings: Settings) -> Self {
        FinancialData {
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            settings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlyStats {
    pub fn savings(&self) -> Decimal {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Ok,
    Warning,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub id: String,
    pub category: String,
    pub month: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percent_used: Decimal,
    pub health: BudgetHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<UserProfile>,
}
