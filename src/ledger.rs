// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store: one [`FinancialData`] aggregate kept in memory and
//! written back to a [`KeyValueStore`] as a single JSON document after
//! every mutation.
//!
//! Budget `spent` values are derived from expense transactions of the same
//! category and month, and rewritten on every save.

use crate::clock::Clock;
use crate::models::{
    Budget, BudgetHealth, BudgetPatch, BudgetStatus, Currency, FinancialData, Goal, GoalPatch,
    MonthlyStats, NewBudget, NewGoal, NewTransaction, SettingsPatch, Transaction,
    TransactionType,
};
use crate::seed::sample_data;
use crate::storage::KeyValueStore;
use crate::utils::{local_month_key, month_key};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

pub const STORAGE_KEY: &str = "financial_planner_data";

const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        let search_ok = self.search.as_ref().is_none_or(|q| {
            t.description
                .to_lowercase()
                .contains(&q.to_lowercase())
        });
        let kind_ok = self.kind.is_none_or(|k| t.kind == k);
        let cat_ok = self.category.as_ref().is_none_or(|c| &t.category == c);
        search_ok && kind_ok && cat_ok
    }
}

pub struct Ledger<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    default_currency: Currency,
    data: FinancialData,
    last_id: i64,
}

impl<S: KeyValueStore, C: Clock> Ledger<S, C> {
    /// Builds the store and loads whatever is persisted (or the sample data).
    pub fn open(store: S, clock: C, default_currency: Currency) -> Result<Self> {
        let mut ledger = Ledger {
            store,
            clock,
            default_currency,
            data: FinancialData::empty(Default::default()),
            last_id: 0,
        };
        ledger.load()?;
        Ok(ledger)
    }

    /// Re-reads the persisted aggregate. Missing or malformed data is replaced
    /// by the sample dataset; nothing is written until the next mutation.
    pub fn load(&mut self) -> Result<&FinancialData> {
        let stored = self
            .store
            .get(STORAGE_KEY)
            .context("Failed to read ledger from storage")?;
        let mut data = match stored {
            Some(raw) => match serde_json::from_str::<FinancialData>(&raw) {
                Ok(d) => {
                    debug!(transactions = d.transactions.len(), "loaded ledger");
                    d
                }
                Err(e) => {
                    warn!(error = %e, "stored ledger is malformed; using sample data");
                    self.sample()
                }
            },
            None => {
                info!("no stored ledger; using sample data");
                self.sample()
            }
        };
        refresh_budget_spent(&mut data);
        self.data = data;
        Ok(&self.data)
    }

    fn sample(&self) -> FinancialData {
        sample_data(self.clock.now(), self.default_currency)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn data(&self) -> &FinancialData {
        &self.data
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) -> Result<()> {
        refresh_budget_spent(&mut self.data);
        let raw = serde_json::to_string(&self.data).context("Failed to serialize ledger")?;
        self.store
            .set(STORAGE_KEY, &raw)
            .context("Failed to write ledger to storage")?;
        Ok(())
    }

    // Millisecond timestamps, bumped when the clock has not moved since the last id.
    fn next_id(&mut self) -> String {
        let ms = self.clock.now().timestamp_millis();
        let id = if ms > self.last_id { ms } else { self.last_id + 1 };
        self.last_id = id;
        id.to_string()
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> Result<Transaction> {
        let tx = input.with_id(self.next_id());
        self.data.transactions.insert(0, tx.clone());
        self.save()?;
        info!(id = %tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        Ok(tx)
    }

    /// Returns whether a transaction was removed. Unknown ids are not an error.
    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.data.transactions.len();
        self.data.transactions.retain(|t| t.id != id);
        if self.data.transactions.len() == before {
            return Ok(false);
        }
        self.save()?;
        info!(id, "transaction deleted");
        Ok(true)
    }

    pub fn add_budget(&mut self, input: NewBudget) -> Result<Budget> {
        let spent = spent_for(&self.data.transactions, &input.category, &input.month);
        let budget = Budget {
            id: self.next_id(),
            category: input.category,
            limit: input.limit,
            spent,
            month: input.month,
        };
        self.data.budgets.push(budget.clone());
        self.save()?;
        info!(id = %budget.id, category = %budget.category, "budget added");
        Ok(budget)
    }

    pub fn update_budget(&mut self, id: &str, patch: BudgetPatch) -> Result<bool> {
        let Some(b) = self.data.budgets.iter_mut().find(|b| b.id == id) else {
            return Ok(false);
        };
        b.apply(patch);
        self.save()?;
        Ok(true)
    }

    pub fn add_goal(&mut self, input: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: self.next_id(),
            name: input.name,
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            deadline: input.deadline,
            category: input.category,
        };
        self.data.goals.push(goal.clone());
        self.save()?;
        info!(id = %goal.id, name = %goal.name, "goal added");
        Ok(goal)
    }

    pub fn update_goal(&mut self, id: &str, patch: GoalPatch) -> Result<bool> {
        let Some(g) = self.data.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        g.apply(patch);
        self.save()?;
        Ok(true)
    }

    /// Adds `amount` to a goal's savings, never going past its target.
    pub fn contribute_to_goal(&mut self, id: &str, amount: Decimal) -> Result<Option<Goal>> {
        let Some(goal) = self.data.goals.iter().find(|g| g.id == id) else {
            return Ok(None);
        };
        let current = (goal.current_amount + amount).min(goal.target_amount);
        let patch = GoalPatch {
            current_amount: Some(current),
            ..Default::default()
        };
        self.update_goal(id, patch)?;
        Ok(self.data.goals.iter().find(|g| g.id == id).cloned())
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        if let Some(c) = patch.currency {
            self.data.settings.currency = c;
        }
        if let Some(t) = patch.theme {
            self.data.settings.theme = t;
        }
        self.save()
    }

    /// Drops all transactions, budgets and goals. Settings are kept, and the
    /// empty ledger is persisted so sample data does not come back on reload.
    pub fn clear_all(&mut self) -> Result<()> {
        self.data = FinancialData::empty(self.data.settings);
        self.save()?;
        warn!("all ledger data cleared");
        Ok(())
    }

    fn current_month(&self) -> String {
        month_key(self.clock.now().date_naive())
    }

    fn current_month_transactions(&self) -> impl Iterator<Item = &Transaction> {
        let month = self.current_month();
        self.data
            .transactions
            .iter()
            .filter(move |t| local_month_key(&t.date) == month)
    }

    /// Income and expense totals for the calendar month containing "now".
    pub fn monthly_stats(&self) -> MonthlyStats {
        let mut stats = MonthlyStats::default();
        for t in self.current_month_transactions() {
            match t.kind {
                TransactionType::Income => stats.income += t.amount,
                TransactionType::Expense => stats.expenses += t.amount,
            }
        }
        stats
    }

    /// Current-month totals per category, in order of first appearance.
    pub fn category_breakdown(&self) -> Vec<(String, Decimal)> {
        let mut out: Vec<(String, Decimal)> = Vec::new();
        for t in self.current_month_transactions() {
            match out.iter_mut().find(|(c, _)| c == &t.category) {
                Some((_, total)) => *total += t.amount,
                None => out.push((t.category.clone(), t.amount)),
            }
        }
        out
    }

    pub fn recent_transactions(&self, n: usize) -> &[Transaction] {
        let end = n.min(self.data.transactions.len());
        &self.data.transactions[..end]
    }

    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.data
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    pub fn budget_statuses(&self, month: Option<&str>) -> Vec<BudgetStatus> {
        self.data
            .budgets
            .iter()
            .filter(|b| month.is_none_or(|m| b.month == m))
            .map(|b| {
                let spent = spent_for(&self.data.transactions, &b.category, &b.month);
                budget_status(b, spent)
            })
            .collect()
    }
}

fn spent_for(transactions: &[Transaction], category: &str, month: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionType::Expense
                && t.category == category
                && local_month_key(&t.date) == month
        })
        .map(|t| t.amount)
        .sum()
}

fn refresh_budget_spent(data: &mut FinancialData) {
    for b in data.budgets.iter_mut() {
        b.spent = spent_for(&data.transactions, &b.category, &b.month);
    }
}

fn budget_status(b: &Budget, spent: Decimal) -> BudgetStatus {
    let percent_used = if b.limit.is_zero() {
        Decimal::ZERO
    } else {
        spent / b.limit * Decimal::ONE_HUNDRED
    };
    let health = if percent_used > Decimal::ONE_HUNDRED {
        BudgetHealth::Over
    } else if percent_used > WARNING_PERCENT {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Ok
    };
    BudgetStatus {
        id: b.id.clone(),
        category: b.category.clone(),
        month: b.month.clone(),
        limit: b.limit,
        spent,
        percent_used,
        health,
    }
}
