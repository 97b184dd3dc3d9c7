// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Currency, TransactionType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "food", name: "Alimentacao", icon: "🍔", color: "#FF6B6B" },
    Category { id: "transport", name: "Transporte", icon: "🚗", color: "#4ECDC4" },
    Category { id: "entertainment", name: "Entretenimento", icon: "🎬", color: "#FFE66D" },
    Category { id: "utilities", name: "Contas de casa", icon: "💡", color: "#95E1D3" },
    Category { id: "healthcare", name: "Saude", icon: "⚕️", color: "#C7CEEA" },
    Category { id: "shopping", name: "Compras", icon: "🛍️", color: "#FF85B3" },
    Category { id: "salary", name: "Salario", icon: "💰", color: "#52B788" },
    Category { id: "freelance", name: "Freelance", icon: "💻", color: "#2D6A4F" },
];

const INCOME_CATEGORIES: &[&str] = &["salary", "freelance"];

pub const CURRENCIES: &[Currency] = &[Currency::Brl, Currency::Usd, Currency::Eur, Currency::Gbp];

pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Categories offered when entering a transaction of the given type.
pub fn categories_for(kind: TransactionType) -> Vec<&'static Category> {
    CATEGORIES
        .iter()
        .filter(|c| match kind {
            TransactionType::Income => INCOME_CATEGORIES.contains(&c.id),
            TransactionType::Expense => !INCOME_CATEGORIES.contains(&c.id),
        })
        .collect()
}

/// Display name for a category id, falling back to the raw id.
pub fn category_label(id: &str) -> String {
    match category(id) {
        Some(c) => format!("{} {}", c.icon, c.name),
        None => id.to_string(),
    }
}

pub fn currency_symbol(ccy: Currency) -> &'static str {
    match ccy {
        Currency::Brl => "R$",
        Currency::Usd => "$",
        Currency::Eur => "€",
        Currency::Gbp => "£",
    }
}
