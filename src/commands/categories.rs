// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{categories_for, CURRENCIES};
use crate::models::TransactionType;
use crate::utils::pretty_table;

pub fn handle() {
    let mut rows = Vec::new();
    for kind in [TransactionType::Income, TransactionType::Expense] {
        for c in categories_for(kind) {
            rows.push(vec![
                c.id.to_string(),
                format!("{} {}", c.icon, c.name),
                kind.to_string(),
                c.color.to_string(),
            ]);
        }
    }
    println!("{}", pretty_table(&["ID", "Name", "Type", "Color"], rows));
    let codes: Vec<&str> = CURRENCIES.iter().map(|c| c.code()).collect();
    println!("Currencies: {}", codes.join(", "));
}
