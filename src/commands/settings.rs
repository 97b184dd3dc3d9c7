// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::models::{Currency, SettingsPatch, Theme};
use crate::storage::KeyValueStore;
use crate::utils::{optional_arg, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let patch = SettingsPatch {
                currency: optional_arg(sub, "currency")
                    .map(str::parse::<Currency>)
                    .transpose()?,
                theme: optional_arg(sub, "theme").map(str::parse::<Theme>).transpose()?,
            };
            ledger.update_settings(patch)?;
            show(ledger);
        }
        _ => show(ledger),
    }
    Ok(())
}

fn show<S: KeyValueStore, C: Clock>(ledger: &Ledger<S, C>) {
    let s = ledger.data().settings;
    let theme = match s.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    println!(
        "{}",
        pretty_table(
            &["Setting", "Value"],
            vec![
                vec!["currency".into(), s.currency.to_string()],
                vec!["theme".into(), theme.into()],
            ],
        )
    );
}

pub fn clear<S: KeyValueStore, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    if !m.get_flag("yes") {
        anyhow::bail!("Refusing to delete all data without --yes");
    }
    ledger.clear_all()?;
    println!("All transactions, budgets and goals deleted");
    Ok(())
}
