// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use finplan::auth::AuthClient;
use finplan::clock::SystemClock;
use finplan::config::Config;
use finplan::ledger::Ledger;
use finplan::storage::SqliteStore;
use finplan::{cli, commands, logging};

fn main() -> Result<()> {
    logging::init_tracing();
    let matches = cli::build_cli().get_matches();

    let mut config = Config::from_env()?;
    if let Some(db) = matches.get_one::<String>("db") {
        config.db_path = PathBuf::from(db);
    }
    if let Some(url) = matches.get_one::<String>("api-url") {
        config.api_url = url.clone();
    }

    let open_store = || {
        SqliteStore::open(&config.db_path)
            .with_context(|| format!("Open store at {}", config.db_path.display()))
    };
    let mut auth = AuthClient::new(&config.api_url, open_store()?)?;

    match matches.subcommand() {
        Some(("login", sub)) => return commands::session::login(&mut auth, sub),
        Some(("register", sub)) => return commands::session::register(&auth, sub),
        Some(("logout", _)) => return commands::session::logout(&mut auth),
        Some(("whoami", _)) => return commands::session::whoami(&auth),
        Some(("categories", _)) => {
            commands::categories::handle();
            return Ok(());
        }
        Some(_) => {}
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
    }

    if config.require_login {
        auth.require_session()
            .context("Run `finplan login` first (or set FINPLAN_REQUIRE_LOGIN=0)")?;
    }
    let mut ledger = Ledger::open(open_store()?, SystemClock, config.default_currency)?;

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("clear", sub)) => commands::settings::clear(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
