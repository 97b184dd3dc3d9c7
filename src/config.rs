// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Currency;
use crate::storage::default_db_path;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub db_path: PathBuf,
    pub default_currency: Currency,
    pub require_login: bool,
}

fn env_bool(raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") => false,
        _ => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Builds the config from an arbitrary variable lookup; unset values take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FINPLAN_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let db_path = match lookup("FINPLAN_DB").filter(|s| !s.trim().is_empty()) {
            Some(p) => PathBuf::from(p),
            None => default_db_path()?,
        };
        let default_currency = match lookup("FINPLAN_CURRENCY") {
            Some(c) => c
                .parse()
                .with_context(|| format!("Invalid FINPLAN_CURRENCY '{}'", c))?,
            None => Currency::Usd,
        };
        let require_login = env_bool(lookup("FINPLAN_REQUIRE_LOGIN"), true);
        Ok(Config {
            api_url,
            db_path,
            default_currency,
            require_login,
        })
    }
}
