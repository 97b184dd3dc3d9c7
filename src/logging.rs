// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Filter comes from `FINPLAN_LOG` (default
/// `warn`); `FINPLAN_LOG_JSON=1` switches to JSON lines. Output goes to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("FINPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = matches!(
        std::env::var("FINPLAN_LOG_JSON").as_deref(),
        Ok("1") | Ok("true")
    );
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .ok();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
