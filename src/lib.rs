// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod seed;
pub mod storage;
pub mod utils;
pub mod validation;
