// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::AuthClient;
use crate::storage::KeyValueStore;
use crate::utils::{optional_arg, required_arg};
use crate::validation::{format_cpf, format_phone, LoginForm, RegisterForm};
use anyhow::Result;

pub fn login<S: KeyValueStore>(client: &mut AuthClient<S>, m: &clap::ArgMatches) -> Result<()> {
    let form = LoginForm {
        email: required_arg(m, "email")?.trim().to_string(),
        password: required_arg(m, "password")?.to_string(),
    };
    let session = client.submit_login(&form)?;
    match session.user {
        Some(u) => println!("Logged in as {} <{}>", u.name, u.email),
        None => println!("Logged in"),
    }
    Ok(())
}

pub fn register<S: KeyValueStore>(client: &AuthClient<S>, m: &clap::ArgMatches) -> Result<()> {
    let form = RegisterForm {
        name: required_arg(m, "name")?.to_string(),
        email: required_arg(m, "email")?.trim().to_string(),
        cpf: optional_arg(m, "cpf").map(format_cpf).unwrap_or_default(),
        phone: optional_arg(m, "phone").map(format_phone).unwrap_or_default(),
        password: required_arg(m, "password")?.to_string(),
        confirm_password: required_arg(m, "confirm")?.to_string(),
    };
    client.submit_register(&form)?;
    println!("Account created for {}; you can now log in", form.email);
    Ok(())
}

pub fn logout<S: KeyValueStore>(client: &mut AuthClient<S>) -> Result<()> {
    client.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami<S: KeyValueStore>(client: &AuthClient<S>) -> Result<()> {
    let session = client.require_session()?;
    match session.user {
        Some(u) => println!("{} <{}> (user id {})", u.name, u.email, u.user_id),
        None => println!("Logged in (no profile stored)"),
    }
    Ok(())
}
