// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input masks and shallow checks for the login and registration forms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("static regex"));

const CPF_LEN: usize = 11;
const PHONE_MAX: usize = 11;
const PHONE_MIN: usize = 10;

pub fn digits_only(input: &str) -> String {
    NON_DIGIT.replace_all(input, "").into_owned()
}

fn capped_digits(input: &str, max: usize) -> String {
    digits_only(input).chars().take(max).collect()
}

/// Masks partial CPF input as `000.000.000-00`, adding separators as digits arrive.
pub fn format_cpf(input: &str) -> String {
    let d = capped_digits(input, CPF_LEN);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Masks partial phone input as `(AA) BBBBB-CCCC`.
pub fn format_phone(input: &str) -> String {
    let d = capped_digits(input, PHONE_MAX);
    match d.len() {
        0..=2 => d,
        3..=7 => format!("({}) {}", &d[..2], &d[2..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

/// Two check-digit modulo-11 validation. Separators in the input are ignored.
pub fn is_valid_cpf(input: &str) -> bool {
    let digits: Vec<u32> = digits_only(input)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != CPF_LEN {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

pub fn is_plausible_email(input: &str) -> bool {
    input.contains('@')
}

pub fn is_plausible_registration_email(input: &str) -> bool {
    input.contains('@') && input.contains('.')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    InvalidEmail,
    MissingPassword,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidEmail => f.write_str("enter a valid email"),
            FormError::MissingPassword => f.write_str("enter your password"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if !is_plausible_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::MissingPassword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field messages for the registration form. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("cpf", &self.cpf),
            ("phone", &self.phone),
            ("password", &self.password),
            ("confirm_password", &self.confirm_password),
        ]
        .into_iter()
        .filter_map(|(field, msg)| msg.as_deref().map(|m| (field, m)))
        .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .messages()
            .into_iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl RegisterForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errs = FieldErrors::default();
        if self.name.trim().chars().count() < 3 {
            errs.name = Some("name must have at least 3 characters".into());
        }
        if !is_plausible_registration_email(&self.email) {
            errs.email = Some("enter a valid email".into());
        }
        if !self.cpf.is_empty() && !is_valid_cpf(&self.cpf) {
            errs.cpf = Some("invalid CPF".into());
        }
        if !self.phone.is_empty() && digits_only(&self.phone).len() < PHONE_MIN {
            errs.phone = Some("incomplete phone number".into());
        }
        if self.password.chars().count() < 6 {
            errs.password = Some("password must have at least 6 characters".into());
        }
        if self.password != self.confirm_password {
            errs.confirm_password = Some("passwords do not match".into());
        }
        errs
    }
}
