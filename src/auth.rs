// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login and registration against the external auth backend, plus the
//! locally stored session. A stored token is the only signal of being
//! logged in.

use crate::models::{Session, UserProfile};
use crate::storage::{KeyValueStore, StorageError};
use crate::utils::http_client;
use crate::validation::{FieldErrors, FormError, LoginForm, RegisterForm};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/users/register";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("could not connect to the server; check that the backend is running at {0}")]
    Connectivity(String),
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("this email is already in use")]
    EmailInUse,
    #[error("internal server error; check the backend logs")]
    Server,
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Validation(FormError),
    #[error("{0}")]
    Fields(FieldErrors),
    #[error("not logged in")]
    NotAuthenticated,
    #[error("unexpected response from server: {0}")]
    Decode(String),
    #[error("failed to set up http client: {0}")]
    Setup(#[source] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    senha: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub tipo: String,
    pub user_id: i64,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

impl From<&RegisterForm> for RegisterPayload {
    fn from(form: &RegisterForm) -> Self {
        RegisterPayload {
            nome: form.name.trim().to_string(),
            email: form.email.clone(),
            senha: form.password.clone(),
        }
    }
}

/// `message`, or failing that `error`, from a JSON error body. Empty strings count as absent.
fn server_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|k| v.get(*k).and_then(|m| m.as_str()))
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Maps a failed login response to an error. A server-provided message wins
/// over the status code.
pub fn login_failure(status: u16, body: &str) -> AuthError {
    if let Some(msg) = server_message(body) {
        return AuthError::Rejected(msg);
    }
    match status {
        401 | 403 => AuthError::InvalidCredentials,
        _ => AuthError::Rejected("login failed".into()),
    }
}

pub fn register_failure(status: u16, body: &str) -> AuthError {
    if let Some(msg) = server_message(body) {
        return AuthError::Rejected(msg);
    }
    match status {
        409 => AuthError::EmailInUse,
        s if s >= 500 => AuthError::Server,
        _ => AuthError::Rejected("could not create account".into()),
    }
}

pub struct AuthClient<S: KeyValueStore> {
    base_url: String,
    http: reqwest::blocking::Client,
    store: S,
}

impl<S: KeyValueStore> AuthClient<S> {
    pub fn new(base_url: &str, store: S) -> Result<Self, AuthError> {
        let http = http_client().map_err(AuthError::Setup)?;
        Ok(Self::with_client(base_url, http, store))
    }

    pub fn with_client(base_url: &str, http: reqwest::blocking::Client, store: S) -> Self {
        AuthClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::blocking::Response, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "auth request");
        self.http.post(&url).json(body).send().map_err(|e| {
            warn!(%url, error = %e, "auth backend unreachable");
            AuthError::Connectivity(self.base_url.clone())
        })
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let resp = self.post(
            LOGIN_PATH,
            &LoginRequest {
                email,
                senha: password,
            },
        )?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(login_failure(status.as_u16(), &body));
        }
        let auth: AuthResponse = resp
            .json()
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        let user = UserProfile {
            user_id: auth.user_id,
            name: auth.nome,
            email: email.to_string(),
        };
        let user_json =
            serde_json::to_string(&user).map_err(|e| AuthError::Decode(e.to_string()))?;
        self.store.set(TOKEN_KEY, &auth.token)?;
        self.store.set(USER_KEY, &user_json)?;
        info!(user_id = user.user_id, "logged in");
        Ok(Session {
            token: auth.token,
            user: Some(user),
        })
    }

    pub fn register(&self, payload: &RegisterPayload) -> Result<(), AuthError> {
        let resp = self.post(REGISTER_PATH, payload)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(register_failure(status.as_u16(), &body));
        }
        info!(email = %payload.email, "account registered");
        Ok(())
    }

    /// Validates the form and only then contacts the backend.
    pub fn submit_login(&mut self, form: &LoginForm) -> Result<Session, AuthError> {
        form.validate().map_err(AuthError::Validation)?;
        self.login(&form.email, &form.password)
    }

    pub fn submit_register(&self, form: &RegisterForm) -> Result<(), AuthError> {
        let errs = form.validate();
        if !errs.is_empty() {
            return Err(AuthError::Fields(errs));
        }
        self.register(&RegisterPayload::from(form))
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        info!("logged out");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Stored profile; an unreadable record reads as absent.
    pub fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&raw).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Ok(t) => t.is_some(),
            Err(e) => {
                warn!(error = %e, "could not read session token");
                false
            }
        }
    }

    /// Guard for protected operations: the stored session, or `NotAuthenticated`.
    pub fn require_session(&self) -> Result<Session, AuthError> {
        let token = self.token()?.ok_or(AuthError::NotAuthenticated)?;
        Ok(Session {
            token,
            user: self.current_user()?,
        })
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
