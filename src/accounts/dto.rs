use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounts::repo_types::{Account, AccountId};

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login, register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: PublicAccount,
}

/// Public part of the account returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: AccountId,
    pub email: String,
    pub name: Option<String>,
}

impl From<Account> for PublicAccount {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            name: a.name,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Email is required")]
    MissingEmail,
}

/// Email and password as submitted, with the email normalised.
///
/// The email is trimmed and lower-cased; the password is kept byte for byte.
/// Length rules apply to [`Credentials::submitted_email`], since lower-casing
/// can change the character count (`İ` becomes two chars).
#[derive(Clone)]
pub struct Credentials {
    submitted_email: String,
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, CredentialsError> {
        let submitted_email = email.trim();
        if submitted_email.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        Ok(Self {
            email: submitted_email.to_lowercase(),
            submitted_email: submitted_email.to_string(),
            password: password.into(),
        })
    }

    /// Lookup key: trimmed and lower-cased.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Trimmed, original case.
    pub fn submitted_email(&self) -> &str {
        &self.submitted_email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
