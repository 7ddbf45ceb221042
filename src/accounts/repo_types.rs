use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Storage-assigned account identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    /// Raw password or Argon2 PHC string, depending on the `PasswordScheme`.
    #[serde(skip_serializing)]
    pub credential: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub created_at: OffsetDateTime,
}

/// Optional profile fields captured at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
}

/// An account that has not been given an id yet.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub credential: String,
    pub name: Option<String>,
}
