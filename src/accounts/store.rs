use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::accounts::repo_types::{Account, AccountId, NewAccount};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already taken; raised by the uniqueness constraint.
    #[error("an account with this email already exists")]
    Duplicate,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Duplicate;
            }
        }
        Self::Backend(err.into())
    }
}

/// Where accounts live. Implementations must reject a second account with the
/// same email even when two inserts race.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;
    async fn insert_account(&self, account: NewAccount) -> Result<AccountId, StoreError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, credential, name, is_admin, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, credential, name, is_admin, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    /// Single-statement insert, so the row is either committed whole or not at all.
    async fn insert_account(&self, account: NewAccount) -> Result<AccountId, StoreError> {
        let id = sqlx::query_scalar::<_, AccountId>(
            r#"
            INSERT INTO accounts (email, credential, name)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&account.email)
        .bind(&account.credential)
        .bind(&account.name)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }
}
