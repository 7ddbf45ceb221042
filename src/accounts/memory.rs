use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::accounts::repo_types::{Account, AccountId, NewAccount};
use crate::accounts::store::{AccountStore, StoreError};

/// Process-local account store. The uniqueness check and the insert happen
/// under one lock, the same guarantee the `accounts.email` constraint gives.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    by_email: HashMap<String, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|g| g.by_email.len()).unwrap_or(0)
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend(anyhow::anyhow!("account store lock poisoned")))
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.locked()?.by_email.get(email).cloned())
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self
            .locked()?
            .by_email
            .values()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn insert_account(&self, account: NewAccount) -> Result<AccountId, StoreError> {
        let mut inner = self.locked()?;
        if inner.by_email.contains_key(&account.email) {
            return Err(StoreError::Duplicate);
        }
        inner.last_id += 1;
        let id = AccountId(inner.last_id);
        inner.by_email.insert(
            account.email.clone(),
            Account {
                id,
                email: account.email,
                credential: account.credential,
                name: account.name,
                is_admin: false,
                created_at: OffsetDateTime::now_utc(),
            },
        );
        Ok(id)
    }
}
