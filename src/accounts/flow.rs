use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::accounts::{
    dto::Credentials,
    password::PasswordScheme,
    repo_types::{Account, AccountId, NewAccount, Profile},
    store::{AccountStore, StoreError},
    validation::check_credentials,
};

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(AccountId),
    ValidationFailed(&'static str),
    DuplicateAccount,
    PersistenceFailed,
}

/// Result of a login attempt. Unknown email and wrong password look the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AccountId),
    InvalidCredentials,
}

/// Registration and login on top of an [`AccountStore`].
#[derive(Clone)]
pub struct AccountFlow {
    store: Arc<dyn AccountStore>,
    scheme: PasswordScheme,
}

impl AccountFlow {
    pub fn new(store: Arc<dyn AccountStore>, scheme: PasswordScheme) -> Self {
        Self { store, scheme }
    }

    pub async fn register(&self, credentials: &Credentials) -> RegisterOutcome {
        self.register_with_profile(credentials, Profile::default())
            .await
    }

    #[instrument(skip(self, credentials, profile), fields(email = %credentials.email()))]
    pub async fn register_with_profile(
        &self,
        credentials: &Credentials,
        profile: Profile,
    ) -> RegisterOutcome {
        if let Err(message) =
            check_credentials(credentials.submitted_email(), credentials.password())
        {
            warn!(%message, "registration rejected by validation");
            return RegisterOutcome::ValidationFailed(message);
        }

        // Best-effort pre-check; the store's uniqueness constraint is the final word.
        match self.store.find_account_by_email(credentials.email()).await {
            Ok(Some(existing)) => {
                warn!(account_id = %existing.id, "email already registered");
                return RegisterOutcome::DuplicateAccount;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "duplicate lookup failed; continuing to insert");
            }
        }

        let credential = match self.scheme.seal(credentials.password()) {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "sealing password failed");
                return RegisterOutcome::PersistenceFailed;
            }
        };

        let new_account = NewAccount {
            email: credentials.email().to_string(),
            credential,
            name: profile.name,
        };
        match self.store.insert_account(new_account).await {
            Ok(id) => {
                info!(account_id = %id, "account registered");
                RegisterOutcome::Registered(id)
            }
            Err(StoreError::Duplicate) => {
                warn!("concurrent registration lost the uniqueness race");
                RegisterOutcome::PersistenceFailed
            }
            Err(e) => {
                error!(error = %e, "insert account failed");
                RegisterOutcome::PersistenceFailed
            }
        }
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn authenticate(&self, credentials: &Credentials) -> AuthOutcome {
        let account = match self.store.find_account_by_email(credentials.email()).await {
            Ok(Some(a)) => a,
            Ok(None) => {
                debug!("login for unknown email");
                self.scheme.verify_absent(credentials.password());
                return AuthOutcome::InvalidCredentials;
            }
            Err(e) => {
                error!(error = %e, "account lookup failed during login");
                self.scheme.verify_absent(credentials.password());
                return AuthOutcome::InvalidCredentials;
            }
        };

        match self.scheme.verify(credentials.password(), &account.credential) {
            Ok(true) => {
                info!(account_id = %account.id, "account authenticated");
                AuthOutcome::Authenticated(account.id)
            }
            Ok(false) => {
                debug!(account_id = %account.id, "login with wrong password");
                AuthOutcome::InvalidCredentials
            }
            Err(e) => {
                error!(error = %e, account_id = %account.id, "stored credential unreadable");
                AuthOutcome::InvalidCredentials
            }
        }
    }

    /// Load an account by id; storage errors read as "no such account".
    pub async fn account(&self, id: AccountId) -> Option<Account> {
        match self.store.find_account_by_id(id).await {
            Ok(a) => a,
            Err(e) => {
                error!(error = %e, account_id = %id, "account lookup by id failed");
                None
            }
        }
    }
}
