use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use tracing::warn;

use crate::{accounts::repo_types::Account, state::AppState};

/// Login-required guard. Resolves the Bearer access token to an account that
/// still exists; anything else is a 401.
pub struct CurrentAccount(pub Account);

fn bearer(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = |msg: &str| (StatusCode::UNAUTHORIZED, msg.to_string());

        let token = bearer(parts).ok_or_else(|| unauthorized("Missing bearer token"))?;
        let id = state.tokens.access_subject(token).map_err(|e| {
            warn!(error = %e, "bearer token refused");
            unauthorized(&e.to_string())
        })?;

        match state.accounts.account(id).await {
            Some(account) => Ok(Self(account)),
            None => {
                warn!(account_id = %id, "token for missing account");
                Err(unauthorized("Account not found"))
            }
        }
    }
}
