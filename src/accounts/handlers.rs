use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    accounts::{
        dto::{
            AuthResponse, Credentials, LoginRequest, PublicAccount, RefreshRequest,
            RegisterRequest,
        },
        flow::{AuthOutcome, RegisterOutcome},
        repo_types::Profile,
    },
    auth::CurrentAccount,
    state::AppState,
};

type ApiResult<T> = Result<T, (StatusCode, String)>;

const NAME_MAX_LEN: usize = 100;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(state: &AppState, account: PublicAccount) -> ApiResult<Json<AuthResponse>> {
    let pair = state.tokens.issue(account.id).map_err(|e| {
        error!(error = %e, account_id = %account.id, "issuing tokens failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not issue tokens".into())
    })?;
    Ok(Json(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        account,
    }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let credentials = Credentials::new(&payload.email, payload.password)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    if !is_valid_email(credentials.email()) {
        warn!(email = %credentials.email(), "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let profile = Profile {
        name: payload
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };
    if profile.name.as_ref().is_some_and(|n| n.chars().count() > NAME_MAX_LEN) {
        return Err((StatusCode::BAD_REQUEST, "Name is too long".into()));
    }
    let name = profile.name.clone();

    let id = match state
        .accounts
        .register_with_profile(&credentials, profile)
        .await
    {
        RegisterOutcome::Registered(id) => id,
        RegisterOutcome::ValidationFailed(message) => {
            return Err((StatusCode::BAD_REQUEST, message.into()));
        }
        RegisterOutcome::DuplicateAccount => {
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
        RegisterOutcome::PersistenceFailed => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not create account".into(),
            ));
        }
    };

    // The row is committed; answer from what was written rather than reading it back.
    let account = PublicAccount {
        id,
        email: credentials.email().to_string(),
        name,
    };
    let tokens = issue_tokens(&state, account)?;
    Ok((StatusCode::CREATED, tokens))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let invalid = || (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string());

    let credentials = Credentials::new(&payload.email, payload.password).map_err(|_| invalid())?;

    let id = match state.accounts.authenticate(&credentials).await {
        AuthOutcome::Authenticated(id) => id,
        AuthOutcome::InvalidCredentials => return Err(invalid()),
    };
    let account = state.accounts.account(id).await.ok_or_else(invalid)?;

    info!(account_id = %account.id, email = %account.email, "account logged in");
    issue_tokens(&state, account.into())
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let id = state
        .tokens
        .refresh_subject(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    let account = state.accounts.account(id).await.ok_or_else(|| {
        warn!(account_id = %id, "refresh for missing account");
        (StatusCode::UNAUTHORIZED, "Account not found".to_string())
    })?;
    issue_tokens(&state, account.into())
}

#[instrument(skip_all)]
pub async fn get_me(CurrentAccount(account): CurrentAccount) -> Json<PublicAccount> {
    Json(account.into())
}
