use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::{accounts::repo_types::AccountId, config::JwtConfig};

/// What a token may be spent on. Access tokens open protected routes,
/// refresh tokens only buy a new pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Purpose {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: AccountId,
    iat: i64,
    exp: i64,
    iss: String,
    aud: String,
    purpose: Purpose,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("could not sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    Rejected(#[from] jsonwebtoken::errors::Error),
    #[error("access token required")]
    NotAccess,
    #[error("refresh token required")]
    NotRefresh,
}

/// A freshly issued access/refresh pair for one account.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and checks HS256 tokens bound to one issuer and audience.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(cfg: &JwtConfig) -> Self {
        let secret = cfg.secret.as_bytes();
        let mut validation = Validation::default();
        validation.set_issuer(&[&cfg.issuer]);
        validation.set_audience(&[&cfg.audience]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: Duration::minutes(cfg.ttl_minutes.max(0)),
            refresh_ttl: Duration::minutes(cfg.refresh_ttl_minutes.max(0)),
        }
    }

    pub fn issue(&self, account: AccountId) -> Result<TokenPair, TokenError> {
        let now = OffsetDateTime::now_utc();
        let pair = TokenPair {
            access_token: self.sign(account, Purpose::Access, now)?,
            refresh_token: self.sign(account, Purpose::Refresh, now)?,
        };
        debug!(account_id = %account, "token pair issued");
        Ok(pair)
    }

    /// Account behind a valid access token.
    pub fn access_subject(&self, token: &str) -> Result<AccountId, TokenError> {
        match self.decode(token)? {
            Claims { sub, purpose: Purpose::Access, .. } => Ok(sub),
            _ => Err(TokenError::NotAccess),
        }
    }

    /// Account behind a valid refresh token.
    pub fn refresh_subject(&self, token: &str) -> Result<AccountId, TokenError> {
        match self.decode(token)? {
            Claims { sub, purpose: Purpose::Refresh, .. } => Ok(sub),
            _ => Err(TokenError::NotRefresh),
        }
    }

    fn sign(
        &self,
        account: AccountId,
        purpose: Purpose,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let ttl = match purpose {
            Purpose::Access => self.access_ttl,
            Purpose::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: account,
            iat: now.unix_timestamp(),
            exp: (now + ttl).unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            purpose,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
