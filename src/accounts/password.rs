use std::str::FromStr;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

/// How account credentials are kept at rest.
///
/// `Plaintext` exists for the legacy databases that stored raw passwords;
/// a deployment picks one scheme and never mixes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Plaintext,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown password scheme \"{0}\", expected \"argon2\" or \"plaintext\"")]
pub struct PasswordSchemeError(String);

impl FromStr for PasswordScheme {
    type Err = PasswordSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" => Ok(Self::Argon2),
            "plaintext" | "plain" => Ok(Self::Plaintext),
            other => Err(PasswordSchemeError(other.to_string())),
        }
    }
}

impl PasswordScheme {
    /// Turn a submitted password into the credential stored on the account.
    pub fn seal(&self, plain: &str) -> anyhow::Result<String> {
        match self {
            Self::Argon2 => hash_password(plain),
            Self::Plaintext => Ok(plain.to_string()),
        }
    }

    /// Check a submitted password against a stored credential.
    pub fn verify(&self, plain: &str, stored: &str) -> anyhow::Result<bool> {
        match self {
            Self::Argon2 => verify_password(plain, stored),
            Self::Plaintext => Ok(plain == stored),
        }
    }

    /// Spend the same work as [`verify`](Self::verify) when there is no
    /// stored credential to check, so a missing account answers as slowly
    /// as a wrong password.
    pub fn verify_absent(&self, plain: &str) {
        match self {
            Self::Argon2 => {
                if let Some(hash) = DUMMY_HASH.as_deref() {
                    let _ = verify_password(plain, hash);
                }
            }
            Self::Plaintext => {
                std::hint::black_box(plain == DUMMY_PLAINTEXT);
            }
        }
    }
}

const DUMMY_PLAINTEXT: &str = "\u{0}no-such-account";

lazy_static! {
    // Hashed with the same parameters as real credentials.
    static ref DUMMY_HASH: Option<String> = hash_password(DUMMY_PLAINTEXT).ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
