use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::accounts::repo_types::AccountId;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub author_id: AccountId,
    pub title: String,
    pub intro: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
