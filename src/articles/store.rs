use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{dto::ArticleDraft, repo_types::Article};
use crate::accounts::repo_types::AccountId;

/// Where articles live. Writes are scoped to the author: `update` and
/// `delete` treat someone else's article as missing.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Newest first.
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Article>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Article>>;
    async fn create(&self, author: AccountId, draft: &ArticleDraft) -> anyhow::Result<Article>;
    async fn update(
        &self,
        id: i64,
        author: AccountId,
        draft: &ArticleDraft,
    ) -> anyhow::Result<Option<Article>>;
    /// `true` when a row owned by `author` was removed.
    async fn delete(&self, id: i64, author: AccountId) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgArticleStore {
    db: PgPool,
}

impl PgArticleStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Article>> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, author_id, title, intro, text, created_at
              FROM articles
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list articles")?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Article>> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, author_id, title, intro, text, created_at
              FROM articles
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get article")?;
        Ok(row)
    }

    async fn create(&self, author: AccountId, draft: &ArticleDraft) -> anyhow::Result<Article> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (author_id, title, intro, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, intro, text, created_at
            "#,
        )
        .bind(author)
        .bind(&draft.title)
        .bind(&draft.intro)
        .bind(&draft.text)
        .fetch_one(&self.db)
        .await
        .context("insert article")?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        author: AccountId,
        draft: &ArticleDraft,
    ) -> anyhow::Result<Option<Article>> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
               SET title = $3, intro = $4, text = $5
             WHERE id = $1 AND author_id = $2
            RETURNING id, author_id, title, intro, text, created_at
            "#,
        )
        .bind(id)
        .bind(author)
        .bind(&draft.title)
        .bind(&draft.intro)
        .bind(&draft.text)
        .fetch_optional(&self.db)
        .await
        .context("update article")?;
        Ok(row)
    }

    async fn delete(&self, id: i64, author: AccountId) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM articles WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author)
            .execute(&self.db)
            .await
            .context("delete article")?;
        Ok(res.rows_affected() > 0)
    }
}
