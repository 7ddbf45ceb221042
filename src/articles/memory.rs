use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{dto::ArticleDraft, repo_types::Article, store::ArticleStore};
use crate::accounts::repo_types::AccountId;

/// Process-local article store with the same author scoping as the SQL one.
#[derive(Default)]
pub struct MemoryArticleStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Article>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> anyhow::Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("article store lock poisoned"))
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Article>> {
        let inner = self.locked()?;
        let mut rows: Vec<Article> = inner.rows.values().cloned().collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Article>> {
        Ok(self.locked()?.rows.get(&id).cloned())
    }

    async fn create(&self, author: AccountId, draft: &ArticleDraft) -> anyhow::Result<Article> {
        let mut inner = self.locked()?;
        inner.last_id += 1;
        let article = Article {
            id: inner.last_id,
            author_id: author,
            title: draft.title.clone(),
            intro: draft.intro.clone(),
            text: draft.text.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.rows.insert(article.id, article.clone());
        Ok(article)
    }

    async fn update(
        &self,
        id: i64,
        author: AccountId,
        draft: &ArticleDraft,
    ) -> anyhow::Result<Option<Article>> {
        let mut inner = self.locked()?;
        let Some(article) = inner.rows.get_mut(&id).filter(|a| a.author_id == author) else {
            return Ok(None);
        };
        article.title = draft.title.clone();
        article.intro = draft.intro.clone();
        article.text = draft.text.clone();
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: i64, author: AccountId) -> anyhow::Result<bool> {
        let mut inner = self.locked()?;
        match inner.rows.get(&id) {
            Some(a) if a.author_id == author => Ok(inner.rows.remove(&id).is_some()),
            _ => Ok(false),
        }
    }
}
