use serde::Deserialize;
use thiserror::Error;

pub const TITLE_MAX_LEN: usize = 100;
pub const INTRO_MAX_LEN: usize = 300;

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub intro: String,
    pub text: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Article fields that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub intro: String,
    pub text: String,
}

impl TryFrom<ArticleRequest> for ArticleDraft {
    type Error = ArticleError;

    fn try_from(req: ArticleRequest) -> Result<Self, Self::Error> {
        let title = bounded("title", req.title, TITLE_MAX_LEN)?;
        let intro = bounded("intro", req.intro, INTRO_MAX_LEN)?;
        if req.text.trim().is_empty() {
            return Err(ArticleError::Missing("text"));
        }
        Ok(Self {
            title,
            intro,
            text: req.text,
        })
    }
}

fn bounded(field: &'static str, value: String, max: usize) -> Result<String, ArticleError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ArticleError::Missing(field));
    }
    if value.chars().count() > max {
        return Err(ArticleError::TooLong { field, max });
    }
    Ok(value)
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Pagination {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}
