use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::{
    dto::{ArticleDraft, ArticleRequest, Pagination},
    repo_types::Article,
};
use crate::{auth::CurrentAccount, state::AppState};

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles))
        .route("/articles/:id", get(get_article))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", post(create_article))
        .route("/articles/:id", put(update_article).delete(delete_article))
}

#[instrument(skip(state))]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<Article>>> {
    let (limit, offset) = p.clamped();
    let articles = state
        .articles
        .list(limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(articles))
}

#[instrument(skip(state))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Article>> {
    state
        .articles
        .get(id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(not_found)
}

#[instrument(skip(state, author, body), fields(author_id = %author.id))]
pub async fn create_article(
    State(state): State<AppState>,
    CurrentAccount(author): CurrentAccount,
    Json(body): Json<ArticleRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<Article>)> {
    let draft = ArticleDraft::try_from(body).map_err(|e| {
        warn!(error = %e, "article rejected");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let article = state
        .articles
        .create(author.id, &draft)
        .await
        .map_err(internal)?;
    info!(article_id = article.id, author_id = %author.id, "article created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/articles/{}", article.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(article)))
}

#[instrument(skip(state, author, body), fields(author_id = %author.id))]
pub async fn update_article(
    State(state): State<AppState>,
    CurrentAccount(author): CurrentAccount,
    Path(id): Path<i64>,
    Json(body): Json<ArticleRequest>,
) -> ApiResult<Json<Article>> {
    let draft =
        ArticleDraft::try_from(body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let article = state
        .articles
        .update(id, author.id, &draft)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;
    info!(article_id = id, author_id = %author.id, "article updated");
    Ok(Json(article))
}

#[instrument(skip(state, author), fields(author_id = %author.id))]
pub async fn delete_article(
    State(state): State<AppState>,
    CurrentAccount(author): CurrentAccount,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if state
        .articles
        .delete(id, author.id)
        .await
        .map_err(internal)?
    {
        info!(article_id = id, author_id = %author.id, "article deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

// Someone else's article reads as missing.
fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Article not found".into())
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "article storage failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
}
