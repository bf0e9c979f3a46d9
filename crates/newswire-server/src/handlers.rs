use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use newswire_core::{Article, NewsItem};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub title: String,
    pub content: String,
    pub original_url: String,
    pub site_name: String,
    /// Tells clients the content field is HTML, not markdown or plain text
    pub is_html: bool,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            content: article.content,
            original_url: article.original_url,
            site_name: article.site_name,
            is_html: true,
        }
    }
}

/// `POST /article` — fetch one page and return its readable content
pub async fn read_article(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ArticleRequest>,
) -> ApiResult<Json<ArticleResponse>> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let article = state.articles.read(url).await?;
    Ok(Json(ArticleResponse::from(article)))
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub news: Vec<NewsItem>,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /news` — the aggregated, cached feed
pub async fn latest_news(State(state): State<Arc<AppState>>) -> ApiResult<Json<NewsResponse>> {
    let news = state.news.latest().await.map_err(ApiError::news)?;

    Ok(Json(NewsResponse {
        news,
        status: "success",
        timestamp: Utc::now(),
    }))
}
