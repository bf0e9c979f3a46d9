use newswire_core::{AppConfig, ArticleService, NewsService, Result};

/// Shared services behind every handler
pub struct AppState {
    pub news: NewsService,
    pub articles: ArticleService,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            news: NewsService::new(config)?,
            articles: ArticleService::new(config)?,
        })
    }
}
