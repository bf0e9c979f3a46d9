pub mod article;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod news;

pub use article::{Article, ArticleService};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use feed::models::{FeedSource, NewsItem};
pub use news::NewsService;
