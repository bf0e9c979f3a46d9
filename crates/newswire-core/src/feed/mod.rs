pub mod fetcher;
pub mod filter;
pub mod models;
pub mod parser;

pub use fetcher::{FeedFetcher, FetchItems};
pub use models::{FeedItem, FeedSource, NewsItem};
