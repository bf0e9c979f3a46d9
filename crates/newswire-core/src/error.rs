use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out fetching {url}")]
    FetchTimeout { url: String },

    #[error("unexpected HTTP status {status} for {url}")]
    FetchStatus { status: u16, url: String },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("no readable content found in document")]
    NoContent,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True when the failure happened while fetching the remote page itself,
    /// as opposed to processing its content.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::FetchTimeout { .. } | Error::FetchStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
