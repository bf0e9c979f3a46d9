use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::feed::models::FeedSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
            news: NewsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP API listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Hard timeout for any single outbound fetch, in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// User-Agent sent with every outbound request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// How long an aggregated feed snapshot stays valid, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Newest entries kept per source before filtering
    #[serde(default = "default_max_items")]
    pub max_items_per_source: usize,
    /// An item is kept iff at least one keyword matches its title or snippet
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Feed sources polled on every aggregation cycle
    #[serde(default = "default_sources")]
    pub sources: Vec<FeedSource>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl(),
            max_items_per_source: default_max_items(),
            keywords: default_keywords(),
            sources: default_sources(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_max_items() -> usize {
    15
}

fn default_keywords() -> Vec<String> {
    [
        // Action words
        "发布", "上线", "推出", "更新", "功能", "公测", "内测", "开放", "API", "工具", "助手", "模型",
        // Core products
        "Claude", "GPT", "Gemini", "Sora", "Llama", "DeepSeek", "Kimi", "Midjourney", "Stable Diffusion",
        // Major players
        "Apple", "OpenAI", "Google", "Anthropic", "Meta",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sources() -> Vec<FeedSource> {
    [
        ("机器之心", "https://www.jiqizhixin.com/rss"),
        ("少数派", "https://sspai.com/feed"),
        ("OSCHINA", "https://www.oschina.net/news/rss"),
        ("36氪", "https://36kr.com/feed"),
    ]
    .iter()
    .map(|(name, url)| FeedSource {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newswire/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newswire")
            .join("config.toml")
    }
}
