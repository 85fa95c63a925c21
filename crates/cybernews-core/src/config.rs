use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bookmarks::ReadFailurePolicy;
use crate::classifier::CYBER_KEYWORDS;

/// Main configuration structure
///
/// Loaded from `config.toml` in the platform config dir. CLI flags and env
/// vars are layered on top by the binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub news_api: NewsApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Load config from default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("cybernews");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsApiConfig {
    /// newsapi.org key - get one at https://newsapi.org/register
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Country used for headlines
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    cybernews_api::DEFAULT_PAGE_SIZE
}

fn default_country() -> String {
    cybernews_api::country::US.to_string()
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database file; defaults to the platform data dir
    pub path: Option<PathBuf>,

    /// What a failed bookmark read does: show nothing, or report the error
    #[serde(default)]
    pub read_failure: ReadFailurePolicy,
}

impl StorageConfig {
    pub fn db_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("cybernews");

        Ok(data_dir.join("cybernews.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// An article is "cyber" if any of these appears in its text
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_home_limit")]
    pub home_limit: usize,

    #[serde(default = "default_discover_limit")]
    pub discover_limit: usize,

    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
}

fn default_keywords() -> Vec<String> {
    CYBER_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_home_limit() -> usize {
    100
}

fn default_discover_limit() -> usize {
    20
}

fn default_trending_limit() -> usize {
    5
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            home_limit: default_home_limit(),
            discover_limit: default_discover_limit(),
            trending_limit: default_trending_limit(),
        }
    }
}
