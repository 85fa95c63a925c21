// NewsAPI provider - bridges NewsApiClient with the NewsSource trait
use std::time::Duration;

use async_trait::async_trait;
use cybernews_api::NewsApiClient;

use crate::{
    config::NewsApiConfig,
    models::{NewsCategory, NewsResult},
    source::NewsSource,
    Error, Result,
};

/// Wrapper around NewsApiClient that implements NewsSource
pub struct NewsApiProvider {
    client: NewsApiClient,
}

impl NewsApiProvider {
    pub fn new(client: NewsApiClient) -> Self {
        Self { client }
    }

    /// Build from config; fails if no API key is configured
    pub fn from_config(config: &NewsApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::ConfigError(
                    "No news API key configured. Set NEWS_API_KEY or news_api.api_key in config.toml"
                        .to_string(),
                )
            })?;

        let client = NewsApiClient::with_settings(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            config.page_size,
        );

        Ok(Self::new(client))
    }
}

#[async_trait]
impl NewsSource for NewsApiProvider {
    async fn top_headlines(&self, country: &str, category: Option<NewsCategory>) -> NewsResult {
        self.client.top_headlines(country, category).await
    }

    async fn search(&self, query: &str) -> NewsResult {
        self.client.search(query).await
    }
}
