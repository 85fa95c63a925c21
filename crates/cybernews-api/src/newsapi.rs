use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{country, NewsCategory, NewsResponse, NewsResult};

const NEWS_API_BASE: &str = "https://newsapi.org/v2";
const TOP_HEADLINES: &str = "/top-headlines";
const EVERYTHING: &str = "/everything";

/// Articles requested per call
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Requests slower than this are abandoned and reported as failures
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HEADLINES_FAILURE: &str = "Failed to fetch news";
const SEARCH_FAILURE: &str = "Failed to search news";

#[derive(Error, Debug)]
pub enum NewsApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("News API rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl NewsApiError {
    /// Turn an error into the user-facing failure
    ///
    /// Transport problems keep their own message; anything the server said
    /// (bad status, error body, unparseable body) collapses into `fallback`.
    fn into_failure(self, fallback: &str) -> NewsResult {
        match self {
            NewsApiError::NetworkError(e) if e.is_timeout() => {
                NewsResult::failure("Request timed out. Check your connection and try again.")
            }
            NewsApiError::NetworkError(e) => NewsResult::failure(e.without_url().to_string()),
            _ => NewsResult::failure(fallback),
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsApiError>;

/// Client for NewsAPI-compatible endpoints
///
/// Every request carries the same API key and JSON content type; only the
/// query parameters change between calls. No retries happen here - a failed
/// call is returned as `NewsResult::Failure` and the caller decides whether
/// to refresh.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, NEWS_API_BASE)
    }

    /// For mirrors, proxies or a local stub server
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_settings(api_key, base_url, DEFAULT_TIMEOUT, DEFAULT_PAGE_SIZE)
    }

    pub fn with_settings(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        page_size: u32,
    ) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("CyberNews/0.1.0"),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Current headlines for a country, optionally narrowed server-side by category
    pub async fn top_headlines(&self, country: &str, category: Option<NewsCategory>) -> NewsResult {
        let mut params = vec![
            ("country", country.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(category) = category {
            params.push(("category", category.as_str().to_string()));
        }

        match self.fetch(TOP_HEADLINES, &params).await {
            Ok(body) => NewsResult::Success {
                articles: body.articles,
                total_results: body.total_results,
            },
            Err(e) => {
                warn!("Error fetching top headlines: {}", e);
                e.into_failure(HEADLINES_FAILURE)
            }
        }
    }

    /// Free-text search, newest first, English only
    pub async fn search(&self, query: &str) -> NewsResult {
        let params = [
            ("q", query.to_string()),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        match self.fetch(EVERYTHING, &params).await {
            Ok(body) => NewsResult::Success {
                articles: body.articles,
                total_results: body.total_results,
            },
            Err(e) => {
                warn!("Error searching news for '{}': {}", query, e);
                e.into_failure(SEARCH_FAILURE)
            }
        }
    }

    /// US headlines for a single category
    pub async fn news_by_category(&self, category: NewsCategory) -> NewsResult {
        self.top_headlines(country::US, Some(category)).await
    }

    /// Fetch several categories at once
    pub async fn news_by_categories(
        &self,
        categories: &[NewsCategory],
    ) -> HashMap<NewsCategory, NewsResult> {
        use futures::future::join_all;

        let requests: Vec<_> = categories
            .iter()
            .map(|category| self.news_by_category(*category))
            .collect();

        let results = join_all(requests).await;

        categories.iter().copied().zip(results).collect()
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<NewsResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(error_body) = serde_json::from_str::<NewsResponse>(&body) {
                debug!(
                    "News API error body: code={:?} message={:?}",
                    error_body.code, error_body.message
                );
            }
            return Err(NewsApiError::BadStatus(status));
        }

        let body = response.text().await?;
        let parsed: NewsResponse = serde_json::from_str(&body)?;

        if parsed.status != "ok" {
            return Err(NewsApiError::Rejected {
                code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
                message: parsed.message.unwrap_or_default(),
            });
        }

        debug!(
            "Received {} articles ({} total)",
            parsed.articles.len(),
            parsed.total_results
        );
        Ok(parsed)
    }
}
