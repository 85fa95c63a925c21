use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Label shown when an article carries no source name
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Country codes the headlines endpoint is queried with
pub mod country {
    pub const US: &str = "us";
    pub const GB: &str = "gb";
    pub const CA: &str = "ca";
    /// Morocco
    pub const MA: &str = "ma";
}

/// A single news item as returned by the news API
///
/// Field names follow the wire format so a bookmarked article serializes
/// back to the same shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: ArticleSource,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
}

// The API sends `null` for fields it has no value for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Publisher info attached to an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// Minimal article with just a URL, handy for building fixtures
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            content: None,
            author: None,
            source: ArticleSource::default(),
            url_to_image: None,
            published_at: String::new(),
        }
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Source name, falling back to "Unknown Source"
    pub fn source_label(&self) -> &str {
        match self.source.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_SOURCE,
        }
    }

    /// Image URL unless it is missing or empty
    pub fn image_url(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|url| !url.is_empty())
    }

    pub fn image_or_placeholder<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image_url().unwrap_or(placeholder)
    }

    /// Parsed `publishedAt`, or None when the source sent garbage
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Server-side categories accepted by the headlines endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::General => "general",
            NewsCategory::Business => "business",
            NewsCategory::Entertainment => "entertainment",
            NewsCategory::Health => "health",
            NewsCategory::Science => "science",
            NewsCategory::Sports => "sports",
            NewsCategory::Technology => "technology",
        }
    }

    pub fn all() -> Vec<NewsCategory> {
        vec![
            NewsCategory::General,
            NewsCategory::Business,
            NewsCategory::Entertainment,
            NewsCategory::Health,
            NewsCategory::Science,
            NewsCategory::Sports,
            NewsCategory::Technology,
        ]
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw response body from both endpoints
///
/// Error bodies have `status: "error"` plus `code`/`message` and no articles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewsResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Normalized outcome of a façade call
///
/// The façade never returns `Err`; anything that goes wrong ends up here as a
/// human-readable reason the caller can show next to a retry button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsResult {
    Success {
        articles: Vec<Article>,
        total_results: u64,
    },
    Failure {
        reason: String,
    },
}

impl NewsResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        NewsResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NewsResult::Success { .. })
    }

    /// Articles on success, empty slice on failure
    pub fn articles(&self) -> &[Article] {
        match self {
            NewsResult::Success { articles, .. } => articles,
            NewsResult::Failure { .. } => &[],
        }
    }

    /// Keep the result shape but transform the article list
    pub fn map_articles<F>(self, f: F) -> Self
    where
        F: FnOnce(Vec<Article>) -> Vec<Article>,
    {
        match self {
            NewsResult::Success {
                articles,
                total_results,
            } => NewsResult::Success {
                articles: f(articles),
                total_results,
            },
            failure => failure,
        }
    }

    pub fn into_result(self) -> Result<(Vec<Article>, u64), String> {
        match self {
            NewsResult::Success {
                articles,
                total_results,
            } => Ok((articles, total_results)),
            NewsResult::Failure { reason } => Err(reason),
        }
    }
}
