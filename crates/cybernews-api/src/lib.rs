// Client for the NewsAPI-style headlines/search endpoints
pub mod newsapi;
pub mod types;

// Re-export common types
pub use newsapi::{NewsApiClient, NewsApiError, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT};
pub use types::{country, Article, ArticleSource, NewsCategory, NewsResult, UNKNOWN_SOURCE};
