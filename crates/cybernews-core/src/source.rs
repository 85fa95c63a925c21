use crate::models::{NewsCategory, NewsResult};

/// Anything that can hand us articles - the real news API, or a fake in tests
///
/// Mirrors the façade contract: calls never fail, problems come back as
/// `NewsResult::Failure`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn top_headlines(&self, country: &str, category: Option<NewsCategory>) -> NewsResult;
    async fn search(&self, query: &str) -> NewsResult;
}
