use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use cybernews_api::{Article, ArticleSource, NewsCategory, NewsResult};

/// A saved article
///
/// Stored flat: the article's own fields plus `bookmarkedAt`, so the JSON in
/// storage looks like the API article with one extra key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(flatten)]
    pub article: Article,
    /// Epoch milliseconds, set once when the bookmark is created
    #[serde(rename = "bookmarkedAt")]
    pub bookmarked_at: i64,
}

impl Bookmark {
    pub fn new(article: Article, bookmarked_at: i64) -> Self {
        Self {
            article,
            bookmarked_at,
        }
    }

    pub fn url(&self) -> &str {
        &self.article.url
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.bookmarked_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_serializes_flat() {
        let mut article = Article::new("https://example.com/a");
        article.title = Some("Phishing kit sold online".into());

        let bookmark = Bookmark::new(article, 1_705_314_600_000);
        let value = serde_json::to_value(&bookmark).unwrap();

        assert_eq!(value["url"], "https://example.com/a");
        assert_eq!(value["title"], "Phishing kit sold online");
        assert_eq!(value["bookmarkedAt"], 1_705_314_600_000_i64);
        assert!(value.get("article").is_none());
    }

    #[test]
    fn test_bookmark_reads_stored_shape() {
        let json = r#"{
            "source": { "name": "The Record" },
            "title": "Botnet takedown",
            "url": "https://example.com/b",
            "urlToImage": "https://example.com/b.jpg",
            "publishedAt": "2024-01-15T10:30:00Z",
            "bookmarkedAt": 1705314600000
        }"#;

        let bookmark: Bookmark = serde_json::from_str(json).unwrap();
        assert_eq!(bookmark.url(), "https://example.com/b");
        assert_eq!(bookmark.article.source_label(), "The Record");
        assert_eq!(
            bookmark.saved_at().unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }
}
