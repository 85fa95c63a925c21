// Core logic: bookmarks, article classification, feeds
pub mod bookmarks;
pub mod classifier;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod feed;
pub mod models;
pub mod providers;
pub mod source;

pub use bookmarks::{BookmarkStore, ReadFailurePolicy, BOOKMARKS_KEY};
pub use classifier::{dedup_by_url, filter_for_display, has_displayable_image, is_relevant, CYBER_KEYWORDS};
pub use config::Config;
pub use detail::ArticleDetail;
pub use error::Error;
pub use feed::{DiscoverTopic, NewsFeed};
pub use models::{Article, Bookmark, NewsCategory, NewsResult};
pub use providers::NewsApiProvider;
pub use source::NewsSource;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
