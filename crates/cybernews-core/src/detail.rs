// Single-article view: bookmark state, header image, body and share text
use cybernews_storage::KeyValueStore;
use tracing::warn;

use crate::{
    bookmarks::BookmarkStore,
    display::{self, PLACEHOLDER_IMAGE},
    models::Article,
    Result,
};

/// State behind the article detail screen
///
/// The bookmarked flag is read once on open and then follows the result of
/// each toggle, so it never needs a second lookup.
pub struct ArticleDetail<'a, S: KeyValueStore> {
    article: Article,
    bookmarks: &'a BookmarkStore<S>,
    bookmarked: bool,
}

impl<'a, S: KeyValueStore> ArticleDetail<'a, S> {
    pub fn open(article: Article, bookmarks: &'a BookmarkStore<S>) -> Result<Self> {
        let bookmarked = bookmarks.contains(&article.url)?;
        Ok(Self {
            article,
            bookmarks,
            bookmarked,
        })
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Save or unsave the article, returning the new state
    ///
    /// On failure the flag keeps its previous value.
    pub fn toggle_bookmark(&mut self) -> Result<bool> {
        match self.bookmarks.toggle(&self.article) {
            Ok(saved) => {
                self.bookmarked = saved;
                Ok(saved)
            }
            Err(e) => {
                warn!("Failed to update bookmark for {}: {}", self.article.url, e);
                Err(e)
            }
        }
    }

    /// Header image, falling back to the placeholder
    pub fn image(&self) -> &str {
        self.article.image_or_placeholder(PLACEHOLDER_IMAGE)
    }

    pub fn byline(&self) -> Option<String> {
        self.article
            .author
            .as_deref()
            .filter(|author| !author.is_empty())
            .map(|author| format!("By {}", author))
    }

    pub fn body(&self) -> Option<&str> {
        self.article
            .content
            .as_deref()
            .map(display::body_text)
            .filter(|body| !body.is_empty())
    }

    pub fn share_text(&self) -> String {
        display::share_text(&self.article)
    }
}
