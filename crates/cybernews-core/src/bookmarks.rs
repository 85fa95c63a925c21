use chrono::Utc;
use cybernews_storage::{KeyValueStore, SqliteStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::models::{Article, Bookmark};
use crate::Result;

/// Storage key holding the whole bookmark collection as one JSON array
pub const BOOKMARKS_KEY: &str = "@cybernews_bookmarks";

/// How read paths (`list`, `contains`, `get`) react to a storage failure
///
/// Write paths always fail loudly regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFailurePolicy {
    /// Log a warning and act as if there are no bookmarks
    #[default]
    Degrade,
    /// Hand the error to the caller
    Propagate,
}

/// Durable collection of bookmarked articles, keyed by URL
///
/// Every write is a full read-modify-write of the collection under one key.
/// Not safe for concurrent writers; callers are expected to issue writes one
/// at a time.
pub struct BookmarkStore<S: KeyValueStore> {
    store: S,
    key: String,
    read_policy: ReadFailurePolicy,
}

impl BookmarkStore<SqliteStore> {
    /// Open the on-disk store described by the config
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let path = config.db_path()?;
        let store = SqliteStore::open(&path)?;
        info!("Bookmarks stored at {}", path.display());
        Ok(Self::new(store).with_read_policy(config.read_failure))
    }
}

impl<S: KeyValueStore> BookmarkStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: BOOKMARKS_KEY.to_string(),
            read_policy: ReadFailurePolicy::default(),
        }
    }

    pub fn with_read_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// Keep the collection under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn read_policy(&self) -> ReadFailurePolicy {
        self.read_policy
    }

    /// All bookmarks, newest first
    pub fn list(&self) -> Result<Vec<Bookmark>> {
        let loaded = self.load().map(|mut bookmarks| {
            // Stable sort so same-millisecond saves keep their prepend order
            bookmarks.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at));
            bookmarks
        });
        self.read_or_degrade("list", loaded, Vec::new())
    }

    pub fn contains(&self, url: &str) -> Result<bool> {
        let found = self.load().map(|bookmarks| bookmarks.iter().any(|b| b.url() == url));
        self.read_or_degrade("contains", found, false)
    }

    pub fn get(&self, url: &str) -> Result<Option<Bookmark>> {
        let found = self
            .load()
            .map(|bookmarks| bookmarks.into_iter().find(|b| b.url() == url));
        self.read_or_degrade("get", found, None)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Bookmark an article now
    ///
    /// Returns false (and writes nothing) if the URL is already saved.
    pub fn add(&self, article: &Article) -> Result<bool> {
        self.add_at(article, Utc::now().timestamp_millis())
    }

    /// Bookmark an article with an explicit timestamp (epoch millis)
    pub fn add_at(&self, article: &Article, bookmarked_at: i64) -> Result<bool> {
        let mut bookmarks = self.load()?;

        if bookmarks.iter().any(|b| b.url() == article.url) {
            debug!("Already bookmarked: {}", article.url);
            return Ok(false);
        }

        bookmarks.insert(0, Bookmark::new(article.clone(), bookmarked_at));
        // Persist newest first so storage order always matches `list`
        bookmarks.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at));
        self.save(&bookmarks)?;
        info!("Bookmarked {}", article.url);
        Ok(true)
    }

    /// Remove by URL; returns whether anything was removed
    pub fn remove(&self, url: &str) -> Result<bool> {
        let mut bookmarks = self.load()?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.url() != url);

        if bookmarks.len() == before {
            debug!("Nothing to remove for {}", url);
            return Ok(false);
        }

        self.save(&bookmarks)?;
        info!("Removed bookmark {}", url);
        Ok(true)
    }

    /// Flip the saved state of an article, returning the new state
    pub fn toggle(&self, article: &Article) -> Result<bool> {
        let saved = self
            .load()?
            .iter()
            .any(|b| b.url() == article.url);

        if saved {
            self.remove(&article.url)?;
            Ok(false)
        } else {
            self.add(article)?;
            Ok(true)
        }
    }

    /// Drop every bookmark
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        info!("Cleared all bookmarks");
        Ok(())
    }

    /// Strict read, used by write paths so a corrupted collection is never
    /// overwritten with a fresh one
    fn load(&self) -> Result<Vec<Bookmark>> {
        match self.store.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let json = serde_json::to_string(bookmarks)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    fn read_or_degrade<T>(&self, operation: &str, result: Result<T>, fallback: T) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => match self.read_policy {
                ReadFailurePolicy::Degrade => {
                    warn!(
                        "Failed to read bookmarks during {}: {}. Treating as empty.",
                        operation, e
                    );
                    Ok(fallback)
                }
                ReadFailurePolicy::Propagate => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cybernews_storage::{MemoryStore, StorageError};

    fn article(url: &str) -> Article {
        let mut article = Article::new(url);
        article.title = Some(format!("Story at {}", url));
        article
    }

    /// Store whose every call fails like a broken disk
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> cybernews_storage::Result<Option<String>> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }

        fn set(&self, _key: &str, _value: &str) -> cybernews_storage::Result<()> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }

        fn remove(&self, _key: &str) -> cybernews_storage::Result<()> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
    }

    fn urls(bookmarks: &[Bookmark]) -> Vec<&str> {
        bookmarks.iter().map(|b| b.url()).collect()
    }

    #[test]
    fn test_add_then_contains() {
        let store = BookmarkStore::new(MemoryStore::new());
        let a = article("https://example.com/a");

        assert!(!store.contains(&a.url).unwrap());
        assert!(store.add(&a).unwrap());
        assert!(store.contains(&a.url).unwrap());
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = BookmarkStore::new(MemoryStore::new());
        let a = article("https://example.com/a");

        assert!(store.add_at(&a, 1).unwrap());
        assert!(!store.add_at(&a, 2).unwrap());

        let bookmarks = store.list().unwrap();
        assert_eq!(bookmarks.len(), 1);
        // The original timestamp is kept
        assert_eq!(bookmarks[0].bookmarked_at, 1);
    }

    #[test]
    fn test_newest_first() {
        let store = BookmarkStore::new(MemoryStore::new());
        let a = article("https://example.com/a");
        let b = article("https://example.com/b");

        store.add(&a).unwrap();
        store.add(&b).unwrap();

        let bookmarks = store.list().unwrap();
        assert_eq!(bookmarks[0].article, b);
        assert_eq!(bookmarks[1].article, a);
    }

    #[test]
    fn test_list_sorts_by_timestamp_not_insertion() {
        let store = BookmarkStore::new(MemoryStore::new());

        store.add_at(&article("c"), 1).unwrap();
        store.add_at(&article("a"), 3).unwrap();
        store.add_at(&article("b"), 2).unwrap();

        assert_eq!(urls(&store.list().unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_scenario() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add_at(&article("c"), 1).unwrap();
        store.add_at(&article("b"), 2).unwrap();
        store.add_at(&article("a"), 3).unwrap();

        assert_eq!(urls(&store.list().unwrap()), vec!["a", "b", "c"]);

        assert!(store.remove("b").unwrap());
        assert_eq!(urls(&store.list().unwrap()), vec!["a", "c"]);
        assert!(!store.contains("b").unwrap());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add_at(&article("a"), 1).unwrap();

        let before = store.list().unwrap();
        assert!(!store.remove("zzz").unwrap());
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_clear() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add(&article("a")).unwrap();
        store.add(&article("b")).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty().unwrap());

        // Clearing an empty store is fine too
        store.clear().unwrap();
    }

    #[test]
    fn test_rapid_double_toggle_leaves_consistent_state() {
        let store = BookmarkStore::new(MemoryStore::new());
        let a = article("https://example.com/a");

        assert!(store.toggle(&a).unwrap());
        assert!(!store.toggle(&a).unwrap());
        assert!(!store.contains(&a.url).unwrap());

        assert!(store.toggle(&a).unwrap());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_returns_saved_copy() {
        let store = BookmarkStore::new(MemoryStore::new());
        let a = article("https://example.com/a");
        store.add_at(&a, 42).unwrap();

        let saved = store.get(&a.url).unwrap().unwrap();
        assert_eq!(saved.article, a);
        assert_eq!(saved.bookmarked_at, 42);
        assert!(store.get("https://example.com/missing").unwrap().is_none());
    }

    #[test]
    fn test_stored_collection_round_trips() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add_at(&article("a"), 3).unwrap();
        store.add_at(&article("b"), 2).unwrap();

        let listed = store.list().unwrap();
        let raw = store.store.get(BOOKMARKS_KEY).unwrap().unwrap();
        let decoded: Vec<Bookmark> = serde_json::from_str(&raw).unwrap();

        assert_eq!(decoded, listed);
    }

    #[test]
    fn test_out_of_order_saves_are_stored_newest_first() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add_at(&article("b"), 2).unwrap();
        store.add_at(&article("c"), 1).unwrap();
        store.add_at(&article("a"), 3).unwrap();

        let raw = store.store.get(BOOKMARKS_KEY).unwrap().unwrap();
        let stored: Vec<Bookmark> = serde_json::from_str(&raw).unwrap();
        assert_eq!(urls(&stored), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_same_millisecond_saves_keep_latest_first() {
        let store = BookmarkStore::new(MemoryStore::new());
        store.add_at(&article("first"), 5).unwrap();
        store.add_at(&article("second"), 5).unwrap();

        assert_eq!(urls(&store.list().unwrap()), vec!["second", "first"]);
    }

    #[test]
    fn test_reads_degrade_on_io_failure() {
        let store = BookmarkStore::new(FailingStore);

        assert!(store.list().unwrap().is_empty());
        assert!(!store.contains("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_writes_propagate_io_failure() {
        let store = BookmarkStore::new(FailingStore);

        assert!(store.add(&article("a")).is_err());
        assert!(store.remove("a").is_err());
        assert!(store.clear().is_err());
    }

    #[test]
    fn test_propagate_policy_surfaces_read_errors() {
        let store = BookmarkStore::new(FailingStore).with_read_policy(ReadFailurePolicy::Propagate);

        assert!(store.list().is_err());
        assert!(store.contains("a").is_err());
    }

    #[test]
    fn test_corrupted_collection_is_not_overwritten() {
        let kv = MemoryStore::new();
        kv.set(BOOKMARKS_KEY, "{not json").unwrap();
        let store = BookmarkStore::new(kv);

        // Reads degrade...
        assert!(store.list().unwrap().is_empty());

        // ...but a write refuses to clobber what's there
        let err = store.add(&article("a")).unwrap_err();
        assert!(matches!(err, crate::Error::SerializationError(_)));
        assert_eq!(store.store.get(BOOKMARKS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let kv = MemoryStore::new();
        let store = BookmarkStore::new(kv).with_key("@other");
        store.add(&article("a")).unwrap();

        assert!(store.store.get(BOOKMARKS_KEY).unwrap().is_none());
        assert!(store.store.get("@other").unwrap().is_some());
    }
}
