// What each screen asks for: the cyber home feed, discover topics, trending, search
use tracing::{debug, info};

use crate::{
    classifier::{dedup_by_url, filter_for_display, with_images},
    config::{Config, FeedConfig},
    models::{Article, NewsCategory, NewsResult},
    source::NewsSource,
    Error, Result,
};

/// Query behind the home feed
pub const HOME_QUERY: &str = "cybersecurity";
const TRENDING_QUERY: &str = "trending technology";

/// Topics on the discover screen
///
/// `All` shows technology headlines; the others are free-text searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoverTopic {
    #[default]
    All,
    Cybersecurity,
    Ai,
    Blockchain,
    Privacy,
    Cloud,
}

impl DiscoverTopic {
    /// The id doubles as the search query for non-`All` topics
    pub fn id(&self) -> &'static str {
        match self {
            DiscoverTopic::All => "all",
            DiscoverTopic::Cybersecurity => "cybersecurity",
            DiscoverTopic::Ai => "ai",
            DiscoverTopic::Blockchain => "blockchain",
            DiscoverTopic::Privacy => "privacy",
            DiscoverTopic::Cloud => "cloud",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscoverTopic::All => "All",
            DiscoverTopic::Cybersecurity => "Cyber",
            DiscoverTopic::Ai => "AI",
            DiscoverTopic::Blockchain => "Blockchain",
            DiscoverTopic::Privacy => "Privacy",
            DiscoverTopic::Cloud => "Cloud",
        }
    }

    pub fn all() -> Vec<DiscoverTopic> {
        vec![
            DiscoverTopic::All,
            DiscoverTopic::Cybersecurity,
            DiscoverTopic::Ai,
            DiscoverTopic::Blockchain,
            DiscoverTopic::Privacy,
            DiscoverTopic::Cloud,
        ]
    }

    /// Accepts either the id or the label, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(name) || t.label().eq_ignore_ascii_case(name))
    }
}

/// Canned queries offered as one-tap searches
pub fn popular_searches() -> Vec<&'static str> {
    vec![
        "Zero-day exploits",
        "Data breaches",
        "Ransomware",
        "IoT security",
        "Quantum computing",
        "5G security",
    ]
}

/// Feed service shared by all screens
///
/// Holds no UI state: every call fetches, filters and returns. Overlapping
/// calls are not deduplicated; whoever renders the result last wins.
pub struct NewsFeed<S: NewsSource> {
    source: S,
    settings: FeedConfig,
    country: String,
}

impl<S: NewsSource> NewsFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            settings: FeedConfig::default(),
            country: cybernews_api::country::US.to_string(),
        }
    }

    pub fn with_config(source: S, config: &Config) -> Self {
        Self {
            source,
            settings: config.feed.clone(),
            country: config.news_api.country.clone(),
        }
    }

    pub fn settings(&self) -> &FeedConfig {
        &self.settings
    }

    /// Cyber stories with images, newest first as the source sorted them
    pub async fn home(&self) -> NewsResult {
        info!("Loading home feed");
        let result = self.source.search(HOME_QUERY).await;

        result.map_articles(|articles| {
            let fetched = articles.len();
            let shown = filter_for_display(
                dedup_by_url(articles),
                &self.settings.keywords,
                self.settings.home_limit,
            );
            debug!("Home feed kept {} of {} articles", shown.len(), fetched);
            shown
        })
    }

    pub async fn discover(&self, topic: DiscoverTopic) -> NewsResult {
        info!("Loading discover topic '{}'", topic.id());
        let result = match topic {
            DiscoverTopic::All => {
                self.source
                    .top_headlines(&self.country, Some(NewsCategory::Technology))
                    .await
            }
            other => self.source.search(other.id()).await,
        };

        let limit = self.settings.discover_limit;
        result.map_articles(|articles| with_images(dedup_by_url(articles), Some(limit)))
    }

    /// A handful of stories for the trending strip, images not required
    pub async fn trending(&self) -> NewsResult {
        let limit = self.settings.trending_limit;
        self.source
            .search(TRENDING_QUERY)
            .await
            .map_articles(|articles| dedup_by_url(articles).into_iter().take(limit).collect())
    }

    /// User-typed search; a blank query doesn't hit the network
    pub async fn search(&self, query: &str) -> NewsResult {
        let query = query.trim();
        if query.is_empty() {
            return NewsResult::Success {
                articles: Vec::new(),
                total_results: 0,
            };
        }

        info!("Searching for: {}", query);
        self.source
            .search(query)
            .await
            .map_articles(|articles| with_images(dedup_by_url(articles), None))
    }

    /// Look up one article by URL among the raw results for `query`
    pub async fn find(&self, query: &str, url: &str) -> Result<Article> {
        let (articles, _) = self
            .source
            .search(query)
            .await
            .into_result()
            .map_err(Error::ApiError)?;

        articles
            .into_iter()
            .find(|a| a.url == url)
            .ok_or_else(|| Error::NotFound(url.to_string()))
    }
}
