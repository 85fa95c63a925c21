use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use cybernews_core::{
    display,
    feed::{popular_searches, HOME_QUERY},
    Article, ArticleDetail, BookmarkStore, Config, DiscoverTopic, NewsApiProvider, NewsCategory,
    NewsFeed, NewsResult, NewsSource,
};
use cybernews_storage::{KeyValueStore, SqliteStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cybernews")]
#[command(version, about = "Cybersecurity news reader with offline bookmarks", long_about = None)]
struct Cli {
    /// newsapi.org API key
    #[arg(long, env = "NEWS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Bookmark database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Latest cybersecurity stories
    Home,
    /// Top headlines
    Headlines {
        /// Country code (us, gb, ca, ma)
        #[arg(long)]
        country: Option<String>,
        /// general, business, entertainment, health, science, sports, technology
        #[arg(long)]
        category: Option<String>,
    },
    /// Search all articles
    Search {
        /// Search query
        query: String,
    },
    /// Browse a topic: all, cyber, ai, blockchain, privacy, cloud
    Discover {
        #[arg(long, default_value = "all")]
        topic: String,
    },
    /// What's trending in tech
    Trending,
    /// Show one article in full, from bookmarks or a search
    Show {
        /// Article URL
        url: String,
        /// Search used to find the article if it isn't saved
        #[arg(long, default_value = HOME_QUERY)]
        query: String,
    },
    /// Manage saved articles
    Bookmarks {
        #[command(subcommand)]
        action: Option<BookmarkCommand>,
    },
}

#[derive(clap::Subcommand)]
enum BookmarkCommand {
    /// List saved articles, newest first
    List,
    /// Save an article found by a search
    Add {
        /// Article URL
        url: String,
        /// Search used to find the article
        #[arg(long, default_value = HOME_QUERY)]
        query: String,
    },
    /// Remove a saved article
    Remove {
        /// Article URL
        url: String,
    },
    /// Save an article, or remove it if already saved
    Toggle {
        /// Article URL
        url: String,
        /// Search used to find the article if it isn't saved
        #[arg(long, default_value = HOME_QUERY)]
        query: String,
    },
    /// Check whether an article is saved
    Check {
        /// Article URL
        url: String,
    },
    /// Remove every saved article
    Clear {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cybernews=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(key) = cli.api_key {
        config.news_api.api_key = Some(key);
    }
    if let Some(db) = cli.db {
        config.storage.path = Some(db);
    }

    match cli.command {
        Some(Commands::Home) => {
            let feed = news_feed(&config)?;
            print_articles(feed.home().await)?;
        }
        Some(Commands::Headlines { country, category }) => {
            let category = category
                .map(|name| {
                    NewsCategory::parse(&name)
                        .with_context(|| format!("Unknown category '{}'", name))
                })
                .transpose()?;
            let country = country.unwrap_or_else(|| config.news_api.country.clone());

            tracing::info!("Fetching {} headlines", country);
            let provider = NewsApiProvider::from_config(&config.news_api)?;
            print_articles(provider.top_headlines(&country, category).await)?;
        }
        Some(Commands::Search { query }) => {
            let feed = news_feed(&config)?;
            print_articles(feed.search(&query).await)?;
        }
        Some(Commands::Discover { topic }) => {
            let topic = DiscoverTopic::parse(&topic).with_context(|| {
                let known: Vec<_> = DiscoverTopic::all().iter().map(|t| t.id()).collect();
                format!("Unknown topic '{}'. Try one of: {}", topic, known.join(", "))
            })?;
            let feed = news_feed(&config)?;
            print_articles(feed.discover(topic).await)?;
            println!("\nPopular searches: {}", popular_searches().join(" | "));
        }
        Some(Commands::Trending) => {
            let feed = news_feed(&config)?;
            print_articles(feed.trending().await)?;
        }
        Some(Commands::Show { url, query }) => {
            let store = BookmarkStore::open(&config.storage)?;
            let article = resolve_article(&config, &store, &query, &url).await?;
            print_detail(&ArticleDetail::open(article, &store)?);
        }
        Some(Commands::Bookmarks { action }) => {
            run_bookmarks(&config, action.unwrap_or(BookmarkCommand::List)).await?;
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

fn news_feed(config: &Config) -> anyhow::Result<NewsFeed<NewsApiProvider>> {
    let provider = NewsApiProvider::from_config(&config.news_api)?;
    Ok(NewsFeed::with_config(provider, config))
}

async fn run_bookmarks(config: &Config, action: BookmarkCommand) -> anyhow::Result<()> {
    let store = BookmarkStore::open(&config.storage)?;

    match action {
        BookmarkCommand::List => {
            let bookmarks = store.list()?;
            if bookmarks.is_empty() {
                println!("No bookmarks yet. Save articles with `cybernews bookmarks add <url>`.");
                return Ok(());
            }

            println!("{} saved articles\n", bookmarks.len());
            for (i, bookmark) in bookmarks.iter().enumerate() {
                println!("{:>3}. {}", i + 1, display::headline_line(&bookmark.article));
                println!("     {} - {}", display::saved_label(bookmark), bookmark.url());
            }
        }
        BookmarkCommand::Add { url, query } => {
            let article = news_feed(config)?
                .find(&query, &url)
                .await
                .with_context(|| format!("'{}' was not in the results for \"{}\"", url, query))?;

            if store.add(&article)? {
                println!("Saved: {}", display::headline_line(&article));
            } else {
                println!("Already saved: {}", url);
            }
        }
        BookmarkCommand::Remove { url } => {
            if store.remove(&url).context("Failed to update bookmark")? {
                println!("Removed {}", url);
            } else {
                println!("Not bookmarked: {}", url);
            }
        }
        BookmarkCommand::Toggle { url, query } => {
            let article = resolve_article(config, &store, &query, &url).await?;
            let mut detail = ArticleDetail::open(article, &store)?;

            if detail.toggle_bookmark().context("Failed to update bookmark")? {
                println!("Saved: {}", display::headline_line(detail.article()));
            } else {
                println!("Removed {}", url);
            }
        }
        BookmarkCommand::Check { url } => {
            if store.contains(&url)? {
                println!("Bookmarked");
            } else {
                println!("Not bookmarked");
            }
        }
        BookmarkCommand::Clear { yes } => {
            if !yes {
                anyhow::bail!("This removes every bookmark. Re-run with --yes to confirm.");
            }
            store.clear().context("Failed to clear bookmarks")?;
            println!("All bookmarks removed");
        }
    }

    Ok(())
}

/// Saved copy first so bookmarks work offline, otherwise search for it
async fn resolve_article(
    config: &Config,
    store: &BookmarkStore<SqliteStore>,
    query: &str,
    url: &str,
) -> anyhow::Result<Article> {
    if let Some(bookmark) = store.get(url)? {
        return Ok(bookmark.article);
    }

    news_feed(config)?
        .find(query, url)
        .await
        .with_context(|| format!("'{}' was not in the results for \"{}\"", url, query))
}

fn print_detail<S: KeyValueStore>(detail: &ArticleDetail<'_, S>) {
    let article = detail.article();
    let title = article.title_or_empty();

    println!("{}", if title.is_empty() { "(untitled)" } else { title });
    println!("{} | {}", article.source_label(), display::published_label(article));
    if let Some(byline) = detail.byline() {
        println!("{}", byline);
    }
    println!("Image: {}", detail.image());
    println!(
        "{}",
        if detail.is_bookmarked() { "Bookmarked" } else { "Not bookmarked" }
    );

    if let Some(description) = article.description.as_deref() {
        println!("\n{}", description);
    }
    if let Some(body) = detail.body() {
        println!("\n{}", body);
    }

    println!("\nRead the full article: {}", article.url);
    println!("\nShare:\n{}", detail.share_text());
}

fn print_articles(result: NewsResult) -> anyhow::Result<()> {
    match result {
        NewsResult::Success {
            articles,
            total_results,
        } => {
            if articles.is_empty() {
                println!("No articles found. Run the command again to refresh.");
                return Ok(());
            }

            let now = Utc::now();
            println!("Showing {} of {} results\n", articles.len(), total_results);
            for (i, article) in articles.iter().enumerate() {
                let ago = display::published_ago(article, now).unwrap_or_default();
                println!("{:>3}. {}  {}", i + 1, display::headline_line(article), ago);
                println!("     {}", article.url);
            }
            Ok(())
        }
        NewsResult::Failure { reason } => {
            anyhow::bail!("{}\nRun the command again to retry.", reason)
        }
    }
}
