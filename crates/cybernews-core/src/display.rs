// Formatting helpers shared by every view that renders an article
use chrono::{DateTime, Utc};

use crate::models::{Article, Bookmark};

/// Shown in place of a missing article image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=No+Image";

/// "Jan 15, 2024"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Publish date for display, tolerating unparseable timestamps
pub fn published_label(article: &Article) -> String {
    article
        .published_at()
        .map(format_date)
        .unwrap_or_else(|| "Unknown date".to_string())
}

/// Relative age: "just now", "5m ago", "3h ago", "2d ago"
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - then).num_seconds();

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86400)
    }
}

pub fn published_ago(article: &Article, now: DateTime<Utc>) -> Option<String> {
    article.published_at().map(|then| time_ago(then, now))
}

/// "Saved Jan 15, 2024"
pub fn saved_label(bookmark: &Bookmark) -> String {
    match bookmark.saved_at() {
        Some(date) => format!("Saved {}", format_date(date)),
        None => "Saved".to_string(),
    }
}

/// One-line summary used by list views
pub fn headline_line(article: &Article) -> String {
    let title = article.title_or_empty();
    let title = if title.is_empty() { "(untitled)" } else { title };
    format!("{} - {} ({})", title, article.source_label(), published_label(article))
}

/// Message handed to a share sheet: title, blank line, link
pub fn share_text(article: &Article) -> String {
    format!("{}\n\n{}", article.title_or_empty(), article.url)
}

/// Article body without the API's trailing "[+1234 chars]" truncation marker
pub fn body_text(content: &str) -> &str {
    let trimmed = content.trim_end();
    if let Some(start) = trimmed.rfind("[+") {
        let marker = &trimmed[start + 2..];
        if let Some(digits) = marker.strip_suffix(" chars]") {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return trimmed[..start].trim_end();
            }
        }
    }
    content
}
