// Decides which fetched articles are worth showing
use std::collections::HashSet;

use crate::models::Article;

/// Default vocabulary for "is this a cyber story?"
pub const CYBER_KEYWORDS: &[&str] = &[
    "cyber",
    "cybersecurity",
    "hacking",
    "hacker",
    "malware",
    "ransomware",
    "data breach",
    "phishing",
    "security breach",
    "vulnerability",
    "exploit",
    "ddos",
    "encryption",
    "firewall",
    "zero-day",
    "botnet",
    "spyware",
    "trojan",
    "virus",
    "infosec",
    "netsec",
    "aptsecurity",
    "threat",
    "attack",
    "password",
    "authentication",
    "vpn",
    "ssl",
    "tls",
];

/// True if any keyword appears in the article's title, description or content
///
/// Plain case-insensitive substring match: "cyber" also hits "cybernetic".
/// Keywords are matched as given, surrounding spaces included. Empty keywords
/// are ignored, so an empty list never matches.
pub fn is_relevant<K: AsRef<str>>(article: &Article, keywords: &[K]) -> bool {
    let text = format!(
        "{} {} {}",
        article.title_or_empty(),
        article.description.as_deref().unwrap_or(""),
        article.content.as_deref().unwrap_or("")
    )
    .to_lowercase();

    keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty())
        .any(|k| text.contains(&k.to_lowercase()))
}

pub fn has_displayable_image(article: &Article) -> bool {
    article.image_url().is_some()
}

/// Articles with an image that match the keywords, in input order, at most `limit`
pub fn filter_for_display<K: AsRef<str>>(
    articles: impl IntoIterator<Item = Article>,
    keywords: &[K],
    limit: usize,
) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| has_displayable_image(a) && is_relevant(a, keywords))
        .take(limit)
        .collect()
}

/// Image filter only, for views that don't care about topic
pub fn with_images(articles: impl IntoIterator<Item = Article>, limit: Option<usize>) -> Vec<Article> {
    articles
        .into_iter()
        .filter(has_displayable_image)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Drop repeated URLs, keeping the first occurrence
pub fn dedup_by_url(articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(url: &str, title: &str) -> Article {
        let mut article = Article::new(url);
        article.title = Some(title.to_string());
        article
    }

    fn with_image(mut article: Article) -> Article {
        article.url_to_image = Some(format!("{}.png", article.url));
        article
    }

    #[test]
    fn test_keyword_in_title() {
        let article = titled("a", "New malware strain found");
        assert!(is_relevant(&article, &["malware"]));

        let article = titled("b", "Sports update");
        assert!(!is_relevant(&article, &["malware"]));
    }

    #[test]
    fn test_empty_keywords_never_match() {
        let article = titled("a", "New malware strain found");
        let none: [&str; 0] = [];
        assert!(!is_relevant(&article, &none));
        assert!(!is_relevant(&article, &[""]));
    }

    #[test]
    fn test_padded_keyword_is_matched_literally() {
        let keywords = [" ai "];
        assert!(!is_relevant(&titled("a", "He said the budget grew"), &keywords));
        assert!(is_relevant(&titled("b", "The AI model leaked"), &keywords));
    }

    #[test]
    fn test_case_insensitive_both_ways() {
        let article = titled("a", "RANSOMWARE hits hospital");
        assert!(is_relevant(&article, &["Ransomware"]));
    }

    #[test]
    fn test_substring_without_word_boundary() {
        let article = titled("a", "Cybernetic implants on the rise");
        assert!(is_relevant(&article, &["cyber"]));
    }

    #[test]
    fn test_description_and_content_count() {
        let mut article = Article::new("a");
        article.description = Some("A phishing campaign".into());
        assert!(is_relevant(&article, &["phishing"]));

        let mut article = Article::new("b");
        article.content = Some("... a data breach at ...".into());
        assert!(is_relevant(&article, &["data breach"]));
    }

    #[test]
    fn test_missing_text_fields_are_empty() {
        let article = Article::new("a");
        assert!(!is_relevant(&article, CYBER_KEYWORDS));
    }

    #[test]
    fn test_keywords_do_not_span_fields() {
        let mut article = titled("a", "data");
        article.description = Some("breach".into());
        // Fields are joined by a space, so "data breach" does match here
        assert!(is_relevant(&article, &["data breach"]));
        // but nothing glues words together
        assert!(!is_relevant(&article, &["databreach"]));
    }

    #[test]
    fn test_filter_requires_image() {
        let no_image = titled("a", "Botnet dismantled");
        let image = with_image(titled("b", "Botnet dismantled"));

        let shown = filter_for_display(vec![no_image, image.clone()], CYBER_KEYWORDS, 10);
        assert_eq!(shown, vec![image]);
    }

    #[test]
    fn test_filter_preserves_order_and_limit() {
        let articles = vec![
            with_image(titled("1", "Zero-day in browser")),
            with_image(titled("2", "Football scores")),
            with_image(titled("3", "VPN provider leak")),
            with_image(titled("4", "Spyware vendor sanctioned")),
        ];

        let shown = filter_for_display(articles, CYBER_KEYWORDS, 2);
        let urls: Vec<_> = shown.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["1", "3"]);
    }

    #[test]
    fn test_with_images() {
        let articles = vec![
            with_image(titled("1", "x")),
            titled("2", "y"),
            with_image(titled("3", "z")),
        ];

        assert_eq!(with_images(articles.clone(), None).len(), 2);
        assert_eq!(with_images(articles, Some(1)).len(), 1);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let articles = vec![
            titled("a", "first"),
            titled("b", "other"),
            titled("a", "second"),
        ];

        let deduped = dedup_by_url(articles);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title_or_empty(), "first");
    }
}
