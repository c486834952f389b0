/// Text processing utilities
pub mod text {
    /// Keep at most `max_chars` characters, cutting on a char boundary.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => text[..byte_index].to_string(),
            None => text.to_string(),
        }
    }

    /// Collapse every run of whitespace into one space.
    pub fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Number of `needles` that occur in the already lowercased `haystack`.
    pub fn count_present(haystack: &str, needles: &[&str]) -> usize {
        needles.iter().filter(|needle| haystack.contains(*needle)).count()
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Only absolute http(s) URLs are fetched.
    pub fn is_fetchable(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
            Err(_) => false,
        }
    }

    /// Resolve a feed link against the site it came from. Empty links,
    /// absolute links and links that cannot be joined are returned unchanged.
    pub fn resolve_link(base: &str, link: &str) -> String {
        if link.trim().is_empty() || Url::parse(link).is_ok() {
            return link.to_string();
        }
        Url::parse(base)
            .and_then(|base| base.join(link))
            .map(|resolved| resolved.to_string())
            .unwrap_or_else(|_| link.to_string())
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Duration, Utc};

    /// The instant `hours` before now.
    pub fn hours_ago(hours: u32) -> DateTime<Utc> {
        Utc::now() - Duration::hours(i64::from(hours))
    }

    pub fn days_ago(days: u32) -> DateTime<Utc> {
        Utc::now() - Duration::days(i64::from(days))
    }
}

#[cfg(test)]
mod tests {
    use super::text::*;
    use super::url::resolve_link;

    #[test]
    fn relative_links_resolve_against_the_site() {
        assert_eq!(resolve_link("https://nos.nl", "/artikel/ai"), "https://nos.nl/artikel/ai");
        assert_eq!(
            resolve_link("https://nos.nl", "https://fd.nl/tech/1"),
            "https://fd.nl/tech/1"
        );
        assert_eq!(resolve_link("", "/artikel/ai"), "/artikel/ai");
        assert_eq!(resolve_link("https://nos.nl", ""), "");
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        assert_eq!(truncate_chars("patiënten", 5), "patië");
        assert_eq!(truncate_chars("kort", 5000), "kort");
    }

    #[test]
    fn present_needles_are_counted_once_each() {
        assert_eq!(count_present("succes na succes, maar ook risico", &["succes", "kans", "risico"]), 2);
    }
}
