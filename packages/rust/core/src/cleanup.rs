//! Free-text cleanup passes applied to every sheet cell.
//!
//! Each pass is total: bad input degrades to an empty or shortened string,
//! never to an error.

use url::Url;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Schemes that are kept as-is; anything else gets `https://` in front.
const KNOWN_SCHEMES: &[&str] = &["http://", "https://"];

/// Trim and collapse every whitespace run (newlines included) to one space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn a sheet cell into an absolute http(s) link, or `""` if it can't be one.
///
/// Bare hosts such as `example.com/job` get an `https://` prefix.
pub fn validate_link(raw: &str) -> String {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return String::new();
    }

    let candidate = if has_known_scheme(&cleaned) {
        cleaned
    } else {
        format!("https://{cleaned}")
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => url.to_string(),
        Ok(_) => String::new(),
        Err(e) => {
            tracing::debug!(link = %candidate, error = %e, "dropping invalid link");
            String::new()
        }
    }
}

fn has_known_scheme(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{ELLIPSIS}", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Field\n\nInspector \t II  "), "Field Inspector II");
        assert_eq!(clean_text(" \n "), "");
    }

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(validate_link("example.com/job"), "https://example.com/job");
    }

    #[test]
    fn empty_link_stays_empty() {
        assert_eq!(validate_link(""), "");
        assert_eq!(validate_link("   "), "");
    }

    #[test]
    fn garbage_link_is_dropped() {
        assert_eq!(validate_link("not a url ###"), "");
        assert_eq!(validate_link("#"), "");
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(
            validate_link("HTTP://jobs.example.com/apply?id=7"),
            "http://jobs.example.com/apply?id=7"
        );
        assert_eq!(
            validate_link(" https://example.com/a b "),
            "https://example.com/a%20b"
        );
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate_chars("short", 140), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_chars("abcdef ghij", 7), "abcdef...");
        let long = "x".repeat(200);
        let cut = truncate_chars(&long, 140);
        assert_eq!(cut.chars().count(), 143);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("ééééé", 3), "ééé...");
    }
}
