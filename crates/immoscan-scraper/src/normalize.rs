//! Text and URL normalization shared by every adapter.

use reqwest::Url;

/// Maximum number of characters kept in a candidate title.
pub const TITLE_MAX_CHARS: usize = 160;

/// Collapse every whitespace run (including no-break spaces) to one space and trim.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, never splitting a char.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].trim_end().to_owned(),
        None => text.to_owned(),
    }
}

/// Resolve `href` against `base`. An href that cannot be resolved is kept
/// verbatim rather than dropped.
#[must_use]
pub fn resolve_url(href: &str, base: &str) -> String {
    let href = href.trim();
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map_or_else(|_| href.to_owned(), |u| u.to_string())
}

/// URL with query string and fragment removed, used as an identity key.
///
/// Falls back to string splitting when `url` does not parse.
#[must_use]
pub fn canonical_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_owned(),
    }
}

/// Lower-cased host with any leading `www.` removed.
///
/// Returns `None` when `url` has no parseable host.
#[must_use]
pub fn host_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_owned())
}
