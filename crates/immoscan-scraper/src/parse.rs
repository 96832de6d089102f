//! Text-to-attribute parsing for listing cards.
//!
//! Every function is total: any input yields either a value or `None`, never
//! a panic and never a fabricated default. Inputs are expected to be
//! normalized with [`crate::normalize::normalize_text`] but raw text with
//! no-break spaces is tolerated.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use immoscan_core::LocationHint;
use regex::Regex;

// A digit run, optionally grouped by thousands, then an optional ",dd"
// decimal tail (not captured), then a euro marker. The leading class keeps
// "T4 850 €" from reading as 4 850.
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\p{L}\d.,])(\d{1,3}(?:[\s.]\d{3})+|\d+)(?:,\d{1,2})?\s*(?:€|eur\b|euros?\b)",
    )
    .expect("valid regex")
});
static TYPOLOGY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[TF]\s?(\d{1,2})\b").expect("valid regex"));
static PIECES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s?pi[eè]ces?\b").expect("valid regex"));
static SURFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s?m(?:²|2\b)").expect("valid regex")
});
static PAREN_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{L}[\p{L}\s'’\-]*?)\s*\((\d{5})\)").expect("valid regex")
});
static PREPOSITION_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)[àÀ]\s+(\p{Lu}[\p{L}'’\-]*(?:\s+[\p{L}'’\-]+)*)").expect("valid regex")
});
static BARE_POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{5})\b").expect("valid regex"));
static ADDRESS_NAME_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s'’\-]+$").expect("valid regex"));
static PUBLISHED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(aujourd['’]hui|hier|il y a \d+\s*(?:min(?:ute)?s?|h(?:eures?)?|jours?|semaines?|mois)\b|(?:publi[ée]e?s?\s+le\s+)?\d{1,2}/\d{1,2}/\d{4})",
    )
    .expect("valid regex")
});
static RELATIVE_AGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)il y a (\d+)\s*(mois|min|h|jour|semaine)").expect("valid regex")
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("valid regex"));
static QUERY_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d{5})$").expect("valid regex"));

const PLACE_CONNECTORS: [&str; 12] = [
    "de", "du", "des", "la", "le", "les", "sur", "sous", "lès", "lez", "en", "et",
];

/// First euro amount in `text`, grouping spaces removed and cents dropped.
///
/// `"1 150 €"` and `"1 150,00 €"` → `Some(1150)`. Zero and amounts beyond
/// `u64` are `None`.
#[must_use]
pub fn parse_price(text: &str) -> Option<u64> {
    let caps = PRICE_RE.captures(text)?;
    let digits: String = caps
        .get(1)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().ok().filter(|&v| v > 0)
}

/// Room count from a typology code (`T5`, `F3`) or a `"4 pièces"` phrase.
///
/// The typology code takes precedence when both appear.
#[must_use]
pub fn parse_rooms(text: &str) -> Option<u32> {
    TYPOLOGY_RE
        .captures(text)
        .or_else(|| PIECES_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// The first area token (`"120 m²"`, `"85,5m2"`), verbatim.
#[must_use]
pub fn parse_surface(text: &str) -> Option<String> {
    SURFACE_RE.find(text).map(|m| m.as_str().to_owned())
}

/// Case-insensitive substring test against the configured keywords.
#[must_use]
pub fn is_qualifying_property_type(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .any(|k| !k.is_empty() && lower.contains(&k))
}

/// Best-effort commune / postal code guess from free listing text.
///
/// Patterns, first success wins:
/// 1. `"<name> (<5-digit code>)"`: both fields from the match.
/// 2. `"à <Name>"`: commune, plus the first bare 5-digit code if any.
/// 3. a bare 5-digit code anywhere: postal code only.
///
/// No match yields an empty hint.
#[must_use]
pub fn extract_location_hint(text: &str) -> LocationHint {
    for caps in PAREN_LOCATION_RE.captures_iter(text) {
        let (Some(name), Some(code)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(commune) = trailing_place_name(name.as_str()) {
            return LocationHint::new(Some(commune), Some(code.as_str().to_owned()));
        }
    }

    for caps in PREPOSITION_LOCATION_RE.captures_iter(text) {
        if let Some(commune) = caps.get(1).and_then(|m| leading_place_name(m.as_str())) {
            return LocationHint::new(Some(commune), find_bare_postal_code(text));
        }
    }

    LocationHint::new(None, find_bare_postal_code(text))
}

/// Parse the text of a dedicated address element.
///
/// Accepts `"Bouloc (31620)"` or a bare place name such as `"Saint-Jory"`.
#[must_use]
pub fn parse_address(text: &str) -> LocationHint {
    let text = text.trim();
    if let Some(caps) = PAREN_LOCATION_RE.captures(text) {
        let commune = caps.get(1).map(|m| m.as_str().trim().to_owned());
        let code = caps.get(2).map(|m| m.as_str().to_owned());
        return LocationHint::new(commune, code);
    }
    if ADDRESS_NAME_ONLY_RE.is_match(text) {
        return LocationHint::new(Some(text.to_owned()), None);
    }
    LocationHint::default()
}

/// Recency marker such as `"il y a 3 jours"`, `"hier"` or `"12/10/2026"`.
#[must_use]
pub fn parse_published_hint(text: &str) -> Option<String> {
    PUBLISHED_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

/// Calendar date a published hint refers to, relative to `today`.
///
/// Months count as 30 days. Unrecognized hints are `None`.
#[must_use]
pub fn recency_date(hint: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = hint.trim().to_lowercase();

    if lower.starts_with("aujourd") {
        return Some(today);
    }
    if lower.starts_with("hier") {
        return today.checked_sub_days(Days::new(1));
    }
    if let Some(caps) = RELATIVE_AGE_RE.captures(&lower) {
        let amount = caps.get(1)?.as_str().parse::<u64>().ok()?;
        let days = match caps.get(2)?.as_str() {
            "min" | "h" => 0,
            "jour" => amount,
            "semaine" => amount.checked_mul(7)?,
            "mois" => amount.checked_mul(30)?,
            _ => return None,
        };
        return today.checked_sub_days(Days::new(days));
    }
    if let Some(caps) = DATE_RE.captures(&lower) {
        let day = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let year = caps.get(3)?.as_str().parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    None
}

/// Location carried by a search URL whose `q` parameter reads
/// `"<commune> <postal code>"`.
#[must_use]
pub fn location_hint_from_query(url: &str) -> LocationHint {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return LocationHint::default();
    };
    parsed
        .query_pairs()
        .find(|(key, _)| key == "q")
        .and_then(|(_, value)| {
            let caps = QUERY_LOCATION_RE.captures(value.trim())?;
            Some(LocationHint::new(
                caps.get(1).map(|m| m.as_str().trim().to_owned()),
                caps.get(2).map(|m| m.as_str().to_owned()),
            ))
        })
        .unwrap_or_default()
}

fn find_bare_postal_code(text: &str) -> Option<String> {
    BARE_POSTAL_CODE_RE.captures_iter(text).find_map(|caps| {
        let m = caps.get(1)?;
        let rest = text[m.end()..].trim_start();
        let lower_rest = rest.get(..3).unwrap_or(rest).to_lowercase();
        if rest.starts_with('€') || lower_rest.starts_with("eur") {
            return None;
        }
        Some(m.as_str().to_owned())
    })
}

fn is_place_word(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase)
        && word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '’'))
}

// "d'Estrétefonds", "l'Isle"
fn is_elided_place_word(word: &str) -> bool {
    ["d'", "d’", "l'", "l’"].iter().any(|prefix| {
        word.strip_prefix(prefix).is_some_and(|rest| {
            rest.chars().next().is_some_and(char::is_uppercase)
                && rest.chars().all(|c| c.is_alphabetic() || c == '-')
        })
    })
}

fn is_place_connector(word: &str) -> bool {
    PLACE_CONNECTORS.contains(&word.to_lowercase().as_str()) || is_elided_place_word(word)
}

fn join_place_words(words: &[&str]) -> Option<String> {
    let start = words.iter().position(|w| is_place_word(w))?;
    let end = words
        .iter()
        .rposition(|w| is_place_word(w) || is_elided_place_word(w))?;
    Some(words[start..=end].join(" "))
}

/// The capitalized place name closing `raw`, e.g. `"Maison à Bouloc"` → `"Bouloc"`.
fn trailing_place_name(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let keep = words
        .iter()
        .rev()
        .take_while(|w| is_place_word(w) || is_place_connector(w))
        .count();
    join_place_words(&words[words.len() - keep..])
}

/// The capitalized place name opening `raw`, e.g. `"Bouloc jardin"` → `"Bouloc"`.
fn leading_place_name(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let keep = words
        .iter()
        .take_while(|w| is_place_word(w) || is_place_connector(w))
        .count();
    join_place_words(&words[..keep])
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
