//! The uniform listing record every site adapter produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One parsed, not-yet-deduplicated rental listing.
///
/// `commune` and `postal_code` are first-writer-wins: once set they are only
/// ever filled through [`ListingCandidate::apply_location`], which never
/// overwrites an existing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCandidate {
    /// Absolute listing URL, query string kept for display.
    pub url: String,
    /// Whitespace-collapsed element text, truncated.
    pub title: String,
    pub price_numeric: Option<u64>,
    /// Locale-formatted rendering of `price_numeric`.
    pub price_display: Option<String>,
    pub rooms: Option<u32>,
    /// Area token as it appeared on the page, e.g. `"120 m²"`.
    pub surface: Option<String>,
    pub commune: Option<String>,
    pub postal_code: Option<String>,
    pub source_host: String,
    /// Free-text recency marker such as `"il y a 2 jours"`.
    pub published_hint: Option<String>,
}

impl ListingCandidate {
    /// Fill missing location fields from `hint`. Fields already set are kept.
    pub fn apply_location(&mut self, hint: &LocationHint) {
        if self.commune.is_none() {
            self.commune.clone_from(&hint.commune);
        }
        if self.postal_code.is_none() {
            self.postal_code.clone_from(&hint.postal_code);
        }
    }
}

/// A commune / postal-code guess, either parsed from listing text or supplied
/// by the search target that produced the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationHint {
    pub commune: Option<String>,
    pub postal_code: Option<String>,
}

impl LocationHint {
    #[must_use]
    pub fn new(commune: Option<String>, postal_code: Option<String>) -> Self {
        Self {
            commune: commune.filter(|c| !c.trim().is_empty()),
            postal_code: postal_code.filter(|c| !c.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commune.is_none() && self.postal_code.is_none()
    }
}

/// Locale used to derive `price_display` from `price_numeric`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceLocale {
    #[default]
    FrFr,
    EnUs,
    DeDe,
}

impl PriceLocale {
    /// Render a euro amount the way the locale's number formatter does.
    ///
    /// `fr-FR` groups with U+202F (narrow no-break space), matching
    /// `Intl.NumberFormat("fr-FR")`.
    #[must_use]
    pub fn format_price(self, amount: u64) -> String {
        match self {
            PriceLocale::FrFr => format!("{} €", group_thousands(amount, '\u{202f}')),
            PriceLocale::EnUs => format!("€{}", group_thousands(amount, ',')),
            PriceLocale::DeDe => format!("{} €", group_thousands(amount, '.')),
        }
    }
}

impl fmt::Display for PriceLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceLocale::FrFr => write!(f, "fr-FR"),
            PriceLocale::EnUs => write!(f, "en-US"),
            PriceLocale::DeDe => write!(f, "de-DE"),
        }
    }
}

impl FromStr for PriceLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fr-fr" | "fr" => Ok(PriceLocale::FrFr),
            "en-us" | "en" => Ok(PriceLocale::EnUs),
            "de-de" | "de" => Ok(PriceLocale::DeDe),
            other => Err(format!("unsupported price locale '{other}'")),
        }
    }
}

fn group_thousands(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
