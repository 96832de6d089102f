use std::fmt;
use std::str::FromStr;

/// Acceptance criteria applied to every candidate. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Lower-cased property-type keywords; a candidate must mention one.
    pub property_keywords: Vec<String>,
    pub min_rooms: u32,
    pub max_budget: u64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            property_keywords: vec!["maison".to_owned(), "villa".to_owned()],
            min_rooms: 4,
            max_budget: 1200,
        }
    }
}

impl FilterCriteria {
    /// The keyword used when a search template needs a property type.
    #[must_use]
    pub fn primary_property_type(&self) -> &str {
        self.property_keywords
            .first()
            .map_or("maison", String::as_str)
    }
}

/// How the deduplicator derives a candidate's canonical key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Listing URL with query string and fragment stripped.
    #[default]
    UrlIdentity,
    /// Hash of commune, price, surface, rooms and a title prefix.
    ContentFingerprint,
}

impl fmt::Display for DedupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupStrategy::UrlIdentity => write!(f, "url"),
            DedupStrategy::ContentFingerprint => write!(f, "fingerprint"),
        }
    }
}

impl FromStr for DedupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" | "url-identity" => Ok(DedupStrategy::UrlIdentity),
            "fingerprint" | "content-fingerprint" => Ok(DedupStrategy::ContentFingerprint),
            other => Err(format!(
                "unknown dedup strategy '{other}' (expected 'url' or 'fingerprint')"
            )),
        }
    }
}
