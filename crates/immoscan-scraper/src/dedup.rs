//! Run-scoped duplicate removal over accepted candidates.

use std::collections::HashSet;

use immoscan_core::{DedupStrategy, ListingCandidate};

use crate::normalize::{canonical_url, normalize_text};

/// Number of title characters that enter a content fingerprint.
const FINGERPRINT_TITLE_CHARS: usize = 40;

/// Derives the key two candidates must share to count as duplicates.
///
/// - [`DedupStrategy::UrlIdentity`]: the URL without query or fragment.
/// - [`DedupStrategy::ContentFingerprint`]: SHA-256 over lower-cased commune,
///   price, surface, rooms and the first 40 title characters.
#[must_use]
pub fn canonical_key(candidate: &ListingCandidate, strategy: DedupStrategy) -> String {
    match strategy {
        DedupStrategy::UrlIdentity => canonical_url(&candidate.url),
        DedupStrategy::ContentFingerprint => content_fingerprint(candidate),
    }
}

fn content_fingerprint(candidate: &ListingCandidate) -> String {
    use sha2::{Digest, Sha256};
    let title_prefix: String = normalize_text(&candidate.title)
        .to_lowercase()
        .chars()
        .take(FINGERPRINT_TITLE_CHARS)
        .collect();
    let input = format!(
        "{}\x00{}\x00{}\x00{}\x00{}",
        candidate.commune.as_deref().unwrap_or("").trim().to_lowercase(),
        candidate
            .price_numeric
            .map(|p| p.to_string())
            .unwrap_or_default(),
        normalize_text(candidate.surface.as_deref().unwrap_or("")).to_lowercase(),
        candidate.rooms.map(|r| r.to_string()).unwrap_or_default(),
        title_prefix,
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// The key index of one run. First occurrence wins.
#[derive(Debug)]
pub struct Deduplicator {
    strategy: DedupStrategy,
    seen: HashSet<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            strategy,
            seen: HashSet::new(),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> DedupStrategy {
        self.strategy
    }

    /// Records `candidate`'s key. Returns `false` if it was already present.
    pub fn insert(&mut self, candidate: &ListingCandidate) -> bool {
        self.seen.insert(canonical_key(candidate, self.strategy))
    }

    /// Keeps the first candidate per key, preserving input order.
    #[must_use]
    pub fn dedupe(mut self, candidates: Vec<ListingCandidate>) -> Vec<ListingCandidate> {
        candidates.into_iter().filter(|c| self.insert(c)).collect()
    }
}

/// Shorthand for a one-shot [`Deduplicator`].
#[must_use]
pub fn dedupe(candidates: Vec<ListingCandidate>, strategy: DedupStrategy) -> Vec<ListingCandidate> {
    Deduplicator::new(strategy).dedupe(candidates)
}
