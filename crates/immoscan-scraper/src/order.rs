//! Final ordering of a run's candidates.

use std::cmp::Reverse;

use chrono::NaiveDate;
use immoscan_core::ListingCandidate;

use crate::parse::recency_date;

/// Most recent first, then cheapest first.
///
/// Candidates without a parseable recency hint rank below every dated one;
/// candidates without a price rank after every priced one. The sort is
/// stable, so ties keep their crawl order.
pub fn sort_candidates(candidates: &mut [ListingCandidate], today: NaiveDate) {
    candidates.sort_by_cached_key(|c| {
        let recency = c
            .published_hint
            .as_deref()
            .and_then(|hint| recency_date(hint, today));
        (Reverse(recency), c.price_numeric.unwrap_or(u64::MAX))
    });
}
