//! Acceptance gate applied to every extracted candidate.
//!
//! Permissive on missing data, strict on present-but-out-of-range data: an
//! unknown room count or price never rejects a candidate on its own.

use std::fmt;

use immoscan_core::{FilterCriteria, ListingCandidate};

use crate::parse::is_qualifying_property_type;

/// The first check a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PropertyType,
    TooFewRooms { rooms: u32, min_rooms: u32 },
    OverBudget { price: u64, max_budget: u64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::PropertyType => write!(f, "no qualifying property-type keyword"),
            Rejection::TooFewRooms { rooms, min_rooms } => {
                write!(f, "{rooms} rooms is below the minimum of {min_rooms}")
            }
            Rejection::OverBudget { price, max_budget } => {
                write!(f, "price {price} exceeds the budget of {max_budget}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterPolicy {
    criteria: FilterCriteria,
}

impl FilterPolicy {
    #[must_use]
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Returns the reason `candidate` is rejected, or `None` if it passes
    /// every check.
    #[must_use]
    pub fn evaluate(&self, candidate: &ListingCandidate) -> Option<Rejection> {
        if !is_qualifying_property_type(&candidate.title, &self.criteria.property_keywords) {
            return Some(Rejection::PropertyType);
        }
        if let Some(rooms) = candidate.rooms {
            if rooms < self.criteria.min_rooms {
                return Some(Rejection::TooFewRooms {
                    rooms,
                    min_rooms: self.criteria.min_rooms,
                });
            }
        }
        if let Some(price) = candidate.price_numeric {
            if price > self.criteria.max_budget {
                return Some(Rejection::OverBudget {
                    price,
                    max_budget: self.criteria.max_budget,
                });
            }
        }
        None
    }

    #[must_use]
    pub fn accepts(&self, candidate: &ListingCandidate) -> bool {
        self.evaluate(candidate).is_none()
    }
}
