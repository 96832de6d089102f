//! Search targets: the literal entry URLs plus URLs synthesized from the
//! commune catalog against per-source search templates.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::catalog::CommuneCatalog;
use crate::criteria::FilterCriteria;
use crate::listing::LocationHint;

/// One page the orchestrator visits, exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// A URL taken verbatim from the entry list.
    Entry { url: String },
    /// A URL built from a template; it knows the commune it searches.
    Synthesized { url: String, hint: LocationHint },
}

impl SearchTarget {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            SearchTarget::Entry { url } | SearchTarget::Synthesized { url, .. } => url,
        }
    }

    /// Location known from how the target was built, if any.
    #[must_use]
    pub fn location_hint(&self) -> Option<&LocationHint> {
        match self {
            SearchTarget::Entry { .. } => None,
            SearchTarget::Synthesized { hint, .. } => Some(hint),
        }
    }
}

/// A search URL with placeholders.
///
/// Supported placeholders, all percent-encoded on substitution:
/// `{commune}`, `{postal_code}`, `{query}` (`"<commune> <postal_code>"`),
/// `{property_type}`, `{min_rooms}`, `{max_budget}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTemplate {
    pub source: String,
    pub template: String,
}

impl SearchTemplate {
    #[must_use]
    pub fn render(&self, commune: &str, postal_code: &str, criteria: &FilterCriteria) -> String {
        let encode = |value: &str| utf8_percent_encode(value, NON_ALPHANUMERIC).to_string();
        self.template
            .replace("{commune}", &encode(commune))
            .replace("{postal_code}", &encode(postal_code))
            .replace("{query}", &encode(&format!("{commune} {postal_code}")))
            .replace(
                "{property_type}",
                &encode(criteria.primary_property_type()),
            )
            .replace("{min_rooms}", &criteria.min_rooms.to_string())
            .replace("{max_budget}", &criteria.max_budget.to_string())
    }
}

/// Templates used when the run does not supply its own.
#[must_use]
pub fn default_search_templates() -> Vec<SearchTemplate> {
    vec![SearchTemplate {
        source: "entreparticuliers.com".to_owned(),
        template: "https://www.entreparticuliers.com/annonces-immobilieres/location/{property_type}?q={query}&pieces_min={min_rooms}&prix_max={max_budget}".to_owned(),
    }]
}

/// Build the ordered target list: entry URLs first (file order), then one
/// synthesized target per (postal code, commune, template).
///
/// A URL already present earlier in the list is not repeated.
#[must_use]
pub fn build_search_targets(
    entry_urls: &[String],
    catalog: &CommuneCatalog,
    templates: &[SearchTemplate],
    criteria: &FilterCriteria,
) -> Vec<SearchTarget> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for url in entry_urls {
        if seen.insert(url.clone()) {
            targets.push(SearchTarget::Entry { url: url.clone() });
        }
    }

    for (postal_code, communes) in catalog {
        for commune in communes {
            for template in templates {
                let url = template.render(commune, postal_code, criteria);
                if seen.insert(url.clone()) {
                    targets.push(SearchTarget::Synthesized {
                        url,
                        hint: LocationHint::new(Some(commune.clone()), Some(postal_code.clone())),
                    });
                }
            }
        }
    }

    targets
}
