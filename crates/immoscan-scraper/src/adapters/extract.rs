use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use immoscan_core::{ListingCandidate, LocationHint, PriceLocale, SearchTarget};
use scraper::{ElementRef, Html, Selector};

use super::{SiteAdapter, STRUCTURAL_SELECTOR};
use crate::error::ScraperError;
use crate::normalize::{normalize_text, resolve_url, truncate_chars, TITLE_MAX_CHARS};
use crate::parse::{
    extract_location_hint, location_hint_from_query, parse_address, parse_price,
    parse_published_hint, parse_rooms, parse_surface,
};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));
static STRUCTURAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(STRUCTURAL_SELECTOR).expect("valid selector"));

/// Per-page values shared by every listing element.
struct PageContext<'a> {
    base_url: &'a str,
    source_host: &'a str,
    address_selector: Option<&'a Selector>,
    target_hint: Option<&'a LocationHint>,
    query_hint: &'a LocationHint,
    locale: PriceLocale,
}

/// Extract candidates from `html` using `adapter`'s selectors.
///
/// Elements without a usable link are skipped silently; elements that fail
/// extraction are logged and skipped. Neither aborts the page.
pub fn extract_candidates<A: SiteAdapter + ?Sized>(
    adapter: &A,
    html: &str,
    base_url: &str,
    target: &SearchTarget,
    locale: PriceLocale,
) -> Vec<ListingCandidate> {
    let document = Html::parse_document(html);
    let elements = select_listing_elements(adapter, &document);
    let address_selector = adapter.address_selector().and_then(parse_selector);
    let source_host = adapter.source_host(target.url());
    let query_hint = location_hint_from_query(target.url());

    let page = PageContext {
        base_url,
        source_host: &source_host,
        address_selector: address_selector.as_ref(),
        target_hint: target.location_hint(),
        query_hint: &query_hint,
        locale,
    };

    let mut candidates = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        match build_candidate(index, element, &page) {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => {}
            Err(e) => tracing::debug!(host = %source_host, error = %e, "skipping listing element"),
        }
    }

    tracing::debug!(
        host = %source_host,
        url = target.url(),
        count = candidates.len(),
        "extracted candidates"
    );
    candidates
}

fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector)
        .map_err(|e| tracing::warn!(selector, error = ?e, "invalid CSS selector"))
        .ok()
}

fn select_listing_elements<'a, A: SiteAdapter + ?Sized>(
    adapter: &A,
    document: &'a Html,
) -> Vec<ElementRef<'a>> {
    if !adapter.is_structural() {
        if let Some(selector) = parse_selector(adapter.item_selector()) {
            let items: Vec<ElementRef<'a>> = document.select(&selector).collect();
            if !items.is_empty() {
                return collapse_nested(items);
            }
        }
        tracing::debug!(
            host = adapter.host(),
            "site selector matched nothing, using structural fallback"
        );
    }
    collapse_nested(document.select(&STRUCTURAL).collect())
}

/// Reduce overlapping matches to one element per listing.
///
/// A match is a wrapper when the linked matches nested inside it point to at
/// least two distinct hrefs; wrappers are dropped. A match nested inside a
/// non-wrapper match with the same primary href is the same card seen twice
/// and is dropped in favour of the outer one, which carries the full text.
fn collapse_nested(matched: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let hrefs: HashMap<_, Option<&str>> = matched
        .iter()
        .map(|element| (element.id(), primary_href(*element)))
        .collect();

    let mut inner_hrefs: HashMap<_, HashSet<&str>> = HashMap::new();
    for element in &matched {
        let Some(href) = hrefs[&element.id()] else {
            continue;
        };
        for ancestor in element.ancestors() {
            if hrefs.contains_key(&ancestor.id()) {
                inner_hrefs.entry(ancestor.id()).or_default().insert(href);
            }
        }
    }
    let wrappers: HashSet<_> = inner_hrefs
        .into_iter()
        .filter(|(_, inner)| inner.len() >= 2)
        .map(|(id, _)| id)
        .collect();

    matched
        .into_iter()
        .filter(|element| {
            if wrappers.contains(&element.id()) {
                return false;
            }
            let Some(href) = hrefs[&element.id()] else {
                return true;
            };
            !element.ancestors().any(|ancestor| {
                !wrappers.contains(&ancestor.id())
                    && hrefs.get(&ancestor.id()).copied().flatten() == Some(href)
            })
        })
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<Vec<_>>().join(" "))
}

fn primary_href(element: ElementRef<'_>) -> Option<&str> {
    let link = if element.value().name() == "a" {
        Some(element)
    } else {
        element.select(&LINK_SELECTOR).next()
    };
    link.and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
}

fn build_candidate(
    index: usize,
    element: ElementRef<'_>,
    page: &PageContext<'_>,
) -> Result<Option<ListingCandidate>, ScraperError> {
    let Some(href) = primary_href(element) else {
        return Ok(None);
    };

    let url = resolve_url(href, page.base_url);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ScraperError::Extraction {
            index,
            reason: format!("link '{url}' is not an http(s) URL"),
        });
    }

    let text = element_text(element);
    if text.is_empty() {
        return Err(ScraperError::Extraction {
            index,
            reason: format!("listing {url} has no visible text"),
        });
    }

    let price_numeric = parse_price(&text);
    let mut candidate = ListingCandidate {
        url,
        title: truncate_chars(&text, TITLE_MAX_CHARS),
        price_numeric,
        price_display: price_numeric.map(|p| page.locale.format_price(p)),
        rooms: parse_rooms(&text),
        surface: parse_surface(&text),
        commune: None,
        postal_code: None,
        source_host: page.source_host.to_owned(),
        published_hint: parse_published_hint(&text),
    };

    // Strongest signal first; later hints only fill what is still missing.
    if let Some(address) = page
        .address_selector
        .and_then(|selector| element.select(selector).next())
    {
        candidate.apply_location(&parse_address(&element_text(address)));
    }
    candidate.apply_location(&extract_location_hint(&text));
    if let Some(hint) = page.target_hint {
        candidate.apply_location(hint);
    }
    candidate.apply_location(page.query_hint);

    Ok(Some(candidate))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
