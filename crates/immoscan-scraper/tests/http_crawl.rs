//! End-to-end crawl tests over plain HTTP.
//!
//! Each test stands up a `wiremock` server serving small listing pages, so
//! no real network traffic is made. The mock host is unknown to the adapter
//! registry, which exercises the generic adapter.

use std::time::Duration;

use chrono::NaiveDate;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use immoscan_core::{DedupStrategy, FilterCriteria, PriceLocale, SearchTarget};
use immoscan_scraper::{
    AdapterRegistry, CrawlOrchestrator, CrawlSettings, ExhaustConfig, ExhaustReason,
    ExtractOptions, HttpRenderContext, PageExhauster, RenderContext, ScraperError, TargetStatus,
};

const PAGE_ONE: &str = r#"<!DOCTYPE html>
<html><head><title>Locations</title></head><body>
  <article><a href="/annonce/1">Maison T5 à Bouloc 1 100 €</a></article>
  <article><a href="/annonce/2">Appartement T2 600 €</a></article>
  <nav><a rel="next" href="/annonces/page-2">Suivant</a></nav>
</body></html>"#;

const PAGE_TWO: &str = r#"<!DOCTYPE html>
<html><head><title>Locations - page 2</title></head><body>
  <article><a href="/annonce/3">Villa 5 pièces Fronton (31620) 1 150 € aujourd'hui</a></article>
</body></html>"#;

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

async fn listing_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/annonces"))
        .respond_with(html(PAGE_ONE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/annonces/page-2"))
        .respond_with(html(PAGE_TWO))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

fn test_context() -> HttpRenderContext {
    HttpRenderContext::new("immoscan-test/0.1", "fr-FR", 5).expect("failed to build test context")
}

fn test_settings() -> CrawlSettings {
    CrawlSettings {
        navigation_timeout: Duration::from_secs(5),
        exhaust: ExhaustConfig {
            initial_settle: Duration::ZERO,
            next_settle: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            max_iterations: 10,
        },
        extract: ExtractOptions {
            wait_timeout: Duration::ZERO,
            locale: PriceLocale::FrFr,
        },
        criteria: FilterCriteria::default(),
        dedup_strategy: DedupStrategy::UrlIdentity,
        today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// HttpRenderContext
// ---------------------------------------------------------------------------

#[tokio::test]
async fn navigate_sends_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hdr"))
        .and(header("user-agent", "immoscan-test/0.1"))
        .and(header("accept-language", "fr-FR"))
        .respond_with(html("<p>ok</p>"))
        .mount(&server)
        .await;

    let mut page = test_context();
    let result = page
        .navigate(&format!("{}/hdr", server.uri()), Duration::from_secs(5))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap().status, 200);
}

#[tokio::test]
async fn non_success_status_is_unexpected_status() {
    let server = listing_server().await;
    let mut page = test_context();

    let err = page
        .navigate(&format!("{}/broken", server.uri()), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn slow_page_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>late</p>").set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let mut page = test_context();
    let err = page
        .navigate(&format!("{}/slow", server.uri()), Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::NavigationTimeout { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn exhauster_follows_next_links_until_last_page() {
    let server = listing_server().await;
    let mut page = test_context();
    page.navigate(&format!("{}/annonces", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();

    let mut exhauster = PageExhauster::new(test_settings().exhaust);
    let report = exhauster.run(&mut page).await;

    assert_eq!(report.next_clicks, 1);
    assert_eq!(report.reason, ExhaustReason::NoGrowth);
    assert_eq!(page.page_count(), 2);
    let content = page.content().await.unwrap();
    assert!(content.contains("/annonce/1"));
    assert!(content.contains("/annonce/3"));
}

// ---------------------------------------------------------------------------
// CrawlOrchestrator
// ---------------------------------------------------------------------------

#[tokio::test]
async fn crawl_collects_across_pages_and_skips_broken_target() {
    let server = listing_server().await;
    let targets = vec![
        SearchTarget::Entry {
            url: format!("{}/annonces", server.uri()),
        },
        SearchTarget::Entry {
            url: format!("{}/broken", server.uri()),
        },
    ];
    let orchestrator = CrawlOrchestrator::new(AdapterRegistry::default(), test_settings());
    let mut page = test_context();

    let report = orchestrator.run(&mut page, &targets).await;

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(
        report.outcomes[0].status,
        TargetStatus::Ok {
            extracted: 3,
            accepted: 2
        }
    );
    assert!(matches!(
        report.outcomes[1].status,
        TargetStatus::Failed { .. }
    ));
    assert_eq!(report.outcomes[1].adapter, "generic");

    let urls: Vec<String> = report.candidates.iter().map(|c| c.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/annonce/3", server.uri()),
            format!("{}/annonce/1", server.uri()),
        ]
    );

    let villa = &report.candidates[0];
    assert_eq!(villa.source_host, "127.0.0.1");
    assert_eq!(villa.commune.as_deref(), Some("Fronton"));
    assert_eq!(villa.postal_code.as_deref(), Some("31620"));
    assert_eq!(villa.price_display.as_deref(), Some("1\u{202f}150 €"));
    assert_eq!(villa.rooms, Some(5));
}
