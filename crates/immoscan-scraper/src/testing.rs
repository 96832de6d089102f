//! Scripted [`RenderContext`] for pipeline tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::render::{NavigationResult, RenderContext};

/// One scripted URL: an HTML fragment per load step.
pub(crate) struct ScriptedSite {
    chunks: Vec<String>,
    paginated: bool,
    fail_navigation: bool,
    fail_actions: bool,
}

impl ScriptedSite {
    /// Further chunks are revealed through a "next page" control.
    pub(crate) fn paginated(chunks: &[&str]) -> Self {
        Self::build(chunks, true)
    }

    /// Further chunks are revealed by scrolling.
    pub(crate) fn scrolling(chunks: &[&str]) -> Self {
        Self::build(chunks, false)
    }

    /// A single static page.
    pub(crate) fn single(html: &str) -> Self {
        Self::build(&[html], false)
    }

    /// Navigation always times out.
    pub(crate) fn unreachable() -> Self {
        Self {
            fail_navigation: true,
            ..Self::build(&[], false)
        }
    }

    /// Click and scroll actions fail.
    pub(crate) fn with_failing_actions(mut self) -> Self {
        self.fail_actions = true;
        self
    }

    fn build(chunks: &[&str], paginated: bool) -> Self {
        Self {
            chunks: chunks.iter().map(|c| (*c).to_owned()).collect(),
            paginated,
            fail_navigation: false,
            fail_actions: false,
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedPage {
    sites: HashMap<String, ScriptedSite>,
    current: Option<String>,
    revealed: usize,
    pub(crate) navigations: Vec<String>,
    pub(crate) settles: Vec<Duration>,
    pub(crate) next_clicks: usize,
    pub(crate) scrolls: usize,
}

impl ScriptedPage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_site(mut self, url: &str, site: ScriptedSite) -> Self {
        self.sites.insert(url.to_owned(), site);
        self
    }

    fn site(&self) -> Option<&ScriptedSite> {
        self.current.as_ref().and_then(|url| self.sites.get(url))
    }
}

#[async_trait]
impl RenderContext for ScriptedPage {
    async fn navigate(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<NavigationResult, ScraperError> {
        self.navigations.push(url.to_owned());
        self.current = None;
        let site = self.sites.get(url).ok_or_else(|| ScraperError::Navigation {
            url: url.to_owned(),
            reason: "no scripted route".to_owned(),
        })?;
        if site.fail_navigation {
            return Err(ScraperError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            });
        }
        self.current = Some(url.to_owned());
        self.revealed = 1;
        Ok(NavigationResult {
            final_url: url.to_owned(),
            status: 200,
            load_time_ms: 0,
        })
    }

    async fn wait_for_selector(&mut self, _selector: &str, _timeout: Duration) -> bool {
        self.site().is_some()
    }

    async fn content(&self) -> Result<String, ScraperError> {
        let site = self.site().ok_or(ScraperError::NoPage)?;
        let shown = site.chunks.iter().take(self.revealed);
        Ok(format!(
            "<html><body>{}</body></html>",
            shown.cloned().collect::<Vec<_>>().join("\n")
        ))
    }

    fn current_url(&self) -> Option<String> {
        self.current.clone()
    }

    async fn has_next_control(&self) -> bool {
        self.site()
            .is_some_and(|s| s.paginated && self.revealed < s.chunks.len())
    }

    async fn click_next(&mut self) -> Result<(), ScraperError> {
        let site = self.site().ok_or(ScraperError::NoPage)?;
        if site.fail_actions {
            return Err(ScraperError::Navigation {
                url: self.current.clone().unwrap_or_default(),
                reason: "scripted click failure".to_owned(),
            });
        }
        if self.revealed < site.chunks.len() {
            self.revealed += 1;
        }
        self.next_clicks += 1;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScraperError> {
        let site = self.site().ok_or(ScraperError::NoPage)?;
        if site.fail_actions {
            return Err(ScraperError::Navigation {
                url: self.current.clone().unwrap_or_default(),
                reason: "scripted scroll failure".to_owned(),
            });
        }
        if !site.paginated && self.revealed < site.chunks.len() {
            self.revealed += 1;
        }
        self.scrolls += 1;
        Ok(())
    }

    async fn growth_signal(&self) -> Result<u64, ScraperError> {
        let len = self.content().await?.len();
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn settle(&mut self, duration: Duration) {
        self.settles.push(duration);
    }
}
