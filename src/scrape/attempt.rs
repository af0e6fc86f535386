//! One end-to-end scrape attempt against the registry
//!
//! Drives a fresh headless session through navigate → locate form → fill →
//! submit → settle → extract, parameterized by a [`StrategyProfile`] so the
//! primary and fallback variants share this single routine. The session is
//! released on every exit path: the lease's drop tears down Chrome even
//! when the attempt future is cancelled mid-flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::{Page, ScreenshotParams};
use tracing::{debug, info, warn};

use crate::diagnostics::{SnapshotCheckpoint, SnapshotSink};
use crate::scrape::extract::{first_qualifying, records_from_blocks};
use crate::scrape::searcher::{ScrapeAttempt, ScrapeError};
use crate::scrape::strategies::{ControlKind, FieldStrategy, StrategyProfile};
use crate::scrape::types::{DoctorRecord, SearchCriteria};
use crate::session::SessionGate;

/// The registry's advanced-search page. Third-party and unversioned; any
/// structural change degrades extraction silently.
pub const TARGET_URL: &str = "https://register.cpso.on.ca/Advanced-Search/";

/// Bound on initial navigation, matching the page's worst observed loads.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Ceiling on the post-load form poll. The page renders its form via
/// script a beat after the load event.
const FORM_WAIT: Duration = Duration::from_secs(3);

/// Ceiling on the post-submission settle poll. Polling for the first
/// qualifying result block replaces a fixed sleep of the same length.
const SETTLE_CEILING: Duration = Duration::from_secs(5);

/// Production attempt runner: real browser sessions behind the gate.
pub struct BrowserAttempt {
    gate: SessionGate,
    sink: Arc<dyn SnapshotSink>,
}

impl BrowserAttempt {
    pub fn new(gate: SessionGate, sink: Arc<dyn SnapshotSink>) -> Self {
        Self { gate, sink }
    }

    async fn drive(
        &self,
        page: &Page,
        criteria: &SearchCriteria,
        profile: &StrategyProfile,
    ) -> Result<Vec<DoctorRecord>, ScrapeError> {
        info!("Navigating to {} ({} profile)", TARGET_URL, profile.name);
        tokio::time::timeout(NAVIGATION_TIMEOUT, page.goto(TARGET_URL))
            .await
            .map_err(|_| ScrapeError::NavigationTimeout(NAVIGATION_TIMEOUT))?
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        self.snapshot(page, profile.loaded_checkpoint).await;

        // The form surface has to exist before filling is worth trying;
        // its absence is what routes the handler to the fallback profile.
        let form = poll_first(page, profile.form, FORM_WAIT).await;
        let (form_selector, _) = form.ok_or(ScrapeError::FormNotFound)?;
        debug!("Found form with selector: {}", form_selector);

        for field in profile.fields {
            if let Some(value) = criteria.value_of(field.field) {
                fill_field(page, field, value).await;
            }
        }

        submit(page, profile.submit).await?;

        // Condition-poll for the first qualifying result block instead of
        // sleeping; zero blocks after the ceiling is still a valid outcome.
        let harvest = settle_and_collect(page, profile.results, SETTLE_CEILING).await;

        self.snapshot(page, profile.results_checkpoint).await;

        match harvest {
            Some((selector, blocks)) => {
                info!(
                    "Extracted {} block(s) with selector: {}",
                    blocks.len(),
                    selector
                );
                Ok(records_from_blocks(&blocks))
            }
            None => {
                info!("No result blocks matched any selector ({})", profile.name);
                Ok(Vec::new())
            }
        }
    }

    async fn snapshot(&self, page: &Page, checkpoint: SnapshotCheckpoint) {
        match page.screenshot(ScreenshotParams::builder().build()).await {
            Ok(png) => self.sink.capture(checkpoint, &png),
            Err(e) => warn!("Snapshot {} failed: {}", checkpoint.file_name(), e),
        }
    }
}

#[async_trait]
impl ScrapeAttempt for BrowserAttempt {
    async fn run(
        &self,
        criteria: &SearchCriteria,
        profile: &StrategyProfile,
    ) -> Result<Vec<DoctorRecord>, ScrapeError> {
        let lease = self
            .gate
            .acquire()
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;

        let page = match lease.browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                lease.shutdown().await;
                return Err(ScrapeError::Session(e.to_string()));
            }
        };

        let result = self.drive(&page, criteria, profile).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page: {}", e);
        }
        lease.shutdown().await;
        result
    }
}

/// Poll a selector cascade with backoff until any candidate matches or the
/// ceiling elapses. Returns the winning selector and element.
async fn poll_first(
    page: &Page,
    selectors: &'static [&'static str],
    ceiling: Duration,
) -> Option<(&'static str, Element)> {
    let start = std::time::Instant::now();
    let mut interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        for &selector in selectors {
            if let Ok(element) = page.find_element(selector).await {
                return Some((selector, element));
            }
        }
        if start.elapsed() >= ceiling {
            return None;
        }
        tokio::time::sleep(interval).await;
        interval = (interval * 2).min(max_interval);
    }
}

/// Write one criteria value through the field's candidate cascade. A field
/// with no matching candidate, or one that rejects the write, is skipped
/// with a diagnostic note; it never fails the attempt.
async fn fill_field(page: &Page, field: &FieldStrategy, value: &str) {
    for &selector in field.selectors {
        let element = match page.find_element(selector).await {
            Ok(el) => el,
            Err(_) => continue,
        };
        match write_value(page, &element, field.control, value).await {
            Ok(()) => {
                debug!("Filled {} with selector: {}", field.field.as_str(), selector);
                return;
            }
            Err(e) => {
                debug!(
                    "Could not fill {} with selector {}: {}",
                    field.field.as_str(),
                    selector,
                    e
                );
            }
        }
    }
    debug!("No candidate matched for field {}", field.field.as_str());
}

async fn write_value(
    page: &Page,
    element: &Element,
    control: ControlKind,
    value: &str,
) -> anyhow::Result<()> {
    match control {
        ControlKind::Text => {
            element.scroll_into_view().await?;
            // Click to focus; typing into an unfocused input is dropped.
            let point = element.clickable_point().await?;
            page.click(point).await?;
            element
                .call_js_fn("function() { this.value = ''; }", false)
                .await?;
            element.type_str(value).await?;
        }
        ControlKind::Select => {
            // Native selects ignore synthetic keystrokes; set the value and
            // fire change so the page's listeners see it.
            let js = format!(
                "function() {{ this.value = {}; \
                 this.dispatchEvent(new Event('change', {{ bubbles: true }})); }}",
                serde_json::to_string(value)?
            );
            element.call_js_fn(&js, false).await?;
        }
    }
    Ok(())
}

/// Click the first matching submit control; if the whole cascade misses,
/// fall back to submitting the first form directly.
async fn submit(page: &Page, selectors: &'static [&'static str]) -> Result<(), ScrapeError> {
    for &selector in selectors {
        let element = match page.find_element(selector).await {
            Ok(el) => el,
            Err(_) => continue,
        };
        let clicked = async {
            element.scroll_into_view().await?;
            let point = element.clickable_point().await?;
            page.click(point).await?;
            anyhow::Ok(())
        }
        .await;
        match clicked {
            Ok(()) => {
                debug!("Clicked submit with selector: {}", selector);
                return Ok(());
            }
            Err(e) => debug!("Could not click submit with selector {}: {}", selector, e),
        }
    }

    debug!("No submit control matched, submitting form directly");
    page.evaluate("(() => { const f = document.querySelector('form'); if (f) f.submit(); })()")
        .await
        .map_err(|e| ScrapeError::Automation(format!("direct form submission failed: {e}")))?;
    Ok(())
}

/// Poll the result cascade until some selector yields a qualifying block or
/// the ceiling elapses, then return that selector's qualifying blocks.
async fn settle_and_collect(
    page: &Page,
    selectors: &'static [&'static str],
    ceiling: Duration,
) -> Option<(&'static str, Vec<String>)> {
    let start = std::time::Instant::now();
    let mut interval = Duration::from_millis(250);
    let max_interval = Duration::from_secs(1);

    loop {
        let mut sets: Vec<(&'static str, Vec<String>)> = Vec::with_capacity(selectors.len());
        for &selector in selectors {
            sets.push((selector, element_texts(page, selector).await));
        }
        if let Some(hit) = first_qualifying(sets) {
            return Some(hit);
        }
        if start.elapsed() >= ceiling {
            return None;
        }
        tokio::time::sleep(interval).await;
        interval = (interval * 2).min(max_interval);
    }
}

async fn element_texts(page: &Page, selector: &str) -> Vec<String> {
    let elements = match page.find_elements(selector).await {
        Ok(els) => els,
        Err(_) => return Vec::new(),
    };
    let mut texts = Vec::with_capacity(elements.len());
    for element in elements {
        if let Ok(Some(text)) = element.inner_text().await {
            texts.push(text);
        }
    }
    texts
}
