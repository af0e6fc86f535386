//! Bounded gate over concurrent browser sessions
//!
//! Every scrape attempt launches a full Chrome process, so unbounded
//! concurrent requests would exhaust memory. The gate hands out permits
//! from a semaphore; an attempt holds its permit for the session's whole
//! lifetime. Sessions are per-attempt and never shared or reused.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use crate::browser::SessionBrowser;

pub struct SessionGate {
    permits: Arc<Semaphore>,
    headless: bool,
    next_id: AtomicU64,
}

/// A launched browser session plus the permit keeping the gate honest.
/// Dropping it releases both the Chrome process and the permit.
pub struct SessionLease {
    pub browser: SessionBrowser,
    _permit: OwnedSemaphorePermit,
}

impl SessionLease {
    /// Graceful teardown; the permit is released once the browser is gone.
    pub async fn shutdown(self) {
        let SessionLease { browser, _permit } = self;
        browser.shutdown().await;
    }
}

impl SessionGate {
    pub fn new(max_sessions: usize, headless: bool) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_sessions.max(1))),
            headless,
            next_id: AtomicU64::new(0),
        }
    }

    /// Wait for a permit, then launch an isolated browser for one attempt.
    pub async fn acquire(&self) -> Result<SessionLease> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .context("Session gate closed")?;

        let session_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("Session permit acquired (id {})", session_id);

        let browser = SessionBrowser::launch(self.headless, session_id).await?;
        Ok(SessionLease {
            browser,
            _permit: permit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gate_width_never_drops_below_one() {
        let gate = SessionGate::new(0, true);
        assert_eq!(gate.permits.available_permits(), 1);
    }
}
