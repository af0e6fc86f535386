//! Scrape-session lifecycle
//!
//! A `SessionBrowser` owns one Chrome process, its CDP handler task, and
//! its temporary profile directory. The handler MUST be aborted when the
//! session ends or it keeps running after the browser is gone; dropping the
//! wrapper covers that on every exit path, including caller disconnect.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser_setup::launch_session_browser;

pub struct SessionBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    profile_dir: Option<PathBuf>,
}

impl SessionBrowser {
    /// Launch a fresh isolated browser for one scrape attempt.
    pub async fn launch(headless: bool, session_id: u64) -> Result<Self> {
        let (browser, handler, profile_dir) =
            launch_session_browser(headless, session_id).await?;
        Ok(Self {
            browser,
            handler,
            profile_dir: Some(profile_dir),
        })
    }

    /// Open the page the attempt drives. One page per session.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        self.browser
            .new_page(url)
            .await
            .context("Failed to create page")
    }

    /// Graceful teardown: close the browser, wait for the process to fully
    /// exit, then remove the profile directory. Chrome holds file locks
    /// until exit, so the order matters.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("Failed to remove profile dir {}: {}", dir.display(), e);
            }
        }
        // Drop aborts the handler task.
    }
}

impl Drop for SessionBrowser {
    fn drop(&mut self) {
        // Last line of defense when the attempt future is dropped mid-flight
        // (caller disconnect, timeout): abort the handler and let
        // Browser::drop kill the Chrome process. Best-effort profile removal;
        // Chrome may still hold locks for a moment on some platforms.
        self.handler.abort();
        if let Some(dir) = self.profile_dir.take() {
            debug!("Session dropped without shutdown, removing {}", dir.display());
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("Failed to remove profile dir {}: {}", dir.display(), e);
            }
        }
    }
}
