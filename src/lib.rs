//! Physician registry search over headless-browser automation
//!
//! Drives a headless Chromium session against the CPSO advanced-search page
//! with cascades of candidate CSS selectors, heuristically splits the
//! harvested result text into records, and serves the routine behind a
//! small JSON API. The selector heuristics are best-effort by nature: the
//! target page is third-party, and a zero-result success is
//! indistinguishable from a silent structural change.

pub mod browser;
pub mod browser_setup;
pub mod diagnostics;
pub mod scrape;
pub mod server;
pub mod session;
pub mod specialties;

use std::path::PathBuf;

pub use scrape::{DoctorRecord, DoctorSearcher, RegistrySearcher, ScrapeError, SearchCriteria};
pub use session::SessionGate;

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port for the JSON API.
    pub port: u16,
    /// Run Chrome headless. Turn off only when debugging locally.
    pub headless: bool,
    /// Cap on concurrent browser sessions; each one is a Chrome process.
    pub max_sessions: usize,
    /// Directory the diagnostic snapshots are written into.
    pub snapshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            headless: true,
            max_sessions: 2,
            snapshot_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read configuration from `PORT`, `HEADLESS`, `MAX_SESSIONS`, and
    /// `SNAPSHOT_DIR`, falling back to defaults for anything unset or
    /// unparseable.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            port: env_parsed("PORT").unwrap_or(defaults.port),
            headless: env_parsed("HEADLESS").unwrap_or(defaults.headless),
            max_sessions: env_parsed("MAX_SESSIONS").unwrap_or(defaults.max_sessions),
            snapshot_dir: std::env::var("SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert!(config.headless);
        assert_eq!(config.max_sessions, 2);
    }
}
