//! Primary/fallback orchestration
//!
//! The handler only ever sees [`DoctorSearcher`]; the production
//! implementation runs the primary strategy profile and substitutes the
//! fallback profile exactly once on any attempt error. There is no retry
//! loop, backoff, or circuit breaker beyond that single substitution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::scrape::strategies::{StrategyProfile, FALLBACK, PRIMARY};
use crate::scrape::types::{DoctorRecord, SearchCriteria};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to create browser session: {0}")]
    Session(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Navigation timed out after {0:?}")]
    NavigationTimeout(Duration),

    #[error("No form surface matched any candidate selector")]
    FormNotFound,

    #[error("Automation error: {0}")]
    Automation(String),

    #[error("Both scrape attempts failed (primary: {primary}; fallback: {fallback})")]
    AllAttemptsFailed {
        primary: Box<ScrapeError>,
        fallback: Box<ScrapeError>,
    },
}

/// One attempt with one strategy profile. Seam between the orchestration
/// and the browser, so the fallback policy is testable without Chrome.
#[async_trait]
pub trait ScrapeAttempt: Send + Sync {
    async fn run(
        &self,
        criteria: &SearchCriteria,
        profile: &StrategyProfile,
    ) -> Result<Vec<DoctorRecord>, ScrapeError>;
}

/// What the HTTP layer consumes.
#[async_trait]
pub trait DoctorSearcher: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<DoctorRecord>, ScrapeError>;
}

/// Runs the primary profile, then the fallback profile at most once.
pub struct RegistrySearcher {
    attempt: Arc<dyn ScrapeAttempt>,
}

impl RegistrySearcher {
    pub fn new(attempt: Arc<dyn ScrapeAttempt>) -> Self {
        Self { attempt }
    }
}

#[async_trait]
impl DoctorSearcher for RegistrySearcher {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<DoctorRecord>, ScrapeError> {
        match self.attempt.run(criteria, &PRIMARY).await {
            Ok(records) => {
                // Zero records is a valid outcome; the fallback only covers
                // attempt errors, never thin results.
                info!("Primary attempt returned {} record(s)", records.len());
                Ok(records)
            }
            Err(primary) => {
                warn!("Primary attempt failed ({}), trying fallback", primary);
                match self.attempt.run(criteria, &FALLBACK).await {
                    Ok(records) => {
                        info!("Fallback attempt returned {} record(s)", records.len());
                        Ok(records)
                    }
                    Err(fallback) => Err(ScrapeError::AllAttemptsFailed {
                        primary: Box::new(primary),
                        fallback: Box::new(fallback),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted attempt runner: pops one outcome per invocation and records
    /// which profile each invocation used.
    struct ScriptedAttempt {
        outcomes: Mutex<Vec<Result<Vec<DoctorRecord>, ScrapeError>>>,
        calls: AtomicUsize,
        profiles_seen: Mutex<Vec<&'static str>>,
    }

    impl ScriptedAttempt {
        fn new(outcomes: Vec<Result<Vec<DoctorRecord>, ScrapeError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
                profiles_seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ScrapeAttempt for ScriptedAttempt {
        async fn run(
            &self,
            _criteria: &SearchCriteria,
            profile: &StrategyProfile,
        ) -> Result<Vec<DoctorRecord>, ScrapeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.profiles_seen.lock().unwrap().push(profile.name);
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn record(name: &str) -> DoctorRecord {
        DoctorRecord {
            first_name: name.to_string(),
            raw_data: format!("{name} fixture block"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn successful_primary_never_invokes_fallback() {
        let attempt = ScriptedAttempt::new(vec![Ok(vec![record("Jane")])]);
        let searcher = RegistrySearcher::new(attempt.clone());

        let records = searcher.search(&SearchCriteria::default()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(attempt.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*attempt.profiles_seen.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn empty_primary_result_is_success_not_fallback_trigger() {
        let attempt = ScriptedAttempt::new(vec![Ok(Vec::new())]);
        let searcher = RegistrySearcher::new(attempt.clone());

        let records = searcher.search(&SearchCriteria::default()).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(attempt.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_primary_triggers_fallback_exactly_once() {
        let attempt = ScriptedAttempt::new(vec![
            Err(ScrapeError::FormNotFound),
            Ok(vec![record("Omar")]),
        ]);
        let searcher = RegistrySearcher::new(attempt.clone());

        let records = searcher.search(&SearchCriteria::default()).await.unwrap();
        assert_eq!(records[0].first_name, "Omar");
        assert_eq!(attempt.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            *attempt.profiles_seen.lock().unwrap(),
            vec!["primary", "fallback"]
        );
    }

    #[tokio::test]
    async fn both_failures_surface_as_all_attempts_failed() {
        let attempt = ScriptedAttempt::new(vec![
            Err(ScrapeError::NavigationTimeout(Duration::from_secs(30))),
            Err(ScrapeError::Automation("submit rejected".into())),
        ]);
        let searcher = RegistrySearcher::new(attempt.clone());

        let err = searcher.search(&SearchCriteria::default()).await.unwrap_err();
        assert_eq!(attempt.calls.load(Ordering::SeqCst), 2);
        match err {
            ScrapeError::AllAttemptsFailed { primary, fallback } => {
                assert!(matches!(*primary, ScrapeError::NavigationTimeout(_)));
                assert!(matches!(*fallback, ScrapeError::Automation(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
