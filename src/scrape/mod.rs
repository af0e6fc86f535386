//! Registry scraping: data model, locator strategies, extraction heuristic,
//! and the primary/fallback attempt orchestration.

pub mod attempt;
pub mod extract;
pub mod searcher;
pub mod strategies;
pub mod types;

pub use attempt::{BrowserAttempt, TARGET_URL};
pub use searcher::{DoctorSearcher, RegistrySearcher, ScrapeAttempt, ScrapeError};
pub use strategies::{StrategyProfile, FALLBACK, PRIMARY};
pub use types::{DoctorRecord, SearchCriteria};
