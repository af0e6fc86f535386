//! Declarative locator-strategy profiles
//!
//! The registry page is third-party and unversioned, so every lookup is an
//! ordered cascade of candidate CSS selectors: the first one that matches a
//! live element wins. Profiles are plain data so the primary and fallback
//! attempts share one automation routine, and tests can inject their own.

use crate::diagnostics::SnapshotCheckpoint;
use crate::scrape::types::CriteriaField;

/// How a matched form control accepts a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Focus and type into the element.
    Text,
    /// Set `value` and dispatch a `change` event (native `<select>`).
    Select,
}

/// Ordered candidate selectors for one logical criteria field.
#[derive(Debug, Clone, Copy)]
pub struct FieldStrategy {
    pub field: CriteriaField,
    pub control: ControlKind,
    pub selectors: &'static [&'static str],
}

/// One attempt variant: where to find the form, its fields, the submit
/// control, and the result containers. Result selectors are scanned in
/// priority order and the scan stops at the first selector yielding at
/// least one qualifying text block.
#[derive(Debug, Clone, Copy)]
pub struct StrategyProfile {
    pub name: &'static str,
    pub form: &'static [&'static str],
    pub fields: &'static [FieldStrategy],
    pub submit: &'static [&'static str],
    pub results: &'static [&'static str],
    /// Snapshot taken once navigation settles.
    pub loaded_checkpoint: SnapshotCheckpoint,
    /// Snapshot taken after submission, before extraction.
    pub results_checkpoint: SnapshotCheckpoint,
}

/// Primary attempt: id/placeholder guesses against the advanced-search form.
pub const PRIMARY: StrategyProfile = StrategyProfile {
    name: "primary",
    form: &["form", "#searchForm", ".search-form", "[role=\"search\"]"],
    fields: &[
        FieldStrategy {
            field: CriteriaField::FirstName,
            control: ControlKind::Text,
            selectors: &[
                "#FirstName",
                "input[name=\"FirstName\"]",
                "input[placeholder*=\"first\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::LastName,
            control: ControlKind::Text,
            selectors: &[
                "#LastName",
                "input[name=\"LastName\"]",
                "input[placeholder*=\"last\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::City,
            control: ControlKind::Text,
            selectors: &[
                "#City",
                "input[name=\"City\"]",
                "input[placeholder*=\"city\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::PostalCode,
            control: ControlKind::Text,
            selectors: &[
                "#PostalCode",
                "input[name=\"PostalCode\"]",
                "input[placeholder*=\"postal\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::Language,
            control: ControlKind::Text,
            selectors: &[
                "#Language",
                "input[name=\"Language\"]",
                "input[placeholder*=\"language\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::Specialty,
            control: ControlKind::Select,
            selectors: &[
                "#Specialty",
                "select[name=\"Specialty\"]",
                "select[name=\"specialty\"]",
            ],
        },
        FieldStrategy {
            field: CriteriaField::Gender,
            control: ControlKind::Select,
            selectors: &["#Gender", "select[name=\"Gender\"]", "select[name=\"gender\"]"],
        },
    ],
    submit: &[
        "input[type=\"submit\"]",
        "button[type=\"submit\"]",
        ".search-button",
        "#searchButton",
        "input[value*=\"Search\"]",
    ],
    results: &[
        ".doctor-result",
        ".search-result",
        ".physician-card",
        ".result-item",
        "table tr",
        ".listing-item",
        ".doctor-info",
        ".physician-info",
        "[class*=\"doctor\"]",
        "[class*=\"physician\"]",
        "[class*=\"result\"]",
    ],
    loaded_checkpoint: SnapshotCheckpoint::PrimaryLoaded,
    results_checkpoint: SnapshotCheckpoint::PrimaryResults,
};

/// Fallback attempt: broader, noisier candidates. Field lookup leans on
/// `name=` attributes only; result containers include generic list and
/// paragraph elements that the primary profile deliberately avoids.
pub const FALLBACK: StrategyProfile = StrategyProfile {
    name: "fallback",
    form: &["form"],
    fields: &[
        FieldStrategy {
            field: CriteriaField::FirstName,
            control: ControlKind::Text,
            selectors: &["input[name=\"FirstName\"]"],
        },
        FieldStrategy {
            field: CriteriaField::LastName,
            control: ControlKind::Text,
            selectors: &["input[name=\"LastName\"]"],
        },
        FieldStrategy {
            field: CriteriaField::City,
            control: ControlKind::Text,
            selectors: &["input[name=\"City\"]"],
        },
        FieldStrategy {
            field: CriteriaField::PostalCode,
            control: ControlKind::Text,
            selectors: &["input[name=\"PostalCode\"]"],
        },
        FieldStrategy {
            field: CriteriaField::Language,
            control: ControlKind::Text,
            selectors: &["input[name=\"Language\"]"],
        },
        FieldStrategy {
            field: CriteriaField::Specialty,
            control: ControlKind::Select,
            selectors: &["select[name=\"Specialty\"]"],
        },
        FieldStrategy {
            field: CriteriaField::Gender,
            control: ControlKind::Select,
            selectors: &["select[name=\"Gender\"]"],
        },
    ],
    submit: &[
        "input[type=\"submit\"]",
        "button[type=\"submit\"]",
        ".search-button",
    ],
    results: &[
        ".doctor-result",
        ".search-result",
        ".physician-card",
        ".result-item",
        "table tr",
        ".listing-item",
        "div[class*=\"doctor\"]",
        "div[class*=\"physician\"]",
        "div[class*=\"result\"]",
        "li",
        "p",
    ],
    loaded_checkpoint: SnapshotCheckpoint::FallbackLoaded,
    results_checkpoint: SnapshotCheckpoint::FallbackResults,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_profiles_cover_every_criteria_field() {
        for profile in [&PRIMARY, &FALLBACK] {
            let fields: Vec<CriteriaField> = profile.fields.iter().map(|f| f.field).collect();
            for field in [
                CriteriaField::FirstName,
                CriteriaField::LastName,
                CriteriaField::City,
                CriteriaField::PostalCode,
                CriteriaField::Gender,
                CriteriaField::Language,
                CriteriaField::Specialty,
            ] {
                assert!(fields.contains(&field), "{} misses {:?}", profile.name, field);
            }
        }
    }

    #[test]
    fn fallback_result_cascade_includes_generic_elements() {
        assert!(FALLBACK.results.contains(&"li"));
        assert!(FALLBACK.results.contains(&"p"));
        assert!(!PRIMARY.results.contains(&"li"));
    }

    #[test]
    fn profiles_snapshot_to_distinct_checkpoints() {
        assert_ne!(PRIMARY.loaded_checkpoint, FALLBACK.loaded_checkpoint);
        assert_ne!(PRIMARY.results_checkpoint, FALLBACK.results_checkpoint);
    }

    #[test]
    fn select_fields_use_select_control() {
        for profile in [&PRIMARY, &FALLBACK] {
            for f in profile.fields {
                match f.field {
                    CriteriaField::Specialty | CriteriaField::Gender => {
                        assert_eq!(f.control, ControlKind::Select)
                    }
                    _ => assert_eq!(f.control, ControlKind::Text),
                }
            }
        }
    }
}
