//! Wire-level data shapes for search requests and extracted records
//!
//! Field names on the wire use the PascalCase names the registry UI and its
//! existing clients expect (`FirstName`, `RawData`, ...).

use serde::{Deserialize, Serialize};

/// Caller-supplied search inputs. Every field is optional; an empty
/// criteria set is valid and simply produces a maximally broad query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    #[serde(rename = "FirstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(rename = "LastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(rename = "City", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "PostalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Open two-value code as offered by the registry form; not validated.
    #[serde(rename = "Gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(rename = "Language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(rename = "Specialty", skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl SearchCriteria {
    /// Value for a logical field, treating empty strings as absent.
    pub fn value_of(&self, field: CriteriaField) -> Option<&str> {
        let v = match field {
            CriteriaField::FirstName => self.first_name.as_deref(),
            CriteriaField::LastName => self.last_name.as_deref(),
            CriteriaField::City => self.city.as_deref(),
            CriteriaField::PostalCode => self.postal_code.as_deref(),
            CriteriaField::Gender => self.gender.as_deref(),
            CriteriaField::Language => self.language.as_deref(),
            CriteriaField::Specialty => self.specialty.as_deref(),
        };
        v.filter(|s| !s.trim().is_empty())
    }
}

/// Logical form fields the automation knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaField {
    FirstName,
    LastName,
    City,
    PostalCode,
    Gender,
    Language,
    Specialty,
}

impl CriteriaField {
    pub fn as_str(self) -> &'static str {
        match self {
            CriteriaField::FirstName => "FirstName",
            CriteriaField::LastName => "LastName",
            CriteriaField::City => "City",
            CriteriaField::PostalCode => "PostalCode",
            CriteriaField::Gender => "Gender",
            CriteriaField::Language => "Language",
            CriteriaField::Specialty => "Specialty",
        }
    }
}

/// One extracted, best-effort result record.
///
/// Only `raw_data` is guaranteed non-empty when a record exists at all.
/// Records are ephemeral: produced per request, never persisted or
/// deduplicated, with no stable identity across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorRecord {
    #[serde(rename = "FirstName")]
    pub first_name: String,

    #[serde(rename = "LastName")]
    pub last_name: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "PostalCode")]
    pub postal_code: String,

    #[serde(rename = "Gender")]
    pub gender: String,

    #[serde(rename = "Language")]
    pub language: String,

    #[serde(rename = "Specialty")]
    pub specialty: String,

    /// Untouched source text of the matched result block.
    #[serde(rename = "RawData")]
    pub raw_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_deserializes_from_any_subset() {
        let c: SearchCriteria =
            serde_json::from_str(r#"{"City":"Ottawa","Specialty":"Family Medicine"}"#).unwrap();
        assert_eq!(c.city.as_deref(), Some("Ottawa"));
        assert_eq!(c.specialty.as_deref(), Some("Family Medicine"));
        assert!(c.first_name.is_none());

        let empty: SearchCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SearchCriteria::default());
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let c = SearchCriteria {
            city: Some("  ".into()),
            last_name: Some("Singh".into()),
            ..Default::default()
        };
        assert_eq!(c.value_of(CriteriaField::City), None);
        assert_eq!(c.value_of(CriteriaField::LastName), Some("Singh"));
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let rec = DoctorRecord {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            raw_data: "Jane Doe\nToronto".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["FirstName"], "Jane");
        assert_eq!(v["RawData"], "Jane Doe\nToronto");
        // Unextracted fields stay present as empty strings, never null.
        assert_eq!(v["City"], "");
    }
}
