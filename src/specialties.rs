//! The registry's enumerated specialty list
//!
//! Mirrors the options offered by the advanced-search form's specialty
//! selector. The client-side "Other" free-text sentinel is UI-only and
//! deliberately not part of this list.

pub const SPECIALTIES: [&str; 32] = [
    "Family Medicine",
    "General Practice",
    "Internal Medicine",
    "Pediatrics",
    "Obstetrics and Gynecology",
    "Dermatology",
    "Cardiology",
    "Psychiatry",
    "Neurology",
    "General Surgery",
    "Orthopedic Surgery",
    "Urology",
    "Anesthesiology",
    "Gastroenterology",
    "Endocrinology and Metabolism",
    "Diagnostic Radiology",
    "Medical Oncology",
    "Hematology",
    "Respirology",
    "Rheumatology",
    "Ophthalmology",
    "Otolaryngology – Head and Neck Surgery",
    "Emergency Medicine",
    "Plastic Surgery",
    "Pathology",
    "Infectious Diseases",
    "Nephrology",
    "Physical Medicine and Rehabilitation",
    "Occupational Medicine",
    "Public Health and Preventive Medicine",
    "Geriatric Medicine",
    "Pain Medicine",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn thirty_two_distinct_names() {
        let unique: HashSet<&str> = SPECIALTIES.iter().copied().collect();
        assert_eq!(unique.len(), 32);
        assert!(SPECIALTIES.contains(&"Family Medicine"));
        assert!(!SPECIALTIES.contains(&"Other"));
    }
}
