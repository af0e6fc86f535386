//! Result extraction heuristic
//!
//! Pure text processing, kept separate from the browser layer so it can be
//! exercised against fixture blocks. The name split (first whitespace token
//! vs. remainder) is a known-lossy heuristic preserved for parity with
//! existing clients; do not "fix" it without also changing the fixtures.

use crate::scrape::types::DoctorRecord;

/// Minimum trimmed length for an element's text to count as a result block.
/// Filters out header cells, icons, and stray layout fragments.
pub const MIN_BLOCK_LEN: usize = 10;

/// Does this element text qualify as one candidate result block?
pub fn is_qualifying(text: &str) -> bool {
    text.trim().len() > MIN_BLOCK_LEN
}

/// Scan per-selector text sets in priority order and return the first
/// selector producing at least one qualifying block, together with the
/// qualifying blocks themselves. Later selectors are never consulted once
/// one succeeds, even if they would match more elements.
pub fn first_qualifying<'a, I>(sets: I) -> Option<(&'a str, Vec<String>)>
where
    I: IntoIterator<Item = (&'a str, Vec<String>)>,
{
    for (selector, texts) in sets {
        let blocks: Vec<String> = texts
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| is_qualifying(t))
            .collect();
        if !blocks.is_empty() {
            return Some((selector, blocks));
        }
    }
    None
}

/// Turn qualifying text blocks into best-effort records.
///
/// For each block: the first non-empty line is treated as a two-part name,
/// split on whitespace (first token = given name, remaining tokens joined =
/// family name). Every other structured field stays empty; `raw_data` holds
/// the full trimmed block.
pub fn records_from_blocks<S: AsRef<str>>(blocks: &[S]) -> Vec<DoctorRecord> {
    blocks
        .iter()
        .filter_map(|block| {
            let block = block.as_ref().trim();
            let name_line = block.lines().map(str::trim).find(|l| !l.is_empty())?;
            let mut parts = name_line.split_whitespace();
            let first_name = parts.next().unwrap_or_default().to_string();
            let last_name = parts.collect::<Vec<_>>().join(" ");
            Some(DoctorRecord {
                first_name,
                last_name,
                raw_data: block.to_string(),
                ..Default::default()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifying_requires_more_than_ten_chars_after_trim() {
        assert!(!is_qualifying("  short  "));
        assert!(!is_qualifying("exactly10!"));
        assert!(is_qualifying("Dr. Jane Doe, Toronto"));
    }

    #[test]
    fn scan_stops_at_first_selector_with_a_qualifying_block() {
        let sets = vec![
            (".doctor-result", vec!["tiny".to_string()]),
            ("table tr", vec!["Jane Doe, Family Medicine".to_string()]),
            ("li", vec!["should never be reached, but is long".to_string()]),
        ];
        let (selector, blocks) = first_qualifying(sets).unwrap();
        assert_eq!(selector, "table tr");
        assert_eq!(blocks, vec!["Jane Doe, Family Medicine"]);
    }

    #[test]
    fn scan_returns_none_when_nothing_qualifies() {
        let sets = vec![(".result-item", vec!["a".to_string(), " ".to_string()])];
        assert!(first_qualifying(sets).is_none());
    }

    #[test]
    fn first_line_splits_into_first_token_and_remainder() {
        let blocks = ["Jane Alexandra Doe\n123 Main St\nOttawa ON"];
        let records = records_from_blocks(&blocks);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Jane");
        assert_eq!(records[0].last_name, "Alexandra Doe");
        assert_eq!(records[0].raw_data, "Jane Alexandra Doe\n123 Main St\nOttawa ON");
        assert_eq!(records[0].city, "");
    }

    #[test]
    fn single_token_name_leaves_family_name_empty() {
        let records = records_from_blocks(&["Cher\nClinic details here"]);
        assert_eq!(records[0].first_name, "Cher");
        assert_eq!(records[0].last_name, "");
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let records = records_from_blocks(&["\n\n  Omar Khan\nHamilton"]);
        assert_eq!(records[0].first_name, "Omar");
        assert_eq!(records[0].last_name, "Khan");
    }

    #[test]
    fn ottawa_fixture_yields_two_records_with_raw_data() {
        // Fixture mirror of the two-result end-to-end scenario.
        let blocks = [
            "Aisha Rahman\nFamily Medicine\nOttawa ON K1A 0B1",
            "Pierre Lalonde\nFamily Medicine\nOttawa ON K2P 1L4",
        ];
        let records = records_from_blocks(&blocks);
        assert_eq!(records.len(), 2);
        for rec in &records {
            assert!(!rec.raw_data.is_empty());
            assert!(!rec.first_name.is_empty());
        }
        assert_eq!(records[0].last_name, "Rahman");
        assert_eq!(records[1].last_name, "Lalonde");
    }
}
