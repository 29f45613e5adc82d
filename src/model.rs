//! Data model for extracted bulletins.

use crate::classify::Managed;
use serde::{Deserialize, Serialize};

/// Maximum summary length in characters, before the truncation marker.
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Appended to a summary when the body text exceeded the cap.
pub const TRUNCATION_MARKER: &str = "...";

/// One extracted security-advisory entry.
///
/// Constructed fresh on every extraction pass, read-only from creation
/// to serialization. `id` is unique within a single source's pass only;
/// merged output from multiple sources may repeat ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinRecord {
    /// Bulletin identifier (`gcp-YYYY-NNN` scheme).
    pub id: String,
    /// Heading text as published.
    pub title: String,
    /// Associated CVE ids, deduplicated and sorted ascending. Never empty.
    pub cves: Vec<String>,
    /// Truncated excerpt of the bulletin body text.
    pub summary: String,
    /// Who must act to remediate.
    pub managed: Managed,
    /// Link back to the bulletin on the source page.
    pub url: String,
}

/// Truncate body text to the summary cap, appending the marker when cut.
pub fn truncate_summary(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SUMMARY_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{TRUNCATION_MARKER}")
    } else {
        head
    }
}

/// Summary statistics over a merged record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub by_managed: ManagedCounts,
}

/// Per-verdict record counts. All four counters are always serialized,
/// zero-filled when no record carries that verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedCounts {
    #[serde(rename = "GCP")]
    pub gcp: usize,
    #[serde(rename = "Client")]
    pub client: usize,
    #[serde(rename = "Both")]
    pub both: usize,
    #[serde(rename = "Unknown")]
    pub unknown: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_summary("patch now"), "patch now");
    }

    #[test]
    fn test_exactly_at_cap_untouched() {
        let text = "a".repeat(SUMMARY_MAX_CHARS);
        let summary = truncate_summary(&text);
        assert_eq!(summary.len(), SUMMARY_MAX_CHARS);
        assert!(!summary.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_over_cap_truncated_with_marker() {
        let text = "b".repeat(SUMMARY_MAX_CHARS + 1);
        let summary = truncate_summary(&text);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + TRUNCATION_MARKER.len());
        assert!(summary.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // Multi-byte input must not split a character at the cap.
        let text = "é".repeat(SUMMARY_MAX_CHARS + 50);
        let summary = truncate_summary(&text);
        assert!(summary.ends_with(TRUNCATION_MARKER));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_stats_serializes_all_counters() {
        let stats = Stats {
            total: 0,
            by_managed: ManagedCounts::default(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        for key in ["GCP", "Client", "Both", "Unknown"] {
            assert_eq!(json["by_managed"][key], 0, "missing counter {key}");
        }
    }
}
