//! Keyword heuristics deciding who must act on a bulletin.
//!
//! Two fixed phrase tables, matched by case-insensitive substring
//! containment. Open-ended lookup tables: extending coverage means
//! adding a phrase, never touching the classifier logic.

use serde::{Deserialize, Serialize};

/// Phrases indicating the customer must act.
const CLIENT_PHRASES: &[&str] = &[
    "you must",
    "you should",
    "update your",
    "apply patches",
    "manual upgrade",
    "take action",
    "requires action",
    "perform",
    "self-service maintenance",
    "customer",
    "manually",
];

/// Phrases indicating Google has already acted or will act.
const GCP_PHRASES: &[&str] = &[
    "google has applied",
    "google has started",
    "automatically patched",
    "google cloud has rolled out",
    "no action required",
    "handled automatically",
    "google will",
    "google cloud has released",
];

/// Who is responsible for remediating a bulletin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Managed {
    #[serde(rename = "GCP")]
    Gcp,
    Client,
    Both,
    Unknown,
}

/// Classify bulletin text by keyword containment.
///
/// Precedence: hits from both tables yield `Both`, a single side yields
/// that side, no hits yield `Unknown`. No stemming and no word-boundary
/// requirement — a phrase matching inside a longer word still counts.
/// Pure and total: every input maps to exactly one verdict.
pub fn classify(text: &str) -> Managed {
    let t = text.to_lowercase();
    let client = CLIENT_PHRASES.iter().any(|kw| t.contains(kw));
    let gcp = GCP_PHRASES.iter().any(|kw| t.contains(kw));

    match (client, gcp) {
        (true, true) => Managed::Both,
        (true, false) => Managed::Client,
        (false, true) => Managed::Gcp,
        (false, false) => Managed::Unknown,
    }
}
