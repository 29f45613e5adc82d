//! Parse bulletin records out of raw page markup.
//!
//! The bulletin pages are semi-structured: each advisory is an `h2` or
//! `h3` heading whose `id` follows the `gcp-YYYY-NNN` scheme, with the
//! advisory details in the nearest table after it. The table is usually
//! not a sibling of the heading, so the search walks the whole tree in
//! document order.

use crate::classify;
use crate::error::TrackerError;
use crate::model::{truncate_summary, BulletinRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Extract every bulletin record from a page, in document order.
///
/// Candidates whose table text carries no CVE id are dropped: bulletins
/// without an associated CVE are not vulnerabilities the tracker cares
/// about. A well-formed page with zero matching headings yields an
/// empty sequence, not an error.
pub fn extract_bulletins(
    html: &str,
    location: &str,
) -> Result<Vec<BulletinRecord>, TrackerError> {
    let heading_sel = Selector::parse("h2[id], h3[id]")
        .map_err(|e| TrackerError::ParseFailure(e.to_string()))?;
    let id_re = Regex::new(r"^gcp-\d{4}-\d{3}").expect("bulletin id pattern is valid");
    let cve_re = Regex::new(r"CVE-\d{4}-\d{4,7}").expect("CVE pattern is valid");

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for heading in document.select(&heading_sel) {
        let Some(id) = heading.value().attr("id") else {
            continue;
        };
        if !id_re.is_match(id) {
            continue;
        }

        let title = heading_text(&heading);
        let body = next_table(&document, heading)
            .map(|table| visible_text(&table))
            .unwrap_or_default();

        let mut cves: Vec<String> = cve_re
            .find_iter(&body)
            .map(|m| m.as_str().to_string())
            .collect();
        cves.sort();
        cves.dedup();
        if cves.is_empty() {
            continue;
        }

        records.push(BulletinRecord {
            id: id.to_string(),
            title,
            cves,
            summary: truncate_summary(&body),
            managed: classify::classify(&body),
            url: format!("{location}#{id}"),
        });
    }

    Ok(records)
}

/// First `<table>` element after the heading in document order.
///
/// Pre-order walk of the full tree from the heading onward, independent
/// of sibling relationships.
fn next_table<'a>(document: &'a Html, heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let heading_id = heading.id();
    let mut past_heading = false;

    for node in document.tree.root().descendants() {
        if node.id() == heading_id {
            past_heading = true;
            continue;
        }
        if !past_heading {
            continue;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == "table" {
                return Some(el);
            }
        }
    }
    None
}

/// Heading text as published: each fragment trimmed, fragments
/// concatenated with no separator. Headings carry their own spacing
/// inside fragments; inserting one would alter the title.
fn heading_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Visible text of an element: each text fragment trimmed, fragments
/// joined by single spaces.
fn visible_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
