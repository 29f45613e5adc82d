//! Concurrent per-source extraction and merge.
//!
//! One isolated pass per source, joined at a barrier. No shared mutable
//! state: each pass owns its fetched document and record sequence, and
//! merging happens only after every pass completes.

use crate::classify::Managed;
use crate::error::TrackerError;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::model::{BulletinRecord, ManagedCounts, Stats};
use crate::registry::{Source, SourceRegistry};
use std::time::Instant;
use tracing::info;

/// Run one full pass (fetch → extract → classify) for a single source.
pub async fn scrape_source(
    fetcher: &PageFetcher,
    source: &Source,
) -> Result<Vec<BulletinRecord>, TrackerError> {
    let started = Instant::now();
    let location = source.location.as_str();

    let html = fetcher.fetch(location).await?;
    let records = extract::extract_bulletins(&html, location)?;

    info!(
        "scraped {} bulletins from '{}' in {}ms",
        records.len(),
        source.key,
        started.elapsed().as_millis()
    );
    Ok(records)
}

/// Scrape every registered source concurrently and merge the results in
/// registry order, each source's internal order preserved.
///
/// All-or-nothing: the first failing pass fails the aggregate and drops
/// the remaining in-flight fetches.
pub async fn scrape_all(
    fetcher: &PageFetcher,
    registry: &SourceRegistry,
) -> Result<Vec<BulletinRecord>, TrackerError> {
    let passes = registry.iter().map(|source| scrape_source(fetcher, source));
    let per_source = futures::future::try_join_all(passes).await?;
    Ok(per_source.into_iter().flatten().collect())
}

/// Per-verdict counts plus grand total over a merged record set.
pub fn compute_stats(records: &[BulletinRecord]) -> Stats {
    let mut by_managed = ManagedCounts::default();
    for record in records {
        match record.managed {
            Managed::Gcp => by_managed.gcp += 1,
            Managed::Client => by_managed.client += 1,
            Managed::Both => by_managed.both += 1,
            Managed::Unknown => by_managed.unknown += 1,
        }
    }
    Stats {
        total: records.len(),
        by_managed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bulletin_page(id: &str, body: &str) -> String {
        format!(
            r#"<html><body><h2 id="{id}">Bulletin</h2>
               <table><tr><td>{body}</td></tr></table></body></html>"#
        )
    }

    async fn mock_source(server: &MockServer, key: &str, page: &str) -> Source {
        Mock::given(method("GET"))
            .and(path(format!("/{key}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(server)
            .await;
        let location = Url::parse(&format!("{}/{key}", server.uri())).unwrap();
        Source::new(key, location)
    }

    #[tokio::test]
    async fn test_merge_preserves_registry_order() {
        let server = MockServer::start().await;
        let a = mock_source(&server, "a", &bulletin_page("gcp-2024-001", "CVE-2024-0001")).await;
        let b = mock_source(&server, "b", &bulletin_page("gcp-2024-002", "CVE-2024-0002")).await;

        let fetcher = PageFetcher::new();
        let registry = SourceRegistry::new(vec![a, b]);
        let merged = scrape_all(&fetcher, &registry).await.unwrap();

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["gcp-2024-001", "gcp-2024-002"]);
    }

    #[tokio::test]
    async fn test_one_failed_source_fails_the_aggregate() {
        let server = MockServer::start().await;
        let ok = mock_source(&server, "ok", &bulletin_page("gcp-2024-003", "CVE-2024-0003")).await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let down = Source::new(
            "down",
            Url::parse(&format!("{}/down", server.uri())).unwrap(),
        );

        let fetcher = PageFetcher::new();
        let registry = SourceRegistry::new(vec![ok, down]);
        let err = scrape_all(&fetcher, &registry).await.unwrap_err();
        assert!(
            matches!(err, TrackerError::FetchFailure { status: 500, .. }),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_duplicate_ids_across_sources_kept() {
        // The id scheme is only unique within one source's pass.
        let server = MockServer::start().await;
        let page = bulletin_page("gcp-2024-007", "CVE-2024-0007");
        let a = mock_source(&server, "left", &page).await;
        let b = mock_source(&server, "right", &page).await;

        let fetcher = PageFetcher::new();
        let registry = SourceRegistry::new(vec![a, b]);
        let merged = scrape_all(&fetcher, &registry).await.unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, merged[1].id);
    }

    #[test]
    fn test_stats_counts_per_verdict() {
        let record = |managed| BulletinRecord {
            id: "gcp-2024-001".to_string(),
            title: "t".to_string(),
            cves: vec!["CVE-2024-0001".to_string()],
            summary: "s".to_string(),
            managed,
            url: "u".to_string(),
        };
        let records = vec![
            record(Managed::Gcp),
            record(Managed::Gcp),
            record(Managed::Client),
            record(Managed::Both),
        ];
        let stats = compute_stats(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_managed.gcp, 2);
        assert_eq!(stats.by_managed.client, 1);
        assert_eq!(stats.by_managed.both, 1);
        assert_eq!(stats.by_managed.unknown, 0);
    }
}
