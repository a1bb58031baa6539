//! End-to-end pipeline test: facet validation through orchestrated fetch to
//! bookmark save, using in-process stubs for the external collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use openfindr::telemetry::NoopTelemetrySink;
use openfindr::{
    BookmarkRecord, BookmarkSaver, BookmarkStore, BookmarkStoreError, FetchOrchestrator,
    FilterState, OwnerIdentity, RawFacets, RepositoryRecord, RepositorySearchExecutor,
    SaveOutcome, SearchError, SearchQuery,
    search::RepositorySearchGateway,
};

/// Gateway stub that records composed queries and serves canned records.
#[derive(Default)]
struct StubGateway {
    queries: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RepositorySearchGateway for StubGateway {
    async fn search_repositories(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RepositoryRecord>, SearchError> {
        self.queries
            .lock()
            .expect("queries mutex should be available")
            .push(query.qualifier_string());
        Ok(vec![RepositoryRecord {
            id: 42,
            name: "tokio".to_owned(),
            description: Some("An asynchronous runtime".to_owned()),
            html_url: "https://github.com/tokio-rs/tokio".to_owned(),
            star_count: 30_000,
            fork_count: 3_000,
        }])
    }
}

/// In-memory bookmark store counting inserts.
#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<BookmarkRecord>>,
    inserts: AtomicUsize,
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkStoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().expect("rows mutex should be available");
        if rows
            .iter()
            .any(|row| row.owner == record.owner && row.repo_id == record.repo_id)
        {
            return Err(BookmarkStoreError::DuplicateBookmark);
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn select_all(
        &self,
        owner: &OwnerIdentity,
    ) -> Result<Vec<BookmarkRecord>, BookmarkStoreError> {
        Ok(self
            .rows
            .lock()
            .expect("rows mutex should be available")
            .iter()
            .filter(|row| row.owner == *owner)
            .cloned()
            .collect())
    }
}

fn filter(keyword: Option<&str>) -> FilterState {
    let raw = RawFacets {
        language: Some("rust".to_owned()),
        popularity: Some("high".to_owned()),
        keyword: keyword.map(ToOwned::to_owned),
        free_text: None,
    };
    FilterState::validate(&raw).expect("facets should validate")
}

#[tokio::test(start_paused = true)]
async fn facet_changes_flow_through_to_one_upstream_query() {
    let gateway = StubGateway::default();
    let queries = Arc::clone(&gateway.queries);
    let orchestrator = FetchOrchestrator::configured(
        RepositorySearchExecutor::new(gateway),
        Duration::from_millis(500),
        Arc::new(NoopTelemetrySink),
    );

    orchestrator.schedule(filter(None));
    tokio::time::sleep(Duration::from_millis(100)).await;
    orchestrator.schedule(filter(Some("docker")));
    tokio::time::sleep(Duration::from_millis(700)).await;

    let recorded = queries
        .lock()
        .expect("queries mutex should be available")
        .clone();
    assert_eq!(
        recorded,
        ["language:rust stars:>10000 docker"],
        "one settled dispatch with the latest facets"
    );

    let state = orchestrator.state();
    let results = state.results.expect("results should be present");
    assert_eq!(
        results.first().map(|record| record.id),
        Some(42),
        "normalized record should reach the snapshot"
    );
}

#[tokio::test]
async fn fetched_result_can_be_bookmarked_exactly_once() {
    let store = MemoryStore::default();
    let owner = OwnerIdentity::new("dev@example.com").expect("owner should validate");

    let gateway = StubGateway::default();
    let records = gateway
        .search_repositories(&SearchQuery::for_repositories(&filter(None)))
        .await
        .expect("stub search should succeed");
    let record = records.into_iter().next().expect("record should exist");

    let saver = BookmarkSaver::new(record);
    assert_eq!(
        saver.save(Some(&owner), &store).await,
        SaveOutcome::Saved,
        "first save should persist"
    );
    assert_eq!(
        saver.save(Some(&owner), &store).await,
        SaveOutcome::AlreadySaved,
        "second save should be a session-level no-op"
    );
    assert_eq!(
        store.inserts.load(Ordering::SeqCst),
        1,
        "exactly one adapter insert"
    );

    let listed = store
        .select_all(&owner)
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1, "one bookmark should be listed");
    assert_eq!(
        listed.first().map(|row| row.repo_id.as_str()),
        Some("42"),
        "repo id should round-trip as text"
    );
}
