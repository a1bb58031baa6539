//! OpenFindr library crate for faceted GitHub discovery.
//!
//! The library composes filter facets (language, popularity tier, topic
//! keyword, free text) into GitHub search queries, debounces bursts of facet
//! changes into single dispatches, normalizes repository and issue search
//! payloads into fixed record shapes, and tracks a per-result bookmark
//! lifecycle so a signed-in user saves a repository at most once.

pub mod api;
pub mod bookmarks;
pub mod config;
pub mod facets;
pub mod orchestrator;
pub mod query;
pub mod search;
pub mod telemetry;

pub use bookmarks::{
    BookmarkRecord, BookmarkSaver, BookmarkState, BookmarkStore, BookmarkStoreError,
    OwnerIdentity, SaveOutcome, SqliteBookmarkStore,
};
pub use config::OpenFindrConfig;
pub use facets::{FilterState, Language, PopularityTier, RawFacets, TopicKeyword, ValidationError};
pub use orchestrator::{
    FetchOrchestrator, RepositorySearchExecutor, SearchExecutor, SearchState,
};
pub use query::{SearchOrder, SearchQuery, SearchSort};
pub use search::{
    ApiToken, IssueLabel, IssueRecord, IssueRepository, IssueSearchGateway, IssueSearchResults,
    OctocrabSearchGateway, RepositoryRecord, RepositorySearchGateway, SearchError,
};
