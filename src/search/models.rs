//! Data models for search results.
//!
//! Types prefixed with `Api` are internal deserialization targets for the raw
//! upstream payloads; the normalizer converts them into the public record
//! types. Records are immutable after creation and are discarded wholesale
//! when a newer query supersedes them.

use serde::{Deserialize, Serialize};

#[cfg(feature = "test-support")]
pub mod test_support;

/// Normalized repository search result.
///
/// Serializes with the upstream field names (`stargazers_count`,
/// `forks_count`) so the API surface emits the shape clients already expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    /// Repository identifier.
    pub id: u64,
    /// Repository name.
    pub name: String,
    /// Description; `None` when the upstream item has none. The nullability
    /// signal is preserved rather than substituting an empty string.
    pub description: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: String,
    /// Star count.
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    /// Fork count.
    #[serde(rename = "forks_count")]
    pub fork_count: u64,
}

/// Repository identity derived from an issue's `repository_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRepository {
    /// Repository name (last path segment).
    pub name: String,
    /// `owner/name` (last two path segments).
    pub full_name: String,
    /// Browsable URL derived by substring replacement, not URL parsing.
    pub html_url: String,
}

/// Label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueLabel {
    /// Label identifier.
    pub id: u64,
    /// Label name.
    pub name: String,
    /// Label color as a hex string without `#`.
    pub color: String,
}

/// Normalized good-first-issue search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    /// Issue identifier.
    pub id: u64,
    /// Issue title.
    pub title: String,
    /// Issue number within its repository.
    pub number: u64,
    /// HTML URL of the issue.
    pub html_url: String,
    /// Owning repository identity derived from `repository_url`.
    pub repository: IssueRepository,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: String,
    /// Last update timestamp (ISO 8601 format).
    pub updated_at: String,
    /// Labels attached to the issue.
    pub labels: Vec<IssueLabel>,
    /// Issue state (e.g. open).
    pub state: String,
}

/// Issue search results with the upstream total count passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSearchResults {
    /// Total number of matches reported upstream, beyond the returned page.
    pub total_count: u64,
    /// Normalized issues for the returned page.
    pub items: Vec<IssueRecord>,
}

/// Search response envelope shared by the repository and issue endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiSearchPage<T> {
    pub(crate) total_count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub(crate) items: Vec<T>,
}

/// Raw repository search item. All fields are optional at the wire level;
/// the normalizer decides which are required.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRepository {
    pub(crate) id: Option<u64>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) stargazers_count: Option<u64>,
    pub(crate) forks_count: Option<u64>,
}

/// Raw issue search item.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) id: Option<u64>,
    pub(crate) title: Option<String>,
    pub(crate) number: Option<u64>,
    pub(crate) html_url: Option<String>,
    pub(crate) repository_url: Option<String>,
    pub(crate) created_at: Option<String>,
    pub(crate) updated_at: Option<String>,
    #[serde(default = "Vec::new")]
    pub(crate) labels: Vec<ApiLabel>,
    pub(crate) state: Option<String>,
}

/// Raw issue label.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) id: Option<u64>,
    pub(crate) name: Option<String>,
    pub(crate) color: Option<String>,
}
