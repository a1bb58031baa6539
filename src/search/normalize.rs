//! Normalization of raw search payloads into fixed record shapes.
//!
//! An item missing a required field is dropped from the output rather than
//! aborting the whole batch, so one malformed upstream item never blanks an
//! otherwise valid result page.

use super::models::{
    ApiIssue, ApiLabel, ApiRepository, IssueLabel, IssueRecord, IssueRepository, RepositoryRecord,
};

/// Substring rewritten when deriving a browsable repository URL.
const API_REPOS_HOST: &str = "api.github.com/repos";

/// Replacement host for derived repository URLs.
const HTML_HOST: &str = "github.com";

/// Maps raw repository items into records, skipping malformed items.
pub(crate) fn normalize_repositories(items: Vec<ApiRepository>) -> Vec<RepositoryRecord> {
    items.into_iter().filter_map(repository_record).collect()
}

/// Maps raw issue items into records, skipping malformed items.
pub(crate) fn normalize_issues(items: Vec<ApiIssue>) -> Vec<IssueRecord> {
    items.into_iter().filter_map(issue_record).collect()
}

fn repository_record(item: ApiRepository) -> Option<RepositoryRecord> {
    Some(RepositoryRecord {
        id: item.id?,
        name: item.name?,
        description: item.description,
        html_url: item.html_url?,
        star_count: item.stargazers_count?,
        fork_count: item.forks_count?,
    })
}

fn issue_record(item: ApiIssue) -> Option<IssueRecord> {
    let repository = derive_repository(item.repository_url.as_deref()?);
    Some(IssueRecord {
        id: item.id?,
        title: item.title?,
        number: item.number?,
        html_url: item.html_url?,
        repository,
        created_at: item.created_at?,
        updated_at: item.updated_at?,
        labels: item.labels.into_iter().filter_map(issue_label).collect(),
        state: item.state?,
    })
}

fn issue_label(label: ApiLabel) -> Option<IssueLabel> {
    Some(IssueLabel {
        id: label.id?,
        name: label.name?,
        color: label.color?,
    })
}

/// Derives repository identity from an upstream `repository_url` of the form
/// `.../repos/<owner>/<repo>`.
///
/// The HTML URL is produced by replacing the first occurrence of
/// `api.github.com/repos` with `github.com` as a plain substring, not by
/// semantic URL parsing; a URL without the substring passes through
/// unchanged.
pub(crate) fn derive_repository(repository_url: &str) -> IssueRepository {
    let segments: Vec<&str> = repository_url.split('/').collect();
    let name = segments.last().copied().unwrap_or_default().to_owned();
    let tail_start = segments.len().saturating_sub(2);
    let full_name = segments
        .get(tail_start..)
        .unwrap_or_default()
        .join("/");

    IssueRepository {
        name,
        full_name,
        html_url: repository_url.replacen(API_REPOS_HOST, HTML_HOST, 1),
    }
}
