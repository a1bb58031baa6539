//! Test helpers for constructing search record fixtures.
//!
//! Builder functions for [`RepositoryRecord`] instances used across unit and
//! integration tests, reducing boilerplate and keeping fixtures consistent.

use super::RepositoryRecord;

/// Constructs a minimal `RepositoryRecord` with the given id and name.
///
/// The HTML URL is derived from the name; description is `None` and both
/// counts are zero.
///
/// # Examples
///
/// ```
/// use openfindr::search::models::test_support::repository_with_id;
///
/// let record = repository_with_id(42, "tokio");
/// assert_eq!(record.id, 42);
/// assert_eq!(record.html_url, "https://github.com/example/tokio");
/// ```
#[must_use]
pub fn repository_with_id(id: u64, name: &str) -> RepositoryRecord {
    RepositoryRecord {
        id,
        name: name.to_owned(),
        description: None,
        html_url: format!("https://github.com/example/{name}"),
        star_count: 0,
        fork_count: 0,
    }
}

/// Constructs a `RepositoryRecord` with description and counts populated.
#[must_use]
pub fn popular_repository(id: u64, name: &str, stars: u64) -> RepositoryRecord {
    RepositoryRecord {
        description: Some(format!("{name} repository")),
        star_count: stars,
        fork_count: stars / 10,
        ..repository_with_id(id, name)
    }
}
