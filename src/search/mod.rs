//! GitHub search gateways and result normalization.
//!
//! This module wraps Octocrab to run repository and good-first-issue
//! searches, and normalizes the heterogeneous upstream payloads into the two
//! fixed record shapes the rest of the crate consumes. The trait-based
//! gateway design enables mocking in tests while the Octocrab implementation
//! handles real HTTP requests.

pub mod error;
pub mod gateway;
pub mod models;
mod normalize;

pub use error::SearchError;
pub use gateway::{ApiToken, IssueSearchGateway, OctocrabSearchGateway, RepositorySearchGateway};
pub use models::{
    IssueLabel, IssueRecord, IssueRepository, IssueSearchResults, RepositoryRecord,
};

#[cfg(test)]
pub use gateway::{MockIssueSearchGateway, MockRepositorySearchGateway};
