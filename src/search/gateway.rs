//! Search gateways backed by Octocrab.

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;

use crate::query::SearchQuery;

use super::error::SearchError;
use super::models::{
    ApiIssue, ApiRepository, ApiSearchPage, IssueSearchResults, RepositoryRecord,
};
use super::normalize::{normalize_issues, normalize_repositories};

/// Default API base used when no override is supplied.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// API token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SearchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SearchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Gateway that can run repository searches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySearchGateway: Send + Sync {
    /// Run a repository search and return normalized records.
    async fn search_repositories(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RepositoryRecord>, SearchError>;
}

/// Gateway that can run good-first-issue searches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueSearchGateway: Send + Sync {
    /// Run an issue search and return normalized results with the upstream
    /// total count.
    async fn search_issues(&self, query: &SearchQuery)
    -> Result<IssueSearchResults, SearchError>;
}

/// Octocrab-backed search gateway for repositories and issues.
pub struct OctocrabSearchGateway {
    client: Octocrab,
}

impl OctocrabSearchGateway {
    /// Creates a gateway from an existing Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated gateway against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidApiBase`] when the client cannot be
    /// constructed.
    pub fn for_token(token: &ApiToken) -> Result<Self, SearchError> {
        Self::for_token_with_base(token, DEFAULT_API_BASE)
    }

    /// Builds an authenticated gateway against the given API base.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidApiBase`] when the base URI cannot be
    /// parsed or Octocrab fails to construct a client.
    pub fn for_token_with_base(token: &ApiToken, api_base: &str) -> Result<Self, SearchError> {
        let base_uri: Uri = api_base
            .parse::<Uri>()
            .map_err(|error| SearchError::InvalidApiBase(error.to_string()))?;

        let client = Octocrab::builder()
            .personal_token(token.as_ref())
            .base_uri(base_uri)
            .map_err(|error| SearchError::InvalidApiBase(error.to_string()))?
            .build()
            .map_err(|error| map_octocrab_error("build client", &error))?;

        Ok(Self::new(client))
    }

    async fn search_page<T>(
        &self,
        operation: &str,
        query: &SearchQuery,
        path: &str,
    ) -> Result<ApiSearchPage<T>, SearchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let q = query.qualifier_string();
        tracing::debug!(%q, path, "dispatching search request");

        let mut params = vec![
            ("q", q),
            ("sort", query.sort().as_str().to_owned()),
            ("order", query.order().as_str().to_owned()),
        ];
        if let Some(per_page) = query.per_page() {
            params.push(("per_page", per_page.to_string()));
        }

        self.client
            .get(path, Some(&params))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))
    }
}

#[async_trait]
impl RepositorySearchGateway for OctocrabSearchGateway {
    async fn search_repositories(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RepositoryRecord>, SearchError> {
        let page: ApiSearchPage<ApiRepository> = self
            .search_page("search repositories", query, "/search/repositories")
            .await?;
        Ok(normalize_repositories(page.items))
    }
}

#[async_trait]
impl IssueSearchGateway for OctocrabSearchGateway {
    async fn search_issues(
        &self,
        query: &SearchQuery,
    ) -> Result<IssueSearchResults, SearchError> {
        let page: ApiSearchPage<ApiIssue> = self
            .search_page("search issues", query, "/search/issues")
            .await?;
        Ok(IssueSearchResults {
            total_count: page.total_count.unwrap_or_default(),
            items: normalize_issues(page.items),
        })
    }
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> SearchError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return SearchError::Upstream {
            message: format!(
                "{operation} failed with status {status}: {message}",
                status = source.status_code,
                message = source.message
            ),
        };
    }

    if is_network_error(error) {
        return SearchError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    SearchError::Upstream {
        message: format!("{operation} failed: {error}"),
    }
}
