//! Deterministic search query composition from validated facets.
//!
//! A [`SearchQuery`] is an immutable value object: two field-wise equal
//! [`FilterState`]s always compose to byte-identical queries, so dispatch
//! behavior is reproducible in tests. Qualifier order is significant for that
//! reproducibility even though the upstream search grammar is
//! position-insensitive.

use std::fmt;

use crate::facets::FilterState;

#[cfg(test)]
mod tests;

/// Fixed qualifier prefix for good-first-issue searches.
const GOOD_FIRST_ISSUE_PREFIX: &str = "label:\"good first issue\" state:open";

/// Page size for repository searches; issue searches carry no explicit cap.
const REPOSITORY_PAGE_SIZE: u8 = 10;

/// Sort key sent to the upstream search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    /// Order repositories by star count.
    Stars,
    /// Order issues by creation time.
    Created,
}

impl SearchSort {
    /// Wire token for the `sort` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Created => "created",
        }
    }
}

/// Sort direction sent to the upstream search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Descending order; the only direction the discovery flows use.
    Descending,
}

impl SearchOrder {
    /// Wire token for the `order` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descending => "desc",
        }
    }
}

/// Composed, immutable search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    qualifiers: Vec<String>,
    sort: SearchSort,
    order: SearchOrder,
    per_page: Option<u8>,
}

impl SearchQuery {
    /// Composes a repository search query from a validated filter state.
    ///
    /// Qualifier order: `language:<lang>`, then the popularity star range,
    /// then the raw keyword token. Free text never contributes a qualifier;
    /// it only participates in debounced change detection.
    #[must_use]
    pub fn for_repositories(filter: &FilterState) -> Self {
        let mut qualifiers = vec![format!("language:{}", filter.language.as_str())];
        if let Some(popularity) = filter.popularity {
            qualifiers.push(popularity.stars_qualifier().to_owned());
        }
        if let Some(keyword) = &filter.keyword {
            qualifiers.push(keyword.as_str().to_owned());
        }

        Self {
            qualifiers,
            sort: SearchSort::Stars,
            order: SearchOrder::Descending,
            per_page: Some(REPOSITORY_PAGE_SIZE),
        }
    }

    /// Composes a good-first-issue search query.
    ///
    /// The fixed `label:"good first issue" state:open` prefix always leads;
    /// the language qualifier is appended only when a non-empty language is
    /// given. The token is deliberately not validated against the fixed
    /// facet set: the issue flow accepts any language string.
    #[must_use]
    pub fn for_good_first_issues(language: Option<&str>) -> Self {
        let mut qualifiers = vec![GOOD_FIRST_ISSUE_PREFIX.to_owned()];
        if let Some(language) = language.map(str::trim).filter(|token| !token.is_empty()) {
            qualifiers.push(format!("language:{language}"));
        }

        Self {
            qualifiers,
            sort: SearchSort::Created,
            order: SearchOrder::Descending,
            per_page: None,
        }
    }

    /// Ordered qualifier list.
    #[must_use]
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    /// Space-joined qualifier string sent as the `q` parameter.
    #[must_use]
    pub fn qualifier_string(&self) -> String {
        self.qualifiers.join(" ")
    }

    /// Sort key for the `sort` parameter.
    #[must_use]
    pub const fn sort(&self) -> SearchSort {
        self.sort
    }

    /// Sort direction for the `order` parameter.
    #[must_use]
    pub const fn order(&self) -> SearchOrder {
        self.order
    }

    /// Page size, when the query carries one.
    #[must_use]
    pub const fn per_page(&self) -> Option<u8> {
        self.per_page
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualifier_string())
    }
}
