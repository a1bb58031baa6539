//! Facet validation against the fixed filter vocabularies.
//!
//! Every search starts from a raw facet selection supplied by the UI layer.
//! Validation is a pure, total function: malformed input always yields a
//! typed [`ValidationError`], never a panic, and a [`FilterState`] can only
//! be constructed from values that belong to the fixed sets. Downstream query
//! composition therefore never sees an unrecognized facet.

use thiserror::Error;


/// Languages the repository search accepts.
///
/// The set is closed; anything else is rejected before a query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// `language:javascript`
    Javascript,
    /// `language:typescript`
    Typescript,
    /// `language:python`
    Python,
    /// `language:java`
    Java,
    /// `language:go`
    Go,
    /// `language:rust`
    Rust,
}

impl Language {
    /// Parses a language token case-insensitively against the fixed set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLanguage`] for an empty or
    /// unrecognized token.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "javascript" => Ok(Self::Javascript),
            "typescript" => Ok(Self::Typescript),
            "python" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "go" => Ok(Self::Go),
            "rust" => Ok(Self::Rust),
            _ => Err(ValidationError::InvalidLanguage),
        }
    }

    /// Canonical lowercase token used in query qualifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }
}

/// Popularity tier mapped onto a star-count range by the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopularityTier {
    /// More than 10,000 stars.
    High,
    /// Between 1,000 and 10,000 stars.
    Medium,
    /// Fewer than 1,000 stars.
    Low,
}

impl PopularityTier {
    /// Parses a popularity token case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPopularity`] when the token is not
    /// `high`, `medium`, or `low`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ValidationError::InvalidPopularity),
        }
    }

    /// The star-count qualifier this tier maps to.
    #[must_use]
    pub const fn stars_qualifier(self) -> &'static str {
        match self {
            Self::High => "stars:>10000",
            Self::Medium => "stars:1000..10000",
            Self::Low => "stars:<1000",
        }
    }
}

/// Topic keywords the repository search accepts.
///
/// The list is a fixed vocabulary, quirks included (`typescripts`, `ui/ux`,
/// `ci/cd`). Membership is checked case-insensitively; the raw token is
/// preserved because keywords are forwarded to the search qualifier as
/// typed.
const TOPIC_KEYWORDS: &[&str] = &[
    "frontend",
    "backend",
    "fullstack",
    "data-science",
    "machine-learning",
    "AI",
    "web-development",
    "devops",
    "cloud",
    "database",
    "blockchain",
    "open-source",
    "API",
    "automation",
    "security",
    "testing",
    "performance",
    "ui/ux",
    "design",
    "serverless",
    "microservices",
    "distributed-systems",
    "graphql",
    "rest-api",
    "typescripts",
    "react",
    "vue",
    "angular",
    "nextjs",
    "nodejs",
    "python",
    "ruby",
    "go",
    "java",
    "rust",
    "flutter",
    "swift",
    "kotlin",
    "docker",
    "kubernetes",
    "ci/cd",
    "scrum",
    "open-standards",
    "accessibility",
    "sustainability",
    "cryptocurrency",
    "smart-contracts",
    "blockchain-apps",
    "ecosystem",
    "ai-chatbots",
    "enterprise",
    "cross-platform",
    "peer-to-peer",
];

/// Validated topic keyword preserving the caller's raw token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicKeyword(String);

impl TopicKeyword {
    /// Validates a keyword against the fixed topic vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidKeyword`] when the token is not in
    /// the vocabulary.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if TOPIC_KEYWORDS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::InvalidKeyword)
        }
    }

    /// Borrow the raw keyword token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw, unvalidated facet selection as received from the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFacets {
    /// Requested language token; mandatory.
    pub language: Option<String>,
    /// Requested popularity tier token.
    pub popularity: Option<String>,
    /// Requested topic keyword token.
    pub keyword: Option<String>,
    /// Free-text search input.
    pub free_text: Option<String>,
}

/// Validated facet selection; the only input query composition accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Mandatory language facet.
    pub language: Language,
    /// Optional popularity facet.
    pub popularity: Option<PopularityTier>,
    /// Optional topic keyword facet.
    pub keyword: Option<TopicKeyword>,
    /// Trimmed free-text input; participates in debounce, not in qualifiers.
    pub free_text: String,
}

impl FilterState {
    /// Validates a raw facet selection.
    ///
    /// Language is mandatory; popularity and keyword are validated only when
    /// present. Free text is trimmed and otherwise unconstrained.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ValidationError`], checking language,
    /// then popularity, then keyword.
    pub fn validate(raw: &RawFacets) -> Result<Self, ValidationError> {
        let language = raw
            .language
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ValidationError::InvalidLanguage)
            .and_then(Language::parse)?;

        let popularity = raw
            .popularity
            .as_deref()
            .map(PopularityTier::parse)
            .transpose()?;

        let keyword = raw
            .keyword
            .as_deref()
            .map(TopicKeyword::parse)
            .transpose()?;

        let free_text = raw
            .free_text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned();

        Ok(Self {
            language,
            popularity,
            keyword,
            free_text,
        })
    }
}

/// Facet validation failures, surfaced before any network call is made.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The language facet was absent or outside the fixed set.
    #[error("Invalid or unsupported language")]
    InvalidLanguage,

    /// The popularity facet was outside high/medium/low.
    #[error("Invalid popularity mode")]
    InvalidPopularity,

    /// The keyword facet was outside the fixed topic vocabulary.
    #[error("Invalid keyword")]
    InvalidKeyword,
}
