//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.openfindr.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `OPENFINDR_TOKEN`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--language`, `--popularity`, and friends

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Faceted repository search (the default).
    Repositories,
    /// Good-first-issue search.
    GoodFirstIssues,
    /// List the saved bookmarks of a user.
    ListSaved,
}

/// Language facet applied when none is configured.
const DEFAULT_LANGUAGE: &str = "javascript";

/// Debounce window applied when none is configured, in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `OPENFINDR_TOKEN`, `GITHUB_TOKEN`, or `--token`: API token
/// - `OPENFINDR_LANGUAGE` or `--language`: language facet
/// - `OPENFINDR_POPULARITY` or `--popularity`: popularity facet
/// - `OPENFINDR_KEYWORD` or `--keyword`: topic keyword facet
/// - `OPENFINDR_SEARCH` or `--search`: free-text input
/// - `OPENFINDR_DATABASE_URL` or `--database-url`: local `SQLite` path
/// - `OPENFINDR_USER` or `--user`: owner identity for bookmark operations
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "OPENFINDR",
    discovery(
        dotfile_name = ".openfindr.toml",
        config_file_name = "openfindr.toml",
        app_name = "openfindr"
    )
)]
pub struct OpenFindrConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `OPENFINDR_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Language facet (e.g. "rust"). Defaults to "javascript" for the
    /// repository flow when unset.
    #[ortho_config(cli_short = 'l')]
    pub language: Option<String>,

    /// Popularity facet: high, medium, or low.
    #[ortho_config(cli_short = 'p')]
    pub popularity: Option<String>,

    /// Topic keyword facet (e.g. "frontend").
    #[ortho_config(cli_short = 'k')]
    pub keyword: Option<String>,

    /// Free-text search input.
    #[ortho_config(cli_short = 's')]
    pub search: Option<String>,

    /// Searches good first issues instead of repositories.
    ///
    /// Can be provided via:
    /// - CLI: `--good-first-issues` / `-g`
    /// - Config file: `good_first_issues = true`
    #[ortho_config(cli_short = 'g')]
    pub good_first_issues: bool,

    /// Local `SQLite` database URL/path used for bookmark persistence.
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Owner identity (e.g. email) for bookmark operations.
    #[ortho_config(cli_short = 'u')]
    pub user: Option<String>,

    /// Bookmarks the repository with this id after a repository search.
    #[ortho_config()]
    pub save: Option<u64>,

    /// Lists saved bookmarks and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--list-saved`
    /// - Config file: `list_saved = true`
    #[ortho_config()]
    pub list_saved: bool,

    /// Debounce window in milliseconds applied by embedding UIs.
    #[ortho_config()]
    pub debounce_ms: u64,
}

impl Default for OpenFindrConfig {
    fn default() -> Self {
        Self {
            token: None,
            language: None,
            popularity: None,
            keyword: None,
            search: None,
            good_first_issues: false,
            database_url: None,
            user: None,
            save: None,
            list_saved: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl OpenFindrConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
    }

    /// Language facet, falling back to the built-in default.
    #[must_use]
    pub fn language_or_default(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
    }

    /// Operation mode implied by the flags.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.list_saved {
            OperationMode::ListSaved
        } else if self.good_first_issues {
            OperationMode::GoodFirstIssues
        } else {
            OperationMode::Repositories
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{OpenFindrConfig, OperationMode};

    #[rstest]
    fn default_mode_is_repository_search() {
        let config = OpenFindrConfig::default();
        assert_eq!(
            config.operation_mode(),
            OperationMode::Repositories,
            "default mode mismatch"
        );
        assert_eq!(config.debounce_ms, 500, "default debounce mismatch");
    }

    #[rstest]
    fn list_saved_wins_over_good_first_issues() {
        let config = OpenFindrConfig {
            list_saved: true,
            good_first_issues: true,
            ..OpenFindrConfig::default()
        };
        assert_eq!(
            config.operation_mode(),
            OperationMode::ListSaved,
            "list-saved should take precedence"
        );
    }

    #[rstest]
    fn token_falls_back_to_github_token_env() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghp_legacy"))]);
        let config = OpenFindrConfig::default();
        assert_eq!(
            config.resolve_token().as_deref(),
            Some("ghp_legacy"),
            "legacy environment fallback mismatch"
        );
    }

    #[rstest]
    fn explicit_token_wins_over_env() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghp_legacy"))]);
        let config = OpenFindrConfig {
            token: Some("ghp_explicit".to_owned()),
            ..OpenFindrConfig::default()
        };
        assert_eq!(
            config.resolve_token().as_deref(),
            Some("ghp_explicit"),
            "explicit token should win"
        );
    }

    #[rstest]
    fn language_defaults_to_javascript() {
        let config = OpenFindrConfig::default();
        assert_eq!(
            config.language_or_default(),
            "javascript",
            "language default mismatch"
        );
    }
}
