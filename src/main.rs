//! OpenFindr CLI entrypoint for one-shot discovery and bookmark operations.

use std::io::{self, Write};
use std::process::ExitCode;

use openfindr::{
    ApiToken, BookmarkSaver, BookmarkStore, BookmarkStoreError, FilterState, OctocrabSearchGateway,
    OpenFindrConfig, OwnerIdentity, RawFacets, RepositoryRecord, SaveOutcome, SearchError,
    SearchQuery, SqliteBookmarkStore, ValidationError,
    config::OperationMode,
    search::{IssueSearchGateway, RepositorySearchGateway},
};
use ortho_config::OrthoConfig;
use thiserror::Error;

/// Top-level CLI failures.
#[derive(Debug, Error)]
enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A facet was rejected before any upstream call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The search layer failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Bookmark persistence failed.
    #[error(transparent)]
    Bookmarks(#[from] BookmarkStoreError),

    /// Bookmark operations need an owner identity.
    #[error("owner identity is required (use --user or OPENFINDR_USER)")]
    MissingUser,

    /// Bookmark operations need a database.
    #[error("database URL is required (use --database-url or OPENFINDR_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The requested repository id was not in the current results.
    #[error("repository {repo_id} is not in the current results")]
    UnknownRepository {
        /// The id requested via `--save`.
        repo_id: u64,
    },

    /// Saving requires a signed-in user.
    #[error("sign in to save repositories")]
    SignInRequired,

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::Repositories => run_repository_search(&config).await,
        OperationMode::GoodFirstIssues => run_issue_search(&config).await,
        OperationMode::ListSaved => run_list_saved(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
fn load_config() -> Result<OpenFindrConfig, AppError> {
    OpenFindrConfig::load().map_err(|error| AppError::Configuration {
        message: error.to_string(),
    })
}

fn build_gateway(config: &OpenFindrConfig) -> Result<OctocrabSearchGateway, AppError> {
    let token = ApiToken::new(config.resolve_token().unwrap_or_default())?;
    Ok(OctocrabSearchGateway::for_token(&token)?)
}

async fn run_repository_search(config: &OpenFindrConfig) -> Result<(), AppError> {
    let raw = RawFacets {
        language: Some(config.language_or_default()),
        popularity: config.popularity.clone(),
        keyword: config.keyword.clone(),
        free_text: config.search.clone(),
    };
    let filter = FilterState::validate(&raw)?;
    let query = SearchQuery::for_repositories(&filter);

    let gateway = build_gateway(config)?;
    let records = gateway.search_repositories(&query).await?;

    write_repository_summary(&records)?;

    if let Some(repo_id) = config.save {
        save_repository(config, &records, repo_id).await?;
    }
    Ok(())
}

async fn run_issue_search(config: &OpenFindrConfig) -> Result<(), AppError> {
    let gateway = build_gateway(config)?;
    let query = SearchQuery::for_good_first_issues(config.language.as_deref());
    let results = gateway.search_issues(&query).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{} good first issues in total", results.total_count)?;
    for issue in &results.items {
        writeln!(
            stdout,
            "#{number} [{repo}] {title}\n    {url}",
            number = issue.number,
            repo = issue.repository.full_name,
            title = issue.title,
            url = issue.html_url,
        )?;
    }
    Ok(())
}

async fn run_list_saved(config: &OpenFindrConfig) -> Result<(), AppError> {
    let owner = require_owner(config)?;
    let store = require_store(config)?;
    let bookmarks = store.select_all(&owner).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{} saved repositories", bookmarks.len())?;
    for bookmark in &bookmarks {
        writeln!(
            stdout,
            "{name}\n    {url}",
            name = bookmark.repo_name,
            url = bookmark.repo_url,
        )?;
    }
    Ok(())
}

async fn save_repository(
    config: &OpenFindrConfig,
    records: &[RepositoryRecord],
    repo_id: u64,
) -> Result<(), AppError> {
    let record = records
        .iter()
        .find(|record| record.id == repo_id)
        .ok_or(AppError::UnknownRepository { repo_id })?;

    let owner = config
        .user
        .as_deref()
        .map(OwnerIdentity::new)
        .transpose()?;
    let store = require_store(config)?;

    let saver = BookmarkSaver::new(record.clone());
    let outcome = saver.save(owner.as_ref(), &store).await;

    let mut stdout = io::stdout().lock();
    match outcome {
        SaveOutcome::Saved => writeln!(stdout, "Saved {name}", name = record.name)?,
        SaveOutcome::AlreadySaved | SaveOutcome::SaveInFlight => {
            writeln!(stdout, "{name} is already saved", name = record.name)?;
        }
        SaveOutcome::SignInRequired => return Err(AppError::SignInRequired),
        SaveOutcome::Failed { message } => {
            return Err(AppError::Bookmarks(BookmarkStoreError::WriteFailed {
                message,
            }));
        }
    }
    Ok(())
}

fn require_owner(config: &OpenFindrConfig) -> Result<OwnerIdentity, AppError> {
    let user = config.user.as_deref().ok_or(AppError::MissingUser)?;
    Ok(OwnerIdentity::new(user)?)
}

fn require_store(config: &OpenFindrConfig) -> Result<SqliteBookmarkStore, AppError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or(AppError::MissingDatabaseUrl)?;
    Ok(SqliteBookmarkStore::new(database_url)?)
}

fn write_repository_summary(records: &[RepositoryRecord]) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{} repositories", records.len())?;
    for record in records {
        let description = record.description.as_deref().unwrap_or("no description");
        writeln!(
            stdout,
            "{name} ({stars}\u{2605} {forks} forks)\n    {description}\n    {url}",
            name = record.name,
            stars = record.star_count,
            forks = record.fork_count,
            url = record.html_url,
        )?;
    }
    Ok(())
}
