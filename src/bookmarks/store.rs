//! SQLite-backed bookmark storage.
//!
//! Bookmarks live in a local `SQLite` table with a
//! `UNIQUE(user_email, repo_id)` constraint, so concurrent sessions racing
//! past the per-session state machine still cannot produce duplicate rows;
//! the violation surfaces as [`BookmarkStoreError::DuplicateBookmark`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::Connection;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::result::DatabaseErrorKind;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use super::error::BookmarkStoreError;
use super::{BookmarkRecord, BookmarkStore, OwnerIdentity};

/// SQLite-backed implementation of [`BookmarkStore`].
#[derive(Debug, Clone)]
pub struct SqliteBookmarkStore {
    database_url: String,
}

impl SqliteBookmarkStore {
    /// Creates a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkStoreError::BlankDatabaseUrl`] when the URL is
    /// blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, BookmarkStoreError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(BookmarkStoreError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, BookmarkStoreError> {
        let mut connection = SqliteConnection::establish(&self.database_url).map_err(|error| {
            BookmarkStoreError::ConnectionFailed {
                message: error.to_string(),
            }
        })?;

        // Idempotent bootstrap; one table with a uniqueness constraint over
        // (user_email, repo_id).
        sql_query(
            "CREATE TABLE IF NOT EXISTS saved_repos ( \
               user_email TEXT NOT NULL, \
               repo_id TEXT NOT NULL, \
               repo_name TEXT NOT NULL, \
               repo_url TEXT NOT NULL, \
               created_at TEXT NOT NULL, \
               UNIQUE(user_email, repo_id) \
             );",
        )
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| BookmarkStoreError::SchemaFailed {
            message: error.to_string(),
        })?;

        Ok(connection)
    }
}

#[async_trait]
impl BookmarkStore for SqliteBookmarkStore {
    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkStoreError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO saved_repos (user_email, repo_id, repo_name, repo_url, created_at) \
             VALUES (?, ?, ?, ?, ?);",
        )
        .bind::<Text, _>(record.owner.as_str())
        .bind::<Text, _>(record.repo_id.as_str())
        .bind::<Text, _>(record.repo_name.as_str())
        .bind::<Text, _>(record.repo_url.as_str())
        .bind::<Text, _>(record.created_at.to_rfc3339())
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| match error {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                BookmarkStoreError::DuplicateBookmark
            }
            other => BookmarkStoreError::WriteFailed {
                message: other.to_string(),
            },
        })
    }

    async fn select_all(
        &self,
        owner: &OwnerIdentity,
    ) -> Result<Vec<BookmarkRecord>, BookmarkStoreError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            user_email: String,
            #[diesel(sql_type = Text)]
            repo_id: String,
            #[diesel(sql_type = Text)]
            repo_name: String,
            #[diesel(sql_type = Text)]
            repo_url: String,
            #[diesel(sql_type = Text)]
            created_at: String,
        }

        let mut connection = self.establish_connection()?;

        let rows: Vec<Row> = sql_query(
            "SELECT user_email, repo_id, repo_name, repo_url, created_at \
             FROM saved_repos WHERE user_email = ? ORDER BY created_at;",
        )
        .bind::<Text, _>(owner.as_str())
        .load(&mut connection)
        .map_err(|error| BookmarkStoreError::QueryFailed {
            message: error.to_string(),
        })?;

        rows.into_iter()
            .map(|row| {
                let created_at = DateTime::parse_from_rfc3339(&row.created_at)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .map_err(|error| BookmarkStoreError::QueryFailed {
                        message: format!("invalid created_at timestamp: {error}"),
                    })?;
                Ok(BookmarkRecord {
                    owner: OwnerIdentity::new(&row.user_email)?,
                    repo_id: row.repo_id,
                    repo_name: row.repo_name,
                    repo_url: row.repo_url,
                    created_at,
                })
            })
            .collect()
    }
}
