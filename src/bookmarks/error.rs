//! Error types for bookmark persistence.

use thiserror::Error;

/// Errors returned by bookmark storage operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookmarkStoreError {
    /// The owner identity was blank.
    #[error("bookmark owner identity must not be blank")]
    BlankOwnerIdentity,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Creating the bookmark table failed.
    #[error("failed to initialise bookmark schema: {message}")]
    SchemaFailed {
        /// Error detail from the DDL execution.
        message: String,
    },

    /// A bookmark for this (owner, repository) pair already exists.
    ///
    /// Raised by the database uniqueness constraint when concurrent sessions
    /// race past the per-session state machine.
    #[error("repository is already bookmarked for this user")]
    DuplicateBookmark,

    /// Writing a bookmark row failed.
    #[error("failed to write bookmark: {message}")]
    WriteFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// Reading bookmark rows failed.
    #[error("failed to read bookmarks: {message}")]
    QueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },
}
