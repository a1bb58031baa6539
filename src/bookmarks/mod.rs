//! Per-result bookmark lifecycle and persistence.
//!
//! Each displayed repository result owns one [`BookmarkSaver`] tracking the
//! save lifecycle `Idle → Saving → {Saved | Failed}` for the current session.
//! `Saved` is terminal: a saved result never becomes saveable again within
//! the session, and at most one persistence call can be in flight per result.
//! Two results are save-independent; state never leaks across repository
//! identities.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::search::RepositoryRecord;

mod store;

pub use store::SqliteBookmarkStore;

mod error;

pub use error::BookmarkStoreError;


/// Opaque user key owning bookmarks, typically an email address. The core
/// never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerIdentity(String);

impl OwnerIdentity {
    /// Wraps a non-blank owner key, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`BookmarkStoreError::BlankOwnerIdentity`] for a blank value.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BookmarkStoreError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookmarkStoreError::BlankOwnerIdentity);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A persisted bookmark row. Created once by the core, never mutated or
/// deleted by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    /// Owner key the bookmark belongs to.
    pub owner: OwnerIdentity,
    /// Repository identifier, stored as text.
    pub repo_id: String,
    /// Repository name at save time.
    pub repo_name: String,
    /// Repository HTML URL at save time.
    pub repo_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Adapter that persists and lists bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Insert one bookmark row.
    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkStoreError>;

    /// List every bookmark owned by `owner`.
    async fn select_all(
        &self,
        owner: &OwnerIdentity,
    ) -> Result<Vec<BookmarkRecord>, BookmarkStoreError>;
}

/// Save lifecycle of one displayed result within one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkState {
    /// No save attempted yet.
    Idle,
    /// A persistence call is in flight.
    Saving,
    /// Persisted; terminal for the session.
    Saved,
    /// The last save attempt failed; retry is permitted.
    Failed {
        /// Error message available for user-visible reporting.
        message: String,
    },
}

/// Outcome reported to the caller of [`BookmarkSaver::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The bookmark was persisted.
    Saved,
    /// The result was already saved this session; nothing happened.
    AlreadySaved,
    /// A save is already in flight; nothing happened.
    SaveInFlight,
    /// No authenticated session; the caller should trigger sign-in.
    SignInRequired,
    /// The persistence adapter failed; retrying is permitted.
    Failed {
        /// Error message for user-visible reporting.
        message: String,
    },
}

/// Bookmark state machine for a single repository result.
pub struct BookmarkSaver {
    repository: RepositoryRecord,
    state: Mutex<BookmarkState>,
}

impl BookmarkSaver {
    /// Creates an `Idle` saver bound to one repository result.
    #[must_use]
    pub fn new(repository: RepositoryRecord) -> Self {
        Self {
            repository,
            state: Mutex::new(BookmarkState::Idle),
        }
    }

    /// The repository this saver is bound to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryRecord {
        &self.repository
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BookmarkState {
        self.lock_state().clone()
    }

    /// Attempts to persist a bookmark for this result.
    ///
    /// No-ops when a save is in flight or already completed. Without an
    /// owner identity the caller is told to trigger sign-in and the state is
    /// left untouched. Otherwise the state moves to `Saving` (claimed under
    /// the per-result lock, so concurrent calls cause exactly one adapter
    /// `insert`), then to `Saved` on success or `Failed` on error; a failed
    /// save may be retried.
    pub async fn save(
        &self,
        owner: Option<&OwnerIdentity>,
        store: &dyn BookmarkStore,
    ) -> SaveOutcome {
        let owner = {
            let mut state = self.lock_state();
            match &*state {
                BookmarkState::Saving => return SaveOutcome::SaveInFlight,
                BookmarkState::Saved => return SaveOutcome::AlreadySaved,
                BookmarkState::Idle | BookmarkState::Failed { .. } => {}
            }
            // The saved check runs before the session check; an
            // unauthenticated save leaves the state as-is.
            let Some(owner) = owner else {
                return SaveOutcome::SignInRequired;
            };
            *state = BookmarkState::Saving;
            owner.clone()
        };

        let record = BookmarkRecord {
            owner,
            repo_id: self.repository.id.to_string(),
            repo_name: self.repository.name.clone(),
            repo_url: self.repository.html_url.clone(),
            created_at: Utc::now(),
        };

        match store.insert(&record).await {
            Ok(()) => {
                *self.lock_state() = BookmarkState::Saved;
                SaveOutcome::Saved
            }
            Err(error) => {
                let message = error.to_string();
                tracing::warn!(repo_id = %record.repo_id, %message, "bookmark save failed");
                *self.lock_state() = BookmarkState::Failed {
                    message: message.clone(),
                };
                SaveOutcome::Failed { message }
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BookmarkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
