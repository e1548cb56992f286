//! # scribe-db
//!
//! Storage layer for scribe.
//!
//! This crate provides:
//! - [`file_store::JsonFileStore`], the JSON document persistence adapter
//! - [`notes::NoteService`], the note repository over any store
//! - [`Database`], the handle the API server shares across requests
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe_db::{CreateNoteRequest, Database};
//!
//! let db = Database::open("data/notes.json");
//! let note = db.notes.insert(CreateNoteRequest::new("Hello", "world")).await?;
//! println!("Created note: {}", note.id);
//! ```

use std::path::PathBuf;
use std::sync::Arc;

pub mod file_store;
pub mod notes;

// Test fixtures for integration tests
// Note: Always compiled so integration tests in other crates can use them
pub mod test_fixtures;

// Re-export core types
pub use scribe_core::*;

use file_store::JsonFileStore;
use notes::NoteService;

/// Shared handle to the note repository.
#[derive(Clone)]
pub struct Database {
    pub notes: Arc<dyn NoteRepository>,
}

impl Database {
    /// Database backed by the JSON document at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_repository(NoteService::new(JsonFileStore::new(path)))
    }

    /// Database over an arbitrary repository implementation.
    pub fn with_repository(repo: impl NoteRepository + 'static) -> Self {
        Self {
            notes: Arc::new(repo),
        }
    }
}
