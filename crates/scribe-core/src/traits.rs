//! Core traits for scribe abstractions.
//!
//! These traits define the seams between the HTTP surface, the note
//! service and the persistence adapter, and let tests swap in fakes
//! for the filesystem, the clock and the random source.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CreateNoteRequest, Note, PatchNoteRequest, UpdateNoteRequest};

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Whole-collection persistence for notes.
///
/// Implementations hold no cache: every call reads or rewrites the
/// backing document.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Load every note, creating an empty document if none exists yet.
    async fn load(&self) -> Result<Vec<Note>>;

    /// Replace the stored collection with `notes`.
    async fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Shared stores, so a caller can keep a handle to the store a service owns.
#[async_trait]
impl<S: NoteStore + ?Sized> NoteStore for Arc<S> {
    async fn load(&self) -> Result<Vec<Note>> {
        (**self).load().await
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        (**self).save(notes).await
    }
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List notes, optionally filtered by a case-insensitive substring query.
    async fn list(&self, query: Option<&str>) -> Result<Vec<Note>>;

    /// Fetch a note by id.
    async fn fetch(&self, id: &str) -> Result<Note>;

    /// Create a new note.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Replace title and content of an existing note.
    async fn update(&self, id: &str, req: UpdateNoteRequest) -> Result<Note>;

    /// Replace only the supplied fields of an existing note.
    async fn patch(&self, id: &str, req: PatchNoteRequest) -> Result<Note>;

    /// Remove a note, returning it.
    async fn delete(&self, id: &str) -> Result<Note>;
}

// =============================================================================
// AMBIENT SOURCES
// =============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh note ids.
pub trait IdGenerator: Send + Sync {
    /// Generate an id for a note created at `now`.
    fn next_id(&self, now: DateTime<Utc>) -> String;
}
