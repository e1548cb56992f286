//! Note repository implementation.
//!
//! Every operation reloads the full collection from the store, works on
//! it in memory and, for mutations, writes the full collection back once.
//! Mutations are serialized by an in-process lock so two requests in the
//! same process cannot interleave their load/save pairs. Separate
//! processes sharing one document are not coordinated.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use scribe_core::{
    logging, Clock, CreateNoteRequest, Error, IdGenerator, Note, NoteRepository, NoteStore,
    PatchNoteRequest, RandomIds, Result, SystemClock, UpdateNoteRequest,
};

/// [`NoteRepository`] over any [`NoteStore`].
pub struct NoteService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    write_lock: Mutex<()>,
}

impl<S: NoteStore> NoteService<S> {
    /// Service using the wall clock and an OS-seeded id generator.
    pub fn new(store: S) -> Self {
        Self::with_sources(
            store,
            Arc::new(SystemClock),
            Arc::new(RandomIds::from_entropy()),
        )
    }

    /// Service with explicit time and id sources.
    pub fn with_sources(store: S, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            clock,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate an id not used by any note in `notes`.
    fn fresh_id(&self, notes: &[Note], now: DateTime<Utc>) -> String {
        loop {
            let id = self.ids.next_id(now);
            if !notes.iter().any(|n| n.id == id) {
                return id;
            }
            debug!({ logging::NOTE_ID } = id.as_str(), "notes: regenerating colliding id");
        }
    }

    /// Load, modify the note with `id` in place, stamp `updatedAt`, save.
    async fn modify<F>(&self, id: &str, op: &'static str, apply: F) -> Result<Note>
    where
        F: FnOnce(&mut Note) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(Error::note_not_found)?;

        apply(note);
        note.updated_at = Some(self.clock.now());
        let updated = note.clone();

        self.store.save(&notes).await?;
        info!(
            { logging::OPERATION } = op,
            { logging::NOTE_ID } = id,
            "notes: note modified"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<S: NoteStore> NoteRepository for NoteService<S> {
    async fn list(&self, query: Option<&str>) -> Result<Vec<Note>> {
        let notes = self.store.load().await?;
        let query = query.unwrap_or_default();
        if query.is_empty() {
            return Ok(notes);
        }

        let matched: Vec<Note> = notes.into_iter().filter(|n| n.matches(query)).collect();
        debug!(
            { logging::QUERY } = query,
            { logging::RESULT_COUNT } = matched.len(),
            "notes: search"
        );
        Ok(matched)
    }

    async fn fetch(&self, id: &str) -> Result<Note> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or_else(Error::note_not_found)
    }

    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let (title, content) = req.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;
        let now = self.clock.now();
        let note = Note {
            id: self.fresh_id(&notes, now),
            title,
            content,
            created_at: now,
            updated_at: None,
        };
        notes.push(note.clone());
        self.store.save(&notes).await?;

        info!(
            { logging::OPERATION } = "insert",
            { logging::NOTE_ID } = note.id.as_str(),
            "notes: note created"
        );
        Ok(note)
    }

    async fn update(&self, id: &str, req: UpdateNoteRequest) -> Result<Note> {
        let (title, content) = req.validate()?;
        self.modify(id, "update", move |note| {
            note.title = title;
            note.content = content;
        })
        .await
    }

    async fn patch(&self, id: &str, req: PatchNoteRequest) -> Result<Note> {
        req.validate()?;
        self.modify(id, "patch", move |note| req.apply_to(note)).await
    }

    async fn delete(&self, id: &str) -> Result<Note> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;
        let idx = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(Error::note_not_found)?;

        let removed = notes.remove(idx);
        self.store.save(&notes).await?;

        info!(
            { logging::OPERATION } = "delete",
            { logging::NOTE_ID } = id,
            "notes: note deleted"
        );
        Ok(removed)
    }
}
