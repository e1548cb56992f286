//! Client-side note state.
//!
//! [`NotesController`] keeps the last fetched notes, the search text and the
//! form mode. Searching never hits the network; every mutation performs one
//! remote call and patches the cache from its result. Failures are reported
//! through a [`Notifier`] and leave the cache as it was.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use tracing::{debug, warn};

use scribe_core::{logging, sort_most_recent_first, Note};

use crate::api::NotesApi;

// Alert texts shown through the notifier.
pub const LOAD_FAILED: &str = "Failed to load notes.";
pub const CREATE_FAILED: &str = "Error creating note";
pub const UPDATE_FAILED: &str = "Error updating note";
pub const DELETE_FAILED: &str = "Error deleting note";

/// Blocking user-facing alert.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Whether the form creates a new note or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn form_label(&self) -> &'static str {
        match self {
            FormMode::Create => "New Note",
            FormMode::Edit(_) => "Editing Note",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Save Note",
            FormMode::Edit(_) => "Update Note",
        }
    }
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: String,
    pub title: String,
    /// `"Updated: <time>"` or `"Created: <time>"`.
    pub meta: String,
}

impl NoteRow {
    fn render<Tz>(note: &Note, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (label, at) = match note.updated_at {
            Some(updated) => ("Updated", updated),
            None => ("Created", note.created_at),
        };
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            meta: format!(
                "{}: {}",
                label,
                at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

pub struct NotesController<A, N> {
    api: A,
    notifier: N,
    notes: Vec<Note>,
    search: String,
    mode: FormMode,
}

impl<A: NotesApi, N: Notifier> NotesController<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            notes: Vec::new(),
            search: String::new(),
            mode: FormMode::Create,
        }
    }

    /// Cached notes in the order they were received or inserted.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id.as_str()),
        }
    }

    /// Replace the cache with the server's notes.
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(notes) => {
                debug!({ logging::NOTE_COUNT } = notes.len(), "client: notes loaded");
                self.notes = notes;
                true
            }
            Err(e) => self.fail(LOAD_FAILED, &e),
        }
    }

    /// Cached notes matching the search text, most recently modified first.
    pub fn visible_notes(&self) -> Vec<Note> {
        let query = self.search.trim().to_lowercase();
        let mut visible: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.matches(&query))
            .cloned()
            .collect();
        sort_most_recent_first(&mut visible);
        visible
    }

    /// Visible notes rendered in local time.
    pub fn rows(&self) -> Vec<NoteRow> {
        self.rows_in(&Local)
    }

    /// Visible notes rendered in the given time zone.
    pub fn rows_in<Tz>(&self, tz: &Tz) -> Vec<NoteRow>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.visible_notes()
            .iter()
            .map(|note| NoteRow::render(note, tz))
            .collect()
    }

    /// Enter edit mode for a cached note and return it for pre-filling.
    pub fn select(&mut self, id: &str) -> Option<&Note> {
        let note = self.notes.iter().find(|n| n.id == id)?;
        self.mode = FormMode::Edit(note.id.clone());
        Some(note)
    }

    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Create;
    }

    /// Save the form. Blank input is ignored and returns `false`.
    ///
    /// The form returns to create mode after every attempt.
    pub async fn submit(&mut self, title: &str, content: &str) -> bool {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return false;
        }

        let saved = match self.mode.clone() {
            FormMode::Create => match self.api.create(title, content).await {
                Ok(note) => {
                    debug!({ logging::NOTE_ID } = note.id.as_str(), "client: note created");
                    self.notes.insert(0, note);
                    true
                }
                Err(e) => self.fail(CREATE_FAILED, &e),
            },
            FormMode::Edit(id) => match self.api.update(&id, title, content).await {
                Ok(note) => {
                    debug!({ logging::NOTE_ID } = note.id.as_str(), "client: note updated");
                    if let Some(slot) = self.notes.iter_mut().find(|n| n.id == id) {
                        *slot = note;
                    }
                    true
                }
                Err(e) => self.fail(UPDATE_FAILED, &e),
            },
        };

        self.cancel_edit();
        saved
    }

    /// Delete a note. A note the server no longer has counts as deleted.
    pub async fn delete(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                debug!({ logging::NOTE_ID } = id, "client: note already gone");
            }
            Err(e) => return self.fail(DELETE_FAILED, &e),
        }

        self.notes.retain(|n| n.id != id);
        if self.editing_id() == Some(id) {
            self.cancel_edit();
        }
        true
    }

    fn fail(&self, alert: &str, err: &dyn Display) -> bool {
        let detail = err.to_string();
        warn!({ logging::ERROR_MSG } = detail.as_str(), "client: {}", alert);
        self.notifier.alert(alert);
        false
    }
}
