//! # scribe-client
//!
//! Client side of scribe: the [`NotesApi`] transport, the
//! [`NotesController`] that owns the cached note list and form state, and
//! the configuration used by the `scribe` command-line client.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;

pub use api::{HttpNotesApi, NotesApi};
pub use config::ClientConfig;
pub use controller::{FormMode, NoteRow, NotesController, Notifier};
pub use error::{ClientError, Result};
