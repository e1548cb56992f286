//! Test fixtures for note service and API tests.
//!
//! Provides in-memory and deterministic stand-ins for the filesystem,
//! the clock and the id source.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scribe_db::notes::NoteService;
//! use scribe_db::test_fixtures::{FixedClock, MemoryStore, SequentialIds};
//!
//! let svc = NoteService::with_sources(
//!     MemoryStore::default(),
//!     Arc::new(FixedClock::epoch()),
//!     Arc::new(SequentialIds::default()),
//! );
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use scribe_core::{Clock, Error, IdGenerator, Note, NoteStore, Result};

/// In-memory [`NoteStore`] that counts calls and can inject failures.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
}

impl MemoryStore {
    /// Replace the stored collection without counting a save.
    pub fn seed(&self, notes: Vec<Note>) {
        *self.lock() = notes;
    }

    /// Current stored collection.
    pub fn snapshot(&self) -> Vec<Note> {
        self.lock().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make the next `load` fail with a storage error.
    pub fn fail_next_load(&self) {
        self.fail_load.store(true, Ordering::SeqCst);
    }

    /// Make the next `save` fail with a storage error.
    pub fn fail_next_save(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn injected_failure(what: &str) -> Error {
    Error::Storage(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("injected {} failure", what),
    ))
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Note>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load.swap(false, Ordering::SeqCst) {
            return Err(injected_failure("load"));
        }
        Ok(self.snapshot())
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.swap(false, Ordering::SeqCst) {
            return Err(injected_failure("save"));
        }
        *self.lock() = notes.to_vec();
        Ok(())
    }
}

/// Clock that returns a settable instant.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock fixed at 2024-01-01T00:00:00Z.
    pub fn epoch() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Id source yielding `note-1`, `note-2`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, _now: DateTime<Utc>) -> String {
        format!("note-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
