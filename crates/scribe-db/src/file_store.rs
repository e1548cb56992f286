//! JSON document storage for the note collection.
//!
//! The whole collection lives in a single pretty-printed JSON array.
//! Every `load` reads the file and every `save` rewrites it; nothing is
//! cached between calls.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe_db::file_store::JsonFileStore;
//! use scribe_db::NoteStore;
//!
//! let store = JsonFileStore::new("data/notes.json");
//! let notes = store.load().await?; // creates `[]` on first use
//! store.save(&notes).await?;
//! ```

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use scribe_core::{logging, Note, NoteStore, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Document contents written when the store is first created.
const EMPTY_DOCUMENT: &str = "[]";

/// Filesystem-backed [`NoteStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the document at `path`. Nothing is touched until
    /// the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    async fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                warn!(parent = %parent.display(), error = %e, "file_store: create_dir_all failed");
                e
            })?;
        }
        Ok(())
    }

    /// Create the document with an empty collection if it does not exist.
    ///
    /// Uses `create_new` so a concurrent save that already renamed its
    /// document into place is never overwritten.
    async fn ensure_exists(&self) -> Result<()> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        self.create_parent_dir().await?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        file.write_all(EMPTY_DOCUMENT.as_bytes()).await?;
        file.flush().await?;
        let path = self.path.display().to_string();
        info!(
            { logging::STORE_PATH } = path.as_str(),
            "file_store: created empty note document"
        );
        Ok(())
    }

    /// Full rewrite: temp file + rename.
    async fn write_atomic(&self, data: &[u8]) -> Result<()> {
        self.create_parent_dir().await?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            warn!(temp_path = %temp_path.display(), error = %e, "file_store: File::create failed");
            e
        })?;

        let written = async {
            file.write_all(data).await.map_err(|e| {
                warn!(error = %e, "file_store: write_all failed");
                e
            })?;
            file.sync_all().await.map_err(|e| {
                warn!(error = %e, "file_store: sync_all failed");
                e
            })?;
            drop(file);
            fs::rename(&temp_path, &self.path).await.map_err(|e| {
                warn!(from = %temp_path.display(), to = %self.path.display(), error = %e, "file_store: rename failed");
                e
            })?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = written {
            // Best-effort cleanup.
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Parse a note document. Empty or whitespace-only content is an empty collection.
pub fn parse_document(raw: &str) -> Result<Vec<Note>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Serialize a collection the way it is stored on disk (two-space indent).
pub fn render_document(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

#[async_trait]
impl NoteStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Note>> {
        self.ensure_exists().await?;
        let raw = fs::read_to_string(&self.path).await?;
        let notes = parse_document(&raw)?;
        debug!(
            { logging::NOTE_COUNT } = notes.len(),
            { logging::DOCUMENT_BYTES } = raw.len(),
            "file_store: load"
        );
        Ok(notes)
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        let data = render_document(notes)?;
        self.write_atomic(data.as_bytes()).await?;
        debug!(
            { logging::NOTE_COUNT } = notes.len(),
            { logging::DOCUMENT_BYTES } = data.len(),
            "file_store: save"
        );
        Ok(())
    }
}
