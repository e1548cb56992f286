//! Transport between the controller and the note server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use scribe_core::{defaults, CreateNoteRequest, DeletedNote, Note, UpdateNoteRequest};

use crate::error::{ClientError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote note operations used by the controller.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch every note.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Create a note and return it as stored.
    async fn create(&self, title: &str, content: &str) -> Result<Note>;

    /// Replace the title and content of an existing note.
    async fn update(&self, id: &str, title: &str, content: &str) -> Result<Note>;

    /// Delete a note and return the removed value.
    async fn delete(&self, id: &str) -> Result<Note>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`NotesApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: Client,
    base_url: String,
}

impl HttpNotesApi {
    /// Client for the server at `base_url` (scheme, host and port).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "server URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, defaults::NOTES_PATH)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, defaults::NOTES_PATH, id)
    }
}

/// Turn a non-success response into [`ClientError::Status`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list(&self) -> Result<Vec<Note>> {
        let response = self.client.get(self.collection_url()).send().await?;
        let notes: Vec<Note> = check(response).await?.json().await?;
        debug!(count = notes.len(), "client: fetched notes");
        Ok(notes)
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&CreateNoteRequest::new(title, content))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, id: &str, title: &str, content: &str) -> Result<Note> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&UpdateNoteRequest::new(title, content))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<Note> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        let deleted: DeletedNote = check(response).await?.json().await?;
        Ok(deleted.note)
    }
}
