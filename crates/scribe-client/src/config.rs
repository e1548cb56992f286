//! Client configuration.
//!
//! `SCRIBE_URL` selects the server (default [`defaults::SERVER_URL`]); a
//! `--url` flag on the command line takes precedence.

use scribe_core::defaults;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the note server.
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: defaults::SERVER_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server_url: lookup("SCRIBE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| defaults::SERVER_URL.to_string()),
        }
    }

    /// Apply a command-line override.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.server_url = url;
        }
        self
    }
}
