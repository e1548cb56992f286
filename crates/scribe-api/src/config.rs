//! Server configuration.
//!
//! Configuration is read from environment variables (after `.env` is
//! loaded by the binary). Unparseable numeric values fall back to their
//! defaults with a warning rather than aborting startup.
//!
//! | Variable         | Default           |
//! |------------------|-------------------|
//! | `HOST`           | `0.0.0.0`         |
//! | `PORT`           | `4000`            |
//! | `NOTES_FILE`     | `data/notes.json` |
//! | `PUBLIC_DIR`     | `public`          |
//! | `MAX_BODY_BYTES` | `102400`          |

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use scribe_core::defaults;
use tracing::warn;

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Path of the JSON note document.
    pub notes_file: PathBuf,
    /// Directory served as static client assets.
    pub public_dir: PathBuf,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            notes_file: PathBuf::from(defaults::NOTES_FILE),
            public_dir: PathBuf::from(defaults::PUBLIC_DIR),
            max_body_bytes: defaults::MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(base.host),
            port: parse_or("PORT", lookup("PORT"), base.port),
            notes_file: lookup("NOTES_FILE")
                .map(PathBuf::from)
                .unwrap_or(base.notes_file),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(base.public_dir),
            max_body_bytes: parse_or("MAX_BODY_BYTES", lookup("MAX_BODY_BYTES"), base.max_body_bytes),
        }
    }

    /// Resolve the socket address to bind. `HOST` may be a hostname or
    /// an IPv4/IPv6 literal (unbracketed).
    pub async fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| anyhow::anyhow!("HOST {:?} resolved to no addresses", self.host))
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, default = %default, "config: invalid value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.port, 4000);
        assert_eq!(config.notes_file, PathBuf::from("data/notes.json"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("NOTES_FILE", "/tmp/n.json"),
            ("PUBLIC_DIR", "/srv/www"),
            ("MAX_BODY_BYTES", "2048"),
        ]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.notes_file, PathBuf::from("/tmp/n.json"));
        assert_eq!(config.public_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.max_body_bytes, 2048);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ApiConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, 4000);
        let config = ApiConfig::from_lookup(lookup_from(&[("PORT", "70000")]));
        assert_eq!(config.port, 4000);
    }

    #[tokio::test]
    async fn test_bind_addr_resolves_literals_and_names() {
        let config = ApiConfig::from_lookup(lookup_from(&[("HOST", "127.0.0.1"), ("PORT", "8080")]));
        assert_eq!(config.bind_addr().await.unwrap().to_string(), "127.0.0.1:8080");

        let config = ApiConfig::from_lookup(lookup_from(&[("HOST", "::"), ("PORT", "8080")]));
        assert_eq!(config.bind_addr().await.unwrap().to_string(), "[::]:8080");

        let config = ApiConfig::from_lookup(lookup_from(&[("HOST", "localhost")]));
        let addr = config.bind_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 4000);
    }
}
