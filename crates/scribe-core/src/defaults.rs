//! Centralized default constants for scribe.
//!
//! Binaries and tests reference these instead of repeating literals.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const HOST: &str = "0.0.0.0";

/// Default listening port.
pub const PORT: u16 = 4000;

/// Default location of the note document, relative to the working directory.
pub const NOTES_FILE: &str = "data/notes.json";

/// Default directory for static client assets.
pub const PUBLIC_DIR: &str = "public";

/// Default maximum accepted request body.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

// =============================================================================
// ROUTES
// =============================================================================

/// Path prefix of the notes resource.
pub const NOTES_PATH: &str = "/api/notes";

// =============================================================================
// CLIENT
// =============================================================================

/// Default server URL for the command-line client.
pub const SERVER_URL: &str = "http://localhost:4000";
