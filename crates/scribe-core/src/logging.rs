//! Structured logging field name constants for scribe.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work the same across the API and storage layers.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Storage failure, request answered with 500 |
//! | WARN  | Rejected input worth an operator's attention |
//! | INFO  | Lifecycle events (startup, shutdown), note mutations |
//! | DEBUG | Per-operation details (document size, match counts) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Component within the service.
/// Values: "note_service", "file_store", "http", "client"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list", "fetch", "insert", "update", "patch", "delete"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Path of the note document.
pub const STORE_PATH: &str = "store_path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of notes returned by a list or search.
pub const RESULT_COUNT: &str = "result_count";

/// Number of notes in the stored collection.
pub const NOTE_COUNT: &str = "note_count";

/// Byte length of the serialized document.
pub const DOCUMENT_BYTES: &str = "document_bytes";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
