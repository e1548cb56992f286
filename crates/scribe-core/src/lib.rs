//! # scribe-core
//!
//! Core types, traits, and abstractions for scribe.
//!
//! This crate provides the note model, the error taxonomy and the trait
//! seams that the storage, HTTP and client crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{v7_from_parts, RandomIds, SystemClock};
