//! HTTP handlers for scribe-api.

pub mod health;
pub mod notes;
