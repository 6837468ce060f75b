//! personapath-core
//!
//! Pure domain types, the structured-output schema, and storage key
//! conventions. No AWS SDK dependency; this is the shared vocabulary of the
//! PersonaPath system.

pub mod error;
pub mod models;
pub mod schema;
pub mod storage_keys;
