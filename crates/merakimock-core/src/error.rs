// ── Core error types ──
//
// The generators themselves are total: malformed CIDRs and unknown
// lookup keys degrade to placeholder values instead of failing. What can
// fail is everything around them: naming a topology that does not exist,
// reading a custom topology document, and talking to the entity store.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Topology errors ──────────────────────────────────────────────
    #[error("Unknown topology: {name}")]
    UnknownTopology { name: String },

    #[error("Invalid custom topology: {message}")]
    InvalidTopology { message: String },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Unknown entity type: {name}")]
    UnknownEntityType { name: String },

    // ── Serialization errors ─────────────────────────────────────────
    #[error("Failed to serialize {entity_type}: {source}")]
    Serialization {
        entity_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse {format} document: {message}")]
    Parse { format: String, message: String },
}
