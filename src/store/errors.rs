//! Store error types

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write or read rejected by the shape validator
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Referenced game mode id has no entry under /config/modes
    #[error("Unknown game mode: {0}")]
    UnknownGameMode(String),

    /// No user node for the uid
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// User node already provisioned for the uid
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Game ranking does not include the owning uid
    #[error("Ranking does not include owner uid '{0}'")]
    RankingMissingOwner(String),

    /// Partial update applied to a non-object target
    #[error("Update target is not an object: {0}")]
    NotAnObject(String),

    /// Stored node no longer decodes as its document type
    #[error("Malformed node at '{path}': {reason}")]
    MalformedNode { path: String, reason: String },

    /// Document failed to encode to a store value
    #[error("Encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
