/// Error types for the estimator
use thiserror::Error;

/// Errors raised by the configuration manager and its persistence layer
#[derive(Debug, Error)]
pub enum EstimateError {
    /// No configuration with this id exists in the estimate
    #[error("Configuration not found: {0}")]
    NotFound(String),

    /// A draft opened on one configuration was committed onto another
    #[error("Draft for {draft} cannot update configuration {target}")]
    DraftMismatch { draft: String, target: String },

    /// Stored snapshot is not JSON at all
    #[error("Saved estimate is not valid JSON: {0}")]
    MalformedSnapshot(#[source] serde_json::Error),

    /// Stored snapshot is JSON but not a list of configurations
    #[error("Saved estimate is corrupt: {0}")]
    CorruptSnapshot(String),

    /// Reading or writing the snapshot slot failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Encoding the collection failed
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised while loading or validating a price catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An option list that must stay non-empty has no entries
    #[error("Catalog has no {0} entries; at least one is required")]
    EmptyOptionSet(&'static str),

    /// A resource definition breaks its bounds invariants
    #[error("Invalid resource definition '{id}': {reason}")]
    InvalidResource { id: String, reason: String },

    /// A price or multiplier is negative or not a finite number
    #[error("{kind} '{id}' has a negative or non-finite price")]
    InvalidPrice { kind: &'static str, id: String },

    /// Two entries of the same list share an id
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// An entry points at an id that the catalog does not define
    #[error("{kind} '{id}' references unknown {target} '{target_id}'")]
    UnknownReference {
        kind: &'static str,
        id: String,
        target: &'static str,
        target_id: String,
    },

    /// The catalog file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a catalog
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}
