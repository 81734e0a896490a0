//! Error types for the isolog_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for isolog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workout form input was rejected by the record builder
    #[error("Invalid workout: {0}")]
    Validation(#[from] ValidationError),

    /// Sign-in was rejected. The message is deliberately generic.
    #[error("{0}")]
    Auth(String),

    /// A command needing a session ran without one
    #[error("Not logged in. Run `isolog login` first.")]
    NotLoggedIn,

    /// Position outside the displayed list
    #[error("No entry at position {index} (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No record with this id in the canonical collection
    #[error("No workout with id {0}")]
    RecordNotFound(Uuid),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Reasons the record builder rejects form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown exercise type '{0}' (expected freeweight or cable)")]
    UnknownExerciseType(String),

    #[error("unknown weight unit '{0}' (expected lb or kg)")]
    UnknownWeightUnit(String),

    /// `input` is the set count as typed
    #[error("set count {input} exceeds the maximum of {max}")]
    TooManySets { input: String, max: u32 },

    #[error("{given} {field} values given but only {expected} expected")]
    TooManyValues {
        field: &'static str,
        given: usize,
        expected: usize,
    },

    /// `set` is 1-based
    #[error("{field} for set {set} is missing")]
    MissingSetValue { field: &'static str, set: usize },

    #[error("{field} for set {set} must be {expected}, got '{value}'")]
    InvalidSetValue {
        field: &'static str,
        set: usize,
        expected: &'static str,
        value: String,
    },

    #[error("record invariant violated: {0}")]
    Invariant(String),
}
