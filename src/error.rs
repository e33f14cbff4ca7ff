use crate::automation::{BlockId, TriggerId};
use thiserror::Error;

/// Errors raised by editing operations on an automation.
///
/// Structural invariants (operator counts, edge integrity) are kept by the
/// operations themselves; these variants only report caller mistakes such as
/// stale ids or indices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Block '{0}' does not exist in this automation")]
    BlockNotFound(BlockId),

    #[error("Trigger '{0}' does not exist in this list")]
    TriggerNotFound(TriggerId),

    #[error("Trigger index {index} is out of range for a list of {len} triggers")]
    TriggerIndexOutOfRange { index: usize, len: usize },

    #[error("Logic operator index {index} is out of range for a list of {len} operators")]
    OperatorIndexOutOfRange { index: usize, len: usize },

    #[error("Trigger at index {0} cannot be removed from this list")]
    TriggerNotRemovable(usize),

    #[error("Drop zone '{zone}' references unknown anchor block '{anchor}'")]
    UnknownDropAnchor { zone: String, anchor: BlockId },

    #[error("Drop zone id '{0}' is malformed")]
    MalformedDropZone(String),

    #[error("Cannot save: {0}")]
    SaveBlocked(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the mock authentication layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Errors from automation and session stores.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Store I/O failed for '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to (de)serialize stored data: {0}")]
    Json(String),

    #[error("'{0}' is not a valid storage key")]
    InvalidKey(String),
}

/// Errors raised while loading editor configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
