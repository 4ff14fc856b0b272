//! Error types for the layout engine
//!
//! Every failure is reported before the tree is touched, so an `Err` from
//! [`Model::dispatch`](crate::model::Model::dispatch) always leaves the model unchanged.

use thiserror::Error;

use crate::model::NodeId;

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Main error type for the layout engine
#[derive(Debug, Error)]
pub enum LayoutError {
    // ==========================================================================
    // Reference Errors
    // ==========================================================================
    #[error("Node {0} is not part of the layout")]
    InvalidReference(NodeId),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid attribute {key}: {reason}")]
    InvalidAttribute { key: String, reason: String },

    // ==========================================================================
    // Document Errors
    // ==========================================================================
    #[error("Malformed layout document: {0}")]
    Document(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn invalid_action(reason: impl Into<String>) -> Self {
        Self::InvalidAction(reason.into())
    }

    pub(crate) fn invalid_attribute(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
