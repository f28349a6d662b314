//! Error types for profile operations
//!
//! This module defines the errors that can occur at the profile boundary:
//! store lookups and form parsing. Authorization denial is never an error;
//! the engine communicates it through `Decision` values.

use thiserror::Error;
use uuid::Uuid;

/// Profile error types.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile exists with the given id
    #[error("Profile not found: {0}")]
    NotFound(Uuid),

    /// A form field did not contain valid JSON for its expected shape
    #[error("Invalid JSON in {field}: {message}")]
    InvalidFormJson {
        /// The form field that failed to parse.
        field: String,
        /// The underlying parse failure.
        message: String,
    },

    /// The backing profile store failed
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
