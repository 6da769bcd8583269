/*!
 * Error types for the tlmerge application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while locating stored sentences in the file content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// No prefix of the sentence occurs at or after the search floor
    #[error("Couldn't find a sentence in the file (searched from {floor}): {sentence}")]
    StartNotFound {
        /// Stored original sentence
        sentence: String,
        /// Offset the search started from
        floor: usize,
    },

    /// No suffix of the sentence occurs at or after the resolved start
    #[error("Couldn't find the end index for a sentence in the file (searched from {floor}): {sentence}")]
    EndNotFound {
        /// Stored original sentence
        sentence: String,
        /// Offset the search started from
        floor: usize,
    },

    /// Start and end searches anchored inconsistently
    #[error("location start {start} > end {end}, please check the content in the file: {sentence}")]
    InvalidRange {
        /// Stored original sentence
        sentence: String,
        /// Resolved start offset
        start: usize,
        /// Resolved end offset
        end: usize,
    },
}

impl LocationError {
    /// True when a shrink search was exhausted without a match
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StartNotFound { .. } | Self::EndNotFound { .. })
    }

    /// The stored sentence that failed to locate
    pub fn sentence(&self) -> &str {
        match self {
            Self::StartNotFound { sentence, .. }
            | Self::EndNotFound { sentence, .. }
            | Self::InvalidRange { sentence, .. } => sentence,
        }
    }
}

/// Errors that can occur when talking to the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error when sending the request fails
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    /// Error when the response body cannot be decoded
    #[error("Failed to parse store response: {0}")]
    ParseError(String),

    /// Error returned by the store itself
    #[error("Store responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the store
        message: String,
    },

    /// Error establishing a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The requested document does not exist
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The document exists but does not have the expected shape
    #[error("Invalid translation document: {0}")]
    InvalidDocument(String),
}
