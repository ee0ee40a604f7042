//! Error taxonomy for the ingestion pipeline.
//!
//! `NotReady` is the ordinary "still processing" answer and is absorbed by
//! the poll loop; every other variant surfaces to the caller as a single
//! human-readable message, never a raw transport code.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum IngestError {
    /// Wrong document type — user-correctable, rejected before any network call.
    #[error("Only PDF reports are supported (got {0})")]
    UnsupportedMediaType(String),

    /// The service rejected the request. Terminal; not retried.
    #[error("Upload failed with status {status}")]
    Transport { status: u16 },

    /// The service could not be reached at all.
    #[error("Could not reach the extraction service: {0}")]
    Connection(String),

    /// Results are not available yet. Expected and transient; retried
    /// internally and never surfaced.
    #[error("Results are not ready yet")]
    NotReady,

    /// The attempt ceiling was reached without a result. A fresh
    /// submission may still succeed later.
    #[error("Processing is taking longer than expected. Please try again later.")]
    TimeoutExceeded { attempts: u32 },

    #[error("Unexpected response from the extraction service: {0}")]
    ResponseParsing(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IngestError {
    /// Whether a fresh submission might succeed later (as opposed to a
    /// malformed or rejected request).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NotReady | Self::TimeoutExceeded { .. } | Self::Connection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_retryable_transport_is_not() {
        assert!(IngestError::TimeoutExceeded { attempts: 30 }.is_retryable());
        assert!(IngestError::NotReady.is_retryable());
        assert!(!IngestError::Transport { status: 422 }.is_retryable());
        assert!(!IngestError::UnsupportedMediaType("text/csv".into()).is_retryable());
    }

    #[test]
    fn messages_are_human_readable() {
        let err = IngestError::TimeoutExceeded { attempts: 30 };
        assert_eq!(
            err.to_string(),
            "Processing is taking longer than expected. Please try again later."
        );

        let err = IngestError::Transport { status: 500 };
        assert_eq!(err.to_string(), "Upload failed with status 500");
    }
}
