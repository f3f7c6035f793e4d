//! Error types for AdaHuff operations.
//!
//! Truncated or corrupted compressed input has no variant here:
//! the wire format has no length field or checksum, so such input
//! decodes to a shorter or different output instead of failing.

use std::io;
use thiserror::Error;

/// The main error type for AdaHuff operations.
#[derive(Debug, Error)]
pub enum AdaHuffError {
    /// I/O error from the underlying byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoded output grew past the configured cap.
    #[error("Output limit exceeded: decoded data is larger than {limit} bytes")]
    OutputLimitExceeded {
        /// Configured maximum output size in bytes.
        limit: u64,
    },

    /// The adaptive model's internal structure is inconsistent.
    #[error("Corrupted model: {message}")]
    CorruptedModel {
        /// Description of the violated property.
        message: String,
    },
}

/// Result type alias for AdaHuff operations.
pub type Result<T> = std::result::Result<T, AdaHuffError>;

impl AdaHuffError {
    /// Create an output limit error.
    pub fn output_limit(limit: u64) -> Self {
        Self::OutputLimitExceeded { limit }
    }

    /// Create a corrupted model error.
    pub fn corrupted_model(message: impl Into<String>) -> Self {
        Self::CorruptedModel {
            message: message.into(),
        }
    }
}
