//! # Error Types
//!
//! This module defines error types used throughout the cinta library.

use thiserror::Error;

/// Main error type for cinta operations
#[derive(Debug, Error)]
pub enum CintaError {
    /// QR code payload exceeds what the printer's symbol storage accepts.
    ///
    /// Raised before any frame byte is produced, so a failed QR request
    /// never leaves a partial command sequence behind.
    #[error("QR payload too long: {len} bytes (max {max})")]
    PayloadTooLong { len: usize, max: usize },

    /// Transport-level errors (connection, write, status read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// An option value that does not map onto any printer setting
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Image decoding or payload decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for cinta operations
pub type CintaResult<T> = Result<T, CintaError>;
