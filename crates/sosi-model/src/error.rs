// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for SOSI reading operations
//!
//! Only structural failures are errors. Per-record data-quality problems
//! (malformed values, dangling references, unknown tags) are absorbed by the
//! reader and never surface here.

use thiserror::Error;

/// Result type alias for SOSI operations
pub type Result<T> = std::result::Result<T, SosiError>;

/// Errors that can occur while opening or reading a SOSI data source
#[derive(Error, Debug)]
pub enum SosiError {
    /// Write or update access requested from a read-only build
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The file could not be opened or is not a SOSI file
    #[error("Failed to open {path}: {reason}")]
    OpenFailure { path: String, reason: String },

    /// Invalid SOSI file structure
    #[error("Invalid SOSI format: {0}")]
    InvalidFormat(String),

    /// Failed to parse the `.HODE` section
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A data source was opened before the type registry was populated
    #[error("SOSI type registry has not been initialized")]
    RegistryNotInitialized,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SosiError {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        SosiError::InvalidFormat(msg.into())
    }

    /// Create a new header error
    pub fn header(msg: impl Into<String>) -> Self {
        SosiError::InvalidHeader(msg.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        SosiError::UnsupportedOperation(operation.into())
    }

    /// Create an open failure for `path`
    pub fn open_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SosiError::OpenFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
