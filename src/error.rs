//! Error types for docfixer
//!
//! Only conditions that end the run are represented here. Per-type and
//! per-member mismatches are logged and skipped by the merge engine.

use std::path::PathBuf;
use thiserror::Error;
use crate::xml_tree::XmlTreeError;

/// Main error type for docfixer operations
#[derive(Error, Debug)]
pub enum DocFixError {
    /// IO errors (file operations, directory access, etc.)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing errors in the metadata index
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// XML parsing errors
    #[error("XML parsing error in {file:?}: {source}")]
    Xml {
        file: PathBuf,
        #[source]
        source: XmlTreeError,
    },

    /// Metadata index is structurally inconsistent
    #[error("Metadata error: {message}")]
    Metadata { message: String },

    /// Bad command line
    #[error("{message}")]
    Usage { message: String },

    /// Documentation root does not look like a documentation tree
    #[error("The directory does not seem to be the root for documentation (missing `en' directory)")]
    Layout { root: PathBuf },
}

/// Result type alias for docfixer operations
pub type DocFixResult<T> = Result<T, DocFixError>;

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> DocFixResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> DocFixResult<T> {
        self.map_err(|e| DocFixError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> DocFixResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> DocFixResult<T> {
        self.map_err(|e| DocFixError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
