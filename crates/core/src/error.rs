//! Error types for Serialist operations.
//!
//! [`SerialistError`] covers every failure the pipeline can observe, from a
//! dropped connection to a chapter page whose layout no longer matches the
//! site profile. How far an error travels depends on where it is raised:
//! per-line translation errors are absorbed by the translator, per-chapter
//! errors skip the chapter, and index-page errors abort the run.
//!
//! # Example
//!
//! ```rust
//! use serialist_core::{Result, SerialistError};
//!
//! fn first_line(lines: &[String]) -> Result<&str> {
//!     lines
//!         .first()
//!         .map(String::as_str)
//!         .ok_or_else(|| SerialistError::Structure("no lines".to_string()))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch, extraction and translation operations.
#[derive(Error, Debug)]
pub enum SerialistError {
    /// Transport-level failure (DNS, connection reset, TLS, body read).
    ///
    /// This is the only kind of fetch failure that is retried.
    #[error("Transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    /// Counts as a transport error for retry purposes.
    #[error("Request to {url} timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// The server answered with something other than 200 OK.
    ///
    /// Never retried.
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An expected container was absent from the page.
    ///
    /// Fatal for the run when raised on the index page, fatal only for the
    /// current chapter otherwise.
    #[error("Page structure error: {0}")]
    Structure(String),

    /// A single translation request failed.
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// Site profile file is missing a directive or contains an invalid one.
    #[error("Site configuration error: {0}")]
    SiteConfig(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File or directory write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SerialistError {
    /// Whether a fetch that failed with this error may be attempted again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Result type alias for SerialistError.
pub type Result<T> = std::result::Result<T, SerialistError>;
