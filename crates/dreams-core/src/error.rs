//! # Error Hierarchy
//!
//! A single error kind for the whole checker: [`IntegrityViolation`]. Every
//! unmet condition, unreadable input, or failed external tool is fatal to
//! the run, so there is no warning tier and no recovery path.
//!
//! Variants carry the artifact path or command involved so that a failure
//! can be diagnosed from the message alone.

use std::path::PathBuf;

use thiserror::Error;

/// Any condition that makes the artifact bundle unfit for release.
#[derive(Error, Debug)]
pub enum IntegrityViolation {
    /// A check's assertion did not hold.
    #[error("{message}")]
    Condition {
        /// What was expected and what was found.
        message: String,
    },

    /// A required input file does not exist.
    #[error("missing file: {}", path.display())]
    MissingFile {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    /// An input exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document failed to parse or did not have the expected shape.
    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        /// The document path.
        path: PathBuf,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An external tool exited with a non-zero status.
    #[error("Command failed ({command}, {status}):\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    ToolFailed {
        /// The full command line, space-joined.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// An external tool could not be started at all.
    #[error("Command could not be started ({command}): {source}")]
    ToolUnavailable {
        /// The full command line, space-joined.
        command: String,
        /// The spawn error.
        #[source]
        source: std::io::Error,
    },
}

impl IntegrityViolation {
    /// Build a [`IntegrityViolation::Condition`] from any message.
    pub fn condition(message: impl Into<String>) -> Self {
        Self::Condition {
            message: message.into(),
        }
    }
}

/// Result alias used by every check.
pub type IntegrityResult<T> = Result<T, IntegrityViolation>;

/// Fail with a [`IntegrityViolation::Condition`] unless `condition` holds.
///
/// The message is built lazily so passing checks never pay for formatting.
pub fn ensure<F>(condition: bool, message: F) -> IntegrityResult<()>
where
    F: FnOnce() -> String,
{
    if condition {
        Ok(())
    } else {
        Err(IntegrityViolation::condition(message()))
    }
}
