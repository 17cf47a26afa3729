//! Error taxonomy for the pack operation
//!
//! Every error is terminal for a single invocation: pack() either fully
//! succeeds or produces no output. There is no retry or partial-success
//! path; recovery is re-invocation after fixing the input.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised by [`crate::packer::Packer::pack`] and the stages it runs.
#[derive(Debug, Error)]
pub enum PackError {
    /// Dependency traversal could not locate a referenced project, or the
    /// reference graph contains a cycle.
    #[error("cyclic or missing project reference: {0}")]
    CyclicOrMissingReference(String),

    /// A module failed to parse; nothing is emitted.
    #[error("parse error in {} at {line}:{column}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// No declaration in the merged unit matches the configured entry name.
    #[error("unable to resolve entry type `{0}`")]
    UnresolvedEntry(String),

    /// More than one declaration matches the configured entry name.
    #[error("entry type `{name}` is ambiguous: {count} declarations match")]
    AmbiguousEntry { name: String, count: usize },

    /// Workspace or project layout problem outside the reference graph
    /// (unreadable manifest, malformed manifest, unreadable source file).
    #[error("workspace error: {message}")]
    Workspace {
        message: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl PackError {
    /// Construct a workspace error without an underlying I/O cause.
    pub fn workspace(message: impl Into<String>) -> Self {
        Self::Workspace {
            message: message.into(),
            source: None,
        }
    }

    /// Construct a workspace error wrapping an I/O failure.
    pub fn workspace_io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Workspace {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Convenience result alias used across the packer.
pub type Result<T> = std::result::Result<T, PackError>;
