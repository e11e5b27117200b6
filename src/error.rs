//! Error and diagnostic types shared across the crate.
//!
//! Catalog operations fail with a [`CatalogError`] that callers can match on
//! (missing file vs. syntax error vs. rejected mutation). Parsing additionally
//! accumulates [`Diagnostic`] records so a caller can report every problem in
//! a file, not just the first fatal one.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by catalog and message operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file to read does not exist.
    #[error("catalog file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O failure while reading or writing a catalog.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed PO syntax. Carries the first fatal diagnostic; the full
    /// list stays queryable on the catalog that attempted the read.
    #[error("{origin}:{line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    /// A mutation would give two entries in the same domain the same
    /// `(msgctxt, msgid)` key.
    #[error("duplicate message key in domain '{domain}': msgctxt {msgctxt:?}, msgid {msgid:?}")]
    DuplicateKey {
        domain: String,
        msgctxt: Option<String>,
        msgid: String,
    },

    /// A mutation argument the entry table cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// How serious a parse diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recovered from; the entry table is still usable.
    Warning,
    /// The input is rejected; `read` fails after collecting the rest.
    Error,
}

/// One structured parse diagnostic: severity, 1-based line, message.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            message: message.into(),
        }
    }

    pub(crate) fn error(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            line,
            message: message.into(),
        }
    }
}
