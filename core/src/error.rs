//! Error types for the Signaturit API client.
//!
//! # Design
//! One variant per failure class so callers can branch on what went wrong
//! without parsing messages: the request never completed (`Transport`), the
//! vendor answered with a non-2xx status (`HttpError`), the body was not the
//! JSON we expected (`DeserializationError`), or the call was rejected
//! before anything was sent (`MissingParameter`, `File`).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by `SignaturitClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, TLS failure, timeout, truncated body. The
    /// `ureq` error is kept so callers can match on its kind.
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The server returned a non-2xx status. `body` usually holds the
    /// vendor's JSON error payload.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A parameter the endpoint cannot work without was empty or absent.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A local file named for upload could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status for `HttpError`, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
