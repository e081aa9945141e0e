//! Error types for the VIN decoder.
//!
//! # Design
//! A single `DecoderError` enum is the common error capability: callers can
//! propagate it with `?` or match on the variant to tell a bad input apart
//! from a remote failure. `InvalidVin` is raised before any I/O happens.
//! `Network` covers transport failures and non-2xx statuses, while `Api`
//! covers well-formed transport exchanges whose payload is unusable.

use thiserror::Error;

/// Rule restated in every format error so users know what to fix.
pub const VIN_FORMAT_RULE: &str = "Must be 17 characters (A-Z, 0-9, * allowed, no I, O, or Q)";

/// Errors returned by the validator, the client, and the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecoderError {
    /// The input failed local format validation. No request was made.
    #[error("{reason}")]
    InvalidVin { input: String, reason: String },

    /// The service could not be reached or answered with a non-2xx status.
    #[error("failed to reach vPIC API: {0}")]
    Network(String),

    /// The service answered, but with no usable result or a decode error.
    #[error("API error: {0}")]
    Api(String),
}

/// Coarse classification of a [`DecoderError`], handy for exit codes and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidVin,
    Network,
    Api,
}

impl DecoderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecoderError::InvalidVin { .. } => ErrorKind::InvalidVin,
            DecoderError::Network(_) => ErrorKind::Network,
            DecoderError::Api(_) => ErrorKind::Api,
        }
    }

    /// True for failures on the remote side of the pipeline.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::Api)
    }
}

/// Failure raised by a [`crate::Transport`] before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for DecoderError {
    fn from(err: TransportError) -> Self {
        DecoderError::Network(err.0)
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError(err.to_string())
    }
}
