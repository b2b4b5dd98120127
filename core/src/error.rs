//! Error types for request dispatch, transport and response decoding.
//!
//! # Design
//! Three separate enums mirror the three places a call can go wrong:
//! building the request (`RequestError`, reported synchronously), moving it
//! over the wire (`TransportError`, captured inside the `Response` or
//! surfaced by `Requests::fetch`), and reading the result
//! (`DecodeError`, returned by `Response` accessors). HTTP 4xx/5xx statuses
//! are not errors at any of these layers.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors raised while building or dispatching a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The URL could not be parsed. Nothing was sent.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A JSON body could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport finished without producing a response body.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors returned by `Response` accessors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The exchange produced no body bytes.
    #[error("response has no body")]
    MissingBody,

    /// The body is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// The body does not match the requested shape.
    #[error("deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport did not complete with an HTTP response, so there is no
    /// status line or header block to read.
    #[error("no HTTP response metadata available")]
    MissingMetadata,
}

/// A failure reported by the transport (DNS, connect, TLS, I/O).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ureq::Error> for TransportError {
    fn from(error: ureq::Error) -> Self {
        Self::new(error.to_string())
    }
}
