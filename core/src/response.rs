//! The outcome of a single HTTP exchange.

use serde::de::DeserializeOwned;

use crate::error::{DecodeError, TransportError};
use crate::http::{Headers, HttpResponse};
use crate::transport::Exchange;

/// Everything a transport returned for one request.
///
/// Decoded views (`text`, `json`) are computed from the stored bytes on
/// every call; nothing is cached and the bytes are never mutated.
#[derive(Debug, Clone)]
pub struct Response {
    url: String,
    data: Option<Vec<u8>>,
    response: Option<HttpResponse>,
    error: Option<TransportError>,
}

impl Response {
    pub fn new(
        url: impl Into<String>,
        data: Option<Vec<u8>>,
        response: Option<HttpResponse>,
        error: Option<TransportError>,
    ) -> Self {
        Self {
            url: url.into(),
            data,
            response,
            error,
        }
    }

    pub(crate) fn from_exchange(url: impl Into<String>, exchange: Exchange) -> Self {
        Self::new(url, exchange.data, exchange.response, exchange.error)
    }

    /// The URL exactly as the caller supplied it.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    /// The body decoded as UTF-8.
    pub fn text(&self) -> Result<String, DecodeError> {
        let data = self.data.as_ref().ok_or(DecodeError::MissingBody)?;
        Ok(String::from_utf8(data.clone())?)
    }

    /// The body decoded as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let data = self.data.as_deref().ok_or(DecodeError::MissingBody)?;
        Ok(serde_json::from_slice(data)?)
    }

    pub fn headers(&self) -> Result<&Headers, DecodeError> {
        self.metadata().map(|r| &r.headers)
    }

    pub fn status_code(&self) -> Result<u16, DecodeError> {
        self.metadata().map(|r| r.status)
    }

    fn metadata(&self) -> Result<&HttpResponse, DecodeError> {
        self.response.as_ref().ok_or(DecodeError::MissingMetadata)
    }
}
