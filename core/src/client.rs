//! Stateless request dispatcher.
//!
//! # Design
//! `Requests` holds only its transport and carries no mutable state between
//! calls. Each verb builds an independent `HttpRequest` with
//! `build_request`, hands it to the transport, and turns the returned
//! `Exchange` into a `Response` for the caller. Concurrent calls share
//! nothing but the transport, which is `Sync`.
//!
//! Two delivery styles are offered. The verb methods take a callback that
//! runs on a transport thread and is skipped entirely when the exchange
//! produced no body bytes. `fetch` returns a future instead; it resolves to
//! `RequestError::Transport` in that case, and dropping it discards the
//! result.

use tokio::sync::oneshot;
use tracing::debug;
use url::Url;

use crate::auth::Authentication;
use crate::error::{RequestError, TransportError};
use crate::http::{Body, Headers, HttpMethod, HttpRequest};
use crate::response::Response;
use crate::transport::{Exchange, Transport, UreqTransport};

/// Dispatches one request per call over an injected `Transport`.
#[derive(Debug, Clone, Default)]
pub struct Requests<T = UreqTransport> {
    transport: T,
}

impl Requests<UreqTransport> {
    pub fn new() -> Self {
        Self {
            transport: UreqTransport::new(),
        }
    }
}

impl<T: Transport> Requests<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn get<F>(
        &self,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.request(HttpMethod::Get, url, body, auth, callback)
    }

    pub fn post<F>(
        &self,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.request(HttpMethod::Post, url, body, auth, callback)
    }

    pub fn put<F>(
        &self,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.request(HttpMethod::Put, url, body, auth, callback)
    }

    pub fn patch<F>(
        &self,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.request(HttpMethod::Patch, url, body, auth, callback)
    }

    pub fn delete<F>(
        &self,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        self.request(HttpMethod::Delete, url, body, auth, callback)
    }

    /// Submit a request and return immediately.
    ///
    /// `callback` runs at most once, on a transport thread. It does not run
    /// when the transport came back without any body bytes (for example a
    /// refused connection); use `fetch` to observe those failures.
    /// A malformed `url` is reported here and nothing is sent.
    pub fn request<F>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
        callback: F,
    ) -> Result<(), RequestError>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        let request = build_request(method, url, body, auth)?;
        debug!(%method, url, "dispatching request");

        let url = url.to_string();
        self.transport.execute(
            request,
            Box::new(move |exchange: Exchange| {
                if exchange.data.is_none() {
                    debug!(
                        %method,
                        url = %url,
                        error = ?exchange.error,
                        "exchange produced no body, dropping completion"
                    );
                    return;
                }
                debug!(
                    %method,
                    url = %url,
                    status = ?exchange.response.as_ref().map(|r| r.status),
                    "request completed"
                );
                callback(Response::from_exchange(url, exchange));
            }),
        );
        Ok(())
    }

    /// Submit a request and await its `Response`.
    ///
    /// Resolves to `RequestError::Transport` when the exchange produced no
    /// body bytes. HTTP error statuses still resolve to `Ok`.
    pub async fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Body>,
        auth: Option<&dyn Authentication>,
    ) -> Result<Response, RequestError> {
        let request = build_request(method, url, body, auth)?;
        debug!(%method, url, "dispatching request");

        let (tx, rx) = oneshot::channel();
        let owned_url = url.to_string();
        self.transport.execute(
            request,
            Box::new(move |exchange: Exchange| {
                let outcome = if exchange.data.is_some() {
                    Ok(Response::from_exchange(owned_url, exchange))
                } else {
                    Err(exchange
                        .error
                        .unwrap_or_else(|| TransportError::new("exchange produced no body")))
                };
                // The receiver is gone when the caller dropped the future.
                let _ = tx.send(outcome);
            }),
        );

        match rx.await {
            Ok(outcome) => Ok(outcome?),
            Err(_) => Err(TransportError::new("transport dropped the completion").into()),
        }
    }
}

/// Build the request a verb call would submit.
///
/// JSON bodies set `Content-Type: application/json`; form bodies leave the
/// content type to the transport. `auth` sets `Authorization`.
pub fn build_request(
    method: HttpMethod,
    url: &str,
    body: Option<Body>,
    auth: Option<&dyn Authentication>,
) -> Result<HttpRequest, RequestError> {
    let parsed = Url::parse(url).map_err(|source| RequestError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let mut headers = Headers::new();
    if let Some(content_type) = body.as_ref().and_then(Body::content_type) {
        headers.insert("Content-Type", content_type);
    }
    if let Some(auth) = auth {
        headers.insert("Authorization", auth.authorization_header());
    }

    Ok(HttpRequest {
        method,
        url: parsed,
        headers,
        body: body.as_ref().map(Body::encode),
    })
}
