//! The transport seam and the default ureq-backed transport.
//!
//! # Design
//! `Requests` never touches the network itself. It builds an `HttpRequest`
//! and hands it to a `Transport`, which performs the exchange off the
//! caller's thread and reports back exactly once through a boxed
//! completion. Tests plug in an in-process transport; production code uses
//! `UreqTransport`.
//!
//! Redirects, TLS, connection reuse and timeouts are whatever the
//! underlying `ureq::Agent` does. This layer does not override them.

use std::thread;

use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::error::TransportError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

/// Called once with the outcome of an exchange, on a thread of the
/// transport's choosing.
pub type Completion = Box<dyn FnOnce(Exchange) + Send + 'static>;

/// The raw outcome of one transport call.
///
/// Any combination of fields may be present: a connection failure has only
/// `error`; a response whose body could not be read has `response` and
/// `error` but no `data`.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    pub data: Option<Vec<u8>>,
    pub response: Option<HttpResponse>,
    pub error: Option<TransportError>,
}

impl Exchange {
    pub fn completed(response: HttpResponse, data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            response: Some(response),
            error: None,
        }
    }

    pub fn failed(error: TransportError) -> Self {
        Self {
            data: None,
            response: None,
            error: Some(error),
        }
    }

    /// Status and headers arrived but the body could not be read.
    pub fn unreadable(response: HttpResponse, error: TransportError) -> Self {
        Self {
            data: None,
            response: Some(response),
            error: Some(error),
        }
    }
}

/// An asynchronous HTTP client capability.
///
/// Implementations must not block the calling thread and must invoke
/// `on_complete` exactly once per `execute`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest, on_complete: Completion);
}

/// Runs each exchange on its own thread using a shared `ureq::Agent`.
///
/// Non-2xx statuses are delivered as ordinary responses. Bodies are read in
/// full with no size cap unless one is set with `with_body_limit`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }

    /// Use a caller-configured agent. Callers should keep
    /// `http_status_as_error(false)` or 4xx/5xx responses will surface as
    /// transport failures without a body.
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Refuse bodies larger than `limit` bytes. An oversized body yields an
    /// exchange with status and headers but no data.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest, on_complete: Completion) {
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        thread::spawn(move || on_complete(round_trip(&agent, request, body_limit)));
    }
}

/// Perform the blocking exchange and collect status, headers and body.
///
/// Metadata is kept even when reading the body fails afterwards.
fn round_trip(agent: &Agent, request: HttpRequest, body_limit: u64) -> Exchange {
    let url = request.url.as_str();
    let headers = &request.headers;
    let body = request.body;

    let response = match request.method {
        HttpMethod::Get => send_without_body(agent.get(url), headers, body),
        HttpMethod::Delete => send_without_body(agent.delete(url), headers, body),
        HttpMethod::Post => send_with_body(agent.post(url), headers, body),
        HttpMethod::Put => send_with_body(agent.put(url), headers, body),
        HttpMethod::Patch => send_with_body(agent.patch(url), headers, body),
    };
    let mut response = match response {
        Ok(response) => response,
        Err(error) => return Exchange::failed(error.into()),
    };

    let metadata = HttpResponse {
        status: response.status().as_u16(),
        headers: response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
    };
    match response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()
    {
        Ok(data) => Exchange::completed(metadata, data),
        Err(error) => Exchange::unreadable(metadata, error.into()),
    }
}

fn apply_headers<B>(mut builder: RequestBuilder<B>, headers: &Headers) -> RequestBuilder<B> {
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    builder
}

/// GET and DELETE normally go out without a body; a caller-supplied one is
/// still sent.
fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    headers: &Headers,
    body: Option<Vec<u8>>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = apply_headers(builder, headers);
    match body {
        Some(body) => builder.force_send_body().send(&body[..]),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    headers: &Headers,
    body: Option<Vec<u8>>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = apply_headers(builder, headers);
    match body {
        Some(body) => builder.send(&body[..]),
        None => builder.send_empty(),
    }
}
