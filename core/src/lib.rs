//! Convenience layer over an HTTP transport.
//!
//! # Overview
//! One helper per verb (GET, POST, PUT, PATCH, DELETE) builds a request,
//! optionally attaches a form or JSON body and an `Authorization` header,
//! and submits it to a `Transport`. The result arrives as a `Response`
//! exposing status, headers, text and JSON views of the body.
//!
//! # Design
//! - `Requests` is stateless: it holds only the injected transport, so any
//!   number of calls may run concurrently.
//! - The network lives behind the `Transport` trait. `UreqTransport` is the
//!   default; tests substitute an in-process fake.
//! - Results are delivered through a callback (`Requests::get` and friends)
//!   or a future (`Requests::fetch`).
//! - Accessors on `Response` return `Result`s instead of assuming a body.
//!
//! ```no_run
//! use requests_core::{BearerAuthentication, Body, Requests};
//!
//! let requests = Requests::new();
//! let auth = BearerAuthentication::new("token");
//! requests
//!     .post(
//!         "https://example.com/anything",
//!         Some(Body::form([("key", "value")])),
//!         Some(&auth),
//!         |response| println!("{:?}", response.status_code()),
//!     )
//!     .expect("valid URL");
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;

pub use auth::{Authentication, BearerAuthentication};
pub use client::{build_request, Requests};
pub use error::{DecodeError, RequestError, TransportError};
pub use http::{Body, Headers, HttpMethod, HttpRequest, HttpResponse};
pub use response::Response;
pub use transport::{Completion, Exchange, Transport, UreqTransport};
