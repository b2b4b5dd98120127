//! HTTP request and response types exchanged with a `Transport`.
//!
//! # Design
//! These types describe a request and the metadata of its response as plain
//! data. The dispatcher builds an `HttpRequest`, a `Transport` turns it into
//! bytes on the wire, and the resulting status line and headers come back as
//! an `HttpResponse`. Keeping them as data lets tests swap in a fake
//! transport and inspect exactly what would have been sent.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// The method token as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request payload.
///
/// A request carries at most one body, so form data and JSON are mutually
/// exclusive variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Sent as `key=value` pairs joined by `&`, in key order.
    ///
    /// Keys and values are NOT percent-encoded; callers must avoid `&`, `=`
    /// and non-ASCII characters or encode them beforehand.
    Form(BTreeMap<String, String>),

    /// Pre-serialized JSON, sent with `Content-Type: application/json`.
    Json(Vec<u8>),
}

impl Body {
    /// Build a form body from key/value pairs. Later duplicates win.
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Serialize `value` with serde_json into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Body::Json)
    }

    /// The bytes placed on the wire.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Body::Form(fields) => fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
                .into_bytes(),
            Body::Json(bytes) => bytes.clone(),
        }
    }

    /// The `Content-Type` this body sets explicitly, if any. Form bodies
    /// leave the content type to the transport.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Form(_) => None,
            Body::Json(_) => Some("application/json"),
        }
    }
}

/// Header fields in the order they were received.
///
/// Lookup is case-insensitive: `get("Content-Type")` finds a header the
/// transport reported as `content-type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Headers(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A fully-formed request handed to a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

/// Status line and headers of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tokens() {
        let tokens: Vec<_> = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ]
        .iter()
        .map(HttpMethod::to_string)
        .collect();
        assert_eq!(tokens, ["GET", "POST", "PUT", "PATCH", "DELETE"]);
    }

    #[test]
    fn single_form_pair_encodes_plainly() {
        let body = Body::form([("key", "value")]);
        assert_eq!(body.encode(), b"key=value");
        assert_eq!(body.content_type(), None);
    }

    #[test]
    fn form_pairs_join_in_key_order() {
        let body = Body::form([("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(String::from_utf8(body.encode()).unwrap(), "a=1&b=2&c=3");
    }

    #[test]
    fn form_values_are_not_percent_encoded() {
        let body = Body::form([("q", "a b&c")]);
        assert_eq!(String::from_utf8(body.encode()).unwrap(), "q=a b&c");
    }

    #[test]
    fn empty_form_encodes_to_nothing() {
        let body = Body::form(Vec::<(String, String)>::new());
        assert!(body.encode().is_empty());
    }

    #[test]
    fn json_body_sets_content_type() {
        let body = Body::json(&serde_json::json!({"id": 1})).unwrap();
        assert_eq!(body.encode(), br#"{"id":1}"#);
        assert_eq!(body.content_type(), Some("application/json"));
    }

    #[test]
    fn raw_json_bytes_pass_through() {
        let body = Body::Json(b"[1, 2]".to_vec());
        assert_eq!(body.encode(), b"[1, 2]");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let headers: Headers = [("content-type", "application/json")].into_iter().collect();
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert_eq!(headers.get("Accept"), None);
    }

    #[test]
    fn header_lookup_returns_first_duplicate() {
        let mut headers = Headers::new();
        headers.insert("Set-Cookie", "a=1");
        headers.insert("set-cookie", "b=2");
        assert_eq!(headers.get("set-cookie"), Some("a=1"));
        assert_eq!(headers.len(), 2);
    }
}
