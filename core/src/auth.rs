//! Authentication capabilities attached to outgoing requests.
//!
//! # Design
//! An `Authentication` produces the value of the `Authorization` header and
//! exposes the credential it was built from. Implementations are immutable
//! and are passed per call, so the dispatcher never owns credentials.
//! Bearer tokens are the only built-in variant; other schemes (Basic,
//! API keys) implement the same trait.

/// A capability that produces an `Authorization` header value.
pub trait Authentication: Send + Sync {
    /// The raw credential.
    fn token(&self) -> &str;

    /// The full `Authorization` header value, scheme included.
    fn authorization_header(&self) -> String;
}

/// `Authorization: Bearer <token>`.
///
/// The token is not validated; any string is accepted, including the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerAuthentication {
    token: String,
}

impl BearerAuthentication {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authentication for BearerAuthentication {
    fn token(&self) -> &str {
        &self.token
    }

    fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
