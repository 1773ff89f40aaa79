//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the header generator depends on. Injecting them keeps the
//! generator free of ambient process state, so tests can pin the clock and
//! request id and assert exact signatures.

use serde_json::Value;

use crate::domain::errors::AuthError;

/// Source of "now".
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Source of per-request correlation ids.
pub trait RequestIdGenerator: Send + Sync {
    /// Produce an id for one request. Must be non-empty (the generator
    /// rejects blank ids) and, for production implementations, unique with
    /// overwhelming probability.
    fn next_id(&self) -> String;
}

/// Strategy turning a request body into the exact string that gets signed.
pub trait Canonicalizer: Send + Sync {
    /// Serialize `body` deterministically.
    ///
    /// # Errors
    /// * `AuthError::Serialization` - the body has no canonical form
    fn canonicalize(&self, body: &Value) -> Result<String, AuthError>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<T: RequestIdGenerator + ?Sized> RequestIdGenerator for &T {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

impl<T: Canonicalizer + ?Sized> Canonicalizer for &T {
    fn canonicalize(&self, body: &Value) -> Result<String, AuthError> {
        (**self).canonicalize(body)
    }
}
