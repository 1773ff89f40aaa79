//! # Header Generation Service
//!
//! Application service implementing [`HeaderSigningApi`].
//!
//! ## Flow
//!
//! 1. Validate access code and secret key
//! 2. Read the timestamp from the `Clock` port
//! 3. Draw a request id from the `RequestIdGenerator` port
//! 4. Canonicalize the body through the `Canonicalizer` port
//! 5. Sign and assemble the `AuthHeaders` record
//!
//! Each call is independent. Two calls with the same inputs produce
//! different headers (fresh timestamp and request id); that is what gives
//! the receiving side replay protection.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::adapters::clock::SystemClock;
use crate::adapters::request_id::UuidRequestIdGenerator;
use crate::domain::canonical::JsonCanonicalizer;
use crate::domain::config::Credentials;
use crate::domain::errors::AuthError;
use crate::domain::headers::AuthHeaders;
use crate::domain::signature;
use crate::ports::inbound::HeaderSigningApi;
use crate::ports::outbound::{Canonicalizer, Clock, RequestIdGenerator};

/// RT header generator.
///
/// Generic over its time, id and canonicalization capabilities.
/// [`HeaderGenerator::new`] wires the production adapters.
#[derive(Debug, Clone, Default)]
pub struct HeaderGenerator<
    C = SystemClock,
    R = UuidRequestIdGenerator,
    K = JsonCanonicalizer,
> {
    clock: C,
    request_ids: R,
    canonicalizer: K,
}

impl HeaderGenerator {
    /// Generator backed by the system clock, UUID v4 ids and sorted-key JSON.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, R: RequestIdGenerator> HeaderGenerator<C, R, JsonCanonicalizer> {
    /// Generator with injected clock and request id source.
    pub fn with_providers(clock: C, request_ids: R) -> Self {
        Self::with_canonicalizer(clock, request_ids, JsonCanonicalizer)
    }
}

impl<C: Clock, R: RequestIdGenerator, K: Canonicalizer> HeaderGenerator<C, R, K> {
    /// Generator with every capability injected.
    pub fn with_canonicalizer(clock: C, request_ids: R, canonicalizer: K) -> Self {
        Self {
            clock,
            request_ids,
            canonicalizer,
        }
    }

    /// Generate headers for any serializable body.
    ///
    /// # Errors
    /// * `AuthError::InvalidInput` - access code, secret key or the drawn
    ///   request id is empty
    /// * `AuthError::Serialization` - body cannot be represented as JSON
    pub fn generate<T: Serialize + ?Sized>(
        &self,
        access_code: &str,
        secret_key: &str,
        body: &T,
    ) -> Result<AuthHeaders, AuthError> {
        validate_inputs(access_code, secret_key)?;
        let body = serde_json::to_value(body)?;
        self.sign_value(access_code, secret_key, &body)
    }

    /// Generate headers using stored credentials.
    pub fn generate_for<T: Serialize + ?Sized>(
        &self,
        credentials: &Credentials,
        body: &T,
    ) -> Result<AuthHeaders, AuthError> {
        self.generate(
            &credentials.access_code,
            credentials.secret_key.expose(),
            body,
        )
    }

    fn sign_value(
        &self,
        access_code: &str,
        secret_key: &str,
        body: &Value,
    ) -> Result<AuthHeaders, AuthError> {
        let canonical_body = self.canonicalizer.canonicalize(body)?;
        let timestamp = self.clock.now_millis().to_string();
        let request_id = self.request_ids.next_id();
        if request_id.trim().is_empty() {
            return Err(AuthError::empty("request_id"));
        }

        let signature = signature::sign(
            access_code,
            secret_key,
            &timestamp,
            &request_id,
            &canonical_body,
        );

        debug!(
            access_code,
            timestamp = %timestamp,
            request_id = %request_id,
            body_len = canonical_body.len(),
            "Generated RT auth headers"
        );

        Ok(AuthHeaders::new(
            access_code.to_string(),
            timestamp,
            request_id,
            signature,
        ))
    }
}

impl<C: Clock, R: RequestIdGenerator, K: Canonicalizer> HeaderSigningApi
    for HeaderGenerator<C, R, K>
{
    fn generate_headers(
        &self,
        access_code: &str,
        secret_key: &str,
        body: &Value,
    ) -> Result<AuthHeaders, AuthError> {
        validate_inputs(access_code, secret_key)?;
        self.sign_value(access_code, secret_key, body)
    }
}

/// Generate RT headers with the production clock and request ids.
///
/// # Errors
/// * `AuthError::InvalidInput` - access code or secret key is empty
/// * `AuthError::Serialization` - body cannot be represented as JSON
pub fn generate_headers<T: Serialize + ?Sized>(
    access_code: &str,
    secret_key: &str,
    body: &T,
) -> Result<AuthHeaders, AuthError> {
    HeaderGenerator::new().generate(access_code, secret_key, body)
}

fn validate_inputs(access_code: &str, secret_key: &str) -> Result<(), AuthError> {
    if access_code.trim().is_empty() {
        return Err(AuthError::empty("access_code"));
    }
    if secret_key.trim().is_empty() {
        return Err(AuthError::empty("secret_key"));
    }
    Ok(())
}
