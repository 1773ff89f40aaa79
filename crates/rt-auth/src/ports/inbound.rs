//! # Inbound Ports (Driving Ports / API)
//!
//! The public signing API. Implementations must be thread-safe (`Send + Sync`).

use serde_json::Value;

use crate::domain::errors::AuthError;
use crate::domain::headers::AuthHeaders;

/// Primary header signing API.
///
/// Object-safe: the body is taken as an already-built JSON value. Use
/// [`HeaderGenerator::generate`](crate::HeaderGenerator::generate) for any
/// `Serialize` body.
pub trait HeaderSigningApi: Send + Sync {
    /// Produce a fresh set of RT headers for one request.
    ///
    /// # Errors
    /// * `AuthError::InvalidInput` - access code or secret key is empty
    /// * `AuthError::Serialization` - body has no canonical form
    fn generate_headers(
        &self,
        access_code: &str,
        secret_key: &str,
        body: &Value,
    ) -> Result<AuthHeaders, AuthError>;
}
