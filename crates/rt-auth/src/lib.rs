//! # RT Auth
//!
//! Generates and verifies the `RT-*` authentication headers required by the
//! eSIM access API.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Header record, canonical bodies, HMAC signing
//! - **Ports Layer** (`ports/`): Clock, request-id and canonicalizer capabilities
//! - **Adapters Layer** (`adapters/`): System clock, UUID ids, fixed test values
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//! - **Security** (`security.rs`): Receiving-side verification and replay cache
//!
//! ## Wire Contract
//!
//! | Header | Value |
//! |--------|-------|
//! | `RT-AccessCode` | Caller's access code, verbatim |
//! | `RT-Timestamp` | Milliseconds since the Unix epoch |
//! | `RT-RequestID` | UUID v4, 32 lowercase hex chars |
//! | `RT-Signature` | `hex(HMAC-SHA256(secret, timestamp + request_id + access_code + body))` |
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//!
//! let headers = rt_auth::generate_headers("ACC123", "s3cr3t", &json!({"orderNo": "O1"}))?;
//! assert_eq!(headers.access_code(), "ACC123");
//! assert_eq!(headers.signature().len(), 64);
//! # Ok::<(), rt_auth::AuthError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod security;
pub mod service;

// Re-exports
pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::request_id::{FixedRequestId, UuidRequestIdGenerator};
pub use domain::canonical::{canonicalize, JsonCanonicalizer};
pub use domain::config::{Credentials, SecretKey, VerifierConfig};
pub use domain::errors::{AuthError, VerificationError};
pub use domain::headers::{
    AuthHeaders, HEADER_ACCESS_CODE, HEADER_NAMES, HEADER_REQUEST_ID, HEADER_SIGNATURE,
    HEADER_TIMESTAMP,
};
pub use domain::signature::sign;
pub use ports::inbound::HeaderSigningApi;
pub use ports::outbound::{Canonicalizer, Clock, RequestIdGenerator};
pub use security::{HeaderVerifier, ReplayCache};
pub use service::{generate_headers, HeaderGenerator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
