//! # Error Types
//!
//! Errors raised while generating and verifying RT headers.

use thiserror::Error;

/// Errors that can occur while generating authentication headers.
///
/// None of these are retryable: each one points at bad input or
/// misconfiguration on the caller's side.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A required input was missing or empty.
    #[error("Invalid input: {field} {reason}")]
    InvalidInput {
        /// Name of the offending input
        field: &'static str,
        /// What was wrong with it
        reason: &'static str,
    },

    /// The request body could not be canonicalized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Credentials or verifier settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Shorthand for an empty required field.
    pub(crate) fn empty(field: &'static str) -> Self {
        Self::InvalidInput {
            field,
            reason: "must not be empty",
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Reasons a received set of RT headers is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// A required header was absent or empty.
    #[error("Missing header: {0}")]
    MissingHeader(&'static str),

    /// `RT-Timestamp` is not a decimal millisecond count.
    #[error("Malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// Timestamp outside the accepted window.
    #[error("Timestamp out of range: {timestamp} not within valid window (now={now})")]
    TimestampOutOfRange {
        /// Timestamp carried by the request
        timestamp: u64,
        /// Verifier's current time
        now: u64,
    },

    /// `RT-AccessCode` does not match the expected caller.
    #[error("Access code mismatch: expected {expected}, got {actual}")]
    AccessCodeMismatch {
        /// Access code the verifier was told to expect
        expected: String,
        /// Access code carried by the request
        actual: String,
    },

    /// The request id was already seen inside the replay window.
    #[error("Replay detected: request id {0} already seen")]
    ReplayDetected(String),

    /// Every remembered request id is still live; new ids are refused
    /// until entries expire.
    #[error("Replay cache full: {capacity} live request ids")]
    ReplayCacheFull {
        /// Configured cache capacity
        capacity: usize,
    },

    /// Signature does not match the recomputed value.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Recomputing the signature failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = AuthError::empty("access_code");
        assert_eq!(
            err.to_string(),
            "Invalid input: access_code must not be empty"
        );
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err: AuthError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AuthError::Serialization(_)));
    }
}
