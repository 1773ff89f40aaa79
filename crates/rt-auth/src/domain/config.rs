//! Credential and verifier configuration.
//!
//! Credentials come from the environment or from an embedding config file.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Environment variable holding the access code.
pub const ENV_ACCESS_CODE: &str = "RT_ACCESS_CODE";

/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "RT_SECRET_KEY";

/// HMAC secret key. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    /// Wrap a secret key string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the raw key material.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// API credentials issued to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Public access code, sent as `RT-AccessCode`
    pub access_code: String,
    /// Signing key, never sent
    pub secret_key: SecretKey,
}

impl Credentials {
    /// Create validated credentials.
    pub fn new(
        access_code: impl Into<String>,
        secret_key: impl Into<SecretKey>,
    ) -> Result<Self, AuthError> {
        let creds = Self {
            access_code: access_code.into(),
            secret_key: secret_key.into(),
        };
        creds.validate()?;
        Ok(creds)
    }

    /// Load credentials from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RT_ACCESS_CODE`: Access code (required)
    /// - `RT_SECRET_KEY`: Secret key (required)
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_code = lookup(ENV_ACCESS_CODE)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AuthError::Config(format!("{} is not set", ENV_ACCESS_CODE)))?;
        let secret_key = lookup(ENV_SECRET_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AuthError::Config(format!("{} is not set", ENV_SECRET_KEY)))?;

        Self::new(access_code, secret_key)
    }

    /// Validate that both fields are non-empty.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.access_code.trim().is_empty() {
            return Err(AuthError::empty("access_code"));
        }
        if self.secret_key.expose().trim().is_empty() {
            return Err(AuthError::empty("secret_key"));
        }
        Ok(())
    }
}

/// Receiving-side verification policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Oldest accepted timestamp, relative to now (default: 5 minutes)
    pub max_age_ms: u64,
    /// Furthest accepted future timestamp, relative to now (default: 10s)
    pub max_future_skew_ms: u64,
    /// Reject request ids seen within the replay window
    pub replay_protection: bool,
    /// Bound on live request ids; new ids are refused once reached
    pub replay_cache_capacity: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_age_ms: 300_000,
            max_future_skew_ms: 10_000,
            replay_protection: true,
            replay_cache_capacity: 100_000,
        }
    }
}

impl VerifierConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.max_age_ms == 0 {
            return Err(AuthError::Config("max_age_ms cannot be 0".into()));
        }
        if self.replay_protection && self.replay_cache_capacity == 0 {
            return Err(AuthError::Config(
                "replay_cache_capacity cannot be 0 with replay protection enabled".into(),
            ));
        }
        Ok(())
    }

    /// How long a request id must be remembered (2x the validity window).
    pub fn replay_ttl_ms(&self) -> u64 {
        self.max_age_ms
            .saturating_add(self.max_future_skew_ms)
            .saturating_mul(2)
    }
}
