//! # Header Verification
//!
//! The receiving side of the RT header contract. A service exposing the same
//! API (or a test double of it) uses this to accept or reject requests.
//!
//! ## Verification Steps (in order)
//!
//! 1. **Presence Check**: All four RT headers present and non-empty
//! 2. **Access Code Check**: Optional, against an expected caller
//! 3. **Timestamp Check**: `now - max_age <= timestamp <= now + max_future_skew`
//! 4. **Signature Check**: Recompute over the canonical body, constant-time compare
//! 5. **Replay Check**: Request id not seen within the replay window
//!
//! The replay check runs last so that forged requests cannot fill the cache.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::warn;

use crate::adapters::clock::SystemClock;
use crate::domain::canonical::canonicalize;
use crate::domain::config::VerifierConfig;
use crate::domain::errors::{AuthError, VerificationError};
use crate::domain::headers::AuthHeaders;
use crate::domain::signature;
use crate::ports::outbound::Clock;

// =============================================================================
// REPLAY CACHE
// =============================================================================

/// Thread-safe request id cache for replay prevention.
///
/// - Tracks seen request ids and the time (ms) at which each may be forgotten
/// - Evicts expired ids once the cache reaches capacity
/// - If still full after eviction, refuses new ids until entries expire
#[derive(Debug)]
pub struct ReplayCache {
    /// request id -> expiry (ms since epoch)
    entries: RwLock<HashMap<String, u64>>,
    ttl_ms: u64,
    capacity: usize,
}

impl ReplayCache {
    /// Create an empty cache.
    pub fn new(ttl_ms: u64, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_ms,
            capacity: capacity.max(1),
        }
    }

    /// Record `request_id` as seen at `now_ms`.
    ///
    /// # Errors
    ///
    /// - `ReplayDetected` if the id was seen and its entry has not expired
    /// - `ReplayCacheFull` if every remembered id is still live; the id is
    ///   not recorded
    pub fn check_and_insert(
        &self,
        request_id: &str,
        now_ms: u64,
    ) -> Result<(), VerificationError> {
        let mut entries = self.entries.write();

        if let Some(&expiry) = entries.get(request_id) {
            if expiry > now_ms {
                return Err(VerificationError::ReplayDetected(request_id.to_string()));
            }
        }

        if entries.len() >= self.capacity && !entries.contains_key(request_id) {
            entries.retain(|_, expiry| *expiry > now_ms);
            if entries.len() >= self.capacity {
                return Err(VerificationError::ReplayCacheFull {
                    capacity: self.capacity,
                });
            }
        }

        entries.insert(request_id.to_string(), now_ms.saturating_add(self.ttl_ms));
        Ok(())
    }

    /// Clears all cached ids.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the current number of cached ids.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// HEADER VERIFIER
// =============================================================================

/// Verifies received RT headers against a shared secret.
pub struct HeaderVerifier<C: Clock = SystemClock> {
    config: VerifierConfig,
    clock: C,
    replay_cache: Option<ReplayCache>,
    expected_access_code: Option<String>,
}

impl HeaderVerifier<SystemClock> {
    /// Verifier on the system clock.
    pub fn new(config: VerifierConfig) -> Result<Self, AuthError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> HeaderVerifier<C> {
    /// Verifier with an injected clock.
    pub fn with_clock(config: VerifierConfig, clock: C) -> Result<Self, AuthError> {
        config.validate()?;
        let replay_cache = config
            .replay_protection
            .then(|| ReplayCache::new(config.replay_ttl_ms(), config.replay_cache_capacity));

        Ok(Self {
            config,
            clock,
            replay_cache,
            expected_access_code: None,
        })
    }

    /// Only accept requests carrying this access code.
    pub fn expect_access_code(mut self, access_code: impl Into<String>) -> Self {
        self.expected_access_code = Some(access_code.into());
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a header record against the secret and request body.
    pub fn verify<T: Serialize + ?Sized>(
        &self,
        headers: &AuthHeaders,
        secret_key: &str,
        body: &T,
    ) -> Result<(), VerificationError> {
        let result = self.verify_inner(headers, secret_key, body);
        if let Err(ref e) = result {
            warn!(
                access_code = headers.access_code(),
                request_id = headers.request_id(),
                error = %e,
                "Rejected RT auth headers"
            );
        }
        result
    }

    /// Verify raw `(name, value)` header pairs, as received off the wire.
    pub fn verify_pairs<'n, 'v, I, T>(
        &self,
        pairs: I,
        secret_key: &str,
        body: &T,
    ) -> Result<(), VerificationError>
    where
        I: IntoIterator<Item = (&'n str, &'v str)>,
        T: Serialize + ?Sized,
    {
        let headers = AuthHeaders::from_pairs(pairs).inspect_err(|e| {
            warn!(error = %e, "Rejected RT auth headers");
        })?;
        self.verify(&headers, secret_key, body)
    }

    fn verify_inner<T: Serialize + ?Sized>(
        &self,
        headers: &AuthHeaders,
        secret_key: &str,
        body: &T,
    ) -> Result<(), VerificationError> {
        if secret_key.trim().is_empty() {
            return Err(AuthError::empty("secret_key").into());
        }

        if let Some(expected) = &self.expected_access_code {
            if expected != headers.access_code() {
                return Err(VerificationError::AccessCodeMismatch {
                    expected: expected.clone(),
                    actual: headers.access_code().to_string(),
                });
            }
        }

        let now = self.clock.now_millis();
        self.check_timestamp(headers.timestamp(), now)?;

        let canonical_body = canonicalize(body)?;
        if !signature::verify(
            headers.signature(),
            headers.access_code(),
            secret_key,
            headers.timestamp(),
            headers.request_id(),
            &canonical_body,
        ) {
            return Err(VerificationError::InvalidSignature);
        }

        if let Some(cache) = &self.replay_cache {
            cache.check_and_insert(headers.request_id(), now)?;
        }

        Ok(())
    }

    fn check_timestamp(&self, raw: &str, now: u64) -> Result<(), VerificationError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationError::MalformedTimestamp(raw.to_string()));
        }
        let timestamp: u64 = raw
            .parse()
            .map_err(|_| VerificationError::MalformedTimestamp(raw.to_string()))?;

        // Too old
        if timestamp.saturating_add(self.config.max_age_ms) < now {
            return Err(VerificationError::TimestampOutOfRange { timestamp, now });
        }

        // Too far in the future
        if timestamp > now.saturating_add(self.config.max_future_skew_ms) {
            return Err(VerificationError::TimestampOutOfRange { timestamp, now });
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
