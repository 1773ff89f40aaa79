//! The `AuthHeaders` record and the header names it is emitted under.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::VerificationError;

/// Caller's access code.
pub const HEADER_ACCESS_CODE: &str = "RT-AccessCode";
/// Milliseconds since the Unix epoch at signing time.
pub const HEADER_TIMESTAMP: &str = "RT-Timestamp";
/// Per-request correlation id.
pub const HEADER_REQUEST_ID: &str = "RT-RequestID";
/// Hex HMAC-SHA256 request signature.
pub const HEADER_SIGNATURE: &str = "RT-Signature";

/// All RT header names, in emission order.
pub const HEADER_NAMES: [&str; 4] = [
    HEADER_ACCESS_CODE,
    HEADER_TIMESTAMP,
    HEADER_REQUEST_ID,
    HEADER_SIGNATURE,
];

/// Authentication headers for a single request.
///
/// A fresh value is produced for every request; it is never mutated after
/// construction. Serializes to a JSON object keyed by the wire header names.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthHeaders {
    #[serde(rename = "RT-AccessCode")]
    access_code: String,
    #[serde(rename = "RT-Timestamp")]
    timestamp: String,
    #[serde(rename = "RT-RequestID")]
    request_id: String,
    #[serde(rename = "RT-Signature")]
    signature: String,
}

impl AuthHeaders {
    pub(crate) fn new(
        access_code: String,
        timestamp: String,
        request_id: String,
        signature: String,
    ) -> Self {
        Self {
            access_code,
            timestamp,
            request_id,
            signature,
        }
    }

    /// Rebuild a header record from received `(name, value)` pairs.
    ///
    /// Names are matched case-insensitively, as HTTP header names are.
    /// Unrelated headers are ignored. Every RT header must be present and
    /// non-empty.
    pub fn from_pairs<'n, 'v, I>(pairs: I) -> Result<Self, VerificationError>
    where
        I: IntoIterator<Item = (&'n str, &'v str)>,
    {
        let mut found: [Option<&'v str>; 4] = [None; 4];
        for (name, value) in pairs {
            if let Some(slot) = HEADER_NAMES
                .iter()
                .position(|known| known.eq_ignore_ascii_case(name.trim()))
            {
                found[slot] = Some(value.trim());
            }
        }

        let take = |slot: usize| -> Result<String, VerificationError> {
            match found[slot] {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(VerificationError::MissingHeader(HEADER_NAMES[slot])),
            }
        };

        Ok(Self {
            access_code: take(0)?,
            timestamp: take(1)?,
            request_id: take(2)?,
            signature: take(3)?,
        })
    }

    /// `RT-AccessCode` value.
    pub fn access_code(&self) -> &str {
        &self.access_code
    }

    /// `RT-Timestamp` value.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `RT-RequestID` value.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// `RT-Signature` value.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Iterate `(header name, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_ACCESS_CODE, self.access_code.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_REQUEST_ID, self.request_id.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
        ]
        .into_iter()
    }

    /// Collect into an owned map, ready to attach to an HTTP client.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

// Signature omitted from Debug output.
impl fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("access_code", &self.access_code)
            .field("timestamp", &self.timestamp)
            .field("request_id", &self.request_id)
            .field("signature", &"<redacted>")
            .finish()
    }
}
