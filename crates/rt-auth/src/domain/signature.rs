//! HMAC-SHA256 request signatures.
//!
//! Signed message: `timestamp ‖ request_id ‖ access_code ‖ canonical_body`,
//! plain concatenation with no separators. Output is lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the `RT-Signature` value.
///
/// Deterministic: the same five inputs always yield the same 64-char hex
/// string.
pub fn sign(
    access_code: &str,
    secret_key: &str,
    timestamp: &str,
    request_id: &str,
    canonical_body: &str,
) -> String {
    let mac = keyed_mac(access_code, secret_key, timestamp, request_id, canonical_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a received `RT-Signature` against the recomputed value.
///
/// Accepts upper- or lowercase hex. Comparison is constant-time.
pub fn verify(
    signature: &str,
    access_code: &str,
    secret_key: &str,
    timestamp: &str,
    request_id: &str,
    canonical_body: &str,
) -> bool {
    let received = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let expected = keyed_mac(access_code, secret_key, timestamp, request_id, canonical_body)
        .finalize()
        .into_bytes();

    expected.as_slice().ct_eq(&received).into()
}

fn keyed_mac(
    access_code: &str,
    secret_key: &str,
    timestamp: &str,
    request_id: &str,
    canonical_body: &str,
) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(request_id.as_bytes());
    mac.update(access_code.as_bytes());
    mac.update(canonical_body.as_bytes());
    mac
}
