//! # Header Generation Tests
//!
//! End-to-end checks of the public API: golden vectors with pinned
//! providers, freshness with the production providers, and properties of
//! canonical bodies.
//!
//! ## Test Categories
//!
//! 1. **Golden Vectors** - Byte-exact signatures for fixed inputs
//! 2. **Freshness** - Production headers differ on every call
//! 3. **Input Validation** - Empty credentials and unserializable bodies
//! 4. **Properties** - Pass-through and key-order independence

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use rt_auth::{
    canonicalize, generate_headers, AuthError, AuthHeaders, FixedClock, FixedRequestId,
    HeaderGenerator, HeaderVerifier, VerifierConfig, HEADER_NAMES,
};
use serde::Serialize;
use serde_json::json;

// =============================================================================
// TEST HELPERS
// =============================================================================

const TS: u64 = 1_700_000_000_000;

fn pinned(request_id: &str) -> HeaderGenerator<FixedClock, FixedRequestId> {
    HeaderGenerator::with_providers(FixedClock::new(TS), FixedRequestId::new(request_id))
}

// =============================================================================
// GOLDEN VECTORS
// =============================================================================

#[test]
fn golden_order_query() {
    let headers = pinned("r-1")
        .generate("ACC123", "s3cr3t", &json!({"orderNo": "O1"}))
        .unwrap();

    assert_eq!(
        headers.to_map().into_iter().collect::<Vec<_>>(),
        vec![
            ("RT-AccessCode", "ACC123".to_string()),
            ("RT-RequestID", "r-1".to_string()),
            (
                "RT-Signature",
                "a061515d5eeeb6d70583239c9e3e7dad0ea87a7f9746a993e14f1e09cb02998e".to_string()
            ),
            ("RT-Timestamp", "1700000000000".to_string()),
        ]
    );
}

#[test]
fn golden_empty_body() {
    let headers = pinned("r-1").generate("ACC123", "s3cr3t", &json!({})).unwrap();
    assert_eq!(
        headers.signature(),
        "bd7c7aff16587d6c7aed94fdfbf07d20ba1d5319ec594a8bc5f92a5a48187d27"
    );
}

#[test]
fn golden_nested_body_any_key_order() {
    let body = json!({"c": {"e": "f", "d": 2.5}, "b": [true, null, "x"], "a": 1});
    let headers = pinned("r-1").generate("ACC123", "s3cr3t", &body).unwrap();
    assert_eq!(
        headers.signature(),
        "d130d8093822b47c18b5a9279040928c89160050cc356e106e2ec1cb05722eed"
    );
}

#[test]
fn golden_typed_body_matches_json_body() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct OrderQuery {
        order_no: String,
    }

    let typed = pinned("r-1")
        .generate(
            "ACC123",
            "s3cr3t",
            &OrderQuery {
                order_no: "O1".into(),
            },
        )
        .unwrap();
    let untyped = pinned("r-1")
        .generate("ACC123", "s3cr3t", &json!({"orderNo": "O1"}))
        .unwrap();

    assert_eq!(typed, untyped);
}

// =============================================================================
// FRESHNESS
// =============================================================================

#[test]
fn production_headers_are_complete() {
    let headers = generate_headers("ACC123", "s3cr3t", &json!({"orderNo": "O1"})).unwrap();

    assert_eq!(headers.iter().count(), HEADER_NAMES.len());
    assert!(headers.iter().all(|(_, v)| !v.is_empty()));
    assert_eq!(headers.access_code(), "ACC123");
    assert!(headers.timestamp().parse::<u64>().unwrap() >= TS);
    assert_eq!(headers.request_id().len(), 32);
    assert_eq!(headers.signature().len(), 64);
}

#[test]
fn production_headers_are_fresh() {
    let body = json!({"orderNo": "O1"});
    let a = generate_headers("ACC123", "s3cr3t", &body).unwrap();
    let b = generate_headers("ACC123", "s3cr3t", &body).unwrap();

    assert_ne!(a.request_id(), b.request_id());
    assert_ne!(a.signature(), b.signature());
}

#[test]
fn pinned_providers_are_deterministic() {
    let a = pinned("r-1").generate("ACC123", "s3cr3t", &json!([1, 2])).unwrap();
    let b = pinned("r-1").generate("ACC123", "s3cr3t", &json!([1, 2])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn advancing_clock_changes_signature() {
    let clock = FixedClock::new(TS);
    let generator = HeaderGenerator::with_providers(&clock, FixedRequestId::new("r-1"));

    let before = generator.generate("ACC123", "s3cr3t", &json!({})).unwrap();
    clock.advance(1);
    let after = generator.generate("ACC123", "s3cr3t", &json!({})).unwrap();

    assert_eq!(after.timestamp(), "1700000000001");
    assert_ne!(before.signature(), after.signature());
}

#[test]
fn generated_headers_pass_verification() {
    let body = json!({"iccid": "8988", "pageNum": 1, "pageSize": 20});
    let headers = generate_headers("ACC123", "s3cr3t", &body).unwrap();

    let verifier = HeaderVerifier::new(VerifierConfig::default())
        .unwrap()
        .expect_access_code("ACC123");
    verifier.verify(&headers, "s3cr3t", &body).unwrap();
}

#[test]
fn headers_survive_json_transport() {
    let headers = generate_headers("ACC123", "s3cr3t", &json!({})).unwrap();
    let wire = serde_json::to_string(&headers).unwrap();
    let back: AuthHeaders = serde_json::from_str(&wire).unwrap();
    assert_eq!(headers, back);
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

#[test]
fn empty_access_code_is_invalid_input() {
    let err = generate_headers("", "s3cr3t", &json!({})).unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidInput {
            field: "access_code",
            ..
        }
    ));
}

#[test]
fn empty_secret_key_is_invalid_input() {
    let err = generate_headers("ACC123", "", &json!({})).unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidInput {
            field: "secret_key",
            ..
        }
    ));
}

#[test]
fn non_string_keys_are_serialization_error() {
    let mut body: HashMap<(u8, u8), &str> = HashMap::new();
    body.insert((1, 2), "x");
    let err = generate_headers("ACC123", "s3cr3t", &body).unwrap_err();
    assert!(matches!(err, AuthError::Serialization(_)));
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn access_code_passes_through(access_code in "[A-Za-z0-9_-]{1,40}") {
        let headers = pinned("r-1").generate(&access_code, "s3cr3t", &json!({})).unwrap();
        prop_assert_eq!(headers.access_code(), access_code.as_str());
    }

    #[test]
    fn canonical_form_ignores_insertion_order(
        entries in prop::collection::btree_map("[a-zA-Z0-9]{1,8}", any::<i64>(), 0..12)
    ) {
        let forward: serde_json::Map<String, serde_json::Value> =
            entries.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        let reversed: serde_json::Map<String, serde_json::Value> =
            entries.iter().rev().map(|(k, v)| (k.clone(), json!(v))).collect();

        let a = canonicalize(&forward).unwrap();
        let b = canonicalize(&reversed).unwrap();
        prop_assert_eq!(&a, &b);

        let sig_a = pinned("r-1").generate("ACC123", "s3cr3t", &forward).unwrap();
        let sig_b = pinned("r-1").generate("ACC123", "s3cr3t", &reversed).unwrap();
        prop_assert_eq!(sig_a.signature(), sig_b.signature());
    }

    #[test]
    fn canonical_form_parses_back_to_same_value(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,12}", 0..8)
    ) {
        let canonical = canonicalize(&entries).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&canonical).unwrap();
        prop_assert_eq!(parsed, entries);
    }
}
