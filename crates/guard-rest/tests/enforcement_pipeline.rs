//! Integration tests for the prepare pipeline: classification,
//! enforcement, serialization and signing working together on realistic
//! request bodies.

use guard_core::POST_ONLY;
use guard_rest::{
    classify_response, hmac_sha384_hex, Credentials, RestError, RestMiddleware,
};
use serde_json::{json, Value};

fn middleware() -> RestMiddleware {
    RestMiddleware::new(
        "https://api.example.test/v2",
        Some(Credentials::new("integration-key", "integration-secret")),
    )
    .unwrap()
}

fn sent_body(prepared: &guard_rest::PreparedPost) -> Value {
    serde_json::from_str(prepared.body.as_deref().unwrap()).unwrap()
}

#[test]
fn order_submission_is_always_post_only() {
    let middleware = middleware();

    let prepared = middleware
        .prepare_post(
            "auth/w/order/submit",
            Some(json!({
                "type": "EXCHANGE LIMIT",
                "symbol": "tBTCUSD",
                "amount": "0.01",
                "price": "50000"
            })),
        )
        .unwrap();
    assert_eq!(sent_body(&prepared)["flags"], u64::from(POST_ONLY));

    // An update that never mentions flags still carries the bit.
    let prepared = middleware
        .prepare_post(
            "auth/w/order/update",
            Some(json!({"id": 12345, "amount": "0.02"})),
        )
        .unwrap();
    assert_eq!(sent_body(&prepared)["flags"], u64::from(POST_ONLY));
}

#[test]
fn existing_bits_survive_enforcement_end_to_end() {
    let middleware = middleware();
    let hidden_and_reduce = 64 | 1024;

    let prepared = middleware
        .prepare_post(
            "auth/w/order/submit",
            Some(json!({"type": "LIMIT", "symbol": "tBTCUSD", "flags": hidden_and_reduce})),
        )
        .unwrap();

    let flags = sent_body(&prepared)["flags"].as_u64().unwrap();
    assert_eq!(flags, u64::from(hidden_and_reduce | POST_ONLY));
}

#[test]
fn signature_matches_transmitted_body_exactly() {
    let middleware = middleware();
    let prepared = middleware
        .prepare_post(
            "auth/w/order/submit",
            Some(json!({"type": "LIMIT", "symbol": "tBTCUSD"})),
        )
        .unwrap();

    let auth = prepared.auth.as_ref().unwrap();
    let body = prepared.body.as_deref().unwrap();

    // Recompute over the exact bytes the middleware would transmit.
    let message = format!("/api/v2/auth/w/order/submit{}{}", auth.nonce, body);
    assert_eq!(
        auth.signature,
        hmac_sha384_hex(b"integration-secret", message.as_bytes())
    );

    // The enforced body, not the caller's original, is what was signed.
    assert!(body.contains("\"flags\":4096"));
}

#[test]
fn venue_error_taxonomy_round_trip() {
    assert!(matches!(
        classify_response(json!(["error", 10020, "symbol: invalid"])),
        Err(RestError::Parameter(_))
    ));
    assert!(matches!(
        classify_response(json!(["error", 10100, "apikey: invalid"])),
        Err(RestError::InvalidCredentials)
    ));
    assert!(matches!(
        classify_response(json!(["error", 10001, "unknown symbol"])),
        Err(RestError::Generic(_))
    ));

    let order_array = json!([[12345, null, 67890, "tBTCUSD", 1700000000000_u64]]);
    assert_eq!(classify_response(order_array.clone()).unwrap(), order_array);
}
