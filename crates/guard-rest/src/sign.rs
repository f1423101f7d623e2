//! HMAC request signing.
//!
//! The signed message is `/api/v2/{endpoint}{nonce}{body}` over UTF-8
//! bytes, keyed with the API secret, digested with SHA-384 and rendered
//! as lowercase hex. Signing must happen over the exact serialized bytes
//! that go on the wire, after flag enforcement; signing earlier would
//! authenticate a body that differs from what is sent.

use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::credentials::Credentials;

type HmacSha384 = Hmac<Sha384>;

/// API version prefix included in every signed message.
const SIGNED_PATH_PREFIX: &str = "/api/v2/";

/// Nonce header name.
pub const HEADER_NONCE: &str = "bfx-nonce";
/// Signature header name.
pub const HEADER_SIGNATURE: &str = "bfx-signature";
/// API key header name.
pub const HEADER_API_KEY: &str = "bfx-apikey";

/// Authentication headers for one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Nonce as a decimal string.
    pub nonce: String,
    /// Lowercase hex HMAC-SHA384 signature.
    pub signature: String,
    /// API key, verbatim.
    pub api_key: String,
}

/// Lowercase-hex HMAC-SHA384 of `message` keyed with `key`.
pub fn hmac_sha384_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha384::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Produces authentication headers for one request.
///
/// `body` must be the exact string that will be transmitted, or `None`
/// for body-less requests.
pub fn sign_request(
    credentials: &Credentials,
    endpoint: &str,
    nonce: u64,
    body: Option<&str>,
) -> AuthHeaders {
    let nonce = nonce.to_string();

    let mut message = String::with_capacity(
        SIGNED_PATH_PREFIX.len() + endpoint.len() + nonce.len() + body.map_or(0, str::len),
    );
    message.push_str(SIGNED_PATH_PREFIX);
    message.push_str(endpoint);
    message.push_str(&nonce);
    if let Some(body) = body {
        message.push_str(body);
    }

    AuthHeaders {
        signature: hmac_sha384_hex(credentials.api_secret(), message.as_bytes()),
        nonce,
        api_key: credentials.api_key().to_owned(),
    }
}
