//! Authenticated REST middleware.
//!
//! Every outbound write goes through one pipeline: classify the endpoint,
//! merge the mandatory post-only bit into the body, serialize, sign the
//! exact bytes that go on the wire, send, classify the response. The
//! enforcement step runs before serialization so the signature always
//! covers the enforced body.

use std::time::Duration;

use guard_core::{classify_path, enforce_post_only, EndpointKind};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::RestResult;
use crate::nonce::{NonceManager, SystemClock};
use crate::response::classify_response;
use crate::sign::{sign_request, AuthHeaders, HEADER_API_KEY, HEADER_NONCE, HEADER_SIGNATURE};

/// Fixed timeout for venue calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A POST ready for transmission: enforced body bytes plus headers.
///
/// Split out of the transport call so the exact bytes that get signed
/// and sent can be inspected without a network.
#[derive(Debug)]
pub struct PreparedPost {
    /// Serialized body, exactly as transmitted.
    pub body: Option<String>,
    /// Authentication headers; `None` for public requests.
    pub auth: Option<AuthHeaders>,
}

/// REST middleware for a single venue host.
///
/// Holds no mutable state beyond the nonce counter, so concurrent
/// callers are safe; each call computes its own signature independently.
pub struct RestMiddleware {
    host: String,
    credentials: Option<Credentials>,
    nonces: NonceManager<SystemClock>,
    client: Client,
}

impl RestMiddleware {
    /// Creates a middleware for `host`, e.g. `https://api.bitfinex.com/v2`.
    ///
    /// Without credentials only public endpoints are reachable; no
    /// request is ever signed with a partial key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(host: impl Into<String>, credentials: Option<Credentials>) -> RestResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            host: host.into(),
            credentials,
            nonces: NonceManager::with_system_clock(),
            client,
        })
    }

    /// Issues a GET to `endpoint` with optional query parameters.
    ///
    /// # Errors
    ///
    /// Transport failures and venue-reported errors, classified per the
    /// error taxonomy.
    pub async fn get(&self, endpoint: &str, query: Option<&[(&str, &str)]>) -> RestResult<Value> {
        let mut request = self
            .client
            .get(self.url(endpoint))
            .header(ACCEPT, "application/json");
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(credentials) = &self.credentials {
            let auth = sign_request(credentials, endpoint, self.nonces.next(), None);
            request = apply_auth(request, &auth);
        }

        let data: Value = request.send().await?.json().await?;
        classify_response(data)
    }

    /// Issues a POST to `endpoint`, enforcing the post-only bit on
    /// order-shaped bodies before anything is serialized or signed.
    ///
    /// # Errors
    ///
    /// [`crate::RestError::Rejected`] when the body carries a
    /// market-style order type; otherwise transport failures and venue
    /// errors per the taxonomy.
    pub async fn post(&self, endpoint: &str, body: Option<Value>) -> RestResult<Value> {
        let prepared = self.prepare_post(endpoint, body)?;

        let mut request = self
            .client
            .post(self.url(endpoint))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = &prepared.auth {
            request = apply_auth(request, auth);
        }
        if let Some(body) = prepared.body {
            request = request.body(body);
        }

        let data: Value = request.send().await?.json().await?;
        classify_response(data)
    }

    /// Classification, enforcement, serialization and signing for a POST.
    ///
    /// # Errors
    ///
    /// Enforcement rejection or serialization failure.
    pub fn prepare_post(&self, endpoint: &str, mut body: Option<Value>) -> RestResult<PreparedPost> {
        let kind = classify_path(endpoint);
        if kind.is_enforced() {
            if let Some(Value::Object(fields)) = body.as_mut() {
                merge_post_only(endpoint, kind, fields)?;
            }
        }

        let body = body.map(|b| serde_json::to_string(&b)).transpose()?;
        let auth = self.credentials.as_ref().map(|credentials| {
            sign_request(credentials, endpoint, self.nonces.next(), body.as_deref())
        });

        Ok(PreparedPost { body, auth })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.host.trim_end_matches('/'), endpoint)
    }
}

/// Merges the post-only bit into the body's flags field in place.
fn merge_post_only(
    endpoint: &str,
    kind: EndpointKind,
    fields: &mut Map<String, Value>,
) -> RestResult<()> {
    let existing = match fields.get("flags") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = value.as_u64().and_then(|f| u32::try_from(f).ok());
            if parsed.is_none() {
                warn!(endpoint, flags = %value, "unusable flags value replaced");
            }
            parsed
        }
    };

    // Only order submission carries a matching-style field to vet.
    let order_type = match kind {
        EndpointKind::SubmitOrder => fields.get("type").and_then(Value::as_str),
        _ => None,
    };

    let flags = enforce_post_only(existing, order_type)?;
    fields.insert("flags".to_owned(), flags.into());
    debug!(endpoint, flags, "post-only bit merged into request body");
    Ok(())
}

fn apply_auth(request: RequestBuilder, auth: &AuthHeaders) -> RequestBuilder {
    request
        .header(HEADER_NONCE, auth.nonce.as_str())
        .header(HEADER_SIGNATURE, auth.signature.as_str())
        .header(HEADER_API_KEY, auth.api_key.as_str())
}
