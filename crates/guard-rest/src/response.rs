//! Venue error-response classification.
//!
//! The venue reports failures in-band as `["error", <code>, <detail>]`
//! in place of the normal payload. Success payloads pass through verbatim
//! with no schema validation; that is the caller's concern.

use serde_json::Value;

use crate::error::{RestError, RestResult};

/// Unknown error.
const ERR_UNK: i64 = 10000;
/// Generic error.
const ERR_GENERIC: i64 = 10001;
/// Request parameters invalid.
const ERR_PARAMS: i64 = 10020;
/// Authentication failed.
const ERR_AUTH_FAIL: i64 = 10100;

/// Maps a parsed venue response onto the error taxonomy.
///
/// # Errors
///
/// - [`RestError::Parameter`] for code 10020, carrying the detail text
/// - [`RestError::InvalidCredentials`] for code 10100
/// - [`RestError::Generic`] for codes 10000/10001 or an absent code
/// - [`RestError::UnexpectedResponse`] for any other code, carrying the
///   whole payload verbatim
pub fn classify_response(data: Value) -> RestResult<Value> {
    let is_error = data
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        == Some("error");
    if !is_error {
        return Ok(data);
    }

    let code = data.get(1).and_then(Value::as_i64);
    let detail = data
        .get(2)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    match code {
        Some(ERR_PARAMS) => Err(RestError::Parameter(detail)),
        Some(ERR_AUTH_FAIL) => Err(RestError::InvalidCredentials),
        None | Some(0) | Some(ERR_UNK) | Some(ERR_GENERIC) => Err(RestError::Generic(detail)),
        Some(_) => Err(RestError::UnexpectedResponse(data)),
    }
}
