// Response envelope decoding
//
// Every Omada response is wrapped as `{ errorCode, msg?, result? }`.
// `errorCode == 0` means success and `result` is the payload; anything
// else becomes an `Error`. Classification is total: malformed or
// non-object bodies produce an error value carrying the fallback code.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, UNKNOWN_ERROR_CODE};

impl ApiError {
    /// Build an `ApiError` from any JSON value, never failing.
    ///
    /// A missing or unusable `errorCode` yields [`UNKNOWN_ERROR_CODE`];
    /// a missing `msg` yields a message describing the extraction failure
    /// together with the input document.
    pub fn from_envelope(json: &Value) -> Self {
        let mut lines = Vec::with_capacity(3);

        let code = match extract_code(json) {
            Ok(code) => code,
            Err(reason) => {
                lines.push(format!("Error extracting error code: {reason}"));
                UNKNOWN_ERROR_CODE
            }
        };

        match extract_message(json) {
            Ok(msg) => lines.push(msg),
            Err(reason) => {
                lines.push(format!("Error extracting error message: {reason}"));
                lines.push(format!("Input json: {json}"));
            }
        }

        Self {
            code,
            message: lines.join("\n"),
        }
    }
}

/// Decode a raw response body, returning the `result` payload on success.
///
/// A successful envelope without `result` decodes as `Value::Null`.
pub fn decode_envelope(body: &str) -> Result<Value, Error> {
    let json: Value = serde_json::from_str(body).map_err(|e| Error::decode(&e, body))?;

    match extract_code(&json) {
        Ok(0) => Ok(match json {
            Value::Object(mut map) => map.remove("result").unwrap_or(Value::Null),
            _ => Value::Null,
        }),
        Ok(_) => Err(Error::Api(ApiError::from_envelope(&json))),
        Err(_) => {
            let ApiError { code, message } = ApiError::from_envelope(&json);
            Err(Error::Decode {
                code,
                message,
                body: body.to_owned(),
            })
        }
    }
}

/// Decode a raw body and deserialize its `result` into `T`.
pub fn decode_result<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let result = decode_envelope(body)?;
    serde_json::from_value(result).map_err(|e| Error::decode(&e, body))
}

fn extract_code(json: &Value) -> Result<i64, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, found {}", type_name(json)))?;
    let raw = obj
        .get("errorCode")
        .ok_or_else(|| "missing key \"errorCode\"".to_owned())?;
    parse_code(raw).ok_or_else(|| format!("unusable errorCode value {raw}"))
}

fn extract_message(json: &Value) -> Result<String, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, found {}", type_name(json)))?;
    match obj.get("msg") {
        Some(Value::String(msg)) => Ok(msg.clone()),
        Some(other) => Err(format!("msg is not a string: {other}")),
        None => Err("missing key \"msg\"".to_owned()),
    }
}

/// Accepts `42`, `42.0` and `"42"`.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn parse_code(raw: &Value) -> Option<i64> {
    let integral = |f: f64| {
        (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e18).then_some(f as i64)
    };
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn type_name(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
