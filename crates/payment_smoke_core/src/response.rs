use serde_json::Value;

use crate::contract::InvocationResult;

/// Decodes a raw function payload.
///
/// API-gateway style responses (`statusCode` plus a string `body`) get their
/// body parsed as JSON; a body that is not JSON is kept as a plain string.
pub fn decode_invocation_payload(payload: &[u8]) -> Result<InvocationResult, String> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(InvocationResult {
            raw: Value::Null,
            status_code: None,
            body: None,
        });
    }

    let raw: Value = serde_json::from_slice(payload)
        .map_err(|error| format!("function payload is not valid JSON: {error}"))?;

    let status_code = raw
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok());

    let body = match (status_code, raw.get("body")) {
        (Some(_), Some(Value::String(text))) if text.is_empty() => Some(Value::Null),
        (Some(_), Some(Value::String(text))) => {
            Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone())))
        }
        (Some(_), Some(other)) => Some(other.clone()),
        _ => None,
    };

    Ok(InvocationResult {
        raw,
        status_code,
        body,
    })
}
