//! Fail-closed decoding of the backend's response envelopes.
//!
//! The API answers in one of two shapes per payload kind: a bare object or
//! the same object wrapped under `data`. Each decode is an untagged enum
//! rather than speculative field lookups; if neither shape matches, the
//! value is treated as absent.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CreatedId {
    id: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedEnvelope {
    Wrapped { data: CreatedId },
    Flat(CreatedId),
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(rename = "accessToken")]
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenEnvelope {
    Wrapped { data: TokenBody },
    Flat(TokenBody),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    success: bool,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Wrapped { data: Vec<Value> },
    Flat(Vec<Value>),
}

/// Identifier of a freshly-created resource, from `{data:{id}}` or `{id}`.
/// Accepts string and numeric ids; anything else is absent.
pub fn created_id(body: &str) -> Option<Value> {
    let envelope: CreatedEnvelope = serde_json::from_str(body).ok()?;
    let id = match envelope {
        CreatedEnvelope::Wrapped { data } => data.id,
        CreatedEnvelope::Flat(created) => created.id,
    };
    match id {
        Value::String(_) | Value::Number(_) => Some(id),
        _ => None,
    }
}

/// Bearer token from a login response, `{data:{accessToken}}` or
/// `{accessToken}`.
pub fn access_token(body: &str) -> Option<String> {
    let envelope: TokenEnvelope = serde_json::from_str(body).ok()?;
    Some(match envelope {
        TokenEnvelope::Wrapped { data } => data.access_token,
        TokenEnvelope::Flat(token) => token.access_token,
    })
}

/// Business-error message from the `{success:false, message}` envelope.
/// `None` unless the body decodes and `success` is explicitly false.
pub fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorBody = serde_json::from_str(body).ok()?;
    if envelope.success {
        return None;
    }
    Some(envelope.message.unwrap_or_else(|| "Unknown error".into()))
}

/// Plain `message` field of a JSON body, used to enrich 500 errors.
pub fn json_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

/// First shift-type id from `{data:[...]}` or a bare array.
pub fn first_shift_type_id(body: &str) -> Option<Value> {
    let envelope: ListEnvelope = serde_json::from_str(body).ok()?;
    let items = match envelope {
        ListEnvelope::Wrapped { data } => data,
        ListEnvelope::Flat(items) => items,
    };
    let id = items.first()?.get("id")?.clone();
    match id {
        Value::String(_) | Value::Number(_) => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_id_both_shapes() {
        assert_eq!(
            created_id(r#"{"data":{"id":42}}"#),
            Some(json!(42))
        );
        assert_eq!(
            created_id(r#"{"id":"abc-123"}"#),
            Some(json!("abc-123"))
        );
    }

    #[test]
    fn test_created_id_fails_closed() {
        assert_eq!(created_id(r#"{"data":{"name":"x"}}"#), None);
        assert_eq!(created_id(r#"{"id":null}"#), None);
        assert_eq!(created_id(r#"{"id":[1]}"#), None);
        assert_eq!(created_id("not json"), None);
    }

    #[test]
    fn test_access_token_both_shapes() {
        assert_eq!(
            access_token(r#"{"data":{"accessToken":"t1"}}"#).as_deref(),
            Some("t1")
        );
        assert_eq!(
            access_token(r#"{"accessToken":"t2","refreshToken":"r"}"#).as_deref(),
            Some("t2")
        );
        assert_eq!(access_token(r#"{"token":"nope"}"#), None);
    }

    #[test]
    fn test_error_message_requires_success_false() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"bad input"}"#).as_deref(),
            Some("bad input")
        );
        assert_eq!(
            error_message(r#"{"success":false}"#).as_deref(),
            Some("Unknown error")
        );
        assert_eq!(error_message(r#"{"success":true,"message":"ok"}"#), None);
        assert_eq!(error_message(r#"{"message":"no flag"}"#), None);
    }

    #[test]
    fn test_first_shift_type_id() {
        assert_eq!(
            first_shift_type_id(r#"{"data":[{"id":7,"name":"Day"}]}"#),
            Some(json!(7))
        );
        assert_eq!(
            first_shift_type_id(r#"[{"id":"night"}]"#),
            Some(json!("night"))
        );
        assert_eq!(first_shift_type_id(r#"{"data":[]}"#), None);
        assert_eq!(first_shift_type_id(r#"{"data":"oops"}"#), None);
    }
}
