// Response validation
//
// Every command result passes through `validate` before any field is read.
// The camera answers with a JSON array whose first element is either
// `{"value": {...}}` or `{"error": {"detail": "...", "rspCode": N}}`.

use serde_json::Value;

use crate::error::Error;

/// Result of validating one raw response body.
pub type ResponseOutcome = Result<Payload, Error>;

/// The first element of a successful response, kept whole so callers can
/// pull whichever sub-field they need.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Value);

impl Payload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// `value.<key>` of the payload, e.g. `value.Email`.
    pub fn value_field(&self, key: &str) -> Result<&Value, Error> {
        self.0
            .get("value")
            .and_then(|value| value.get(key))
            .ok_or_else(|| Error::MissingField {
                field: format!("value.{key}"),
            })
    }

    /// The session token at `value.Token.name` of a login response.
    pub fn token(&self) -> Result<&str, Error> {
        self.0
            .pointer("/value/Token/name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingField {
                field: "value.Token.name".into(),
            })
    }
}

/// Classify a raw response body into a [`Payload`] or a failure.
pub fn validate(body: &[u8]) -> ResponseOutcome {
    let data: Value = serde_json::from_slice(body).map_err(|e| {
        let body = String::from_utf8_lossy(body).into_owned();
        Error::Parse {
            message: e.to_string(),
            body,
        }
    })?;

    let Value::Array(mut items) = data else {
        return Err(Error::EmptyResponse);
    };
    if items.is_empty() {
        return Err(Error::EmptyResponse);
    }
    let first = items.swap_remove(0);

    // A null `error` counts as absent.
    if let Some(error) = first.get("error").filter(|e| !e.is_null()) {
        let detail = error
            .get("detail")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_owned);
        return Err(Error::Device {
            detail,
            rsp_code: error.get("rspCode").and_then(Value::as_i64),
        });
    }

    Ok(Payload(first))
}
