// Request envelope construction
//
// Turns a catalog entry plus a caller-supplied parameter map into the
// `{cmd, action, param}` envelope the camera expects. Pure: no I/O, no
// session access.

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::catalog::CommandSpec;
use crate::error::Error;

/// CGI endpoint every command is posted to.
pub const API_ENDPOINT: &str = "/cgi-bin/api.cgi";

/// Open parameter map: name → value, passed through to the wire verbatim.
pub type Parameters = Map<String, Value>;

/// One shaped request, built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    pub cmd: &'static str,
    pub action: u8,
    pub param: Map<String, Value>,
}

impl RequestEnvelope {
    /// The JSON body the camera expects: a single-element array.
    pub fn to_body(&self) -> Value {
        serde_json::json!([{
            "cmd": self.cmd,
            "action": self.action,
            "param": self.param,
        }])
    }
}

/// Validate `parameters` against the spec's allow-list and shape the envelope.
///
/// Fails if any name is outside the allow-list; no partial envelope is
/// produced in that case. When several names are rejected, the smallest in
/// byte order is reported, so the error does not depend on insertion order.
pub fn build(spec: &CommandSpec, parameters: Parameters) -> Result<RequestEnvelope, Error> {
    if let Some(name) = parameters.keys().filter(|name| !spec.allows(name)).min() {
        return Err(Error::InvalidParameter {
            request_type: spec.request_type.into(),
            name: name.clone(),
        });
    }

    let mut param = Map::with_capacity(1);
    param.insert(spec.request_type.to_string(), Value::Object(parameters));

    Ok(RequestEnvelope {
        cmd: spec.wire_command,
        action: spec.action.code(),
        param,
    })
}

/// Path and query for a command: `/cgi-bin/api.cgi?cmd=<wire>&token=<token>`.
///
/// Without a session the token is sent empty.
pub fn api_path(wire_command: &str, token: Option<&str>) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("cmd", wire_command)
        .append_pair("token", token.unwrap_or_default())
        .finish();
    format!("{API_ENDPOINT}?{query}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::catalog::RequestType;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn whitelisted_keys_are_accepted_for_every_type() {
        for ty in RequestType::iter() {
            let spec = ty.spec();
            let map: Parameters = spec
                .allowed_parameters
                .iter()
                .map(|name| ((*name).to_owned(), json!("x")))
                .collect();
            let envelope = build(spec, map.clone()).unwrap();
            assert_eq!(envelope.param[&ty.to_string()], Value::Object(map));
        }
    }

    #[test]
    fn one_extra_key_is_rejected_for_every_type() {
        for ty in RequestType::iter() {
            let spec = ty.spec();
            let mut map: Parameters = spec
                .allowed_parameters
                .iter()
                .map(|name| ((*name).to_owned(), json!(1)))
                .collect();
            map.insert("bogus".into(), json!(true));

            let err = build(spec, map).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { ref name, request_type }
                    if name == "bogus" && request_type == <&str>::from(ty)),
                "{ty}: expected InvalidParameter(bogus), got {err:?}"
            );
        }
    }

    #[test]
    fn smallest_rejected_name_is_reported() {
        let mut map = Parameters::new();
        map.insert("zeta".into(), json!(1));
        map.insert("state".into(), json!("Auto"));
        map.insert("alpha".into(), json!(2));

        let err = build(RequestType::IrLights.spec(), map).unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameter { ref name, .. } if name == "alpha"),
            "got {err:?}"
        );
    }

    #[test]
    fn envelope_shape_for_ir_lights() {
        let envelope = build(RequestType::IrLights.spec(), params(json!({"state": "Off"}))).unwrap();
        assert_eq!(
            envelope.to_body(),
            json!([{
                "cmd": "SetIrLights",
                "action": 0,
                "param": { "IrLights": { "state": "Off" } }
            }])
        );
    }

    #[test]
    fn empty_parameters_produce_empty_object() {
        let envelope = build(RequestType::Logout.spec(), Parameters::new()).unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "cmd": "Logout", "action": 0, "param": { "Logout": {} } })
        );
    }

    #[test]
    fn values_pass_through_without_coercion() {
        let map = params(json!({
            "smtpPort": 465,
            "ssl": 1,
            "interval": "30 Seconds",
            "schedule": { "enable": 0 }
        }));
        let envelope = build(RequestType::Email.spec(), map.clone()).unwrap();
        assert_eq!(envelope.cmd, "SetEmail");
        assert_eq!(envelope.param["Email"], Value::Object(map));
    }

    #[test]
    fn building_is_deterministic() {
        let spec = RequestType::GetPush.spec();
        let a = build(spec, params(json!({"channel": 0}))).unwrap();
        let b = build(spec, params(json!({"channel": 0}))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.action, 1);
    }

    #[test]
    fn path_carries_command_and_token() {
        assert_eq!(
            api_path("Login", None),
            "/cgi-bin/api.cgi?cmd=Login&token="
        );
        assert_eq!(
            api_path("GetEmail", Some("abc 123&x")),
            "/cgi-bin/api.cgi?cmd=GetEmail&token=abc+123%26x"
        );
    }
}
