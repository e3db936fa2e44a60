//! Raw catalog request handler.

use serde_json::Value;

use reocam_api::{CameraClient, Parameters};

use crate::cli::{GlobalOpts, QueryArgs};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &CameraClient,
    args: QueryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let params = parse_params(&args.params)?;
    let payload = client.query_named(&args.request_type, params).await?;
    util::print_value(payload.as_value(), global)
}

/// Parse `KEY=VALUE` pairs. Values are read as JSON when they parse,
/// otherwise kept as strings, so `enable=1` sends a number and
/// `smtpServer=smtp.example.com` a string.
fn parse_params(raw: &[String]) -> Result<Parameters, CliError> {
    let mut params = Parameters::new();
    for pair in raw {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Validation {
                field: "param".into(),
                reason: format!("expected KEY=VALUE, got '{pair}'"),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Validation {
                field: "param".into(),
                reason: format!("empty key in '{pair}'"),
            });
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
        params.insert(key.to_owned(), value);
    }
    Ok(params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn args(pairs: &[&str]) -> Vec<String> {
        pairs.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn values_are_json_with_string_fallback() {
        let params = parse_params(&args(&[
            "enable=1",
            "smtpServer=smtp.example.com",
            "schedule={\"enable\":1}",
            "nickname=\"42\"",
        ]))
        .unwrap();
        assert_eq!(params["enable"], json!(1));
        assert_eq!(params["smtpServer"], json!("smtp.example.com"));
        assert_eq!(params["schedule"], json!({ "enable": 1 }));
        assert_eq!(params["nickname"], json!("42"));
    }

    #[test]
    fn value_may_contain_equals() {
        let params = parse_params(&args(&["password=a=b"])).unwrap();
        assert_eq!(params["password"], json!("a=b"));
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(matches!(
            parse_params(&args(&["enable"])),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            parse_params(&args(&["=1"])),
            Err(CliError::Validation { .. })
        ));
    }
}
