//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::Value;

use reocam_api::Parameters;

use crate::cli::{GlobalOpts, Toggle};
use crate::error::CliError;
use crate::output;

/// Read a JSON object from a `--from-file` path.
pub fn read_json_object(path: &Path) -> Result<Parameters, CliError> {
    let contents = std::fs::read_to_string(path)?;
    match serde_json::from_str(&contents)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: "from-file".into(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a settings payload and print it.
pub fn print_value(value: &Value, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_value(&global.output, value)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Report a toggle that was applied.
pub fn report_toggle(what: &str, state: Toggle, global: &GlobalOpts) {
    let word = if state.enabled() { "enabled" } else { "disabled" };
    output::print_success(&format!("{what} {word}"), &global.color, global.quiet);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_object_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"smtpServer": "smtp.example.com", "smtpPort": 465}}"#).unwrap();
        let map = read_json_object(file.path()).unwrap();
        assert_eq!(map["smtpServer"], "smtp.example.com");
        assert_eq!(map["smtpPort"], 465);
    }

    #[test]
    fn rejects_non_object_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let err = read_json_object(file.path()).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref reason, .. } if reason.contains("an array")),
            "got {err:?}"
        );
    }
}
