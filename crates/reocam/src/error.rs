//! CLI error types with miette diagnostics.
//!
//! Maps `reocam_api::Error` and `ConfigError` variants into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use reocam_api::Error as ApiError;
use reocam_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const DEVICE: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach camera at {host}")]
    #[diagnostic(
        code(reocam::connection_failed),
        help(
            "Check that the camera is powered and reachable.\n\
             If its web interface uses HTTPS or a custom port, pass --https / --port."
        )
    )]
    ConnectionFailed {
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(reocam::tls_error),
        help(
            "Cameras usually ship self-signed certificates.\n\
             Use --insecure (-k), or configure ca_cert in your profile."
        )
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(reocam::timeout),
        help("Increase the timeout with --timeout or check the camera's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login rejected by camera: {detail}")]
    #[diagnostic(
        code(reocam::auth_failed),
        help(
            "Verify the user name and password.\n\
             Run: reocam config set-password --profile {profile}"
        )
    )]
    AuthFailed { detail: String, profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(reocam::no_credentials),
        help(
            "Configure credentials with: reocam config init\n\
             Or pass --user and --password (REOCAM_USERNAME / REOCAM_PASSWORD)."
        )
    )]
    NoCredentials { profile: String },

    #[error("Session error: {message}")]
    #[diagnostic(code(reocam::session))]
    Session { message: String },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Camera rejected the request: {detail}{}", rsp_code_suffix(.rsp_code))]
    #[diagnostic(code(reocam::device_error))]
    Device { detail: String, rsp_code: Option<i64> },

    #[error("Unexpected response from camera: {message}")]
    #[diagnostic(
        code(reocam::bad_response),
        help("Run with -vvv to see the raw response body.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(reocam::validation))]
    Validation { field: String, reason: String },

    #[error("No valid IP address: {host}")]
    #[diagnostic(
        code(reocam::invalid_host),
        help("Cameras are addressed by IPv4 or IPv6 address, e.g. --host 192.168.1.20")
    )]
    InvalidHost { host: String },

    #[error("'{name}' is not an allowed parameter for {request_type}")]
    #[diagnostic(code(reocam::invalid_parameter))]
    InvalidParameter { request_type: String, name: String },

    #[error("'{0}' is not a valid request type")]
    #[diagnostic(
        code(reocam::unknown_request_type),
        help("Valid types: User, Logout, GetEmail, GetPush, GetFtp, Email, Push, Ftp, IrLights")
    )]
    UnknownRequestType(String),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(reocam::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: reocam config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No camera configured")]
    #[diagnostic(
        code(reocam::no_config),
        help(
            "Create a profile with: reocam config init\n\
             Or pass --host. Config file expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(reocam::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(reocam::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(reocam::prompt))]
    Prompt(#[from] dialoguer::Error),
}

fn rsp_code_suffix(rsp_code: &Option<i64>) -> String {
    rsp_code.map(|code| format!(" (rspCode {code})")).unwrap_or_default()
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Device { .. } | Self::BadResponse { .. } => exit_code::DEVICE,
            Self::Validation { .. }
            | Self::InvalidHost { .. }
            | Self::InvalidParameter { .. }
            | Self::UnknownRequestType(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Reinterpret a failed login: a device-reported error means the
    /// camera refused the credentials.
    pub fn from_login(err: ApiError, profile: &str) -> Self {
        match err {
            ApiError::Device { detail, .. } => Self::AuthFailed {
                detail,
                profile: profile.to_owned(),
            },
            other => other.into(),
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidHost { host } => Self::InvalidHost { host },

            ApiError::InvalidParameter { request_type, name } => Self::InvalidParameter {
                request_type: request_type.to_owned(),
                name,
            },

            ApiError::UnknownRequestType(name) => Self::UnknownRequestType(name),

            e @ (ApiError::NotLoggedIn | ApiError::AlreadyLoggedIn) => Self::Session {
                message: e.to_string(),
            },

            ApiError::Device { detail, rsp_code } => Self::Device { detail, rsp_code },

            e @ (ApiError::Parse { .. } | ApiError::EmptyResponse | ApiError::MissingField { .. }) => {
                Self::BadResponse {
                    message: e.to_string(),
                }
            }

            ApiError::Serialization { message } => Self::Validation {
                field: "parameters".into(),
                reason: message,
            },

            ApiError::Transport(e) if e.is_timeout() => Self::Timeout,

            ApiError::Transport(e) => Self::ConnectionFailed {
                host: e
                    .url()
                    .and_then(|u| u.host_str())
                    .unwrap_or("(unknown)")
                    .to_owned(),
                source: Box::new(e),
            },

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },

            ApiError::Tls(message) => Self::Tls { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Api(e) => e.into(),
            other => Self::Config(Box::new(other)),
        }
    }
}
