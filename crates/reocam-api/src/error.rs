use thiserror::Error;

/// Top-level error type for the `reocam-api` crate.
///
/// Covers every failure mode of a camera session: construction,
/// local request validation, session preconditions, transport, and the
/// device's own response. Nothing in this crate retries; every variant is
/// reported once to the immediate caller.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The camera host is not a syntactically valid IPv4/IPv6 address.
    #[error("No valid IP address: {host}")]
    InvalidHost { host: String },

    // ── Request validation ──────────────────────────────────────────
    /// A parameter name outside the request type's allow-list.
    /// Raised before anything is sent.
    #[error("{name} is not an allowed parameter for request type {request_type}")]
    InvalidParameter {
        request_type: &'static str,
        name: String,
    },

    /// A request type name that is not in the command catalog.
    #[error("{0} is not a valid type of request")]
    UnknownRequestType(String),

    // ── Session ─────────────────────────────────────────────────────
    /// The operation needs an active session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// `login()` was called on a client that already holds a token.
    #[error("Already logged in")]
    AlreadyLoggedIn,

    // ── Response ────────────────────────────────────────────────────
    /// The response body was not valid JSON.
    #[error("Error parsing response: {message}")]
    Parse { message: String, body: String },

    /// The response parsed but was not a non-empty array.
    #[error("No data in response")]
    EmptyResponse,

    /// The device answered with an `error` object.
    #[error("Request failed: {detail}")]
    Device { detail: String, rsp_code: Option<i64> },

    /// A successful payload lacked the field an operation extracts.
    #[error("Response is missing field {field}")]
    MissingField { field: String },

    /// Typed parameters could not be turned into a parameter map.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` for session-state precondition failures, which are
    /// raised locally without touching the network.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::AlreadyLoggedIn)
    }

    /// Returns `true` if this is a transient error a caller may retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The device's `rspCode`, if the device reported one.
    pub fn rsp_code(&self) -> Option<i64> {
        match self {
            Self::Device { rsp_code, .. } => *rsp_code,
            _ => None,
        }
    }
}
