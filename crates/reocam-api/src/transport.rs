// HTTP transport
//
// The session manager only needs "send this JSON to this path and give me
// the bytes back". `Transport` is that seam; `HttpTransport` is the
// reqwest-backed implementation, configured through `TransportConfig`.

use std::future::Future;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Raw response as returned by the camera. The status is informational;
/// success or failure is decided from the body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Capability to deliver one request to the camera.
///
/// Timeouts, TLS, and connection handling are the implementation's
/// business. Implementations must be shareable across tasks because the
/// client's teardown logout runs on a spawned task.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

/// URL scheme for the camera's web interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// TLS verification mode for `https` cameras.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (cameras ship self-signed).
    DangerAcceptInvalid,
}

/// Settings for building an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub scheme: Scheme,
    pub port: Option<u16>,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            port: None,
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Root URL of the camera's web interface, e.g. `http://10.1.1.1`.
    pub fn base_url(&self, host: IpAddr) -> Result<Url, Error> {
        let host = match host {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{v6}]"),
        };
        let port = self.port.map(|p| format!(":{p}")).unwrap_or_default();
        Ok(Url::parse(&format!(
            "{}://{host}{port}/",
            self.scheme.as_str()
        ))?)
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("reocam/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(host: IpAddr, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
            base_url: config.base_url(host)?,
        })
    }

    /// Use a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: &Value) -> Result<RawResponse, Error> {
        let url = self.base_url.join(path)?;
        debug!(%method, host = ?url.host_str(), path = url.path(), "sending request");

        let resp = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(Error::Transport)?;
        debug!(%status, len = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}
