//! Async client for the Reolink camera CGI configuration API.
//!
//! The camera exposes one endpoint, `/cgi-bin/api.cgi`, that takes a JSON
//! array of `{cmd, action, param}` envelopes and answers with a JSON array
//! of `{value}` / `{error}` objects. A session token obtained by logging in
//! rides along as a query parameter on every later request.
//!
//! - **[`catalog`]**: the closed set of request types, their wire names,
//!   action codes, and parameter allow-lists.
//! - **[`request`]**: envelope construction and allow-list enforcement.
//! - **[`response`]**: uniform success/failure classification.
//! - **[`CameraClient`]**: the session state machine and query gateway.
//! - **[`Settings`]**: e-mail, FTP, push, and infrared helpers on top.
//!
//! ```no_run
//! # async fn run() -> Result<(), reocam_api::Error> {
//! use reocam_api::{CameraClient, TransportConfig};
//!
//! let mut camera = CameraClient::new("admin", "secret", "10.1.1.1", &TransportConfig::default())?;
//! camera.login().await?;
//! camera.settings().toggle_motion_email(false).await?;
//! let email = camera.settings().get_email_settings().await?;
//! println!("{email}");
//! camera.close().await
//! # }
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod settings;
pub mod transport;

pub use auth::Credentials;
pub use catalog::{Action, CommandSpec, RequestType};
pub use client::{CameraClient, Session, SessionState};
pub use error::Error;
pub use request::{Parameters, RequestEnvelope};
pub use response::{Payload, ResponseOutcome};
pub use settings::{EmailParameters, IrLightState, PUSH_SCHEDULE_SLOTS, Settings};
pub use transport::{HttpTransport, RawResponse, Scheme, TlsMode, Transport, TransportConfig};
