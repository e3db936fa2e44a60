// Camera session client
//
// Owns the login/logout/token lifecycle and is the single gateway every
// other operation goes through: catalog lookup, envelope build, send,
// validate. One client holds one session; callers that need concurrency
// create one client per task.

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::auth::Credentials;
use crate::catalog::{self, CommandSpec, RequestType};
use crate::error::Error;
use crate::request::{self, Parameters};
use crate::response::{self, Payload};
use crate::settings::Settings;
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Session state as observed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// The authenticated relationship with the camera.
///
/// A token exists exactly when the session is logged in; the enum makes
/// any other combination unrepresentable.
#[derive(Debug, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { token: SecretString },
}

impl Session {
    pub fn state(&self) -> SessionState {
        match self {
            Self::LoggedOut => SessionState::LoggedOut,
            Self::LoggedIn { .. } => SessionState::LoggedIn,
        }
    }

    pub fn token(&self) -> Option<&SecretString> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn { token } => Some(token),
        }
    }

    /// Leave the logged-out state in place and hand back the token, if any.
    fn take_token(&mut self) -> Option<SecretString> {
        match std::mem::take(self) {
            Self::LoggedOut => None,
            Self::LoggedIn { token } => Some(token),
        }
    }
}

/// Session-oriented client for one camera.
///
/// Not meant for concurrent use: `login` and `logout` take `&mut self`,
/// and only one command is in flight at a time. Dropping a client that is
/// still logged in triggers one best-effort logout on the current tokio
/// runtime; prefer [`close`](Self::close) to observe its result.
#[derive(Debug)]
pub struct CameraClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    credentials: Credentials,
    session: Session,
}

impl CameraClient<HttpTransport> {
    /// Validate the host and build an HTTP client for it.
    ///
    /// Fails with [`Error::InvalidHost`] before any HTTP machinery is set up.
    pub fn new(
        user: &str,
        password: &str,
        host: &str,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let credentials = Credentials::new(user, password, host)?;
        Self::connect(credentials, config)
    }

    /// Build an HTTP client for already-validated credentials.
    pub fn connect(credentials: Credentials, config: &TransportConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(credentials.host(), config)?;
        Ok(Self::with_transport(credentials, transport))
    }
}

impl<T: Transport> CameraClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            credentials,
            session: Session::LoggedOut,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.state() == SessionState::LoggedIn
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<&SecretString> {
        self.session.token()
    }

    /// Higher-level settings operations bound to this session.
    pub fn settings(&self) -> Settings<'_, T> {
        Settings::new(self)
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate and store the session token.
    ///
    /// On any failure the client stays logged out and the error is
    /// returned unchanged.
    pub async fn login(&mut self) -> Result<(), Error> {
        if self.is_logged_in() {
            return Err(Error::AlreadyLoggedIn);
        }

        let mut parameters = Parameters::new();
        parameters.insert("userName".into(), Value::from(self.credentials.user()));
        parameters.insert(
            "password".into(),
            Value::from(self.credentials.password().expose_secret()),
        );

        debug!(host = %self.credentials.host(), user = self.credentials.user(), "logging in");
        let payload = self.query(RequestType::User, parameters).await?;
        let token = payload.token()?;

        self.session = Session::LoggedIn {
            token: SecretString::from(token.to_owned()),
        };
        debug!("login successful");
        Ok(())
    }

    /// End the session. A no-op when already logged out.
    ///
    /// If the camera rejects the logout the client stays logged in.
    pub async fn logout(&mut self) -> Result<(), Error> {
        if !self.is_logged_in() {
            debug!("not logged in, nothing to log out");
            return Ok(());
        }

        self.query(RequestType::Logout, Parameters::new()).await?;
        self.session = Session::LoggedOut;
        debug!("logout complete");
        Ok(())
    }

    /// Log out and release the session, reporting the logout outcome.
    ///
    /// The session is released even when the logout fails, so no second
    /// attempt is made on drop.
    pub async fn close(mut self) -> Result<(), Error> {
        let result = self.logout().await;
        if let Err(ref e) = result {
            warn!(error = %e, "logout on close failed");
            self.session = Session::LoggedOut;
        }
        result
    }

    // ── Query gateway ────────────────────────────────────────────────

    /// Send one catalog request and validate the response.
    ///
    /// Every request except the login request needs an active session.
    /// The payload is returned whole; no field is extracted here.
    pub async fn query(
        &self,
        request_type: RequestType,
        parameters: Parameters,
    ) -> Result<Payload, Error> {
        if request_type.requires_session() && !self.is_logged_in() {
            return Err(Error::NotLoggedIn);
        }

        let token = self.session.token().map(ExposeSecret::expose_secret);
        dispatch(
            self.transport.as_ref(),
            request_type.spec(),
            parameters,
            token,
        )
        .await
    }

    /// [`query`](Self::query) by request type name, for dynamic callers.
    pub async fn query_named(
        &self,
        request_type: &str,
        parameters: Parameters,
    ) -> Result<Payload, Error> {
        let spec = catalog::lookup(request_type)?;
        self.query(spec.request_type, parameters).await
    }
}

impl<T: Transport> Drop for CameraClient<T> {
    fn drop(&mut self) {
        let Some(token) = self.session.take_token() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("client dropped while logged in outside a tokio runtime; session left open");
            return;
        };

        let transport = Arc::clone(&self.transport);
        runtime.spawn(async move {
            let token = token.expose_secret();
            match dispatch(
                transport.as_ref(),
                RequestType::Logout.spec(),
                Parameters::new(),
                Some(token),
            )
            .await
            {
                Ok(_) => debug!("session released on drop"),
                Err(e) => warn!(error = %e, "logout on drop failed"),
            }
        });
    }
}

/// Build, send, and validate one request.
async fn dispatch<T: Transport>(
    transport: &T,
    spec: &'static CommandSpec,
    parameters: Parameters,
    token: Option<&str>,
) -> Result<Payload, Error> {
    let envelope = request::build(spec, parameters)?;
    let body = envelope.to_body();
    if spec.request_type == RequestType::User {
        trace!(cmd = spec.wire_command, "request envelope withheld (credentials)");
    } else {
        trace!(cmd = spec.wire_command, body = %body, "request envelope");
    }

    let path = request::api_path(spec.wire_command, token);
    debug!(cmd = spec.wire_command, action = envelope.action, "POST {}", request::API_ENDPOINT);

    let raw = transport.send(Method::POST, &path, &body).await?;
    trace!(status = %raw.status, body = %String::from_utf8_lossy(&raw.body), "raw response");

    let outcome = response::validate(&raw.body);
    match &outcome {
        Ok(_) => debug!(cmd = spec.wire_command, "request successful"),
        Err(e) => debug!(cmd = spec.wire_command, error = %e, "request failed"),
    }
    outcome
}
