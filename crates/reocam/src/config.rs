//! CLI configuration: a thin wrapper around `reocam_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --user, --password, etc.) on top of the active profile.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use reocam_api::{Credentials, EmailParameters, Scheme, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use reocam_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Everything needed to open a camera session.
#[derive(Debug)]
pub struct Connection {
    pub profile_name: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    /// The profile's `[email]` table, if any.
    pub email: Option<EmailParameters>,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Translate config file, profile, and global flags into a [`Connection`].
///
/// Flag values take priority over profile values. The host is validated
/// before any password lookup or prompt.
pub fn resolve_connection(global: &GlobalOpts) -> Result<Connection, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        cfg.profile(&profile_name)?;
    }
    resolve_flags_only(&profile_name, &cfg.defaults, global)
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<Connection, CliError> {
    // 1. Host (flag > env > profile)
    let host = global.host.as_deref().unwrap_or(&profile.host);
    reocam_config::parse_host(host)?;

    // 2. Credentials (flag > profile chain)
    let user = match global.user {
        Some(ref user) => user.clone(),
        None => reocam_config::resolve_username(profile, profile_name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => reocam_config::resolve_password(profile, profile_name)?,
    };
    let credentials = Credentials::new(&user, password.expose_secret(), host)?;

    // 3. Transport, with flag overrides
    let mut transport = reocam_config::profile_transport(profile, defaults);
    apply_transport_flags(&mut transport, global);

    debug!(profile = profile_name, host, "resolved camera profile");
    Ok(Connection {
        profile_name: profile_name.to_owned(),
        credentials,
        transport,
        email: profile.email.clone(),
    })
}

fn resolve_flags_only(
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<Connection, CliError> {
    let host = global.host.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    reocam_config::parse_host(host)?;

    let user = global.user.clone().ok_or_else(|| CliError::NoCredentials {
        profile: profile_name.to_owned(),
    })?;
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None if std::io::stdin().is_terminal() => {
            SecretString::from(rpassword::prompt_password("Camera password: ")?)
        }
        None => {
            return Err(CliError::NoCredentials {
                profile: profile_name.to_owned(),
            });
        }
    };
    let credentials = Credentials::new(&user, password.expose_secret(), host)?;

    // No profile: the [defaults] table alone shapes the transport.
    let mut transport = reocam_config::profile_transport(&Profile::default(), defaults);
    apply_transport_flags(&mut transport, global);

    Ok(Connection {
        profile_name: profile_name.to_owned(),
        credentials,
        transport,
        email: None,
    })
}

fn apply_transport_flags(transport: &mut TransportConfig, global: &GlobalOpts) {
    if global.https {
        transport.scheme = Scheme::Https;
    }
    if let Some(port) = global.port {
        transport.port = Some(port);
    }
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        transport.timeout = Duration::from_secs(timeout);
    }
}
