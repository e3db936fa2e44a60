use std::net::IpAddr;

use secrecy::SecretString;

use crate::error::Error;

/// Login material for one camera.
///
/// Validated once at construction: surrounding whitespace is trimmed from
/// every field and the host must parse as an IPv4 or IPv6 address. There
/// is no way to build a `Credentials` with an invalid host, so a client
/// holding one never has to re-check it.
#[derive(Debug, Clone)]
pub struct Credentials {
    user: String,
    password: SecretString,
    host: IpAddr,
}

impl Credentials {
    pub fn new(user: &str, password: &str, host: &str) -> Result<Self, Error> {
        let host = host.trim();
        let host: IpAddr = host.parse().map_err(|_| Error::InvalidHost {
            host: host.to_owned(),
        })?;

        Ok(Self {
            user: user.trim().to_owned(),
            password: SecretString::from(password.trim().to_owned()),
            host,
        })
    }

    /// The user name sent as `userName` on login.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// The camera's address.
    pub fn host(&self) -> IpAddr {
        self.host
    }
}
