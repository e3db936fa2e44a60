// Command catalog
//
// The static table of everything the camera accepts: for each logical
// request type, its wire command name, action code, and the allow-list of
// parameter names. The request builder and the session manager both route
// through this table; nothing else hard-codes parameter names.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::Error;

/// A logical request type, as used for the `param` key of the envelope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum RequestType {
    User,
    Logout,
    GetEmail,
    GetPush,
    GetFtp,
    Email,
    Push,
    Ftp,
    IrLights,
}

impl RequestType {
    /// The catalog entry for this request type.
    pub fn spec(self) -> &'static CommandSpec {
        match self {
            Self::User => &USER,
            Self::Logout => &LOGOUT,
            Self::GetEmail => &GET_EMAIL,
            Self::GetPush => &GET_PUSH,
            Self::GetFtp => &GET_FTP,
            Self::Email => &EMAIL,
            Self::Push => &PUSH,
            Self::Ftp => &FTP,
            Self::IrLights => &IR_LIGHTS,
        }
    }

    /// Whether this request is only valid inside an active session.
    ///
    /// Only the login request itself may be sent without a token.
    pub fn requires_session(self) -> bool {
        self != Self::User
    }
}

/// The `action` field of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Change settings or control the device.
    Set,
    /// Read settings back.
    Get,
}

impl Action {
    /// Integer code on the wire.
    pub fn code(self) -> u8 {
        match self {
            Self::Set => 0,
            Self::Get => 1,
        }
    }
}

/// Static definition of one request type.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub request_type: RequestType,
    pub wire_command: &'static str,
    pub action: Action,
    pub allowed_parameters: &'static [&'static str],
}

impl CommandSpec {
    pub fn allows(&self, name: &str) -> bool {
        self.allowed_parameters.contains(&name)
    }
}

/// Look up a catalog entry by request type name (e.g. `"GetPush"`).
pub fn lookup(request_type: &str) -> Result<&'static CommandSpec, Error> {
    RequestType::from_str(request_type)
        .map(RequestType::spec)
        .map_err(|_| Error::UnknownRequestType(request_type.to_owned()))
}

// ── Table ───────────────────────────────────────────────────────────

static USER: CommandSpec = CommandSpec {
    request_type: RequestType::User,
    wire_command: "Login",
    action: Action::Set,
    allowed_parameters: &["userName", "password"],
};

static LOGOUT: CommandSpec = CommandSpec {
    request_type: RequestType::Logout,
    wire_command: "Logout",
    action: Action::Set,
    allowed_parameters: &[],
};

static GET_EMAIL: CommandSpec = CommandSpec {
    request_type: RequestType::GetEmail,
    wire_command: "GetEmail",
    action: Action::Get,
    allowed_parameters: &[],
};

static GET_PUSH: CommandSpec = CommandSpec {
    request_type: RequestType::GetPush,
    wire_command: "GetPush",
    action: Action::Get,
    allowed_parameters: &["channel"],
};

static GET_FTP: CommandSpec = CommandSpec {
    request_type: RequestType::GetFtp,
    wire_command: "GetFtp",
    action: Action::Get,
    allowed_parameters: &[],
};

static EMAIL: CommandSpec = CommandSpec {
    request_type: RequestType::Email,
    wire_command: "SetEmail",
    action: Action::Set,
    allowed_parameters: &[
        "smtpServer",
        "senderNickname",
        "smtpPort",
        "senderAddress",
        "smtpPassword",
        "recipientAddress1",
        "recipientAddress2",
        "recipientAddress3",
        "interval",
        "ssl",
        "attachment",
        "schedule",
    ],
};

static PUSH: CommandSpec = CommandSpec {
    request_type: RequestType::Push,
    wire_command: "SetPush",
    action: Action::Set,
    allowed_parameters: &["schedule"],
};

static FTP: CommandSpec = CommandSpec {
    request_type: RequestType::Ftp,
    wire_command: "SetFtp",
    action: Action::Set,
    allowed_parameters: &["schedule"],
};

static IR_LIGHTS: CommandSpec = CommandSpec {
    request_type: RequestType::IrLights,
    wire_command: "SetIrLights",
    action: Action::Set,
    allowed_parameters: &["state"],
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_type_maps_back_to_itself() {
        for ty in RequestType::iter() {
            assert_eq!(ty.spec().request_type, ty);
            assert_eq!(lookup(&ty.to_string()).unwrap().request_type, ty);
        }
    }

    #[test]
    fn wire_names_and_actions() {
        let expected = [
            (RequestType::User, "Login", 0),
            (RequestType::Logout, "Logout", 0),
            (RequestType::GetEmail, "GetEmail", 1),
            (RequestType::GetPush, "GetPush", 1),
            (RequestType::GetFtp, "GetFtp", 1),
            (RequestType::Email, "SetEmail", 0),
            (RequestType::Push, "SetPush", 0),
            (RequestType::Ftp, "SetFtp", 0),
            (RequestType::IrLights, "SetIrLights", 0),
        ];
        for (ty, cmd, action) in expected {
            let spec = ty.spec();
            assert_eq!(spec.wire_command, cmd, "{ty}");
            assert_eq!(spec.action.code(), action, "{ty}");
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = lookup("Reboot").unwrap_err();
        assert!(matches!(err, Error::UnknownRequestType(ref name) if name == "Reboot"));
        // Lookup is by request type, not wire command.
        assert!(lookup("SetEmail").is_err());
    }

    #[test]
    fn only_login_bypasses_session() {
        let open: Vec<_> = RequestType::iter()
            .filter(|ty| !ty.requires_session())
            .collect();
        assert_eq!(open, vec![RequestType::User]);
    }
}
