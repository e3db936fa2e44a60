// Settings facade
//
// Domain-level operations (booleans, enums, typed e-mail settings)
// translated into catalog parameter maps and sent through the client's
// query gateway. Holds nothing but a borrow of the client.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::catalog::RequestType;
use crate::client::CameraClient;
use crate::error::Error;
use crate::request::Parameters;
use crate::transport::Transport;

/// Slots in the push schedule table: one per hour of the week.
pub const PUSH_SCHEDULE_SLOTS: usize = 7 * 24;

/// Infrared light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum IrLightState {
    /// Switch on automatically when the scene gets dark.
    Auto,
    /// Permanently off.
    Off,
}

impl From<bool> for IrLightState {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Auto } else { Self::Off }
    }
}

/// Typed e-mail settings for `SetEmail`. Unset fields are left out of the
/// request, so the camera keeps its current value for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_address3: Option<String>,
    /// Minimum time between mails, e.g. `"30 Seconds"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// `1` to use SSL/TLS, `0` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<u8>,
    /// `"picture"`, `"video"`, or `"0"` for none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl EmailParameters {
    pub fn to_parameters(&self) -> Result<Parameters, Error> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(Error::Serialization {
                message: format!("expected an object, got {other}"),
            }),
            Err(e) => Err(Error::Serialization {
                message: e.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Encoders ────────────────────────────────────────────────────────

/// `{schedule: {enable: 1|0}}`, used by the e-mail and FTP toggles.
pub fn schedule_enable_parameters(enabled: bool) -> Parameters {
    let mut map = Parameters::new();
    map.insert(
        "schedule".into(),
        json!({ "enable": u8::from(enabled) }),
    );
    map
}

/// `{state: "Auto"|"Off"}`.
pub fn ir_lights_parameters(state: IrLightState) -> Parameters {
    let mut map = Parameters::new();
    map.insert("state".into(), Value::from(state.to_string()));
    map
}

/// A schedule table with every slot on or every slot off.
pub fn uniform_schedule_table(enabled: bool) -> String {
    let slot = if enabled { "1" } else { "0" };
    slot.repeat(PUSH_SCHEDULE_SLOTS)
}

/// `{schedule: {table: "111…"|"000…"}}`.
pub fn push_schedule_parameters(enabled: bool) -> Parameters {
    let mut map = Parameters::new();
    map.insert(
        "schedule".into(),
        json!({ "table": uniform_schedule_table(enabled) }),
    );
    map
}

// ── Facade ──────────────────────────────────────────────────────────

/// Settings operations for one logged-in [`CameraClient`].
///
/// Every method requires an active session; the client's query gateway
/// rejects calls made while logged out with [`Error::NotLoggedIn`].
pub struct Settings<'a, T: Transport> {
    client: &'a CameraClient<T>,
}

impl<'a, T: Transport> Settings<'a, T> {
    pub(crate) fn new(client: &'a CameraClient<T>) -> Self {
        Self { client }
    }

    /// Send e-mail parameters as given. Only names from the `Email`
    /// allow-list are accepted.
    pub async fn set_email_settings(&self, parameters: Parameters) -> Result<(), Error> {
        self.client.query(RequestType::Email, parameters).await?;
        Ok(())
    }

    /// Typed variant of [`set_email_settings`](Self::set_email_settings).
    pub async fn apply_email(&self, email: &EmailParameters) -> Result<(), Error> {
        self.set_email_settings(email.to_parameters()?).await
    }

    /// Enable or disable the motion-detection e-mail alert.
    pub async fn toggle_motion_email(&self, enabled: bool) -> Result<(), Error> {
        self.client
            .query(RequestType::Email, schedule_enable_parameters(enabled))
            .await?;
        info!(enabled, "motion e-mail toggled");
        Ok(())
    }

    /// Enable or disable FTP upload on motion.
    pub async fn toggle_ftp_upload(&self, enabled: bool) -> Result<(), Error> {
        self.client
            .query(RequestType::Ftp, schedule_enable_parameters(enabled))
            .await?;
        info!(enabled, "FTP upload toggled");
        Ok(())
    }

    /// `true` sets the infrared lights to automatic, `false` switches them off.
    pub async fn toggle_infrared_light(&self, enabled: bool) -> Result<(), Error> {
        self.set_infrared_light(IrLightState::from(enabled)).await
    }

    pub async fn set_infrared_light(&self, state: IrLightState) -> Result<(), Error> {
        self.client
            .query(RequestType::IrLights, ir_lights_parameters(state))
            .await?;
        info!(%state, "infrared lights set");
        Ok(())
    }

    /// Enable or disable app push notifications on motion for the whole week.
    pub async fn toggle_motion_push(&self, enabled: bool) -> Result<(), Error> {
        self.client
            .query(RequestType::Push, push_schedule_parameters(enabled))
            .await?;
        info!(enabled, "motion push toggled");
        Ok(())
    }

    /// Current e-mail settings (`value.Email`).
    pub async fn get_email_settings(&self) -> Result<Value, Error> {
        let payload = self
            .client
            .query(RequestType::GetEmail, Parameters::new())
            .await?;
        payload.value_field("Email").cloned()
    }

    /// Current FTP settings (`value.Ftp`).
    pub async fn get_ftp_settings(&self) -> Result<Value, Error> {
        let payload = self
            .client
            .query(RequestType::GetFtp, Parameters::new())
            .await?;
        payload.value_field("Ftp").cloned()
    }

    /// Current push settings of channel 0 (`value.Push`).
    pub async fn get_push_settings(&self) -> Result<Value, Error> {
        let mut parameters = Parameters::new();
        parameters.insert("channel".into(), Value::from(0));
        let payload = self.client.query(RequestType::GetPush, parameters).await?;
        payload.value_field("Push").cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::request;

    #[test]
    fn schedule_enable_encodes_as_integer() {
        assert_eq!(
            Value::Object(schedule_enable_parameters(true)),
            json!({ "schedule": { "enable": 1 } })
        );
        assert_eq!(
            Value::Object(schedule_enable_parameters(false)),
            json!({ "schedule": { "enable": 0 } })
        );
    }

    #[test]
    fn ir_state_from_bool() {
        assert_eq!(IrLightState::from(true), IrLightState::Auto);
        assert_eq!(
            Value::Object(ir_lights_parameters(false.into())),
            json!({ "state": "Off" })
        );
    }

    #[test]
    fn schedule_tables_are_uniform_and_equal_length() {
        let on = uniform_schedule_table(true);
        let off = uniform_schedule_table(false);
        assert_eq!(on.len(), PUSH_SCHEDULE_SLOTS);
        assert_eq!(on.len(), off.len());
        assert!(on.chars().all(|c| c == '1'));
        assert!(off.chars().all(|c| c == '0'));
    }

    #[test]
    fn encoded_parameters_pass_the_allow_list() {
        request::build(RequestType::Email.spec(), schedule_enable_parameters(true)).unwrap();
        request::build(RequestType::Ftp.spec(), schedule_enable_parameters(false)).unwrap();
        request::build(RequestType::Push.spec(), push_schedule_parameters(true)).unwrap();
        request::build(RequestType::IrLights.spec(), ir_lights_parameters(IrLightState::Auto))
            .unwrap();
    }

    #[test]
    fn email_parameters_use_wire_names() {
        let email = EmailParameters {
            smtp_server: Some("smtp.provider.com".into()),
            smtp_port: Some(465),
            recipient_address1: Some("user@provider1.com".into()),
            ssl: Some(1),
            ..EmailParameters::default()
        };
        let map = email.to_parameters().unwrap();
        assert_eq!(
            Value::Object(map.clone()),
            json!({
                "smtpServer": "smtp.provider.com",
                "smtpPort": 465,
                "recipientAddress1": "user@provider1.com",
                "ssl": 1
            })
        );
        request::build(RequestType::Email.spec(), map).unwrap();
    }

    #[test]
    fn empty_email_parameters() {
        assert!(EmailParameters::default().is_empty());
        assert!(EmailParameters::default().to_parameters().unwrap().is_empty());
    }
}
