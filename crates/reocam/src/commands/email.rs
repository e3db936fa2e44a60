//! E-mail alert command handlers.

use reocam_api::CameraClient;

use crate::cli::{EmailArgs, EmailCommand, GlobalOpts};
use crate::config::Connection;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &CameraClient,
    args: EmailArgs,
    connection: &Connection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EmailCommand::Get => {
            let email = client.settings().get_email_settings().await?;
            util::print_value(&email, global)
        }

        EmailCommand::Set { from_file } => {
            if let Some(path) = from_file {
                // Passed through as-is; the catalog rejects unknown keys.
                let params = util::read_json_object(&path)?;
                client.settings().set_email_settings(params).await?;
            } else {
                let email = connection
                    .email
                    .as_ref()
                    .filter(|e| !e.is_empty())
                    .ok_or_else(|| CliError::Validation {
                        field: "email".into(),
                        reason: format!(
                            "profile '{}' has no [email] settings; pass --from-file",
                            connection.profile_name
                        ),
                    })?;
                client.settings().apply_email(email).await?;
            }
            output::print_success("E-mail settings applied", &global.color, global.quiet);
            Ok(())
        }

        EmailCommand::Motion { state } => {
            client.settings().toggle_motion_email(state.enabled()).await?;
            util::report_toggle("Motion e-mail alerts", state, global);
            Ok(())
        }
    }
}
