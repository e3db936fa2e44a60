//! Push notification command handlers.

use reocam_api::CameraClient;

use crate::cli::{GlobalOpts, PushArgs, PushCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &CameraClient,
    args: PushArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PushCommand::Get => {
            let push = client.settings().get_push_settings().await?;
            util::print_value(&push, global)
        }

        PushCommand::Motion { state } => {
            client.settings().toggle_motion_push(state.enabled()).await?;
            util::report_toggle("Motion push notifications", state, global);
            Ok(())
        }
    }
}
