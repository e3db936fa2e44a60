//! FTP command handlers.

use reocam_api::CameraClient;

use crate::cli::{FtpArgs, FtpCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &CameraClient,
    args: FtpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FtpCommand::Get => {
            let ftp = client.settings().get_ftp_settings().await?;
            util::print_value(&ftp, global)
        }

        FtpCommand::Upload { state } => {
            client.settings().toggle_ftp_upload(state.enabled()).await?;
            util::report_toggle("FTP upload", state, global);
            Ok(())
        }
    }
}
