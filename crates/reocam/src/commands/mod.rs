//! Command dispatch: bridges CLI args -> camera requests -> output formatting.

pub mod config_cmd;
pub mod email;
pub mod ftp;
pub mod infrared;
pub mod push;
pub mod query;
pub mod util;

use reocam_api::CameraClient;

use crate::cli::{Command, GlobalOpts};
use crate::config::Connection;
use crate::error::CliError;
use crate::output;

/// Dispatch a camera-bound command to its handler.
///
/// The client is already logged in; the caller closes the session.
pub async fn dispatch(
    cmd: Command,
    client: &CameraClient,
    connection: &Connection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login => {
            output::print_success(
                &format!(
                    "Logged in to {} as '{}'",
                    client.credentials().host(),
                    client.credentials().user()
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
        Command::Email(args) => email::handle(client, args, connection, global).await,
        Command::Ftp(args) => ftp::handle(client, args, global).await,
        Command::Push(args) => push::handle(client, args, global).await,
        Command::Infrared { state } => infrared::handle(client, state, global).await,
        Command::Query(args) => query::handle(client, args, global).await,
        // Config and Completions are handled before a session is opened
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
