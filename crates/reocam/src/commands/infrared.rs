//! Infrared light handler.

use reocam_api::{CameraClient, IrLightState};

use crate::cli::{GlobalOpts, Toggle};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &CameraClient,
    state: Toggle,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ir = IrLightState::from(state.enabled());
    client.settings().set_infrared_light(ir).await?;
    output::print_success(
        &format!("Infrared lights set to {ir}"),
        &global.color,
        global.quiet,
    );
    Ok(())
}
