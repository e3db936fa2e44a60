//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};
use secrecy::{ExposeSecret, SecretString};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            mask_secrets(&mut cfg);
            let value = serde_json::to_value(&cfg)?;
            let out = output::render_value(&global.output, &value)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => init(global),

        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            cfg.profile(&profile_name)?;

            let password = prompt_password()?;
            reocam_config::store_password(&profile_name, &password)?;
            output::print_success(
                &format!("Password stored in system keyring for profile '{profile_name}'"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    let mut cfg = config::load_config_or_default();

    eprintln!("reocam configuration wizard");
    eprintln!("  Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(config::active_profile_name(global, &cfg))
        .interact_text()?;

    let host: String = Input::new()
        .with_prompt("Camera IP address")
        .validate_with(|input: &String| {
            reocam_config::parse_host(input)
                .map(drop)
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    let https = Confirm::new()
        .with_prompt("Use HTTPS?")
        .default(false)
        .interact()?;

    let username: String = Input::new()
        .with_prompt("User name")
        .default("admin".into())
        .interact_text()?;

    let password = prompt_password()?;

    let store_choices = &[
        "Store password in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(store_choices)
        .default(0)
        .interact()?;

    let plaintext = if store_selection == 0 {
        reocam_config::store_password(&profile_name, &password)?;
        eprintln!("  Password stored in system keyring");
        None
    } else {
        Some(password.expose_secret().to_owned())
    };

    // Keep any [email] table an earlier run configured.
    let email = cfg.profiles.remove(&profile_name).and_then(|p| p.email);
    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            host,
            https,
            username: Some(username),
            password: plaintext,
            email,
            ..Profile::default()
        },
    );
    if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }

    config::save_config(&cfg)?;

    output::print_success(
        &format!("Configuration written to {}", config_path.display()),
        &global.color,
        global.quiet,
    );
    eprintln!("  Test it: reocam --profile {profile_name} login");
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

fn prompt_password() -> Result<SecretString, CliError> {
    let password = rpassword::prompt_password("Camera password: ")?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(password))
}

fn mask_secrets(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if let Some(pw) = profile.password.as_mut() {
            *pw = MASK.into();
        }
        if let Some(pw) = profile.email.as_mut().and_then(|e| e.smtp_password.as_mut()) {
            *pw = MASK.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use reocam_api::EmailParameters;

    use super::*;

    #[test]
    fn show_masks_passwords() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "porch".into(),
            Profile {
                host: "10.1.1.1".into(),
                password: Some("hunter2".into()),
                email: Some(EmailParameters {
                    smtp_password: Some("smtp-secret".into()),
                    ..EmailParameters::default()
                }),
                ..Profile::default()
            },
        );
        cfg.profiles.insert(
            "garage".into(),
            Profile {
                host: "10.1.1.2".into(),
                ..Profile::default()
            },
        );

        mask_secrets(&mut cfg);

        let porch = &cfg.profiles["porch"];
        assert_eq!(porch.password.as_deref(), Some(MASK));
        assert_eq!(
            porch.email.as_ref().and_then(|e| e.smtp_password.as_deref()),
            Some(MASK)
        );
        assert_eq!(cfg.profiles["garage"].password, None);
    }
}
