//! Config subcommand handlers. None of these contact a device.

use eosctl_config::{Config, DeviceProfile};

use crate::cli::{AddDeviceArgs, ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

/// The config as a TOML value with stored secrets masked.
fn redacted(cfg: &Config) -> Result<toml::Value, CliError> {
    let mut value = toml::Value::try_from(cfg)?;
    if let Some(devices) = value.get_mut("devices").and_then(toml::Value::as_table_mut) {
        for device in devices.iter_mut().map(|(_, v)| v).filter_map(toml::Value::as_table_mut) {
            for key in ["password", "enable_password"] {
                if let Some(secret) = device.get_mut(key) {
                    *secret = toml::Value::String(REDACTED.into());
                }
            }
        }
    }
    Ok(value)
}

fn add_device(args: AddDeviceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load()?;

    let profile = DeviceProfile {
        host: args.address,
        transport: (if args.http { "http" } else { "https" }).into(),
        port: args.api_port,
        username: args.user,
        password_env: args.password_env,
        ca_cert: args.ca_cert,
        ..DeviceProfile::default()
    };
    cfg.devices.insert(args.name.clone(), profile);
    if args.default || cfg.default_device.is_none() {
        cfg.default_device = Some(args.name.clone());
    }

    let path = eosctl_config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Saved device '{}' to {}", args.name, path.display());
    }
    Ok(())
}

fn set_password(name: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let name = name
        .or_else(|| global.device.clone())
        .or_else(|| cfg.default_device.clone())
        .ok_or_else(|| CliError::Validation {
            field: "device".into(),
            reason: "name a device, or pass --device".into(),
        })?;

    let password = rpassword::prompt_password(format!("Password for {name}: "))?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    eosctl_config::store_password(&name, &password)?;
    if !global.quiet {
        eprintln!("Password for '{name}' stored in the system keyring");
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load()?;
            let value = redacted(&cfg)?;
            let text = toml::to_string_pretty(&value)?;
            let out = output::render_single(
                global.format(),
                &value,
                |_| text.clone(),
                |_| text.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &eosctl_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::AddDevice(args) => add_device(args, global),

        ConfigCommand::SetPassword { name } => set_password(name, global),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_stored_secrets() {
        let mut cfg = Config::default();
        cfg.devices.insert(
            "leaf1".into(),
            DeviceProfile {
                host: "10.1.2.1".into(),
                transport: "https".into(),
                password: Some("hunter2".into()),
                enable_password: Some("en".into()),
                ..DeviceProfile::default()
            },
        );

        let text = toml::to_string_pretty(&redacted(&cfg).unwrap()).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("\"en\""));
        assert!(text.contains(REDACTED));
        assert!(text.contains("10.1.2.1"));
    }
}
