//! Device resolution: config file + profile + global flag overrides.
//!
//! This is the single place where CLI flags cross into
//! `eosctl_core::DeviceConfig`.

use std::time::Duration;

use secrecy::SecretString;

use eosctl_config::{Config, DeviceProfile};
use eosctl_core::{DeviceConfig, Scheme, TlsVerification};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Load the config file, tolerating its absence.
pub fn load() -> Result<Config, CliError> {
    Ok(eosctl_config::load_config()?)
}

/// Output format from the config file's `[defaults]`, if it names a valid one.
pub fn default_output(cfg: &Config) -> Option<OutputFormat> {
    <OutputFormat as clap::ValueEnum>::from_str(&cfg.defaults.output, true).ok()
}

/// Resolve the device to talk to.
///
/// `--device` (or `default_device`) selects a profile whose fields the
/// global flags override. A bare `--host` without a profile builds the
/// device from flags alone.
pub fn resolve_device(global: &GlobalOpts, cfg: &Config) -> Result<DeviceConfig, CliError> {
    let explicit = global.device.as_deref();
    let selected = if explicit.is_none() && global.host.is_some() {
        None
    } else {
        cfg.active_device_name(explicit)
    };

    match selected {
        Some(name) => {
            let profile = cfg.devices.get(name).ok_or_else(|| CliError::DeviceNotFound {
                name: name.into(),
                available: available_devices(cfg),
            })?;
            from_profile(profile, name, cfg, global)
        }
        None => from_flags(global, cfg),
    }
}

fn available_devices(cfg: &Config) -> String {
    if cfg.devices.is_empty() {
        "(none)".into()
    } else {
        cfg.devices.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn from_profile(
    profile: &DeviceProfile,
    name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<DeviceConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(scheme) = global.transport {
        profile.transport = scheme.as_str().into();
    }
    if let Some(port) = global.port {
        profile.port = Some(port);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    let device = match global.password {
        Some(ref pw) => eosctl_config::device_config_with_password(
            &profile,
            name,
            &cfg.defaults,
            SecretString::from(pw.clone()),
        )?,
        None => eosctl_config::profile_to_device_config(&profile, name, &cfg.defaults)?,
    };
    Ok(device)
}

fn from_flags(global: &GlobalOpts, cfg: &Config) -> Result<DeviceConfig, CliError> {
    let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
        path: eosctl_config::config_path().display().to_string(),
    })?;
    let password = global
        .password
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            device: host.clone(),
        })?;
    let username = global.username.clone().unwrap_or_else(|| "admin".into());

    let tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(DeviceConfig {
        scheme: global.transport.unwrap_or(Scheme::Https),
        port: global.port,
        tls,
        timeout: Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout)),
        ..DeviceConfig::new(host, username, SecretString::from(password))
    })
}
