//! Device profiles for eosctl.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `eosctl_core::DeviceConfig`. The CLI layers its
//! `GlobalOpts` overrides on top of this.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eosctl_core::{DeviceConfig, Scheme, TlsVerification};

/// Keyring service name under which secrets are stored.
pub const KEYRING_SERVICE: &str = "eosctl";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "EOSCTL_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no device named '{name}' in the config file")]
    UnknownDevice { name: String },

    #[error("no credentials configured for device '{device}'")]
    NoCredentials { device: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Device alias used when `--device` is not given.
    pub default_device: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceProfile>,
}

impl Config {
    /// Look up a device profile by alias.
    pub fn device(&self, name: &str) -> Result<&DeviceProfile, ConfigError> {
        self.devices
            .get(name)
            .ok_or_else(|| ConfigError::UnknownDevice { name: name.into() })
    }

    /// The alias to use: an explicit choice, else `default_device`.
    pub fn active_device_name<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.default_device.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named device profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeviceProfile {
    /// Hostname or address (no scheme, no path).
    pub host: String,

    /// `http` or `https`.
    #[serde(default = "default_transport")]
    pub transport: String,

    /// Overrides the transport's default port.
    pub port: Option<u16>,

    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Password for `enable`, if the device requires one.
    pub enable_password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

fn default_transport() -> String {
    "https".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `EOSCTL_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "eosctl", "eosctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("eosctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, then `EOSCTL_`-prefixed env vars (`__` nests, e.g.
/// `EOSCTL_DEFAULTS__TIMEOUT`). A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EOSCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_secret(device: &str, kind: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{device}/{kind}")).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Store a device password in the system keyring.
pub fn store_password(device: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{device}/password"))?;
    entry.set_password(password)?;
    Ok(())
}

/// Username from the profile, else `EOSCTL_USERNAME`.
pub fn resolve_username(profile: &DeviceProfile, device: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("EOSCTL_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            device: device.into(),
        })
}

/// Resolve the login password from the credential chain.
pub fn resolve_password(profile: &DeviceProfile, device: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(pw) = std::env::var("EOSCTL_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 3. System keyring
    if let Some(secret) = keyring_secret(device, "password") {
        return Ok(secret);
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        device: device.into(),
    })
}

/// Resolve the optional `enable` password: env, keyring, then plaintext.
pub fn resolve_enable_password(profile: &DeviceProfile, device: &str) -> Option<SecretString> {
    std::env::var("EOSCTL_ENABLE_PASSWORD")
        .ok()
        .map(SecretString::from)
        .or_else(|| keyring_secret(device, "enable"))
        .or_else(|| profile.enable_password.clone().map(SecretString::from))
}

/// Pick the TLS mode: insecure wins, then a custom CA, then the EOS
/// default of accepting the device's self-signed certificate.
pub fn tls_for(profile: &DeviceProfile, default_insecure: bool) -> TlsVerification {
    if profile.insecure.unwrap_or(default_insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.insecure == Some(false) {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    }
}

/// Build a `DeviceConfig` from a profile, with no CLI overrides.
pub fn profile_to_device_config(
    profile: &DeviceProfile,
    device: &str,
    defaults: &Defaults,
) -> Result<DeviceConfig, ConfigError> {
    let password = resolve_password(profile, device)?;
    device_config_with_password(profile, device, defaults, password)
}

/// Like [`profile_to_device_config`], with a password that was already
/// chosen (for example from a command-line flag).
pub fn device_config_with_password(
    profile: &DeviceProfile,
    device: &str,
    defaults: &Defaults,
    password: SecretString,
) -> Result<DeviceConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("device '{device}' has no host"),
        });
    }

    let scheme: Scheme = profile
        .transport
        .parse()
        .map_err(|reason| ConfigError::Validation {
            field: "transport".into(),
            reason,
        })?;

    let username = resolve_username(profile, device)?;

    Ok(DeviceConfig {
        host: profile.host.clone(),
        scheme,
        port: profile.port,
        username,
        password,
        enable_password: resolve_enable_password(profile, device),
        tls: tls_for(profile, defaults.insecure),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}
