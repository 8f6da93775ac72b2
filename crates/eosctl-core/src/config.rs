// ── Runtime connection configuration ──
//
// Describes how to reach one EOS device. Carries credentials and
// connection tuning but never touches disk: the CLI builds a
// `DeviceConfig` from its profile file and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use eosctl_api::{Credentials, Scheme, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. EOS ships a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Everything needed to talk to one device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Hostname or address, without scheme.
    pub host: String,
    pub scheme: Scheme,
    /// Overrides the scheme's default port.
    pub port: Option<u16>,
    pub username: String,
    pub password: SecretString,
    pub enable_password: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            host: host.into(),
            scheme: Scheme::default(),
            port: None,
            username: username.into(),
            password,
            enable_password: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Full command API URL.
    pub fn endpoint(&self) -> Result<Url, CoreError> {
        self.scheme
            .endpoint(&self.host, self.port)
            .map_err(|e| CoreError::Config {
                message: format!("invalid device address '{}': {e}", self.host),
            })
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }

    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        match &self.enable_password {
            Some(secret) => credentials.with_enable_password(secret.clone()),
            None => credentials,
        }
    }
}
