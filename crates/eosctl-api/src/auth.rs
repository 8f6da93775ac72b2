use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// Path of the JSON-RPC endpoint on every EOS device.
pub const COMMAND_API_PATH: &str = "/command-api";

/// Credentials for the command API.
///
/// eAPI authenticates every request with HTTP basic auth; there is no
/// session to establish. The optional enable password is fed as `input`
/// to the `enable` line that prefixes every call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub enable_password: Option<SecretString>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            enable_password: None,
        }
    }

    pub fn with_enable_password(mut self, secret: SecretString) -> Self {
        self.enable_password = Some(secret);
        self
    }
}

/// How the command API is exposed on the device.
///
/// Determines the URL scheme and the default port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `protocol http` under `management api http-commands`.
    Http,
    /// `protocol https` (the EOS default).
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    /// Build the full command API URL for `host`.
    ///
    /// `host` may be a name, an IPv4 address, or a bracketed IPv6 address.
    pub fn endpoint(self, host: &str, port: Option<u16>) -> Result<Url, Error> {
        let port = port.unwrap_or_else(|| self.default_port());
        let url = Url::parse(&format!(
            "{}://{host}:{port}{COMMAND_API_PATH}",
            self.as_str()
        ))?;
        Ok(url)
    }
}

impl std::str::FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("expected 'http' or 'https', got '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_endpoint_uses_default_port() {
        let url = Scheme::Https.endpoint("10.1.2.1", None).expect("valid endpoint");
        assert_eq!(url.as_str(), "https://10.1.2.1/command-api");
        assert_eq!(url.port_or_known_default(), Some(443));
    }

    #[test]
    fn http_endpoint_keeps_custom_port() {
        let url = Scheme::Http
            .endpoint("switch1.lab", Some(8080))
            .expect("valid endpoint");
        assert_eq!(url.as_str(), "http://switch1.lab:8080/command-api");
    }

    #[test]
    fn scheme_parses_case_insensitively() {
        assert_eq!("HTTPS".parse::<Scheme>(), Ok(Scheme::Https));
        assert!("ssh".parse::<Scheme>().is_err());
    }
}
