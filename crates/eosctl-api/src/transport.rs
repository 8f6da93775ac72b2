// The transport seam and the settings for the real one.
//
// Everything above this crate talks to a device through `Transport`.
// `EapiClient` is the HTTP implementation; its TLS posture and timeout
// come from `TransportConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::ClientBuilder;
use serde_json::Value;

use crate::error::Error;
use crate::request::Request;

/// Timeout for one `runCmds` POST when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes an ordered batch of requests as a single round trip.
///
/// Implementations must return one fragment per request, in request
/// order, or an error. Callers treat any other count as a protocol
/// violation. The real implementation is [`crate::EapiClient`]; tests
/// substitute in-memory fakes.
pub trait Transport {
    fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, Error> {
        (**self).execute(requests)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, Error> {
        (**self).execute(requests)
    }
}

/// How the command API's certificate is checked.
///
/// A factory-fresh EOS device serves a self-signed certificate on
/// `management api http-commands`, so lab setups usually need
/// `DangerAcceptInvalid` or a `CustomCa` holding that certificate.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Platform trust store.
    System,
    /// Trust only the PEM bundle at this path (in addition to built-in roots).
    CustomCa(PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

impl TlsMode {
    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        Ok(match self {
            Self::System => builder,
            Self::CustomCa(path) => builder.add_root_certificate(load_ca(path)?),
            Self::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        })
    }
}

fn load_ca(path: &Path) -> Result<reqwest::Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA bundle {}: {e}", path.display())))?;
    reqwest::Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("{} is not a PEM certificate: {e}", path.display())))
}

/// Settings for the HTTP client behind [`crate::EapiClient`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Bound on one whole `runCmds` round trip, configuration included.
    pub timeout: Duration,
}

impl TransportConfig {
    /// Build the blocking `reqwest` client. Fails only on TLS setup.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, Error> {
        let builder = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("eosctl/", env!("CARGO_PKG_VERSION")));

        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("cannot build HTTP client: {e}")))
    }
}
