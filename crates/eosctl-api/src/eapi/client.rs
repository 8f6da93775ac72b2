// Command API HTTP client
//
// Wraps a blocking `reqwest::Client` with the `runCmds` envelope, basic
// auth, and request framing. One `execute` call is exactly one POST.

use std::time::Duration;

use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::eapi::framing::Frame;
use crate::eapi::models::{CLI_COMMAND_ERROR, RpcRequest, RpcResponse};
use crate::error::Error;
use crate::request::Request;
use crate::transport::{DEFAULT_TIMEOUT, Transport, TransportConfig};

/// Raw HTTP client for one device's command API.
///
/// Holds the endpoint and credentials for a single device. Every call is
/// stateless on the device side: privilege and configuration mode are
/// re-established by the framing lines of each call.
pub struct EapiClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
    credentials: Credentials,
    timeout: Duration,
}

impl EapiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `endpoint` is the full command API URL, usually built with
    /// [`Scheme::endpoint`](crate::Scheme::endpoint).
    pub fn new(
        endpoint: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            credentials,
            timeout: transport.timeout,
        })
    }

    /// Create a client around a pre-built `reqwest` client.
    pub fn with_client(
        http: reqwest::blocking::Client,
        endpoint: Url,
        credentials: Credentials,
    ) -> Self {
        Self {
            http,
            endpoint,
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The command API URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send a POST with the JSON-RPC body and parse the envelope.
    fn post(&self, body: &RpcRequest<'_>) -> Result<RpcResponse, Error> {
        debug!(
            endpoint = %self.endpoint,
            commands = body.params.cmds.len(),
            "POST runCmds"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
            .json(body)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!(
                    "device rejected credentials for user '{}' (HTTP {})",
                    self.credentials.username,
                    status.as_u16()
                ),
            });
        }

        let text = resp.text().map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text,
        })
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

impl Transport for EapiClient {
    fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, Error> {
        let frame = Frame::build(requests, self.credentials.enable_password.as_ref());
        let id = uuid::Uuid::new_v4().to_string();
        let envelope = self.post(&RpcRequest::run_cmds(frame.cmds(), id.clone()))?;

        if let Some(ref echoed) = envelope.id {
            if echoed.as_str() != Some(id.as_str()) {
                return Err(Error::MalformedResponse {
                    message: format!("response id {echoed} does not match request id {id}"),
                });
            }
        }

        match (envelope.result, envelope.error) {
            (_, Some(err)) if err.code == CLI_COMMAND_ERROR && !err.data.is_empty() => {
                debug!(message = %err.message, "device rejected a command");
                frame.split_partial(&err.data)
            }
            (_, Some(err)) => Err(Error::Rpc {
                code: err.code,
                message: err.message,
            }),
            (Some(results), None) => {
                trace!(results = results.len(), "runCmds succeeded");
                frame.split(&results)
            }
            (None, None) => Err(Error::MalformedResponse {
                message: "envelope has neither result nor error".into(),
            }),
        }
    }
}
