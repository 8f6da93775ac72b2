//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code per class.

use miette::Diagnostic;
use thiserror::Error;

use eosctl_config::ConfigError;
use eosctl_core::{AccessError, CoreError, ReconcileError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PROTOCOL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to device at {url}")]
    #[diagnostic(
        code(eosctl::connection_failed),
        help(
            "Check that eAPI is enabled (`management api http-commands` / `no shutdown`)\n\
             and reachable. Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(eosctl::tls_error),
        help(
            "EOS ships a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or set ca_cert in the device profile."
        )
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(eosctl::auth_failed),
        help(
            "Verify the username and password.\n\
             Store a password with: eosctl config set-password <device>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for device '{device}'")]
    #[diagnostic(
        code(eosctl::no_credentials),
        help(
            "Pass --username/--password, set EOSCTL_PASSWORD,\n\
             or run: eosctl config set-password {device}"
        )
    )]
    NoCredentials { device: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(eosctl::not_found),
        help("Run: eosctl {list_command} to see what the device reports")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Device verdicts ──────────────────────────────────────────────
    #[error("Device rejected the change: {message}")]
    #[diagnostic(code(eosctl::rejected))]
    Rejected { message: String },

    #[error("Unexpected response from device: {message}")]
    #[diagnostic(
        code(eosctl::protocol),
        help("Re-run with -vv to log the eAPI exchange.")
    )]
    Protocol { message: String },

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(eosctl::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(eosctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Device '{name}' not found in configuration")]
    #[diagnostic(
        code(eosctl::device_not_found),
        help(
            "Available devices: {available}\n\
             Add one with: eosctl config add-device {name} --address <HOST>"
        )
    )]
    DeviceNotFound { name: String, available: String },

    #[error("No device selected")]
    #[diagnostic(
        code(eosctl::no_config),
        help(
            "Pass --host, or --device with a profile from the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(eosctl::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(eosctl::timeout),
        help("Increase timeout with --timeout or check device responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Internal error: {0}")]
    #[diagnostic(code(eosctl::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(eosctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(eosctl::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not serialize config: {0}")]
    #[diagnostic(code(eosctl::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Protocol { .. } => exit_code::PROTOCOL,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                if reason.starts_with("TLS error") {
                    CliError::TlsError { message: reason }
                } else {
                    CliError::ConnectionFailed { url, reason }
                }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: "interfaces".into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Decode { message } | CoreError::Protocol { message } => {
                CliError::Protocol { message }
            }

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .map(|c| c.to_string())
                    .or_else(|| status.map(|s| format!("HTTP {s}")))
                    .unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "device".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<AccessError> for CliError {
    fn from(err: AccessError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ReconcileError> for CliError {
    fn from(err: ReconcileError) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { device } => CliError::NoCredentials { device },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let cases: Vec<(CliError, i32)> = vec![
            (
                CoreError::AuthenticationFailed {
                    message: "401".into(),
                }
                .into(),
                exit_code::AUTH,
            ),
            (
                CoreError::NotFound {
                    entity_type: "ip interface".into(),
                    identifier: "Ethernet9".into(),
                }
                .into(),
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Rejected {
                    message: "overlap".into(),
                }
                .into(),
                exit_code::REJECTED,
            ),
            (
                CoreError::Protocol {
                    message: "count".into(),
                }
                .into(),
                exit_code::PROTOCOL,
            ),
            (
                CoreError::Decode {
                    message: "shape".into(),
                }
                .into(),
                exit_code::PROTOCOL,
            ),
            (
                CoreError::Timeout { timeout_secs: 5 }.into(),
                exit_code::TIMEOUT,
            ),
            (
                CoreError::ConnectionFailed {
                    url: "https://x".into(),
                    reason: "refused".into(),
                }
                .into(),
                exit_code::CONNECTION,
            ),
            (
                CoreError::ValidationFailed {
                    message: "bad cidr".into(),
                }
                .into(),
                exit_code::USAGE,
            ),
            (CoreError::Internal("x".into()).into(), exit_code::GENERAL),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err:?}");
        }
    }

    #[test]
    fn rpc_code_is_kept_in_api_error() {
        let err: CliError = CoreError::Api {
            message: "bad".into(),
            code: Some(1003),
            status: None,
        }
        .into();
        assert!(matches!(err, CliError::ApiError { ref code, .. } if code == "1003"));
    }

    #[test]
    fn missing_credentials_is_an_auth_failure() {
        let err: CliError = ConfigError::NoCredentials {
            device: "leaf1".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
