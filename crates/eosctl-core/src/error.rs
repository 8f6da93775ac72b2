// ── Core error types ──
//
// Layered errors for the batching protocol and the accessors built on
// it, plus `CoreError`, the user-facing collapse of all of them. Each
// layer adds the context it owns (command index, resource id) and
// forwards the cause unchanged.

use serde_json::Value;
use thiserror::Error;

// ── Decode ───────────────────────────────────────────────────────────

/// A command could not turn its response fragment into typed output.
#[derive(Debug, Error)]
#[error("cannot decode response to `{command}`: {cause}")]
pub struct DecodeError {
    /// The rendered command, e.g. `show ip interface`.
    pub command: String,
    /// The raw fragment as received.
    pub fragment: Value,
    #[source]
    pub cause: DecodeCause,
}

impl DecodeError {
    pub fn new(command: impl Into<String>, fragment: Value, cause: DecodeCause) -> Self {
        Self {
            command: command.into(),
            fragment,
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeCause {
    /// The device answered this command with an `errors` list.
    #[error("device reported errors: {}", .0.join("; "))]
    DeviceErrors(Vec<String>),

    /// The fragment's shape does not match the command's output type.
    #[error("unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// The fragment is not a JSON object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A configuration reply with neither `messages` nor `errors`.
    #[error("configuration reply carries neither messages nor errors")]
    NoVerdict,

    /// The command was already decoded by an earlier dispatch.
    #[error("command already holds a decoded response")]
    AlreadyDecoded,
}

// ── Batch ────────────────────────────────────────────────────────────

/// Misuse of a `CommandBatch` while building it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("batch was already dispatched; build a new batch")]
    AlreadyDispatched,
}

/// Failure of `CommandBatch::dispatch`.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The round trip itself failed. Not retried.
    #[error("transport failure: {0}")]
    Transport(#[from] eosctl_api::Error),

    /// The device answered with a different number of fragments than
    /// commands were sent. Nothing was decoded.
    #[error("sent {expected} commands, received {actual} responses")]
    CountMismatch { expected: usize, actual: usize },

    /// Command `index` rejected its fragment; later commands were not decoded.
    #[error("command {index} failed to decode")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("batch was already dispatched")]
    AlreadyDispatched,

    #[error("batch has no commands")]
    Empty,
}

// ── Resource access ──────────────────────────────────────────────────

/// Failure of a resource accessor `get`/`set`.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{resource} '{id}' not found on device")]
    NotFound { resource: &'static str, id: String },

    /// The device answered, but refused to apply the change.
    #[error("device rejected change to {resource} '{id}': {}", .errors.join("; "))]
    RejectedByDevice {
        resource: &'static str,
        id: String,
        errors: Vec<String>,
    },

    #[error("request for {resource} '{id}' failed")]
    Dispatch {
        resource: &'static str,
        id: String,
        #[source]
        source: DispatchError,
    },

    /// Dispatch succeeded but left the command without output.
    #[error("{resource} '{id}': command finished without a decoded response")]
    Undecoded { resource: &'static str, id: String },

    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl AccessError {
    /// The decode failure underneath, if this error wraps one.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Dispatch {
                source: DispatchError::Decode { source, .. },
                ..
            } => Some(source),
            _ => None,
        }
    }
}

// ── Reconcile ────────────────────────────────────────────────────────

/// Failure of one reconciliation run. The phase tells whether the device
/// may have been touched: a `Read` failure guarantees no write happened.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("could not read current state of '{id}'")]
    Read {
        id: String,
        #[source]
        source: AccessError,
    },

    #[error("could not apply desired state to '{id}'")]
    Write {
        id: String,
        #[source]
        source: AccessError,
    },
}

impl ReconcileError {
    pub fn access_error(&self) -> &AccessError {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => source,
        }
    }
}

// ── User-facing collapse ─────────────────────────────────────────────

/// Unified error type for consumers of the core crate.
///
/// Consumers never see HTTP status codes or JSON-RPC codes directly.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Device request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Could not decode device response: {message}")]
    Decode { message: String },

    #[error("Protocol violation: {message}")]
    Protocol { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Change rejected by device: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// JSON-RPC error code, if the device returned one.
        code: Option<i64>,
        /// HTTP status code, if applicable.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Prefix the message with `context`. Connection, credential and
    /// timeout failures concern the device as a whole and stay as they are.
    fn context(self, context: &str) -> Self {
        let prefix = |message: String| format!("{context}: {message}");
        match self {
            Self::Decode { message } => Self::Decode {
                message: prefix(message),
            },
            Self::Protocol { message } => Self::Protocol {
                message: prefix(message),
            },
            Self::Rejected { message } => Self::Rejected {
                message: prefix(message),
            },
            Self::Api {
                message,
                code,
                status,
            } => Self::Api {
                message: prefix(message),
                code,
                status,
            },
            Self::Internal(message) => Self::Internal(prefix(message)),
            other => other,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<eosctl_api::Error> for CoreError {
    fn from(err: eosctl_api::Error) -> Self {
        match err {
            eosctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            eosctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            eosctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            eosctl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            eosctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            eosctl_api::Error::Http { status, body } => CoreError::Api {
                message: body,
                code: None,
                status: Some(status),
            },
            eosctl_api::Error::Rpc { code, message } => CoreError::Api {
                message,
                code: Some(code),
                status: None,
            },
            eosctl_api::Error::MalformedResponse { message } => CoreError::Protocol { message },
            eosctl_api::Error::Deserialization { message, body: _ } => CoreError::Protocol {
                message: format!("unparseable response body: {message}"),
            },
        }
    }
}

impl From<DispatchError> for CoreError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Transport(e) => e.into(),
            DispatchError::CountMismatch { .. } => CoreError::Protocol {
                message: err.to_string(),
            },
            DispatchError::Decode { index, source } => CoreError::Decode {
                message: format!("command {index}: {source}"),
            },
            DispatchError::AlreadyDispatched | DispatchError::Empty => {
                CoreError::Internal(err.to_string())
            }
        }
    }
}

impl From<AccessError> for CoreError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { resource, id } => CoreError::NotFound {
                entity_type: resource.into(),
                identifier: id,
            },
            AccessError::RejectedByDevice { .. } => CoreError::Rejected {
                message: err.to_string(),
            },
            AccessError::Dispatch {
                resource,
                id,
                source,
            } => CoreError::from(source).context(&format!("{resource} '{id}'")),
            AccessError::Undecoded { .. } | AccessError::Batch(_) => {
                CoreError::Internal(err.to_string())
            }
        }
    }
}

impl From<ReconcileError> for CoreError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Read { source, .. } => {
                CoreError::from(source).context("reading current state")
            }
            ReconcileError::Write { source, .. } => {
                CoreError::from(source).context("applying desired state")
            }
        }
    }
}

impl From<BatchError> for CoreError {
    fn from(err: BatchError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
