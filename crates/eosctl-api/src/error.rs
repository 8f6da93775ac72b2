use thiserror::Error;

/// Top-level error type for the `eosctl-api` crate.
///
/// Every failure of a single `runCmds` round trip lands here:
/// authentication, HTTP transport, the JSON-RPC envelope, and framing.
/// A device that *rejects* a CLI command is not an error at this layer;
/// the rejection travels back inside the response fragment.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device refused the credentials (HTTP 401/403) or `enable` failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that is not an auth failure.
    #[error("HTTP {status} from command API: {body}")]
    Http { status: u16, body: String },

    // ── JSON-RPC ────────────────────────────────────────────────────
    /// Error object returned by the command API (other than a CLI command failure).
    #[error("Command API error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response violated the `runCmds` contract (wrong result count, id mismatch).
    #[error("Malformed command API response: {message}")]
    MalformedResponse { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
