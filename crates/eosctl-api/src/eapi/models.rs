// JSON-RPC envelope types for `runCmds`
//
// Request and response shapes for the EOS command API. Results are kept
// as raw `serde_json::Value`: typing them is the job of the commands in
// `eosctl-core`, not of the transport.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// JSON-RPC error code EOS uses when one of the CLI commands failed.
///
/// The error's `data` array then holds one result per executed command,
/// the last of which carries an `errors` list.
pub const CLI_COMMAND_ERROR: i64 = 1002;

// ── Request ──────────────────────────────────────────────────────────

/// `{"jsonrpc": "2.0", "method": "runCmds", "params": {...}, "id": "..."}`
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: RunCmdsParams<'a>,
    pub id: String,
}

impl<'a> RpcRequest<'a> {
    pub fn run_cmds(cmds: &'a [CmdEntry], id: String) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "runCmds",
            params: RunCmdsParams {
                version: 1,
                cmds,
                format: "json",
            },
            id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunCmdsParams<'a> {
    pub version: u8,
    pub cmds: &'a [CmdEntry],
    pub format: &'static str,
}

/// One entry of the `cmds` array: a bare CLI line, or a line plus the
/// input it prompts for (the enable password).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CmdEntry {
    Line(String),
    WithInput {
        cmd: String,
        #[serde(serialize_with = "expose")]
        input: SecretString,
    },
}

impl CmdEntry {
    pub fn line(&self) -> &str {
        match self {
            Self::Line(cmd) | Self::WithInput { cmd, .. } => cmd,
        }
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

// ── Response ─────────────────────────────────────────────────────────

/// Response envelope. Exactly one of `result` / `error` is present.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object. `data` is only populated for CLI command failures.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_cmds_body_shape() {
        let cmds = vec![
            CmdEntry::WithInput {
                cmd: "enable".into(),
                input: SecretString::from("s3cret".to_string()),
            },
            CmdEntry::Line("show version".into()),
        ];
        let body = serde_json::to_value(RpcRequest::run_cmds(&cmds, "req-1".into()))
            .expect("serializable");

        insta::assert_json_snapshot!(body, @r#"
        {
          "id": "req-1",
          "jsonrpc": "2.0",
          "method": "runCmds",
          "params": {
            "cmds": [
              {
                "cmd": "enable",
                "input": "s3cret"
              },
              "show version"
            ],
            "format": "json",
            "version": 1
          }
        }
        "#);
    }

    #[test]
    fn secret_input_is_redacted_in_debug() {
        let entry = CmdEntry::WithInput {
            cmd: "enable".into(),
            input: SecretString::from("s3cret".to_string()),
        };
        assert!(!format!("{entry:?}").contains("s3cret"));
        assert_eq!(entry.line(), "enable");
    }

    #[test]
    fn error_envelope_without_data_parses() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"x","error":{"code":-32602,"message":"invalid params"}}"#,
        )
        .expect("valid envelope");
        let err = resp.error.expect("error present");
        assert_eq!(err.code, -32602);
        assert!(err.data.is_empty());
        assert!(resp.result.is_none());
    }
}
