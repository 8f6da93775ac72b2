// Request framing for `runCmds`
//
// Flattens typed requests into the single `cmds` array the device
// executes, and folds the per-line results back into one fragment per
// request. Framing lines (`enable`, `configure`, `end`) never surface
// as fragments.

use secrecy::SecretString;
use serde_json::{Value, json};

use crate::eapi::models::CmdEntry;
use crate::error::Error;
use crate::request::{Mode, Request};

/// Fragment text for requests the device never ran because an earlier
/// line in the same call failed.
pub const NOT_EXECUTED: &str = "not executed: an earlier command in the batch failed";

/// Where one request's lines sit inside the flattened `cmds` array.
#[derive(Debug, Clone, Copy)]
struct Span {
    mode: Mode,
    /// First index owned by the request, framing included.
    first: usize,
    /// Last index owned by the request, framing included.
    last: usize,
    /// Index of the request's first own line.
    body: usize,
    /// Number of the request's own lines.
    body_len: usize,
}

/// A flattened `runCmds` call and the map back to its requests.
#[derive(Debug)]
pub struct Frame {
    cmds: Vec<CmdEntry>,
    spans: Vec<Span>,
}

impl Frame {
    pub fn build(requests: &[Request], enable_password: Option<&SecretString>) -> Self {
        let mut cmds = Vec::with_capacity(requests.len() + 1);
        cmds.push(match enable_password {
            Some(secret) => CmdEntry::WithInput {
                cmd: "enable".into(),
                input: secret.clone(),
            },
            None => CmdEntry::Line("enable".into()),
        });

        let mut spans = Vec::with_capacity(requests.len());
        for request in requests {
            let first = cmds.len();
            if request.mode() == Mode::Config {
                cmds.push(CmdEntry::Line("configure".into()));
            }
            let body = cmds.len();
            cmds.extend(request.lines().iter().cloned().map(CmdEntry::Line));
            if request.mode() == Mode::Config {
                cmds.push(CmdEntry::Line("end".into()));
            }
            spans.push(Span {
                mode: request.mode(),
                first,
                last: cmds.len() - 1,
                body,
                body_len: request.lines().len(),
            });
        }

        Self { cmds, spans }
    }

    pub fn cmds(&self) -> &[CmdEntry] {
        &self.cmds
    }

    /// Fold a complete `result` array back into per-request fragments.
    pub fn split(&self, results: &[Value]) -> Result<Vec<Value>, Error> {
        if results.len() != self.cmds.len() {
            return Err(Error::MalformedResponse {
                message: format!(
                    "sent {} commands, received {} results",
                    self.cmds.len(),
                    results.len()
                ),
            });
        }
        self.fold(results)
    }

    /// Fold the `data` of a CLI command failure back into per-request
    /// fragments. The device stops at the failing line, so `data` may be
    /// shorter than the command list.
    pub fn split_partial(&self, data: &[Value]) -> Result<Vec<Value>, Error> {
        if data.len() > self.cmds.len() {
            return Err(Error::MalformedResponse {
                message: format!(
                    "sent {} commands, error data holds {} results",
                    self.cmds.len(),
                    data.len()
                ),
            });
        }
        self.fold(data)
    }

    fn fold(&self, results: &[Value]) -> Result<Vec<Value>, Error> {
        if let Some(errors) = results.first().and_then(line_errors) {
            return Err(Error::Authentication {
                message: format!("enable failed: {}", errors.join("; ")),
            });
        }
        Ok(self
            .spans
            .iter()
            .map(|span| fragment(span, results))
            .collect())
    }
}

fn fragment(span: &Span, results: &[Value]) -> Value {
    let Some(ran) = results.get(span.first..results.len().min(span.last + 1)) else {
        return not_executed();
    };

    let errors: Vec<String> = ran.iter().filter_map(line_errors).flatten().collect();
    if !errors.is_empty() {
        return json!({ "errors": errors });
    }
    if span.last >= results.len() {
        return not_executed();
    }

    match span.mode {
        Mode::Exec => results.get(span.body).cloned().unwrap_or(Value::Null),
        Mode::Config => {
            let messages: Vec<Value> = results
                .iter()
                .skip(span.body)
                .take(span.body_len)
                .filter_map(|r| r.get("messages").and_then(Value::as_array))
                .flatten()
                .cloned()
                .collect();
            json!({ "messages": messages })
        }
    }
}

fn not_executed() -> Value {
    json!({ "errors": [NOT_EXECUTED] })
}

/// The `errors` list of one line's result, if it carries a non-empty one.
fn line_errors(result: &Value) -> Option<Vec<String>> {
    let errors: Vec<String> = result
        .get("errors")?
        .as_array()?
        .iter()
        .map(|e| e.as_str().map_or_else(|| e.to_string(), str::to_owned))
        .collect();
    (!errors.is_empty()).then_some(errors)
}
