//! Raw command passthrough: one batch, one fragment per request.

use serde::Serialize;
use serde_json::Value;

use eosctl_core::{Node, Request};

use crate::cli::{GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RunResult {
    command: String,
    output: Value,
}

impl RunResult {
    fn errors(&self) -> Option<Vec<String>> {
        let errors: Vec<String> = self
            .output
            .get("errors")?
            .as_array()?
            .iter()
            .map(|e| e.as_str().map_or_else(|| e.to_string(), str::to_owned))
            .collect();
        (!errors.is_empty()).then_some(errors)
    }
}

pub fn handle(node: &Node, args: RunArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let requests: Vec<Request> = if args.config {
        vec![Request::config(args.commands)]
    } else {
        args.commands.into_iter().map(Request::exec).collect()
    };

    let fragments = node.run(requests.clone())?;
    let results: Vec<RunResult> = requests
        .iter()
        .zip(fragments)
        .map(|(request, output)| RunResult {
            command: request.to_string(),
            output,
        })
        .collect();

    let out = output::render_single(
        global.format(),
        results.as_slice(),
        |rs| {
            rs.iter()
                .map(|r| {
                    let body = serde_json::to_string_pretty(&r.output).unwrap_or_default();
                    format!("── {} ──\n{body}", r.command)
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        },
        |rs| {
            rs.iter()
                .map(|r| r.output.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);

    let failures: Vec<String> = results
        .iter()
        .filter_map(|r| r.errors().map(|e| format!("{}: {}", r.command, e.join("; "))))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Rejected {
            message: failures.join("\n"),
        })
    }
}
