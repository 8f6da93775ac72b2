//! Idempotent address reconciliation.
//!
//! Prints the interface inventory (unless `--no-snapshot`), then sets the
//! primary address only if the device differs.

use serde::Serialize;

use eosctl_core::{InterfaceAddress, InterfaceStatus, Node, Outcome, Reconciler};

use crate::cli::{GlobalOpts, OutputFormat, ReconcileArgs};
use crate::commands::interfaces;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ReconcileReport {
    interface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    interfaces: Option<Vec<InterfaceStatus>>,
    result: Outcome<InterfaceAddress>,
}

fn summary(report: &ReconcileReport, color: bool) -> String {
    let text = format!("{}: {}", report.interface, report.result);
    match report.result {
        Outcome::Changed { .. } => output::changed(&text, color),
        Outcome::AlreadySatisfied { .. } | Outcome::WouldChange { .. } => {
            output::muted(&text, color)
        }
    }
}

pub fn handle(node: &Node, args: ReconcileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let desired: InterfaceAddress = args.address.parse()?;

    let inventory = if args.no_snapshot {
        None
    } else {
        let all = node.interfaces().get_all()?;
        Some(all.interfaces.into_values().collect::<Vec<_>>())
    };

    let resource = node.ip_interfaces();
    let result = Reconciler::new(&resource)
        .dry_run(args.dry_run)
        .run(args.interface.as_str(), &desired)?;

    let report = ReconcileReport {
        interface: args.interface,
        interfaces: inventory,
        result,
    };

    let color = output::should_color(&global.color);
    let out = match global.format() {
        OutputFormat::Table => {
            let mut out = String::new();
            if let Some(ref list) = report.interfaces {
                out.push_str(&interfaces::render_inventory(list, global)?);
                out.push_str("\n\n");
            }
            out.push_str(&summary(&report, color));
            out
        }
        format => output::render_single(
            format,
            &report,
            |r| summary(r, color),
            |r| r.result.to_string(),
        )?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
