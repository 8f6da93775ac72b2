//! Device snapshot: `show version` + `show interfaces` in one round trip.

use eosctl_core::{InterfaceStatus, Node, Snapshot, Version};

use crate::cli::GlobalOpts;
use crate::commands::interfaces::InterfaceRow;
use crate::error::CliError;
use crate::output;

fn format_uptime(secs: f64) -> String {
    // Whole seconds are enough for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    let total = secs.max(0.0) as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let minutes = rem / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

fn version_block(v: &Version) -> String {
    output::detail_block(&[
        ("Model", v.model_name.clone()),
        ("EOS", v.version.clone()),
        ("Serial", v.serial_number.clone()),
        ("System MAC", v.system_mac_address.clone()),
        ("Hardware rev", v.hardware_revision.clone()),
        ("Uptime", v.uptime.map(format_uptime).unwrap_or_default()),
        (
            "Memory",
            match (v.mem_free, v.mem_total) {
                (Some(free), Some(total)) => format!("{free} kB free of {total} kB"),
                _ => String::new(),
            },
        ),
    ])
}

fn detail(snap: &Snapshot, color: bool) -> String {
    let rows: Vec<InterfaceRow> = snap
        .interfaces
        .interfaces
        .values()
        .map(|i: &InterfaceStatus| InterfaceRow::new(i, color))
        .collect();
    format!(
        "{}\n\n{}",
        version_block(&snap.version),
        output::render_table(&rows)
    )
}

pub fn handle(node: &Node, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = node.snapshot()?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        global.format(),
        &snap,
        |s| detail(s, color),
        |s| s.version.version.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
