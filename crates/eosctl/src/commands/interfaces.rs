//! Interface inventory handlers.

use tabled::Tabled;

use eosctl_core::{InterfaceStatus, Node};

use crate::cli::{GlobalOpts, InterfacesArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct InterfaceRow {
    #[tabled(rename = "Interface")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "MTU")]
    mtu: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl InterfaceRow {
    pub(crate) fn new(i: &InterfaceStatus, color: bool) -> Self {
        Self {
            name: i.name.clone(),
            status: i.interface_status.clone(),
            protocol: output::protocol_status(i.line_protocol_status, color),
            address: i
                .primary_address()
                .map(|a| a.to_string())
                .unwrap_or_default(),
            mtu: i.mtu.map(|m| m.to_string()).unwrap_or_default(),
            description: i.description.clone(),
        }
    }
}

fn detail(i: &InterfaceStatus, color: bool) -> String {
    let secondaries = i
        .interface_address
        .first()
        .map(|block| {
            block
                .secondary_ips_ordered_list
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    output::detail_block(&[
        ("Interface", i.name.clone()),
        ("Description", i.description.clone()),
        ("Status", i.interface_status.clone()),
        ("Protocol", output::protocol_status(i.line_protocol_status, color)),
        ("Hardware", i.hardware.clone()),
        ("MAC", i.physical_address.clone().unwrap_or_default()),
        (
            "Address",
            i.primary_address().map(|a| a.to_string()).unwrap_or_default(),
        ),
        ("Secondary", secondaries),
        ("MTU", i.mtu.map(|m| m.to_string()).unwrap_or_default()),
        (
            "Bandwidth",
            i.bandwidth.map(format_bandwidth).unwrap_or_default(),
        ),
        ("Forwarding", i.forwarding_model.clone().unwrap_or_default()),
    ])
}

fn format_bandwidth(bps: u64) -> String {
    match bps {
        b if b >= 1_000_000_000 && b % 1_000_000_000 == 0 => format!("{}G", b / 1_000_000_000),
        b if b >= 1_000_000 && b % 1_000_000 == 0 => format!("{}M", b / 1_000_000),
        b => format!("{b}bps"),
    }
}

/// Render a full inventory in the chosen format.
pub(crate) fn render_inventory(
    interfaces: &[InterfaceStatus],
    global: &GlobalOpts,
) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    output::render_list(
        global.format(),
        interfaces,
        |i| InterfaceRow::new(i, color),
        |i| i.name.clone(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(node: &Node, args: InterfacesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match args.name {
        None => {
            let all = node.interfaces().get_all()?;
            let list: Vec<InterfaceStatus> = all.interfaces.into_values().collect();
            render_inventory(&list, global)?
        }
        Some(name) => {
            let iface = node.interfaces().get(&name)?;
            let color = output::should_color(&global.color);
            output::render_single(
                global.format(),
                &iface,
                |i| detail(i, color),
                |i| i.name.clone(),
            )?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
