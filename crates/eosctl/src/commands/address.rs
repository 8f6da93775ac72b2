//! Primary address handlers: unconditional get/set.

use serde::Serialize;

use eosctl_core::{InterfaceAddress, Node, Resource};

use crate::cli::{AddressArgs, AddressCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct AddressView<'a> {
    interface: &'a str,
    address: InterfaceAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
}

pub fn handle(node: &Node, args: AddressArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let view = match args.command {
        AddressCommand::Get { ref interface } => AddressView {
            interface,
            address: node.ip_interfaces().get(interface)?,
            status: None,
        },
        AddressCommand::Set {
            ref interface,
            ref address,
        } => {
            let address: InterfaceAddress = address.parse()?;
            node.ip_interfaces().set(interface, &address)?;
            AddressView {
                interface,
                address,
                status: Some("applied"),
            }
        }
    };

    let out = output::render_single(
        global.format(),
        &view,
        |v| match v.status {
            Some(status) => format!("{}: {} ({status})", v.interface, v.address),
            None => format!("{}: {}", v.interface, v.address),
        },
        |v| v.address.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
