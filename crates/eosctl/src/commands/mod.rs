//! Command dispatch: bridges CLI args -> core accessors -> output formatting.

pub mod address;
pub mod config_cmd;
pub mod interfaces;
pub mod reconcile;
pub mod run;
pub mod snapshot;

use eosctl_core::Node;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to its handler.
pub fn dispatch(cmd: Command, node: &Node, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Snapshot => snapshot::handle(node, global),
        Command::Interfaces(args) => interfaces::handle(node, args, global),
        Command::Address(args) => address::handle(node, args, global),
        Command::Reconcile(args) => reconcile::handle(node, args, global),
        Command::Run(args) => run::handle(node, args, global),
        // Config and Completions are handled before a device is resolved
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command routed to device dispatch".into(),
        )),
    }
}
