// ── Domain model ──
//
// Typed device state decoded from command output. These types never
// touch the transport; commands deserialize into them.

pub mod address;
pub mod interface;
pub mod version;

pub use address::InterfaceAddress;
pub use interface::{
    AddressBlock, InterfaceStatus, Interfaces, IpInterfaceStatus, IpInterfaces, ProtocolStatus,
};
pub use version::Version;

use serde::Serialize;

/// Device snapshot taken in one round trip: `show version` + `show interfaces`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub version: Version,
    pub interfaces: Interfaces,
}
