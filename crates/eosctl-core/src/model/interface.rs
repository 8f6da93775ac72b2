// ── Interface models ──
//
// Typed views of `show interfaces` and `show ip interface`. EOS emits far
// more fields than these; unknown fields are ignored and missing optional
// ones default, because presence varies across platforms and releases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::InterfaceAddress;

/// Line protocol state as reported by EOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProtocolStatus {
    Up,
    Down,
    Testing,
    Dormant,
    NotPresent,
    LowerLayerDown,
    #[serde(other)]
    Unknown,
}

/// Address block attached to an interface.
///
/// `show ip interface` returns one of these per interface; `show interfaces`
/// returns a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBlock {
    pub primary_ip: InterfaceAddress,
    #[serde(default)]
    pub secondary_ips_ordered_list: Vec<InterfaceAddress>,
    #[serde(default)]
    pub dhcp: bool,
}

// ── show interfaces ──────────────────────────────────────────────────

/// Decoded `show interfaces`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interfaces {
    pub interfaces: BTreeMap<String, InterfaceStatus>,
}

/// One entry of `show interfaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceStatus {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `connected`, `notconnect`, `disabled`, `errdisabled`, ...
    pub interface_status: String,
    pub line_protocol_status: ProtocolStatus,
    #[serde(default)]
    pub hardware: String,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub mtu: Option<u32>,
    /// Bits per second.
    #[serde(default)]
    pub bandwidth: Option<u64>,
    /// `routed`, `bridged`, `dataLink`, ...
    #[serde(default)]
    pub forwarding_model: Option<String>,
    #[serde(default)]
    pub interface_address: Vec<AddressBlock>,
}

impl InterfaceStatus {
    /// Primary address, if the interface has an address block.
    pub fn primary_address(&self) -> Option<InterfaceAddress> {
        self.interface_address.first().map(|block| block.primary_ip)
    }
}

// ── show ip interface ────────────────────────────────────────────────

/// Decoded `show ip interface`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInterfaces {
    pub interfaces: BTreeMap<String, IpInterfaceStatus>,
}

/// One entry of `show ip interface`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpInterfaceStatus {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub interface_status: String,
    pub line_protocol_status: ProtocolStatus,
    #[serde(default)]
    pub mtu: Option<u32>,
    pub interface_address: AddressBlock,
}
