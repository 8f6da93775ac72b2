use serde::{Deserialize, Serialize};

/// Decoded `show version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub model_name: String,
    /// EOS release, e.g. `4.30.1F`.
    pub version: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub system_mac_address: String,
    #[serde(default)]
    pub hardware_revision: String,
    #[serde(default)]
    pub architecture: String,
    /// Seconds since boot.
    #[serde(default)]
    pub uptime: Option<f64>,
    /// Kilobytes.
    #[serde(default)]
    pub mem_total: Option<u64>,
    /// Kilobytes.
    #[serde(default)]
    pub mem_free: Option<u64>,
}
