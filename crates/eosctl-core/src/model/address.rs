// ── Interface address ──
//
// The value object the reconciler compares. EOS reports an address as
// `{ "address": "10.1.2.90", "maskLen": 24 }`; everywhere else (CLI
// arguments, config lines, output) it is the canonical `a.b.c.d/len`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An IPv4 interface address: host address plus prefix length.
///
/// Equality is structural. Because parsing goes through `Ipv4Addr`, two
/// values are equal exactly when their canonical strings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireAddress", into = "String")]
pub struct InterfaceAddress {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl InterfaceAddress {
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, CoreError> {
        if prefix_len > 32 {
            return Err(CoreError::ValidationFailed {
                message: format!("IPv4 prefix length must be <= 32, got {prefix_len}"),
            });
        }
        Ok(Self {
            address,
            prefix_len,
        })
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for InterfaceAddress {
    type Err = CoreError;

    /// Parse `a.b.c.d/len`. Zero-padded octets (`010.1.2.90`) and
    /// prefixes (`/024`, `/+24`) are rejected rather than normalized.
    fn from_str(cidr: &str) -> Result<Self, Self::Err> {
        let (host, prefix) = cidr
            .trim()
            .split_once('/')
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!("invalid ipv4 host/prefix value '{cidr}'"),
            })?;
        let address = host
            .parse::<Ipv4Addr>()
            .map_err(|_| CoreError::ValidationFailed {
                message: format!("invalid IPv4 host address '{host}'"),
            })?;
        let prefix_len = parse_prefix_len(prefix).ok_or_else(|| CoreError::ValidationFailed {
            message: format!("invalid IPv4 prefix length '{prefix}'"),
        })?;
        Self::new(address, prefix_len)
    }
}

/// One or two ASCII digits, no leading zero unless the prefix is `0`.
fn parse_prefix_len(prefix: &str) -> Option<u8> {
    let canonical = matches!(prefix.as_bytes(), [b'0'..=b'9'] | [b'1'..=b'9', b'0'..=b'9']);
    if canonical { prefix.parse().ok() } else { None }
}

impl From<InterfaceAddress> for String {
    fn from(addr: InterfaceAddress) -> Self {
        addr.to_string()
    }
}

/// Address as it appears inside EOS JSON output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAddress {
    address: Ipv4Addr,
    mask_len: u8,
}

impl TryFrom<WireAddress> for InterfaceAddress {
    type Error = CoreError;

    fn try_from(wire: WireAddress) -> Result<Self, Self::Error> {
        Self::new(wire.address, wire.mask_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_input() {
        let addr: InterfaceAddress = "10.1.2.90/24".parse().expect("valid CIDR");
        assert_eq!(addr.address(), Ipv4Addr::new(10, 1, 2, 90));
        assert_eq!(addr.prefix_len(), 24);
        assert_eq!(addr.to_string(), "10.1.2.90/24");
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!("10.1.2.90/40".parse::<InterfaceAddress>().is_err());
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!("10.1.2.90".parse::<InterfaceAddress>().is_err());
    }

    #[test]
    fn parse_rejects_zero_padded_octets() {
        assert!("010.1.2.90/24".parse::<InterfaceAddress>().is_err());
    }

    #[test]
    fn parse_rejects_zero_padded_prefix() {
        for input in [
            "10.1.2.90/024",
            "10.1.2.90/+24",
            "10.1.2.90/00",
            "10.1.2.90/",
            "10.1.2.90/ 24",
        ] {
            assert!(input.parse::<InterfaceAddress>().is_err(), "{input}");
        }
        let any: InterfaceAddress = "0.0.0.0/0".parse().expect("valid");
        assert_eq!(any.prefix_len(), 0);
    }

    #[test]
    fn equality_matches_canonical_string() {
        let a: InterfaceAddress = "10.1.2.90/24".parse().expect("valid");
        let b: InterfaceAddress = " 10.1.2.90/24 ".parse().expect("valid");
        let c: InterfaceAddress = "10.1.2.90/25".parse().expect("valid");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn deserializes_from_eos_shape_and_serializes_canonically() {
        let addr: InterfaceAddress =
            serde_json::from_value(serde_json::json!({ "address": "10.1.2.5", "maskLen": 24 }))
                .expect("valid wire address");
        assert_eq!(addr.to_string(), "10.1.2.5/24");
        assert_eq!(
            serde_json::to_value(addr).expect("serializable"),
            serde_json::json!("10.1.2.5/24")
        );
    }
}
