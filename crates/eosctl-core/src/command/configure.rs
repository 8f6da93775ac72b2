// Configuration commands.
//
// A config command's output is an `Ack`, never a bare success flag: the
// round trip succeeding and the device applying the change are separate
// facts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use eosctl_api::Request;

use super::{Command, ensure_undecoded, json_kind};
use crate::error::{DecodeCause, DecodeError};
use crate::model::InterfaceAddress;

/// The device's verdict on a configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Ack {
    /// Applied. `messages` holds any warnings the CLI printed.
    Applied { messages: Vec<String> },
    /// Refused, with the device's error lines.
    Rejected { errors: Vec<String> },
}

impl Ack {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Deserialize)]
struct ConfigReply {
    messages: Option<Vec<String>>,
    #[serde(default)]
    errors: Vec<String>,
}

impl ConfigReply {
    /// Errors win over messages. Without either there is no verdict.
    fn into_ack(self) -> Result<Ack, DecodeCause> {
        match (self.errors.is_empty(), self.messages) {
            (false, _) => Ok(Ack::Rejected {
                errors: self.errors,
            }),
            (true, Some(messages)) => Ok(Ack::Applied { messages }),
            (true, None) => Err(DecodeCause::NoVerdict),
        }
    }
}

/// `interface <name>` / `ip address <a.b.c.d/len>`
///
/// Sets the primary IPv4 address, replacing any existing one.
#[derive(Debug)]
pub struct ConfigureInterfaceAddress {
    interface: String,
    address: InterfaceAddress,
    ack: Option<Ack>,
}

impl ConfigureInterfaceAddress {
    pub fn new(interface: impl Into<String>, address: InterfaceAddress) -> Self {
        Self {
            interface: interface.into(),
            address,
            ack: None,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn address(&self) -> InterfaceAddress {
        self.address
    }

    pub fn ack(&self) -> Option<&Ack> {
        self.ack.as_ref()
    }

    pub fn into_ack(self) -> Option<Ack> {
        self.ack
    }
}

impl Command for ConfigureInterfaceAddress {
    fn request(&self) -> Request {
        Request::config([
            format!("interface {}", self.interface),
            format!("ip address {}", self.address),
        ])
    }

    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError> {
        let fragment = ensure_undecoded(&self.ack, &*self, fragment)?;
        if !fragment.is_object() {
            let kind = json_kind(&fragment);
            return Err(DecodeError::new(
                self.describe(),
                fragment,
                DecodeCause::NotAnObject(kind),
            ));
        }
        let ack = ConfigReply::deserialize(&fragment)
            .map_err(DecodeCause::from)
            .and_then(ConfigReply::into_ack)
            .map_err(|cause| DecodeError::new(self.describe(), fragment.clone(), cause))?;
        self.ack = Some(ack);
        Ok(())
    }
}
