use tracing::{debug, warn};

use eosctl_api::Transport;

use super::{Resource, dispatch_one};
use crate::command::{Ack, ConfigureInterfaceAddress, ShowIpInterface};
use crate::error::AccessError;
use crate::model::InterfaceAddress;

/// Primary IPv4 address of a routed interface.
pub struct IpInterfaceResource<'t, T: ?Sized> {
    transport: &'t T,
}

impl<'t, T: Transport + ?Sized> IpInterfaceResource<'t, T> {
    pub fn new(transport: &'t T) -> Self {
        Self { transport }
    }
}

impl<T: Transport + ?Sized> Resource for IpInterfaceResource<'_, T> {
    type Id = str;
    type State = InterfaceAddress;

    const KIND: &'static str = "ip interface";

    fn get(&self, name: &str) -> Result<InterfaceAddress, AccessError> {
        debug!(interface = name, "reading primary address");
        let mut show = ShowIpInterface::new();
        dispatch_one(self.transport, &mut show, Self::KIND, name)?;

        let mut ifaces = show.into_output().ok_or_else(|| AccessError::Undecoded {
            resource: Self::KIND,
            id: name.to_owned(),
        })?;
        ifaces
            .interfaces
            .remove(name)
            .map(|status| status.interface_address.primary_ip)
            .ok_or_else(|| AccessError::NotFound {
                resource: Self::KIND,
                id: name.to_owned(),
            })
    }

    fn set(&self, name: &str, desired: &InterfaceAddress) -> Result<(), AccessError> {
        debug!(interface = name, address = %desired, "configuring primary address");
        let mut configure = ConfigureInterfaceAddress::new(name, *desired);
        dispatch_one(self.transport, &mut configure, Self::KIND, name)?;

        match configure.into_ack() {
            Some(Ack::Applied { messages }) => {
                for message in &messages {
                    debug!(interface = name, %message, "device message");
                }
                Ok(())
            }
            Some(Ack::Rejected { errors }) => {
                warn!(interface = name, errors = ?errors, "device rejected address change");
                Err(AccessError::RejectedByDevice {
                    resource: Self::KIND,
                    id: name.to_owned(),
                    errors,
                })
            }
            None => Err(AccessError::Undecoded {
                resource: Self::KIND,
                id: name.to_owned(),
            }),
        }
    }
}
