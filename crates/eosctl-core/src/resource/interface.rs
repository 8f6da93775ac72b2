use eosctl_api::Transport;

use super::dispatch_one;
use crate::command::ShowInterfaces;
use crate::error::AccessError;
use crate::model::{InterfaceStatus, Interfaces};

const KIND: &str = "interface";

/// Read-only interface inventory (`show interfaces`).
pub struct InterfaceResource<'t, T: ?Sized> {
    transport: &'t T,
}

impl<'t, T: Transport + ?Sized> InterfaceResource<'t, T> {
    pub fn new(transport: &'t T) -> Self {
        Self { transport }
    }

    pub fn get_all(&self) -> Result<Interfaces, AccessError> {
        let mut show = ShowInterfaces::new();
        dispatch_one(self.transport, &mut show, KIND, "*")?;
        show.into_output().ok_or_else(|| AccessError::Undecoded {
            resource: KIND,
            id: "*".into(),
        })
    }

    pub fn get(&self, name: &str) -> Result<InterfaceStatus, AccessError> {
        let mut all = self.get_all().map_err(|err| match err {
            AccessError::Dispatch { resource, source, .. } => AccessError::Dispatch {
                resource,
                id: name.to_owned(),
                source,
            },
            other => other,
        })?;
        all.interfaces
            .remove(name)
            .ok_or_else(|| AccessError::NotFound {
                resource: KIND,
                id: name.to_owned(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::model::ProtocolStatus;
    use eosctl_api::Request;

    struct Fixed(Value);

    impl Transport for Fixed {
        fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, eosctl_api::Error> {
            assert_eq!(requests, [Request::exec("show interfaces")]);
            Ok(vec![self.0.clone()])
        }
    }

    fn inventory() -> Fixed {
        Fixed(json!({
            "interfaces": {
                "Ethernet1": {
                    "name": "Ethernet1",
                    "interfaceStatus": "notconnect",
                    "lineProtocolStatus": "down",
                    "hardware": "ethernet",
                    "forwardingModel": "bridged"
                },
                "Management1": {
                    "name": "Management1",
                    "interfaceStatus": "connected",
                    "lineProtocolStatus": "up",
                    "hardware": "ethernet",
                    "forwardingModel": "routed",
                    "interfaceAddress": [{
                        "primaryIp": { "address": "10.1.2.90", "maskLen": 24 }
                    }]
                }
            }
        }))
    }

    #[test]
    fn get_all_lists_interfaces_by_name() {
        let transport = inventory();
        let all = InterfaceResource::new(&transport).get_all().unwrap();
        let names: Vec<&str> = all.interfaces.keys().map(String::as_str).collect();
        assert_eq!(names, ["Ethernet1", "Management1"]);
    }

    #[test]
    fn get_one_interface() {
        let transport = inventory();
        let eth = InterfaceResource::new(&transport).get("Ethernet1").unwrap();
        assert_eq!(eth.line_protocol_status, ProtocolStatus::Down);
        assert!(eth.primary_address().is_none());
    }

    #[test]
    fn get_missing_interface_is_not_found() {
        let transport = inventory();
        let err = InterfaceResource::new(&transport)
            .get("Port-Channel1")
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound { resource: "interface", .. }));
    }
}
