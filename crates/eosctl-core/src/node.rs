// ── Node ──
//
// Entry point for consumers: owns one transport and hands out accessors
// borrowing it. Generic over the transport so tests can drive the full
// stack without a device.

use serde_json::Value;
use tracing::debug;

use eosctl_api::{EapiClient, Request, Transport};

use crate::batch::CommandBatch;
use crate::command::{Raw, ShowInterfaces, ShowVersion};
use crate::config::DeviceConfig;
use crate::error::CoreError;
use crate::model::Snapshot;
use crate::resource::{InterfaceResource, IpInterfaceResource};

/// One EOS device reachable through a transport.
pub struct Node<T = EapiClient> {
    transport: T,
}

impl Node<EapiClient> {
    /// Build the eAPI client for `config`. No request is sent.
    pub fn connect(config: &DeviceConfig) -> Result<Self, CoreError> {
        let endpoint = config.endpoint()?;
        debug!(%endpoint, "building command API client");
        let client = EapiClient::new(endpoint, config.credentials(), &config.transport_config())?;
        Ok(Self::new(client))
    }
}

impl<T: Transport> Node<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn ip_interfaces(&self) -> IpInterfaceResource<'_, T> {
        IpInterfaceResource::new(&self.transport)
    }

    pub fn interfaces(&self) -> InterfaceResource<'_, T> {
        InterfaceResource::new(&self.transport)
    }

    /// `show version` and `show interfaces` in a single round trip.
    pub fn snapshot(&self) -> Result<Snapshot, CoreError> {
        let mut version = ShowVersion::new();
        let mut interfaces = ShowInterfaces::new();

        let mut batch = CommandBatch::new();
        batch.add(&mut version)?;
        batch.add(&mut interfaces)?;
        batch.dispatch(&self.transport)?;
        drop(batch);

        match (version.into_output(), interfaces.into_output()) {
            (Some(version), Some(interfaces)) => Ok(Snapshot {
                version,
                interfaces,
            }),
            _ => Err(CoreError::Internal(
                "snapshot batch finished without decoded output".into(),
            )),
        }
    }

    /// Run arbitrary requests in one batch and return their raw fragments.
    pub fn run(&self, requests: Vec<Request>) -> Result<Vec<Value>, CoreError> {
        let mut commands: Vec<Raw> = requests.into_iter().map(Raw::new).collect();

        let mut batch = CommandBatch::new();
        for command in &mut commands {
            batch.add(command)?;
        }
        batch.dispatch(&self.transport)?;
        drop(batch);

        commands
            .into_iter()
            .map(|c| {
                c.into_output()
                    .ok_or_else(|| CoreError::Internal("raw command left undecoded".into()))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;

    struct CountingFake {
        calls: Cell<usize>,
    }

    impl Transport for CountingFake {
        fn execute(&self, requests: &[Request]) -> Result<Vec<Value>, eosctl_api::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(requests
                .iter()
                .map(|r| match r.lines()[0].as_str() {
                    "show version" => json!({
                        "modelName": "DCS-7050TX-64",
                        "version": "4.28.3M",
                        "serialNumber": "JPE123"
                    }),
                    "show interfaces" => json!({ "interfaces": {} }),
                    other => json!({ "echo": other }),
                })
                .collect())
        }
    }

    fn node() -> Node<CountingFake> {
        Node::new(CountingFake {
            calls: Cell::new(0),
        })
    }

    #[test]
    fn snapshot_is_one_round_trip() {
        let node = node();
        let snapshot = node.snapshot().unwrap();
        assert_eq!(snapshot.version.model_name, "DCS-7050TX-64");
        assert!(snapshot.interfaces.interfaces.is_empty());
        assert_eq!(node.transport().calls.get(), 1);
    }

    #[test]
    fn run_returns_fragments_in_order() {
        let node = node();
        let out = node
            .run(vec![Request::exec("show clock"), Request::exec("show hostname")])
            .unwrap();
        assert_eq!(
            out,
            vec![json!({ "echo": "show clock" }), json!({ "echo": "show hostname" })]
        );
    }

    #[test]
    fn run_without_requests_is_rejected() {
        let err = node().run(Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }
}
