// eosctl-core: Typed command batching, resource accessors and reconciliation over eosctl-api.

pub mod batch;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod node;
pub mod reconcile;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{BatchState, CommandBatch};
pub use command::{
    Ack, Command, ConfigureInterfaceAddress, Raw, ShowInterfaces, ShowIpInterface, ShowVersion,
};
pub use config::{DeviceConfig, TlsVerification};
pub use error::{
    AccessError, BatchError, CoreError, DecodeCause, DecodeError, DispatchError, ReconcileError,
};
pub use node::Node;
pub use reconcile::{Outcome, Reconciler, reconcile};
pub use resource::{InterfaceResource, IpInterfaceResource, Resource};

pub use model::{
    AddressBlock, InterfaceAddress, InterfaceStatus, Interfaces, IpInterfaceStatus, IpInterfaces,
    ProtocolStatus, Snapshot, Version,
};

// Transport seam, re-exported so consumers need not depend on eosctl-api.
pub use eosctl_api::{Mode, Request, Scheme, Transport};
