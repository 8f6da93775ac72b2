// ── Resource accessors ──
//
// An accessor exposes one kind of device state as get/set over the
// command batch. Each call is its own single-command batch and its own
// round trip; nothing is cached.

pub mod interface;
pub mod ip_interface;

use std::fmt;

use crate::error::AccessError;

pub use interface::InterfaceResource;
pub use ip_interface::IpInterfaceResource;

/// Readable and writable device state, addressed by `Id`.
///
/// This is the seam the reconciler works against.
pub trait Resource {
    type Id: ?Sized + fmt::Display;
    type State: Clone + PartialEq + fmt::Display + fmt::Debug;

    /// Human-readable resource kind, used in errors and logs.
    const KIND: &'static str;

    /// Fetch the current state of `id`.
    fn get(&self, id: &Self::Id) -> Result<Self::State, AccessError>;

    /// Apply `desired` to `id`. `Ok` only when the device acknowledged
    /// the change.
    fn set(&self, id: &Self::Id, desired: &Self::State) -> Result<(), AccessError>;
}

/// Dispatch `command` alone, attaching resource context to any failure.
pub(crate) fn dispatch_one<T>(
    transport: &T,
    command: &mut dyn crate::command::Command,
    resource: &'static str,
    id: &str,
) -> Result<(), AccessError>
where
    T: eosctl_api::Transport + ?Sized,
{
    let mut batch = crate::batch::CommandBatch::new();
    batch.add(command)?;
    batch
        .dispatch(transport)
        .map_err(|source| AccessError::Dispatch {
            resource,
            id: id.to_owned(),
            source,
        })
}
