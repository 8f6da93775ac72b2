// ── Command API ──
//
// Every unit of remote work is a type implementing `Command`: it renders
// the request it stands for and decodes its own response fragment. The
// batch only ever sees `&mut dyn Command`, so new commands need no
// changes to the batching code.

pub mod configure;
pub mod raw;
pub mod show;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use eosctl_api::Request;

use crate::error::{DecodeCause, DecodeError};

pub use configure::{Ack, ConfigureInterfaceAddress};
pub use raw::Raw;
pub use show::{ShowInterfaces, ShowIpInterface, ShowVersion};

/// A typed, self-rendering, self-decoding unit of remote work.
///
/// A command starts out undecoded; its output accessor returns `None`
/// until a batch containing it has been dispatched successfully.
pub trait Command: fmt::Debug {
    /// The request this command stands for. Pure; callable at any time.
    fn request(&self) -> Request;

    /// Fill the command's output from its response fragment.
    ///
    /// Called once per command by `CommandBatch::dispatch`, in submission
    /// order.
    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError>;

    /// Identity used in error context.
    fn describe(&self) -> String {
        self.request().to_string()
    }
}

/// Device-reported `errors` carried by a fragment, if any.
pub(crate) fn device_errors(fragment: &Value) -> Option<Vec<String>> {
    let errors: Vec<String> = fragment
        .get("errors")?
        .as_array()?
        .iter()
        .map(|e| e.as_str().map_or_else(|| e.to_string(), str::to_owned))
        .collect();
    (!errors.is_empty()).then_some(errors)
}

/// Decode a read command's fragment into `T`.
///
/// Fragments must be JSON objects; an `errors` list from the device is a
/// decode failure for read commands.
pub(crate) fn decode_object<T: DeserializeOwned>(
    command: &dyn Command,
    fragment: Value,
) -> Result<T, DecodeError> {
    if !fragment.is_object() {
        let kind = json_kind(&fragment);
        return Err(DecodeError::new(
            command.describe(),
            fragment,
            DecodeCause::NotAnObject(kind),
        ));
    }
    if let Some(errors) = device_errors(&fragment) {
        return Err(DecodeError::new(
            command.describe(),
            fragment,
            DecodeCause::DeviceErrors(errors),
        ));
    }
    <T as serde::Deserialize>::deserialize(&fragment)
        .map_err(|e| DecodeError::new(command.describe(), fragment.clone(), e.into()))
}

/// Reject a second decode of the same command.
pub(crate) fn ensure_undecoded<T>(
    slot: &Option<T>,
    command: &dyn Command,
    fragment: Value,
) -> Result<Value, DecodeError> {
    if slot.is_some() {
        return Err(DecodeError::new(
            command.describe(),
            fragment,
            DecodeCause::AlreadyDecoded,
        ));
    }
    Ok(fragment)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
