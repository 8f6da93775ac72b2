// Read-only exec commands.

use serde_json::Value;

use eosctl_api::Request;

use super::{Command, decode_object, ensure_undecoded};
use crate::error::DecodeError;
use crate::model::{Interfaces, IpInterfaces, Version};

/// `show version`
#[derive(Debug, Default)]
pub struct ShowVersion {
    output: Option<Version>,
}

impl ShowVersion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Option<&Version> {
        self.output.as_ref()
    }

    pub fn into_output(self) -> Option<Version> {
        self.output
    }
}

impl Command for ShowVersion {
    fn request(&self) -> Request {
        Request::exec("show version")
    }

    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError> {
        let fragment = ensure_undecoded(&self.output, &*self, fragment)?;
        self.output = Some(decode_object(&*self, fragment)?);
        Ok(())
    }
}

/// `show interfaces`
#[derive(Debug, Default)]
pub struct ShowInterfaces {
    output: Option<Interfaces>,
}

impl ShowInterfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Option<&Interfaces> {
        self.output.as_ref()
    }

    pub fn into_output(self) -> Option<Interfaces> {
        self.output
    }
}

impl Command for ShowInterfaces {
    fn request(&self) -> Request {
        Request::exec("show interfaces")
    }

    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError> {
        let fragment = ensure_undecoded(&self.output, &*self, fragment)?;
        self.output = Some(decode_object(&*self, fragment)?);
        Ok(())
    }
}

/// `show ip interface`
///
/// Always lists every routed interface, so that an absent interface is
/// an explicit "not in the map" rather than a device error string.
#[derive(Debug, Default)]
pub struct ShowIpInterface {
    output: Option<IpInterfaces>,
}

impl ShowIpInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Option<&IpInterfaces> {
        self.output.as_ref()
    }

    pub fn into_output(self) -> Option<IpInterfaces> {
        self.output
    }
}

impl Command for ShowIpInterface {
    fn request(&self) -> Request {
        Request::exec("show ip interface")
    }

    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError> {
        let fragment = ensure_undecoded(&self.output, &*self, fragment)?;
        self.output = Some(decode_object(&*self, fragment)?);
        Ok(())
    }
}
