use serde_json::Value;

use eosctl_api::Request;

use super::{Command, ensure_undecoded};
use crate::error::DecodeError;

/// Arbitrary request whose output is kept as raw JSON.
///
/// Used by the `run` subcommand. Any fragment is accepted, including one
/// that carries device `errors`; the caller decides what to show.
#[derive(Debug)]
pub struct Raw {
    request: Request,
    output: Option<Value>,
}

impl Raw {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            output: None,
        }
    }

    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    pub fn into_output(self) -> Option<Value> {
        self.output
    }
}

impl Command for Raw {
    fn request(&self) -> Request {
        self.request.clone()
    }

    fn decode(&mut self, fragment: Value) -> Result<(), DecodeError> {
        let fragment = ensure_undecoded(&self.output, &*self, fragment)?;
        self.output = Some(fragment);
        Ok(())
    }
}
