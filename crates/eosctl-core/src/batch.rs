// ── Command batching ──
//
// A batch collects borrowed commands, sends all of their requests in one
// transport call and hands fragment i back to command i. The batch is
// single-use: once dispatched (successfully or not) it refuses both new
// commands and a second dispatch.

use tracing::debug;

use eosctl_api::{Request, Transport};

use crate::command::Command;
use crate::error::{BatchError, DispatchError};

/// Lifecycle of a [`CommandBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Building,
    Dispatched,
}

/// Ordered, single-use group of commands sent in one round trip.
///
/// The batch borrows its commands mutably for its whole lifetime; drop
/// the batch to read their outputs.
#[derive(Debug)]
pub struct CommandBatch<'a> {
    commands: Vec<&'a mut dyn Command>,
    state: BatchState,
}

impl Default for CommandBatch<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandBatch<'a> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: BatchState::Building,
        }
    }

    /// Append a command. Submission order is response order.
    pub fn add(&mut self, command: &'a mut dyn Command) -> Result<(), BatchError> {
        if self.state == BatchState::Dispatched {
            return Err(BatchError::AlreadyDispatched);
        }
        self.commands.push(command);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Rendered requests, in submission order.
    pub fn requests(&self) -> Vec<Request> {
        self.commands.iter().map(|c| c.request()).collect()
    }

    /// Send every request in one call and decode each fragment into its
    /// command.
    ///
    /// The fragment count is checked before anything is decoded, so a
    /// count mismatch leaves every command undecoded. The first decode
    /// failure stops decoding; commands before it keep their output.
    pub fn dispatch<T>(&mut self, transport: &T) -> Result<(), DispatchError>
    where
        T: Transport + ?Sized,
    {
        if self.state == BatchState::Dispatched {
            return Err(DispatchError::AlreadyDispatched);
        }
        if self.commands.is_empty() {
            return Err(DispatchError::Empty);
        }

        let requests = self.requests();
        self.state = BatchState::Dispatched;
        debug!(commands = requests.len(), "dispatching command batch");

        let fragments = transport.execute(&requests)?;
        if fragments.len() != requests.len() {
            return Err(DispatchError::CountMismatch {
                expected: requests.len(),
                actual: fragments.len(),
            });
        }

        for (index, (command, fragment)) in
            self.commands.iter_mut().zip(fragments).enumerate()
        {
            command
                .decode(fragment)
                .map_err(|source| DispatchError::Decode { index, source })?;
        }

        debug!(commands = requests.len(), "command batch decoded");
        Ok(())
    }
}
