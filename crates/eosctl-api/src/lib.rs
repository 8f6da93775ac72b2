// eosctl-api: Blocking Rust client for the Arista EOS command API (eAPI)

pub mod auth;
pub mod eapi;
pub mod error;
pub mod request;
pub mod transport;

pub use auth::{Credentials, Scheme};
pub use eapi::EapiClient;
pub use error::Error;
pub use request::{Mode, Request};
pub use transport::{TlsMode, Transport, TransportConfig};
