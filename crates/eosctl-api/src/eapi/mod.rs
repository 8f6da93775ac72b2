// EOS command API (eAPI)
//
// JSON-RPC 2.0 `runCmds` over HTTP(S): envelope models, request framing,
// and the blocking client that implements `Transport`.

pub mod client;
pub mod framing;
pub mod models;

pub use client::EapiClient;
