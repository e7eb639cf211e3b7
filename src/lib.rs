//! Client SDK for the BlooCoin server protocol.
//!
//! Every remote operation is a named command sent as a single JSON object
//! over a fresh TCP connection; the server answers with a single JSON
//! envelope. [`BlooClient`] is the convenient entry point, [`Query`] the
//! per-operation layer underneath it, and [`Transaction`] the raw
//! one-shot exchange if you need full control.

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transaction;

pub use client::BlooClient;
pub use config::Endpoint;
pub use error::{BlooError, Result};
pub use query::{Op, Query};
pub use transaction::{Envelope, Framing, Transaction};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::BlooClient;
    pub use crate::config::Endpoint;
    pub use crate::error::{BlooError, Result};
    pub use crate::query::{Op, Query};
    pub use crate::transaction::{Envelope, Framing, Transaction};
}
