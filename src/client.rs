use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::Endpoint;
use crate::error::Result;
use crate::query::{Op, Query};

/// Main client for interacting with a BlooCoin server.
///
/// Holds the endpoint and timeout and exposes one method per server
/// command. Each call opens its own connection and returns the server's
/// payload as-is; the payload shape is documented by the server, not
/// enforced here.
#[derive(Debug, Clone)]
pub struct BlooClient {
    endpoint: Endpoint,
    timeout: Option<Duration>,
}

impl BlooClient {
    /// Create a client against the public BlooCoin server.
    pub fn new() -> Self {
        Self::with_endpoint(Endpoint::default())
    }

    /// Create a client against a specific server.
    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Submit a proof-of-work for an address.
    pub fn check(&self, addr: &str, winning_string: &str, winning_hash: &str) -> Result<Value> {
        let mut fields = Map::new();
        fields.insert("addr".into(), addr.into());
        fields.insert("winning_string".into(), winning_string.into());
        fields.insert("winning_hash".into(), winning_hash.into());
        self.run(Op::Check, fields)
    }

    /// Coin count for an address.
    pub fn check_addr(&self, addr: &str) -> Result<Value> {
        let mut fields = Map::new();
        fields.insert("addr".into(), addr.into());
        self.run(Op::CheckAddr, fields)
    }

    /// Current mining difficulty.
    pub fn get_coin(&self) -> Result<Value> {
        self.run(Op::GetCoin, Map::new())
    }

    /// Credential-checked coin count.
    pub fn my_coins(&self, addr: &str, pwd: &str) -> Result<Value> {
        self.run(Op::MyCoins, credentials(addr, pwd))
    }

    /// Register a new address with its password.
    pub fn register(&self, addr: &str, pwd: &str) -> Result<Value> {
        self.run(Op::Register, credentials(addr, pwd))
    }

    /// Send `amount` coins from `addr` to `to`.
    pub fn send_coin(&self, addr: &str, pwd: &str, to: &str, amount: u64) -> Result<Value> {
        let mut fields = credentials(addr, pwd);
        fields.insert("to".into(), to.into());
        fields.insert("amount".into(), amount.into());
        self.run(Op::SendCoin, fields)
    }

    /// Total coins the server knows about.
    pub fn total_coins(&self) -> Result<Value> {
        self.run(Op::TotalCoins, Map::new())
    }

    /// Transaction history for an address.
    pub fn transactions(&self, addr: &str, pwd: &str) -> Result<Value> {
        self.run(Op::Transactions, credentials(addr, pwd))
    }

    fn run(&self, op: Op, fields: Map<String, Value>) -> Result<Value> {
        let mut query = Query::new(op, fields, self.endpoint.clone())?;
        if let Some(timeout) = self.timeout {
            query = query.with_timeout(timeout);
        }
        query.invoke()
    }
}

impl Default for BlooClient {
    fn default() -> Self {
        Self::new()
    }
}

fn credentials(addr: &str, pwd: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("addr".into(), addr.into());
    fields.insert("pwd".into(), pwd.into());
    fields
}
