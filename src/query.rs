// src/query.rs
// The command catalog and the validation/interpretation layer on top of
// Transaction.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::Endpoint;
use crate::error::{BlooError, Result};
use crate::transaction::{Framing, Transaction};

/// Field that, when present in a query's payload, replaces the declared
/// command name. Meant for poking at unreleased server commands; the key
/// itself still travels to the server with the rest of the payload.
pub const CMD_OVERRIDE_KEY: &str = "_cmd";

/// Every command the BlooCoin server understands.
///
/// Each entry is pure configuration - a command name, the fields the
/// server will not accept the command without, and the framing policy
/// for its reply. None of them interpret their payload beyond the shared
/// envelope contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Submit a proof-of-work for verification; a valid one credits the
    /// mining address.
    Check,
    /// Coin count for an address.
    CheckAddr,
    /// Current mining difficulty. The command name predates the rename
    /// of difficulty fetching and is kept for protocol compatibility.
    GetCoin,
    /// Credential-checked coin count; wallets use it to verify a
    /// password against an address.
    MyCoins,
    /// Create a new address. The server rejects addresses whose length
    /// is not exactly 40.
    Register,
    /// Transfer an amount to another address.
    SendCoin,
    /// Total coins the server knows about.
    TotalCoins,
    /// Full transaction history for an address. The only command whose
    /// reply is unbounded, so the server streams it and closes.
    Transactions,
}

impl Op {
    pub const ALL: [Op; 8] = [
        Op::Check,
        Op::CheckAddr,
        Op::GetCoin,
        Op::MyCoins,
        Op::Register,
        Op::SendCoin,
        Op::TotalCoins,
        Op::Transactions,
    ];

    /// Wire name of the command.
    pub fn command(self) -> &'static str {
        match self {
            Op::Check => "check",
            Op::CheckAddr => "check_addr",
            Op::GetCoin => "get_coin",
            Op::MyCoins => "my_coins",
            Op::Register => "register",
            Op::SendCoin => "send_coin",
            Op::TotalCoins => "total_coins",
            Op::Transactions => "transactions",
        }
    }

    /// Fields the server requires; validated client-side before any
    /// connection is opened.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Op::Check => &["addr", "winning_string", "winning_hash"],
            Op::CheckAddr => &["addr"],
            Op::GetCoin => &[],
            Op::MyCoins => &["addr", "pwd"],
            Op::Register => &["addr", "pwd"],
            Op::SendCoin => &["addr", "pwd", "to", "amount"],
            Op::TotalCoins => &[],
            Op::Transactions => &["addr", "pwd"],
        }
    }

    /// How to read this command's reply.
    pub fn framing(self) -> Framing {
        match self {
            Op::Transactions => Framing::UntilClose,
            _ => Framing::SingleRead,
        }
    }
}

/// One named server operation, validated and ready to send.
///
/// Construction checks the payload against the operation's required
/// fields and fails - naming every missing field at once - before a
/// socket is ever opened. Extra fields are forwarded to the server
/// untouched.
#[derive(Debug)]
pub struct Query {
    command: String,
    framing: Framing,
    fields: Map<String, Value>,
    endpoint: Endpoint,
    timeout: Option<Duration>,
}

impl Query {
    pub fn new(op: Op, fields: Map<String, Value>, endpoint: Endpoint) -> Result<Self> {
        let missing: Vec<String> = op
            .required_fields()
            .iter()
            .filter(|name| !fields.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BlooError::MissingFields(missing));
        }

        let command = match fields.get(CMD_OVERRIDE_KEY).and_then(Value::as_str) {
            Some(cmd) => cmd.to_string(),
            None => op.command().to_string(),
        };

        Ok(Self {
            command,
            framing: op.framing(),
            fields,
            endpoint,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the exchange and interpret the reply envelope: the payload on
    /// success, [`BlooError::CommandFailed`] with the server's message
    /// otherwise.
    pub fn invoke(&self) -> Result<Value> {
        let mut tx = Transaction::new(self.command.clone(), self.endpoint.clone());
        if let Some(timeout) = self.timeout {
            tx = tx.with_timeout(timeout);
        }
        let envelope = tx.execute(&self.fields, self.framing)?;

        if !envelope.success {
            return Err(BlooError::CommandFailed(
                envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .payload
            .ok_or_else(|| BlooError::Unexpected("success reply without a payload".to_string()))
    }
}
