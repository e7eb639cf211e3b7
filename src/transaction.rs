// src/transaction.rs
// One-shot command exchange with a BlooCoin server: connect, send, frame
// the reply, decode.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, trace};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::Endpoint;
use crate::error::Result;

/// Reserved request key carrying the command name. A caller-supplied
/// field with the same name is silently overwritten.
pub(crate) const CMD_KEY: &str = "cmd";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_BUFFER: usize = 1024;

/// How the client decides a reply is complete.
///
/// The protocol itself has no length prefix or delimiter; when to stop
/// reading is a per-command client policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One bounded read. A reply larger than the read buffer gets
    /// truncated and will fail to decode - known limitation of this mode.
    SingleRead,
    /// Keep reading until the server closes the connection.
    UntilClose,
}

/// The JSON object the server answers every command with.
///
/// `message` is only populated on failure, `payload` only on success.
/// The payload's inner shape is defined per command by the server and is
/// handed through opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: Option<String>,
    pub payload: Option<Value>,
}

/// A single command exchange on its own connection.
///
/// Consumed by [`execute`](Transaction::execute), so each transaction
/// talks to the server exactly once. Nothing is pooled or reused across
/// calls.
#[derive(Debug)]
pub struct Transaction {
    command: String,
    endpoint: Endpoint,
    timeout: Duration,
    // TODO: wire retries into execute() once retry semantics are settled.
    retries: u32,
    buffer: usize,
}

impl Transaction {
    pub fn new(command: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            command: command.into(),
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
            buffer: DEFAULT_BUFFER,
        }
    }

    /// Bound on connect, send and each read (default 2s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accepted but not acted upon; failed exchanges are never rerun.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Size of each bounded read (default 1024 bytes). Under
    /// [`Framing::SingleRead`] this is also the reply size ceiling.
    pub fn with_buffer_size(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Perform the exchange: merge the command name into `payload`, send
    /// the request, read the reply per `framing`, decode it.
    ///
    /// The socket is closed on every exit path, error paths included.
    pub fn execute(self, payload: &Map<String, Value>, framing: Framing) -> Result<Envelope> {
        let mut request = payload.clone();
        request.insert(CMD_KEY.to_string(), Value::String(self.command.clone()));
        let body = serde_json::to_vec(&request)?;

        let mut stream = self.connect()?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        stream.write_all(&body)?;
        debug!("{} <- '{}' request ({} bytes)", self.endpoint, self.command, body.len());

        let mut data = Vec::new();
        let mut buf = vec![0u8; self.buffer];
        match framing {
            Framing::SingleRead => {
                let n = stream.read(&mut buf)?;
                data.extend_from_slice(&buf[..n]);
            }
            Framing::UntilClose => loop {
                let n = stream.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&buf[..n]);
            },
        }
        drop(stream);
        trace!("{} -> {} reply bytes", self.endpoint, data.len());

        let envelope = serde_json::from_slice(&data)?;
        Ok(envelope)
    }

    fn connect(&self) -> Result<TcpStream> {
        let mut last_err = None;
        for addr in (self.endpoint.host.as_str(), self.endpoint.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err
            .unwrap_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no addresses resolved for {}", self.endpoint),
                )
            })
            .into())
    }
}
