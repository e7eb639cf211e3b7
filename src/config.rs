// src/config.rs
// Server endpoint configuration: defaults, env overrides.

use std::env;
use std::fmt;

use log::warn;

const DEFAULT_HOST: &str = "server.bloocoin.org";
const DEFAULT_PORT: u16 = 3122;

const HOST_ENV: &str = "BLOO_SERVER_HOST";
const PORT_ENV: &str = "BLOO_SERVER_PORT";

/// Address of a BlooCoin server.
///
/// Passed explicitly to [`crate::BlooClient`], [`crate::Query`] or
/// [`crate::Transaction`] at construction, so pointing a single call at a
/// test double never affects anything else in the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build an endpoint from `BLOO_SERVER_HOST` / `BLOO_SERVER_PORT`,
    /// falling back to the public server for anything unset or malformed.
    pub fn from_env() -> Self {
        let host = match env::var(HOST_ENV) {
            Ok(h) if !h.is_empty() => h,
            _ => DEFAULT_HOST.to_string(),
        };
        let port = match env::var(PORT_ENV) {
            Ok(p) => match p.parse() {
                Ok(port) => port,
                Err(_) => {
                    warn!("{} is not a valid port: {:?} - using {}", PORT_ENV, p, DEFAULT_PORT);
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };
        Self { host, port }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_server() {
        let ep = Endpoint::default();
        assert_eq!(ep.host, "server.bloocoin.org");
        assert_eq!(ep.port, 3122);
        assert_eq!(ep.to_string(), "server.bloocoin.org:3122");
    }

    #[test]
    fn explicit_endpoint_overrides_default() {
        let ep = Endpoint::new("127.0.0.1", 9000);
        assert_eq!(ep.to_string(), "127.0.0.1:9000");
    }
}
