use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlooError>;

/// Everything that can go wrong while talking to a BlooCoin server.
///
/// Each failure mode gets its own variant so callers can branch on
/// cause: network trouble, a garbled reply, a command the server
/// rejected, or arguments the caller left out.
#[derive(Debug, Error)]
pub enum BlooError {
    /// Creating, connecting or using the socket failed (timeouts included).
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// The bytes the server sent back were not valid JSON.
    #[error("unparseable server reply: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The server executed the command and reported failure.
    #[error("command failed: '{0}'")]
    CommandFailed(String),

    /// One or more required fields were left out of a query.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Internal invariant violation. Seeing this means a bug in the SDK,
    /// not in your code or the server.
    #[error("unexpected state: {0}")]
    Unexpected(String),
}
