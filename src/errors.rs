/// All error types that can occur when talking to a Milight wifi bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A network socket operation failed while communicating with the bridge.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// An operation was attempted before a successful setup (or after close).
    #[error("bridge connection is not set up")]
    NotConnected,

    /// The zone id is outside 0..=4.
    #[error("invalid zone {0}; expected 0 (all) to 4")]
    InvalidZone(u8),

    /// A raw command was not exactly 9 bytes long.
    #[error("invalid command length {0}; expected 9 bytes")]
    InvalidCommandLength(usize),

    /// The configured receive timeout is zero or not finite.
    #[error("invalid timeout; must be a positive, finite duration")]
    InvalidTimeout,

    /// The bridge did not answer within the configured timeout.
    #[error("timed out waiting for {action}")]
    Timeout { action: String },

    /// The handshake reply did not have the expected 22-byte layout.
    #[error("malformed handshake reply of {len} bytes")]
    MalformedHandshake { len: usize },

    /// The acknowledgment did not have the expected 8-byte layout.
    #[error("unexpected reply of {len} bytes")]
    UnexpectedReply { len: usize },

    /// The acknowledgment referenced another request.
    #[error("acknowledged sequence {received} but sent {expected}")]
    SequenceMismatch { expected: u8, received: u8 },

    /// The action has no opcode for the requested target.
    #[error("{action} is not supported by {target}")]
    Unsupported { action: String, target: String },
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new timeout error
    pub fn timeout(action: &str) -> Self {
        Error::Timeout {
            action: action.to_string(),
        }
    }

    /// Create a new unsupported action error
    pub fn unsupported(action: impl ToString, target: impl ToString) -> Self {
        Error::Unsupported {
            action: action.to_string(),
            target: target.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
