//! Session handshake.
//!
//! The bridge hands out a session id pair in reply to a fixed request. Every
//! command frame must carry the pair from the latest handshake; the bridge
//! keeps a single session slot, so the last client to handshake wins.

use log::debug;

use crate::connection::Connection;
use crate::errors::Error;
use crate::frame;
use crate::history::{FrameHistory, FrameKind};

type Result<T> = std::result::Result<T, Error>;

/// Session granted by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bridge MAC address, colon separated lowercase hex
    pub mac: String,
    pub id1: u8,
    pub id2: u8,
}

/// Outcome of a handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handshake {
    Established(Session),
    /// No reply within the configured timeout.
    TimedOut,
    /// A reply arrived but was not 22 bytes long.
    Malformed { len: usize },
    /// The request could not be sent or the socket reported an error.
    Failed { reason: String },
}

impl Handshake {
    /// Whether a usable session was granted.
    pub fn received(&self) -> bool {
        matches!(self, Handshake::Established(_))
    }

    /// Bridge MAC address, empty unless the handshake succeeded.
    pub fn mac(&self) -> &str {
        match self {
            Handshake::Established(session) => &session.mac,
            _ => "",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Handshake::Established(session) => Some(session),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<Session> {
        match self {
            Handshake::Established(session) => Ok(session),
            Handshake::TimedOut => Err(Error::timeout("handshake")),
            Handshake::Malformed { len } => Err(Error::MalformedHandshake { len }),
            Handshake::Failed { reason } => Err(Error::socket(
                "handshake",
                std::io::Error::other(reason),
            )),
        }
    }

    fn from_result(result: Result<Session>) -> Self {
        match result {
            Ok(session) => Handshake::Established(session),
            Err(Error::Timeout { .. }) => Handshake::TimedOut,
            Err(Error::MalformedHandshake { len }) => Handshake::Malformed { len },
            Err(e) => Handshake::Failed {
                reason: e.to_string(),
            },
        }
    }
}

const REPLY_BUFFER_LEN: usize = 1024;

/// Perform one handshake; never retries.
pub(crate) async fn start_session(conn: &Connection, history: &mut FrameHistory) -> Handshake {
    let handshake = Handshake::from_result(exchange(conn, history).await);
    match &handshake {
        Handshake::Established(session) => debug!(
            "session {:#04x}/{:#04x} with bridge {}",
            session.id1, session.id2, session.mac
        ),
        other => {
            debug!("handshake with {} failed: {:?}", conn.config().peer(), other);
            history.record_error(&format!("handshake: {:?}", other));
        }
    }
    handshake
}

async fn exchange(conn: &Connection, history: &mut FrameHistory) -> Result<Session> {
    history.record(FrameKind::Handshake, &frame::HANDSHAKE_REQUEST, None);
    conn.send(&frame::HANDSHAKE_REQUEST).await?;

    let mut buffer = [0u8; REPLY_BUFFER_LEN];
    let len = conn.recv(&mut buffer, "handshake").await?;
    history.record(FrameKind::HandshakeReply, &buffer[..len], None);

    frame::decode_handshake(&buffer[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn established() -> Handshake {
        Handshake::Established(Session {
            mac: "ac:cf:23:f5:7a:d4".to_string(),
            id1: 1,
            id2: 2,
        })
    }

    #[test]
    fn test_accessors() {
        let ok = established();
        assert!(ok.received());
        assert_eq!(ok.mac(), "ac:cf:23:f5:7a:d4");
        assert_eq!(ok.session().unwrap().id2, 2);

        let failed = Handshake::Malformed { len: 3 };
        assert!(!failed.received());
        assert_eq!(failed.mac(), "");
        assert!(failed.session().is_none());
    }

    #[test]
    fn test_from_result() {
        assert_eq!(
            Handshake::from_result(Err(Error::timeout("handshake"))),
            Handshake::TimedOut
        );
        assert_eq!(
            Handshake::from_result(Err(Error::MalformedHandshake { len: 21 })),
            Handshake::Malformed { len: 21 }
        );
        assert!(matches!(
            Handshake::from_result(Err(Error::NotConnected)),
            Handshake::Failed { .. }
        ));
    }

    #[test]
    fn test_into_result() {
        assert!(established().into_result().is_ok());
        assert_eq!(
            Handshake::TimedOut.into_result().unwrap_err(),
            Error::timeout("handshake")
        );
    }
}
