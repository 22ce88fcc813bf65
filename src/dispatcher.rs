//! Request/acknowledgment exchange.

use log::{debug, info};

use crate::command::Command;
use crate::config::BridgeConfig;
use crate::connection::Connection;
use crate::errors::Error;
use crate::frame;
use crate::history::{FrameHistory, FrameKind};
use crate::sequence::SequenceNumber;
use crate::session::{self, Handshake};
use crate::types::Zone;

type Result<T> = std::result::Result<T, Error>;

const ACK_BUFFER_LEN: usize = 64;

/// Owns the connection and sequence counter for one bridge.
///
/// Each dispatch performs a fresh handshake, then sends exactly one request
/// and waits for its acknowledgment. Nothing is retried.
#[derive(Default)]
pub(crate) struct Dispatcher {
    connection: Option<Connection>,
    sequence: SequenceNumber,
    history: FrameHistory,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace any previous connection with a new one.
    pub(crate) async fn open(&mut self, config: &BridgeConfig) -> Result<()> {
        self.close();
        let connection = Connection::open(config).await?;
        info!("connected to milight bridge at {}", config.peer());
        self.connection = Some(connection);
        Ok(())
    }

    /// Release the socket and reset the sequence number. Safe to call at
    /// any time.
    pub(crate) fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            info!("closed connection to {}", connection.config().peer());
        }
        self.sequence = SequenceNumber::new();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    pub(crate) fn config(&self) -> Option<&BridgeConfig> {
        self.connection.as_ref().map(Connection::config)
    }

    pub(crate) fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    pub(crate) fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut FrameHistory {
        &mut self.history
    }

    pub(crate) async fn handshake(&mut self) -> Handshake {
        match &self.connection {
            Some(connection) => session::start_session(connection, &mut self.history).await,
            None => Handshake::Failed {
                reason: Error::NotConnected.to_string(),
            },
        }
    }

    /// Send a raw command; false on any validation, transport or
    /// acknowledgment failure.
    pub(crate) async fn send(&mut self, command: &[u8], zone_id: u8) -> bool {
        let result = match (Command::try_from(command), Zone::try_from(zone_id)) {
            (Ok(command), Ok(_)) => self.dispatch(&command, zone_id).await.map(|_| ()),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        self.settle(result)
    }

    /// Log and record a failed result, folding it into a boolean.
    pub(crate) fn settle(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                debug!("request failed: {}", e);
                self.history.record_error(&e.to_string());
                false
            }
        }
    }

    /// Handshake, send one request and wait for its acknowledgment.
    ///
    /// Returns the sequence number that was acknowledged. The zone id must
    /// already be validated.
    pub(crate) async fn dispatch(
        &mut self,
        command: &Command,
        zone_id: u8,
    ) -> Result<SequenceNumber> {
        if self.connection.is_none() {
            return Err(Error::NotConnected);
        }

        let session = self.handshake().await.into_result()?;
        let sequence = self.sequence.advance();
        let request = frame::encode_request(&session, sequence, command, zone_id);

        let connection = self.connection.as_ref().ok_or(Error::NotConnected)?;
        self.history
            .record(FrameKind::Command, &request, Some(sequence.value()));
        connection.send(&request).await?;

        let mut buffer = [0u8; ACK_BUFFER_LEN];
        let len = connection.recv(&mut buffer, "acknowledgment").await?;
        self.history
            .record(FrameKind::Ack, &buffer[..len], Some(sequence.value()));

        frame::decode_ack(&buffer[..len], sequence)?;
        Ok(sequence)
    }
}
