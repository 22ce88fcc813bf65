//! The datagram socket bound to one bridge.

use log::debug;

use crate::config::BridgeConfig;
use crate::errors::Error;
use crate::frame;
use crate::runtime::{self, AsyncUdpSocket, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

/// A UDP socket connected to a single bridge, plus its settings.
pub(crate) struct Connection {
    config: BridgeConfig,
    socket: UdpSocket,
}

impl Connection {
    pub(crate) async fn open(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;

        let peer = config.peer();
        let local = if peer.starts_with('[') {
            "[::]:0"
        } else {
            "0.0.0.0:0"
        };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| Error::socket("bind", e))?;

        socket
            .connect(&peer)
            .await
            .map_err(|e| Error::socket("connect", e))?;

        if let Ok(addr) = socket.local_addr() {
            debug!("UDP socket {} connected to {}", addr, peer);
        }

        Ok(Connection {
            config: config.clone(),
            socket,
        })
    }

    pub(crate) fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub(crate) async fn send(&self, bytes: &[u8]) -> Result<()> {
        debug!("sending {} to {}", frame::to_hex(bytes), self.config.peer());
        self.socket
            .send(bytes)
            .await
            .map_err(|e| Error::socket("send", e))?;
        Ok(())
    }

    /// Wait up to the configured timeout for one datagram.
    pub(crate) async fn recv(&self, buffer: &mut [u8], action: &str) -> Result<usize> {
        let bytes = runtime::timeout(self.config.timeout, self.socket.recv(buffer))
            .await
            .map_err(|_| Error::timeout(action))?
            .map_err(|e| Error::socket("receive", e))?;

        debug!("received {} for {}", frame::to_hex(&buffer[..bytes]), action);
        Ok(bytes)
    }
}
