//! TCP alert adapter
//!
//! This adapter implements the AlertPort trait over a raw TCP
//! connection to the report server: connect, write the literal payload,
//! shut the stream down. No framing, no acknowledgement.

use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::ports::alert::{AlertError, AlertPort};

/// TCP alert adapter
///
/// Holds only the server address; a fresh connection is opened per
/// alert, matching the one-shot delivery contract of the port.
pub struct TcpAlert {
    server: SocketAddr,
}

impl TcpAlert {
    /// Create an adapter that reports to `server`.
    pub fn new(server: SocketAddr) -> Self {
        Self { server }
    }

    /// The report server this adapter delivers to.
    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

impl AlertPort for TcpAlert {
    async fn send_alert(&mut self, message: &[u8]) -> Result<(), AlertError> {
        let mut stream =
            TcpStream::connect(self.server)
                .await
                .map_err(|source| AlertError::Connect {
                    addr: self.server.to_string(),
                    source,
                })?;

        stream.write_all(message).await.map_err(AlertError::Send)?;
        stream.shutdown().await.map_err(AlertError::Send)?;
        Ok(())
    }
}
