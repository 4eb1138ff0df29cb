//! Alert port - abstraction for delivering accident reports
//!
//! This trait allows the monitor to raise alerts without knowing the
//! specific transport (TCP, mock, etc.)

use std::future::Future;

use thiserror::Error;

/// Error type for alert operations
#[derive(Debug, Error)]
pub enum AlertError {
    /// Could not reach the report server
    #[error("failed to connect to report server {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// Connected but the payload was not delivered
    #[error("failed to send alert: {0}")]
    Send(#[source] std::io::Error),
}

/// Port for delivering alerts to a remote peer
///
/// Delivery is one-shot per call: implementations open whatever
/// connection they need, send the payload, and tear the connection
/// down. There is no acknowledgement and no retry; the caller decides
/// what a failed delivery means.
pub trait AlertPort {
    /// Deliver a single alert message.
    fn send_alert(
        &mut self,
        message: &[u8],
    ) -> impl Future<Output = Result<(), AlertError>> + Send;
}
