//! ADC port - abstraction for reading analog sensor channels
//!
//! This trait allows the application to read analog values without
//! knowing the specific converter behind them (SPI ADC, mock, etc.)

use thiserror::Error;

/// Error type for ADC operations
#[derive(Debug, Error)]
pub enum AdcError {
    /// Requested channel does not exist on the converter
    #[error("ADC channel {0} out of range (0-7)")]
    InvalidChannel(u8),
    /// Failed to open the converter device
    #[error("failed to open ADC device {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Failed to configure the bus (mode, word size, clock)
    #[error("failed to configure ADC bus: {0}")]
    Configure(#[source] std::io::Error),
    /// A transfer to the converter failed
    #[error("ADC transfer failed: {0}")]
    Transfer(#[source] std::io::Error),
}

/// Port for reading analog sensor channels
///
/// This trait abstracts the analog-to-digital converter, allowing the
/// orchestration layer to poll pressure and light channels without
/// depending on a specific bus or chip.
///
/// Readings are raw converter counts; interpreting them (occupancy
/// thresholds, brightness calibration) belongs to the domain layer.
pub trait AdcPort {
    /// Read a single channel, returning the raw converter value.
    fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError>;

    /// Get the last raw value transferred (for diagnostics)
    ///
    /// Returns `None` if the converter doesn't track raw values.
    fn last_raw_value(&self) -> Option<u16> {
        None
    }
}
