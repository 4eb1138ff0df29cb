//! MCP3008 SPI ADC adapter
//!
//! This adapter implements the AdcPort trait for an MCP3008-style
//! 10-bit converter behind a Linux spidev device node.

use std::sync::atomic::{AtomicU16, Ordering};

use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};

use crate::ports::adc::{AdcError, AdcPort};

/// SPI mode for the converter (CPOL=0, CPHA=0)
const SPI_MODE: SpiModeFlags = SpiModeFlags::SPI_MODE_0;

/// Word size in bits
const SPI_BITS_PER_WORD: u8 = 8;

/// Bus clock in Hz
const SPI_CLOCK_HZ: u32 = 1_000_000;

/// Number of input channels on the converter
const CHANNEL_COUNT: u8 = 8;

/// Start-of-conversion marker in the first request byte
const REQUEST_START: u8 = 0x01;

/// Build the 3-byte request frame for a single-ended channel read.
fn request_frame(channel: u8) -> [u8; 3] {
    [REQUEST_START, 0x08 | ((channel & 7) << 4), 0x00]
}

/// Unpack the 10-bit conversion result from the response frame.
fn unpack_reading(rx: &[u8; 3]) -> u16 {
    ((u16::from(rx[1]) << 8) & 0x300) | u16::from(rx[2])
}

/// MCP3008 SPI ADC adapter
///
/// Opens the spidev node once and configures the bus (mode 0, 8-bit
/// words, 1 MHz) up front; each read is a single full-duplex transfer.
pub struct Mcp3008Adc {
    spi: Spidev,
    /// Last raw conversion result (for diagnostics)
    last_raw: AtomicU16,
}

impl Mcp3008Adc {
    /// Default spidev node on the reference fixture.
    pub const DEFAULT_DEVICE: &'static str = "/dev/spidev0.0";

    /// Open and configure the converter behind `path`.
    pub fn open(path: &str) -> Result<Self, AdcError> {
        let mut spi = Spidev::open(path).map_err(|source| AdcError::Open {
            path: path.to_string(),
            source,
        })?;

        let options = SpidevOptions::new()
            .bits_per_word(SPI_BITS_PER_WORD)
            .max_speed_hz(SPI_CLOCK_HZ)
            .mode(SPI_MODE)
            .build();
        spi.configure(&options).map_err(AdcError::Configure)?;

        Ok(Self {
            spi,
            last_raw: AtomicU16::new(0),
        })
    }
}

impl AdcPort for Mcp3008Adc {
    fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError> {
        if channel >= CHANNEL_COUNT {
            return Err(AdcError::InvalidChannel(channel));
        }

        let tx = request_frame(channel);
        let mut rx = [0u8; 3];
        {
            let mut transfer = SpidevTransfer::read_write(&tx, &mut rx);
            self.spi.transfer(&mut transfer).map_err(AdcError::Transfer)?;
        }

        let value = unpack_reading(&rx);
        self.last_raw.store(value, Ordering::Relaxed);
        Ok(value)
    }

    fn last_raw_value(&self) -> Option<u16> {
        Some(self.last_raw.load(Ordering::Relaxed))
    }
}
