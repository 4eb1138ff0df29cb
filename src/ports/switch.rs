//! Switch port - abstraction for reading digital weight switches
//!
//! This trait allows the application to read binary contact state
//! without knowing the specific input mechanism (GPIO sysfs, mock, etc.)

use thiserror::Error;

/// Error type for switch operations
#[derive(Debug, Error)]
pub enum SwitchError {
    /// Failed to export the input pin to userspace
    #[error("failed to export pin {pin}: {source}")]
    Export {
        pin: u32,
        #[source]
        source: std::io::Error,
    },
    /// Failed to set the pin direction
    #[error("failed to set direction on pin {pin}: {source}")]
    Direction {
        pin: u32,
        #[source]
        source: std::io::Error,
    },
    /// Failed to read the pin value
    #[error("failed to read pin {pin}: {source}")]
    Read {
        pin: u32,
        #[source]
        source: std::io::Error,
    },
    /// The pin reported something other than 0 or 1
    #[error("pin {pin} reported invalid value {value:?}")]
    InvalidValue { pin: u32, value: String },
    /// Failed to return the pin to the kernel
    #[error("failed to unexport pin {pin}: {source}")]
    Unexport {
        pin: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Port for reading a digital weight switch
///
/// This trait abstracts a single binary contact. Each switch worker owns
/// one instance, mirroring one physical sensor.
pub trait SwitchPort {
    /// Read the contact state: `true` when the switch is closed.
    fn is_pressed(&mut self) -> Result<bool, SwitchError>;

    /// Release any resources claimed from the kernel
    ///
    /// Called once when the owning worker shuts down. The default does
    /// nothing; sysfs-backed implementations unexport their pin here.
    fn release(&mut self) -> Result<(), SwitchError> {
        Ok(())
    }
}
