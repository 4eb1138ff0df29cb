//! PWM port - abstraction for driving the lamp output
//!
//! This trait allows the lamp controller to set periods and duty cycles
//! without knowing the specific output mechanism (PWM sysfs, mock, etc.)

use thiserror::Error;

/// Error type for PWM operations
#[derive(Debug, Error)]
pub enum PwmError {
    /// Failed to export the PWM channel to userspace
    #[error("failed to export PWM channel {channel}: {source}")]
    Export {
        channel: u32,
        #[source]
        source: std::io::Error,
    },
    /// Failed to write one of the channel control files
    #[error("failed to write PWM {file} on channel {channel}: {source}")]
    Control {
        channel: u32,
        file: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Port for driving a PWM output
///
/// The period is set once during lamp setup; the duty cycle is rewritten
/// on every sample. Implementations must accept a duty cycle of zero
/// while disabled.
pub trait PwmPort {
    /// Set the output period in nanoseconds.
    fn set_period_ns(&mut self, period_ns: u32) -> Result<(), PwmError>;

    /// Set the active time per period in nanoseconds.
    fn set_duty_cycle_ns(&mut self, duty_ns: u32) -> Result<(), PwmError>;

    /// Start driving the output.
    fn enable(&mut self) -> Result<(), PwmError>;

    /// Stop driving the output.
    fn disable(&mut self) -> Result<(), PwmError>;
}
