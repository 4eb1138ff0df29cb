//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the domain interacts with external
//! systems. They allow the domain to remain independent of specific
//! implementations.
//!
//! # Hexagonal Architecture
//!
//! In hexagonal architecture, ports define the "holes" in the hexagon
//! where adapters plug in:
//!
//! - **AdcPort**: How we read analog channels (SPI ADC, mock)
//! - **SwitchPort**: How we read digital switches (GPIO sysfs, mock)
//! - **PwmPort**: How we drive the lamp output (PWM sysfs, mock)
//! - **AlertPort**: How we deliver alerts (TCP, mock)

pub mod adc;
pub mod alert;
pub mod pwm;
pub mod switch;

pub use adc::{AdcError, AdcPort};
pub use alert::{AlertError, AlertPort};
pub use pwm::{PwmError, PwmPort};
pub use switch::{SwitchError, SwitchPort};
