//! Adapters - concrete implementations of ports
//!
//! Adapters connect the domain to the outside world by implementing
//! the port traits. Each adapter knows how to work with a specific
//! technology or hardware.
//!
//! # Available Adapters
//!
//! - **mcp3008**: MCP3008-style SPI ADC via /dev/spidevX.Y
//! - **sysfs_gpio**: digital weight switch via GPIO sysfs
//! - **sysfs_pwm**: lamp output via PWM sysfs
//! - **tcp_alert**: accident reports over a raw TCP socket

pub mod mcp3008;
pub mod sysfs_gpio;
pub mod sysfs_pwm;
pub mod tcp_alert;

pub use mcp3008::Mcp3008Adc;
pub use sysfs_gpio::SysfsGpioSwitch;
pub use sysfs_pwm::SysfsPwm;
pub use tcp_alert::TcpAlert;
