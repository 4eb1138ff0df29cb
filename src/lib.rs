//! Seatguard: seat-occupancy accident reporter and ambient lamp controller
//!
//! This library provides a hexagonal architecture for two small Linux
//! embedded-sensor utilities sharing one SPI-connected ADC:
//!
//! - the **accident reporter** polls pressure and weight sensors, one
//!   worker per sensor, and raises a one-shot TCP alert when a previously
//!   occupied seat reads fully vacant;
//! - the **lamp controller** polls two light channels and drives a PWM
//!   output through the Linux PWM sysfs interface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - SeatSnapshot entity                                           │
//! │  - OccupancyMonitor service                                      │
//! │  - BrightnessCalibration service                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - AdcPort: read analog sensor channels                          │
//! │  - SwitchPort: read digital weight switches                      │
//! │  - PwmPort: drive the lamp output                                │
//! │  - AlertPort: deliver accident alerts                            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Mcp3008Adc: SPI ADC via /dev/spidevX.Y                        │
//! │  - SysfsGpioSwitch: GPIO sysfs digital input                     │
//! │  - SysfsPwm: PWM sysfs output                                    │
//! │  - TcpAlert: raw TCP alert delivery                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Benefits
//!
//! - **Synchronized** - sensor workers share a mutex-guarded state struct
//!   and are gated by a watch channel instead of unsynchronized globals
//! - **Testable** - ports allow mocking the ADC, switches, PWM, and alert
//!   transport; sysfs adapters accept an injected sysfs root
//! - **Extensible** - other sensors plug in by implementing a port

// ============================================================================
// Protocol (shared between monitor and control/alert peers)
// ============================================================================

pub mod protocol;

pub use protocol::{ControlCommand, ACCIDENT_MESSAGE, MAX_CONTROL_MESSAGE};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure business logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

/// Reporter orchestration: workers, alert task, control server
pub mod monitor;

/// Lamp controller orchestration
pub mod lamp;

// Re-export key domain types
pub use domain::{
    BrightnessCalibration, OccupancyEvent, OccupancyMonitor, OccupancyThresholds, PressureSide,
    SeatSnapshot, SwitchEnd,
};

// Re-export key port traits
pub use ports::{AdcPort, AlertPort, PwmPort, SwitchPort};

// Re-export adapters
pub use adapters::{Mcp3008Adc, SysfsGpioSwitch, SysfsPwm, TcpAlert};
