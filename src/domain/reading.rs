//! Seat sensor snapshot domain entity
//!
//! This module defines the core domain entity for seat sensor state.
//! It has no knowledge of how readings are gathered or transmitted.

/// One consistent view of all four seat sensors.
///
/// Pressure values are raw 10-bit ADC counts; switch values are the
/// debounced-by-hardware digital weight contacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeatSnapshot {
    /// Left pressure channel, raw ADC counts (0..=1023)
    pub left_pressure: u16,
    /// Right pressure channel, raw ADC counts (0..=1023)
    pub right_pressure: u16,
    /// Front weight switch closed
    pub front_switch: bool,
    /// Back weight switch closed
    pub back_switch: bool,
}

impl SeatSnapshot {
    /// Snapshot with every sensor at rest.
    pub const VACANT: SeatSnapshot = SeatSnapshot::new(0, 0, false, false);

    /// Create a snapshot from explicit sensor values.
    pub const fn new(
        left_pressure: u16,
        right_pressure: u16,
        front_switch: bool,
        back_switch: bool,
    ) -> Self {
        Self {
            left_pressure,
            right_pressure,
            front_switch,
            back_switch,
        }
    }
}

/// Which pressure channel a reading belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureSide {
    Left,
    Right,
}

impl PressureSide {
    /// Stable label for logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PressureSide::Left => "left",
            PressureSide::Right => "right",
        }
    }
}

/// Which weight switch a reading belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchEnd {
    Front,
    Back,
}

impl SwitchEnd {
    /// Stable label for logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SwitchEnd::Front => "front",
            SwitchEnd::Back => "back",
        }
    }
}
