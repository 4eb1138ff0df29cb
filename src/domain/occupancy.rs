//! Occupancy detection domain service
//!
//! This module decides when a seat has been occupied and when its
//! occupant has vanished, which is the condition that triggers an
//! accident report.
//!
//! Detection is a two-phase state machine over [`SeatSnapshot`] values:
//! the monitor first waits for an occupant (pressure above threshold on
//! either side together with a closed weight switch), then waits for the
//! seat to read fully vacant. The occupied-to-vacant transition emits a
//! single [`OccupancyEvent::OccupantVanished`] and re-arms.

use crate::domain::SeatSnapshot;

/// Thresholds separating a loaded sensor from an idle one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupancyThresholds {
    /// A pressure channel counts as loaded strictly above this raw value
    pub pressure_min: u16,
}

impl OccupancyThresholds {
    /// Seat-pad calibration for the reference fixture.
    pub const SEAT_PAD_DEFAULT: Self = Self { pressure_min: 10 };

    /// Create thresholds with a custom pressure floor.
    pub const fn new(pressure_min: u16) -> Self {
        Self { pressure_min }
    }

    /// An occupant is present: either pressure channel is loaded and
    /// at least one weight switch is closed.
    #[inline]
    pub fn occupied(&self, snapshot: &SeatSnapshot) -> bool {
        (snapshot.left_pressure > self.pressure_min
            || snapshot.right_pressure > self.pressure_min)
            && (snapshot.front_switch || snapshot.back_switch)
    }

    /// The seat is fully vacant: every sensor reads zero.
    #[inline]
    pub fn vacant(&self, snapshot: &SeatSnapshot) -> bool {
        snapshot.left_pressure == 0
            && snapshot.right_pressure == 0
            && !snapshot.front_switch
            && !snapshot.back_switch
    }
}

impl Default for OccupancyThresholds {
    fn default() -> Self {
        Self::SEAT_PAD_DEFAULT
    }
}

/// Event emitted by [`OccupancyMonitor::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyEvent {
    /// An occupant settled onto a previously vacant seat
    OccupantDetected,
    /// Every sensor dropped to rest while the seat was occupied
    OccupantVanished,
}

/// Detection phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    AwaitingOccupant,
    Occupied,
}

/// Two-phase occupant-vanished detector.
///
/// Feed it snapshots in observation order; it reports phase transitions
/// and stays silent otherwise. Partial states (pressure below threshold
/// but not zero, a single open switch) never cause a transition, so a
/// shifting occupant does not raise spurious reports.
#[derive(Clone, Copy, Debug)]
pub struct OccupancyMonitor {
    thresholds: OccupancyThresholds,
    phase: Phase,
}

impl OccupancyMonitor {
    /// Create a monitor in the waiting phase.
    pub const fn new(thresholds: OccupancyThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::AwaitingOccupant,
        }
    }

    /// Whether an occupant is currently being tracked.
    pub fn is_occupied(&self) -> bool {
        self.phase == Phase::Occupied
    }

    /// Forget any tracked occupant and return to the waiting phase.
    ///
    /// Called when the monitor is deactivated so a stale occupant from
    /// a previous session cannot trigger a report on reactivation.
    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingOccupant;
    }

    /// Observe one snapshot, returning the transition it caused, if any.
    pub fn observe(&mut self, snapshot: &SeatSnapshot) -> Option<OccupancyEvent> {
        match self.phase {
            Phase::AwaitingOccupant if self.thresholds.occupied(snapshot) => {
                self.phase = Phase::Occupied;
                Some(OccupancyEvent::OccupantDetected)
            }
            Phase::Occupied if self.thresholds.vacant(snapshot) => {
                self.phase = Phase::AwaitingOccupant;
                Some(OccupancyEvent::OccupantVanished)
            }
            _ => None,
        }
    }
}

impl Default for OccupancyMonitor {
    fn default() -> Self {
        Self::new(OccupancyThresholds::SEAT_PAD_DEFAULT)
    }
}
