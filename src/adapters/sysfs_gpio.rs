//! GPIO sysfs weight-switch adapter
//!
//! This adapter implements the SwitchPort trait for a digital contact
//! wired to a GPIO pin, read through the kernel's GPIO sysfs interface
//! (`export`, `gpio<N>/direction`, `gpio<N>/value`, `unexport`).
//!
//! The sysfs root is injectable so tests can point the adapter at a
//! mock directory tree and assert the exact strings written.

use std::fs;
use std::path::PathBuf;

use crate::ports::switch::{SwitchError, SwitchPort};

/// GPIO sysfs weight-switch adapter
///
/// Opening exports the pin and sets it to input; [`SwitchPort::release`]
/// returns it to the kernel.
pub struct SysfsGpioSwitch {
    base: PathBuf,
    pin: u32,
    exported: bool,
}

impl SysfsGpioSwitch {
    /// Kernel GPIO sysfs root on the reference fixture.
    pub const DEFAULT_SYSFS_ROOT: &'static str = "/sys/class/gpio";

    /// Export `pin` under the default sysfs root and configure it as input.
    pub fn open(pin: u32) -> Result<Self, SwitchError> {
        Self::open_at(Self::DEFAULT_SYSFS_ROOT, pin)
    }

    /// Export `pin` under an explicit sysfs root and configure it as input.
    pub fn open_at(root: impl Into<PathBuf>, pin: u32) -> Result<Self, SwitchError> {
        let base = root.into();

        if let Err(source) = fs::write(base.join("export"), pin.to_string()) {
            // A pin left exported by a previous run makes the write fail
            // even though the pin directory is usable.
            if !base.join(format!("gpio{pin}")).exists() {
                return Err(SwitchError::Export { pin, source });
            }
        }

        let switch = Self {
            base,
            pin,
            exported: true,
        };
        fs::write(switch.pin_file("direction"), "in")
            .map_err(|source| SwitchError::Direction { pin, source })?;

        Ok(switch)
    }

    /// The pin this switch reads.
    pub fn pin(&self) -> u32 {
        self.pin
    }

    fn pin_file(&self, name: &str) -> PathBuf {
        self.base.join(format!("gpio{}", self.pin)).join(name)
    }
}

impl SwitchPort for SysfsGpioSwitch {
    fn is_pressed(&mut self) -> Result<bool, SwitchError> {
        let raw = fs::read_to_string(self.pin_file("value")).map_err(|source| {
            SwitchError::Read {
                pin: self.pin,
                source,
            }
        })?;

        match raw.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(SwitchError::InvalidValue {
                pin: self.pin,
                value: other.to_string(),
            }),
        }
    }

    fn release(&mut self) -> Result<(), SwitchError> {
        if !self.exported {
            return Ok(());
        }
        fs::write(self.base.join("unexport"), self.pin.to_string()).map_err(|source| {
            SwitchError::Unexport {
                pin: self.pin,
                source,
            }
        })?;
        self.exported = false;
        Ok(())
    }
}
