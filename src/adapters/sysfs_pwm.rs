//! PWM sysfs lamp-output adapter
//!
//! This adapter implements the PwmPort trait through the kernel's PWM
//! sysfs interface (`export`, `pwm<N>/period`, `pwm<N>/duty_cycle`,
//! `pwm<N>/enable`).
//!
//! The sysfs root is injectable so tests can point the adapter at a
//! mock directory tree and assert the exact strings written.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::ports::pwm::{PwmError, PwmPort};

/// How long to wait for udev to materialize the channel directory after
/// an export write.
const EXPORT_SETTLE: Duration = Duration::from_secs(1);

/// PWM sysfs lamp-output adapter
///
/// Opening re-exports the channel: a stale export from a previous run is
/// unexported first (failure ignored, fresh boots have nothing to
/// unexport), then the channel is exported and given time to settle.
pub struct SysfsPwm {
    base: PathBuf,
    channel: u32,
}

impl SysfsPwm {
    /// Kernel PWM sysfs root on the reference fixture.
    pub const DEFAULT_SYSFS_ROOT: &'static str = "/sys/class/pwm/pwmchip0";

    /// Export `channel` under the default sysfs root.
    pub fn open(channel: u32) -> Result<Self, PwmError> {
        Self::open_at(Self::DEFAULT_SYSFS_ROOT, channel, EXPORT_SETTLE)
    }

    /// Export `channel` under an explicit sysfs root, waiting `settle`
    /// after each export-side write.
    pub fn open_at(
        root: impl Into<PathBuf>,
        channel: u32,
        settle: Duration,
    ) -> Result<Self, PwmError> {
        let base = root.into();

        let _ = fs::write(base.join("unexport"), channel.to_string());
        std::thread::sleep(settle);

        fs::write(base.join("export"), channel.to_string())
            .map_err(|source| PwmError::Export { channel, source })?;
        std::thread::sleep(settle);

        Ok(Self { base, channel })
    }

    /// The channel this adapter drives.
    pub fn channel(&self) -> u32 {
        self.channel
    }

    fn write_control(&self, file: &'static str, value: &str) -> Result<(), PwmError> {
        let path = self
            .base
            .join(format!("pwm{}", self.channel))
            .join(file);
        fs::write(path, value).map_err(|source| PwmError::Control {
            channel: self.channel,
            file,
            source,
        })
    }
}

impl PwmPort for SysfsPwm {
    fn set_period_ns(&mut self, period_ns: u32) -> Result<(), PwmError> {
        self.write_control("period", &period_ns.to_string())
    }

    fn set_duty_cycle_ns(&mut self, duty_ns: u32) -> Result<(), PwmError> {
        self.write_control("duty_cycle", &duty_ns.to_string())
    }

    fn enable(&mut self) -> Result<(), PwmError> {
        // The kernel latches a stale enable state across exports; writing
        // 0 first guarantees the rising edge.
        self.write_control("enable", "0")?;
        self.write_control("enable", "1")
    }

    fn disable(&mut self) -> Result<(), PwmError> {
        self.write_control("enable", "0")
    }
}
