//! Lamp controller orchestration
//!
//! Polls the two light channels, converts them to a duty cycle through
//! the brightness calibration, and drives the PWM output. The loop runs
//! a fixed number of samples and leaves the output disabled when done.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::domain::BrightnessCalibration;
use crate::ports::{AdcError, AdcPort, PwmError, PwmPort};

/// Error type for the lamp controller
#[derive(Debug, Error)]
pub enum LampError {
    #[error(transparent)]
    Adc(#[from] AdcError),
    #[error(transparent)]
    Pwm(#[from] PwmError),
}

/// Tunables for the lamp controller.
#[derive(Clone, Copy, Debug)]
pub struct LampConfig {
    /// PWM period in nanoseconds
    pub period_ns: u32,
    /// Delay between samples
    pub sample_interval: Duration,
    /// How many samples to take before finishing
    pub samples: u32,
    /// ADC channel of the room-facing light sensor
    pub ambient_channel: u8,
    /// ADC channel of the shielded compensation sensor
    pub compensation_channel: u8,
    /// Light-to-duty conversion parameters
    pub calibration: BrightnessCalibration,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            period_ns: 20_000_000,
            sample_interval: Duration::from_millis(100),
            samples: 100,
            ambient_channel: 0,
            compensation_channel: 1,
            calibration: BrightnessCalibration::FIXTURE_DEFAULT,
        }
    }
}

/// Run the sampling loop to completion.
///
/// Sets up the output (period, zero duty, enable), then rewrites the
/// duty cycle once per sample. Any read or write failure aborts the run;
/// the process has nothing sensible to do with a dead sensor or output.
pub async fn run<A, P>(adc: &mut A, pwm: &mut P, config: LampConfig) -> Result<(), LampError>
where
    A: AdcPort,
    P: PwmPort,
{
    info!(
        period_ns = config.period_ns,
        samples = config.samples,
        "lamp controller starting"
    );

    pwm.set_period_ns(config.period_ns)?;
    pwm.set_duty_cycle_ns(0)?;
    pwm.enable()?;

    for sample in 0..config.samples {
        let ambient = adc.read_channel(config.ambient_channel)?;
        let compensation = adc.read_channel(config.compensation_channel)?;

        let level = config.calibration.compensated_level(ambient, compensation);
        let duty_ns = config.calibration.duty_cycle_ns(level, config.period_ns);
        pwm.set_duty_cycle_ns(duty_ns)?;

        info!(sample, ambient, compensation, level, duty_ns, "lamp sample");
        tokio::time::sleep(config.sample_interval).await;
    }

    pwm.disable()?;
    info!("lamp controller finished");
    Ok(())
}
