//! Ambient lamp controller
//!
//! Samples the two light channels of the SPI ADC and drives the lamp
//! through the PWM sysfs interface, brightening the output as the
//! compensated ambient level rises. Runs a fixed number of samples and
//! leaves the lamp disabled when done.
//!
//! ## Usage
//!
//! ```bash
//! lamp_control
//!
//! # Custom device node, channel, or sample count
//! lamp_control --spi-dev /dev/spidev0.1 --pwm-channel 1 --samples 500
//! ```

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use seatguard::adapters::{Mcp3008Adc, SysfsPwm};
use seatguard::lamp::{self, LampConfig};

/// Default PWM channel (pwm0 is gpio18 on the reference fixture)
const PWM_CHANNEL: u32 = 0;

struct Args {
    spi_dev: String,
    pwm_channel: u32,
    samples: u32,
}

fn print_usage() {
    eprintln!("Usage: lamp_control [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --spi-dev <path>     ADC device node (default: {})",
        Mcp3008Adc::DEFAULT_DEVICE
    );
    eprintln!("  --pwm-channel <n>    PWM channel (default: {PWM_CHANNEL})");
    eprintln!(
        "  --samples <n>        Samples before exiting (default: {})",
        LampConfig::default().samples
    );
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        spi_dev: Mcp3008Adc::DEFAULT_DEVICE.to_string(),
        pwm_channel: PWM_CHANNEL,
        samples: LampConfig::default().samples,
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--spi-dev" => {
                i += 1;
                let Some(value) = argv.get(i) else {
                    print_usage();
                    bail!("--spi-dev requires a value");
                };
                args.spi_dev = value.clone();
            }
            "--pwm-channel" => {
                i += 1;
                let Some(value) = argv.get(i) else {
                    print_usage();
                    bail!("--pwm-channel requires a value");
                };
                args.pwm_channel = value.parse().context("invalid PWM channel")?;
            }
            "--samples" => {
                i += 1;
                let Some(value) = argv.get(i) else {
                    print_usage();
                    bail!("--samples requires a value");
                };
                args.samples = value.parse().context("invalid sample count")?;
            }
            other => {
                print_usage();
                bail!("unknown argument: {other}");
            }
        }
        i += 1;
    }

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;
    info!(pwm_channel = args.pwm_channel, "lamp controller starting");

    let mut pwm = SysfsPwm::open(args.pwm_channel)
        .with_context(|| format!("failed to export PWM channel {}", args.pwm_channel))?;
    let mut adc = Mcp3008Adc::open(&args.spi_dev)
        .with_context(|| format!("failed to open ADC at {}", args.spi_dev))?;

    let config = LampConfig {
        samples: args.samples,
        ..LampConfig::default()
    };
    lamp::run(&mut adc, &mut pwm, config)
        .await
        .context("lamp loop failed")?;

    Ok(())
}
