//! Accident reporter daemon
//!
//! Polls the seat's pressure and weight sensors and reports an
//! "accident" to a remote server when a previously occupied seat reads
//! fully vacant. Polling is gated by a remote controller over a raw TCP
//! control socket: `"1"` activates the monitor, `"0"` puts it in
//! standby.
//!
//! ## Usage
//!
//! ```bash
//! accident_report <listen-port> <server-ip> <server-port>
//!
//! # Custom ADC device node
//! accident_report 9000 192.168.0.10 9001 --spi-dev /dev/spidev0.1
//! ```
//!
//! The process serves a single control client and exits when that
//! client disconnects, or on Ctrl-C. Sensor workers are drained and
//! GPIO pins unexported on the way out.

use std::net::{IpAddr, SocketAddr};

use anyhow::{bail, Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seatguard::adapters::{Mcp3008Adc, SysfsGpioSwitch, TcpAlert};
use seatguard::monitor::{self, Monitor, MonitorConfig};

/// GPIO pin of the front weight switch
const FRONT_PIN: u32 = 17;

/// GPIO pin of the back weight switch
const BACK_PIN: u32 = 22;

struct Args {
    listen_port: u16,
    server_addr: SocketAddr,
    spi_dev: String,
}

fn print_usage() {
    eprintln!("Usage: accident_report <listen-port> <server-ip> <server-port>");
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --spi-dev <path>   ADC device node (default: {})",
        Mcp3008Adc::DEFAULT_DEVICE
    );
}

fn parse_args() -> Result<Args> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(0);
    }

    let mut spi_dev = Mcp3008Adc::DEFAULT_DEVICE.to_string();
    if let Some(idx) = args.iter().position(|a| a == "--spi-dev") {
        if idx + 1 >= args.len() {
            print_usage();
            bail!("--spi-dev requires a value");
        }
        spi_dev = args.remove(idx + 1);
        args.remove(idx);
    }

    if args.len() != 3 {
        print_usage();
        bail!("expected <listen-port> <server-ip> <server-port>");
    }

    let listen_port: u16 = args[0].parse().context("invalid listen port")?;
    let server_ip: IpAddr = args[1].parse().context("invalid server ip")?;
    let server_port: u16 = args[2].parse().context("invalid server port")?;

    Ok(Args {
        listen_port,
        server_addr: SocketAddr::new(server_ip, server_port),
        spi_dev,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;
    info!(server = %args.server_addr, "accident reporter starting");

    let adc = Mcp3008Adc::open(&args.spi_dev)
        .with_context(|| format!("failed to open ADC at {}", args.spi_dev))?;
    let front_switch =
        SysfsGpioSwitch::open(FRONT_PIN).context("failed to open front weight switch")?;
    let back_switch =
        SysfsGpioSwitch::open(BACK_PIN).context("failed to open back weight switch")?;
    let alert = TcpAlert::new(args.server_addr);

    let monitor = Monitor::spawn(adc, front_switch, back_switch, alert, MonitorConfig::default());

    let listener = TcpListener::bind(("0.0.0.0", args.listen_port))
        .await
        .with_context(|| format!("failed to bind control port {}", args.listen_port))?;

    tokio::select! {
        result = monitor::run_control_server(listener, &monitor) => {
            result.context("control session failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received");
        }
    }

    monitor.shutdown().await;
    Ok(())
}
