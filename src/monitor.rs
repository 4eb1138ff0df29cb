//! Reporter orchestration: sensor workers, alert task, control server
//!
//! The monitor owns one worker task per seat sensor (two pressure
//! channels on the shared ADC, two weight switches) plus an alert task
//! driving the occupancy detector. All five tasks share a mutex-guarded
//! [`SeatState`] and are gated by a single `watch` channel carrying the
//! [`MonitorPhase`]: a remote controller flips the phase between
//! `Standby` and `Active` over the control socket, and shutdown is one
//! more phase value every worker observes.
//!
//! Workers park on the watch channel while in `Standby`; there is no
//! busy-waiting anywhere.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{
    OccupancyEvent, OccupancyMonitor, OccupancyThresholds, PressureSide, SeatSnapshot, SwitchEnd,
};
use crate::ports::{AdcPort, AlertPort, SwitchPort};
use crate::protocol::{ControlCommand, ACCIDENT_MESSAGE, MAX_CONTROL_MESSAGE};

/// Lifecycle phase shared with every worker through the watch channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Sensors idle, waiting for activation
    Standby,
    /// Sensors polling, alert task armed
    Active,
    /// Workers draining; terminal
    Shutdown,
}

/// Mutex-guarded view of the four seat sensors.
///
/// Workers write their side of the snapshot; the alert task reads a
/// consistent whole.
#[derive(Debug, Default)]
pub struct SeatState {
    inner: Mutex<SeatSnapshot>,
}

impl SeatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pressure sample for one side.
    pub fn record_pressure(&self, side: PressureSide, raw: u16) {
        let mut snapshot = self.lock();
        match side {
            PressureSide::Left => snapshot.left_pressure = raw,
            PressureSide::Right => snapshot.right_pressure = raw,
        }
    }

    /// Record a weight-switch sample for one end.
    pub fn record_switch(&self, end: SwitchEnd, pressed: bool) {
        let mut snapshot = self.lock();
        match end {
            SwitchEnd::Front => snapshot.front_switch = pressed,
            SwitchEnd::Back => snapshot.back_switch = pressed,
        }
    }

    /// A consistent copy of the current sensor state.
    pub fn snapshot(&self) -> SeatSnapshot {
        *self.lock()
    }

    /// Reset every sensor to rest.
    ///
    /// Called on activation so a snapshot left over from a previous
    /// session cannot replay an old occupant. Clearing here rather than
    /// on deactivation also wipes any sample a worker was mid-flight
    /// with when the monitor went to standby.
    pub fn clear(&self) {
        *self.lock() = SeatSnapshot::VACANT;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SeatSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Tunables for the reporter.
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    /// How often each worker polls its sensor
    pub poll_interval: Duration,
    /// Occupancy decision thresholds
    pub thresholds: OccupancyThresholds,
    /// ADC channel of the left pressure pad
    pub left_channel: u8,
    /// ADC channel of the right pressure pad
    pub right_channel: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(300),
            thresholds: OccupancyThresholds::SEAT_PAD_DEFAULT,
            left_channel: 3,
            right_channel: 4,
        }
    }
}

/// Handle over the spawned worker set.
///
/// Dropping the handle does not stop the workers; call
/// [`Monitor::shutdown`] to drain and join them.
pub struct Monitor {
    phase_tx: watch::Sender<MonitorPhase>,
    state: Arc<SeatState>,
    handles: Vec<JoinHandle<()>>,
}

impl Monitor {
    /// Spawn the full worker set in `Standby`.
    ///
    /// The ADC is shared by both pressure workers behind a mutex; each
    /// switch worker owns its input exclusively, as does the alert task
    /// its transport.
    pub fn spawn<A, S, P>(
        adc: A,
        front_switch: S,
        back_switch: S,
        alert: P,
        config: MonitorConfig,
    ) -> Self
    where
        A: AdcPort + Send + 'static,
        S: SwitchPort + Send + 'static,
        P: AlertPort + Send + 'static,
    {
        let (phase_tx, phase_rx) = watch::channel(MonitorPhase::Standby);
        let state = Arc::new(SeatState::new());
        let adc = Arc::new(Mutex::new(adc));

        let handles = vec![
            tokio::spawn(pressure_worker(
                Arc::clone(&adc),
                config.left_channel,
                PressureSide::Left,
                Arc::clone(&state),
                phase_rx.clone(),
                config.poll_interval,
            )),
            tokio::spawn(pressure_worker(
                adc,
                config.right_channel,
                PressureSide::Right,
                Arc::clone(&state),
                phase_rx.clone(),
                config.poll_interval,
            )),
            tokio::spawn(switch_worker(
                front_switch,
                SwitchEnd::Front,
                Arc::clone(&state),
                phase_rx.clone(),
                config.poll_interval,
            )),
            tokio::spawn(switch_worker(
                back_switch,
                SwitchEnd::Back,
                Arc::clone(&state),
                phase_rx.clone(),
                config.poll_interval,
            )),
            tokio::spawn(alert_worker(
                alert,
                Arc::clone(&state),
                phase_rx,
                config,
            )),
        ];

        Self {
            phase_tx,
            state,
            handles,
        }
    }

    /// Shared sensor state (primarily for tests and diagnostics).
    pub fn state(&self) -> Arc<SeatState> {
        Arc::clone(&self.state)
    }

    /// Apply a command received on the control socket.
    pub fn apply(&self, command: ControlCommand) {
        match command {
            ControlCommand::Activate => self.activate(),
            ControlCommand::Deactivate => self.standby(),
        }
    }

    /// Start polling and arm the alert task. Idempotent.
    pub fn activate(&self) {
        if *self.phase_tx.borrow() != MonitorPhase::Active {
            self.state.clear();
        }
        if self.phase_tx.send_replace(MonitorPhase::Active) != MonitorPhase::Active {
            info!("monitor activated");
        }
    }

    /// Stop polling and disarm. Idempotent.
    pub fn standby(&self) {
        if self.phase_tx.send_replace(MonitorPhase::Standby) != MonitorPhase::Standby {
            info!("monitor standing by");
        }
    }

    /// Signal shutdown and join every worker.
    pub async fn shutdown(self) {
        let _ = self.phase_tx.send(MonitorPhase::Shutdown);
        for handle in self.handles {
            if let Err(error) = handle.await {
                warn!(%error, "worker did not shut down cleanly");
            }
        }
        info!("monitor shut down");
    }
}

/// Serve the single control client.
///
/// Accepts one connection and toggles the monitor phase from its `"1"`
/// and `"0"` messages. Returns when the client disconnects; the caller
/// decides that the session is over.
pub async fn run_control_server(
    listener: TcpListener,
    monitor: &Monitor,
) -> std::io::Result<()> {
    let local = listener.local_addr()?;
    info!(%local, "control server listening");

    let (mut stream, peer) = listener.accept().await?;
    info!(%peer, "control connection established");

    let mut buf = [0u8; MAX_CONTROL_MESSAGE];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            info!(%peer, "control connection closed");
            monitor.standby();
            return Ok(());
        }

        match ControlCommand::parse(&buf[..n]) {
            Some(command) => monitor.apply(command),
            None => warn!(raw = ?&buf[..n], "unrecognized control message"),
        }
    }
}

// ============================================================================
// Workers
// ============================================================================

async fn pressure_worker<A>(
    adc: Arc<Mutex<A>>,
    channel: u8,
    side: PressureSide,
    state: Arc<SeatState>,
    mut phase_rx: watch::Receiver<MonitorPhase>,
    poll_interval: Duration,
) where
    A: AdcPort + Send + 'static,
{
    info!(side = side.as_str(), channel, "pressure worker started");

    loop {
        let phase = *phase_rx.borrow_and_update();
        match phase {
            MonitorPhase::Shutdown => break,
            MonitorPhase::Standby => {
                if phase_rx.changed().await.is_err() {
                    break;
                }
            }
            MonitorPhase::Active => {
                let result = {
                    let mut adc = adc.lock().unwrap_or_else(PoisonError::into_inner);
                    adc.read_channel(channel)
                };
                match result {
                    Ok(raw) => {
                        state.record_pressure(side, raw);
                        debug!(side = side.as_str(), raw, "pressure sample");
                    }
                    Err(error) => warn!(side = side.as_str(), %error, "pressure read failed"),
                }

                tokio::select! {
                    _ = tokio::time::sleep(poll_interval) => {}
                    _ = phase_rx.changed() => {}
                }
            }
        }
    }

    info!(side = side.as_str(), "pressure worker stopped");
}

async fn switch_worker<S>(
    mut switch: S,
    end: SwitchEnd,
    state: Arc<SeatState>,
    mut phase_rx: watch::Receiver<MonitorPhase>,
    poll_interval: Duration,
) where
    S: SwitchPort + Send + 'static,
{
    info!(end = end.as_str(), "weight worker started");

    loop {
        let phase = *phase_rx.borrow_and_update();
        match phase {
            MonitorPhase::Shutdown => break,
            MonitorPhase::Standby => {
                if phase_rx.changed().await.is_err() {
                    break;
                }
            }
            MonitorPhase::Active => {
                match switch.is_pressed() {
                    Ok(pressed) => {
                        state.record_switch(end, pressed);
                        debug!(end = end.as_str(), pressed, "weight sample");
                    }
                    Err(error) => warn!(end = end.as_str(), %error, "weight read failed"),
                }

                tokio::select! {
                    _ = tokio::time::sleep(poll_interval) => {}
                    _ = phase_rx.changed() => {}
                }
            }
        }
    }

    if let Err(error) = switch.release() {
        warn!(end = end.as_str(), %error, "failed to release switch pin");
    }
    info!(end = end.as_str(), "weight worker stopped");
}

async fn alert_worker<P>(
    mut alert: P,
    state: Arc<SeatState>,
    mut phase_rx: watch::Receiver<MonitorPhase>,
    config: MonitorConfig,
) where
    P: AlertPort + Send + 'static,
{
    info!("alert worker started");
    let mut monitor = OccupancyMonitor::new(config.thresholds);

    loop {
        let phase = *phase_rx.borrow_and_update();
        match phase {
            MonitorPhase::Shutdown => break,
            MonitorPhase::Standby => {
                monitor.reset();
                if phase_rx.changed().await.is_err() {
                    break;
                }
            }
            MonitorPhase::Active => {
                let snapshot = state.snapshot();
                match monitor.observe(&snapshot) {
                    Some(OccupancyEvent::OccupantDetected) => {
                        info!(?snapshot, "occupant detected");
                    }
                    Some(OccupancyEvent::OccupantVanished) => {
                        warn!(?snapshot, "occupant vanished, reporting accident");
                        match alert.send_alert(ACCIDENT_MESSAGE).await {
                            Ok(()) => info!("accident report delivered"),
                            Err(error) => warn!(%error, "accident report failed"),
                        }
                    }
                    None => {}
                }

                tokio::select! {
                    _ = tokio::time::sleep(config.poll_interval) => {}
                    _ = phase_rx.changed() => {}
                }
            }
        }
    }

    info!("alert worker stopped");
}
