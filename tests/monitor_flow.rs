//! End-to-end monitor tests with mock sensor ports and loopback TCP.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use seatguard::adapters::TcpAlert;
use seatguard::monitor::{self, Monitor, MonitorConfig};
use seatguard::ports::{AdcError, AdcPort, AlertError, AlertPort, SwitchError, SwitchPort};

const POLL: Duration = Duration::from_millis(10);

/// Shared handles standing in for the physical seat.
#[derive(Clone, Default)]
struct Bench {
    left: Arc<AtomicU16>,
    right: Arc<AtomicU16>,
    front: Arc<AtomicBool>,
    back: Arc<AtomicBool>,
}

impl Bench {
    fn occupy(&self) {
        self.left.store(200, Ordering::Relaxed);
        self.front.store(true, Ordering::Relaxed);
    }

    fn vacate(&self) {
        self.left.store(0, Ordering::Relaxed);
        self.right.store(0, Ordering::Relaxed);
        self.front.store(false, Ordering::Relaxed);
        self.back.store(false, Ordering::Relaxed);
    }
}

struct FakeAdc {
    left: Arc<AtomicU16>,
    right: Arc<AtomicU16>,
}

impl AdcPort for FakeAdc {
    fn read_channel(&mut self, channel: u8) -> Result<u16, AdcError> {
        match channel {
            3 => Ok(self.left.load(Ordering::Relaxed)),
            4 => Ok(self.right.load(Ordering::Relaxed)),
            other => Err(AdcError::InvalidChannel(other)),
        }
    }
}

struct FakeSwitch {
    pressed: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl SwitchPort for FakeSwitch {
    fn is_pressed(&mut self) -> Result<bool, SwitchError> {
        Ok(self.pressed.load(Ordering::Relaxed))
    }

    fn release(&mut self) -> Result<(), SwitchError> {
        self.released.store(true, Ordering::Relaxed);
        Ok(())
    }
}

fn fake_sensors(bench: &Bench) -> (FakeAdc, FakeSwitch, FakeSwitch, Arc<AtomicBool>, Arc<AtomicBool>) {
    let front_released = Arc::new(AtomicBool::new(false));
    let back_released = Arc::new(AtomicBool::new(false));
    let adc = FakeAdc {
        left: Arc::clone(&bench.left),
        right: Arc::clone(&bench.right),
    };
    let front = FakeSwitch {
        pressed: Arc::clone(&bench.front),
        released: Arc::clone(&front_released),
    };
    let back = FakeSwitch {
        pressed: Arc::clone(&bench.back),
        released: Arc::clone(&back_released),
    };
    (adc, front, back, front_released, back_released)
}

fn test_config() -> MonitorConfig {
    MonitorConfig {
        poll_interval: POLL,
        ..MonitorConfig::default()
    }
}

/// Report server capturing every payload delivered to it.
async fn spawn_report_server() -> (SocketAddr, mpsc::UnboundedReceiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut payload = Vec::new();
                if stream.read_to_end(&mut payload).await.is_ok() {
                    let _ = tx.send(payload);
                }
            });
        }
    });

    (addr, rx)
}

#[tokio::test]
async fn accident_reported_once_when_occupant_vanishes() {
    let bench = Bench::default();
    let (adc, front, back, front_released, back_released) = fake_sensors(&bench);
    let (report_addr, mut reports) = spawn_report_server().await;

    let control_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let control_addr = control_listener.local_addr().unwrap();

    let monitor = Monitor::spawn(adc, front, back, TcpAlert::new(report_addr), test_config());

    let server = monitor::run_control_server(control_listener, &monitor);
    let driver = async {
        let mut client = TcpStream::connect(control_addr).await.unwrap();
        client.write_all(b"1").await.unwrap();
        sleep(POLL * 5).await;

        bench.occupy();
        sleep(POLL * 10).await;
        bench.vacate();

        let payload = timeout(Duration::from_secs(5), reports.recv())
            .await
            .expect("no report within timeout")
            .expect("report server closed");
        assert_eq!(payload, b"accident");

        // sustained vacancy must not re-report
        sleep(POLL * 20).await;
        assert!(reports.try_recv().is_err());

        client.shutdown().await.unwrap();
    };

    let (server_result, ()) = tokio::join!(server, driver);
    server_result.unwrap();

    monitor.shutdown().await;
    assert!(front_released.load(Ordering::Relaxed));
    assert!(back_released.load(Ordering::Relaxed));
}

#[tokio::test]
async fn deactivation_discards_tracked_occupant() {
    let bench = Bench::default();
    let (adc, front, back, _, _) = fake_sensors(&bench);
    let (report_addr, mut reports) = spawn_report_server().await;

    let monitor = Monitor::spawn(adc, front, back, TcpAlert::new(report_addr), test_config());

    monitor.activate();
    bench.occupy();
    sleep(POLL * 10).await;

    // controller disarms while the occupant is still seated
    monitor.standby();
    bench.vacate();
    sleep(POLL * 5).await;

    // rearming over an already-vacant seat is not an incident
    monitor.activate();
    sleep(POLL * 20).await;
    assert!(reports.try_recv().is_err());

    monitor.shutdown().await;
}

#[tokio::test]
async fn standby_parks_sensor_polling() {
    let bench = Bench::default();
    let (adc, front, back, _, _) = fake_sensors(&bench);
    let (report_addr, _reports) = spawn_report_server().await;

    let monitor = Monitor::spawn(adc, front, back, TcpAlert::new(report_addr), test_config());
    let state = monitor.state();

    // never activated: sensor values must not reach the shared state
    bench.occupy();
    sleep(POLL * 10).await;
    assert_eq!(state.snapshot(), seatguard::SeatSnapshot::VACANT);

    monitor.shutdown().await;
}

struct FailingAlert {
    calls: Arc<AtomicUsize>,
}

impl AlertPort for FailingAlert {
    async fn send_alert(&mut self, _message: &[u8]) -> Result<(), AlertError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(AlertError::Send(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "report server down",
        )))
    }
}

#[tokio::test]
async fn failed_delivery_keeps_monitor_running() {
    let bench = Bench::default();
    let (adc, front, back, _, _) = fake_sensors(&bench);
    let calls = Arc::new(AtomicUsize::new(0));
    let alert = FailingAlert {
        calls: Arc::clone(&calls),
    };

    let monitor = Monitor::spawn(adc, front, back, alert, test_config());
    monitor.activate();

    for _ in 0..2 {
        bench.occupy();
        sleep(POLL * 10).await;
        bench.vacate();
        sleep(POLL * 10).await;
    }

    // one failed attempt per incident, and the workers survived the first
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    monitor.shutdown().await;
}
