//! Sysfs adapter tests against a mock sysfs tree.
//!
//! The adapters are pointed at a temp directory shaped like the kernel
//! interface and the tests assert the exact literal strings written to
//! the control files.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use seatguard::adapters::{SysfsGpioSwitch, SysfsPwm};
use seatguard::ports::{PwmPort, SwitchError, SwitchPort};

fn gpio_tree(pin: u32) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join(format!("gpio{pin}"))).unwrap();
    root
}

fn pwm_tree(channel: u32) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join(format!("pwm{channel}"))).unwrap();
    root
}

#[test]
fn gpio_open_exports_and_sets_direction() {
    let root = gpio_tree(17);
    fs::write(root.path().join("gpio17/value"), "0").unwrap();

    let _switch = SysfsGpioSwitch::open_at(root.path(), 17).unwrap();

    assert_eq!(fs::read_to_string(root.path().join("export")).unwrap(), "17");
    assert_eq!(
        fs::read_to_string(root.path().join("gpio17/direction")).unwrap(),
        "in"
    );
}

#[test]
fn gpio_reads_switch_state() {
    let root = gpio_tree(22);
    let value = root.path().join("gpio22/value");

    fs::write(&value, "1").unwrap();
    let mut switch = SysfsGpioSwitch::open_at(root.path(), 22).unwrap();
    assert!(switch.is_pressed().unwrap());

    // the kernel appends a newline to value reads
    fs::write(&value, "0\n").unwrap();
    assert!(!switch.is_pressed().unwrap());
}

#[test]
fn gpio_rejects_garbage_value() {
    let root = gpio_tree(22);
    fs::write(root.path().join("gpio22/value"), "oops").unwrap();

    let mut switch = SysfsGpioSwitch::open_at(root.path(), 22).unwrap();
    match switch.is_pressed() {
        Err(SwitchError::InvalidValue { pin, value }) => {
            assert_eq!(pin, 22);
            assert_eq!(value, "oops");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn gpio_release_unexports_pin() {
    let root = gpio_tree(17);
    fs::write(root.path().join("gpio17/value"), "0").unwrap();

    let mut switch = SysfsGpioSwitch::open_at(root.path(), 17).unwrap();
    switch.release().unwrap();

    assert_eq!(
        fs::read_to_string(root.path().join("unexport")).unwrap(),
        "17"
    );

    // releasing twice must not rewrite the unexport file
    fs::write(root.path().join("unexport"), "").unwrap();
    switch.release().unwrap();
    assert_eq!(fs::read_to_string(root.path().join("unexport")).unwrap(), "");
}

#[test]
fn gpio_open_fails_without_sysfs_tree() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("no-such-gpio-root");

    assert!(SysfsGpioSwitch::open_at(&missing, 17).is_err());
}

#[test]
fn pwm_open_recycles_export() {
    let root = pwm_tree(0);

    let _pwm = SysfsPwm::open_at(root.path(), 0, Duration::ZERO).unwrap();

    // stale export cleared first, then re-exported
    assert_eq!(fs::read_to_string(root.path().join("unexport")).unwrap(), "0");
    assert_eq!(fs::read_to_string(root.path().join("export")).unwrap(), "0");
}

#[test]
fn pwm_writes_decimal_nanoseconds() {
    let root = pwm_tree(0);
    let mut pwm = SysfsPwm::open_at(root.path(), 0, Duration::ZERO).unwrap();

    pwm.set_period_ns(20_000_000).unwrap();
    pwm.set_duty_cycle_ns(750_000).unwrap();

    assert_eq!(
        fs::read_to_string(root.path().join("pwm0/period")).unwrap(),
        "20000000"
    );
    assert_eq!(
        fs::read_to_string(root.path().join("pwm0/duty_cycle")).unwrap(),
        "750000"
    );
}

#[test]
fn pwm_enable_disable() {
    let root = pwm_tree(1);
    let mut pwm = SysfsPwm::open_at(root.path(), 1, Duration::ZERO).unwrap();

    pwm.enable().unwrap();
    assert_eq!(
        fs::read_to_string(root.path().join("pwm1/enable")).unwrap(),
        "1"
    );

    pwm.disable().unwrap();
    assert_eq!(
        fs::read_to_string(root.path().join("pwm1/enable")).unwrap(),
        "0"
    );
}

#[test]
fn pwm_control_fails_without_channel_dir() {
    let root = TempDir::new().unwrap();
    // export succeeds against the mock tree, but the channel dir is missing
    let mut pwm = SysfsPwm::open_at(root.path(), 0, Duration::ZERO).unwrap();

    assert!(pwm.set_period_ns(20_000_000).is_err());
}
