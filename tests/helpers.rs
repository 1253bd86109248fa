//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[path = "fixtures/mod.rs"]
mod fixtures;

use bme280_warden::{Callback, CalibrationRecord, DefaultConfig, SensorDriver};
use fixtures::MockPort;

/// Driver type under test.
pub type TestDriver = SensorDriver<MockPort, DefaultConfig>;

// ============================================================================
// Driver Creation Helpers
// ============================================================================

/// Create a driver over the reference device and run `Init`.
pub fn ready_driver() -> TestDriver {
    let mut driver = SensorDriver::new(fixtures::reference_port());
    assert!(driver.handle(Callback::Init));
    driver
}

/// Like [`ready_driver`], with the port adjusted before `Init` runs.
pub fn driver_with(adjust: impl FnOnce(&mut MockPort)) -> (TestDriver, bool) {
    let mut port = fixtures::reference_port();
    adjust(&mut port);
    let mut driver = SensorDriver::new(port);
    let handled = driver.handle(Callback::Init);
    (driver, handled)
}

// ============================================================================
// Poll Cycle Helpers
// ============================================================================

/// Jump the virtual clock to the next poll boundary and tick.
///
/// Returns whether the tick actually ran a poll cycle.
pub fn run_next_poll(driver: &mut TestDriver) -> bool {
    let due = driver.health().last_poll_ms + 10_000;
    let port = driver.port_mut();
    if port.uptime < due {
        port.uptime = due;
    }
    driver.handle(Callback::EveryPeriod)
}

// ============================================================================
// Reference Data
// ============================================================================

/// The record the reference device's registers decode to.
pub fn reference_calibration() -> CalibrationRecord {
    CalibrationRecord {
        dig_t1: 27504,
        dig_t2: 26435,
        dig_t3: -1000,
        dig_p1: 36477,
        dig_p2: -10685,
        dig_p3: 3024,
        dig_p4: 2855,
        dig_p5: 140,
        dig_p6: -7,
        dig_p7: 15500,
        dig_p8: -14600,
        dig_p9: 6000,
        dig_h1: 75,
        dig_h2: 353,
        dig_h3: 0,
        dig_h4: 340,
        dig_h5: 50,
        dig_h6: 30,
    }
}
