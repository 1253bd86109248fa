//! Compile-time sensor configuration.
//!
//! The `SensorConfig` trait fixes the bus location and identity of the sensor
//! at build time without runtime overhead.

/// Sensor configuration trait defining bus location, name and poll cadence.
///
/// All values are const (zero runtime cost). None of them are
/// runtime-reconfigurable; a host that drives two sensors instantiates the
/// driver twice with two config types.
pub trait SensorConfig {
    /// Bus address of the device (default wiring: 0x76)
    const DEVICE_ADDR: u8;

    /// Index of the bus the device is attached to (default: 0)
    const BUS_INDEX: u8;

    /// Human-readable sensor name, used as the telemetry object key
    const SENSOR_NAME: &'static str;

    /// Poll period in milliseconds of host uptime (default: 10 000)
    const POLL_PERIOD_MS: u32;
}

/// Default configuration for the common SDO-low wiring.
///
/// - DEVICE_ADDR: 0x76
/// - BUS_INDEX: 0
/// - SENSOR_NAME: "BME280"
/// - POLL_PERIOD_MS: 10 000
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl SensorConfig for DefaultConfig {
    const DEVICE_ADDR: u8 = 0x76;
    const BUS_INDEX: u8 = 0;
    const SENSOR_NAME: &'static str = "BME280";
    const POLL_PERIOD_MS: u32 = 10_000;
}

/// Configuration for the alternate SDO-high wiring.
///
/// Same cadence as [`DefaultConfig`], device address 0x77.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AltAddressConfig;

impl SensorConfig for AltAddressConfig {
    const DEVICE_ADDR: u8 = 0x77;
    const BUS_INDEX: u8 = 0;
    const SENSOR_NAME: &'static str = "BME280";
    const POLL_PERIOD_MS: u32 = 10_000;
}
