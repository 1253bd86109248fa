//! Published measurement state and its rendered forms.
//!
//! The snapshot is the driver's only output: the telemetry fragment the host
//! splices into its aggregate JSON payload, and (with the `web-ui` feature)
//! the human-readable UI rows.

use crate::compensate::Reading;
use crate::health::HealthState;
use core::fmt::{self, Write};

/// Capacity of a rendered telemetry fragment.
pub const FRAGMENT_CAPACITY: usize = 192;

/// A rendered JSON telemetry fragment.
pub type TelemetryFragment = heapless::String<FRAGMENT_CAPACITY>;

/// Capacity of a rendered UI row.
#[cfg(feature = "web-ui")]
pub const ROW_CAPACITY: usize = 96;

/// A rendered UI text row.
#[cfg(feature = "web-ui")]
pub type UiRow = heapless::String<ROW_CAPACITY>;

/// The published measurement state.
///
/// Each field is either a valid reading or "no data". The snapshot is only
/// ever replaced wholesale: a successful poll sets all three fields, a
/// failed one leaves all three untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementSnapshot {
    /// Temperature in degrees Celsius
    pub temperature: Option<f32>,
    /// Relative humidity in percent
    pub humidity: Option<f32>,
    /// Barometric pressure in hPa
    pub pressure: Option<f32>,
}

impl MeasurementSnapshot {
    /// Whether the snapshot holds a complete reading.
    pub fn has_data(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some() && self.pressure.is_some()
    }

    pub(crate) fn publish(&mut self, reading: Reading) {
        self.temperature = Some(reading.temperature);
        self.humidity = Some(reading.humidity);
        self.pressure = Some(reading.pressure);
    }
}

/// Render the telemetry fragment for one sensor.
///
/// The fragment is a bare `"<name>":{...}` member for the host's aggregate
/// object - no separators on either side. With data present it carries the
/// three values and the `Stale` flag; without data it degrades to the
/// failure counters and an explicit `no_data` error marker instead of
/// disappearing or repeating stale numbers.
///
/// Assembled into an owned buffer first so a capacity overflow never leaves
/// a torn fragment in the host payload.
pub(crate) fn render_fragment(
    name: &str,
    snapshot: &MeasurementSnapshot,
    health: &HealthState,
    now_ms: u64,
    period_ms: u32,
) -> Result<TelemetryFragment, fmt::Error> {
    let mut out = TelemetryFragment::new();
    match (snapshot.temperature, snapshot.humidity, snapshot.pressure) {
        (Some(t), Some(h), Some(p)) => {
            let stale = if health.is_stale(now_ms, period_ms) { 1 } else { 0 };
            write!(
                out,
                "\"{}\":{{\"Temperature\":{:.1},\"Humidity\":{:.1},\"Pressure\":{:.1},\"Stale\":{}}}",
                name, t, h, p, stale
            )?;
        }
        _ => {
            write!(
                out,
                "\"{}\":{{\"FailStreak\":{},\"FailTotal\":{},\"Error\":\"no_data\"}}",
                name, health.fail_streak, health.fail_total
            )?;
        }
    }
    Ok(out)
}

/// Render the main UI row: name plus all three values.
#[cfg(feature = "web-ui")]
pub(crate) fn render_main_row(
    name: &str,
    snapshot: &MeasurementSnapshot,
    health: &HealthState,
) -> Result<UiRow, fmt::Error> {
    let mut out = UiRow::new();
    match (snapshot.temperature, snapshot.humidity, snapshot.pressure) {
        (Some(t), Some(h), Some(p)) => {
            write!(out, "{}: {:.1} °C, {:.1} %RH, {:.1} hPa", name, t, h, p)?;
        }
        _ => {
            write!(out, "{}: no data (failed {} polls)", name, health.fail_streak)?;
        }
    }
    Ok(out)
}

/// Render the summary UI row: name plus temperature.
#[cfg(feature = "web-ui")]
pub(crate) fn render_summary_row(
    name: &str,
    snapshot: &MeasurementSnapshot,
) -> Result<UiRow, fmt::Error> {
    let mut out = UiRow::new();
    match snapshot.temperature {
        Some(t) => write!(out, "{}: {:.1} °C", name, t)?,
        None => write!(out, "{}: no data", name)?,
    }
    Ok(out)
}
