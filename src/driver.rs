//! Lifecycle orchestration.
//!
//! `SensorDriver` owns every piece of driver-wide state - calibration,
//! snapshot, health, presence - and wires them to the host's callback
//! dispatch. One instance per physical sensor; the host constructs it once
//! and hands it a [`Callback`] at each lifecycle point.

use crate::bus::BusAccessor;
use crate::calibration::CalibrationRecord;
use crate::compensate::compensate;
use crate::config::SensorConfig;
use crate::error::DriverError;
use crate::health::{HealthState, RETRY_BACKOFF_MS, RETRY_COUNT};
use crate::measure::{self, RawSample};
use crate::port::HostPort;
use crate::registers::{
    CHIP_ID, POLL_STEP_MS, REG_CHIP_ID, REG_RESET, REG_STATUS, RESET_BUDGET_MS, RESET_COMMAND,
    RESET_SETTLE_MS, STATUS_IM_UPDATE,
};
use crate::telemetry::{self, MeasurementSnapshot};
use core::fmt;
use core::marker::PhantomData;

/// Detection state of the device.
///
/// Transitions happen only inside the driver. `Absent` is terminal until the
/// host restarts the driver; a different chip appearing at the address later
/// is never picked up automatically.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// Never detected, or detection failed
    Absent,

    /// Detected, but calibration is pending or invalid; not polled
    Unready,

    /// Calibration valid; polled periodically
    Ready,
}

/// Lifecycle invocation handed in by the host dispatch.
pub enum Callback<'a> {
    /// One-time setup: detect, reset, load calibration, first poll
    Init,

    /// Periodic tick; runs a poll cycle when the poll period has elapsed
    EveryPeriod,

    /// Append this sensor's fragment to the host's aggregate telemetry
    AppendTelemetry(&'a mut dyn fmt::Write),

    /// Write the main UI row
    #[cfg(feature = "web-ui")]
    RenderMainRow(&'a mut dyn fmt::Write),

    /// Write the summary UI row
    #[cfg(feature = "web-ui")]
    RenderSummaryRow(&'a mut dyn fmt::Write),
}

impl fmt::Debug for Callback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Callback::Init => "Init",
            Callback::EveryPeriod => "EveryPeriod",
            Callback::AppendTelemetry(_) => "AppendTelemetry",
            #[cfg(feature = "web-ui")]
            Callback::RenderMainRow(_) => "RenderMainRow",
            #[cfg(feature = "web-ui")]
            Callback::RenderSummaryRow(_) => "RenderSummaryRow",
        };
        f.write_str(name)
    }
}

/// Supervised driver for one sensor.
///
/// Generic over:
/// - `P`: HostPort implementation
/// - `C`: SensorConfig implementation
///
/// The driver presumes exclusive ownership of its bus/address pair; no
/// external mutual exclusion is assumed or enforced. All waits block the
/// calling context (worst case per poll: 3 attempts of up to 400 ms
/// conversion wait plus 60 ms backoffs) - a deliberate trade-off for hosts
/// that schedule cooperatively.
pub struct SensorDriver<P: HostPort, C: SensorConfig> {
    /// Host primitives
    port: P,

    /// Detection state
    presence: Presence,

    /// Factory trim constants, replaced wholesale on reinitialization
    calibration: CalibrationRecord,

    /// Published measurement state
    snapshot: MeasurementSnapshot,

    /// Failure counters and timestamps
    health: HealthState,

    /// Phantom data for the config type
    _config: PhantomData<C>,
}

impl<P: HostPort, C: SensorConfig> SensorDriver<P, C> {
    /// Create a driver that has not yet looked at the bus.
    pub fn new(port: P) -> Self {
        Self {
            port,
            presence: Presence::Absent,
            calibration: CalibrationRecord::default(),
            snapshot: MeasurementSnapshot::default(),
            health: HealthState::default(),
            _config: PhantomData,
        }
    }

    /// Dispatch one lifecycle invocation.
    ///
    /// Returns whether the invocation was handled: `Init` reports whether
    /// the chip was detected, `EveryPeriod` whether a poll cycle ran, the
    /// output callbacks whether text was produced. Never panics and never
    /// propagates an error to the host.
    pub fn handle(&mut self, callback: Callback<'_>) -> bool {
        match callback {
            Callback::Init => self.initialize(),
            Callback::EveryPeriod => self.tick(),
            Callback::AppendTelemetry(out) => self.append_telemetry(out),
            #[cfg(feature = "web-ui")]
            Callback::RenderMainRow(out) => self.render_main_row(out),
            #[cfg(feature = "web-ui")]
            Callback::RenderSummaryRow(out) => self.render_summary_row(out),
        }
    }

    /// Current detection state.
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Published measurement state.
    pub fn snapshot(&self) -> &MeasurementSnapshot {
        &self.snapshot
    }

    /// Failure counters and timestamps.
    pub fn health(&self) -> &HealthState {
        &self.health
    }

    /// Active calibration record.
    pub fn calibration(&self) -> &CalibrationRecord {
        &self.calibration
    }

    /// Mutable access to the host port (primarily for tests).
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Detect the chip and bring it to `Ready`.
    fn initialize(&mut self) -> bool {
        self.presence = Presence::Absent;
        self.calibration = CalibrationRecord::default();
        self.snapshot = MeasurementSnapshot::default();
        self.health = HealthState::default();

        let mut bus = BusAccessor::new(&mut self.port, C::BUS_INDEX, C::DEVICE_ADDR);
        if !bus.select() {
            return false;
        }
        let id = bus.read_byte(REG_CHIP_ID);
        if id != CHIP_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("{=str}: unexpected chip id {=u8:#x}", C::SENSOR_NAME, id);
            return false;
        }

        self.presence = Presence::Unready;
        if self.reinitialize().is_ok() {
            self.presence = Presence::Ready;
            // first reading straight away; periodic mode takes over after
            self.poll();
        }
        true
    }

    /// Soft-reset the sensor and reload calibration.
    ///
    /// On full success the calibration record is replaced and the failure
    /// streak cleared. On any failure the old record and the streak stand,
    /// so a supervisor that hit the threshold will try again next poll.
    fn reinitialize(&mut self) -> Result<(), DriverError> {
        let mut bus = BusAccessor::new(&mut self.port, C::BUS_INDEX, C::DEVICE_ADDR);
        if !bus.select() {
            return Err(DriverError::BusUnavailable);
        }
        if !bus.write_byte(REG_RESET, RESET_COMMAND) {
            return Err(DriverError::ResetTimeout);
        }
        bus.delay_ms(RESET_SETTLE_MS);
        if !bus.wait_clear(REG_STATUS, STATUS_IM_UPDATE, POLL_STEP_MS, RESET_BUDGET_MS) {
            return Err(DriverError::ResetTimeout);
        }
        let record = CalibrationRecord::load(&mut bus)?;

        self.calibration = record;
        self.health.fail_streak = 0;
        Ok(())
    }

    /// Periodic tick; polls when the period has elapsed.
    fn tick(&mut self) -> bool {
        if self.presence != Presence::Ready {
            return false;
        }
        let now = self.port.uptime_ms();
        if now.saturating_sub(self.health.last_poll_ms) < C::POLL_PERIOD_MS as u64 {
            return false;
        }
        self.poll();
        true
    }

    /// One supervised poll cycle: retries, accounting, reinitialization.
    fn poll(&mut self) {
        self.health.last_poll_ms = self.port.uptime_ms();

        let mut outcome: Result<RawSample, DriverError> = Err(DriverError::BusUnavailable);
        for attempt in 0..RETRY_COUNT {
            if attempt > 0 {
                self.port.delay_ms(RETRY_BACKOFF_MS);
            }
            let mut bus = BusAccessor::new(&mut self.port, C::BUS_INDEX, C::DEVICE_ADDR);
            outcome = measure::acquire(&mut bus);
            if outcome.is_ok() {
                break;
            }
        }

        match outcome {
            Ok(raw) => {
                let reading = compensate(&self.calibration, &raw);
                self.snapshot.publish(reading);
                let now = self.port.uptime_ms();
                self.health.record_success(now);
            }
            Err(_error) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "{=str}: poll failed at stage {=u8}",
                    C::SENSOR_NAME,
                    _error.measure_stage().unwrap_or(0)
                );
                if self.health.record_failure() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "{=str}: {=u8} consecutive failures, reinitializing",
                        C::SENSOR_NAME,
                        self.health.fail_streak
                    );
                    let _ = self.reinitialize();
                }
            }
        }
    }

    /// Append this sensor's telemetry fragment.
    fn append_telemetry(&mut self, out: &mut dyn fmt::Write) -> bool {
        if self.presence == Presence::Absent {
            return false;
        }
        let now = self.port.uptime_ms();
        let Ok(fragment) = telemetry::render_fragment(
            C::SENSOR_NAME,
            &self.snapshot,
            &self.health,
            now,
            C::POLL_PERIOD_MS,
        ) else {
            return false;
        };
        out.write_str(&fragment).is_ok()
    }

    #[cfg(feature = "web-ui")]
    fn render_main_row(&mut self, out: &mut dyn fmt::Write) -> bool {
        if self.presence == Presence::Absent {
            return false;
        }
        let Ok(row) = telemetry::render_main_row(C::SENSOR_NAME, &self.snapshot, &self.health)
        else {
            return false;
        };
        out.write_str(&row).is_ok()
    }

    #[cfg(feature = "web-ui")]
    fn render_summary_row(&mut self, out: &mut dyn fmt::Write) -> bool {
        if self.presence == Presence::Absent {
            return false;
        }
        let Ok(row) = telemetry::render_summary_row(C::SENSOR_NAME, &self.snapshot) else {
            return false;
        };
        out.write_str(&row).is_ok()
    }
}

impl<P: HostPort, C: SensorConfig> fmt::Debug for SensorDriver<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorDriver")
            .field("presence", &self.presence)
            .field("health", &self.health)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}
