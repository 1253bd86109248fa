//! Forced-measurement sequencer.
//!
//! One call drives a complete single-shot conversion: trigger, wait for the
//! measuring bit to clear, read the raw registers. Each stage failure maps to
//! its own [`DriverError`]; see [`DriverError::measure_stage`] for the
//! diagnostic stage codes.

use crate::bus::BusAccessor;
use crate::error::DriverError;
use crate::port::HostPort;
use crate::registers::{
    MEASURE_BUDGET_MS, MODE_FORCED, OVERSAMPLE_X1, POLL_STEP_MS, REG_CTRL_HUM, REG_CTRL_MEAS,
    REG_HUM_MSB, REG_PRESS_MSB, REG_STATUS, REG_TEMP_MSB, STATUS_MEASURING,
};

/// Raw ADC words of one successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 20-bit temperature word
    pub adc_t: i32,
    /// 20-bit pressure word
    pub adc_p: i32,
    /// 16-bit humidity word
    pub adc_h: i32,
}

/// Run one forced conversion and read the raw registers.
///
/// Blocks the calling context for the conversion wait (2 ms poll steps, up
/// to 400 ms). No internal retry; the caller owns retry policy.
pub fn acquire<P: HostPort>(bus: &mut BusAccessor<'_, P>) -> Result<RawSample, DriverError> {
    if !bus.select() {
        return Err(DriverError::BusUnavailable);
    }

    // Trigger. ctrl_hum only latches on the following ctrl_meas write, so
    // the order of these two matters.
    if !bus.write_byte(REG_CTRL_HUM, OVERSAMPLE_X1) {
        return Err(DriverError::TriggerWriteFailed);
    }
    let ctrl_meas = (OVERSAMPLE_X1 << 5) | (OVERSAMPLE_X1 << 2) | MODE_FORCED;
    if !bus.write_byte(REG_CTRL_MEAS, ctrl_meas) {
        return Err(DriverError::TriggerWriteFailed);
    }

    // Wait for the conversion to complete.
    if !bus.wait_clear(REG_STATUS, STATUS_MEASURING, POLL_STEP_MS, MEASURE_BUDGET_MS) {
        return Err(DriverError::MeasurementTimeout);
    }

    // Readout. An all-zero 24-bit word is what a dead transfer produces; a
    // physically valid conversion never reads as exactly zero.
    let raw_p = bus.read_triple(REG_PRESS_MSB);
    let raw_t = bus.read_triple(REG_TEMP_MSB);
    if raw_p == 0 || raw_t == 0 {
        return Err(DriverError::RawSanityFailure);
    }
    let adc_h = ((bus.read_byte(REG_HUM_MSB) as i32) << 8) | bus.read_byte(REG_HUM_MSB + 1) as i32;

    Ok(RawSample {
        adc_t: (raw_t >> 4) as i32,
        adc_p: (raw_p >> 4) as i32,
        adc_h,
    })
}
