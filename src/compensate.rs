//! Compensation engine: raw ADC words to physical units.
//!
//! Bosch's reference fixed-point algorithm, reproduced bit for bit - i32
//! arithmetic for temperature and humidity, i64 for pressure, floating point
//! only in the final scale-down. The shift amounts, operand order and clamp
//! bounds are part of the device's certified calibration; do not "simplify"
//! them.

use crate::calibration::CalibrationRecord;
use crate::measure::RawSample;

/// One compensated reading in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub temperature: f32,
    /// Relative humidity in percent
    pub humidity: f32,
    /// Barometric pressure in hPa
    pub pressure: f32,
}

/// Convert one raw sample to physical units. Pure; no I/O.
pub fn compensate(cal: &CalibrationRecord, raw: &RawSample) -> Reading {
    let (t_fine, temperature) = compensate_temperature(cal, raw.adc_t);
    Reading {
        temperature,
        humidity: compensate_humidity(cal, raw.adc_h, t_fine),
        pressure: compensate_pressure(cal, raw.adc_p, t_fine),
    }
}

/// Two-term temperature correction.
///
/// Returns `t_fine`, the fixed-point temperature proxy both other
/// conversions need, together with the temperature in degrees Celsius.
fn compensate_temperature(cal: &CalibrationRecord, adc_t: i32) -> (i32, f32) {
    let var1 = (((adc_t >> 3) - ((cal.dig_t1 as i32) << 1)) * (cal.dig_t2 as i32)) >> 11;
    let d = (adc_t >> 4) - (cal.dig_t1 as i32);
    let var2 = (((d * d) >> 12) * (cal.dig_t3 as i32)) >> 14;
    let t_fine = var1 + var2;
    (t_fine, (((t_fine * 5 + 128) >> 8) as f32) / 100.0)
}

/// Nine-term 64-bit pressure polynomial. Result in hPa.
fn compensate_pressure(cal: &CalibrationRecord, adc_p: i32, t_fine: i32) -> f32 {
    let mut var1 = (t_fine as i64) - 128_000;
    let mut var2 = var1 * var1 * (cal.dig_p6 as i64);
    var2 += (var1 * (cal.dig_p5 as i64)) << 17;
    var2 += (cal.dig_p4 as i64) << 35;
    var1 = ((var1 * var1 * (cal.dig_p3 as i64)) >> 8) + ((var1 * (cal.dig_p2 as i64)) << 12);
    var1 = (((1i64 << 47) + var1) * (cal.dig_p1 as i64)) >> 33;
    if var1 == 0 {
        // degenerate trim; the division below would fault
        return 0.0;
    }
    let mut p = 1_048_576 - (adc_p as i64);
    p = (((p << 31) - var2) * 3125) / var1;
    var1 = ((cal.dig_p9 as i64) * (p >> 13) * (p >> 13)) >> 25;
    var2 = ((cal.dig_p8 as i64) * p) >> 19;
    p = ((p + var1 + var2) >> 8) + ((cal.dig_p7 as i64) << 4);
    // p is Q24.8 pascal
    (p as f32) / 256.0 / 100.0
}

/// Nested humidity polynomial. Result in percent relative humidity.
fn compensate_humidity(cal: &CalibrationRecord, adc_h: i32, t_fine: i32) -> f32 {
    let v = t_fine - 76_800;
    let mut v = ((((adc_h << 14) - ((cal.dig_h4 as i32) << 20) - ((cal.dig_h5 as i32) * v))
        + 16_384)
        >> 15)
        * (((((((v * (cal.dig_h6 as i32)) >> 10) * (((v * (cal.dig_h3 as i32)) >> 11) + 32_768))
            >> 10)
            + 2_097_152)
            * (cal.dig_h2 as i32)
            + 8_192)
            >> 14);
    v -= ((((v >> 15) * (v >> 15)) >> 7) * (cal.dig_h1 as i32)) >> 4;
    v = v.clamp(0, 419_430_400);
    ((v >> 12) as f32) / 1024.0
}
