//! Factory calibration: loading, unpacking and sanity validation.
//!
//! Every BME280 leaves the factory with per-device trim constants burned into
//! a pair of register banks. The compensation math is meaningless without
//! them, so the record is loaded once at initialization, validated, and
//! replaced wholesale whenever the sensor is reinitialized.

use crate::bus::BusAccessor;
use crate::error::DriverError;
use crate::port::HostPort;
use crate::registers::{
    REG_DIG_H1, REG_DIG_H2, REG_DIG_H3, REG_DIG_H4, REG_DIG_H6, REG_DIG_P1, REG_DIG_P2,
    REG_DIG_T1, REG_DIG_T2, REG_DIG_T3,
};

/// Factory trim constants of one device.
///
/// Immutable once loaded; never partially updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRecord {
    /// Temperature coefficient 1
    pub dig_t1: u16,
    /// Temperature coefficient 2
    pub dig_t2: i16,
    /// Temperature coefficient 3
    pub dig_t3: i16,
    /// Pressure coefficient 1
    pub dig_p1: u16,
    /// Pressure coefficient 2
    pub dig_p2: i16,
    /// Pressure coefficient 3
    pub dig_p3: i16,
    /// Pressure coefficient 4
    pub dig_p4: i16,
    /// Pressure coefficient 5
    pub dig_p5: i16,
    /// Pressure coefficient 6
    pub dig_p6: i16,
    /// Pressure coefficient 7
    pub dig_p7: i16,
    /// Pressure coefficient 8
    pub dig_p8: i16,
    /// Pressure coefficient 9
    pub dig_p9: i16,
    /// Humidity coefficient 1
    pub dig_h1: u8,
    /// Humidity coefficient 2
    pub dig_h2: i16,
    /// Humidity coefficient 3
    pub dig_h3: u8,
    /// Humidity coefficient 4 (nibble-packed on the wire)
    pub dig_h4: i16,
    /// Humidity coefficient 5 (nibble-packed on the wire)
    pub dig_h5: i16,
    /// Humidity coefficient 6
    pub dig_h6: i8,
}

impl CalibrationRecord {
    /// Read the full trim record from the device.
    ///
    /// Uses only short single/dual-byte reads. Returns
    /// [`DriverError::CalibrationInvalid`] when the loaded record fails the
    /// sanity check.
    pub fn load<P: HostPort>(bus: &mut BusAccessor<'_, P>) -> Result<Self, DriverError> {
        let e4 = bus.read_byte(REG_DIG_H4);
        let e5 = bus.read_byte(REG_DIG_H4 + 1);
        let e6 = bus.read_byte(REG_DIG_H4 + 2);
        let (dig_h4, dig_h5) = unpack_h4_h5(e4, e5, e6);

        let record = Self {
            dig_t1: bus.read_word_le(REG_DIG_T1),
            dig_t2: bus.read_signed_word_le(REG_DIG_T2),
            dig_t3: bus.read_signed_word_le(REG_DIG_T3),
            dig_p1: bus.read_word_le(REG_DIG_P1),
            dig_p2: bus.read_signed_word_le(REG_DIG_P2),
            dig_p3: bus.read_signed_word_le(REG_DIG_P2 + 2),
            dig_p4: bus.read_signed_word_le(REG_DIG_P2 + 4),
            dig_p5: bus.read_signed_word_le(REG_DIG_P2 + 6),
            dig_p6: bus.read_signed_word_le(REG_DIG_P2 + 8),
            dig_p7: bus.read_signed_word_le(REG_DIG_P2 + 10),
            dig_p8: bus.read_signed_word_le(REG_DIG_P2 + 12),
            dig_p9: bus.read_signed_word_le(REG_DIG_P2 + 14),
            dig_h1: bus.read_byte(REG_DIG_H1),
            dig_h2: bus.read_signed_word_le(REG_DIG_H2),
            dig_h3: bus.read_byte(REG_DIG_H3),
            dig_h4,
            dig_h5,
            dig_h6: bus.read_byte(REG_DIG_H6) as i8,
        };

        if record.is_plausible() {
            Ok(record)
        } else {
            Err(DriverError::CalibrationInvalid)
        }
    }

    /// Sanity check on the primary coefficients.
    ///
    /// dig_T1 and dig_P1 must each be neither all-zero nor all-ones; either
    /// pattern is what a failed read or blank NVM produces, never a factory
    /// trim value.
    pub fn is_plausible(&self) -> bool {
        coefficient_ok(self.dig_t1) && coefficient_ok(self.dig_p1)
    }
}

fn coefficient_ok(word: u16) -> bool {
    word != 0x0000 && word != 0xFFFF
}

/// Unpack the dig_H4/dig_H5 pair from its three nibble-interleaved bytes.
///
/// `H4 = (e4 << 4) | (e5 & 0x0F)`, `H5 = (e6 << 4) | (e5 >> 4)`.
fn unpack_h4_h5(e4: u8, e5: u8, e6: u8) -> (i16, i16) {
    let h4 = ((e4 as i16) << 4) | ((e5 & 0x0F) as i16);
    let h5 = ((e6 as i16) << 4) | ((e5 >> 4) as i16);
    (h4, h5)
}
