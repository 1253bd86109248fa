//! BME280 register map, control values and protocol timing.
//!
//! Addresses and bit positions follow the Bosch BME280 datasheet.

/// Chip identification register
pub const REG_CHIP_ID: u8 = 0xD0;
/// Identification byte of a BME280
pub const CHIP_ID: u8 = 0x60;

/// Soft-reset register
pub const REG_RESET: u8 = 0xE0;
/// Soft-reset command word
pub const RESET_COMMAND: u8 = 0xB6;

/// Humidity oversampling control register
pub const REG_CTRL_HUM: u8 = 0xF2;
/// Status register
pub const REG_STATUS: u8 = 0xF3;
/// Temperature/pressure oversampling and mode control register
pub const REG_CTRL_MEAS: u8 = 0xF4;

/// Status bit: conversion in progress
pub const STATUS_MEASURING: u8 = 0x08;
/// Status bit: NVM copy in progress (set while a reset settles)
pub const STATUS_IM_UPDATE: u8 = 0x01;

/// First byte of the 3-byte pressure readout (MSB)
pub const REG_PRESS_MSB: u8 = 0xF7;
/// First byte of the 3-byte temperature readout (MSB)
pub const REG_TEMP_MSB: u8 = 0xFA;
/// First byte of the 2-byte humidity readout (MSB)
pub const REG_HUM_MSB: u8 = 0xFD;

// Calibration bank, low block (temperature + pressure, little-endian words)

/// dig_T1, unsigned word
pub const REG_DIG_T1: u8 = 0x88;
/// dig_T2, signed word
pub const REG_DIG_T2: u8 = 0x8A;
/// dig_T3, signed word
pub const REG_DIG_T3: u8 = 0x8C;
/// dig_P1, unsigned word
pub const REG_DIG_P1: u8 = 0x8E;
/// dig_P2..dig_P9, signed words at consecutive even offsets
pub const REG_DIG_P2: u8 = 0x90;

// Calibration bank, high block (humidity)

/// dig_H1, unsigned byte
pub const REG_DIG_H1: u8 = 0xA1;
/// dig_H2, signed word
pub const REG_DIG_H2: u8 = 0xE1;
/// dig_H3, unsigned byte
pub const REG_DIG_H3: u8 = 0xE3;
/// First of the three bytes holding the nibble-packed dig_H4/dig_H5 pair
pub const REG_DIG_H4: u8 = 0xE4;
/// dig_H6, signed byte
pub const REG_DIG_H6: u8 = 0xE7;

// Control values

/// Oversampling x1, the lowest non-zero setting
pub const OVERSAMPLE_X1: u8 = 0x01;
/// Forced-mode bits of ctrl_meas
pub const MODE_FORCED: u8 = 0x01;

// Protocol timing

/// Step between status polls while a conversion or reset settles
pub const POLL_STEP_MS: u32 = 2;
/// Ceiling on the conversion wait
pub const MEASURE_BUDGET_MS: u32 = 400;
/// Settle time between the reset command and the first status poll
pub const RESET_SETTLE_MS: u32 = 2;
/// Ceiling on the reset-complete wait
pub const RESET_BUDGET_MS: u32 = 250;
