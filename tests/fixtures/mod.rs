//! Test fixtures for bme280-warden.
//!
//! Provides:
//! - `MockPort`: scripted HostPort implementation with a register map,
//!   fault injection and a virtual uptime clock
//! - register programming helpers for the datasheet reference device

#![allow(dead_code)]

use bme280_warden::HostPort;
use std::collections::HashSet;

// ============================================================================
// MockPort - Scripted Host Implementation
// ============================================================================

/// Scripted host port.
///
/// Backs the bus with a flat register map and drives time with a virtual
/// clock that only advances through `delay_ms`. The status register mimics
/// the real device: a forced-mode write to ctrl_meas arms the measuring bit
/// for a configurable number of status reads.
#[derive(Debug)]
pub struct MockPort {
    /// Register map
    pub regs: [u8; 256],

    /// Whether bus_select succeeds
    pub selectable: bool,

    /// Registers whose writes are rejected
    pub reject_writes: HashSet<u8>,

    /// Every write issued, in order
    pub writes: Vec<(u8, u8)>,

    /// Every delay issued, in order
    pub delays: Vec<u32>,

    /// Virtual uptime in milliseconds
    pub uptime: u64,

    /// Status reads that report "measuring" after each forced trigger
    pub measure_busy_reads: u32,

    /// Measuring bit stays set forever
    pub stuck_measuring: bool,

    /// NVM-copy bit stays set forever (reset never completes)
    pub stuck_im_update: bool,

    busy_reads_left: u32,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            selectable: true,
            reject_writes: HashSet::new(),
            writes: Vec::new(),
            delays: Vec::new(),
            uptime: 0,
            measure_busy_reads: 2,
            stuck_measuring: false,
            stuck_im_update: false,
            busy_reads_left: 0,
        }
    }

    /// Count writes of a particular register/value pair.
    pub fn write_count(&self, reg: u8, value: u8) -> usize {
        self.writes.iter().filter(|&&w| w == (reg, value)).count()
    }

    /// Count writes to a particular register, any value.
    pub fn writes_to(&self, reg: u8) -> usize {
        self.writes.iter().filter(|&&(r, _)| r == reg).count()
    }

    /// Forget recorded writes and delays.
    pub fn clear_logs(&mut self) {
        self.writes.clear();
        self.delays.clear();
    }
}

impl Default for MockPort {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPort for MockPort {
    fn bus_select(&mut self, bus: u8, addr: u8) -> bool {
        self.selectable && bus == 0 && (addr == 0x76 || addr == 0x77)
    }

    fn bus_read(&mut self, reg: u8) -> u8 {
        if reg == 0xF3 {
            let mut status = self.regs[0xF3];
            if self.stuck_measuring {
                status |= 0x08;
            } else if self.busy_reads_left > 0 {
                self.busy_reads_left -= 1;
                status |= 0x08;
            }
            if self.stuck_im_update {
                status |= 0x01;
            }
            return status;
        }
        self.regs[reg as usize]
    }

    fn bus_write(&mut self, reg: u8, value: u8) -> bool {
        self.writes.push((reg, value));
        if self.reject_writes.contains(&reg) {
            return false;
        }
        if reg == 0xF4 && value & 0x03 != 0 {
            // forced trigger: conversion runs for a few status reads
            self.busy_reads_left = self.measure_busy_reads;
        }
        self.regs[reg as usize] = value;
        true
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.uptime += ms as u64;
    }

    fn uptime_ms(&mut self) -> u64 {
        self.uptime
    }
}

// ============================================================================
// Reference Device Programming
// ============================================================================

/// Datasheet worked-example trim constants as register bytes, little-endian,
/// plus a typical humidity bank (H1=75, H2=353, H3=0, H4=340, H5=50, H6=30).
pub const CALIBRATION_REGS: &[(u8, u8)] = &[
    (0x88, 0x70), // dig_T1 = 27504
    (0x89, 0x6B),
    (0x8A, 0x43), // dig_T2 = 26435
    (0x8B, 0x67),
    (0x8C, 0x18), // dig_T3 = -1000
    (0x8D, 0xFC),
    (0x8E, 0x7D), // dig_P1 = 36477
    (0x8F, 0x8E),
    (0x90, 0x43), // dig_P2 = -10685
    (0x91, 0xD6),
    (0x92, 0xD0), // dig_P3 = 3024
    (0x93, 0x0B),
    (0x94, 0x27), // dig_P4 = 2855
    (0x95, 0x0B),
    (0x96, 0x8C), // dig_P5 = 140
    (0x97, 0x00),
    (0x98, 0xF9), // dig_P6 = -7
    (0x99, 0xFF),
    (0x9A, 0x8C), // dig_P7 = 15500
    (0x9B, 0x3C),
    (0x9C, 0xF8), // dig_P8 = -14600
    (0x9D, 0xC6),
    (0x9E, 0x70), // dig_P9 = 6000
    (0x9F, 0x17),
    (0xA1, 0x4B), // dig_H1 = 75
    (0xE1, 0x61), // dig_H2 = 353
    (0xE2, 0x01),
    (0xE3, 0x00), // dig_H3 = 0
    (0xE4, 0x15), // dig_H4 = 340, dig_H5 = 50 (nibble-packed)
    (0xE5, 0x24),
    (0xE6, 0x03),
    (0xE7, 0x1E), // dig_H6 = 30
];

/// Raw readout registers of the datasheet worked example:
/// adc_T = 519888, adc_P = 415148, adc_H = 32768.
pub const SAMPLE_REGS: &[(u8, u8)] = &[
    (0xF7, 0x65), // pressure 0x655AC0
    (0xF8, 0x5A),
    (0xF9, 0xC0),
    (0xFA, 0x7E), // temperature 0x7EED00
    (0xFB, 0xED),
    (0xFC, 0x00),
    (0xFD, 0x80), // humidity 0x8000
    (0xFE, 0x00),
];

/// A port programmed as a healthy reference device.
pub fn reference_port() -> MockPort {
    let mut port = MockPort::new();
    port.regs[0xD0] = 0x60; // chip id
    for &(reg, value) in CALIBRATION_REGS {
        port.regs[reg as usize] = value;
    }
    for &(reg, value) in SAMPLE_REGS {
        port.regs[reg as usize] = value;
    }
    port
}
