//! # bme280-warden
//!
//! Self-supervising BME280 driver for cooperative, single-threaded embedded hosts.
//!
//! **Key features:**
//! - **Host-agnostic bus seam** - the host supplies device-select, byte read/write
//!   and timing primitives through one trait
//! - **Vendor-exact compensation** - Bosch reference fixed-point algorithm,
//!   bit for bit
//! - **Health supervision** - per-poll retries, failure counters, automatic
//!   soft-reset and calibration reload after sustained failure
//! - **Const configuration** - device address, bus index, sensor name and poll
//!   period fixed at compile time, zero runtime cost
//! - **Graceful telemetry** - explicit `no_data`/`Stale` reporting instead of
//!   silently stale numbers
//!
//! ## Optional Features
//!
//! - `web-ui` - main/summary UI row rendering for hosts with a web frontend
//! - `defmt` - fault diagnostics through `defmt`
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

#[cfg(feature = "defmt")]
extern crate defmt;

// ============================================================================
// Module Declarations
// ============================================================================

// Host seam & configuration
pub mod config;
pub mod port;

// Error handling
pub mod error;

// Protocol layers, leaves first
pub mod registers;

pub mod bus;
pub mod calibration;
pub mod compensate;
pub mod measure;

// Supervision & published state
pub mod health;
pub mod telemetry;

// Lifecycle orchestration
pub mod driver;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Host seam
pub use port::HostPort;

// Configuration
pub use config::{AltAddressConfig, DefaultConfig, SensorConfig};

// Error types
pub use error::DriverError;

// Protocol types
pub use bus::BusAccessor;
pub use calibration::CalibrationRecord;
pub use compensate::{Reading, compensate};
pub use measure::RawSample;

// Supervision & published state
pub use health::HealthState;
pub use telemetry::MeasurementSnapshot;

// Driver orchestration
pub use driver::{Callback, Presence, SensorDriver};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
