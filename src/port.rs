//! Host port abstraction for platform-agnostic bus and timing access.
//!
//! The `HostPort` trait bundles the primitives the host scheduler exposes to
//! the driver: device selection, single-byte register access, blocking delay
//! and an uptime clock. Implementations exist per platform (bit-banged bus,
//! hardware peripheral, test fixture, ...).

/// Platform-agnostic host primitives.
///
/// All calls are synchronous and block until the underlying transport
/// returns. The transport gives the driver no distinct error channel for
/// single-byte reads; a failed read returns 0 and higher layers must tell
/// "valid zero" from "failed read" with sanity checks.
pub trait HostPort {
    /// Address a device on a bus.
    ///
    /// Returns:
    /// - `true` if the bus is enabled and the address can be addressed
    /// - `false` otherwise (bus disabled, address NACKed, ...)
    fn bus_select(&mut self, bus: u8, addr: u8) -> bool;

    /// Read one byte from a register of the selected device.
    ///
    /// Returns 0 when the transfer fails; callers cannot distinguish this
    /// from a register that legitimately holds 0.
    fn bus_read(&mut self, reg: u8) -> u8;

    /// Write one byte to a register of the selected device.
    ///
    /// Returns `false` when the device rejects the transfer.
    fn bus_write(&mut self, reg: u8, value: u8) -> bool;

    /// Block the calling context for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Milliseconds of host uptime.
    fn uptime_ms(&mut self) -> u64;
}
