//! Collaborator contracts
//!
//! The console drives the radio only through these traits. The HAL that
//! implements them owns the hardware; the console owns the sequencing.

use core::fmt;

use crate::session::scan::ScanSink;
use crate::types::{BtSettings, RadioStack};

/// Primitive radio test operations
///
/// Every call is expected to succeed or to fail safe inside the HAL.
pub trait RadioTestDriver {
    /// Resume the default discoverable broadcast
    fn start_advertising(&mut self);

    /// Suspend advertising so a test can own the radio
    fn stop_advertising(&mut self);

    /// Emit an unmodulated carrier on `channel` at radio power code `power`
    fn start_tone_tx(&mut self, channel: u8, power: u8);

    /// Stop the carrier
    fn stop_tone_tx(&mut self);

    /// Start the packet receiver on `channel` at `datarate` Mbit/s
    fn start_packet_rx(&mut self, channel: u8, datarate: u8);

    /// Start transmitting `pattern` packets on `channel` at `datarate` Mbit/s
    fn start_packet_tx(&mut self, channel: u8, pattern: u8, datarate: u8);

    /// Stop any packet test; returns the number of packets received
    fn stop_packet_test(&mut self) -> u16;

    /// Current received signal strength in dB
    fn get_rssi(&mut self) -> f32;

    /// Packets sent by the last transmit test
    fn get_transmitted_packets(&mut self) -> u32;

    /// Start passive scanning
    ///
    /// The scan callback delivers each discovered device from the radio's
    /// event context with [`ScanSink::push`], which bounds the wait for
    /// room in the queue, until [`stop_scan`](Self::stop_scan) returns.
    fn start_scan(&mut self, sink: ScanSink);

    /// Stop scanning; the sink must not be used afterwards
    fn stop_scan(&mut self);

    /// Write a human-readable dump of the radio state
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    fn dump_state(&mut self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Runtime mode predicates
///
/// Queried on every dispatch, never cached.
pub trait SystemModes {
    /// Debug flag set in the RTC backup register
    fn debug_enabled(&self) -> bool;

    /// Stack currently running on the radio coprocessor
    fn radio_stack(&self) -> RadioStack;

    /// Both predicates that unlock the RF test commands
    fn rf_tests_unlocked(&self) -> bool {
        self.debug_enabled() && self.radio_stack() == RadioStack::HciLayer
    }
}

/// Read access to persisted Bluetooth settings
pub trait SettingsStore {
    /// Load the settings; a missing or corrupt record yields defaults
    fn load(&mut self) -> BtSettings;
}
