//! Test doubles shared by the integration tests
//!
//! A recording radio driver, a virtual-time delay and a scripted
//! interrupt source.

#![allow(dead_code)]

use std::fmt;
use std::thread;
use std::time::Duration;

use bt_test_console::cancel::Interrupt;
use bt_test_console::driver::{RadioTestDriver, SettingsStore, SystemModes};
use bt_test_console::session::scan::{ScanQueue, ScanSink};
use bt_test_console::types::{BtSettings, MacAddress, RadioStack, ScanEvent};
use embedded_hal::delay::DelayNs;

/// One call received by [`RecordingDriver`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Call {
    StartAdvertising,
    StopAdvertising,
    StartToneTx(u8, u8),
    StopToneTx,
    StartPacketRx(u8, u8),
    StartPacketTx(u8, u8, u8),
    StopPacketTest,
    GetRssi,
    GetTransmittedPackets,
    StartScan,
    StopScan,
    DumpState,
}

impl Call {
    /// Calls that put the radio into a test mode
    pub fn is_test_start(self) -> bool {
        matches!(
            self,
            Self::StartToneTx(..) | Self::StartPacketRx(..) | Self::StartPacketTx(..) | Self::StartScan
        )
    }
}

/// Driver stub that records every call in order
#[derive(Default)]
pub struct RecordingDriver {
    pub calls: Vec<Call>,
    pub rssi: f32,
    pub packets_received: u16,
    pub packets_transmitted: u32,
    /// Delivered synchronously from `start_scan`
    pub scan_script: Vec<ScanEvent>,
    /// Delivered from a separate thread with a real-time sink timeout
    pub scan_flood: Option<Vec<ScanEvent>>,
    pub flood_thread: Option<thread::JoinHandle<u32>>,
    pub sink: Option<ScanSink>,
    /// Time the scan callback spent waiting for queue room
    pub callback_delay: FakeDelay,
    pub state_dump: &'static str,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            rssi: -70.5,
            state_dump: "Core2: FUS: 1.2.0\r\n",
            ..Self::default()
        }
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn started_any_test(&self) -> bool {
        self.calls.iter().any(|c| c.is_test_start())
    }
}

impl RadioTestDriver for RecordingDriver {
    fn start_advertising(&mut self) {
        self.calls.push(Call::StartAdvertising);
    }

    fn stop_advertising(&mut self) {
        self.calls.push(Call::StopAdvertising);
    }

    fn start_tone_tx(&mut self, channel: u8, power: u8) {
        self.calls.push(Call::StartToneTx(channel, power));
    }

    fn stop_tone_tx(&mut self) {
        self.calls.push(Call::StopToneTx);
    }

    fn start_packet_rx(&mut self, channel: u8, datarate: u8) {
        self.calls.push(Call::StartPacketRx(channel, datarate));
    }

    fn start_packet_tx(&mut self, channel: u8, pattern: u8, datarate: u8) {
        self.calls.push(Call::StartPacketTx(channel, pattern, datarate));
    }

    fn stop_packet_test(&mut self) -> u16 {
        self.calls.push(Call::StopPacketTest);
        self.packets_received
    }

    fn get_rssi(&mut self) -> f32 {
        self.calls.push(Call::GetRssi);
        self.rssi
    }

    fn get_transmitted_packets(&mut self) -> u32 {
        self.calls.push(Call::GetTransmittedPackets);
        self.packets_transmitted
    }

    fn start_scan(&mut self, sink: ScanSink) {
        self.calls.push(Call::StartScan);
        for event in &self.scan_script {
            sink.push(*event, &mut self.callback_delay);
        }
        if let Some(events) = self.scan_flood.take() {
            self.flood_thread = Some(thread::spawn(move || {
                // Virtual time keeps a full queue from stalling the test
                let mut delay = FakeDelay::default();
                events
                    .into_iter()
                    .filter(|event| sink.push(*event, &mut delay))
                    .count() as u32
            }));
        }
        self.sink = Some(sink);
    }

    fn stop_scan(&mut self) {
        self.calls.push(Call::StopScan);
        self.sink = None;
    }

    fn dump_state(&mut self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.calls.push(Call::DumpState);
        out.write_str(self.state_dump)
    }
}

/// Delay that only advances a virtual clock
#[derive(Default, Debug)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl FakeDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

/// Delay backed by the OS scheduler
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Fires on the `after`-th check, counting from one
pub struct InterruptAfter {
    pub after: u32,
    pub checks: u32,
    pub discards: u32,
}

impl InterruptAfter {
    pub fn new(after: u32) -> Self {
        Self {
            after,
            checks: 0,
            discards: 0,
        }
    }
}

impl Interrupt for InterruptAfter {
    fn interrupt_received(&mut self) -> bool {
        self.checks += 1;
        self.checks >= self.after
    }

    fn discard_pending(&mut self) {
        self.discards += 1;
    }
}

/// Fixed mode predicates
#[derive(Clone, Copy)]
pub struct Modes {
    pub debug: bool,
    pub stack: RadioStack,
}

impl Modes {
    pub fn unlocked() -> Self {
        Self {
            debug: true,
            stack: RadioStack::HciLayer,
        }
    }

    pub fn locked() -> Self {
        Self {
            debug: false,
            stack: RadioStack::Full,
        }
    }
}

impl SystemModes for Modes {
    fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn radio_stack(&self) -> RadioStack {
        self.stack
    }
}

/// Settings store returning a fixed record and counting loads
pub struct Settings {
    pub settings: BtSettings,
    pub loads: u32,
}

impl Settings {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            settings: BtSettings { enabled },
            loads: 0,
        }
    }
}

impl SettingsStore for Settings {
    fn load(&mut self) -> BtSettings {
        self.loads += 1;
        self.settings
    }
}

/// A queue that outlives the test, as the driver's event context requires
pub fn leak_queue() -> &'static ScanQueue {
    Box::leak(Box::new(ScanQueue::new()))
}

pub fn mac(last: u8) -> MacAddress {
    MacAddress::new([0xC0, 0xFF, 0xEE, 0x00, 0x10, last])
}
