//! Test Session Controller
//!
//! Runs one validated test end to end:
//!
//! ```text
//!  stop advertising ─► start test ─► ┌─ sleep 250 ms ◄─────────┐
//!                                    │  CTRL+C? ── no ─► telemetry
//!                                    └─ yes ─► stop test ─► summary
//! ```
//!
//! The loop has no time limit; the operator ends it. Every iteration is
//! bounded by [`POLL_INTERVAL_MS`] (or [`SCAN_POP_TIMEOUT_MS`] while
//! scanning), which is also the cancellation latency.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;

use crate::cancel::Interrupt;
use crate::config::{CARRIER_RX_DATARATE, POLL_INTERVAL_MS, SCAN_POP_TIMEOUT_MS};
use crate::driver::RadioTestDriver;
use crate::logging::{log_debug, log_info, log_warn};
use crate::session::params::{tone_power_code, TestRequest};
use crate::session::scan::ScanQueue;
use crate::types::RadioSessionState;

/// What a finished session did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Test mode that ran
    pub test: RadioSessionState,
    /// Poll iterations completed before cancellation
    pub polls: u32,
    /// Packets sent (transmit test) or received (receive test)
    pub packets: Option<u32>,
    /// Devices printed by a scan
    pub devices_found: u32,
    /// Scan events lost to a full queue
    pub events_dropped: u32,
}

impl SessionReport {
    const fn new(test: RadioSessionState) -> Self {
        Self {
            test,
            polls: 0,
            packets: None,
            devices_found: 0,
            events_dropped: 0,
        }
    }
}

/// Live readout printed on each poll
#[derive(Clone, Copy, PartialEq, Eq)]
enum Telemetry {
    None,
    /// Right-aligned in a 6 column field
    CarrierRssi,
    /// Zero-padded to 3 columns
    PacketRssi,
}

/// Borrowed collaborators for a single test run
pub struct TestSession<'a, D, L, I, W> {
    driver: &'a mut D,
    delay: &'a mut L,
    interrupt: &'a mut I,
    out: &'a mut W,
    scan_queue: &'static ScanQueue,
    state: &'a mut RadioSessionState,
}

impl<'a, D, L, I, W> TestSession<'a, D, L, I, W>
where
    D: RadioTestDriver,
    L: DelayNs,
    I: Interrupt,
    W: Write,
{
    /// Assemble a session; nothing touches the radio until [`run`](Self::run)
    pub fn new(
        driver: &'a mut D,
        delay: &'a mut L,
        interrupt: &'a mut I,
        out: &'a mut W,
        scan_queue: &'static ScanQueue,
        state: &'a mut RadioSessionState,
    ) -> Self {
        Self {
            driver,
            delay,
            interrupt,
            out,
            scan_queue,
            state,
        }
    }

    /// Run `request` until the operator cancels it
    ///
    /// A CTRL+C raised before this call is discarded. Advertising is
    /// always stopped first and the test is always stopped exactly once
    /// before returning. Restoring advertising is left to the
    /// caller.
    pub fn run(mut self, request: TestRequest) -> SessionReport {
        let mut report = SessionReport::new(request.state());

        self.interrupt.discard_pending();
        self.driver.stop_advertising();
        *self.state = RadioSessionState::Idle;

        match request {
            TestRequest::CarrierTx { channel, power } => {
                self.line(format_args!(
                    "Transmitting carrier at {channel} channel at {power} dB power"
                ));
                self.press_to_stop();
                self.driver.start_tone_tx(channel, tone_power_code(power));
                self.enter(request);
                report.polls = self.poll(Telemetry::None);
                self.driver.stop_tone_tx();
            }
            TestRequest::CarrierRx { channel } => {
                self.line(format_args!("Receiving carrier at {channel} channel"));
                self.press_to_stop();
                self.driver.start_packet_rx(channel, CARRIER_RX_DATARATE);
                self.enter(request);
                report.polls = self.poll(Telemetry::CarrierRssi);
                // Nothing is counted in carrier mode
                let _ = self.driver.stop_packet_test();
            }
            TestRequest::PacketTx {
                channel,
                pattern,
                datarate,
            } => {
                self.line(format_args!(
                    "Transmitting {pattern} pattern packet at {channel} channel at {datarate} M datarate"
                ));
                self.press_to_stop();
                self.driver.start_packet_tx(channel, pattern, datarate);
                self.enter(request);
                report.polls = self.poll(Telemetry::None);
                self.driver.stop_packet_test();
                let sent = self.driver.get_transmitted_packets();
                self.line(format_args!("Transmitted {sent} packets"));
                report.packets = Some(sent);
            }
            TestRequest::PacketRx { channel, datarate } => {
                self.line(format_args!(
                    "Receiving packets at {channel} channel at {datarate} M datarate"
                ));
                self.press_to_stop();
                self.driver.start_packet_rx(channel, datarate);
                self.enter(request);
                report.polls = self.poll(Telemetry::PacketRssi);
                let received = self.driver.stop_packet_test();
                self.line(format_args!("Received {received} packets"));
                report.packets = Some(u32::from(received));
            }
            TestRequest::Scan => self.scan(&mut report),
        }

        *self.state = RadioSessionState::Idle;
        log_info!("bt: {} stopped after {} polls", report.test, report.polls);
        report
    }

    fn scan(&mut self, report: &mut SessionReport) {
        let stale = self.scan_queue.reset();
        if stale > 0 {
            log_warn!("bt: {} stale scan events discarded", stale);
        }

        self.line(format_args!("Scanning for devices"));
        self.press_to_stop();
        self.driver.start_scan(self.scan_queue.sink());
        self.enter(TestRequest::Scan);

        loop {
            if let Some(event) = self.scan_queue.recv_timeout(&mut *self.delay, SCAN_POP_TIMEOUT_MS) {
                if let Some(kind) = event.address_type() {
                    let mac = event.mac.to_hex();
                    self.line(format_args!("Found new device. Type: {}, MAC: {mac}", kind.label()));
                    report.devices_found += 1;
                } else {
                    log_debug!("bt: ignoring address tag {}", event.type_tag);
                }
            }
            if self.interrupt.interrupt_received() {
                break;
            }
            report.polls += 1;
        }

        self.driver.stop_scan();
        report.events_dropped = self.scan_queue.dropped();
        let discarded = self.scan_queue.reset();
        if report.events_dropped > 0 || discarded > 0 {
            log_warn!(
                "bt: scan dropped {} events, discarded {} on stop",
                report.events_dropped, discarded
            );
        }
    }

    /// Sleep, check for CTRL+C, then print telemetry; returns completed polls
    fn poll(&mut self, telemetry: Telemetry) -> u32 {
        let mut polls = 0;
        loop {
            self.delay.delay_ms(POLL_INTERVAL_MS);
            if self.interrupt.interrupt_received() {
                break;
            }
            polls += 1;
            if telemetry == Telemetry::None {
                continue;
            }
            let rssi = self.driver.get_rssi();
            // Bare CR keeps the readout on one line
            let _ = if telemetry == Telemetry::CarrierRssi {
                write!(self.out, "RSSI: {rssi:6.1} dB\r")
            } else {
                write!(self.out, "RSSI: {rssi:03.1} dB\r")
            };
        }
        if telemetry != Telemetry::None && polls > 0 {
            let _ = self.out.write_str("\r\n");
        }
        polls
    }

    fn enter(&mut self, request: TestRequest) {
        *self.state = request.state();
        log_info!("bt: {} started", *self.state);
    }

    fn press_to_stop(&mut self) {
        self.line(format_args!("Press CTRL+C to stop"));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_str("\r\n");
    }
}
