//! Command dispatcher
//!
//! One invocation of `bt <cmd> <args>`: look up the subcommand, check the
//! RF test gate, validate parameters, run the session, then restore
//! advertising if the persisted settings ask for it. Restoring happens on
//! every path, including rejected and unknown commands.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;

use crate::args::{Args, ParamError, ValidationRule};
use crate::cancel::Interrupt;
use crate::config::COMMAND_FAMILY;
use crate::console::commands::{lookup, write_pattern_help, write_usage, CommandKind};
use crate::driver::{RadioTestDriver, SettingsStore, SystemModes};
use crate::logging::{log_debug, log_warn};
use crate::session::controller::{SessionReport, TestSession};
use crate::session::params::{TestRequest, PATTERN};
use crate::session::scan::ScanQueue;
use crate::types::RadioSessionState;

/// Why an invocation ran no test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// `bt` without a subcommand
    MissingCommand,
    /// No registry entry with that name
    UnknownCommand,
    /// Entry exists but the RF test gate is closed
    Unavailable,
    /// A parameter failed to parse or is out of range
    Param(ParamError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => f.write_str("missing command"),
            Self::UnknownCommand => f.write_str("unknown command"),
            Self::Unavailable => f.write_str("command unavailable in this mode"),
            Self::Param(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// Successful invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completed {
    /// Diagnostic dump printed
    HciInfo,
    /// A test ran until cancelled
    Session(SessionReport),
}

/// Outcome of one `bt` invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvocationReport {
    /// Subcommand that was recognised, if any
    pub command: Option<CommandKind>,
    /// What happened
    pub result: Result<Completed, CommandError>,
    /// Advertising was restarted during finalization
    pub advertising_resumed: bool,
}

/// The `bt` console bound to its collaborators
pub struct BtConsole<D, M, S, L> {
    driver: D,
    modes: M,
    settings: S,
    delay: L,
    scan_queue: &'static ScanQueue,
    rule: ValidationRule,
    state: RadioSessionState,
}

impl<D, M, S, L> BtConsole<D, M, S, L>
where
    D: RadioTestDriver,
    M: SystemModes,
    S: SettingsStore,
    L: DelayNs,
{
    /// Create a console using the strict validation rule
    pub fn new(driver: D, modes: M, settings: S, delay: L, scan_queue: &'static ScanQueue) -> Self {
        Self {
            driver,
            modes,
            settings,
            delay,
            scan_queue,
            rule: ValidationRule::Strict,
            state: RadioSessionState::Idle,
        }
    }

    /// Select how parameter parsing and range checks combine
    #[must_use]
    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Validation rule in force
    pub fn validation(&self) -> ValidationRule {
        self.rule
    }

    /// Last known radio state
    pub fn state(&self) -> RadioSessionState {
        self.state
    }

    /// The radio driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The radio driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The persisted settings store
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Handle a full console line if it belongs to the `bt` family
    ///
    /// Returns `None` without side effects for any other line.
    pub fn handle_line<I, W>(&mut self, line: &str, interrupt: &mut I, out: &mut W) -> Option<InvocationReport>
    where
        I: Interrupt,
        W: Write,
    {
        let mut args = Args::new(line);
        match args.read_token() {
            Some(family) if family == COMMAND_FAMILY => Some(self.invoke(args.remainder(), interrupt, out)),
            _ => None,
        }
    }

    /// Run one invocation with the text following `bt`
    pub fn invoke<I, W>(&mut self, args: &str, interrupt: &mut I, out: &mut W) -> InvocationReport
    where
        I: Interrupt,
        W: Write,
    {
        let settings = self.settings.load();
        let rf_tests_unlocked = self.modes.rf_tests_unlocked();

        let mut args = Args::new(args);
        let (command, result) = self.dispatch(&mut args, rf_tests_unlocked, interrupt, out);

        if let Err(err) = &result {
            match err {
                CommandError::Param(param) => {
                    log_warn!("bt: rejected {}", *param);
                    let _ = write!(out, "{param}\r\n");
                    if core::ptr::eq(param.param, &PATTERN) {
                        write_pattern_help(out);
                    }
                }
                CommandError::MissingCommand | CommandError::UnknownCommand | CommandError::Unavailable => {
                    write_usage(out, rf_tests_unlocked);
                }
            }
        }

        if settings.enabled {
            log_debug!("bt: resuming advertising");
            self.driver.start_advertising();
            self.state = RadioSessionState::Advertising;
        }

        InvocationReport {
            command,
            result,
            advertising_resumed: settings.enabled,
        }
    }

    fn dispatch<I, W>(
        &mut self,
        args: &mut Args<'_>,
        rf_tests_unlocked: bool,
        interrupt: &mut I,
        out: &mut W,
    ) -> (Option<CommandKind>, Result<Completed, CommandError>)
    where
        I: Interrupt,
        W: Write,
    {
        let Some(name) = args.read_token() else {
            return (None, Err(CommandError::MissingCommand));
        };
        let Some(cmd) = lookup(name) else {
            return (None, Err(CommandError::UnknownCommand));
        };
        if !cmd.runnable(rf_tests_unlocked) {
            return (Some(cmd.kind), Err(CommandError::Unavailable));
        }
        log_debug!("bt: {}", cmd.kind);

        let request = match cmd.kind {
            CommandKind::HciInfo => {
                let _ = self.driver.dump_state(out);
                return (Some(cmd.kind), Ok(Completed::HciInfo));
            }
            CommandKind::CarrierTx => TestRequest::carrier_tx(args, self.rule),
            CommandKind::CarrierRx => TestRequest::carrier_rx(args, self.rule),
            CommandKind::PacketTx => TestRequest::packet_tx(args, self.rule),
            CommandKind::PacketRx => TestRequest::packet_rx(args, self.rule),
            CommandKind::Scan => Ok(TestRequest::Scan),
        };

        match request {
            Ok(request) => {
                let report = TestSession::new(
                    &mut self.driver,
                    &mut self.delay,
                    interrupt,
                    out,
                    self.scan_queue,
                    &mut self.state,
                )
                .run(request);
                (Some(cmd.kind), Ok(Completed::Session(report)))
            }
            Err(err) => (Some(cmd.kind), Err(CommandError::Param(err))),
        }
    }
}
