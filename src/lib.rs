//! BLE Radio Test Console
//!
//! The `bt` command family of the device's serial/USB console. It lets an
//! operator put the BLE transceiver into its low-level test modes (carrier
//! emission, packet transmit/receive, passive scan), watch live telemetry,
//! and stop the test with CTRL+C. The radio is handed back to advertising
//! afterwards when the persisted settings say so.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CONSOLE LAYER                          │
//! │  Command Registry  │  Dispatcher  │  Advertising restore     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       SESSION LAYER                          │
//! │  Parameter validation  │  Poll loop  │  Scan queue           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    COLLABORATOR TRAITS                       │
//! │  RadioTestDriver  │  SystemModes  │  SettingsStore  │ Interrupt│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single tenant**: one console thread drives the radio; every test
//!   stops advertising before it starts and stops itself before returning
//! - **Bounded waits**: every loop iteration sleeps or waits at most
//!   [`config::POLL_INTERVAL_MS`], which bounds cancellation latency
//! - **Local errors**: bad input is printed and the invocation ends
//!   without touching the radio
//! - **No unsafe**

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_time;

mod logging;

/// Argument Parser
///
/// Tokenizer and integer parameter validation.
pub mod args;

/// Operator cancellation (CTRL+C)
pub mod cancel;

/// `bt` command registry and dispatcher
pub mod console;

/// Collaborator contracts
///
/// Radio driver, mode predicates and settings storage.
pub mod driver;

/// Test Session Controller and Scan Session Bridge
pub mod session;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for wiring the console into an application.

    pub use crate::args::ValidationRule;
    pub use crate::cancel::{CancelFlag, Interrupt};
    pub use crate::console::dispatch::{BtConsole, CommandError, Completed, InvocationReport};
    pub use crate::driver::{RadioTestDriver, SettingsStore, SystemModes};
    pub use crate::session::scan::{ScanQueue, ScanSink};
    pub use crate::types::*;

    // Embassy blocking delay drives the poll loop on target
    #[cfg(feature = "embedded")]
    pub use embassy_time::Delay;
}
