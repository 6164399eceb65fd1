//! System configuration and console constants
//!
//! Parameter ranges, timing and queue sizing for the radio test console.
//! All tunables are centralized here.

/// Name of the console command family
pub const COMMAND_FAMILY: &str = "bt";

/// Lowest BLE RF channel
pub const CHANNEL_MIN: i32 = 0;

/// Highest BLE RF channel (40 channels, 0-39)
pub const CHANNEL_MAX: i32 = 39;

/// Channel used when none could be parsed (legacy rule only)
pub const CHANNEL_DEFAULT: i32 = 0;

/// Lowest carrier power step
pub const POWER_MIN: i32 = 0;

/// Highest carrier power step
pub const POWER_MAX: i32 = 6;

/// Power step used when none could be parsed (legacy rule only)
pub const POWER_DEFAULT: i32 = 0;

/// Radio power code for power step 0; the tone test takes `base + step`
pub const TONE_POWER_BASE: u8 = 0x19;

/// Lowest packet test pattern index
pub const PATTERN_MIN: i32 = 0;

/// Highest packet test pattern index
pub const PATTERN_MAX: i32 = 5;

/// Pattern used when none could be parsed (legacy rule only)
pub const PATTERN_DEFAULT: i32 = 0;

/// Lowest PHY datarate in Mbit/s
pub const DATARATE_MIN: i32 = 1;

/// Highest PHY datarate in Mbit/s
pub const DATARATE_MAX: i32 = 2;

/// Datarate used when none could be parsed (legacy rule only)
pub const DATARATE_DEFAULT: i32 = 1;

/// Datarate the carrier receive test runs the packet receiver at
pub const CARRIER_RX_DATARATE: u8 = 1;

/// Poll loop period; also the worst-case cancellation latency
pub const POLL_INTERVAL_MS: u32 = 250;

/// Maximum number of discovered devices waiting for the console
pub const SCAN_QUEUE_CAPACITY: usize = 20;

/// How long the scan callback may wait for room in a full queue
pub const SCAN_PUSH_TIMEOUT_MS: u32 = 250;

/// How long one poll iteration waits for a scan event
pub const SCAN_POP_TIMEOUT_MS: u32 = 250;

/// Granularity of the timed queue operations
pub const QUEUE_SLICE_MS: u32 = 10;

/// Control character the terminal sends for CTRL+C
pub const INTERRUPT_CHAR: u8 = 0x03;
