//! Test parameters
//!
//! Each test command reads its parameters in declared order; the first
//! rejected one aborts the command before the radio is touched.

use crate::args::{Args, ParamError, ParamSpec, ValidationRule};
use crate::config::{
    CHANNEL_DEFAULT, CHANNEL_MAX, CHANNEL_MIN, DATARATE_DEFAULT, DATARATE_MAX, DATARATE_MIN,
    PATTERN_DEFAULT, PATTERN_MAX, PATTERN_MIN, POWER_DEFAULT, POWER_MAX, POWER_MIN, TONE_POWER_BASE,
};
use crate::types::RadioSessionState;

/// RF channel
pub static CHANNEL: ParamSpec = ParamSpec {
    name: "channel",
    min: CHANNEL_MIN,
    max: CHANNEL_MAX,
    default: CHANNEL_DEFAULT,
};

/// Carrier power step
pub static POWER: ParamSpec = ParamSpec {
    name: "power",
    min: POWER_MIN,
    max: POWER_MAX,
    default: POWER_DEFAULT,
};

/// Packet test pattern index
pub static PATTERN: ParamSpec = ParamSpec {
    name: "pattern",
    min: PATTERN_MIN,
    max: PATTERN_MAX,
    default: PATTERN_DEFAULT,
};

/// PHY datarate in Mbit/s
pub static DATARATE: ParamSpec = ParamSpec {
    name: "datarate",
    min: DATARATE_MIN,
    max: DATARATE_MAX,
    default: DATARATE_DEFAULT,
};

/// A fully validated test request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestRequest {
    /// Emit a carrier
    CarrierTx {
        /// RF channel
        channel: u8,
        /// Power step, added to [`TONE_POWER_BASE`]
        power: u8,
    },
    /// Receive a carrier and report RSSI
    CarrierRx {
        /// RF channel
        channel: u8,
    },
    /// Transmit patterned packets
    PacketTx {
        /// RF channel
        channel: u8,
        /// Pattern index
        pattern: u8,
        /// Datarate in Mbit/s
        datarate: u8,
    },
    /// Receive packets and report RSSI
    PacketRx {
        /// RF channel
        channel: u8,
        /// Datarate in Mbit/s
        datarate: u8,
    },
    /// Passive device discovery
    Scan,
}

impl TestRequest {
    /// Parse a carrier transmit request: `<channel> <power>`
    ///
    /// # Errors
    ///
    /// The first rejected parameter.
    pub fn carrier_tx(args: &mut Args<'_>, rule: ValidationRule) -> Result<Self, ParamError> {
        let channel = CHANNEL.read(args, rule)?;
        let power = POWER.read(args, rule)?;
        Ok(Self::CarrierTx { channel, power })
    }

    /// Parse a carrier receive request: `<channel>`
    ///
    /// # Errors
    ///
    /// The rejected channel.
    pub fn carrier_rx(args: &mut Args<'_>, rule: ValidationRule) -> Result<Self, ParamError> {
        let channel = CHANNEL.read(args, rule)?;
        Ok(Self::CarrierRx { channel })
    }

    /// Parse a packet transmit request: `<channel> <pattern> <datarate>`
    ///
    /// # Errors
    ///
    /// The first rejected parameter.
    pub fn packet_tx(args: &mut Args<'_>, rule: ValidationRule) -> Result<Self, ParamError> {
        let channel = CHANNEL.read(args, rule)?;
        let pattern = PATTERN.read(args, rule)?;
        let datarate = DATARATE.read(args, rule)?;
        Ok(Self::PacketTx {
            channel,
            pattern,
            datarate,
        })
    }

    /// Parse a packet receive request: `<channel> <datarate>`
    ///
    /// # Errors
    ///
    /// The first rejected parameter.
    pub fn packet_rx(args: &mut Args<'_>, rule: ValidationRule) -> Result<Self, ParamError> {
        let channel = CHANNEL.read(args, rule)?;
        let datarate = DATARATE.read(args, rule)?;
        Ok(Self::PacketRx { channel, datarate })
    }

    /// Radio state while this test runs
    #[must_use]
    pub const fn state(&self) -> RadioSessionState {
        match self {
            Self::CarrierTx { .. } => RadioSessionState::CarrierTx,
            Self::CarrierRx { .. } => RadioSessionState::CarrierRx,
            Self::PacketTx { .. } => RadioSessionState::PacketTx,
            Self::PacketRx { .. } => RadioSessionState::PacketRx,
            Self::Scan => RadioSessionState::Scanning,
        }
    }
}

/// Radio power code for a carrier power step
#[must_use]
pub const fn tone_power_code(step: u8) -> u8 {
    TONE_POWER_BASE.saturating_add(step)
}
