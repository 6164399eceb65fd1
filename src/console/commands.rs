//! Command registry
//!
//! Fixed at build time; lookup is an exact, case-sensitive name match.

use core::fmt::Write;

use crate::config::COMMAND_FAMILY;
use crate::types::PacketPattern;

/// Subcommands of the `bt` family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    /// Dump radio diagnostic state
    HciInfo,
    /// Carrier transmit test
    CarrierTx,
    /// Carrier receive test
    CarrierRx,
    /// Packet transmit test
    PacketTx,
    /// Packet receive test
    PacketRx,
    /// Passive device scan
    Scan,
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandKind {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", command(*self).name);
    }
}

/// When a command can be run and when it shows up in the usage text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Always runnable and listed
    Open,
    /// Runnable and listed only with debug mode on the HCI stack
    RfTest,
    /// Always runnable, listed only with debug mode on the HCI stack
    ListedWithRfTests,
}

/// Registry entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    /// Name matched against the first token
    pub name: &'static str,
    /// Argument schema shown in the usage text
    pub args: &'static str,
    /// One-line description
    pub help: &'static str,
    /// Handler selector
    pub kind: CommandKind,
    /// Gating
    pub access: Access,
}

impl Command {
    /// Check whether the command may run given the RF test gate
    #[must_use]
    pub const fn runnable(&self, rf_tests_unlocked: bool) -> bool {
        match self.access {
            Access::Open | Access::ListedWithRfTests => true,
            Access::RfTest => rf_tests_unlocked,
        }
    }

    /// Check whether the usage text lists the command
    #[must_use]
    pub const fn listed(&self, rf_tests_unlocked: bool) -> bool {
        match self.access {
            Access::Open => true,
            Access::RfTest | Access::ListedWithRfTests => rf_tests_unlocked,
        }
    }
}

/// Every `bt` subcommand, in usage order
pub static COMMANDS: [Command; 6] = [
    Command {
        name: "hci_info",
        args: "",
        help: "HCI info",
        kind: CommandKind::HciInfo,
        access: Access::Open,
    },
    Command {
        name: "carrier_tx",
        args: "<channel:0-39> <power:0-6>",
        help: "start tx carrier test",
        kind: CommandKind::CarrierTx,
        access: Access::RfTest,
    },
    Command {
        name: "carrier_rx",
        args: "<channel:0-39>",
        help: "start rx carrier test",
        kind: CommandKind::CarrierRx,
        access: Access::RfTest,
    },
    Command {
        name: "packet_tx",
        args: "<channel:0-39> <pattern:0-5> <datarate:1-2>",
        help: "start tx packet test",
        kind: CommandKind::PacketTx,
        access: Access::RfTest,
    },
    Command {
        name: "packet_rx",
        args: "<channel:0-39> <datarate:1-2>",
        help: "start rx packet test",
        kind: CommandKind::PacketRx,
        access: Access::RfTest,
    },
    Command {
        name: "scan",
        args: "",
        help: "start scanner",
        kind: CommandKind::Scan,
        access: Access::ListedWithRfTests,
    },
];

/// Find a command by exact name
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Registry entry for `kind`
#[must_use]
pub fn command(kind: CommandKind) -> &'static Command {
    match kind {
        CommandKind::HciInfo => &COMMANDS[0],
        CommandKind::CarrierTx => &COMMANDS[1],
        CommandKind::CarrierRx => &COMMANDS[2],
        CommandKind::PacketTx => &COMMANDS[3],
        CommandKind::PacketRx => &COMMANDS[4],
        CommandKind::Scan => &COMMANDS[5],
    }
}

/// Print the usage text
pub fn write_usage<W: Write>(out: &mut W, rf_tests_unlocked: bool) {
    let _ = write!(out, "Usage:\r\n{COMMAND_FAMILY} <cmd> <args>\r\nCmd list:\r\n");
    for cmd in COMMANDS.iter().filter(|cmd| cmd.listed(rf_tests_unlocked)) {
        let _ = if cmd.args.is_empty() {
            write!(out, "\t{}\t - {}\r\n", cmd.name, cmd.help)
        } else {
            write!(out, "\t{} {}\t - {}\r\n", cmd.name, cmd.args, cmd.help)
        };
    }
}

/// Print the numbered list of packet patterns
pub fn write_pattern_help<W: Write>(out: &mut W) {
    for pattern in PacketPattern::ALL {
        let _ = write!(out, "{} - {}\r\n", pattern.index(), pattern.description());
    }
}
