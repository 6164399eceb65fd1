//! Shared types used across the console
//!
//! Domain types for addresses, radio modes and persisted settings.

use core::fmt;
use core::fmt::Write as _;

use heapless::String;

/// Length of a formatted MAC address (`XX:XX:XX:XX:XX:XX`)
pub const MAC_STRING_LEN: usize = 17;

/// 48-bit device address as reported by the radio
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Create an address from its six bytes, most significant first
    #[must_use]
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    #[must_use]
    pub const fn bytes(&self) -> [u8; 6] {
        self.0
    }

    /// Colon-separated uppercase hex rendering
    ///
    /// This is the form the scanner prints.
    #[must_use]
    pub fn to_hex(&self) -> String<MAC_STRING_LEN> {
        let mut out = String::new();
        // 17 bytes always fit
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for MacAddress {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d, e, g] = self.0;
        defmt::write!(
            f,
            "{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}",
            a,
            b,
            c,
            d,
            e,
            g
        );
    }
}

/// Kind of address a discovered device advertises with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressType {
    /// Public device address
    PublicDevice,
    /// Random device address
    RandomDevice,
    /// Public identity address
    PublicIdentity,
    /// Random (static) identity address
    RandomStaticIdentity,
}

impl AddressType {
    /// Decode the raw tag delivered with a scan event
    ///
    /// Tags outside the known set yield `None`.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::PublicDevice),
            1 => Some(Self::RandomDevice),
            2 => Some(Self::PublicIdentity),
            3 => Some(Self::RandomStaticIdentity),
            _ => None,
        }
    }

    /// Raw tag value
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::PublicDevice => 0,
            Self::RandomDevice => 1,
            Self::PublicIdentity => 2,
            Self::RandomStaticIdentity => 3,
        }
    }

    /// Human-readable label printed by the scanner
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PublicDevice => "Public Device Address",
            Self::RandomDevice => "Random Device Address",
            Self::PublicIdentity => "Public Identity Address",
            Self::RandomStaticIdentity => "Random (Static) Identity Address",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AddressType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}

/// One device reported by the scan callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanEvent {
    /// Device address
    pub mac: MacAddress,
    /// Raw address type tag, see [`AddressType::from_tag`]
    pub type_tag: u8,
}

impl ScanEvent {
    /// Create an event with a known address type
    #[must_use]
    pub const fn new(mac: MacAddress, address_type: AddressType) -> Self {
        Self {
            mac,
            type_tag: address_type.tag(),
        }
    }

    /// Create an event from a raw tag, known or not
    #[must_use]
    pub const fn from_raw(mac: MacAddress, type_tag: u8) -> Self {
        Self { mac, type_tag }
    }

    /// Decoded address type, `None` for unknown tags
    #[must_use]
    pub const fn address_type(&self) -> Option<AddressType> {
        AddressType::from_tag(self.type_tag)
    }
}

/// Radio stack currently loaded on the wireless coprocessor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RadioStack {
    /// Stack not identified (coprocessor not started)
    #[default]
    Unknown,
    /// Bare HCI layer, the only stack that exposes RF test commands
    HciLayer,
    /// Peripheral-only BLE stack
    Light,
    /// Full BLE stack
    Full,
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioStack {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Unknown => defmt::write!(f, "Unknown"),
            Self::HciLayer => defmt::write!(f, "HCI"),
            Self::Light => defmt::write!(f, "Light"),
            Self::Full => defmt::write!(f, "Full"),
        }
    }
}

/// Persisted Bluetooth settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BtSettings {
    /// Radio should advertise whenever no test is running
    pub enabled: bool,
}

/// What the shared radio is doing right now
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RadioSessionState {
    /// Nothing running
    #[default]
    Idle,
    /// Default discoverable broadcast
    Advertising,
    /// Carrier emission
    CarrierTx,
    /// Carrier reception with RSSI readout
    CarrierRx,
    /// Patterned packet transmission
    PacketTx,
    /// Packet reception
    PacketRx,
    /// Passive device discovery
    Scanning,
}

impl RadioSessionState {
    /// A test mode (anything but idle or advertising) owns the radio
    #[must_use]
    pub const fn is_test(self) -> bool {
        !matches!(self, Self::Idle | Self::Advertising)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioSessionState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "IDLE"),
            Self::Advertising => defmt::write!(f, "ADV"),
            Self::CarrierTx => defmt::write!(f, "CARRIER-TX"),
            Self::CarrierRx => defmt::write!(f, "CARRIER-RX"),
            Self::PacketTx => defmt::write!(f, "PACKET-TX"),
            Self::PacketRx => defmt::write!(f, "PACKET-RX"),
            Self::Scanning => defmt::write!(f, "SCAN"),
        }
    }
}

/// Bit pattern carried by the packet transmit test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketPattern {
    /// Pseudo-random bit sequence 9
    Prbs9,
    /// Alternating nibbles `11110000`
    Nibbles,
    /// Alternating bits `10101010`
    AlternatingBits,
    /// Pseudo-random bit sequence 15
    Prbs15,
    /// All `1` bits
    AllOnes,
    /// All `0` bits
    AllZeros,
}

impl PacketPattern {
    /// Every pattern, in index order
    pub const ALL: [Self; 6] = [
        Self::Prbs9,
        Self::Nibbles,
        Self::AlternatingBits,
        Self::Prbs15,
        Self::AllOnes,
        Self::AllZeros,
    ];

    /// Look up a pattern by its test index
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Prbs9),
            1 => Some(Self::Nibbles),
            2 => Some(Self::AlternatingBits),
            3 => Some(Self::Prbs15),
            4 => Some(Self::AllOnes),
            5 => Some(Self::AllZeros),
            _ => None,
        }
    }

    /// Test index passed to the radio
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Description shown in the pattern help
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Prbs9 => "Pseudo-Random bit sequence 9",
            Self::Nibbles => "Pattern of alternating bits '11110000'",
            Self::AlternatingBits => "Pattern of alternating bits '10101010'",
            Self::Prbs15 => "Pseudo-Random bit sequence 15",
            Self::AllOnes => "Pattern of All '1' bits",
            Self::AllZeros => "Pattern of All '0' bits",
        }
    }
}
