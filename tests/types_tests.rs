//! Shared Types Tests
//!
//! Tests for address formatting, scan event decoding and radio states.
//! Run with: cargo test --no-default-features --features std --test types_tests

use bt_test_console::types::{
    AddressType, BtSettings, MacAddress, PacketPattern, RadioSessionState, RadioStack, ScanEvent,
};

// ============================================================================
// MacAddress Tests
// ============================================================================

#[test]
fn mac_display_uses_uppercase_hex_pairs() {
    let mac = MacAddress::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
    assert_eq!(format!("{mac}"), "DE:AD:BE:EF:00:01");
}

#[test]
fn mac_hex_string_has_fixed_length() {
    let mac = MacAddress::new([0; 6]);
    let hex = mac.to_hex();
    assert_eq!(hex.len(), 17);
    assert_eq!(hex.as_str(), "00:00:00:00:00:00");
}

#[test]
fn mac_bytes_round_trip() {
    let bytes = [1, 2, 3, 4, 5, 6];
    assert_eq!(MacAddress::new(bytes).bytes(), bytes);
}

#[test]
fn mac_debug_wraps_display() {
    let mac = MacAddress::new([0xAA; 6]);
    assert_eq!(format!("{mac:?}"), "MacAddress(AA:AA:AA:AA:AA:AA)");
}

// ============================================================================
// AddressType Tests
// ============================================================================

#[test]
fn address_type_labels() {
    assert_eq!(AddressType::PublicDevice.label(), "Public Device Address");
    assert_eq!(AddressType::RandomDevice.label(), "Random Device Address");
    assert_eq!(AddressType::PublicIdentity.label(), "Public Identity Address");
    assert_eq!(
        AddressType::RandomStaticIdentity.label(),
        "Random (Static) Identity Address"
    );
}

#[test]
fn address_type_unknown_tags() {
    for tag in 4..=u8::MAX {
        assert!(AddressType::from_tag(tag).is_none(), "tag {tag}");
    }
}

// ============================================================================
// ScanEvent Tests
// ============================================================================

#[test]
fn scan_event_known_type() {
    let event = ScanEvent::new(MacAddress::default(), AddressType::PublicIdentity);
    assert_eq!(event.type_tag, 2);
    assert_eq!(event.address_type(), Some(AddressType::PublicIdentity));
}

#[test]
fn scan_event_unknown_type() {
    let event = ScanEvent::from_raw(MacAddress::default(), 9);
    assert_eq!(event.address_type(), None);
}

// ============================================================================
// PacketPattern Tests
// ============================================================================

#[test]
fn packet_pattern_indices_are_sequential() {
    for (i, pattern) in PacketPattern::ALL.iter().enumerate() {
        assert_eq!(usize::from(pattern.index()), i);
        assert_eq!(PacketPattern::from_index(pattern.index()), Some(*pattern));
    }
    assert_eq!(PacketPattern::from_index(6), None);
}

#[test]
fn packet_pattern_descriptions() {
    assert_eq!(PacketPattern::Prbs9.description(), "Pseudo-Random bit sequence 9");
    assert_eq!(
        PacketPattern::AlternatingBits.description(),
        "Pattern of alternating bits '10101010'"
    );
    assert_eq!(PacketPattern::AllZeros.description(), "Pattern of All '0' bits");
}

// ============================================================================
// State and Settings Tests
// ============================================================================

#[test]
fn session_state_test_modes() {
    assert!(!RadioSessionState::Idle.is_test());
    assert!(!RadioSessionState::Advertising.is_test());
    assert!(RadioSessionState::CarrierTx.is_test());
    assert!(RadioSessionState::Scanning.is_test());
}

#[test]
fn defaults() {
    assert_eq!(RadioSessionState::default(), RadioSessionState::Idle);
    assert_eq!(RadioStack::default(), RadioStack::Unknown);
    assert!(!BtSettings::default().enabled);
}
