//! Argument Parser Tests
//!
//! Tests for tokenizing and for the channel/power/pattern/datarate ranges.
//! Run with: cargo test --no-default-features --features std --test args_tests

use bt_test_console::args::{ArgError, Args, ParamErrorKind, ValidationRule};
use bt_test_console::session::params::{tone_power_code, TestRequest, CHANNEL, DATARATE, PATTERN, POWER};

// ============================================================================
// Tokenizer Tests
// ============================================================================

#[test]
fn read_token_splits_on_whitespace() {
    let mut args = Args::new("carrier_tx\t5   3");
    assert_eq!(args.read_token(), Some("carrier_tx"));
    assert_eq!(args.read_token(), Some("5"));
    assert_eq!(args.read_token(), Some("3"));
    assert_eq!(args.read_token(), None);
}

#[test]
fn read_token_on_blank_input() {
    let mut args = Args::new("   ");
    assert_eq!(args.read_token(), None);
    assert!(args.is_empty());
}

#[test]
fn read_int_errors() {
    let mut args = Args::new("12 x");
    assert_eq!(args.read_int(), Ok(12));
    assert_eq!(args.read_int(), Err(ArgError::NotInteger));
    assert_eq!(args.read_int(), Err(ArgError::Missing));
}

#[test]
fn read_int_accepts_sign() {
    let mut args = Args::new("-4 +4");
    assert_eq!(args.read_int(), Ok(-4));
    assert_eq!(args.read_int(), Ok(4));
}

// ============================================================================
// Strict Validation Tests
// ============================================================================

#[test]
fn strict_rejects_missing() {
    let err = CHANNEL.read(&mut Args::new(""), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.kind, ParamErrorKind::Missing);
    assert!(err.kind.is_parse());
}

#[test]
fn strict_rejects_non_integer() {
    let err = POWER.read(&mut Args::new("high"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.kind, ParamErrorKind::NotInteger);
}

#[test]
fn strict_rejects_out_of_range() {
    let err = DATARATE.read(&mut Args::new("3"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.kind, ParamErrorKind::OutOfRange(3));
    assert!(!err.kind.is_parse());
}

#[test]
fn strict_accepts_bounds() {
    for (spec, lo, hi) in [(&CHANNEL, 0, 39), (&POWER, 0, 6), (&PATTERN, 0, 5), (&DATARATE, 1, 2)] {
        for value in [lo, hi] {
            let text = value.to_string();
            assert_eq!(
                spec.read(&mut Args::new(&text), ValidationRule::Strict),
                Ok(u8::try_from(value).unwrap()),
                "{} {value}",
                spec.name
            );
        }
    }
}

#[test]
fn error_message_names_parameter_and_range() {
    let err = CHANNEL.read(&mut Args::new("40"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect or missing channel, expected int 0-39");
    let err = POWER.read(&mut Args::new("7"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect or missing power, expected int 0-6");
    let err = DATARATE.read(&mut Args::new("0"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect or missing datarate, expected int 1-2");
}

// ============================================================================
// Legacy Validation Tests
// ============================================================================

#[test]
fn legacy_missing_takes_default() {
    assert_eq!(CHANNEL.read(&mut Args::new(""), ValidationRule::Legacy), Ok(0));
    assert_eq!(DATARATE.read(&mut Args::new("fast"), ValidationRule::Legacy), Ok(1));
}

#[test]
fn legacy_skips_range_check() {
    assert_eq!(CHANNEL.read(&mut Args::new("40"), ValidationRule::Legacy), Ok(40));
    assert_eq!(POWER.read(&mut Args::new("200"), ValidationRule::Legacy), Ok(200));
}

#[test]
fn legacy_rejects_values_wider_than_a_byte() {
    let err = CHANNEL.read(&mut Args::new("-1"), ValidationRule::Legacy).unwrap_err();
    assert_eq!(err.kind, ParamErrorKind::OutOfRange(-1));
    let err = CHANNEL.read(&mut Args::new("256"), ValidationRule::Legacy).unwrap_err();
    assert_eq!(err.kind, ParamErrorKind::OutOfRange(256));
}

// ============================================================================
// Request Parsing Tests
// ============================================================================

#[test]
fn every_channel_command_rejects_out_of_range_channels() {
    type Parser = fn(&mut Args<'_>, ValidationRule) -> Result<TestRequest, bt_test_console::args::ParamError>;
    let parsers: [(Parser, &str); 4] = [
        (TestRequest::carrier_tx, "0"),
        (TestRequest::carrier_rx, ""),
        (TestRequest::packet_tx, "0 1"),
        (TestRequest::packet_rx, "1"),
    ];
    for channel in (-100..0).chain(40..200) {
        for (parse, tail) in parsers {
            let line = format!("{channel} {tail}");
            let err = parse(&mut Args::new(&line), ValidationRule::Strict).unwrap_err();
            assert_eq!(err.param.name, "channel", "{line}");
        }
    }
}

#[test]
fn first_invalid_parameter_is_reported() {
    let err = TestRequest::packet_tx(&mut Args::new("50 9 7"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.param.name, "channel");
    let err = TestRequest::packet_tx(&mut Args::new("5 9 7"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.param.name, "pattern");
    let err = TestRequest::packet_tx(&mut Args::new("5 3 7"), ValidationRule::Strict).unwrap_err();
    assert_eq!(err.param.name, "datarate");
}

#[test]
fn valid_requests() {
    assert_eq!(
        TestRequest::carrier_tx(&mut Args::new("5 3"), ValidationRule::Strict),
        Ok(TestRequest::CarrierTx { channel: 5, power: 3 })
    );
    assert_eq!(
        TestRequest::packet_rx(&mut Args::new("39 2"), ValidationRule::Strict),
        Ok(TestRequest::PacketRx {
            channel: 39,
            datarate: 2
        })
    );
}

#[test]
fn tone_power_code_offsets_base() {
    assert_eq!(tone_power_code(0), 0x19);
    assert_eq!(tone_power_code(3), 28);
    assert_eq!(tone_power_code(6), 0x1F);
}
