use std::time::Duration;

use imeswitch_core::sim::SimulatedIme;
use imeswitch_core::{ConversionMode, ImeControl, PlatformError, StateReader, SwitchError};

const TIMEOUT: Duration = Duration::from_millis(500);

#[test]
fn test_reads_native_and_alphanumeric() {
    let ime = SimulatedIme::new().with_mode(ConversionMode::Native);
    let reader = StateReader::new(&ime, TIMEOUT);
    assert_eq!(reader.read(ime.focused_window()).unwrap(), ConversionMode::Native);

    ime.set_mode(ConversionMode::Alphanumeric);
    assert_eq!(reader.read(ime.focused_window()).unwrap(), ConversionMode::Alphanumeric);
}

#[test]
fn test_only_native_bit_decides() {
    let ime = SimulatedIme::new().with_conversion_bits(0x0408);
    let reader = StateReader::new(&ime, TIMEOUT);

    assert_eq!(reader.observe(ime.focused_window()), Some(ConversionMode::Alphanumeric));
}

#[test]
fn test_non_chinese_layout_sends_nothing() {
    let ime = SimulatedIme::new().with_language(0x0409);
    let reader = StateReader::new(&ime, TIMEOUT);

    let err = reader.read(ime.focused_window()).unwrap_err();
    assert!(matches!(err, SwitchError::UnresolvableTarget));
    assert!(ime.messages().is_empty());
}

#[test]
fn test_traditional_chinese_layout_is_supported() {
    let ime = SimulatedIme::new()
        .with_language(0x0404)
        .with_mode(ConversionMode::Native);
    let reader = StateReader::new(&ime, TIMEOUT);

    assert_eq!(reader.observe(ime.focused_window()), Some(ConversionMode::Native));
}

#[test]
fn test_no_focus_is_unknown() {
    let ime = SimulatedIme::new().without_focus();
    let reader = StateReader::new(&ime, TIMEOUT);

    assert_eq!(reader.observe(ime.focused_window()), None);
}

#[test]
fn test_missing_ime_window_is_unknown() {
    let ime = SimulatedIme::new().without_ime_window();
    let reader = StateReader::new(&ime, TIMEOUT);

    assert!(matches!(
        reader.read(ime.focused_window()),
        Err(SwitchError::UnresolvableTarget)
    ));
}

#[test]
fn test_timeout_is_unknown() {
    let ime = SimulatedIme::new().unresponsive();
    let reader = StateReader::new(&ime, TIMEOUT);

    let err = reader.read(ime.focused_window()).unwrap_err();
    assert!(matches!(
        err,
        SwitchError::Platform(PlatformError::Timeout { call: "IMC_GETCONVERSIONMODE" })
    ));
    assert_eq!(err.to_string(), "Platform call failed: IMC_GETCONVERSIONMODE did not complete in time");
    assert_eq!(reader.observe(ime.focused_window()), None);
}

#[test]
fn test_compartment_value_is_never_trusted() {
    // A stale compartment written by an earlier run says native; the input
    // method itself is alphanumeric
    let ime = SimulatedIme::new().with_compartment_value(Some(0x0001));
    let reader = StateReader::new(&ime, TIMEOUT);

    assert_eq!(reader.observe(ime.focused_window()), Some(ConversionMode::Alphanumeric));
    assert_eq!(ime.open_compartments(), 0);
    assert_eq!(ime.messages(), vec![(ImeControl::GetConversionMode, 0)]);
}
