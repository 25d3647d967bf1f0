mod common;

use common::*;
use imeswitch_core::sim::SimulatedIme;
use imeswitch_core::strategy::compartment::KEYBOARD_INPUTMODE_CONVERSION;
use imeswitch_core::{ConversionMode, ImeControl, Switcher, SwitchError, ToggleKey, ToggleKeyMode};
use pretty_assertions::assert_eq;

#[test]
fn test_set_native_on_shift_bound_ime() {
    let ime = SimulatedIme::new();
    let switcher = Switcher::new(&ime, fast_timing());

    let applied = switcher.set(ConversionMode::Native, ToggleKeyMode::Shift).unwrap();

    assert_eq!(applied, "key-injection");
    assert_eq!(ime.injected_keys(), vec![ToggleKey::Shift]);
    assert_eq!(switcher.query(), ConversionMode::Native);
}

#[test]
fn test_set_is_idempotent() {
    let ime = SimulatedIme::new();
    let switcher = Switcher::new(&ime, fast_timing());

    switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap();
    assert_eq!(switcher.query(), ConversionMode::Native);

    switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap();
    assert_eq!(switcher.query(), ConversionMode::Native);

    // The second call found the mode already set and injected nothing
    assert_eq!(ime.injected_keys(), vec![ToggleKey::Shift]);
}

#[test]
fn test_round_trip() {
    let ime = SimulatedIme::new();
    let switcher = Switcher::new(&ime, fast_timing());

    switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap();
    switcher.set(ConversionMode::Alphanumeric, ToggleKeyMode::Auto).unwrap();

    assert_eq!(switcher.query(), ConversionMode::Alphanumeric);
    assert_eq!(ime.injected_keys(), vec![ToggleKey::Shift, ToggleKey::Shift]);
}

#[test]
fn test_no_op_set_injects_nothing() {
    let ime = SimulatedIme::new().with_mode(ConversionMode::Native);
    let switcher = Switcher::new(&ime, fast_timing());

    assert_eq!(switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap(), "key-injection");
    assert!(ime.injected_keys().is_empty());
    assert!(ime.compartment_writes().is_empty());
}

#[test]
fn test_auto_escalation_injects_shift_then_ctrl() {
    let ime = SimulatedIme::new().with_toggle_key(None);
    let switcher = Switcher::new(&ime, fast_timing());

    let applied = switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap();

    assert_eq!(applied, "key-injection");
    assert_eq!(ime.injected_keys(), vec![ToggleKey::Shift, ToggleKey::Ctrl]);
}

#[test]
fn test_non_chinese_layout_falls_to_compartment() {
    let ime = SimulatedIme::new().with_language(0x0409);
    let switcher = Switcher::new(&ime, fast_timing());

    let applied = switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap();

    assert_eq!(applied, "tsf-compartment");
    assert!(ime.injected_keys().is_empty());
    assert!(ime.messages().is_empty());
    assert_eq!(ime.compartment_writes(), vec![(KEYBOARD_INPUTMODE_CONVERSION, 0x0001)]);
    assert_eq!(ime.open_compartments(), 0);
}

#[test]
fn test_compartment_write_is_not_reported_by_query() {
    // Microsoft Pinyin ignores the global compartment: the write "applies"
    // yet the real state stays alphanumeric
    let ime = SimulatedIme::new().unresponsive();
    let switcher = Switcher::new(&ime, fast_timing());

    assert_eq!(switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap(), "tsf-compartment");
    assert_eq!(ime.compartment_value(), Some(0x0001));
    assert_eq!(switcher.query(), ConversionMode::Alphanumeric);
}

#[test]
fn test_compartment_honouring_ime_switches() {
    let ime = SimulatedIme::new()
        .with_failing_injection()
        .honouring_compartment();
    let switcher = Switcher::new(&ime, fast_timing());

    assert_eq!(switcher.set(ConversionMode::Native, ToggleKeyMode::Shift).unwrap(), "tsf-compartment");
    assert_eq!(switcher.query(), ConversionMode::Native);
}

#[test]
fn test_legacy_message_is_last_resort() {
    let ime = SimulatedIme::new()
        .with_failing_injection()
        .without_compartment()
        .with_conversion_bits(0x0008);
    let switcher = Switcher::new(&ime, fast_timing());

    let applied = switcher.set(ConversionMode::Native, ToggleKeyMode::Shift).unwrap();

    assert_eq!(applied, "imm32-message");
    assert_eq!(ime.conversion_bits(), 0x0009);
    assert_eq!(
        ime.messages(),
        vec![
            // injection strategy's read
            (ImeControl::GetConversionMode, 0),
            // legacy read-modify-write
            (ImeControl::GetConversionMode, 0),
            (ImeControl::SetConversionMode, 0x0009),
        ]
    );
}

#[test]
fn test_everything_failing_is_exhausted() {
    let ime = SimulatedIme::new()
        .with_language(0x0409)
        .without_compartment();
    let switcher = Switcher::new(&ime, fast_timing());

    let err = switcher.set(ConversionMode::Native, ToggleKeyMode::Auto).unwrap_err();
    assert!(matches!(err, SwitchError::AllStrategiesExhausted));
}

#[test]
fn test_query_degrades_to_alphanumeric() {
    for ime in [
        SimulatedIme::new().with_mode(ConversionMode::Native).with_language(0x0409),
        SimulatedIme::new().with_mode(ConversionMode::Native).without_focus(),
        SimulatedIme::new().with_mode(ConversionMode::Native).unresponsive(),
        SimulatedIme::new().with_mode(ConversionMode::Native).without_ime_window(),
    ] {
        let switcher = Switcher::new(&ime, fast_timing());
        assert_eq!(switcher.query(), ConversionMode::Alphanumeric);
    }
}
