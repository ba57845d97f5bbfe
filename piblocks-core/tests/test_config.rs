//! Configuration loading and validation

use num_bigint::BigInt;
use piblocks_core::config::{mass_ratio, MAX_DIGITS};
use piblocks_core::tests::test_helpers::q;
use piblocks_core::{Error, Limits, Scenario, SimulationConfig};

fn expect_invalid(config: SimulationConfig, fragment: &str) {
    match config.validate() {
        Err(Error::InvalidConfiguration { message }) => {
            assert!(message.contains(fragment), "unexpected message: {}", message)
        }
        other => panic!("expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_canonical_config_validates() {
    let scenario = SimulationConfig::canonical(2).validate().unwrap();
    assert_eq!(scenario, Scenario::canonical(2));
    assert_eq!(scenario.digits(), 2);
    assert!(scenario.is_canonical());
    assert_eq!(scenario.initial_state().heavy.mass, q("10000"));
    assert_eq!(scenario.initial_state().light.mass, q("1"));
    assert_eq!(scenario.sqrt_mass_ratio(), BigInt::from(100));
}

#[test]
fn test_negative_digits_rejected() {
    expect_invalid(SimulationConfig::canonical(-1), "non-negative");
}

#[test]
fn test_huge_digits_rejected() {
    expect_invalid(
        SimulationConfig::canonical(i64::from(MAX_DIGITS) + 1),
        "supported maximum",
    );
}

#[test]
fn test_heavy_block_must_approach_wall() {
    expect_invalid(
        SimulationConfig::canonical(1).with_heavy_velocity(q("0")),
        "toward the wall",
    );
    expect_invalid(
        SimulationConfig::canonical(1).with_heavy_velocity(q("1/2")),
        "toward the wall",
    );
}

#[test]
fn test_light_block_cannot_start_behind_wall() {
    expect_invalid(
        SimulationConfig::canonical(1).with_positions(q("-1"), q("2")),
        "behind the wall",
    );
}

#[test]
fn test_heavy_block_must_start_beyond_light_block() {
    expect_invalid(
        SimulationConfig::canonical(1).with_positions(q("2"), q("2")),
        "beyond the light block",
    );
    expect_invalid(
        SimulationConfig::canonical(1).with_positions(q("3"), q("2")),
        "beyond the light block",
    );
}

#[test]
fn test_json_with_defaults() {
    let config = SimulationConfig::from_json_str(r#"{ "digits": 3, "heavy_velocity": -2 }"#).unwrap();
    assert_eq!(config.digits, 3);
    assert_eq!(config.heavy_velocity, q("-2"));
    assert_eq!(config.light_velocity, q("0"));
    assert_eq!(config.light_position, q("0"));
    assert_eq!(config.heavy_position, q("1"));
}

#[test]
fn test_json_with_exact_strings() {
    let json = r#"{
        "digits": 1,
        "heavy_velocity": "-3/2",
        "light_velocity": "0.25",
        "light_position": "1/3",
        "heavy_position": "2"
    }"#;
    let config = SimulationConfig::from_json_str(json).unwrap();
    assert_eq!(config.heavy_velocity, q("-3/2"));
    assert_eq!(config.light_velocity, q("1/4"));
    assert_eq!(config.light_position, q("1/3"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_rejects_bad_rational() {
    let json = r#"{ "digits": 1, "heavy_velocity": "fast" }"#;
    assert!(SimulationConfig::from_json_str(json).is_err());
}

#[test]
fn test_json_round_trip_keeps_exact_values() {
    let config = SimulationConfig::canonical(4).with_light_velocity(q("-7/3"));
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""light_velocity":"-7/3""#));
    assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_default_limits() {
    let limits = Limits::default();
    assert_eq!(limits.max_enumerated_digits, 3);
    assert_eq!(limits.precision_budget_bits, 1 << 18);
    assert_eq!(mass_ratio(3), BigInt::from(1_000_000));
}
