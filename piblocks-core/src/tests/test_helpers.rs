//! Test helper utilities for piblocks tests

use crate::config::{Limits, Scenario, SimulationConfig};
use crate::exact::parse_rational;
use crate::report::{cross_validate, Report};
use crate::Rational;
use num_bigint::BigInt;
use std::fs;
use std::path::Path;

/// Parse a rational literal, panicking on malformed test input
pub fn q(text: &str) -> Rational {
    parse_rational(text).expect("test rational literal")
}

/// Exact `numer / denom`; panics when `denom` is zero
pub fn fraction(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Validate a config, panicking on failure
pub fn scenario(config: SimulationConfig) -> Scenario {
    config.validate().expect("test configuration should be valid")
}

/// Canonical scenario with non-default light velocity and positions
pub fn custom_scenario(
    digits: i64,
    heavy_velocity: &str,
    light_velocity: &str,
    light_position: &str,
    heavy_position: &str,
) -> Scenario {
    scenario(
        SimulationConfig::canonical(digits)
            .with_heavy_velocity(q(heavy_velocity))
            .with_light_velocity(q(light_velocity))
            .with_positions(q(light_position), q(heavy_position)),
    )
}

/// Cross-validate with default limits and return the report
pub fn agree(scenario: &Scenario) -> Report {
    cross_validate(scenario, &Limits::default()).expect("strategies should agree")
}

/// Load expected output from a file
pub fn load_expected(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(path)?)
}

/// Write expected output to a file (for initial generation)
pub fn write_expected(path: &str, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, content)?)
}
