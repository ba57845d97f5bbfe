//! Run configuration
//!
//! [`SimulationConfig`] is the raw, serde-loadable form supplied by a
//! caller. [`SimulationConfig::validate`] turns it into a [`Scenario`],
//! which is the only thing the engine and the fast-path counter accept.

use crate::error::{Error, Result};
use crate::exact::{format_rational, rational, serde_rational, Rational};
use crate::state::{Block, SimulationState};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

/// Largest accepted `N`; the heavy mass `100^N` is built eagerly
pub const MAX_DIGITS: u32 = 1 << 20;

fn zero() -> Rational {
    Rational::zero()
}

fn default_heavy_position() -> Rational {
    rational(1)
}

/// Caller-supplied initial conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// `N`: the heavy block weighs `100^N` light blocks
    pub digits: i64,
    /// Must be negative (moving toward the wall)
    #[serde(with = "serde_rational")]
    pub heavy_velocity: Rational,
    #[serde(with = "serde_rational", default = "zero")]
    pub light_velocity: Rational,
    /// Distance of the light block from the wall; 0 means touching it
    #[serde(with = "serde_rational", default = "zero")]
    pub light_position: Rational,
    #[serde(with = "serde_rational", default = "default_heavy_position")]
    pub heavy_position: Rational,
}

impl SimulationConfig {
    /// Light block at rest against the wall, heavy block one unit away
    /// moving toward it at unit speed
    pub fn canonical(digits: i64) -> Self {
        Self {
            digits,
            heavy_velocity: rational(-1),
            light_velocity: zero(),
            light_position: zero(),
            heavy_position: default_heavy_position(),
        }
    }

    pub fn with_heavy_velocity(mut self, velocity: Rational) -> Self {
        self.heavy_velocity = velocity;
        self
    }

    pub fn with_light_velocity(mut self, velocity: Rational) -> Self {
        self.light_velocity = velocity;
        self
    }

    pub fn with_positions(mut self, light: Rational, heavy: Rational) -> Self {
        self.light_position = light;
        self.heavy_position = heavy;
        self
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check every precondition before any event is scheduled
    pub fn validate(&self) -> Result<Scenario> {
        if self.digits < 0 {
            return Err(Error::invalid_configuration(format!(
                "N must be non-negative, got {}",
                self.digits
            )));
        }
        let digits = u32::try_from(self.digits)
            .ok()
            .filter(|d| *d <= MAX_DIGITS)
            .ok_or_else(|| {
                Error::invalid_configuration(format!(
                    "N = {} is larger than the supported maximum {}",
                    self.digits, MAX_DIGITS
                ))
            })?;

        if !self.heavy_velocity.is_negative() {
            return Err(Error::invalid_configuration(format!(
                "heavy block must start moving toward the wall, got velocity {}",
                format_rational(&self.heavy_velocity)
            )));
        }
        if self.light_position.is_negative() {
            return Err(Error::invalid_configuration(format!(
                "light block cannot start behind the wall, got position {}",
                format_rational(&self.light_position)
            )));
        }
        if self.heavy_position <= self.light_position {
            return Err(Error::invalid_configuration(format!(
                "heavy block must start beyond the light block, got positions {} and {}",
                format_rational(&self.light_position),
                format_rational(&self.heavy_position)
            )));
        }

        let light = Block::new(
            Rational::one(),
            self.light_position.clone(),
            self.light_velocity.clone(),
        );
        let heavy = Block::new(
            Rational::from_integer(mass_ratio(digits)),
            self.heavy_position.clone(),
            self.heavy_velocity.clone(),
        );

        Ok(Scenario {
            digits,
            initial: SimulationState::new(light, heavy),
        })
    }
}

/// `100^N`
pub fn mass_ratio(digits: u32) -> BigInt {
    BigInt::from(100u32).pow(digits)
}

/// A validated starting point for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    digits: u32,
    initial: SimulationState,
}

impl Scenario {
    /// Validated form of [`SimulationConfig::canonical`]
    pub fn canonical(digits: u32) -> Self {
        let light = Block::new(Rational::one(), zero(), zero());
        let heavy = Block::new(
            Rational::from_integer(mass_ratio(digits)),
            default_heavy_position(),
            rational(-1),
        );
        Self {
            digits,
            initial: SimulationState::new(light, heavy),
        }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn initial_state(&self) -> &SimulationState {
        &self.initial
    }

    /// `sqrt(m_heavy / m_light) = 10^N`
    pub fn sqrt_mass_ratio(&self) -> BigInt {
        BigInt::from(10u32).pow(self.digits)
    }

    /// Light block at rest and heavy block approaching: the count is
    /// then the leading digits of pi
    pub fn is_canonical(&self) -> bool {
        self.initial.light.velocity.is_zero()
    }
}

/// Resource bounds for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest `N` the event-driven path agrees to enumerate
    pub max_enumerated_digits: u32,
    /// Largest fixed-point precision the fast path may use
    pub precision_budget_bits: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_enumerated_digits: 3,
            precision_budget_bits: 1 << 18,
        }
    }
}
