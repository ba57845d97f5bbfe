use crate::exact::{serde_rational, Rational};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

/// A point block sliding on the line to the right of the wall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(with = "serde_rational")]
    pub mass: Rational,
    #[serde(with = "serde_rational")]
    pub position: Rational,
    /// Signed; negative means moving toward the wall
    #[serde(with = "serde_rational")]
    pub velocity: Rational,
}

impl Block {
    pub fn new(mass: Rational, position: Rational, velocity: Rational) -> Self {
        Self {
            mass,
            position,
            velocity,
        }
    }

    pub fn momentum(&self) -> Rational {
        &self.mass * &self.velocity
    }

    /// `½·m·v²`
    pub fn kinetic_energy(&self) -> Rational {
        &self.mass * &self.velocity * &self.velocity / Rational::from_integer(2.into())
    }

    /// Move the block for `dt` at constant velocity
    pub fn advance(&mut self, dt: &Rational) {
        if !dt.is_zero() {
            self.position += &self.velocity * dt;
        }
    }
}

/// The fixed reflector at position 0.
///
/// Only the light block ever touches it; it never moves and absorbs any
/// momentum needed to reverse the light block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall;

impl Wall {
    pub fn position() -> Rational {
        Rational::zero()
    }
}

/// Snapshot of both blocks at an exact time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub light: Block,
    pub heavy: Block,
    #[serde(with = "serde_rational")]
    pub time: Rational,
}

impl SimulationState {
    pub fn new(light: Block, heavy: Block) -> Self {
        Self {
            light,
            heavy,
            time: Rational::zero(),
        }
    }

    pub fn momentum(&self) -> Rational {
        self.light.momentum() + self.heavy.momentum()
    }

    pub fn kinetic_energy(&self) -> Rational {
        self.light.kinetic_energy() + self.heavy.kinetic_energy()
    }

    /// `0 ≤ light.position ≤ heavy.position`
    pub fn is_ordered(&self) -> bool {
        !self.light.position.is_negative() && self.light.position <= self.heavy.position
    }

    /// Advance both blocks and the clock by `dt`
    pub fn advance(&mut self, dt: &Rational) {
        self.light.advance(dt);
        self.heavy.advance(dt);
        self.time += dt;
    }
}
