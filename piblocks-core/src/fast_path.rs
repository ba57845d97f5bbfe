//! Closed-form collision counter
//!
//! In the phase-space coordinates `p = (√m₁·v₁, √m₂·v₂)` kinetic energy is
//! `|p|²/2`, so every state lies on one circle. A wall collision mirrors
//! `p` across the vertical axis and a pair collision mirrors it across the
//! momentum line through `u = (√m₁, √m₂)`. The two mirrors are `θ` apart
//! with `tan θ = √(m₁/m₂) = 10^-N`, so each wall+pair round rotates `p` by
//! `2θ`, and the number of collisions is the number of `θ` steps needed
//! to sweep `p` into the wedge where the blocks separate for good.
//!
//! Only the first collision depends on positions; after it the kinds
//! strictly alternate. The first kind comes from the event scheduler:
//!
//! * pair first: `ceil(angle(p → u) / θ)`
//! * wall first: `ceil(angle(+y → p) / θ)`
//!
//! where `angle(a → b)` is the counter-clockwise angle from `a` to `b`.

use crate::bracket::{Angles, Bracket};
use crate::config::{Limits, Scenario};
use crate::error::{Error, Result};
use crate::event::CollisionKind;
use crate::scheduler::next_event;
use crate::state::SimulationState;
use num_bigint::{BigInt, BigUint};
use num_complex::Complex;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::{debug, debug_span, trace};

/// Largest `turns·(N + 1)` for which an exact rotation test is attempted
const EXACT_ROTATION_DIGITS: u64 = 1 << 20;

type Direction = (BigInt, BigInt);

/// Outcome of comparing a sweep angle against `θ` at one precision
#[derive(Debug, Clone, PartialEq, Eq)]
enum Settle {
    Count(BigInt),
    /// The quotient may be exactly this integer
    Straddles(BigInt),
    Unsettled,
}

/// Counts collisions from the initial configuration alone
#[derive(Debug, Clone)]
pub struct FastPathCounter {
    budget_bits: u32,
}

impl FastPathCounter {
    pub fn new(limits: &Limits) -> Self {
        Self {
            budget_bits: limits.precision_budget_bits,
        }
    }

    pub fn count(&self, scenario: &Scenario) -> Result<BigUint> {
        let span = debug_span!("fast_path", digits = scenario.digits());
        let _guard = span.enter();

        let initial = scenario.initial_state();
        let Some(first) = next_event(initial) else {
            debug!("no collision possible from the initial state");
            return Ok(BigUint::zero());
        };

        let scale = scenario.sqrt_mass_ratio();
        let point = phase_direction(initial, &scale);
        let (from, to) = match first.kind {
            CollisionKind::Pair => (point, (BigInt::one(), scale.clone())),
            CollisionKind::Wall => ((BigInt::zero(), BigInt::one()), point),
        };

        let mut bits = initial_bits(scenario.digits()).min(self.budget_bits);
        let mut rejected: Option<BigInt> = None;
        loop {
            let angles = Angles::new(bits);
            let sweep = angles.ccw_between(&from, &to);
            let theta = angles.arctan(&BigInt::one(), &scale);

            match settle(&sweep, &theta) {
                Settle::Count(count) => {
                    debug!(bits, %count, "count settled");
                    return Ok(count.magnitude().clone());
                }
                Settle::Straddles(turns) if rejected.as_ref() != Some(&turns) => {
                    if rotates_onto(&from, &to, &scale, &turns, scenario.digits()) {
                        debug!(bits, %turns, "sweep is an exact multiple of the step angle");
                        return Ok(turns.magnitude().clone());
                    }
                    rejected = Some(turns);
                }
                _ => {}
            }

            if bits >= self.budget_bits {
                return Err(Error::PrecisionBudgetExceeded {
                    budget_bits: self.budget_bits,
                });
            }
            trace!(bits, "count unsettled, doubling precision");
            bits = bits.saturating_mul(2).min(self.budget_bits);
        }
    }
}

/// Convenience wrapper around [`FastPathCounter::count`]
pub fn fast_count(scenario: &Scenario, limits: &Limits) -> Result<BigUint> {
    FastPathCounter::new(limits).count(scenario)
}

/// Enough bits for `θ ≈ 10^-N` and a quotient near `π·10^N`
fn initial_bits(digits: u32) -> u32 {
    digits.saturating_mul(7).saturating_add(64)
}

/// Integer direction of `(v_light, 10^N·v_heavy)`, scaled by a positive
/// common denominator
fn phase_direction(state: &SimulationState, scale: &BigInt) -> Direction {
    let light = &state.light.velocity;
    let heavy = &state.heavy.velocity;
    let common = light.denom().lcm(heavy.denom());
    let x = light.numer() * (&common / light.denom());
    let y = scale * heavy.numer() * (&common / heavy.denom());
    (x, y)
}

/// `ceil(sweep / θ)` if both ends of the enclosure agree
fn settle(sweep: &Bracket, theta: &Bracket) -> Settle {
    if !theta.lo().is_positive() {
        return Settle::Unsettled;
    }
    let low = sweep.lo().div_ceil(theta.hi());
    let high = sweep.hi().div_ceil(theta.lo());
    if low == high {
        Settle::Count(low)
    } else if &low + BigInt::one() == high {
        Settle::Straddles(low)
    } else {
        Settle::Unsettled
    }
}

/// Exact test that rotating `from` counter-clockwise by `turns·θ` lands on
/// `to`. `θ` is the argument of the Gaussian integer `10^N + i`.
fn rotates_onto(
    from: &Direction,
    to: &Direction,
    scale: &BigInt,
    turns: &BigInt,
    digits: u32,
) -> bool {
    let Some(turns) = turns.to_u32().filter(|t| *t > 0) else {
        return false;
    };
    if u64::from(turns) * (u64::from(digits) + 1) > EXACT_ROTATION_DIGITS {
        return false;
    }

    let step = Complex::new(scale.clone(), BigInt::one());
    let rotated = Complex::new(from.0.clone(), from.1.clone()) * step.powu(turns);
    let cross = &rotated.re * &to.1 - &rotated.im * &to.0;
    let dot = &rotated.re * &to.0 + &rotated.im * &to.1;
    cross.is_zero() && dot.is_positive()
}
