//! Event scheduler: finds the next collision analytically
//!
//! Both candidate delays are exact rationals, so the winner is decided
//! without any tolerance. On an exact tie the wall collision goes first;
//! the pair collision is then found again from the post-wall state with a
//! zero delay.

use crate::event::CollisionKind;
use crate::exact::Rational;
use crate::state::SimulationState;
use num_traits::{Signed, Zero};

/// The next collision and how long until it happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CollisionKind,
    /// Exact delay from the state's current time, never negative
    pub delay: Rational,
}

/// Delay until the light block reaches the wall, if it is moving toward it
pub fn wall_candidate(state: &SimulationState) -> Option<Rational> {
    let light = &state.light;
    if !light.velocity.is_negative() {
        return None;
    }
    Some(-&light.position / &light.velocity)
}

/// Delay until the blocks touch, if they are approaching each other.
///
/// Touching blocks that approach give a zero delay; point blocks can meet
/// exactly at the wall.
pub fn pair_candidate(state: &SimulationState) -> Option<Rational> {
    let closing_speed = &state.light.velocity - &state.heavy.velocity;
    if !closing_speed.is_positive() {
        return None;
    }
    let gap = &state.heavy.position - &state.light.position;
    let delay = gap / closing_speed;
    if delay.is_negative() {
        return None;
    }
    Some(delay)
}

/// Pick the earliest candidate; `None` means no collision can ever happen
pub fn next_event(state: &SimulationState) -> Option<Candidate> {
    match (wall_candidate(state), pair_candidate(state)) {
        (None, None) => None,
        (Some(delay), None) => Some(Candidate {
            kind: CollisionKind::Wall,
            delay,
        }),
        (None, Some(delay)) => Some(Candidate {
            kind: CollisionKind::Pair,
            delay,
        }),
        (Some(wall), Some(pair)) => {
            if wall <= pair {
                Some(Candidate {
                    kind: CollisionKind::Wall,
                    delay: wall,
                })
            } else {
                Some(Candidate {
                    kind: CollisionKind::Pair,
                    delay: pair,
                })
            }
        }
    }
}

/// True when the next collision happens at the current instant
pub fn is_immediate(candidate: &Candidate) -> bool {
    candidate.delay.is_zero()
}
