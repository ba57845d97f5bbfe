use crate::event::CollisionKind;
use crate::exact::Rational;
use crate::scheduler::Candidate;
use crate::state::{SimulationState, Wall};

/// Post-collision velocities of a 1D perfectly elastic collision
pub fn elastic_velocities(
    m1: &Rational,
    v1: &Rational,
    m2: &Rational,
    v2: &Rational,
) -> (Rational, Rational) {
    let total = m1 + m2;
    let two = Rational::from_integer(2.into());
    let v1_after = ((m1 - m2) * v1 + &two * m2 * v2) / &total;
    let v2_after = ((m2 - m1) * v2 + &two * m1 * v1) / &total;
    (v1_after, v2_after)
}

/// Advance the state to the candidate's instant and apply the collision
pub fn resolve(state: &mut SimulationState, candidate: &Candidate) {
    state.advance(&candidate.delay);

    match candidate.kind {
        CollisionKind::Wall => {
            state.light.position = Wall::position();
            state.light.velocity = -&state.light.velocity;
        }
        CollisionKind::Pair => {
            let (light_after, heavy_after) = elastic_velocities(
                &state.light.mass,
                &state.light.velocity,
                &state.heavy.mass,
                &state.heavy.velocity,
            );
            state.light.velocity = light_after;
            state.heavy.velocity = heavy_after;
            state.light.position = state.heavy.position.clone();
        }
    }
}
