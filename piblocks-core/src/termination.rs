use crate::state::SimulationState;
use num_traits::Signed;

/// No future collision is possible.
///
/// The light block must not be heading for the wall and must not be
/// gaining on the heavy block: `0 ≤ light.velocity ≤ heavy.velocity`.
/// This holds exactly when the scheduler has no candidate.
pub fn is_terminal(state: &SimulationState) -> bool {
    !state.light.velocity.is_negative() && state.light.velocity <= state.heavy.velocity
}
