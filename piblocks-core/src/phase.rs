//! Phase-space view of a run for visualization layers
//!
//! Each state maps to `(√m₁·v₁, √m₂·v₂)`, which stays on a circle of radius
//! `√(2E)`. The points are `f64` approximations and are never fed back into
//! the engine.

use crate::event::EventLog;
use crate::exact::to_f64_lossy;
use crate::state::SimulationState;
use glam::DVec2;

/// Lossy phase-space point of a state
pub fn phase_point(state: &SimulationState) -> DVec2 {
    let light = &state.light;
    let heavy = &state.heavy;
    DVec2::new(
        to_f64_lossy(&light.mass).sqrt() * to_f64_lossy(&light.velocity),
        to_f64_lossy(&heavy.mass).sqrt() * to_f64_lossy(&heavy.velocity),
    )
}

/// The initial point followed by one point per collision
#[derive(Debug, Clone)]
pub struct PhaseTrace {
    pub points: Vec<DVec2>,
    /// `√(2E)` of the initial state
    pub radius: f64,
}

impl PhaseTrace {
    pub fn from_run(initial: &SimulationState, log: &EventLog) -> Self {
        let points = std::iter::once(phase_point(initial))
            .chain(log.iter().map(|event| phase_point(&event.state)))
            .collect();
        let radius = (2.0 * to_f64_lossy(&initial.kinetic_energy())).sqrt();
        Self { points, radius }
    }

    /// Largest distance of any point from the energy circle
    pub fn max_radius_deviation(&self) -> f64 {
        self.points
            .iter()
            .map(|p| (p.length() - self.radius).abs())
            .fold(0.0, f64::max)
    }

    /// Angle each point makes with the positive x axis, in radians
    pub fn angles(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y.atan2(p.x)).collect()
    }
}
