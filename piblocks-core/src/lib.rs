pub mod audit;
pub mod batch;
pub mod bracket;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod exact;
pub mod fast_path;
pub mod phase;
pub mod pi;
pub mod report;
pub mod resolver;
pub mod scheduler;
pub mod state;
pub mod termination;

pub use audit::{audit_log, AuditError};
pub use config::{Limits, Scenario, SimulationConfig};
pub use engine::{count_collisions, CancellationToken, Simulation, SimulationOutcome};
pub use error::{Error, Result};
pub use event::{CollisionEvent, CollisionKind, EventLog};
pub use exact::{format_rational, parse_rational, Rational};
pub use fast_path::{fast_count, FastPathCounter};
pub use report::{compute, cross_validate, enumerate, Report, Strategy};
pub use state::{Block, SimulationState, Wall};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
