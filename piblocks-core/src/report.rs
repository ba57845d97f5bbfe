//! Collision counts and digit strings for callers
//!
//! [`compute`] picks a counting strategy and wraps the result in a
//! [`Report`]; [`cross_validate`] runs both strategies and insists they
//! agree.

use crate::config::{Limits, Scenario};
use crate::engine::{CancellationToken, Simulation};
use crate::error::{Error, Result};
use crate::event::EventLog;
use crate::fast_path::FastPathCounter;
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// How the collision count is obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Enumerate every collision exactly
    EventDriven,
    /// Closed-form count from the initial configuration
    FastPath,
    /// Event-driven while N is within the enumeration bound, else fast path
    #[default]
    Auto,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event-driven" | "event" => Ok(Strategy::EventDriven),
            "fast-path" | "fast" => Ok(Strategy::FastPath),
            "auto" => Ok(Strategy::Auto),
            _ => Err(format!(
                "Invalid strategy: '{}'. Must be 'event-driven', 'fast-path', or 'auto'",
                s
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::EventDriven => write!(f, "event-driven"),
            Strategy::FastPath => write!(f, "fast-path"),
            Strategy::Auto => write!(f, "auto"),
        }
    }
}

impl Strategy {
    /// Replace `Auto` with the concrete strategy for `digits`
    pub fn resolve(self, digits: u32, limits: &Limits) -> Strategy {
        match self {
            Strategy::Auto if digits <= limits.max_enumerated_digits => Strategy::EventDriven,
            Strategy::Auto => Strategy::FastPath,
            other => other,
        }
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of counting one scenario
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub digits: u32,
    /// The strategy actually used, never `Auto`
    pub strategy: Strategy,
    #[serde(serialize_with = "serialize_display")]
    pub collision_count: BigUint,
    /// ASCII decimal of the count; for the canonical start this is the
    /// first `N + 1` digits of pi
    pub digit_string: String,
    #[serde(skip)]
    pub events: Option<EventLog>,
}

impl Report {
    fn new(digits: u32, strategy: Strategy, count: BigUint, events: Option<EventLog>) -> Self {
        Self {
            digits,
            strategy,
            digit_string: count.to_string(),
            collision_count: count,
            events,
        }
    }
}

/// Enumerate every collision, keeping the log when `record` is set
pub fn enumerate(
    scenario: &Scenario,
    limits: &Limits,
    record: bool,
    cancel: Option<CancellationToken>,
) -> Result<Report> {
    let mut simulation = Simulation::new(scenario, limits)?.record_events(record);
    if let Some(token) = cancel {
        simulation = simulation.with_cancellation(token);
    }
    let outcome = simulation.run()?;
    Ok(Report::new(
        scenario.digits(),
        Strategy::EventDriven,
        BigUint::from(outcome.collisions),
        outcome.log,
    ))
}

/// Count collisions with the requested strategy
pub fn compute(scenario: &Scenario, strategy: Strategy, limits: &Limits) -> Result<Report> {
    match strategy.resolve(scenario.digits(), limits) {
        Strategy::FastPath => {
            let count = FastPathCounter::new(limits).count(scenario)?;
            Ok(Report::new(scenario.digits(), Strategy::FastPath, count, None))
        }
        _ => enumerate(scenario, limits, true, None),
    }
}

/// Run both strategies and fail unless their counts match exactly.
/// Returns the event-driven report, log included.
pub fn cross_validate(scenario: &Scenario, limits: &Limits) -> Result<Report> {
    let enumerated = enumerate(scenario, limits, true, None)?;
    let fast_path = FastPathCounter::new(limits).count(scenario)?;
    if enumerated.collision_count != fast_path {
        return Err(Error::CountMismatch {
            event_driven: enumerated.collision_count,
            fast_path,
        });
    }
    info!(
        digits = scenario.digits(),
        count = %fast_path,
        "event-driven and fast-path counts agree"
    );
    Ok(enumerated)
}
