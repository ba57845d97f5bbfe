//! Event-driven collision engine
//!
//! One run is a strictly sequential loop: the scheduler finds the next
//! collision, the resolver applies it, and the termination detector decides
//! whether another one can ever happen. Nothing is shared between runs.

use crate::config::{Limits, Scenario};
use crate::error::{Error, Result};
use crate::event::{CollisionEvent, CollisionKind, EventLog};
use crate::resolver::resolve;
use crate::scheduler::{is_immediate, next_event};
use crate::state::SimulationState;
use crate::termination::is_terminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

/// Cooperative cancellation flag, checked once per event
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Final result of an event-driven run
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub digits: u32,
    pub final_state: SimulationState,
    /// `None` when the run was count-only
    pub log: Option<EventLog>,
    pub collisions: u64,
}

/// A single event-driven run
#[derive(Debug)]
pub struct Simulation {
    digits: u32,
    state: SimulationState,
    log: Option<EventLog>,
    collisions: u64,
    finished: bool,
    cancel: Option<CancellationToken>,
}

impl Simulation {
    /// Refuses scenarios whose event count is too large to enumerate
    pub fn new(scenario: &Scenario, limits: &Limits) -> Result<Self> {
        if scenario.digits() > limits.max_enumerated_digits {
            return Err(Error::EnumerationTooLarge {
                digits: scenario.digits(),
                max_digits: limits.max_enumerated_digits,
            });
        }

        let state = scenario.initial_state().clone();
        let finished = is_terminal(&state);
        Ok(Self {
            digits: scenario.digits(),
            state,
            log: Some(EventLog::new()),
            collisions: 0,
            finished,
            cancel: None,
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Keep a full [`EventLog`] (the default) or only count collisions
    pub fn record_events(mut self, record: bool) -> Self {
        self.log = record.then(EventLog::new);
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn log(&self) -> Option<&EventLog> {
        self.log.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Resolve exactly one collision.
    ///
    /// Returns `Ok(None)` once the termination detector has fired.
    pub fn step(&mut self) -> Result<Option<CollisionKind>> {
        if self.finished {
            return Ok(None);
        }
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(Error::Cancelled {
                collisions: self.collisions,
            });
        }

        let Some(candidate) = next_event(&self.state) else {
            // The detector fires on exactly the states without a candidate
            debug_assert!(is_terminal(&self.state));
            self.finished = true;
            return Ok(None);
        };

        resolve(&mut self.state, &candidate);
        self.collisions += 1;
        debug_assert!(self.state.is_ordered(), "blocks overlapped");

        trace!(
            index = self.collisions,
            kind = %candidate.kind,
            immediate = is_immediate(&candidate),
            "collision resolved"
        );

        if let Some(log) = self.log.as_mut() {
            log.push(CollisionEvent {
                index: self.collisions,
                kind: candidate.kind,
                time: self.state.time.clone(),
                state: self.state.clone(),
            });
        }

        self.finished = is_terminal(&self.state);
        Ok(Some(candidate.kind))
    }

    /// Run to the terminal state
    pub fn run(mut self) -> Result<SimulationOutcome> {
        let span = debug_span!("simulate", digits = self.digits);
        let _guard = span.enter();

        while self.step()?.is_some() {}

        debug!(collisions = self.collisions, "reached terminal state");
        Ok(SimulationOutcome {
            digits: self.digits,
            final_state: self.state,
            log: self.log,
            collisions: self.collisions,
        })
    }
}

/// Count collisions by enumeration without keeping the log
pub fn count_collisions(scenario: &Scenario, limits: &Limits) -> Result<u64> {
    Simulation::new(scenario, limits)?
        .record_events(false)
        .run()
        .map(|outcome| outcome.collisions)
}
