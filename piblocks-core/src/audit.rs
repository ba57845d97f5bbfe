//! Replay checks over a finished event log
//!
//! The log is the proof trace of a run. Auditing it re-derives every
//! invariant from the recorded states alone, with exact equality.

use crate::event::{CollisionKind, EventLog};
use crate::state::SimulationState;
use crate::termination::is_terminal;
use thiserror::Error;

/// An invariant that does not hold at some event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("event {index}: expected index {expected}")]
    IndexGap { index: u64, expected: u64 },

    #[error("event {index}: event time differs from the recorded state time")]
    TimeMismatch { index: u64 },

    #[error("event {index}: time went backwards")]
    TimeReversed { index: u64 },

    #[error("event {index}: two {kind} collisions in a row")]
    RepeatedKind { index: u64, kind: CollisionKind },

    #[error("event {index}: blocks out of order or behind the wall")]
    Overlap { index: u64 },

    #[error("event {index}: kinetic energy changed")]
    EnergyChanged { index: u64 },

    #[error("event {index}: momentum changed across a pair collision")]
    MomentumChanged { index: u64 },

    #[error("log ends in a state from which another collision is possible")]
    NotTerminal,
}

/// Check a log against the state it started from
pub fn audit_log(initial: &SimulationState, log: &EventLog) -> Result<(), AuditError> {
    let energy = initial.kinetic_energy();
    let mut previous = initial;
    let mut previous_kind: Option<CollisionKind> = None;

    for (expected, event) in (1u64..).zip(log.iter()) {
        let index = event.index;
        let state = &event.state;

        if index != expected {
            return Err(AuditError::IndexGap { index, expected });
        }
        if event.time != state.time {
            return Err(AuditError::TimeMismatch { index });
        }
        if state.time < previous.time {
            return Err(AuditError::TimeReversed { index });
        }
        if previous_kind == Some(event.kind) {
            return Err(AuditError::RepeatedKind {
                index,
                kind: event.kind,
            });
        }
        if !state.is_ordered() {
            return Err(AuditError::Overlap { index });
        }
        if state.kinetic_energy() != energy {
            return Err(AuditError::EnergyChanged { index });
        }
        if event.kind == CollisionKind::Pair && state.momentum() != previous.momentum() {
            return Err(AuditError::MomentumChanged { index });
        }

        previous = state;
        previous_kind = Some(event.kind);
    }

    if !is_terminal(previous) {
        return Err(AuditError::NotTerminal);
    }
    Ok(())
}
