use crate::exact::{serde_rational, Rational};
use crate::state::SimulationState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pair of bodies touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionKind {
    /// Light block against the wall
    Wall,
    /// Light block against the heavy block
    Pair,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::Wall => write!(f, "wall"),
            CollisionKind::Pair => write!(f, "pair"),
        }
    }
}

/// One resolved collision and the state right after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// 1-based position in the log
    pub index: u64,
    pub kind: CollisionKind,
    #[serde(with = "serde_rational")]
    pub time: Rational,
    pub state: SimulationState,
}

/// Append-only history of one run, in non-decreasing time order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<CollisionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the engine appends, after the state mutation is complete
    pub(crate) fn push(&mut self, event: CollisionEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&CollisionEvent> {
        self.events.last()
    }

    pub fn count_of(&self, kind: CollisionKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Pretty JSON with every rational written exactly
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a CollisionEvent;
    type IntoIter = std::slice::Iter<'a, CollisionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
