//! Marker identity and per-trial state assignment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a fiducial marker within one trial.
/// Trials use a contiguous range starting at 0.
pub type MarkerId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MarkerState {
    Normal,
    Flagged,
}

impl MarkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerState::Normal => "normal",
            MarkerState::Flagged => "flagged",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "normal" => Some(MarkerState::Normal),
            "flagged" => Some(MarkerState::Flagged),
            _ => None,
        }
    }

    /// Outline color the live-feed renderer draws this state with (RGB).
    pub fn highlight_color(&self) -> (u8, u8, u8) {
        match self {
            MarkerState::Normal => (0, 255, 0),
            MarkerState::Flagged => (255, 0, 0),
        }
    }
}

/// One trial's marker-state assignment, covering every marker id exactly
/// once. Immutable after generation; iteration is in ascending id order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    states: BTreeMap<MarkerId, MarkerState>,
}

impl Assignment {
    pub fn new(states: BTreeMap<MarkerId, MarkerState>) -> Self {
        Self { states }
    }

    pub fn get(&self, id: MarkerId) -> Option<MarkerState> {
        self.states.get(&id).copied()
    }

    pub fn marker_ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.states.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, MarkerState)> + '_ {
        self.states.iter().map(|(&id, &state)| (id, state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn flagged_count(&self) -> usize {
        self.states
            .values()
            .filter(|&&state| state == MarkerState::Flagged)
            .count()
    }

    /// Derived truth the participant is later quizzed on.
    pub fn any_flagged(&self) -> bool {
        self.states
            .values()
            .any(|&state| state == MarkerState::Flagged)
    }
}

/// Persisted form of the ground truth: the raw assignment plus the derived
/// "any marker flagged" fact, read back by the scorer and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundTruthRecord {
    pub any_flagged: bool,
    pub assignment: Assignment,
}

impl GroundTruthRecord {
    pub fn from_assignment(assignment: Assignment) -> Self {
        Self {
            any_flagged: assignment.any_flagged(),
            assignment,
        }
    }
}
