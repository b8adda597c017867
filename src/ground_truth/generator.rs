//! Randomized ground-truth generation with a hard cap on flagged markers.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use super::{Assignment, MarkerId, MarkerState};
use crate::error::ExperimentError;

/// Assign a state to every marker: an independent draw at `flag_probability`
/// per id, then a demotion pass so at most `cap` markers stay flagged.
///
/// Selection among over-cap candidates is a uniform sample without
/// replacement, not first-N in draw order, so no id is systematically
/// favored. `count(flagged) <= cap` holds for every valid input.
pub fn generate<R: Rng>(
    marker_ids: &[MarkerId],
    flag_probability: f64,
    cap: usize,
    rng: &mut R,
) -> Result<Assignment, ExperimentError> {
    if marker_ids.is_empty() {
        return Err(ExperimentError::EmptyMarkerSet);
    }
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&flag_probability) {
        return Err(ExperimentError::InvalidFlagProbability(flag_probability));
    }

    let candidates: Vec<MarkerId> = marker_ids
        .iter()
        .copied()
        .filter(|_| rng.gen_bool(flag_probability))
        .collect();

    let flagged: Vec<MarkerId> = if candidates.len() > cap {
        candidates.choose_multiple(rng, cap).copied().collect()
    } else {
        candidates
    };

    let mut states: BTreeMap<MarkerId, MarkerState> = marker_ids
        .iter()
        .map(|&id| (id, MarkerState::Normal))
        .collect();
    for id in flagged {
        states.insert(id, MarkerState::Flagged);
    }

    Ok(Assignment::new(states))
}
