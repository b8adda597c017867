//! Response validation and weighted scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::config::ScoreWeights;
use crate::error::ExperimentError;
use crate::ground_truth::{Assignment, MarkerId, MarkerState};

/// A participant's recollection of one trial, as collected by the reporting
/// form. Guesses left unset keep the response incomplete; the scorer rejects
/// it rather than filling in zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    #[serde(default = "missing_id")]
    pub participant_id: String,

    #[serde(default = "missing_id")]
    pub trial_id: String,

    /// Claimed external truth (leak present).
    pub external_guess: Option<bool>,

    /// Claimed derived truth (any marker flagged).
    pub derived_guess: Option<bool>,

    /// Claimed state per marker id.
    #[serde(default)]
    pub marker_guesses: HashMap<MarkerId, MarkerState>,
}

fn missing_id() -> String {
    "N/A".to_string()
}

/// Immutable outcome of one scoring call, echoing every input alongside the
/// per-field verdicts. Appended to the result log, never overwritten.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub id: String,
    pub participant_id: String,
    pub trial_id: String,
    pub scored_at: DateTime<Utc>,
    pub external_truth: bool,
    pub external_guess: bool,
    pub external_correct: bool,
    pub derived_truth: bool,
    pub derived_guess: bool,
    pub derived_correct: bool,
    pub marker_guesses: HashMap<MarkerId, MarkerState>,
    pub markers_correct: bool,
    /// Weighted percentage in [0, 100].
    pub score: f64,
}

/// Reconcile a fully-populated response against the recorded truths.
///
/// Fails with [`ExperimentError::IncompleteResponse`] naming every missing
/// field before any component is scored. The markers component is
/// all-or-nothing: a single wrong per-marker guess zeroes it. Deterministic
/// given its inputs.
pub fn score_response(
    assignment: &Assignment,
    external_truth: bool,
    response: &ParticipantResponse,
    weights: &ScoreWeights,
    scored_at: DateTime<Utc>,
) -> Result<ScoreResult, ExperimentError> {
    let mut missing: Vec<String> = Vec::new();
    if response.external_guess.is_none() {
        missing.push("external_guess".to_string());
    }
    if response.derived_guess.is_none() {
        missing.push("derived_guess".to_string());
    }
    for id in assignment.marker_ids() {
        if !response.marker_guesses.contains_key(&id) {
            missing.push(format!("marker_guesses[{id}]"));
        }
    }
    if !missing.is_empty() {
        return Err(ExperimentError::IncompleteResponse(missing.join(", ")));
    }

    let derived_truth = assignment.any_flagged();
    let external_guess = response.external_guess.unwrap();
    let derived_guess = response.derived_guess.unwrap();

    let external_correct = external_guess == external_truth;
    let derived_correct = derived_guess == derived_truth;
    let markers_correct = assignment
        .iter()
        .all(|(id, state)| response.marker_guesses.get(&id) == Some(&state));

    let mut score = 0.0;
    if external_correct {
        score += weights.weight_external;
    }
    if derived_correct {
        score += weights.weight_derived;
    }
    if markers_correct {
        score += weights.weight_markers;
    }

    Ok(ScoreResult {
        id: Uuid::new_v4().to_string(),
        participant_id: response.participant_id.clone(),
        trial_id: response.trial_id.clone(),
        scored_at,
        external_truth,
        external_guess,
        external_correct,
        derived_truth,
        derived_guess,
        derived_correct,
        marker_guesses: response.marker_guesses.clone(),
        markers_correct,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    const TOLERANCE: f64 = 1e-9;

    fn assignment_two_markers() -> Assignment {
        let mut states = BTreeMap::new();
        states.insert(0, MarkerState::Flagged);
        states.insert(1, MarkerState::Normal);
        Assignment::new(states)
    }

    fn response(
        external: Option<bool>,
        derived: Option<bool>,
        guesses: &[(MarkerId, MarkerState)],
    ) -> ParticipantResponse {
        ParticipantResponse {
            participant_id: "p01".to_string(),
            trial_id: "t01".to_string(),
            external_guess: external,
            derived_guess: derived,
            marker_guesses: guesses.iter().copied().collect(),
        }
    }

    fn scored_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn everything_correct_scores_one_hundred() {
        let result = score_response(
            &assignment_two_markers(),
            true,
            &response(
                Some(true),
                Some(true),
                &[(0, MarkerState::Flagged), (1, MarkerState::Normal)],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap();

        assert!(result.derived_truth);
        assert!(result.external_correct && result.derived_correct && result.markers_correct);
        assert!((result.score - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn one_wrong_marker_zeroes_the_marker_component() {
        let result = score_response(
            &assignment_two_markers(),
            true,
            &response(
                Some(true),
                Some(true),
                &[(0, MarkerState::Normal), (1, MarkerState::Normal)],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap();

        assert!(!result.markers_correct);
        assert!((result.score - 66.7).abs() < TOLERANCE);
    }

    #[test]
    fn derived_truth_false_when_nothing_flagged() {
        let mut states = BTreeMap::new();
        states.insert(0, MarkerState::Normal);
        states.insert(1, MarkerState::Normal);
        let assignment = Assignment::new(states);

        let result = score_response(
            &assignment,
            false,
            &response(
                Some(false),
                Some(false),
                &[(0, MarkerState::Normal), (1, MarkerState::Normal)],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap();

        assert!(!result.derived_truth);
        assert!((result.score - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn wrong_external_guess_loses_only_its_weight() {
        let result = score_response(
            &assignment_two_markers(),
            true,
            &response(
                Some(false),
                Some(true),
                &[(0, MarkerState::Flagged), (1, MarkerState::Normal)],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap();

        assert!(!result.external_correct);
        assert!((result.score - 66.6).abs() < TOLERANCE);
    }

    #[test]
    fn missing_derived_guess_rejects_the_response() {
        let err = score_response(
            &assignment_two_markers(),
            true,
            &response(
                Some(true),
                None,
                &[(0, MarkerState::Flagged), (1, MarkerState::Normal)],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap_err();

        match err {
            ExperimentError::IncompleteResponse(missing) => {
                assert_eq!(missing, "derived_guess");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_marker_guess_rejects_the_response() {
        let err = score_response(
            &assignment_two_markers(),
            true,
            &response(Some(true), Some(true), &[(0, MarkerState::Flagged)]),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap_err();

        match err {
            ExperimentError::IncompleteResponse(missing) => {
                assert_eq!(missing, "marker_guesses[1]");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn extra_marker_guesses_are_ignored() {
        let result = score_response(
            &assignment_two_markers(),
            true,
            &response(
                Some(true),
                Some(true),
                &[
                    (0, MarkerState::Flagged),
                    (1, MarkerState::Normal),
                    (7, MarkerState::Flagged),
                ],
            ),
            &ScoreWeights::default(),
            scored_at(),
        )
        .unwrap();

        assert!(result.markers_correct);
    }
}
