//! External truth input, response input, and the append-only result log.

use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::scoring::{ParticipantResponse, ScoreResult};

const RESULT_HEADER: &str = "scored_at,participant_id,trial_id,external_guess,\
external_correct,derived_guess,derived_correct,markers_correct,score";

/// The independently-authored truth for the trial: `1` for a leak, `0` for
/// none. Authored by the experimenter, never by this crate.
pub fn read_external_truth(path: &Path) -> Result<bool> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read external truth from {}", path.display()))?;
    match contents.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => bail!("external truth must be 0 or 1, got {other:?}"),
    }
}

/// Participant response as submitted through the reporting form.
pub fn read_response(path: &Path) -> Result<ParticipantResponse> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read response from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse response in {}", path.display()))
}

/// Append one scored submission to the result log, writing the header when
/// the file is first created. Rows are never rewritten; a resubmission for
/// the same participant and trial lands as a second row.
pub fn append_result(path: &Path, result: &ScoreResult) -> Result<()> {
    let new_file = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open result log {}", path.display()))?;

    if new_file {
        writeln!(file, "{RESULT_HEADER}")?;
    }
    writeln!(
        file,
        "{},{},{},{},{},{},{},{},{:.1}",
        result.scored_at.format("%Y-%m-%dT%H:%M:%S"),
        result.participant_id,
        result.trial_id,
        result.external_guess as u8,
        result.external_correct as u8,
        result.derived_guess as u8,
        result.derived_correct as u8,
        result.markers_correct as u8,
        result.score,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_truth::{Assignment, MarkerState};
    use crate::scoring::{score_response, ScoreWeights};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn sample_result() -> ScoreResult {
        let mut states = BTreeMap::new();
        states.insert(0, MarkerState::Flagged);
        let assignment = Assignment::new(states);
        let response = ParticipantResponse {
            participant_id: "p01".to_string(),
            trial_id: "t01".to_string(),
            external_guess: Some(true),
            derived_guess: Some(true),
            marker_guesses: [(0, MarkerState::Flagged)].into_iter().collect(),
        };
        score_response(
            &assignment,
            true,
            &response,
            &ScoreWeights::default(),
            Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn truth_file_parses_zero_and_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truth.txt");

        fs::write(&path, "1\n").unwrap();
        assert!(read_external_truth(&path).unwrap());

        fs::write(&path, "0").unwrap();
        assert!(!read_external_truth(&path).unwrap());

        fs::write(&path, "yes").unwrap();
        assert!(read_external_truth(&path).is_err());
    }

    #[test]
    fn log_gets_one_header_and_one_row_per_submission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let result = sample_result();
        append_result(&path, &result).unwrap();
        append_result(&path, &result).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], RESULT_HEADER);
        assert!(lines[1].starts_with("2024-03-04T12:00:00,p01,t01,1,1,1,1,1,100.0"));
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn response_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(
            &path,
            r#"{
                "participantId": "p02",
                "trialId": "t09",
                "externalGuess": true,
                "derivedGuess": false,
                "markerGuesses": { "0": "normal", "1": "flagged" }
            }"#,
        )
        .unwrap();

        let response = read_response(&path).unwrap();
        assert_eq!(response.participant_id, "p02");
        assert_eq!(response.external_guess, Some(true));
        assert_eq!(response.marker_guesses.get(&1), Some(&MarkerState::Flagged));
    }

    #[test]
    fn absent_ids_default_to_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(
            &path,
            r#"{ "externalGuess": true, "derivedGuess": true, "markerGuesses": {} }"#,
        )
        .unwrap();

        let response = read_response(&path).unwrap();
        assert_eq!(response.participant_id, "N/A");
        assert_eq!(response.trial_id, "N/A");
    }
}
