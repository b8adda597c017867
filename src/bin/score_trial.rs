//! Recall scoring: reconcile a participant's submitted response with the
//! recorded ground truth and append one row to the result log.

use anyhow::{bail, Result};
use chrono::Utc;
use log::info;
use std::path::{Path, PathBuf};

use pipetrial::scoring::{score_response, ScoreWeights};
use pipetrial::storage::{append_result, read_assignment, read_external_truth, read_response};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (assignment_path, truth_path, response_path, results_path) =
        match (args.next(), args.next(), args.next(), args.next()) {
            (Some(a), Some(t), Some(r), Some(o)) => (
                PathBuf::from(a),
                PathBuf::from(t),
                PathBuf::from(r),
                PathBuf::from(o),
            ),
            _ => bail!(
                "usage: score_trial <assignment.csv> <external_truth.txt> \
                 <response.json> <results.csv>"
            ),
        };

    // Reference files must exist before the scorer is invoked.
    require_file(&assignment_path)?;
    require_file(&truth_path)?;
    require_file(&response_path)?;

    let assignment = read_assignment(&assignment_path)?;
    let external_truth = read_external_truth(&truth_path)?;
    let response = read_response(&response_path)?;

    let result = score_response(
        &assignment,
        external_truth,
        &response,
        &ScoreWeights::default(),
        Utc::now(),
    )?;
    append_result(&results_path, &result)?;

    info!(
        "participant {} trial {}: score {:.1} (external {}, derived {}, markers {})",
        result.participant_id,
        result.trial_id,
        result.score,
        result.external_correct,
        result.derived_correct,
        result.markers_correct,
    );
    Ok(())
}

fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("required file {} does not exist", path.display());
    }
    Ok(())
}
