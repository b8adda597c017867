//! Trial setup: draw the marker ground truth and export it for the live
//! inspection feed and the later scoring pass.

use anyhow::Result;
use chrono::Utc;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use pipetrial::ground_truth::{generate, GroundTruthRecord};
use pipetrial::settings::SettingsStore;
use pipetrial::storage::{timestamped_name, write_assignment};

fn main() -> Result<()> {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "trial_settings.json".to_string());
    let store = SettingsStore::new(PathBuf::from(settings_path))?;
    let settings = store.trial();

    let mut rng = StdRng::from_entropy();
    let assignment = generate(
        &settings.marker_ids(),
        settings.flag_probability,
        settings.flagged_cap,
        &mut rng,
    )?;
    let record = GroundTruthRecord::from_assignment(assignment);

    let path = settings
        .data_dir
        .join(timestamped_name("marker_assignments", "csv", Utc::now()));
    write_assignment(&path, &record.assignment)?;

    info!(
        "assignment written to {}: {} markers, {} flagged, any_flagged={}",
        path.display(),
        record.assignment.len(),
        record.assignment.flagged_count(),
        record.any_flagged,
    );
    Ok(())
}
