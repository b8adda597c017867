//! Assignment export/import: the file contract shared by the live feed and
//! the later scoring pass.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::ground_truth::{Assignment, MarkerId, MarkerState};

const ASSIGNMENT_HEADER: &str = "marker_id,state";

/// Export the trial's assignment, one row per marker in ascending id order.
pub fn write_assignment(path: &Path, assignment: &Assignment) -> Result<()> {
    let mut contents = String::from(ASSIGNMENT_HEADER);
    contents.push('\n');
    for (id, state) in assignment.iter() {
        let _ = writeln!(contents, "{},{}", id, state.as_str());
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write assignment to {}", path.display()))
}

/// Read an exported assignment back. Round-trips [`write_assignment`]
/// exactly: same ids, same states.
pub fn read_assignment(path: &Path) -> Result<Assignment> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read assignment from {}", path.display()))?;

    let mut states: BTreeMap<MarkerId, MarkerState> = BTreeMap::new();
    for (index, line) in contents.lines().enumerate() {
        if index == 0 {
            if line != ASSIGNMENT_HEADER {
                bail!("unexpected assignment header {line:?} in {}", path.display());
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let row = index + 1;
        let (id_text, state_text) = line
            .split_once(',')
            .with_context(|| format!("malformed assignment row {row}: {line:?}"))?;
        let id: MarkerId = id_text
            .parse()
            .with_context(|| format!("bad marker id in row {row}: {id_text:?}"))?;
        let state = MarkerState::parse(state_text)
            .with_context(|| format!("bad marker state in row {row}: {state_text:?}"))?;
        states.insert(id, state);
    }

    if states.is_empty() {
        bail!("assignment file {} holds no marker rows", path.display());
    }
    Ok(Assignment::new(states))
}
