use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::ground_truth::MarkerId;

/// Tunable trial parameters. Defaults mirror the standard pipe setup:
/// fifteen markers, a 0.3 flag bias, at most three flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialSettings {
    pub marker_count: u32,
    pub flag_probability: f64,
    pub flagged_cap: usize,
    /// Where exported assignment and result files land.
    pub data_dir: PathBuf,
}

impl Default for TrialSettings {
    fn default() -> Self {
        Self {
            marker_count: 15,
            flag_probability: 0.3,
            flagged_cap: 3,
            data_dir: PathBuf::from("."),
        }
    }
}

impl TrialSettings {
    /// The contiguous id range covered by this trial.
    pub fn marker_ids(&self) -> Vec<MarkerId> {
        (0..self.marker_count).collect()
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<TrialSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            TrialSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn trial(&self) -> TrialSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update_trial(&self, settings: TrialSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &TrialSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

impl SettingsStore {
    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: TrialSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
