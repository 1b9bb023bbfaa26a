use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Tunables for the gaze host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSettings {
    /// Delay before a gaze-aware-with-inertia interactor reports gaze, in
    /// milliseconds.
    pub gaze_aware_delay_ms: u64,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            gaze_aware_delay_ms: 500,
        }
    }
}

/// JSON-file-backed store for `HostSettings`.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<HostSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            HostSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> HostSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: HostSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &HostSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
