use std::fs;
use std::path::{Path, PathBuf};

use grossup_core::presentation::{PreferenceStore, Preferences};
use grossup_core::{FeeError, FeeResult};

const PREFS_ENV: &str = "GROSSUP_PREFS";
const PREFS_FILE: &str = "preferences.yaml";

/// Preferences persisted as YAML on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> FeeResult<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            FeeError::PreferenceError(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;
        if contents.trim().is_empty() {
            return Ok(Preferences::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| {
            FeeError::PreferenceError(format!("Failed to parse '{}': {}", self.path.display(), e))
        })
    }

    fn save(&self, prefs: &Preferences) -> FeeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FeeError::PreferenceError(format!(
                        "Failed to create '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let yaml = serde_yaml::to_string(prefs)
            .map_err(|e| FeeError::PreferenceError(e.to_string()))?;
        fs::write(&self.path, yaml).map_err(|e| {
            FeeError::PreferenceError(format!("Failed to write '{}': {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

/// Priority: `--prefs` > `$GROSSUP_PREFS` > `<config dir>/grossup/preferences.yaml`.
pub fn resolve_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var(PREFS_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    match dirs::config_dir() {
        Some(dir) => dir.join("grossup").join(PREFS_FILE),
        None => PathBuf::from(format!(".grossup-{PREFS_FILE}")),
    }
}
