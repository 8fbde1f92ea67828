//! Session settings
//!
//! Generic YAML loading/saving plus the editor session settings type.
//! Loading is forgiving: a missing or unparsable file falls back to
//! defaults with a log line instead of an error, so a stale settings
//! file never blocks startup.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor session settings
///
/// Everything here is a UI-adjustable default, persisted between
/// sessions; none of it changes transform semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Crossfade length in samples
    pub crossfade_len: usize,
    /// Waveform cycles assumed per loop pass when deriving loop pitch
    pub loop_cycles: u32,
    /// Tuning standard in Hz (frequency of A, MIDI 69)
    pub tune_standard: f64,
    /// Reference tone mix volume, 0..1
    pub tune_volume: f64,
    /// Keep the wave's tuning linked to the loop pitch
    pub linked: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            crossfade_len: 24,
            loop_cycles: 1,
            tune_standard: 440.0,
            tune_volume: 0.0,
            linked: false,
        }
    }
}

/// Load a YAML config file, falling back to defaults on any failure
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("load_config: {:?} doesn't exist, using defaults", path);
        return T::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<T>(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("load_config: failed to parse {:?}: {}, using defaults", path, e);
                T::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: failed to read {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Save a config value as YAML, creating parent directories as needed
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SessionSettings::default();
        assert_eq!(settings.crossfade_len, 24);
        assert_eq!(settings.loop_cycles, 1);
        assert_eq!(settings.tune_standard, 440.0);
        assert_eq!(settings.tune_volume, 0.0);
        assert!(!settings.linked);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let settings: SessionSettings = load_config(Path::new("/nonexistent/settings.yaml"));
        assert_eq!(settings, SessionSettings::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");

        let settings = SessionSettings {
            crossfade_len: 48,
            loop_cycles: 2,
            tune_standard: 432.0,
            tune_volume: 0.25,
            linked: true,
        };
        save_config(&settings, &path).unwrap();
        let loaded: SessionSettings = load_config(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        std::fs::write(&path, "crossfade_len: 96\n").unwrap();

        let loaded: SessionSettings = load_config(&path);
        assert_eq!(loaded.crossfade_len, 96);
        assert_eq!(loaded.tune_standard, 440.0);
    }
}
