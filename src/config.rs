use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the exif-shift library.
///
/// Controls how many files are patched at once and where the patched
/// output goes.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_shift::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.concurrency = 8;
/// config.output.destination_dir = Some("patched".into());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of files patched in flight at once.
    pub concurrency: usize,
    /// Output behavior (destination, file times, run log).
    pub output: OutputConfig,
}

/// Output and behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write patched files into this directory (keeping the source file
    /// name) instead of patching in place.
    pub destination_dir: Option<PathBuf>,
    /// If `true`, set each patched file's access and modification times to
    /// its shifted date-taken.
    pub set_file_times: bool,
    /// Optional path to a run log; each batch appends its summary there.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: 3,
            output: OutputConfig {
                destination_dir: None,
                set_file_times: true,
                log_file: Some("exif-shift.log".to_string()),
            },
        }
    }
}

impl Config {
    /// Resolve the config file path: same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_patch_in_place_with_three_workers() {
        let config = Config::default();
        assert_eq!(config.concurrency, 3);
        assert!(config.output.destination_dir.is_none());
        assert!(config.output.set_file_times);
        assert_eq!(config.output.log_file.as_deref(), Some("exif-shift.log"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.concurrency, Config::default().concurrency);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.concurrency = 8;
        config.output.destination_dir = Some(PathBuf::from("/out"));
        config.output.set_file_times = false;
        config.output.log_file = None;
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.concurrency, 8);
        assert_eq!(loaded.output.destination_dir, Some(PathBuf::from("/out")));
        assert!(!loaded.output.set_file_times);
        assert!(loaded.output.log_file.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
