// Settings service
// Loads scheduler settings from a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::SchedulerSettings;

pub const SETTINGS_FILE_NAME: &str = "scheduler.toml";

pub struct SettingsService;

impl SettingsService {
    /// Default location of the settings file in the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "KenBoyle", "WorkorderScheduler")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Load settings from the default location, falling back to defaults
    /// when there is no settings file.
    pub fn load_default() -> Result<SchedulerSettings> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                log::warn!("No config directory available, using default scheduler settings");
                Ok(SchedulerSettings::default())
            }
        }
    }

    /// Load settings from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<SchedulerSettings> {
        if !path.exists() {
            log::info!("No settings file at {:?}, using defaults", path);
            return Ok(SchedulerSettings::default());
        }
        Self::load(path)
    }

    /// Load and validate settings from a TOML file
    pub fn load(path: &Path) -> Result<SchedulerSettings> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = Self::parse(&contents).map_err(|e| {
            log::warn!("Rejected settings file {:?}: {:#}", path, e);
            e.context(format!("Invalid settings file {:?}", path))
        })?;
        log::info!("Loaded scheduler settings from {:?}", path);
        Ok(settings)
    }

    /// Parse and validate settings from TOML text
    pub fn parse(contents: &str) -> Result<SchedulerSettings> {
        let settings: SchedulerSettings =
            toml::from_str(contents).context("Failed to parse settings TOML")?;
        settings.validate().map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories as needed
    pub fn save(path: &Path, settings: &SchedulerSettings) -> Result<()> {
        settings.validate().map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file {:?}", path))?;
        Ok(())
    }
}
