//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use roster_domain::DeletePolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from (and is saved back to)
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// A named roster database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// SQLite database path
    pub database: PathBuf,

    /// Policy applied to `employee remove` when `--cascade` is not given
    #[serde(default = "default_delete_policy")]
    pub delete_policy: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// REPL history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// Create a profile for `database` with the default delete policy.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            delete_policy: default_delete_policy(),
        }
    }

    /// Parsed delete policy.
    pub fn policy(&self) -> Result<DeletePolicy> {
        self.delete_policy
            .parse()
            .map_err(CliError::Config)
    }
}

impl Config {
    /// Directory holding configuration, history and the default database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".roster"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it came from (default path otherwise).
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile other than the active one.
    pub fn remove_profile(&mut self, name: &str) -> Result<Profile> {
        if name == self.active_profile {
            return Err(CliError::Config(format!(
                "Cannot delete the active profile '{}'",
                name
            )));
        }
        self.profiles
            .remove(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' does not exist", name)))
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let database = Self::home()
            .map(|home| home.join("roster.db"))
            .unwrap_or_else(|_| PathBuf::from("roster.db"));

        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::new(database));

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            source: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_delete_policy() -> String {
    DeletePolicy::default().as_str().to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(
            config.get_active_profile().unwrap().policy().unwrap(),
            DeletePolicy::Reject
        );
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let mut profile = Profile::new("/tmp/test.db");
        profile.delete_policy = "cascade".to_string();

        config.set_profile("test".to_string(), profile);
        assert!(config.profiles.contains_key("test"));

        config.switch_profile("test".to_string()).unwrap();
        assert_eq!(config.active_profile, "test");
        assert_eq!(
            config.get_active_profile().unwrap().policy().unwrap(),
            DeletePolicy::Cascade
        );

        assert!(config.remove_profile("test").is_err());
        assert!(config.remove_profile("default").is_ok());
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            active_profile = "work"

            [profiles.work]
            database = "/var/lib/roster/work.db"
            delete_policy = "cascade"

            [settings]
            color = false
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.database, PathBuf::from("/var/lib/roster/work.db"));
        assert_eq!(profile.policy().unwrap(), DeletePolicy::Cascade);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_invalid_policy() {
        let mut profile = Profile::new("x.db");
        profile.delete_policy = "shred".to_string();
        assert!(profile.policy().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile("other".to_string(), Profile::new("other.db"));
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.profiles.contains_key("other"));
    }
}
