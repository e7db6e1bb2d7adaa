use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_FEED_URL: &str = "https://yls8.mtheall.com/ninupdates/feed.php";

/// Returns the default data path based on build profile.
/// - Debug builds: `./data` (relative to project directory)
/// - Release builds: `/data` (absolute path for production)
pub fn default_data_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./data")
    }

    #[cfg(not(debug_assertions))]
    {
        PathBuf::from("/data")
    }
}

/// Process-level configuration taken from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub discord_token: String,
}

impl Config {
    pub fn new(data_path: impl AsRef<Path>, discord_token: impl Into<String>) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            discord_token: discord_token.into(),
        }
    }

    /// Reads `DISCORD_TOKEN` (required) and `DATA_PATH` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("DISCORD_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingEnv("DISCORD_TOKEN"))?;
        let data_path = env::var("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        Ok(Self::new(data_path, token))
    }

    /// Returns the path to the settings TOML file
    pub fn settings_path(&self) -> PathBuf {
        self.data_path.join("settings.toml")
    }

    /// Returns the path to the cached ninupdates feed
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_path.join("ninupdates.xml")
    }
}

/// Bot settings stored in TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Console update feed monitor
    #[serde(default)]
    pub ninupdate: NinUpdateSettings,
    /// Staff permission checks
    #[serde(default)]
    pub staff: StaffSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NinUpdateSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Channel receiving update notifications
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default = "NinUpdateSettings::default_feed_url")]
    pub feed_url: String,
    #[serde(default = "NinUpdateSettings::default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "NinUpdateSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "NinUpdateSettings::default_tracked_systems")]
    pub tracked_systems: Vec<String>,
}

impl Default for NinUpdateSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            channel_id: None,
            feed_url: Self::default_feed_url(),
            interval_secs: Self::default_interval_secs(),
            timeout_secs: Self::default_timeout_secs(),
            tracked_systems: Self::default_tracked_systems(),
        }
    }
}

impl NinUpdateSettings {
    fn default_feed_url() -> String {
        DEFAULT_FEED_URL.to_string()
    }

    fn default_interval_secs() -> u64 {
        3600
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    fn default_tracked_systems() -> Vec<String> {
        vec!["Old3DS".to_string(), "New3DS".to_string()]
    }

    /// Poll interval, never zero
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Fetch timeout, never zero
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffSettings {
    /// Role ids or role names granting staff commands
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Load settings from file, or create with defaults if file doesn't exist.
pub async fn load_or_create(path: &Path) -> Result<Settings, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let default = Settings::default();
            let toml_str = toml::to_string_pretty(&default)?;
            tokio::fs::write(path, toml_str).await?;
            tracing::info!("Created default settings at {}", path.display());
            Ok(default)
        }
        Err(e) => Err(e.into()),
    }
}
