//! Configuration loading.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default request body cap. Photos travel inline as data URLs.
const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON key-value store.
    pub data_path: PathBuf,
    pub port: u16,
    /// Local hour (0-23) at which the reminder may fire.
    pub reminder_hour: u32,
    pub reminder_check_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/journal.json"),
            port: 8080,
            reminder_hour: 20,
            reminder_check_secs: 3600,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Defaults, then `journal.toml`, then `JOURNAL_*` variables, then the
    /// bare `PORT` and `APP_DATA_PATH` variables.
    #[allow(clippy::result_large_err)]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(Path::new("journal.toml"))
    }

    #[allow(clippy::result_large_err)]
    pub fn load_from(config_path: &Path) -> Result<Self, figment::Error> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("JOURNAL_"))
            .merge(Env::raw().only(&["port"]))
            .merge(Env::raw().only(&["app_data_path"]).map(|_| "data_path".into()));

        Self::from_figment(figment)
    }

    #[allow(clippy::result_large_err)]
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_check_secs)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<(), figment::Error> {
        if self.reminder_hour > 23 {
            return Err(figment::Error::from(format!(
                "reminder_hour must be between 0 and 23, got {}",
                self.reminder_hour
            )));
        }
        if self.reminder_check_secs == 0 {
            return Err(figment::Error::from(
                "reminder_check_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
