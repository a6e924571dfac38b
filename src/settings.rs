//! Persistent user preferences.

use dirs_next as dirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::body_weight::DEFAULT_HISTORY_LIMIT;
use crate::timer::DEFAULT_REST_SECONDS;

/// Environment variable that overrides the configured data directory.
pub const DATA_DIR_ENV: &str = "WORKOUT_TRACKER_DATA_DIR";

const DATA_DIR_NAME: &str = "workout_tracker";

fn default_rest_seconds() -> u32 {
    DEFAULT_REST_SECONDS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// User configuration serialized to a JSON file in the platform config
/// directory.
///
/// Every field carries a serde default so files written by older versions
/// keep loading after new options are added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Where the workout collections live. `None` uses the platform data
    /// directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    #[serde(default = "default_history_limit")]
    pub weight_history_limit: usize,
    /// Exercise charted in the HTML report when none is given.
    #[serde(default)]
    pub report_exercise: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            rest_seconds: DEFAULT_REST_SECONDS,
            weight_history_limit: DEFAULT_HISTORY_LIMIT,
            report_exercise: None,
        }
    }
}

impl Settings {
    const FILE: &'static str = "workout_tracker_settings.json";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(Self::FILE))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(path) = Self::path() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                match serde_json::from_str(&data) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid settings file {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory",
            ));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, data)
    }

    /// Determine the data directory to use.
    ///
    /// The `WORKOUT_TRACKER_DATA_DIR` environment variable takes precedence
    /// over the configured value, which in turn beats the platform default.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| self.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|p| p.join(DATA_DIR_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::env;
    use std::sync::Mutex;

    static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn with_env<F: FnOnce()>(key: &str, value: Option<&std::path::Path>, f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();
        let prev = env::var_os(key);
        unsafe {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        f();
        unsafe {
            match prev {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn settings_roundtrip() {
        let s = Settings {
            data_dir: Some("/tmp/lifts".into()),
            rest_seconds: 120,
            weight_history_limit: 10,
            report_exercise: Some("Squat".into()),
        };
        let json = serde_json::to_string(&s).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, loaded);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded, Settings::default());
        assert_eq!(loaded.rest_seconds, 90);
        assert_eq!(loaded.weight_history_limit, 30);
    }

    #[test]
    fn save_and_load_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        with_env("XDG_CONFIG_HOME", Some(dir.path()), || {
            let mut s = Settings::default();
            s.rest_seconds = 60;
            s.save().unwrap();
            assert_eq!(Settings::load().rest_seconds, 60);

            std::fs::write(Settings::path().unwrap(), "not json").unwrap();
            assert_eq!(Settings::load(), Settings::default());
        });
    }

    #[test]
    fn env_var_overrides_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: Some("/configured".into()),
            ..Settings::default()
        };
        with_env(DATA_DIR_ENV, Some(dir.path()), || {
            assert_eq!(settings.resolve_data_dir(), Some(dir.path().to_path_buf()));
        });
        with_env(DATA_DIR_ENV, None, || {
            assert_eq!(settings.resolve_data_dir(), Some(PathBuf::from("/configured")));
        });
    }
}
