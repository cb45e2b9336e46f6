use crate::errors::{AppError, AppResult};
use crate::store::BackendKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the JSON collection files.
    pub data_dir: String,
    /// Physical storage format, chosen once at startup.
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    /// SQLite database path, used when backend = sqlite.
    pub sqlite_file: String,
}

fn default_backend() -> BackendKind {
    BackendKind::Json
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            data_dir: dir.join("data").to_string_lossy().to_string(),
            backend: default_backend(),
            sqlite_file: dir.join("rubrohours.sqlite").to_string_lossy().to_string(),
        }
    }
}

impl Config {
    /// Standard configuration directory: a dotdir in the user's home.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rubrohours")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rubrohours.conf")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn sqlite_file(&self) -> PathBuf {
        PathBuf::from(&self.sqlite_file)
    }

    /// Load the configuration file, or defaults if it does not exist.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the configuration file, creating the config dir if needed.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;

        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
