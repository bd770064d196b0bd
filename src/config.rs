//! Application configuration.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Name of the directory under `$HOME` holding the config file.
const CONFIG_DIR: &str = ".listings-dashboard";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Backend base URL. Empty means the local default.
    #[serde(default)]
    pub backend_url: String,

    /// Page size used for listing fetches. Zero means the built-in default.
    #[serde(default)]
    pub page_size: u32,
}

impl Config {
    /// Create Config with the given backend URL.
    #[cfg(test)]
    pub fn new(backend_url: String) -> Self {
        Config {
            backend_url,
            page_size: 0,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file, if present.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Resolves the environment this config points at.
    pub fn environment(&self) -> Result<Environment, String> {
        if self.backend_url.trim().is_empty() {
            return Ok(Environment::Local);
        }
        self.backend_url.parse()
    }

    /// Page size to request, falling back to the built-in default.
    pub fn page_size(&self) -> u32 {
        if self.page_size == 0 {
            crate::consts::cli_consts::DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// Path of the config file under the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR).join("config.json"))
}
