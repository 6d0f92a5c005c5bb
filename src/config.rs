use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Overrides the config file location; used by tests and scripted runs.
pub const CONFIG_PATH_ENV: &str = "SPEAKWELL_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
    pub word_list: String,
    pub color: bool,
    /// How many silent listens a word gets before it is skipped.
    pub retries_on_no_speech: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: 5,
            word_list: "english".to_string(),
            color: true,
            retries_on_no_speech: 1,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        if let Some(p) = std::env::var_os(CONFIG_PATH_ENV) {
            return Self::with_path(p);
        }
        let path = if let Some(pd) = ProjectDirs::from("", "", "speakwell") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("speakwell_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!(
                        "ignoring unreadable config {}: {e}",
                        self.path.display()
                    );
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        log::info!("saved config to {}", self.path.display());
        Ok(())
    }
}
