use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::platform::PlatformChoice;
use crate::theme::Theme;

/// Preferences remembered between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub platform: PlatformChoice,
    pub last_set: Option<String>,
    pub theme: Theme,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// Store that never touches disk. Clones share the same config.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    cfg: Rc<RefCell<Config>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        self.cfg.borrow().clone()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        *self.cfg.borrow_mut() = cfg.clone();
        Ok(())
    }
}
