use std::env::{current_exe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use directories_next::{ProjectDirs};
use tokio::fs::{File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use serde_json;
use fd_lock::{RwLock, RwLockWriteGuard};
use log::{error, info, warn};
use std::fs::OpenOptions;
use std::io::SeekFrom;
use std::str;

use crate::config::types::Config;
use crate::error::ConfigError;

// creates a path to <exe name>.json in the same directory as the executable
// this could be useful for usb sticks
fn get_portable_config_path() -> Option<PathBuf> {
    match current_exe() {
        Ok(mut path) => {
            // F:\notepins-pairing.exe => F:\notepins-pairing.json
            if !path.set_extension("json") {
                warn!("current exe has no filename: {}", path.to_string_lossy());
                return None
            }

            Some(path)
        },
        Err(err) => {
            warn!("failed to get current exe path: {:?}", err);
            None
        },
    }
}

// creates a path to notepins-pairing.json in an os dependent standard directory, such as %AppData%
// on windows.
fn get_local_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "memoket", "notepins-pairing").map(|dirs| {
        dirs.config_dir().join("notepins-pairing.json")
    })
}

fn get_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Some(path) = get_portable_config_path() {
        match std::fs::metadata(&path) {
            Ok(attr) => {
                if attr.is_file() {
                    return Ok(path);
                }
            }
            Err(err) => {
                info!("Could not read metadata of: {}; Using local path instead. ({:?})", path.to_string_lossy(), err);
            },
        }
    }

    match get_local_config_path() {
        None => Err(ConfigError::NoConfigPath),
        Some(path) => Ok(path),
    }
}

pub struct ConfigIOLocker {
    rw_lock: RwLock<std::fs::File>,
}

impl ConfigIOLocker {
    pub fn lock(&mut self) -> Result<RwLockWriteGuard<std::fs::File>, ConfigError> {
        match self.rw_lock.try_write() {
            Ok(guard) => Ok(guard),
            Err(source) => Err(ConfigError::CanNotLock { source }),
        }
    }
}

struct ConfigIOInner {
    file: std::fs::File,
}

/// Read access to the config file. The file is never written; it also serves as the single
/// instance lock.
#[derive(Clone)]
pub struct ConfigIO {
    inner: Arc<Mutex<ConfigIOInner>>,
}

impl ConfigIO {
    pub fn new_sync(explicit_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = get_config_path(explicit_path)?;
        info!("Using config file {}", path.to_string_lossy());
        ConfigIO::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        if let Some(directory) = path.parent() {
            std::fs::create_dir_all(directory)?;
        }

        // the file must exist so that it can be locked; an empty file means "all defaults"
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(false)
            .append(false)
            .create(true)
            .open(path)?;

        let inner = ConfigIOInner {
            file,
        };
        Ok(ConfigIO { inner: Arc::new(Mutex::new(inner)) })
    }

    pub fn locker(&mut self) -> Result<ConfigIOLocker, ConfigError> {
        let file = self.try_clone_file()?;

        Ok(ConfigIOLocker {
            rw_lock: RwLock::new(file),
        })
    }

    fn try_clone_file(&self) -> Result<std::fs::File, ConfigError> {
        let inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(inner.file.try_clone()?)
    }

    pub async fn read(&self) -> Result<Config, ConfigError> {
        let mut file = File::from_std(self.try_clone_file()?);
        info!("Reading config file");

        // clones share the cursor, so always start from the beginning
        file.seek(SeekFrom::Start(0)).await?;

        let mut content = vec![];
        file.read_to_end(&mut content).await?;

        if content.iter().all(|byte| byte.is_ascii_whitespace()) {
            return Ok(Config::default());
        }

        let content = str::from_utf8(&content)?;

        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `read`, but falls back to the defaults and returns a message describing why the file
    /// could not be used.
    pub async fn read_or_default(&self) -> (Config, Option<String>) {
        match self.read().await {
            Ok(config) => (config, None),
            Err(err) => {
                error!("Failed to load config: {:?}", &err);
                (Config::default(), Some(format!("Failed to load config, using defaults: {}", &err)))
            },
        }
    }
}
