use directories::{BaseDirs, ProjectDirs, UserDirs};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use stackring::AxisSteps;
use std::path::{Path, PathBuf};
use thiserror::Error;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    pub vertical_step: f64,
    pub depth_step: f64,
    /// Minimum time between two rotations.
    pub throttle_ms: u64,
    pub transition_ms: u64,
    /// How long a photo wrapping around to the top holds still before moving.
    pub settle_ms: u64,
    pub invert_scroll: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        let steps = AxisSteps::default();
        Self {
            vertical_step: steps.vertical,
            depth_step: steps.depth,
            throttle_ms: 800,
            transition_ms: 300,
            settle_ms: 150,
            invert_scroll: false,
        }
    }
}

impl MotionConfig {
    pub fn steps(&self) -> AxisSteps {
        AxisSteps {
            vertical: self.vertical_step,
            depth: self.depth_step,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardConfig {
    pub width: f64,
    pub height: f64,
    pub border: f64,
    /// Tilt and shift every photo but the top one by a random amount.
    pub scatter: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
            border: 12.0,
            scatter: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Bottom to top. The last photo starts on top.
    pub photos: Vec<PathBuf>,
    /// Scanned when `photos` is empty. Falls back to the pictures directory.
    pub directory: Option<PathBuf>,
    pub max_photos: usize,
    pub motion: MotionConfig,
    pub card: CardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photos: Vec::new(),
            directory: None,
            max_photos: 12,
            motion: MotionConfig::default(),
            card: CardConfig::default(),
        }
    }
}

impl Config {
    pub fn photo_paths(&self) -> Vec<PathBuf> {
        let paths = if !self.photos.is_empty() {
            self.photos.iter().map(|p| expand_home(p)).collect()
        } else {
            self.directory
                .as_deref()
                .map(expand_home)
                .or_else(default_photo_dir)
                .map(|dir| scan_directory(&dir))
                .unwrap_or_default()
        };

        paths.into_iter().take(self.max_photos).collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "photostack", "photostack")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PHOTOSTACK").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default configuration to {}", path.display()),
            Err(e) => log::warn!("Failed to write default configuration: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load configuration, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Image files directly inside `dir`, sorted by file name.
pub fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs_err::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to read photo directory: {}", e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image(path))
        .collect();
    paths.sort();
    paths
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), BaseDirs::new()) {
        (Ok(rest), Some(dirs)) => dirs.home_dir().join(rest),
        _ => path.to_path_buf(),
    }
}

fn default_photo_dir() -> Option<PathBuf> {
    UserDirs::new()?.picture_dir().map(Path::to_path_buf)
}

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
