//! Configuration management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding per-user profile files such as `terminalrc`
pub const PROFILE_PATH_ENV: &str = "SUGAR_PROFILE_PATH";

/// Root of the persistent per-instance directory tree
pub const ACTIVITY_ROOT_ENV: &str = "SUGAR_ACTIVITY_ROOT";

/// Directory the bundled games ship in
pub const BUNDLE_PATH_ENV: &str = "SUGAR_BUNDLE_PATH";

/// Filesystem locations. Empty strings mean "use the platform default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where `terminalrc` lives
    #[serde(default)]
    pub profile_dir: String,
    /// Saved games go in `<activity_root>/data`
    #[serde(default)]
    pub activity_root: String,
    /// Where the default game is looked up
    #[serde(default)]
    pub bundle_dir: String,
}

/// Interpreter binaries, selected by host pointer width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Binary used on 64-bit hosts
    #[serde(default = "default_bits64")]
    pub bits64: String,
    /// Binary used on every other supported host
    #[serde(default = "default_bits32")]
    pub bits32: String,
}

fn default_bits64() -> String {
    "frotz64".to_string()
}
fn default_bits32() -> String {
    "frotz32".to_string()
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            bits64: default_bits64(),
            bits32: default_bits32(),
        }
    }
}

/// Game selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game started when no file is opened explicitly
    #[serde(default = "default_game")]
    pub default_game: String,
    /// Page listing more games
    #[serde(default = "default_games_url")]
    pub games_url: String,
}

fn default_game() -> String {
    "Advent.z5".to_string()
}
fn default_games_url() -> String {
    "http://wiki.laptop.org/go/Frotz/Games".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_game: default_game(),
            games_url: default_games_url(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to `path`
    #[cfg(test)]
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding `terminalrc`
    pub fn profile_dir(&self) -> Result<PathBuf> {
        resolve_dir(env_path(PROFILE_PATH_ENV), &self.paths.profile_dir, || {
            Ok(project_dirs()?.config_dir().to_path_buf())
        })
    }

    /// Persistent, writable directory saved games are written to
    pub fn save_dir(&self) -> Result<PathBuf> {
        let root = resolve_dir(env_path(ACTIVITY_ROOT_ENV), &self.paths.activity_root, || {
            Ok(project_dirs()?.data_dir().to_path_buf())
        })?;
        Ok(root.join("data"))
    }

    /// Directory the default game is looked up in
    pub fn bundle_dir(&self) -> Result<PathBuf> {
        resolve_dir(env_path(BUNDLE_PATH_ENV), &self.paths.bundle_dir, || {
            Ok(project_dirs()?.data_dir().join("games"))
        })
    }

    /// Full path of the default game
    pub fn default_game_path(&self) -> Result<PathBuf> {
        Ok(self.bundle_dir()?.join(&self.game.default_game))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "laptop", "Frotz").context("Failed to determine home directory")
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Environment wins over the config file, which wins over the platform default
fn resolve_dir(
    from_env: Option<PathBuf>,
    configured: &str,
    fallback: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = from_env {
        return Ok(path);
    }
    if !configured.is_empty() {
        return Ok(PathBuf::from(configured));
    }
    fallback()
}
