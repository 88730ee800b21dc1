//! Where `config.toml` and `.env` are looked up.
//!
//! Both files are optional. The working directory is checked first, then the
//! XDG config directories under `app-checker/`.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{self, APP_DIR_NAME};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_FILE_NAME: &str = ".env";

/// `~/.config/app-checker`, if a home directory is known.
fn default_xdg_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join(APP_DIR_NAME))
}

/// `$XDG_CONFIG_HOME/app-checker`, if `XDG_CONFIG_HOME` is set.
fn xdg_config_home_dir() -> Option<PathBuf> {
    env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|value| !value.is_empty())
        .map(|value| PathBuf::from(value).join(APP_DIR_NAME))
}

/// Locate `config.toml`, checking in order:
///
/// 1. `$CONFIG_PATH`, when it names an existing file
/// 2. `./config.toml`
/// 3. `~/.config/app-checker/config.toml`
/// 4. `$XDG_CONFIG_HOME/app-checker/config.toml`
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(config_path) = env::var(constants::env::CONFIG_PATH) {
        let path = PathBuf::from(&config_path);
        if path.is_file() {
            return Some(path);
        }
    }

    let candidates = [
        env::current_dir().ok(),
        default_xdg_dir(),
        xdg_config_home_dir(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Suggested location for a new config file: `$XDG_CONFIG_HOME`, then
/// `~/.config`, then the working directory.
pub fn get_config_creation_path() -> PathBuf {
    xdg_config_home_dir()
        .or_else(default_xdg_dir)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn load_env_from(path: &Path) -> bool {
    path.is_file() && dotenv::from_path(path).is_ok()
}

/// Load the first `.env` found (`./.env`, `~/.config/app-checker/.env`,
/// `$XDG_CONFIG_HOME/app-checker/.env`) and return its path.
///
/// Variables already present in the process environment are never overwritten.
pub fn load_env_file() -> Option<PathBuf> {
    let current_dir_env = PathBuf::from(ENV_FILE_NAME);
    if load_env_from(&current_dir_env) {
        return Some(current_dir_env);
    }

    if let Some(path) = default_xdg_dir().map(|dir| dir.join(ENV_FILE_NAME))
        && load_env_from(&path)
    {
        return Some(path);
    }

    // XDG_CONFIG_HOME is read last so a value set by an earlier .env is honoured.
    if let Some(path) = xdg_config_home_dir().map(|dir| dir.join(ENV_FILE_NAME))
        && load_env_from(&path)
    {
        return Some(path);
    }

    None
}
