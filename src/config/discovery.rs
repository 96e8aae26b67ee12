use std::path::{Path, PathBuf};

use super::types::{CONFIG_FILE_NAME, Config, ConfigError};

/// Search for `.tagcheck.toml` from `start` upwards.
///
/// The search stops after the first directory that contains a `.git` entry,
/// so a config file outside the repository is never picked up.
pub fn discover_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILE_NAME);
        log::debug!("Looking for config at {}", candidate.display());
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            log::debug!("Reached repository root at {}", dir.display());
            break;
        }
        current = dir.parent();
    }

    None
}

/// Load configuration with discovery.
///
/// An explicit `config_path` must exist. Otherwise, unless `isolated`, the
/// nearest `.tagcheck.toml` above `discovery_dir` (or the current directory) is
/// used. Falls back to built-in defaults.
pub fn load_with_discovery(
    config_path: Option<&str>,
    discovery_dir: Option<&Path>,
    isolated: bool,
) -> Result<Config, ConfigError> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        log::debug!("Loading explicit config file {}", path.display());
        return Config::load(path);
    }

    if isolated {
        log::debug!("Config discovery disabled; using defaults");
        return Ok(Config::default());
    }

    let start = match discovery_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|source| ConfigError::IoError {
            source,
            path: ".".to_string(),
        })?,
    };
    let start = start.canonicalize().unwrap_or(start);

    match discover_config_file(&start) {
        Some(found) => {
            log::debug!("Using discovered config file {}", found.display());
            Config::load(&found)
        }
        None => {
            log::debug!("No config file found; using defaults");
            Ok(Config::default())
        }
    }
}
