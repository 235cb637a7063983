//! Resolve configuration and preset directories for `stagehand`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "stagehand";

const CONFIG_DIR_ENV: &str = "STAGEHAND_CONFIG_DIR";
const PRESET_DIR_ENV: &str = "STAGEHAND_PRESET_DIR";

/// Return the platform-specific directory layout for the application.
fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for stagehand"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value so that callers can
/// use shell defaults without worrying about trailing whitespace.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Return the configuration directory used to persist user preferences.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Return the directory searched for named preset configurations.
///
/// Presets installed here can be referenced from a project configuration by
/// bare name instead of by path.
pub fn get_preset_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(PRESET_DIR_ENV) {
        return Ok(dir);
    }

    Ok(get_config_dir()?.join("presets"))
}
