//! Base-configuration resolution with fallback candidates.
//!
//! A project configuration names the presets it wants to inherit from, in
//! preference order. Each candidate is tried in turn and the first one that
//! loads becomes the base configuration; candidates that are missing or
//! malformed are skipped. When nothing loads the result is an empty
//! configuration, never an absent value, so callers can merge
//! unconditionally.

use std::path::{Path, PathBuf};

use config::{Config, File};
use tracing::{debug, warn};

use crate::app_dirs;
use crate::schema::ToolConfig;

/// File extensions probed when a candidate is given as a bare preset name.
const PRESET_EXTENSIONS: &[&str] = &["toml", "json", "yaml"];

/// A base configuration together with the candidate it was loaded from.
#[derive(Debug)]
pub struct ResolvedBase {
    pub config: ToolConfig,
    /// The file that supplied the base, or `None` when every candidate
    /// failed (or none was configured) and the base is empty.
    pub source: Option<PathBuf>,
}

/// Resolve the base configuration from an ordered candidate list.
///
/// A candidate is either a filesystem path (absolute, or relative to
/// `root`) or a bare preset name looked up as `<name>.<ext>` first under
/// `root` and then under the user preset directory.
pub fn resolve_base(candidates: &[String], root: &Path) -> ResolvedBase {
    for candidate in candidates {
        for path in candidate_paths(candidate, root) {
            match try_load(&path) {
                Ok(config) => {
                    debug!(candidate = %candidate, path = %path.display(), "loaded base configuration");
                    return ResolvedBase {
                        config,
                        source: Some(path),
                    };
                }
                Err(error) => {
                    debug!(candidate = %candidate, path = %path.display(), %error, "candidate skipped");
                }
            }
        }
    }

    if !candidates.is_empty() {
        warn!("no base configuration candidate loaded; continuing with local configuration only");
    }

    ResolvedBase {
        config: ToolConfig::default(),
        source: None,
    }
}

/// Expand one candidate identifier into the concrete files to try.
fn candidate_paths(candidate: &str, root: &Path) -> Vec<PathBuf> {
    let as_path = Path::new(candidate);
    if as_path.extension().is_some() || candidate.contains(std::path::MAIN_SEPARATOR) {
        let path = if as_path.is_absolute() {
            as_path.to_path_buf()
        } else {
            root.join(as_path)
        };
        return vec![path];
    }

    let mut paths = Vec::new();
    for ext in PRESET_EXTENSIONS {
        paths.push(root.join(format!("{candidate}.{ext}")));
    }
    if let Ok(preset_dir) = app_dirs::get_preset_dir() {
        for ext in PRESET_EXTENSIONS {
            paths.push(preset_dir.join(format!("{candidate}.{ext}")));
        }
    }
    paths
}

/// Attempt to load one candidate file into a [`ToolConfig`].
fn try_load(path: &Path) -> Result<ToolConfig, config::ConfigError> {
    Config::builder()
        .add_source(File::from(path.to_path_buf()).required(true))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn first_loadable_candidate_wins() {
        let dir = tempdir().unwrap();
        let first = write(dir.path(), "first.toml", "tab_width = 2\n");
        write(dir.path(), "second.toml", "tab_width = 8\n");

        let resolved = resolve_base(
            &["first.toml".to_string(), "second.toml".to_string()],
            dir.path(),
        );
        assert_eq!(resolved.source.as_deref(), Some(first.as_path()));
        assert_eq!(
            resolved.config.options["tab_width"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn missing_candidates_fall_through_in_order() {
        let dir = tempdir().unwrap();
        let fallback = write(
            dir.path(),
            "fallback.toml",
            "[[tasks]]\nfiles = \"*.rs\"\nrun = \"rustfmt\"\n",
        );

        let resolved = resolve_base(
            &["missing.toml".to_string(), "fallback.toml".to_string()],
            dir.path(),
        );
        assert_eq!(resolved.source.as_deref(), Some(fallback.as_path()));
        assert_eq!(resolved.config.tasks.len(), 1);
        assert_eq!(resolved.config.tasks[0].files, "*.rs");
    }

    #[test]
    fn malformed_candidate_is_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "broken.toml", "tab_width = [unclosed\n");
        let good = write(dir.path(), "good.toml", "semi = false\n");

        let resolved = resolve_base(
            &["broken.toml".to_string(), "good.toml".to_string()],
            dir.path(),
        );
        assert_eq!(resolved.source.as_deref(), Some(good.as_path()));
    }

    #[test]
    fn exhausted_candidates_yield_an_empty_configuration() {
        let dir = tempdir().unwrap();

        let resolved = resolve_base(&["nope.toml".to_string()], dir.path());
        assert!(resolved.source.is_none());
        assert!(resolved.config.is_empty());
    }

    #[test]
    fn bare_names_probe_the_project_root() {
        let dir = tempdir().unwrap();
        let preset = write(dir.path(), "team-defaults.toml", "semi = true\n");

        let resolved = resolve_base(&["team-defaults".to_string()], dir.path());
        assert_eq!(resolved.source.as_deref(), Some(preset.as_path()));
        assert_eq!(resolved.config.options["semi"], serde_json::json!(true));
    }
}
