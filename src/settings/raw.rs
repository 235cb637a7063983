use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use stagehand::schema::{ToolConfig, merge};
use stagehand::resolver;

use super::errors::{ConfigSources, SettingSource, SettingsError};
use super::resolved::ResolvedSettings;
use crate::cli::CliArgs;

/// Project configuration as it appears on disk, before resolution.
///
/// Everything is optional; unknown top-level keys flow into the local
/// [`ToolConfig`] as tool options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawConfig {
    /// Base-configuration candidates, first preferred.
    pub(crate) presets: Vec<String>,
    /// Project root override; defaults to the working directory.
    pub(crate) root: Option<PathBuf>,
    pub(crate) env: EnvSection,
    #[serde(flatten)]
    pub(crate) local: ToolConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EnvSection {
    /// Environment variables that must be set before planning.
    pub(crate) required: Vec<String>,
}

impl RawConfig {
    pub(crate) fn apply_cli_overrides(&mut self, cli: &CliArgs) -> ConfigSources {
        let mut sources = ConfigSources::default();

        if !cli.preset.is_empty() {
            // Candidates named on the command line are preferred over the
            // configured ones but do not replace them.
            let mut presets = cli.preset.clone();
            presets.append(&mut self.presets);
            self.presets = presets;
            sources.presets = Some(SettingSource::CliFlag("--preset"));
        }
        if let Some(root) = cli.root.clone() {
            self.root = Some(root);
        }
        if !cli.require_env.is_empty() {
            self.env.required.extend(cli.require_env.iter().cloned());
            sources.required_env = Some(SettingSource::CliFlag("--require-env"));
        }

        sources
    }

    pub(crate) fn resolve(self, sources: ConfigSources) -> Result<ResolvedSettings> {
        for preset in &self.presets {
            if preset.trim().is_empty() {
                return Err(SettingsError::invalid(
                    "presets",
                    preset.clone(),
                    sources.source_for_presets(),
                    "preset names must not be empty",
                )
                .into());
            }
        }

        let mut root = match self.root {
            Some(path) => path,
            None => env::current_dir().context("failed to determine working directory")?,
        };
        if root.is_relative() {
            root = env::current_dir()
                .context("failed to resolve current directory for root")?
                .join(root);
        }
        root = fs::canonicalize(&root)
            .with_context(|| format!("failed to canonicalize project root {}", root.display()))?;

        let metadata = fs::metadata(&root)
            .with_context(|| format!("failed to inspect project root {}", root.display()))?;
        ensure!(metadata.is_dir(), "project root must be a directory");

        let base = resolver::resolve_base(&self.presets, &root);
        let config = merge(base.config, self.local);

        let settings = ResolvedSettings {
            root,
            config,
            base_source: base.source,
            required_env: self.env.required,
            sources,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    #[test]
    fn unknown_keys_become_local_options() {
        let raw: RawConfig = serde_json::from_value(json!({
            "presets": ["team"],
            "tab_width": 2,
            "env": {"required": ["DEPLOY_KEY"]},
        }))
        .unwrap();

        assert_eq!(raw.presets, vec!["team"]);
        assert_eq!(raw.env.required, vec!["DEPLOY_KEY"]);
        assert_eq!(raw.local.options["tab_width"], json!(2));
    }

    #[test]
    fn cli_presets_are_tried_before_configured_ones() {
        let cli = CliArgs::parse_from(["stagehand", "--preset", "override"]);
        let mut raw: RawConfig = serde_json::from_value(json!({
            "presets": ["configured"],
        }))
        .unwrap();

        let sources = raw.apply_cli_overrides(&cli);
        assert_eq!(raw.presets, vec!["override", "configured"]);
        assert!(sources.presets.is_some());
    }

    #[test]
    fn cli_required_env_extends_the_configured_list() {
        let cli = CliArgs::parse_from(["stagehand", "--require-env", "TOKEN"]);
        let mut raw = RawConfig::default();
        raw.env.required.push("DEPLOY_KEY".into());

        let sources = raw.apply_cli_overrides(&cli);
        assert_eq!(raw.env.required, vec!["DEPLOY_KEY", "TOKEN"]);
        assert!(sources.required_env.is_some());
    }
}
