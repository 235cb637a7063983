use std::path::PathBuf;

use stagehand::rules::compile_pattern;
use stagehand::schema::ToolConfig;

use super::errors::{ConfigSources, SettingSource, SettingsError};

/// Application-ready configuration derived from presets, project files,
/// environment variables and CLI flags.
#[derive(Debug)]
pub(crate) struct ResolvedSettings {
    pub(crate) root: PathBuf,
    pub(crate) config: ToolConfig,
    /// The preset file the base configuration was loaded from, if any.
    pub(crate) base_source: Option<PathBuf>,
    pub(crate) required_env: Vec<String>,
    pub(crate) sources: ConfigSources,
}

impl ResolvedSettings {
    /// Reject configurations the planner could only fail on later, with
    /// the key and origin of the offending value.
    pub(super) fn validate(&self) -> Result<(), SettingsError> {
        for entry in &self.config.overrides {
            if let Err(err) = compile_pattern(&entry.files) {
                return Err(SettingsError::invalid(
                    "overrides.files",
                    entry.files.clone(),
                    SettingSource::ConfigKey("overrides.files"),
                    err.source.to_string(),
                ));
            }
        }

        for rule in &self.config.tasks {
            if let Err(err) = compile_pattern(&rule.files) {
                return Err(SettingsError::invalid(
                    "tasks.files",
                    rule.files.clone(),
                    SettingSource::ConfigKey("tasks.files"),
                    err.source.to_string(),
                ));
            }
            for command in rule.run.commands() {
                if shlex::split(command).is_none_or(|tokens| tokens.is_empty()) {
                    return Err(SettingsError::invalid(
                        "tasks.run",
                        command,
                        SettingSource::ConfigKey("tasks.run"),
                        "command must contain at least one well-formed token",
                    ));
                }
            }
        }

        for var in &self.required_env {
            if var.trim().is_empty() {
                return Err(SettingsError::invalid(
                    "env.required",
                    var.clone(),
                    self.sources.source_for_required_env(),
                    "environment variable names must not be empty",
                ));
            }
        }

        Ok(())
    }

    /// Print a human readable summary of the effective configuration.
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Root: {}", self.root.display());
        match &self.base_source {
            Some(path) => println!("  Base preset: {}", path.display()),
            None => println!("  Base preset: (none, local configuration only)"),
        }

        if self.config.options.is_empty() {
            println!("  Options: (none)");
        } else {
            println!("  Options:");
            for (key, value) in &self.config.options {
                println!("    {key} = {value}");
            }
        }

        println!("  Override entries: {}", self.config.overrides.len());
        for entry in &self.config.overrides {
            let keys: Vec<&str> = entry.options.keys().map(String::as_str).collect();
            println!("    {} -> {}", entry.files, keys.join(", "));
        }

        println!("  Task rules: {}", self.config.tasks.len());
        for rule in &self.config.tasks {
            let commands: Vec<&str> = rule.run.commands().collect();
            println!("    {} -> {}", rule.files, commands.join(" && "));
        }

        match self.required_env.as_slice() {
            [] => println!("  Required env: (none)"),
            vars => println!("  Required env: {}", vars.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stagehand::schema::{Action, TaskRule};

    fn settings(config: ToolConfig) -> ResolvedSettings {
        ResolvedSettings {
            root: PathBuf::from("/tmp"),
            config,
            base_source: None,
            required_env: Vec::new(),
            sources: ConfigSources::default(),
        }
    }

    #[test]
    fn validation_rejects_bad_task_patterns() {
        let mut config = ToolConfig::default();
        config.tasks.push(TaskRule {
            files: "[".into(),
            run: Action::Single("fmt".into()),
        });

        let err = settings(config).validate().unwrap_err();
        assert_eq!(err.key, "tasks.files");
        let message = err.to_string();
        assert!(message.contains("configuration key"));
        assert!(message.contains("value: ["));
    }

    #[test]
    fn validation_rejects_blank_commands() {
        let mut config = ToolConfig::default();
        config.tasks.push(TaskRule {
            files: "*.rs".into(),
            run: Action::Sequence(vec!["fmt".into(), "".into()]),
        });

        let err = settings(config).validate().unwrap_err();
        assert_eq!(err.key, "tasks.run");
    }

    #[test]
    fn validation_rejects_blank_env_names_with_provenance() {
        let mut resolved = settings(ToolConfig::default());
        resolved.required_env.push("  ".into());
        resolved.sources.required_env = Some(SettingSource::CliFlag("--require-env"));

        let err = resolved.validate().unwrap_err();
        assert_eq!(err.key, "env.required");
        assert!(err.to_string().contains("CLI flag `--require-env`"));
    }

    #[test]
    fn summary_prints_without_panic() {
        let mut config = ToolConfig::default();
        config.options.insert("tab_width".into(), json!(2));
        config.tasks.push(TaskRule {
            files: "*.rs".into(),
            run: Action::Single("rustfmt".into()),
        });

        let mut resolved = settings(config);
        resolved.required_env.push("DEPLOY_KEY".into());
        resolved.print_summary();
    }
}
