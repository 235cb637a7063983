//! Configuration object model shared by presets and project configuration.
//!
//! A [`ToolConfig`] is the unit the resolver works with: a flat mapping of
//! option keys to arbitrary values plus two ordered lists, per-pattern
//! option overrides and per-pattern task rules. Presets and project files
//! deserialize into the same shape so they can be merged uniformly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single merged configuration object handed to downstream tooling.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    /// Scalar tool options. Any key not claimed by a known section lands
    /// here, so presets stay forward-compatible with new options.
    #[serde(flatten)]
    pub options: Map<String, Value>,
    /// Per-pattern option overrides, applied to matching files in order.
    pub overrides: Vec<OverrideEntry>,
    /// Per-pattern commands planned over the selected file set.
    pub tasks: Vec<TaskRule>,
}

impl ToolConfig {
    /// True when the configuration carries no options, overrides or tasks.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.overrides.is_empty() && self.tasks.is_empty()
    }
}

/// A file-matching pattern paired with options layered onto matching files.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OverrideEntry {
    /// Glob pattern selecting the files this entry applies to.
    pub files: String,
    /// Options that replace same-keyed base options for matching files.
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// A file-matching pattern paired with the action to run over matches.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TaskRule {
    /// Glob pattern selecting the files this rule applies to.
    pub files: String,
    /// The command, or ordered command sequence, to run.
    pub run: Action,
}

/// The action of a task rule.
///
/// A command string may contain a `{files}` placeholder; rendering is
/// deferred until the matched file set is known. Without the placeholder
/// the matched files are appended as trailing arguments.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Action {
    /// One command string.
    Single(String),
    /// An ordered sequence of command strings, run one after another.
    Sequence(Vec<String>),
}

impl Action {
    /// View the action as an ordered slice-like list of command strings.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        let commands: Vec<&str> = match self {
            Action::Single(command) => vec![command.as_str()],
            Action::Sequence(commands) => commands.iter().map(String::as_str).collect(),
        };
        commands.into_iter()
    }
}

/// Shallow-merge `local` into `base`.
///
/// Scalar options from `local` replace same-keyed options in `base`. The
/// `overrides` and `tasks` lists are concatenated with the base entries
/// first, so locally declared entries always take effect after anything a
/// preset supplied. Entries are never deduplicated.
pub fn merge(base: ToolConfig, local: ToolConfig) -> ToolConfig {
    let ToolConfig {
        mut options,
        mut overrides,
        mut tasks,
    } = base;

    options.extend(local.options);
    overrides.extend(local.overrides);
    tasks.extend(local.tasks);

    ToolConfig {
        options,
        overrides,
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(pattern: &str) -> OverrideEntry {
        OverrideEntry {
            files: pattern.to_string(),
            options: Map::new(),
        }
    }

    #[test]
    fn merge_replaces_scalar_options() {
        let mut base = ToolConfig::default();
        base.options.insert("tab_width".into(), json!(4));
        base.options.insert("semi".into(), json!(true));

        let mut local = ToolConfig::default();
        local.options.insert("tab_width".into(), json!(2));

        let merged = merge(base, local);
        assert_eq!(merged.options["tab_width"], json!(2));
        assert_eq!(merged.options["semi"], json!(true));
    }

    #[test]
    fn merge_appends_local_entries_after_base_entries() {
        let mut base = ToolConfig::default();
        base.overrides.push(entry("*.md"));
        base.tasks.push(TaskRule {
            files: "*.rs".into(),
            run: Action::Single("rustfmt".into()),
        });

        let mut local = ToolConfig::default();
        local.overrides.push(entry("*.svg"));
        local.tasks.push(TaskRule {
            files: "*.toml".into(),
            run: Action::Single("taplo fmt".into()),
        });

        let merged = merge(base, local);
        assert_eq!(merged.overrides[0].files, "*.md");
        assert_eq!(merged.overrides[1].files, "*.svg");
        assert_eq!(merged.tasks[0].files, "*.rs");
        assert_eq!(merged.tasks[1].files, "*.toml");
    }

    #[test]
    fn local_override_lands_on_empty_base_list() {
        let base = ToolConfig::default();

        let mut local = ToolConfig::default();
        let mut options = Map::new();
        options.insert("parser".into(), json!("html"));
        local.overrides.push(OverrideEntry {
            files: "*.svg".into(),
            options,
        });

        let merged = merge(base, local);
        assert_eq!(merged.overrides.len(), 1);
        assert_eq!(merged.overrides[0].files, "*.svg");
        assert_eq!(merged.overrides[0].options["parser"], json!("html"));
    }

    #[test]
    fn action_accepts_string_or_sequence() {
        let single: TaskRule =
            serde_json::from_value(json!({"files": "*.rs", "run": "rustfmt"})).unwrap();
        assert_eq!(single.run, Action::Single("rustfmt".into()));

        let sequence: TaskRule =
            serde_json::from_value(json!({"files": "*.rs", "run": ["a", "b"]})).unwrap();
        assert_eq!(
            sequence.run.commands().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn unclaimed_keys_become_options() {
        let config: ToolConfig = serde_json::from_value(json!({
            "tab_width": 2,
            "overrides": [],
            "tasks": [],
        }))
        .unwrap();
        assert_eq!(config.options["tab_width"], json!(2));
        assert!(config.overrides.is_empty());
    }
}
