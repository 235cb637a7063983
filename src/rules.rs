//! Glob compilation and matching for override entries and task rules.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::ToolConfig;

/// A glob pattern that failed to compile.
#[derive(Debug, Error)]
#[error("invalid glob pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Compile a single configured pattern into a matcher.
///
/// Patterns follow gitignore-style globbing; a bare `*.ext` matches at any
/// depth, which is the convention the override tables are written in.
pub fn compile_pattern(pattern: &str) -> Result<GlobSet, PatternError> {
    let glob = Glob::new(pattern).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    builder.build().map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })
}

/// Pre-compiled matchers for every pattern in a configuration.
///
/// Compilation happens once per invocation so matching stays cheap across
/// large file sets.
#[derive(Debug)]
pub struct CompiledRules {
    tasks: Vec<GlobSet>,
    overrides: Vec<GlobSet>,
}

impl CompiledRules {
    /// Compile all task and override patterns in `config`.
    pub fn compile(config: &ToolConfig) -> Result<Self, PatternError> {
        let tasks = config
            .tasks
            .iter()
            .map(|rule| compile_pattern(&rule.files))
            .collect::<Result<Vec<_>, _>>()?;
        let overrides = config
            .overrides
            .iter()
            .map(|entry| compile_pattern(&entry.files))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tasks, overrides })
    }

    /// Whether the task rule at `index` applies to `path`.
    pub fn task_matches(&self, index: usize, path: &Path) -> bool {
        self.tasks[index].is_match(path)
    }

    /// Resolve the effective options for a single file.
    ///
    /// Starts from the global options and layers every matching override
    /// entry in declaration order, so entries appended later win.
    pub fn effective_options(&self, config: &ToolConfig, path: &Path) -> Map<String, Value> {
        let mut options = config.options.clone();
        for (entry, set) in config.overrides.iter().zip(&self.overrides) {
            if set.is_match(path) {
                options.extend(entry.options.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        options
    }
}
