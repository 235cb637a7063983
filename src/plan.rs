//! Turn a merged configuration and a file set into an execution plan.
//!
//! Rendering is deferred: a rule's commands are only materialized once the
//! matched file subset is known, and rules that match nothing contribute
//! nothing to the plan.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::rules::{CompiledRules, PatternError};
use crate::schema::ToolConfig;

/// Placeholder substituted with the matched file set when rendering.
pub const FILES_PLACEHOLDER: &str = "{files}";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("task for `{pattern}` has an empty command")]
    EmptyCommand { pattern: String },
    #[error("cannot tokenize command `{command}` for `{pattern}`")]
    Unparsable { pattern: String, command: String },
}

/// One concrete child-process invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Render the invocation as a single shell-style line.
    pub fn command_line(&self) -> String {
        let parts: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect();
        shlex::try_join(parts.iter().copied()).unwrap_or_else(|_| parts.join(" "))
    }
}

/// A task rule that matched at least one file, fully rendered.
#[derive(Debug, Serialize)]
pub struct PlannedTask {
    pub pattern: String,
    pub files: Vec<PathBuf>,
    pub invocations: Vec<Invocation>,
}

/// The ordered execution plan for one file set.
#[derive(Debug, Default, Serialize)]
pub struct Plan {
    pub tasks: Vec<PlannedTask>,
}

impl Plan {
    /// True when no rule matched any selected file.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of invocations across all planned tasks.
    pub fn invocation_count(&self) -> usize {
        self.tasks.iter().map(|task| task.invocations.len()).sum()
    }
}

/// Build the plan for `files` from the merged configuration.
///
/// Rules are visited in their merged order. The matched subset preserves
/// the input order of `files`.
pub fn build(config: &ToolConfig, files: &[PathBuf]) -> Result<Plan, PlanError> {
    let compiled = CompiledRules::compile(config)?;
    let mut plan = Plan::default();

    for (index, rule) in config.tasks.iter().enumerate() {
        let matched: Vec<PathBuf> = files
            .iter()
            .filter(|path| compiled.task_matches(index, path))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }

        let mut invocations = Vec::new();
        for command in rule.run.commands() {
            invocations.push(render_command(&rule.files, command, &matched)?);
        }

        plan.tasks.push(PlannedTask {
            pattern: rule.files.clone(),
            files: matched,
            invocations,
        });
    }

    Ok(plan)
}

/// Render one command string against a matched file set.
///
/// A token equal to [`FILES_PLACEHOLDER`] expands in place to the matched
/// files; commands without the placeholder receive the files as trailing
/// arguments.
fn render_command(
    pattern: &str,
    command: &str,
    files: &[PathBuf],
) -> Result<Invocation, PlanError> {
    let tokens = shlex::split(command).ok_or_else(|| PlanError::Unparsable {
        pattern: pattern.to_string(),
        command: command.to_string(),
    })?;
    let mut tokens = tokens.into_iter();
    let program = tokens.next().ok_or_else(|| PlanError::EmptyCommand {
        pattern: pattern.to_string(),
    })?;

    let mut args = Vec::new();
    let mut substituted = false;
    for token in tokens {
        if token == FILES_PLACEHOLDER {
            args.extend(files.iter().map(path_arg));
            substituted = true;
        } else {
            args.push(token);
        }
    }
    if !substituted {
        args.extend(files.iter().map(path_arg));
    }

    Ok(Invocation { program, args })
}

fn path_arg(path: &PathBuf) -> String {
    path.display().to_string()
}
