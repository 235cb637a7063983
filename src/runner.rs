//! Sequential, fail-fast execution of a rendered plan.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::info;

use crate::plan::{Invocation, Plan};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Run every invocation in the plan, in order, from `root`.
///
/// Child processes inherit stdio. Execution stops at the first invocation
/// that fails to start or exits non-zero.
pub fn run(plan: &Plan, root: &Path) -> Result<(), RunError> {
    for task in &plan.tasks {
        info!(pattern = %task.pattern, files = task.files.len(), "running task");
        for invocation in &task.invocations {
            run_one(invocation, root)?;
        }
    }
    Ok(())
}

fn run_one(invocation: &Invocation, root: &Path) -> Result<(), RunError> {
    let command_line = invocation.command_line();
    info!(command = %command_line, "spawning");

    let status = Command::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(root)
        .status()
        .map_err(|source| RunError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(RunError::Failed {
            command: command_line,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlannedTask;
    use std::path::PathBuf;

    fn plan_for(program: &str) -> Plan {
        Plan {
            tasks: vec![PlannedTask {
                pattern: "*".into(),
                files: vec![PathBuf::from("a")],
                invocations: vec![Invocation {
                    program: program.into(),
                    args: Vec::new(),
                }],
            }],
        }
    }

    #[test]
    fn successful_commands_complete_the_plan() {
        let plan = plan_for("true");
        assert!(run(&plan, Path::new(".")).is_ok());
    }

    #[test]
    fn failing_commands_stop_the_plan() {
        let plan = plan_for("false");
        let err = run(&plan, Path::new(".")).unwrap_err();
        assert!(matches!(err, RunError::Failed { .. }));
    }

    #[test]
    fn unknown_programs_surface_spawn_errors() {
        let plan = plan_for("stagehand-test-program-that-does-not-exist");
        let err = run(&plan, Path::new(".")).unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
    }
}
