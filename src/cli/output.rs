use anyhow::Result;
use stagehand::Plan;

/// Print a plain-text representation of the plan.
pub(crate) fn print_plain(plan: &Plan) {
    if plan.is_empty() {
        println!("Nothing to do: no task rule matched the selected files");
        return;
    }

    for task in &plan.tasks {
        println!("{} ({} files)", task.pattern, task.files.len());
        for invocation in &task.invocations {
            println!("  {}", invocation.command_line());
        }
    }
}

/// Format the plan as a JSON string.
pub(crate) fn format_plan_json(plan: &Plan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Print the JSON representation of the plan.
pub(crate) fn print_json(plan: &Plan) -> Result<()> {
    println!("{}", format_plan_json(plan)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::Value;
    use stagehand::plan::{Invocation, PlannedTask};

    use super::*;

    #[test]
    fn json_format_includes_rendered_invocations() {
        let plan = Plan {
            tasks: vec![PlannedTask {
                pattern: "*.rs".into(),
                files: vec![PathBuf::from("src/lib.rs")],
                invocations: vec![Invocation {
                    program: "rustfmt".into(),
                    args: vec!["src/lib.rs".into()],
                }],
            }],
        };

        let json = format_plan_json(&plan).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["tasks"][0]["pattern"], "*.rs");
        assert_eq!(value["tasks"][0]["invocations"][0]["program"], "rustfmt");
        assert_eq!(value["tasks"][0]["files"][0], "src/lib.rs");
    }
}
