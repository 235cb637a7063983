mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use stagehand::files::FileSelection;
use stagehand::{logging, runner};

use cli::CliArgs;
use settings::ResolvedSettings;
use workflow::PlanWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    logging::init();

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
        if cli.files.is_empty() && !cli.staged && !cli.all {
            return Ok(());
        }
    }

    run_plan(cli, resolved)
}

/// Build the plan for the selected files, print it in the chosen format and
/// optionally execute it.
fn run_plan(cli: CliArgs, settings: ResolvedSettings) -> Result<()> {
    let root = settings.root.clone();
    let selection = file_selection(&cli);
    let workflow = PlanWorkflow::from_settings(settings, selection)?;
    let plan = workflow.run()?;

    match cli.output {
        OutputFormat::Plain => print_plain(&plan),
        OutputFormat::Json => print_json(&plan)?,
    }

    if cli.run {
        runner::run(&plan, &root)?;
    }

    Ok(())
}

fn file_selection(cli: &CliArgs) -> FileSelection {
    if cli.all {
        FileSelection::WorkingTree
    } else if !cli.files.is_empty() {
        FileSelection::Explicit(cli.files.clone())
    } else {
        FileSelection::Staged
    }
}
