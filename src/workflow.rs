use anyhow::{Context, Result};
use stagehand::files::{self, FileSelection};
use stagehand::plan::{self, Plan};
use stagehand::secrets;

use crate::settings::ResolvedSettings;

/// Coordinates collecting the file set and rendering the plan.
///
/// Required secrets are checked at construction so a missing credential
/// fails before any file is listed or command rendered.
pub(crate) struct PlanWorkflow {
    settings: ResolvedSettings,
    selection: FileSelection,
}

impl PlanWorkflow {
    pub(crate) fn from_settings(
        settings: ResolvedSettings,
        selection: FileSelection,
    ) -> Result<Self> {
        secrets::require_all(settings.required_env.iter().map(String::as_str))
            .context("required environment variable is missing")?;
        Ok(Self {
            settings,
            selection,
        })
    }

    pub(crate) fn run(self) -> Result<Plan> {
        let files = files::collect(&self.selection, &self.settings.root)
            .context("failed to collect the file set")?;
        let plan = plan::build(&self.settings.config, &files)
            .context("failed to build the execution plan")?;
        Ok(plan)
    }
}
