//! Core crate exports for resolving layered tool configuration and planning
//! staged-file commands.
//!
//! The root module primarily re-exports the configuration model and the
//! resolution/planning entry points so that embedders can drive the pipeline
//! without digging through the module hierarchy.

pub mod app_dirs;
pub mod files;
pub mod logging;
pub mod plan;
pub mod resolver;
pub mod rules;
pub mod runner;
pub mod schema;
pub mod secrets;

pub use crate::files::{FileSelection, FileSetError};
pub use crate::plan::{Invocation, Plan, PlanError, PlannedTask};
pub use crate::resolver::{ResolvedBase, resolve_base};
pub use crate::rules::{CompiledRules, PatternError};
pub use crate::schema::{Action, OverrideEntry, TaskRule, ToolConfig, merge};
pub use crate::secrets::{Secret, SecretError};
