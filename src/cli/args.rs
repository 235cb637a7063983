use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use stagehand::app_dirs;

/// Produce the full version banner including config and preset directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let preset_dir = match app_dirs::get_preset_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("stagehand {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "preset directory: {preset_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "stagehand",
    version,
    long_version = long_version(),
    about = "Plan and run per-pattern commands over a file set, with layered tool configuration",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `stagehand` binary.
pub(crate) struct CliArgs {
    #[arg(
        value_name = "FILE",
        help = "Files to plan over (default: the files staged in git)"
    )]
    pub(crate) files: Vec<PathBuf>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "STAGEHAND_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'p',
        long = "preset",
        value_name = "NAME",
        action = ArgAction::Append,
        help = "Base-configuration candidate to try before the configured ones (default: none)"
    )]
    pub(crate) preset: Vec<String>,
    #[arg(
        short = 'r',
        long,
        value_name = "PATH",
        help = "Override the project root (default: current directory)"
    )]
    pub(crate) root: Option<PathBuf>,
    #[arg(
        long = "require-env",
        value_name = "VAR",
        action = ArgAction::Append,
        help = "Additional environment variable that must be set (default: none)"
    )]
    pub(crate) require_env: Vec<String>,
    #[arg(
        short = 's',
        long,
        conflicts_with = "files",
        help = "Plan over the files staged in git (default: implied when no files are given)"
    )]
    pub(crate) staged: bool,
    #[arg(
        short = 'a',
        long,
        conflicts_with_all = ["files", "staged"],
        help = "Plan over the whole working tree, honouring ignore files (default: disabled)"
    )]
    pub(crate) all: bool,
    #[arg(long, help = "Execute the plan instead of only printing it (default: disabled)")]
    pub(crate) run: bool,
    #[arg(
        long = "print-config",
        help = "Print the effective configuration before planning (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value = "plain",
        help = "Plan output format"
    )]
    pub(crate) output: OutputFormat,
}

/// Output format for the rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
