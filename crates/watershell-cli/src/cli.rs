use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use watershell::engine::config::ShellMode;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "WaterShell CLI - extract water oxygen-oxygen distances and solvation shells from molecular trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute O-O distances for every water and write the selected shell view as CSV.
    Extract(ExtractArgs),
    /// List the atoms selected as water oxygens without computing distances.
    Waters(WatersArgs),
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the input trajectory (multi-frame BGF).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Distance view to extract: all, firstshell, secondshell or bothshells.
    #[arg(short, long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<ShellMode>,

    /// Shrink first shells to the available neighbours for systems with fewer
    /// than five waters instead of failing.
    #[arg(long)]
    pub truncate_short_shells: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.oxygen-name=OW
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `waters` subcommand.
#[derive(Args, Debug)]
pub struct WatersArgs {
    /// Path to the input trajectory (multi-frame BGF).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

fn parse_mode(value: &str) -> Result<ShellMode, String> {
    value.parse::<ShellMode>().map_err(|e| e.to_string())
}
