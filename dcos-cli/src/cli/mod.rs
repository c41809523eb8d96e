//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the `dcos` tool.

pub mod diagnostics;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use dcos_core::ColorMode;

/// Top-level CLI command for the dcos tool
#[derive(Parser)]
#[command(name = "dcos")]
#[command(about = "Manage DC/OS clusters from the command line")]
#[command(
  long_about = "Command-line client for DC/OS clusters.\n\n\
        Commands talk to the attached cluster configured under ~/.dcos (or $DCOS_DIR).\n\
        Set DCOS_URL and DCOS_ACS_TOKEN to target a cluster without a config file."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the dcos tool
#[derive(Subcommand)]
pub enum Commands {
  /// Inspect and download cluster diagnostics bundles
  #[command(long_about = "Inspect and download cluster diagnostics bundles.\n\n\
            Diagnostics bundles are archives of logs and state collected from every\n\
            node of the cluster. These commands list the bundles the cluster knows\n\
            about, show a single bundle's status, and download finished bundles.")]
  #[command(alias = "diag")]
  Diagnostics(diagnostics::DiagnosticsArgs),
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Diagnostics(diagnostics) => diagnostics::handle_diagnostics_command(diagnostics),
  }
}
