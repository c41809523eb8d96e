//! # Diagnostics Command
//!
//! Derive-based implementation of the diagnostics command group for listing,
//! inspecting and downloading cluster diagnostics bundles.

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dcos_core::output::{format_bundle_status, format_command, format_timestamp};
use dcos_core::{print_info, print_success, print_warning};
use dcos_diagnostics::auth::create_diagnostics_runtime_and_client;
use dcos_diagnostics::{Bundle, DiagnosticsError};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tempfile::NamedTempFile;

/// Command for diagnostics bundle operations
#[derive(Args)]
pub struct DiagnosticsArgs {
  /// The diagnostics subcommand to execute
  #[command(subcommand)]
  pub subcommand: DiagnosticsSubcommands,
}

/// Subcommands for the diagnostics command
#[derive(Subcommand)]
pub enum DiagnosticsSubcommands {
  /// List diagnostics bundles
  #[command(long_about = "List the diagnostics bundles known to the attached cluster.\n\n\
            Bundles are shown in the order the cluster reports them, with their\n\
            status, archive size and collection times.")]
  #[command(alias = "ls")]
  List {
    /// Print the bundle records as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show a single diagnostics bundle
  #[command(long_about = "Show the status of a single diagnostics bundle, including any\n\
            errors reported while it was being collected.")]
  Get {
    /// ID of the bundle
    #[arg(required = true, index = 1)]
    bundle_id: String,

    /// Print the bundle record as JSON
    #[arg(long)]
    json: bool,
  },

  /// Download a finished diagnostics bundle
  #[command(long_about = "Download the archive of a finished diagnostics bundle.\n\n\
            The archive is written to <bundle-id>.zip in the current directory unless\n\
            --output is given. The archive is written to a temporary file next to the\n\
            destination and only moved into place once the download completes.")]
  Download {
    /// ID of the bundle
    #[arg(required = true, index = 1)]
    bundle_id: String,

    /// Path to write the archive to
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
  },
}

/// Handle the diagnostics command
pub fn handle_diagnostics_command(diagnostics: DiagnosticsArgs) -> Result<()> {
  match diagnostics.subcommand {
    DiagnosticsSubcommands::List { json } => handle_list_command(json),
    DiagnosticsSubcommands::Get { bundle_id, json } => handle_get_command(&bundle_id, json),
    DiagnosticsSubcommands::Download { bundle_id, output } => {
      let output = output.unwrap_or_else(|| default_output_path(&bundle_id));
      handle_download_command(&bundle_id, &output)
    }
  }
}

fn handle_list_command(json: bool) -> Result<()> {
  let (rt, client) = create_diagnostics_runtime_and_client()?;

  let bundles = rt
    .block_on(client.list_bundles())
    .context("Failed to list diagnostics bundles")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&bundles)?);
    return Ok(());
  }

  if bundles.is_empty() {
    print_info("No diagnostics bundles found");
    return Ok(());
  }

  println!("{}", render_bundle_table(&bundles));
  Ok(())
}

fn handle_get_command(bundle_id: &str, json: bool) -> Result<()> {
  let (rt, client) = create_diagnostics_runtime_and_client()?;

  let bundle = rt
    .block_on(client.get_bundle(bundle_id))
    .with_context(|| format!("Failed to get diagnostics bundle {bundle_id}"))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    return Ok(());
  }

  println!("{}", render_bundle_details(&bundle));
  Ok(())
}

fn handle_download_command(bundle_id: &str, output: &Path) -> Result<()> {
  let (rt, client) = create_diagnostics_runtime_and_client()?;

  let mut file = BufWriter::new(create_download_file(output)?);

  let progress = ProgressBar::new_spinner();
  progress.set_style(
    ProgressStyle::with_template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})")
      .unwrap_or_else(|_| ProgressStyle::default_spinner()),
  );
  progress.set_message(format!("Downloading {bundle_id}"));
  progress.enable_steady_tick(Duration::from_millis(100));

  let result = rt.block_on(client.download_bundle(bundle_id, &mut progress.wrap_write(&mut file)));
  progress.finish_and_clear();

  // Dropping the temporary file on any error path deletes it and leaves
  // an existing file at `output` untouched.
  let bytes = match result {
    Ok(bytes) => bytes,
    Err(error) => {
      if matches!(error, DiagnosticsError::BundleNotFound { .. }) {
        print_warning(&format!(
          "Run {} to see available bundles",
          format_command("dcos diagnostics list")
        ));
      }
      return Err(error).with_context(|| format!("Failed to download diagnostics bundle {bundle_id}"));
    }
  };

  let file = file
    .into_inner()
    .map_err(|error| error.into_error())
    .with_context(|| format!("Failed to write bundle {bundle_id}"))?;
  file
    .persist(output)
    .with_context(|| format!("Failed to move downloaded bundle to {}", output.display()))?;

  print_success(&format!(
    "Downloaded bundle {bundle_id} ({}) to {}",
    HumanBytes(bytes),
    output.display()
  ));
  Ok(())
}

fn default_output_path(bundle_id: &str) -> PathBuf {
  PathBuf::from(format!("{bundle_id}.zip"))
}

/// Create the temporary file a download is staged in, next to `output`
fn create_download_file(output: &Path) -> Result<NamedTempFile> {
  let dir = match output.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temporary file in {}", dir.display()))
}

/// Render bundles as a table
fn render_bundle_table(bundles: &[Bundle]) -> String {
  #[derive(Tabled)]
  struct BundleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Stopped")]
    stopped: String,
    #[tabled(rename = "Errors")]
    errors: usize,
  }

  let rows = bundles.iter().map(|bundle| BundleRow {
    id: bundle.id.clone(),
    status: format_bundle_status(bundle.status.as_str()),
    size: format_artifact_size(bundle),
    started: format_timestamp(bundle.started.as_ref()),
    stopped: format_timestamp(bundle.stopped.as_ref()),
    errors: bundle.errors.len(),
  });

  Table::new(rows).with(Style::sharp()).to_string()
}

/// Render one bundle as labelled lines
fn render_bundle_details(bundle: &Bundle) -> String {
  let label = |name: &str| name.if_supports_color(Stream::Stdout, |text| text.bold()).to_string();

  let mut lines = vec![
    format!("{} {}", label("ID:"), bundle.id),
    format!("{} {}", label("Status:"), format_bundle_status(bundle.status.as_str())),
    format!("{} {}", label("Size:"), format_artifact_size(bundle)),
    format!("{} {}", label("Started:"), format_timestamp(bundle.started.as_ref())),
    format!("{} {}", label("Stopped:"), format_timestamp(bundle.stopped.as_ref())),
  ];

  if !bundle.errors.is_empty() {
    lines.push(label("Errors:"));
    lines.extend(bundle.errors.iter().map(|error| format!("  - {error}")));
  }

  lines.join("\n")
}

/// Size column value; only finished bundles have a meaningful size
fn format_artifact_size(bundle: &Bundle) -> String {
  bundle
    .artifact_size()
    .map(|size| HumanBytes(size).to_string())
    .unwrap_or_else(|| "-".to_string())
}
