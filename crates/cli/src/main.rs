use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fleet_core::config::{
    DeployConfig, GenerateConfig, IndexRange, DEFAULT_DIRECTORY, DEFAULT_END, DEFAULT_START,
};
use fleet_core::deploy::{deploy_range, DeployTool, NuctlTool, UnitStatus};
use fleet_core::descriptor::unit_name;
use fleet_core::generate::{generate, FileAction};
use function_fleet::resolve_directory;

/// Bulk generator and deployer for indexed Nuclio function units.
///
/// This CLI is a thin wrapper around `fleet-core` (exposed in code as
/// `fleet_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "function-fleet",
    version,
    about = "Generate and deploy indexed Nuclio function descriptors",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one descriptor file per index in [start, end).
    ///
    /// Existing files are skipped unless --overwrite is set. The output
    /// directory must already exist; it is not created.
    Generate {
        /// Output directory for the descriptor files.
        #[arg(long, default_value = DEFAULT_DIRECTORY)]
        directory: String,

        /// Replace existing descriptor files instead of skipping them.
        #[arg(long, default_value_t = false)]
        overwrite: bool,

        /// Starting unit index (inclusive).
        #[arg(long, default_value_t = DEFAULT_START)]
        start: u32,

        /// Ending unit index (exclusive).
        #[arg(long, default_value_t = DEFAULT_END)]
        end: u32,

        /// Emit the run outcome as JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Deploy the units in [start, end) whose descriptor files exist.
    ///
    /// Each unit is handed to the external deployment tool sequentially.
    /// Missing descriptors and failed deployments are reported per unit and
    /// do not stop the range. The tool executable is taken from NUCTL_PATH
    /// when set, otherwise `nuctl` is resolved via the search path.
    Deploy {
        /// Directory containing the descriptor files.
        #[arg(long, default_value = DEFAULT_DIRECTORY)]
        directory: String,

        /// Starting unit index (inclusive).
        #[arg(long, default_value_t = DEFAULT_START)]
        start: u32,

        /// Ending unit index (exclusive).
        #[arg(long, default_value_t = DEFAULT_END)]
        end: u32,

        /// Emit the run outcome as JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { directory, overwrite, start, end, json } => {
            generate_command(&directory, overwrite, start, end, json)?
        }
        Command::Deploy { directory, start, end, json } => {
            deploy_command(&directory, start, end, json)?
        }
    }

    Ok(())
}

/// Run the descriptor generator over `[start, end)`.
fn generate_command(
    directory: &str,
    overwrite: bool,
    start: u32,
    end: u32,
    json: bool,
) -> Result<()> {
    // Validate the range before touching the filesystem.
    let range = IndexRange::new(start, end).context("Invalid index range")?;
    let directory = resolve_directory(directory)?;

    if !json {
        match range.last_inclusive() {
            Some(last) => println!(
                "Generating descriptors for {} through {} (inclusive). Overwrite: {}. Output directory: '{}'",
                unit_name(range.start()),
                unit_name(last),
                overwrite,
                directory.display()
            ),
            None => println!("Index range is empty; no descriptors to generate."),
        }
    }

    let config = GenerateConfig { directory: directory.clone(), range, overwrite };
    let outcome = generate(&config)
        .with_context(|| format!("Failed to generate descriptors in {}", directory.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for file in &outcome.files {
        match file.action {
            FileAction::Written => println!("Generated file '{}'.", file.path.display()),
            FileAction::Skipped => println!(
                "File '{}' already exists and overwrite is disabled. Skipping.",
                file.path.display()
            ),
        }
    }
    println!(
        "Generated {} descriptor(s), skipped {}.",
        outcome.written_count(),
        outcome.skipped_count()
    );

    Ok(())
}

/// Run the deployment driver over `[start, end)`.
fn deploy_command(directory: &str, start: u32, end: u32, json: bool) -> Result<()> {
    // Validate the range before any tool invocation.
    let range = IndexRange::new(start, end).context("Invalid index range")?;
    let directory = resolve_directory(directory)?;
    let tool = NuctlTool::from_env();

    if !json {
        match range.last_inclusive() {
            Some(last) => println!(
                "Deploying {} through {} (inclusive). Configuration files in directory '{}'.",
                unit_name(range.start()),
                unit_name(last),
                directory.display()
            ),
            None => println!("Index range is empty; no units to deploy."),
        }
    }

    let config = DeployConfig { directory, range };
    let outcome = deploy_range(&config, &tool)
        .with_context(|| format!("Deployment run via {} failed", tool.name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for unit in &outcome.units {
        match unit.status {
            UnitStatus::Deployed => println!("Deployed {}.", unit.unit),
            UnitStatus::MissingDescriptor => eprintln!(
                "[ERROR] File '{}' does not exist. Cannot deploy {}. Skipping.",
                unit.descriptor.display(),
                unit.unit
            ),
            UnitStatus::Failed { exit_code: Some(code) } => eprintln!(
                "[ERROR] {} exited with status {} while deploying {}.",
                tool.name(),
                code,
                unit.unit
            ),
            UnitStatus::Failed { exit_code: None } => eprintln!(
                "[ERROR] {} was terminated by a signal while deploying {}.",
                tool.name(),
                unit.unit
            ),
        }
    }
    println!(
        "Deployed {} unit(s); {} missing descriptor(s); {} failed deployment(s).",
        outcome.deployed_count(),
        outcome.missing_count(),
        outcome.failed_count()
    );

    Ok(())
}
