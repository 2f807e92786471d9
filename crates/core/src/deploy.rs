//! Deployment driving: one external tool invocation per descriptor.
//!
//! The external deployment CLI sits behind the [`DeployTool`] trait so the
//! range-walking logic can be exercised in tests with a recording fake. The
//! production implementation, [`NuctlTool`], spawns the real `nuctl`
//! executable and waits for it to finish before the next unit is processed.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

use crate::config::DeployConfig;
use crate::descriptor::{descriptor_path, unit_name};

/// Environment variable overriding the deployment tool executable.
pub const TOOL_PATH_ENV: &str = "NUCTL_PATH";

/// Executable used when no override is set; resolved via the search path.
pub const DEFAULT_TOOL_PROGRAM: &str = "nuctl";

/// Error type for deployment runs.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The external tool could not be launched at all.
    ///
    /// This aborts the remaining range: a missing or unrunnable executable
    /// will not get better on the next index.
    #[error("Failed to launch {program} for {unit}: {source}")]
    Spawn {
        program: String,
        unit: String,
        #[source]
        source: io::Error,
    },
}

/// Convenience result type for deployment runs.
pub type DeployResult<T> = Result<T, DeployError>;

/// Exit of one external tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    /// The tool exited zero.
    Succeeded,
    /// The tool exited non-zero, or was killed by a signal (no code).
    Failed { code: Option<i32> },
}

/// Seam for the external deployment command.
pub trait DeployTool: Send + Sync {
    /// Deploy one unit from its descriptor file, blocking until the tool
    /// finishes.
    fn deploy(&self, unit_name: &str, descriptor: &Path) -> DeployResult<DeployStatus>;

    /// Human-readable tool name for reporting.
    fn name(&self) -> &'static str;
}

/// The real `nuctl` CLI, invoked as `nuctl deploy <unit> --file <path>`.
pub struct NuctlTool {
    program: PathBuf,
}

impl NuctlTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Resolve the executable from `NUCTL_PATH`, falling back to `nuctl` on
    /// the search path.
    pub fn from_env() -> Self {
        match env::var(TOOL_PATH_ENV) {
            Ok(program) if !program.is_empty() => Self::new(program),
            _ => Self::new(DEFAULT_TOOL_PROGRAM),
        }
    }

    /// Executable this tool will spawn.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DeployTool for NuctlTool {
    fn deploy(&self, unit_name: &str, descriptor: &Path) -> DeployResult<DeployStatus> {
        let status = Command::new(&self.program)
            .arg("deploy")
            .arg(unit_name)
            .arg("--file")
            .arg(descriptor)
            .status()
            .map_err(|source| DeployError::Spawn {
                program: self.program.display().to_string(),
                unit: unit_name.to_string(),
                source,
            })?;

        if status.success() {
            Ok(DeployStatus::Succeeded)
        } else {
            Ok(DeployStatus::Failed { code: status.code() })
        }
    }

    fn name(&self) -> &'static str {
        "nuctl"
    }
}

/// What happened to one unit during a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// The tool was invoked and exited zero.
    Deployed,
    /// The descriptor file did not exist; the unit was skipped.
    MissingDescriptor,
    /// The tool was invoked and exited non-zero.
    Failed { exit_code: Option<i32> },
}

/// Per-unit record of one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOutcome {
    pub index: u32,
    pub unit: String,
    pub descriptor: PathBuf,
    pub status: UnitStatus,
}

/// What one deployment run did, in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeployOutcome {
    pub units: Vec<UnitOutcome>,
}

impl DeployOutcome {
    pub fn deployed_count(&self) -> usize {
        self.units.iter().filter(|u| matches!(u.status, UnitStatus::Deployed)).count()
    }

    pub fn missing_count(&self) -> usize {
        self.units.iter().filter(|u| matches!(u.status, UnitStatus::MissingDescriptor)).count()
    }

    pub fn failed_count(&self) -> usize {
        self.units.iter().filter(|u| matches!(u.status, UnitStatus::Failed { .. })).count()
    }
}

/// Deploy every unit in the configured range whose descriptor file exists.
///
/// Units are processed strictly in ascending index order, one blocking tool
/// invocation at a time. A missing descriptor or a non-zero tool exit is
/// recorded and the range continues; only a spawn failure aborts the run.
pub fn deploy_range(config: &DeployConfig, tool: &dyn DeployTool) -> DeployResult<DeployOutcome> {
    let mut outcome = DeployOutcome::default();

    for index in config.range.indices() {
        let unit = unit_name(index);
        let descriptor = descriptor_path(&config.directory, index);

        if !descriptor.exists() {
            outcome.units.push(UnitOutcome {
                index,
                unit,
                descriptor,
                status: UnitStatus::MissingDescriptor,
            });
            continue;
        }

        let status = match tool.deploy(&unit, &descriptor)? {
            DeployStatus::Succeeded => UnitStatus::Deployed,
            DeployStatus::Failed { code } => UnitStatus::Failed { exit_code: code },
        };

        outcome.units.push(UnitOutcome { index, unit, descriptor, status });
    }

    Ok(outcome)
}
