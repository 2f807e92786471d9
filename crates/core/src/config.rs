//! Index ranges and per-tool configurations.
//!
//! Both tools operate over a half-open index range `[start, end)` against a
//! descriptor directory. The range is validated once at construction so no
//! later step has to re-check it, and each tool's inputs are a plain struct
//! handed into the core entry points (no process-global flag state).

use std::path::PathBuf;

use thiserror::Error;

/// Default descriptor directory shared by both tools.
pub const DEFAULT_DIRECTORY: &str = "./function-configurations/";

/// Default starting index (inclusive).
pub const DEFAULT_START: u32 = 0;

/// Default ending index (exclusive).
pub const DEFAULT_END: u32 = 10;

/// Error type for range validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    /// The ending index is below the starting index.
    ///
    /// This is intentionally fatal rather than treated as an empty workload,
    /// so callers can surface a clear message instead of silently doing
    /// nothing.
    #[error("The ending index ({end}) must be >= the starting index ({start})")]
    EndBeforeStart { start: u32, end: u32 },
}

/// Convenience result type for range construction.
pub type RangeResult<T> = Result<T, RangeError>;

/// A validated half-open index range `[start, end)`.
///
/// `end == start` is a valid, empty range; `end < start` cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    start: u32,
    end: u32,
}

impl IndexRange {
    /// Build a range, rejecting `end < start`.
    pub fn new(start: u32, end: u32) -> RangeResult<Self> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Starting index (inclusive).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Ending index (exclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of indices covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Last index actually covered, if any.
    ///
    /// Handy for "through N (inclusive)" reporting without underflowing on
    /// an empty range.
    pub fn last_inclusive(&self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    /// Iterate the indices in ascending order.
    pub fn indices(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

/// Inputs for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory the descriptor files are written into. Must already exist;
    /// the generator does not create it.
    pub directory: PathBuf,
    /// Indices to generate descriptors for.
    pub range: IndexRange,
    /// Replace existing descriptor files instead of skipping them.
    pub overwrite: bool,
}

/// Inputs for one deployment run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Directory expected to contain the descriptor files.
    pub directory: PathBuf,
    /// Indices to deploy.
    pub range: IndexRange,
}
