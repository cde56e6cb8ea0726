//! Pipeline drivers
//!
//! Two front ends share the aggregation core:
//! - [`local`]: reads the cloned catalog mirror, single pass, one write
//! - [`remote`]: pages through the catalog API, resumable, checkpoints
//!   the artifact after every set
//!
//! Both return a [`BuildOutcome`]: the accumulated set records plus the
//! sets that were skipped or failed.

pub mod local;
pub mod remote;
pub mod summary;

use ptcg_common::models::{SetDescriptor, SetRecord};

pub use local::{run_local, run_local_from_dir, LocalLayout};
pub use remote::{run_remote, RemoteOptions};
pub use summary::RunSummary;

/// Why a set did not make it into the artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// The source had no data for the set
    Skipped,
    /// Fetching or aggregating the set failed
    Failed { error: String },
}

/// A set that was skipped or failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSet {
    pub id: String,
    pub name: String,
    pub problem: Problem,
}

impl ProblemSet {
    pub fn skipped(set: &SetDescriptor) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            problem: Problem::Skipped,
        }
    }

    pub fn failed(set: &SetDescriptor, error: impl ToString) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            problem: Problem::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.problem, Problem::Skipped)
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    /// Set records in artifact order
    pub sets: Vec<SetRecord>,
    /// Skipped sets (local) or failed sets with their error (remote)
    pub problems: Vec<ProblemSet>,
}
