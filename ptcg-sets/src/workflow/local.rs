//! Local pipeline
//!
//! Builds the artifact from a clone of the catalog data repository:
//!
//! ```text
//! {data_dir}/
//!   sets/en.json          all set descriptors
//!   cards/en/{set_id}.json  cards per set
//! ```
//!
//! Single pass over the sets with no persistence in between; the full
//! artifact is written once at the end. A set without a card file is
//! skipped, a card file that fails to parse is recorded as failed, and
//! neither stops the run.

use crate::error::SetsResult;
use crate::services::aggregator::build_set_record;
use crate::services::card_source::{CardSource, LocalCardSource};
use crate::services::set_lister::{load_sets_file, SeriesFilter};
use crate::workflow::{BuildOutcome, ProblemSet};
use ptcg_common::models::SetDescriptor;
use ptcg_common::{artifact, Error};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// File layout of the local catalog mirror
#[derive(Debug, Clone)]
pub struct LocalLayout {
    pub data_dir: PathBuf,
}

impl LocalLayout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn sets_file(&self) -> PathBuf {
        self.data_dir.join("sets").join("en.json")
    }

    pub fn cards_dir(&self) -> PathBuf {
        self.data_dir.join("cards").join("en")
    }
}

/// Aggregate every set from `source`
pub fn run_local<S: CardSource + ?Sized>(sets: &[SetDescriptor], source: &S) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    let total = sets.len();

    for (idx, set) in sets.iter().enumerate() {
        info!("[{}/{}] Processing: {} ({})", idx + 1, total, set.name, set.id);

        match source.cards_for_set(&set.id) {
            Ok(Some(cards)) => {
                info!(set_id = %set.id, "  Found {} cards", cards.len());
                let record = build_set_record(set, &cards);
                info!(set_id = %set.id, "  ✓ Extracted {} unique Pokémon", record.pokemon.len());
                outcome.sets.push(record);
            }
            Ok(None) => {
                warn!(set_id = %set.id, "  ⚠ No card file found, skipping...");
                outcome.problems.push(ProblemSet::skipped(set));
            }
            Err(e) => {
                error!(set_id = %set.id, error = %e, "  ✗ Could not read cards");
                outcome.problems.push(ProblemSet::failed(set, e));
            }
        }
    }

    outcome
}

/// Run the local pipeline against a catalog mirror and write `output`
///
/// Fails when the data directory or its sets file is missing; nothing
/// can be built without them.
pub fn run_local_from_dir(
    layout: &LocalLayout,
    filter: &SeriesFilter,
    output: &Path,
) -> SetsResult<BuildOutcome> {
    if !layout.data_dir.exists() {
        return Err(Error::NotFound(format!(
            "Data directory not found: {}\nPlease clone the catalog mirror: \
             git clone https://github.com/PokemonTCG/pokemon-tcg-data.git {}",
            layout.data_dir.display(),
            layout.data_dir.display()
        ))
        .into());
    }

    let sets = load_sets_file(&layout.sets_file(), filter)?;
    let source = LocalCardSource::new(layout.cards_dir());
    let outcome = run_local(&sets, &source);

    info!("Saving to {}...", output.display());
    artifact::save(output, &outcome.sets)?;
    info!("✓ Successfully saved data for {} sets", outcome.sets.len());

    Ok(outcome)
}
