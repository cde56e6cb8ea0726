//! Remote pipeline
//!
//! Pages through the catalog API set by set. The run is resumable:
//!
//! 1. Load any existing artifact and index its records by set id
//! 2. Skip sets already present
//! 3. Fetch, aggregate and append each missing set
//! 4. Checkpoint the whole artifact (atomic write) after every set
//!
//! A set whose fetch fails, even after retries, is recorded with its
//! error and the run moves on. Only an unavailable set list aborts.
//! Requests are strictly sequential with a courtesy delay between pages
//! and between sets.

use crate::error::SetsResult;
use crate::services::aggregator::build_set_record;
use crate::services::catalog_client::{fetch_all_cards, CatalogApi, DEFAULT_PAGE_SIZE};
use crate::services::set_lister::{filter_sets, SeriesFilter};
use crate::workflow::{BuildOutcome, ProblemSet};
use ptcg_common::artifact;
use ptcg_common::models::{SetDescriptor, SetRecord};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Settings for [`run_remote`]
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    /// Artifact path; also the resume source
    pub output: PathBuf,
    pub page_size: u32,
    /// Sleep between page fetches of one set
    pub page_delay: Duration,
    /// Sleep after each processed set
    pub set_delay: Duration,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(ptcg_common::config::DEFAULT_OUTPUT_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_millis(100),
            set_delay: Duration::from_millis(200),
        }
    }
}

/// Run the resumable remote pipeline
///
/// Returns the full accumulated artifact (resumed records first, then the
/// sets fetched by this run) and the sets that failed in this run.
pub async fn run_remote<A: CatalogApi + ?Sized>(
    api: &A,
    filter: &SeriesFilter,
    options: &RemoteOptions,
) -> SetsResult<BuildOutcome> {
    info!("Fetching all sets...");
    let sets = filter_sets(api.fetch_sets().await?, filter);

    let mut outcome = BuildOutcome::default();
    let mut processed: HashSet<String> = HashSet::new();

    if let Some(existing) = artifact::load(&options.output) {
        info!(
            "Found existing {}, resuming from {} already processed sets",
            options.output.display(),
            existing.len()
        );
        for record in existing {
            if processed.insert(record.id.clone()) {
                outcome.sets.push(record);
            }
        }
    }

    let total = sets.len();
    for (idx, set) in sets.iter().enumerate() {
        if processed.contains(&set.id) {
            info!(
                "[{}/{}] Skipping {} ({}) - already processed",
                idx + 1,
                total,
                set.name,
                set.id
            );
            continue;
        }

        info!("[{}/{}] Processing set: {} ({})", idx + 1, total, set.name, set.id);

        match process_set(api, set, options).await {
            Ok(record) => {
                info!(set_id = %set.id, "  Extracted {} unique Pokémon", record.pokemon.len());
                processed.insert(record.id.clone());
                outcome.sets.push(record);
                checkpoint(options, &outcome.sets, total);
            }
            Err(e) => {
                error!(set_id = %set.id, error = %e, "  ✗ FAILED, skipping to next set");
                outcome.problems.push(ProblemSet::failed(set, e));
            }
        }

        tokio::time::sleep(options.set_delay).await;
    }

    info!("Final save to {}...", options.output.display());
    artifact::save(&options.output, &outcome.sets)?;
    info!("✓ Successfully saved data for {} sets", outcome.sets.len());

    Ok(outcome)
}

/// Fetch every page of one set and aggregate it
async fn process_set<A: CatalogApi + ?Sized>(
    api: &A,
    set: &SetDescriptor,
    options: &RemoteOptions,
) -> SetsResult<SetRecord> {
    let cards = fetch_all_cards(api, &set.id, options.page_size, options.page_delay).await?;
    info!(set_id = %set.id, "  Found {} cards", cards.len());
    Ok(build_set_record(set, &cards))
}

/// Persist progress; a failed checkpoint does not fail the set
fn checkpoint(options: &RemoteOptions, records: &[SetRecord], total: usize) {
    match artifact::save(&options.output, records) {
        Ok(()) => info!("  ✓ Saved progress ({}/{} sets)", records.len(), total),
        Err(e) => warn!(
            path = %options.output.display(),
            error = %e,
            "  Could not save progress"
        ),
    }
}
