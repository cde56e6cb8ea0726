//! Set Lister
//!
//! Produces the ordered list of sets to process, optionally narrowed to
//! one or more series. Series names match case-insensitively and exactly.

use ptcg_common::models::SetDescriptor;
use ptcg_common::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Which series to keep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeriesFilter {
    /// Every set, unfiltered
    #[default]
    All,
    /// A single series name
    One(String),
    /// Any of several series names
    Any(Vec<String>),
}

impl SeriesFilter {
    /// Build a filter from caller-supplied names (blank names ignored)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| !n.trim().is_empty())
            .collect();

        match names.len() {
            0 => SeriesFilter::All,
            1 => SeriesFilter::One(names.remove(0)),
            _ => SeriesFilter::Any(names),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SeriesFilter::All)
    }

    /// Whether a set of the given series passes the filter
    pub fn matches(&self, series: &str) -> bool {
        let series = series.to_lowercase();
        match self {
            SeriesFilter::All => true,
            SeriesFilter::One(name) => name.to_lowercase() == series,
            SeriesFilter::Any(names) => names.iter().any(|n| n.to_lowercase() == series),
        }
    }
}

impl fmt::Display for SeriesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesFilter::All => f.write_str("all series"),
            SeriesFilter::One(name) => write!(f, "'{}'", name),
            SeriesFilter::Any(names) => {
                let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
                f.write_str(&quoted.join(", "))
            }
        }
    }
}

/// Keep the sets whose series passes `filter`, preserving order
pub fn filter_sets(sets: Vec<SetDescriptor>, filter: &SeriesFilter) -> Vec<SetDescriptor> {
    if filter.is_all() {
        info!("Found {} sets", sets.len());
        return sets;
    }

    let total_count = sets.len();
    let kept: Vec<SetDescriptor> = sets
        .into_iter()
        .filter(|s| filter.matches(&s.series))
        .collect();

    info!(
        "Found {} sets in {} series (filtered from {} total)",
        kept.len(),
        filter,
        total_count
    );
    kept
}

/// Load the set list from a local catalog file and apply `filter`
///
/// The file holds a JSON array of set descriptors. Its absence aborts the
/// run, since there is nothing to process.
pub fn load_sets_file(path: &Path, filter: &SeriesFilter) -> Result<Vec<SetDescriptor>> {
    info!("Loading sets from {}...", path.display());

    if !path.exists() {
        return Err(Error::NotFound(format!(
            "Sets file not found: {}\nPlease clone the catalog mirror: \
             git clone https://github.com/PokemonTCG/pokemon-tcg-data.git data/pokemon-tcg-data",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let sets: Vec<SetDescriptor> = serde_json::from_str(&content)?;

    Ok(filter_sets(sets, filter))
}
