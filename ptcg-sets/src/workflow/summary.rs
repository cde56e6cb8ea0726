//! Run summary
//!
//! Display: "Total sets processed: N", "Total Pokémon entries: M",
//! "Average Pokémon per set: X.Y", then skipped and failed sets.

use crate::workflow::{BuildOutcome, Problem, ProblemSet};
use tracing::{info, warn};

/// Skipped sets listed individually before collapsing into a count
pub const MAX_LISTED_SKIPPED: usize = 10;

/// Statistics of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub sets_processed: usize,
    pub total_pokemon: usize,
    /// Absent when no set was processed
    pub average_per_set: Option<f64>,
    pub skipped: Vec<ProblemSet>,
    pub failed: Vec<ProblemSet>,
}

impl RunSummary {
    pub fn from_outcome(outcome: &BuildOutcome) -> Self {
        let sets_processed = outcome.sets.len();
        let total_pokemon: usize = outcome.sets.iter().map(|s| s.pokemon.len()).sum();
        let average_per_set =
            (sets_processed > 0).then(|| total_pokemon as f64 / sets_processed as f64);

        let (skipped, failed): (Vec<ProblemSet>, Vec<ProblemSet>) =
            outcome.problems.iter().cloned().partition(|p| p.is_skipped());

        Self {
            sets_processed,
            total_pokemon,
            average_per_set,
            skipped,
            failed,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Lines describing skipped sets, collapsed past [`MAX_LISTED_SKIPPED`]
    pub fn skipped_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .skipped
            .iter()
            .take(MAX_LISTED_SKIPPED)
            .map(|s| format!("  - {} ({})", s.name, s.id))
            .collect();

        if self.skipped.len() > MAX_LISTED_SKIPPED {
            lines.push(format!(
                "  ... and {} more",
                self.skipped.len() - MAX_LISTED_SKIPPED
            ));
        }
        lines
    }

    /// Lines describing failed sets with their errors
    pub fn failed_lines(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|s| match &s.problem {
                Problem::Failed { error } => format!("  - {} ({}): {}", s.name, s.id, error),
                Problem::Skipped => format!("  - {} ({})", s.name, s.id),
            })
            .collect()
    }

    /// Emit the summary through tracing
    pub fn log(&self) {
        info!("Summary:");
        info!("  Total sets processed: {}", self.sets_processed);
        info!("  Total Pokémon entries: {}", self.total_pokemon);
        if let Some(average) = self.average_per_set {
            info!("  Average Pokémon per set: {:.1}", average);
        }

        if !self.skipped.is_empty() {
            warn!("⚠ Skipped {} set(s) (no card files):", self.skipped.len());
            for line in self.skipped_lines() {
                warn!("{}", line);
            }
            warn!("Update the catalog mirror to get missing card files (git pull)");
        }

        if !self.failed.is_empty() {
            warn!("⚠ {} set(s) failed:", self.failed.len());
            for line in self.failed_lines() {
                warn!("{}", line);
            }
            warn!("To retry failed sets, run again - already processed sets are skipped.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptcg_common::models::{CreatureEntry, SetDescriptor, SetRecord};

    fn descriptor(id: &str) -> SetDescriptor {
        SetDescriptor {
            id: id.to_string(),
            name: format!("Set {}", id),
            series: String::new(),
            release_date: String::new(),
            total_cards: 0,
            images: Default::default(),
        }
    }

    fn record(id: &str, entries: usize) -> SetRecord {
        let entry = CreatureEntry {
            name: "x".to_string(),
            dex_number: None,
            dex_numbers: vec![],
            rarity: "Common".to_string(),
            card_count: 0,
            cards: vec![],
        };
        SetRecord::new(&descriptor(id), vec![entry; entries])
    }

    #[test]
    fn test_counts_and_average() {
        let outcome = BuildOutcome {
            sets: vec![record("a", 3), record("b", 4)],
            problems: vec![],
        };

        let summary = RunSummary::from_outcome(&outcome);
        assert_eq!(summary.sets_processed, 2);
        assert_eq!(summary.total_pokemon, 7);
        assert_eq!(summary.average_per_set, Some(3.5));
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_no_average_without_sets() {
        let summary = RunSummary::from_outcome(&BuildOutcome::default());
        assert_eq!(summary.average_per_set, None);
    }

    #[test]
    fn test_skipped_list_collapses() {
        let problems = (0..13)
            .map(|i| ProblemSet::skipped(&descriptor(&format!("s{}", i))))
            .collect();
        let summary = RunSummary::from_outcome(&BuildOutcome {
            sets: vec![],
            problems,
        });

        let lines = summary.skipped_lines();
        assert_eq!(lines.len(), MAX_LISTED_SKIPPED + 1);
        assert_eq!(lines[0], "  - Set s0 (s0)");
        assert_eq!(lines.last().unwrap(), "  ... and 3 more");
    }

    #[test]
    fn test_failed_lines_carry_error() {
        let outcome = BuildOutcome {
            sets: vec![],
            problems: vec![
                ProblemSet::failed(&descriptor("sv2"), "Request timed out"),
                ProblemSet::skipped(&descriptor("sv3")),
            ],
        };

        let summary = RunSummary::from_outcome(&outcome);
        assert!(summary.has_failures());
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(
            summary.failed_lines(),
            vec!["  - Set sv2 (sv2): Request timed out".to_string()]
        );
    }
}
