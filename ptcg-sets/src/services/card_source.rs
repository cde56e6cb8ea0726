//! Card sources for the local pipeline
//!
//! A card source answers "which cards belong to set X". `Ok(None)` means
//! the source has no data for that set, which callers treat as a skip
//! rather than a failure.

use ptcg_common::models::RawCard;
use ptcg_common::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the raw cards of a set
pub trait CardSource {
    fn cards_for_set(&self, set_id: &str) -> Result<Option<Vec<RawCard>>>;
}

/// One JSON file per set (`{cards_dir}/{set_id}.json`) in the catalog mirror
#[derive(Debug, Clone)]
pub struct LocalCardSource {
    cards_dir: PathBuf,
}

impl LocalCardSource {
    pub fn new(cards_dir: impl Into<PathBuf>) -> Self {
        Self {
            cards_dir: cards_dir.into(),
        }
    }

    pub fn cards_dir(&self) -> &Path {
        &self.cards_dir
    }

    /// Path of the card file for `set_id`
    pub fn card_file(&self, set_id: &str) -> PathBuf {
        self.cards_dir.join(format!("{}.json", set_id))
    }
}

impl CardSource for LocalCardSource {
    fn cards_for_set(&self, set_id: &str) -> Result<Option<Vec<RawCard>>> {
        let path = self.card_file(set_id);
        if !path.exists() {
            debug!(set_id = %set_id, path = %path.display(), "No card file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let cards: Vec<RawCard> = serde_json::from_str(&content)?;
        Ok(Some(cards))
    }
}

/// In-memory source keyed by set id
impl CardSource for HashMap<String, Vec<RawCard>> {
    fn cards_for_set(&self, set_id: &str) -> Result<Option<Vec<RawCard>>> {
        Ok(self.get(set_id).cloned())
    }
}
