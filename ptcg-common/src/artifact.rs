//! Output artifact persistence
//!
//! The artifact is a single JSON document holding every processed
//! [`SetRecord`]. Each save fully replaces the previous file: the new
//! content goes to a sibling temp file which is then renamed over the
//! target, so a crash mid-write leaves the previous checkpoint intact.

use crate::models::SetRecord;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load a previously persisted artifact
///
/// Returns `None` when the file does not exist. A file that cannot be read
/// or parsed (e.g. a partial write from an older tool) is reported and
/// also treated as absent, so callers start fresh.
pub fn load(path: &Path) -> Option<Vec<SetRecord>> {
    if !path.exists() {
        return None;
    }

    match read(path) {
        Ok(records) => {
            debug!(path = %path.display(), sets = records.len(), "Loaded existing artifact");
            Some(records)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Could not load existing artifact, starting fresh"
            );
            None
        }
    }
}

/// Read and parse an artifact, failing on any error
pub fn read(path: &Path) -> Result<Vec<SetRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the artifact atomically (temp file + rename)
pub fn save(path: &Path, records: &[SetRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path)?;
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Io(e));
    }

    debug!(path = %path.display(), sets = records.len(), "Artifact saved");
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("Not a file path: {}", path.display())))?;

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}
