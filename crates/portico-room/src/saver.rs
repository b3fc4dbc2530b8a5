//! Snapshot saving

use crate::snapshot::Snapshot;
use portico_core::Result;
use std::fs;
use std::path::Path;

/// Serialize a snapshot as pretty-printed JSON
pub fn save_snapshot_string(snapshot: &Snapshot) -> Result<String> {
    let mut out = serde_json::to_string_pretty(snapshot)?;
    out.push('\n');
    Ok(out)
}

/// Write a snapshot to a JSON file
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<()> {
    fs::write(path, save_snapshot_string(snapshot)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_shape() {
        let out = save_snapshot_string(&Snapshot::starter()).unwrap();
        assert!(out.contains("\"roomItems\""));
        assert!(out.contains("\"roomTasks\""));
        assert!(out.contains("\"quests\""));
        assert!(out.ends_with('\n'));
        // Normalized snapshots carry no separated logic key
        assert!(!out.contains("\"logic\""));
    }
}
