//! Snapshot loading

use crate::snapshot::Snapshot;
use portico_core::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load and normalize a snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let content = fs::read_to_string(path)?;
    load_snapshot_str(&content)
}

/// Load and normalize a snapshot from a JSON string
pub fn load_snapshot_str(content: &str) -> Result<Snapshot> {
    let mut snapshot: Snapshot = serde_json::from_str(content)?;
    snapshot.normalize();
    Ok(snapshot)
}

/// Load a snapshot file as a raw JSON value, for validation.
/// No shape is assumed beyond being valid JSON.
pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::save_snapshot_string;

    #[test]
    fn test_load_roundtrip() {
        let snapshot = Snapshot::starter();
        let encoded = save_snapshot_string(&snapshot).unwrap();

        let loaded = load_snapshot_str(&encoded).unwrap();
        assert_eq!(loaded.room_items.len(), 1);
        assert_eq!(loaded.settings.room_base, "BlankScene");
    }

    #[test]
    fn test_load_rejects_malformed() {
        assert!(load_snapshot_str("{not json").is_err());
        assert!(load_snapshot_str("[]").is_err());
    }
}
