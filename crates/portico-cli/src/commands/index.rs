//! Room index generation command

use anyhow::{Context, Result};
use portico_index::generate_index;
use portico_room::load_snapshot;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(snapshot_path: &str, output: Option<&str>) -> Result<()> {
    let snapshot_path = Path::new(snapshot_path);
    let snapshot = load_snapshot(snapshot_path)
        .with_context(|| format!("Failed to load {}", snapshot_path.display()))?;

    // Room name comes from the containing directory
    let room_name = snapshot_path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("room")
        .to_string();

    let out: PathBuf = match output {
        Some(path) => PathBuf::from(path),
        None => snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("room_index.md"),
    };

    let index = generate_index(&room_name, &snapshot);
    fs::write(&out, index).with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "Index generated: {} ({} items, {} quests)",
        out.display(),
        snapshot.room_items.len(),
        snapshot.quests.len()
    );
    Ok(())
}
