//! Build summary command

use anyhow::{Context, Result};
use portico_index::build_summary;
use portico_room::load_snapshot;
use std::path::Path;

pub fn run(snapshot_path: &str, name: Option<&str>) -> Result<()> {
    let path = Path::new(snapshot_path);
    let snapshot =
        load_snapshot(path).with_context(|| format!("Failed to load {}", path.display()))?;

    let room_name = name
        .map(str::to_string)
        .or_else(|| {
            path.parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "room".to_string());

    println!("{}", build_summary(&room_name, &snapshot));
    Ok(())
}
