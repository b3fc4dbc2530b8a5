//! Room scaffolding command

use anyhow::{Context, Result};
use portico_room::{save_snapshot, Snapshot};
use std::fs;
use std::path::Path;

pub fn run(dir: &str) -> Result<()> {
    let root = Path::new(dir);
    if root.join("snapshot.json").exists() {
        anyhow::bail!("{} already contains a snapshot.json", root.display());
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    fs::create_dir_all(root.join("schemas/prefabs"))?;

    let snapshot = Snapshot::starter();
    let path = root.join("snapshot.json");
    save_snapshot(&path, &snapshot).context("Failed to write snapshot")?;

    println!("Created {}", path.display());
    println!("  1 item (default spawn point), default settings");
    println!();
    println!("Next steps:");
    println!("  portico validate {}", path.display());
    println!("  portico index {}", path.display());
    Ok(())
}
