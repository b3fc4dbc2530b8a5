//! Snapshot patch command

use anyhow::{Context, Result};
use portico_room::{apply_patch, dry_run, load_snapshot, save_snapshot, Patch};

pub fn run(snapshot_path: &str, patch_path: &str, preview: bool) -> Result<()> {
    let mut snapshot = load_snapshot(snapshot_path)
        .with_context(|| format!("Failed to load {snapshot_path}"))?;
    let patch =
        Patch::from_file(patch_path).with_context(|| format!("Failed to load {patch_path}"))?;

    if patch.is_empty() {
        println!("Patch is empty, nothing to do.");
        return Ok(());
    }

    if preview {
        let summary = dry_run(&snapshot, &patch)?;
        println!("DRY RUN: no changes will be made");
        println!();
        print!("{summary}");
        return Ok(());
    }

    let summary = apply_patch(&mut snapshot, &patch)?;
    save_snapshot(snapshot_path, &snapshot)
        .with_context(|| format!("Failed to write {snapshot_path}"))?;

    print!("{summary}");
    println!("Snapshot saved to {snapshot_path}");
    Ok(())
}
