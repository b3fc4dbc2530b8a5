//! Targeted snapshot patching.
//!
//! A patch makes add/modify/remove changes to items, payloads, quests,
//! and settings without rewriting the whole document. Operation order is
//! remove, then modify, then add; items first, then quests, settings,
//! and payloads.

use crate::quest::Quest;
use crate::snapshot::Snapshot;
use portico_core::{ItemId, PorticoError, Result};
use portico_item::Item;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A snapshot patch. Unknown keys are rejected on parse.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Patch {
    #[serde(default)]
    pub add_items: BTreeMap<String, Value>,
    #[serde(default)]
    pub modify_items: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub remove_items: Vec<String>,
    #[serde(default)]
    pub add_logic: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub modify_logic: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub remove_logic: Vec<String>,
    #[serde(default)]
    pub add_quests: BTreeMap<String, Value>,
    #[serde(default)]
    pub remove_quests: Vec<String>,
    #[serde(default)]
    pub modify_settings: Map<String, Value>,
}

impl Patch {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| PorticoError::PatchError(format!("invalid patch: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        self.add_items.is_empty()
            && self.modify_items.is_empty()
            && self.remove_items.is_empty()
            && self.add_logic.is_empty()
            && self.modify_logic.is_empty()
            && self.remove_logic.is_empty()
            && self.add_quests.is_empty()
            && self.remove_quests.is_empty()
            && self.modify_settings.is_empty()
    }
}

/// What a patch did (or would do)
#[derive(Debug, Default)]
pub struct PatchSummary {
    pub removed_items: Vec<String>,
    pub modified_items: Vec<String>,
    pub added_items: Vec<String>,
    pub removed_logic: Vec<String>,
    pub modified_logic: Vec<String>,
    pub added_logic: Vec<String>,
    pub removed_quests: Vec<String>,
    pub added_quests: Vec<String>,
    pub modified_settings_keys: Vec<String>,
    pub warnings: Vec<String>,
}

impl PatchSummary {
    pub fn is_empty(&self) -> bool {
        self.removed_items.is_empty()
            && self.modified_items.is_empty()
            && self.added_items.is_empty()
            && self.removed_logic.is_empty()
            && self.modified_logic.is_empty()
            && self.added_logic.is_empty()
            && self.removed_quests.is_empty()
            && self.added_quests.is_empty()
            && self.modified_settings_keys.is_empty()
    }
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        let mut line = |f: &mut fmt::Formatter<'_>, verb: &str, what: &str, ids: &[String]| {
            if ids.is_empty() {
                return Ok(());
            }
            wrote = true;
            writeln!(f, "{verb} {} {what}: {}", ids.len(), ids.join(", "))
        };

        line(f, "remove", "item(s)", &self.removed_items)?;
        line(f, "modify", "item(s)", &self.modified_items)?;
        line(f, "add", "item(s)", &self.added_items)?;
        line(f, "remove logic from", "item(s)", &self.removed_logic)?;
        line(f, "modify logic on", "item(s)", &self.modified_logic)?;
        line(f, "add logic to", "item(s)", &self.added_logic)?;
        line(f, "remove", "quest(s)", &self.removed_quests)?;
        line(f, "add", "quest(s)", &self.added_quests)?;
        line(f, "modify", "settings key(s)", &self.modified_settings_keys)?;

        if !wrote {
            writeln!(f, "no changes")?;
        }
        for warning in &self.warnings {
            writeln!(f, "WARNING: {warning}")?;
        }
        Ok(())
    }
}

/// Preview a patch: run safety checks and report what would change,
/// without touching the snapshot.
pub fn dry_run(snapshot: &Snapshot, patch: &Patch) -> Result<PatchSummary> {
    let warnings = safety_checks(snapshot, patch)?;
    Ok(build_summary(patch, warnings))
}

/// Apply a patch in place. Fails (leaving the snapshot untouched) on any
/// safety violation: duplicate adds, modifies of missing ids, removals
/// that would orphan children.
pub fn apply_patch(snapshot: &mut Snapshot, patch: &Patch) -> Result<PatchSummary> {
    let warnings = safety_checks(snapshot, patch)?;

    // 1. remove_items (embedded payloads go with them)
    for key in &patch.remove_items {
        snapshot.room_items.remove(&parse_id(key)?);
    }

    // 2. modify_items: shallow merge at the item's top level
    for (key, fields) in &patch.modify_items {
        let id = parse_id(key)?;
        if let Some(item) = snapshot.room_items.get(&id) {
            let mut value = serde_json::to_value(item)?;
            let obj = value.as_object_mut().expect("items serialize to objects");
            for (field, new_value) in fields {
                obj.insert(field.clone(), new_value.clone());
            }
            let merged: Item = serde_json::from_value(value).map_err(|e| {
                PorticoError::PatchError(format!("modify_items {key}: merged item is invalid: {e}"))
            })?;
            snapshot.room_items.insert(id, merged);
        }
    }

    // 3. add_items
    for (key, data) in &patch.add_items {
        let id = parse_id(key)?;
        let item: Item = serde_json::from_value(data.clone()).map_err(|e| {
            PorticoError::PatchError(format!("add_items {key}: invalid item: {e}"))
        })?;
        snapshot.room_items.insert(id, item);
    }

    // 4. quests: remove then add
    for quest_id in &patch.remove_quests {
        snapshot.quests.remove(quest_id);
    }
    for (quest_id, data) in &patch.add_quests {
        let quest: Quest = serde_json::from_value(data.clone()).map_err(|e| {
            PorticoError::PatchError(format!("add_quests {quest_id}: invalid quest: {e}"))
        })?;
        snapshot.quests.insert(quest_id.clone(), quest);
    }

    // 5. modify_settings: shallow merge at the settings top level
    if !patch.modify_settings.is_empty() {
        let mut value = serde_json::to_value(&snapshot.settings)?;
        let obj = value.as_object_mut().expect("settings serialize to objects");
        for (field, new_value) in &patch.modify_settings {
            obj.insert(field.clone(), new_value.clone());
        }
        snapshot.settings = serde_json::from_value(value).map_err(|e| {
            PorticoError::PatchError(format!("modify_settings: merged settings are invalid: {e}"))
        })?;
    }

    // 6. payloads: remove, modify (merge into parsed extraData), add (replace)
    for key in &patch.remove_logic {
        if let Some(item) = snapshot.room_items.get_mut(&parse_id(key)?) {
            item.extra_data = None;
        }
    }
    for (key, logic) in &patch.modify_logic {
        if let Some(item) = snapshot.room_items.get_mut(&parse_id(key)?) {
            let mut extra = item.parse_extra().unwrap_or_default().into_map();
            for (field, new_value) in logic {
                extra.insert(field.clone(), new_value.clone());
            }
            item.set_extra(&extra.into());
        }
    }
    for (key, logic) in &patch.add_logic {
        if let Some(item) = snapshot.room_items.get_mut(&parse_id(key)?) {
            item.set_extra(&logic.clone().into());
        }
    }

    Ok(build_summary(patch, warnings))
}

fn parse_id(key: &str) -> Result<ItemId> {
    ItemId::from_str(key)
        .map_err(|_| PorticoError::PatchError(format!("item key '{key}' must be a numeric string")))
}

/// Safety checks. Hard failures return an error; soft findings come back
/// as warnings.
fn safety_checks(snapshot: &Snapshot, patch: &Patch) -> Result<Vec<String>> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let contains = |key: &str| -> bool {
        ItemId::from_str(key)
            .map(|id| snapshot.room_items.contains_key(&id))
            .unwrap_or(false)
    };

    // Removing a parent while leaving its children orphans is an error
    for key in &patch.remove_items {
        let Ok(id) = ItemId::from_str(key) else {
            errors.push(format!("remove_items: item key '{key}' must be a numeric string"));
            continue;
        };
        let orphans: Vec<String> = snapshot
            .room_items
            .iter()
            .filter(|(_, item)| item.parent_item_id == id.raw() && id.raw() != 0)
            .map(|(child_id, _)| child_id.to_string())
            .filter(|child| !patch.remove_items.contains(child))
            .collect();
        if !orphans.is_empty() {
            errors.push(format!(
                "cannot remove item {key}: it has children {orphans:?}; remove them too or reparent first"
            ));
        }

        let referencing = items_referencing(snapshot, key);
        if !referencing.is_empty() {
            warnings.push(format!(
                "removing item {key} which is referenced in interactions (by items: {referencing:?})"
            ));
        }
    }

    for key in patch.add_items.keys() {
        if contains(key) {
            errors.push(format!("cannot add item {key}: already exists; use modify_items"));
        }
    }
    for key in patch.modify_items.keys() {
        if !contains(key) {
            errors.push(format!("cannot modify item {key}: not found; use add_items"));
        }
    }
    for key in patch.add_logic.keys().chain(patch.modify_logic.keys()) {
        if !contains(key) && !patch.add_items.contains_key(key) {
            errors.push(format!("cannot change logic on item {key}: item not found"));
        }
    }

    for quest_id in &patch.remove_quests {
        if !snapshot.quests.contains_key(quest_id) {
            warnings.push(format!("quest {quest_id} not found in quests"));
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(PorticoError::PatchError(errors.join("; ")))
    }
}

/// Items whose task wiring mentions `target_id` anywhere in a string
fn items_referencing(snapshot: &Snapshot, target_id: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (id, item) in &snapshot.room_items {
        if id.to_string() == target_id {
            continue;
        }
        let Ok(extra) = item.parse_extra() else { continue };
        if extra
            .tasks()
            .iter()
            .any(|task| value_mentions(task, target_id))
        {
            out.push(id.to_string());
        }
    }
    out
}

fn value_mentions(value: &Value, target: &str) -> bool {
    match value {
        Value::String(s) => s.contains(target),
        Value::Array(arr) => arr.iter().any(|v| value_mentions(v, target)),
        Value::Object(map) => map.values().any(|v| value_mentions(v, target)),
        _ => false,
    }
}

fn build_summary(patch: &Patch, warnings: Vec<String>) -> PatchSummary {
    PatchSummary {
        removed_items: patch.remove_items.clone(),
        modified_items: patch.modify_items.keys().cloned().collect(),
        added_items: patch.add_items.keys().cloned().collect(),
        removed_logic: patch.remove_logic.clone(),
        modified_logic: patch.modify_logic.keys().cloned().collect(),
        added_logic: patch.add_logic.keys().cloned().collect(),
        removed_quests: patch.remove_quests.clone(),
        added_quests: patch.add_quests.keys().cloned().collect(),
        modified_settings_keys: patch.modify_settings.keys().cloned().collect(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::Vec3;
    use portico_item::builders::Cube;
    use serde_json::json;

    fn room_with_cubes(n: u64) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for i in 0..n {
            let (item, extra) = Cube::new(Vec3::new(i as f32, 0.5, 0.0)).build();
            snapshot.add_item(item, &extra);
        }
        snapshot
    }

    #[test]
    fn test_unknown_patch_key_rejected() {
        let err = Patch::from_str(r#"{"rename_items": {}}"#).unwrap_err();
        assert!(err.to_string().contains("invalid patch"));
    }

    #[test]
    fn test_remove_modify_add() {
        let mut snapshot = room_with_cubes(3);
        let (new_item, extra) = Cube::new(Vec3::new(9.0, 0.5, 0.0)).color("0000FF").build();
        let mut new_item = new_item;
        new_item.set_extra(&extra);

        let patch = Patch::from_str(
            &json!({
                "remove_items": ["0"],
                "modify_items": {"1": {"locked": true}},
                "add_items": {"10": new_item}
            })
            .to_string(),
        )
        .unwrap();

        let summary = apply_patch(&mut snapshot, &patch).unwrap();
        assert_eq!(summary.removed_items, vec!["0"]);
        assert!(!snapshot.room_items.contains_key(&ItemId::from_raw(0)));
        assert!(snapshot.room_items[&ItemId::from_raw(1)].locked);
        assert!(snapshot.room_items.contains_key(&ItemId::from_raw(10)));
    }

    #[test]
    fn test_add_existing_id_fails() {
        let mut snapshot = room_with_cubes(1);
        let patch = Patch::from_str(r#"{"add_items": {"0": {"prefabName": "GLB"}}}"#).unwrap();

        let err = apply_patch(&mut snapshot, &patch).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        // Snapshot untouched
        assert_eq!(snapshot.room_items.len(), 1);
    }

    #[test]
    fn test_modify_missing_id_fails() {
        let mut snapshot = room_with_cubes(1);
        let patch = Patch::from_str(r#"{"modify_items": {"7": {"locked": true}}}"#).unwrap();
        assert!(apply_patch(&mut snapshot, &patch).is_err());
    }

    #[test]
    fn test_remove_parent_with_children_fails() {
        let mut snapshot = room_with_cubes(2);
        let (item, extra) = Cube::new(Vec3::ZERO).build();
        let parent_id = snapshot.add_item(item, &extra);
        snapshot
            .room_items
            .get_mut(&ItemId::from_raw(1))
            .unwrap()
            .parent_item_id = parent_id.raw();

        let patch = Patch::from_str(&json!({"remove_items": [parent_id.to_string()]}).to_string()).unwrap();
        let err = apply_patch(&mut snapshot, &patch).unwrap_err();
        assert!(err.to_string().contains("has children"));

        // Removing parent and child together is fine
        let patch =
            Patch::from_str(&json!({"remove_items": [parent_id.to_string(), "1"]}).to_string()).unwrap();
        apply_patch(&mut snapshot, &patch).unwrap();
    }

    #[test]
    fn test_modify_logic_merges() {
        let mut snapshot = room_with_cubes(1);
        let patch = Patch::from_str(r#"{"modify_logic": {"0": {"col": "00FF00", "e": 2.0}}}"#).unwrap();
        apply_patch(&mut snapshot, &patch).unwrap();

        let extra = snapshot.room_items[&ItemId::from_raw(0)].parse_extra().unwrap();
        assert_eq!(extra.get("col").unwrap(), "00FF00");
        assert_eq!(extra.get("e").unwrap(), 2.0);
        // Pre-existing wiring keys survive the merge
        assert!(extra.get("Tasks").is_some());
    }

    #[test]
    fn test_add_logic_replaces() {
        let mut snapshot = room_with_cubes(1);
        let patch = Patch::from_str(r#"{"add_logic": {"0": {"col": "112233"}}}"#).unwrap();
        apply_patch(&mut snapshot, &patch).unwrap();

        let extra = snapshot.room_items[&ItemId::from_raw(0)].parse_extra().unwrap();
        assert_eq!(extra.get("col").unwrap(), "112233");
        assert!(extra.get("Tasks").is_none());
    }

    #[test]
    fn test_remove_missing_quest_warns() {
        let mut snapshot = room_with_cubes(0);
        let patch = Patch::from_str(r#"{"remove_quests": ["mlhnotthere123"]}"#).unwrap();
        let summary = apply_patch(&mut snapshot, &patch).unwrap();
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn test_modify_settings_shallow_merge() {
        let mut snapshot = room_with_cubes(0);
        let patch = Patch::from_str(r#"{"modify_settings": {"isNight": true, "roomPrompt": "spooky"}}"#)
            .unwrap();
        apply_patch(&mut snapshot, &patch).unwrap();

        assert!(snapshot.settings.is_night);
        assert_eq!(snapshot.settings.room_prompt, "spooky");
        // Untouched fields keep their defaults
        assert_eq!(snapshot.settings.room_base, "BlankScene");
    }

    #[test]
    fn test_dry_run_leaves_snapshot_alone() {
        let snapshot = room_with_cubes(2);
        let patch = Patch::from_str(r#"{"remove_items": ["0"]}"#).unwrap();
        let summary = dry_run(&snapshot, &patch).unwrap();
        assert_eq!(summary.removed_items, vec!["0"]);
        assert_eq!(snapshot.room_items.len(), 2);
    }
}
