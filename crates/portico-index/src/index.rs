//! The 5-layer room index generator

use crate::shorten::{shorten_effect, shorten_prefab, shorten_trigger};
use chrono::Utc;
use portico_core::ItemId;
use portico_item::{ExtraData, Item};
use portico_room::Snapshot;
use serde_json::Value;
use std::collections::BTreeMap;

/// Grid cell size for the spatial map (units on the XZ plane)
const GRID_CELL_SIZE: f32 = 20.0;
/// Cells with fewer items merge into their nearest larger neighbor
const MERGE_THRESHOLD: usize = 3;
const MAX_INTERACTIVE_ROWS: usize = 80;
const MAX_QUEST_ROWS: usize = 50;

/// Generate the Markdown index: summary, interactive items, spatial map,
/// parent-child groups, and quests.
pub fn generate_index(room_name: &str, snapshot: &Snapshot) -> String {
    let payloads = snapshot.parsed_payloads();

    let sections = [
        build_summary(room_name, snapshot, &payloads),
        build_interactive(snapshot, &payloads),
        build_spatial_map(snapshot),
        build_parent_child(snapshot),
        build_quests(snapshot),
    ];
    sections.join("\n")
}

// ── Layer 1: summary ───────────────────────────────────────────────────────

fn build_summary(
    room_name: &str,
    snapshot: &Snapshot,
    payloads: &BTreeMap<ItemId, ExtraData>,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    lines.push(format!("# Room Index: {room_name}"));
    lines.push(format!("Generated: {timestamp}"));
    lines.push(String::new());

    let items = &snapshot.room_items;
    let id_range = match (items.keys().next(), items.keys().next_back()) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "none".to_string(),
    };

    // Each quest is two entries sharing an EntryId
    let mut entry_ids: Vec<&str> = snapshot
        .quests
        .values()
        .map(|q| q.entry_id.as_str())
        .collect();
    entry_ids.sort();
    entry_ids.dedup();

    let variables = snapshot
        .settings
        .parse_extra_data()
        .map(|inner| {
            inner
                .numeric_parameters
                .iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let var_str = if variables.is_empty() {
        "none".to_string()
    } else {
        variables.join(", ")
    };

    // Default spawn: a SpawnPoint with an empty name
    let spawn_str = items
        .iter()
        .find(|(id, item)| {
            item.prefab_name == "SpawnPoint"
                && payloads
                    .get(id)
                    .and_then(|extra| extra.get("n"))
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .is_empty()
        })
        .map(|(_, item)| fmt_pos(item))
        .unwrap_or_else(|| "not set".to_string());

    let bbox = if items.is_empty() {
        "(0.0, 0.0, 0.0) to (0.0, 0.0, 0.0)".to_string()
    } else {
        let (mut min, mut max) = {
            let first = items.values().next().expect("non-empty").pos;
            (first, first)
        };
        for item in items.values() {
            min.x = min.x.min(item.pos.x);
            min.y = min.y.min(item.pos.y);
            min.z = min.z.min(item.pos.z);
            max.x = max.x.max(item.pos.x);
            max.y = max.y.max(item.pos.y);
            max.z = max.z.max(item.pos.z);
        }
        format!(
            "({:.1}, {:.1}, {:.1}) to ({:.1}, {:.1}, {:.1})",
            min.x, min.y, min.z, max.x, max.y, max.z
        )
    };

    lines.push("## Overview".to_string());
    lines.push(format!("- Items: {} (ID range: {id_range})", items.len()));
    lines.push(format!("- Quests: {}", entry_ids.len()));
    lines.push(format!("- Variables: {var_str}"));
    lines.push(format!("- Spawn: {spawn_str}"));
    lines.push(format!("- Bounding box: {bbox}"));
    lines.push(String::new());

    let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items.values() {
        *type_counts.entry(item.prefab_name.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(&str, usize)> = type_counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    lines.push("## Item Counts by Type".to_string());
    for (prefab, count) in counts {
        lines.push(format!("  {prefab}: {count}"));
    }
    lines.push(String::new());

    lines.join("\n")
}

// ── Layer 2: interactive items ─────────────────────────────────────────────

fn build_interactive(snapshot: &Snapshot, payloads: &BTreeMap<ItemId, ExtraData>) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("## Interactive Items".to_string());

    let mut interactive: Vec<(ItemId, &Item, &ExtraData)> = snapshot
        .room_items
        .iter()
        .filter_map(|(id, item)| {
            let extra = payloads.get(id)?;
            (!extra.tasks().is_empty()).then_some((*id, item, extra))
        })
        .collect();

    if interactive.is_empty() {
        lines.push("No interactive items found.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    // Large rooms: show only player-triggered items in detail
    if interactive.len() > MAX_INTERACTIVE_ROWS {
        let total = interactive.len();
        let (player_triggered, quest_driven): (Vec<_>, Vec<_>) =
            interactive.into_iter().partition(|(_, _, extra)| {
                extra.tasks().iter().any(|task| {
                    let label = trigger_label(task);
                    !label.starts_with("Quest(") && label != "QuestState" && label != "Unknown"
                })
            });
        if !quest_driven.is_empty() {
            lines.push(format!(
                "_{total} interactive items total. Showing {} player-triggered items. {} quest-driven items omitted (use the query tool for details)._",
                player_triggered.len(),
                quest_driven.len()
            ));
            lines.push(String::new());
        }
        interactive = player_triggered;
    }

    lines.push("| ID | Type | Position | Triggers | # Effects | Summary |".to_string());
    lines.push("|----|------|----------|----------|-----------|---------|".to_string());

    for (id, item, extra) in interactive {
        let prefab = shorten_prefab(&item.prefab_name);
        let pos = fmt_pos(item);

        let mut triggers: Vec<String> = Vec::new();
        let mut all_effects: Vec<String> = Vec::new();
        for task in extra.tasks() {
            triggers.push(trigger_label(task));
            all_effects.extend(effect_types(task));
        }

        let effect_count = all_effects.len();
        let mut summary: Vec<String> = Vec::new();
        for effect in &all_effects {
            let short = shorten_effect(effect);
            if !summary.contains(&short) {
                summary.push(short);
            }
        }

        lines.push(format!(
            "| {id} | {prefab} | {pos} | {} | {effect_count} | {} |",
            triggers.join(", "),
            summary.join(", ")
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Label for a task row: the trigger type, or the quest that drives it
fn trigger_label(task: &Value) -> String {
    if let Some(ttype) = task
        .get("Trigger")
        .and_then(|t| t.get("$type"))
        .and_then(Value::as_str)
    {
        return shorten_trigger(ttype);
    }

    if task.get("$type").and_then(Value::as_str) == Some("TaskEffectorSubscription") {
        let name = task.get("Name").and_then(Value::as_str).unwrap_or("");
        if !name.is_empty() {
            let display = match name.split_once('_') {
                Some((prefix, suffix)) if prefix.chars().all(|c| c.is_ascii_digit()) => suffix,
                _ => name,
            };
            return format!("Quest({display})");
        }
        return "QuestState".to_string();
    }

    "Unknown".to_string()
}

fn effect_types(task: &Value) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(etype) = task
        .get("DirectEffector")
        .and_then(|d| d.get("Effector"))
        .and_then(|e| e.get("$type"))
        .and_then(Value::as_str)
    {
        out.push(etype.to_string());
    }
    if out.is_empty() {
        if let Some(etype) = task
            .get("Effector")
            .and_then(|e| e.get("$type"))
            .and_then(Value::as_str)
        {
            out.push(etype.to_string());
        }
    }
    out
}

// ── Layer 3: spatial map ───────────────────────────────────────────────────

fn build_spatial_map(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("## Spatial Map".to_string());

    if snapshot.room_items.is_empty() {
        lines.push("No items to map.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    let mut cells: BTreeMap<(i64, i64), Vec<&Item>> = BTreeMap::new();
    for item in snapshot.room_items.values() {
        cells.entry(grid_key(item.pos.x, item.pos.z)).or_default().push(item);
    }

    // Merge sparse cells into the nearest populated cell
    let small: Vec<(i64, i64)> = cells
        .iter()
        .filter(|(_, v)| v.len() < MERGE_THRESHOLD)
        .map(|(k, _)| *k)
        .collect();
    let large: Vec<(i64, i64)> = cells
        .iter()
        .filter(|(_, v)| v.len() >= MERGE_THRESHOLD)
        .map(|(k, _)| *k)
        .collect();

    if !large.is_empty() {
        for key in small {
            let nearest = large
                .iter()
                .min_by(|a, b| {
                    cell_distance(key, **a)
                        .partial_cmp(&cell_distance(key, **b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .copied()
                .expect("large is non-empty");
            let moved = cells.remove(&key).unwrap_or_default();
            cells.entry(nearest).or_default().extend(moved);
        }
    }

    let mut rows: Vec<((i64, i64), &Vec<&Item>)> = cells.iter().map(|(k, v)| (*k, v)).collect();
    rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

    lines.push("| Zone | Center | Items | Breakdown |".to_string());
    lines.push("|------|--------|-------|-----------|".to_string());

    for ((gx, gz), items) in rows {
        let count = items.len();
        let (sum_x, sum_z) = items
            .iter()
            .fold((0.0f32, 0.0f32), |(x, z), item| (x + item.pos.x, z + item.pos.z));
        let center = format!("({:.1}, {:.1})", sum_x / count as f32, sum_z / count as f32);

        let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in items {
            *type_counts.entry(shorten_prefab(&item.prefab_name)).or_default() += 1;
        }
        let mut breakdown: Vec<(&str, usize)> = type_counts.into_iter().collect();
        breakdown.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let shown: usize = breakdown.iter().take(5).map(|(_, c)| c).sum();
        let mut parts: Vec<String> = breakdown
            .iter()
            .take(5)
            .map(|(name, c)| format!("{c} {name}"))
            .collect();
        if count > shown {
            parts.push(format!("{} other", count - shown));
        }

        lines.push(format!(
            "| {} | {center} | {count} | {} |",
            zone_name(gx, gz),
            parts.join(", ")
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn grid_key(x: f32, z: f32) -> (i64, i64) {
    let gx = (x / GRID_CELL_SIZE).floor() as i64 * GRID_CELL_SIZE as i64;
    let gz = (z / GRID_CELL_SIZE).floor() as i64 * GRID_CELL_SIZE as i64;
    (gx, gz)
}

fn cell_distance(a: (i64, i64), b: (i64, i64)) -> f64 {
    let dx = (a.0 - b.0) as f64;
    let dz = (a.1 - b.1) as f64;
    (dx * dx + dz * dz).sqrt()
}

/// Compass-style zone name from grid coordinates
fn zone_name(gx: i64, gz: i64) -> String {
    let ns = if gz < 0 {
        "S"
    } else if gz > 0 {
        "N"
    } else {
        ""
    };
    let ew = if gx < 0 {
        "W"
    } else if gx > 0 {
        "E"
    } else {
        ""
    };
    let direction = if ns.is_empty() && ew.is_empty() {
        "Center".to_string()
    } else {
        format!("{ns}{ew}")
    };
    format!("{direction} ({gx}, {gz})")
}

// ── Layer 4: parent-child groups ───────────────────────────────────────────

fn build_parent_child(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("## Parent-Child Groups".to_string());

    let mut children: BTreeMap<u64, Vec<ItemId>> = BTreeMap::new();
    for (id, item) in &snapshot.room_items {
        if item.parent_item_id != 0 {
            children.entry(item.parent_item_id).or_default().push(*id);
        }
    }

    if children.is_empty() {
        lines.push("No parent-child relationships found.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    lines.push("| Parent ID | Type | Position | Children |".to_string());
    lines.push("|-----------|------|----------|----------|".to_string());

    for (parent_id, child_ids) in children {
        let parent = snapshot.room_items.get(&ItemId::from_raw(parent_id));
        let parent_type = parent.map(|p| shorten_prefab(&p.prefab_name)).unwrap_or("?");
        let pos = parent.map(fmt_pos).unwrap_or_else(|| "(0.0, 0.0, 0.0)".to_string());

        let child_parts: Vec<String> = child_ids
            .iter()
            .map(|child_id| {
                let child_type = snapshot
                    .room_items
                    .get(child_id)
                    .map(|c| shorten_prefab(&c.prefab_name))
                    .unwrap_or("?");
                format!("{child_id} ({child_type})")
            })
            .collect();

        lines.push(format!(
            "| {parent_id} | {parent_type} | {pos} | {} |",
            child_parts.join(", ")
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

// ── Layer 5: quests ────────────────────────────────────────────────────────

fn build_quests(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("## Quests".to_string());

    if snapshot.quests.is_empty() {
        lines.push("No quests defined.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    // Collapse the inProgress/completed pairs by Name
    let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for quest in snapshot.quests.values() {
        by_name.entry(quest.name.as_str()).or_default().push(quest.status.as_str());
    }

    let mut entries: Vec<(u32, &str, Vec<&str>)> = by_name
        .into_iter()
        .map(|(name, statuses)| {
            let (num, display) = match name.split_once('_') {
                Some((prefix, suffix)) => match prefix.parse::<u32>() {
                    Ok(num) => (num, suffix),
                    Err(_) => (999, name),
                },
                None => (999, name),
            };
            (num, display, statuses)
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(b.1)));

    if entries.len() > MAX_QUEST_ROWS {
        lines.push(format!(
            "_{} unique quests ({} total entries). Showing grouped summary._",
            entries.len(),
            snapshot.quests.len()
        ));
        lines.push(String::new());

        let mut groups: BTreeMap<&str, (usize, Vec<&str>)> = BTreeMap::new();
        for (_, display, _) in &entries {
            let key = display.split('_').next().unwrap_or(display);
            let entry = groups.entry(key).or_default();
            entry.0 += 1;
            if entry.1.len() < 3 {
                entry.1.push(display);
            }
        }
        let mut rows: Vec<(&str, (usize, Vec<&str>))> = groups.into_iter().collect();
        rows.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.0.cmp(b.0)));

        lines.push("| Group | Count | Example Names |".to_string());
        lines.push("|-------|-------|---------------|".to_string());
        for (group, (count, examples)) in rows {
            let mut example_str = examples.join(", ");
            if count > 3 {
                example_str.push_str(", ...");
            }
            lines.push(format!("| {group} | {count} | {example_str} |"));
        }
    } else {
        lines.push("| # | Name | States |".to_string());
        lines.push("|---|------|--------|".to_string());
        for (num, display, statuses) in entries {
            let mut unique: Vec<&str> = statuses.into_iter().collect();
            unique.sort_by_key(|s| match *s {
                "inProgress" => 1,
                "completed" => 2,
                _ => 99,
            });
            unique.dedup();
            let states = if unique.is_empty() {
                "none".to_string()
            } else {
                unique.join(" -> ")
            };
            lines.push(format!("| {num} | {display} | {states} |"));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn fmt_pos(item: &Item) -> String {
    format!("({:.1}, {:.1}, {:.1})", item.pos.x, item.pos.y, item.pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::Vec3;
    use portico_item::builders::{Cube, Glb, Trigger};
    use portico_logic::{basic_interaction, quest_trigger};
    use portico_room::{create_quest_pair, QuestPairOptions, Snapshot};
    use serde_json::json;

    fn test_room() -> Snapshot {
        let mut snapshot = Snapshot::starter();

        for i in 0..3 {
            let (item, extra) = Cube::new(Vec3::new(i as f32 * 2.0, 0.5, 0.0)).build();
            snapshot.add_item(item, &extra);
        }

        let (item, mut extra) = Trigger::new(Vec3::new(30.0, 1.0, -25.0), Vec3::splat(2.0)).build();
        extra.push_task(basic_interaction(
            json!({"$type": "OnEnterEvent"}),
            json!({"$type": "NotificationPillEvent", "nt": "hi", "c": "FFFFFF"}),
        ));
        snapshot.add_item(item, &extra);

        let (mut item, extra) = Glb::new(Vec3::new(30.0, 0.0, -26.0), "https://cdn.example.com/a.glb").build();
        item.parent_item_id = 4;
        snapshot.add_item(item, &extra);

        let pair = create_quest_pair(0, "gate", "uid-1", QuestPairOptions::default());
        snapshot.quests.extend(pair.entries);

        snapshot
    }

    #[test]
    fn test_index_has_all_layers() {
        let index = generate_index("test-room", &test_room());
        for heading in [
            "# Room Index: test-room",
            "## Overview",
            "## Item Counts by Type",
            "## Interactive Items",
            "## Spatial Map",
            "## Parent-Child Groups",
            "## Quests",
        ] {
            assert!(index.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_summary_counts() {
        let index = generate_index("r", &test_room());
        assert!(index.contains("- Items: 6 (ID range: 0-5)"));
        assert!(index.contains("- Quests: 1"));
        assert!(index.contains("ResizableCube: 3"));
        // Default spawn from the starter snapshot
        assert!(index.contains("- Spawn: (0.0, 0.2, 0.0)"));
    }

    #[test]
    fn test_interactive_table() {
        let index = generate_index("r", &test_room());
        assert!(index.contains("| 4 | Trigger |"));
        assert!(index.contains("Enter"));
        assert!(index.contains("Notification"));
    }

    #[test]
    fn test_quest_layer() {
        let index = generate_index("r", &test_room());
        assert!(index.contains("| 0 | gate | inProgress -> completed |"));
    }

    #[test]
    fn test_parent_child_layer() {
        let index = generate_index("r", &test_room());
        assert!(index.contains("| 4 | Trigger |"));
        assert!(index.contains("5 (GLB)"));
    }

    #[test]
    fn test_quest_trigger_label() {
        let task = quest_trigger("mlhabc123def45", "0_gate", 181, json!({"$type": "OnClickEvent"}));
        assert_eq!(trigger_label(&task), "Click");

        let effector_task = json!({
            "$type": "TaskEffectorSubscription",
            "Name": "2_open_door",
            "Effector": {"$type": "ShowObjectEvent"}
        });
        assert_eq!(trigger_label(&effector_task), "Quest(open_door)");
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(zone_name(0, 0), "Center (0, 0)");
        assert_eq!(zone_name(20, -20), "SE (20, -20)");
        assert_eq!(zone_name(-20, 20), "NW (-20, 20)");
    }
}
