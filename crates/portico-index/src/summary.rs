//! Compact build summary for quality review.
//!
//! A few hundred tokens instead of the full snapshot: item mix,
//! interaction histogram, audio usage, quest counts, and feedback
//! coverage (how many interactive items answer with sound/visual/camera
//! feedback).

use crate::shorten::shorten_trigger;
use portico_room::Snapshot;
use serde_json::Value;
use std::collections::BTreeMap;

/// Human-readable category for a prefab
fn prefab_category(prefab: &str) -> &str {
    match prefab {
        "ResizableCube" => "cube",
        "GLB" => "glb",
        "GLBNPC" => "npc",
        "WorldText" => "text",
        "SpawnPoint" => "spawn",
        "Portal" => "portal",
        "GlbCollectable" => "collectible",
        "JumpPad" => "jumppad",
        "Trigger" => "trigger",
        "Light" | "SpotLight" | "BlinkLight" => "light",
        "DefaultPainting" => "image",
        "DefaultVideo" => "video",
        "Gun" | "Shotgun" => "gun",
        "Destructible" => "destructible",
        "9Cube" => "elemental",
        "Addressable" => "effect",
        "Leaderboard" => "leaderboard",
        other => other,
    }
}

const PLAYER_TRIGGERS: &[&str] = &[
    "OnClickEvent",
    "OnCollideEvent",
    "OnCollisionStoppedEvent",
    "OnEnterEvent",
    "OnExitEvent",
    "OnHoverStartEvent",
    "OnHoverEndEvent",
    "OnKeyPressedEvent",
    "OnKeyReleasedEvent",
    "OnItemCollectedEvent",
    "OnItemClickEvent",
    "OnGunEquippedTrigger",
    "ShotHitTrigger",
    "GotKillTrigger",
];

const AUDIO_EFFECTS: &[&str] = &["PlaySoundOnce", "PlaySoundInALoop", "StopSound"];

const VISUAL_EFFECTS: &[&str] = &[
    "ShowObjectEvent",
    "HideObjectEvent",
    "ShowOutline",
    "HideOutline",
    "MoveToSpot",
    "DuplicateItem",
    "PlayAnimationOnce",
    "PlayerEmote",
    "NotificationPillEvent",
    "NPCMessageEvent",
];

const CAMERA_EFFECTS: &[&str] = &[
    "SetCameraFilter",
    "ChangeCameraZoom",
    "ChangeBloom",
    "ChangeFog",
    "RotateSkybox",
    "LockCamera",
    "UnlockCamera",
];

/// Build the summary report for a room
pub fn build_summary(room_name: &str, snapshot: &Snapshot) -> String {
    let payloads = snapshot.parsed_payloads();
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("BUILD SUMMARY: {room_name}"));
    lines.push("=".repeat(50));
    lines.push(format!("Total Items: {}", snapshot.room_items.len()));
    lines.push(String::new());

    // Item mix by category
    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for item in snapshot.room_items.values() {
        *categories.entry(prefab_category(&item.prefab_name)).or_default() += 1;
    }
    lines.push("By Type:".to_string());
    let parts: Vec<String> = categories
        .iter()
        .map(|(cat, count)| format!("{cat}: {count}"))
        .collect();
    for chunk in parts.chunks(4) {
        lines.push(format!("  {}", chunk.join("  |  ")));
    }
    lines.push(String::new());

    // Interaction histogram and feedback coverage
    let mut trigger_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut interactive_items = 0usize;
    let mut with_audio = 0usize;
    let mut with_visual = 0usize;
    let mut with_camera = 0usize;
    let mut ambient_loops = 0usize;
    let mut oneshot_sounds = 0usize;
    let mut music_changes = 0usize;

    for (id, _) in &snapshot.room_items {
        let Some(extra) = payloads.get(id) else { continue };
        let mut types = Vec::new();
        for task in extra.tasks() {
            collect_types(task, &mut types);
        }
        if types.is_empty() {
            continue;
        }

        let has_player_trigger = types.iter().any(|t| PLAYER_TRIGGERS.contains(&t.as_str()));
        if has_player_trigger {
            interactive_items += 1;
        }
        if types.iter().any(|t| AUDIO_EFFECTS.contains(&t.as_str())) {
            with_audio += 1;
        }
        if types.iter().any(|t| VISUAL_EFFECTS.contains(&t.as_str())) {
            with_visual += 1;
        }
        if types.iter().any(|t| CAMERA_EFFECTS.contains(&t.as_str())) {
            with_camera += 1;
        }
        if types.iter().any(|t| t == "PlaySoundInALoop") {
            ambient_loops += 1;
        }
        if types.iter().any(|t| t == "PlaySoundOnce") {
            oneshot_sounds += 1;
        }
        if types.iter().any(|t| t == "ChangeAudiusEffect") {
            music_changes += 1;
        }

        for t in &types {
            if PLAYER_TRIGGERS.contains(&t.as_str()) {
                *trigger_counts.entry(shorten_trigger(t)).or_default() += 1;
            }
        }
    }

    lines.push("Interactions:".to_string());
    if trigger_counts.is_empty() {
        lines.push("  (no player-triggered interactions found)".to_string());
    } else {
        for (trigger, count) in &trigger_counts {
            lines.push(format!("  {trigger}: {count}"));
        }
    }
    lines.push(String::new());

    lines.push("Audio:".to_string());
    lines.push(format!(
        "  Ambient loops: {ambient_loops}  |  One-shot sounds: {oneshot_sounds}  |  Music changes: {music_changes}"
    ));
    lines.push(String::new());

    // Quests: one per EntryId pair
    let mut seen_entries: Vec<&str> = Vec::new();
    let mut visible = 0usize;
    let mut hidden = 0usize;
    for quest in snapshot.quests.values() {
        if seen_entries.contains(&quest.entry_id.as_str()) {
            continue;
        }
        seen_entries.push(&quest.entry_id);
        if quest.visible {
            visible += 1;
        } else {
            hidden += 1;
        }
    }
    lines.push("Quests:".to_string());
    lines.push(format!(
        "  Total: {}  |  Visible: {visible}  |  Hidden: {hidden}",
        seen_entries.len()
    ));
    lines.push(String::new());

    lines.push("Feedback Coverage:".to_string());
    lines.push(format!("  Actions with sound: {with_audio}/{interactive_items}"));
    lines.push(format!("  Actions with visual effects: {with_visual}/{interactive_items}"));
    lines.push(format!("  Actions with camera effects: {with_camera}/{interactive_items}"));
    lines.push("=".repeat(50));

    lines.join("\n")
}

/// Collect every `$type` value in a nested task structure
fn collect_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(t)) = map.get("$type") {
                out.push(t.clone());
            }
            for v in map.values() {
                collect_types(v, out);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_types(v, out);
            }
        }
        _ => {}
    }
}
