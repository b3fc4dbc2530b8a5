//! Full snapshot validation.
//!
//! Works on raw JSON values rather than the typed [`crate::Snapshot`] so
//! a malformed document yields a report full of findings instead of a
//! single deserialization error. Sections: top-level structure, settings,
//! per-item structure, extra data vs schema, tasks, quests, and
//! cross-references.

use crate::quest::{is_valid_quest_id, is_valid_quest_name};
use crate::report::ValidationReport;
use crate::settings::{SETTINGS_EXPECTED_KEYS, SETTINGS_WRONG_KEYS, VALID_ROOM_BASES};
use crate::snapshot::normalize_value;
use portico_core::{Color, ItemId, Result};
use portico_logic::validate_tasks;
use portico_schema::{check_content, validate_extra_data, ContentIssue, SchemaRegistry};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;

/// Common color key mistakes on cubes; the correct key is `col`
const CUBE_COLOR_MISTAKES: &[&str] = &["color", "colour", "Color", "Colour"];

/// Validate a snapshot file. IO and JSON syntax failures surface as a
/// single-finding report rather than an `Err` so callers print uniformly.
pub fn validate_file<P: AsRef<Path>>(path: P, registry: &SchemaRegistry) -> Result<ValidationReport> {
    let path = path.as_ref();
    let mut report = ValidationReport::new();

    if !path.exists() {
        report.error("file", format!("file not found: {}", path.display()));
        return Ok(report);
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(data) => Ok(validate_value(data, registry)),
        Err(e) => {
            report.error("file", format!("invalid JSON: {e}"));
            Ok(report)
        }
    }
}

/// Validate a raw snapshot document
pub fn validate_value(mut data: Value, registry: &SchemaRegistry) -> ValidationReport {
    let mut report = ValidationReport::new();

    if !data.is_object() {
        report.error("file", format!("root must be an object, got {}", type_name(&data)));
        return report;
    }

    normalize_value(&mut data);
    let Some(root) = data.as_object() else {
        return report;
    };

    validate_top_level(root, &mut report);

    if let Some(settings) = root.get("settings") {
        validate_settings(settings, &mut report);
    }

    if let Some(items) = root.get("roomItems").and_then(Value::as_object) {
        let all_keys: BTreeSet<&str> = items.keys().map(|k| k.as_str()).collect();

        for (item_key, item) in items {
            let Some(item) = item.as_object() else {
                report.error(format!("item {item_key}"), "item is not an object");
                continue;
            };

            validate_item_structure(item_key, item, &all_keys, registry, &mut report);

            // Deeper checks need the parsed payload
            let raw_extra = item.get("extraData").and_then(Value::as_str).unwrap_or("");
            let extra = match parse_extra(raw_extra) {
                Ok(extra) => extra,
                Err(e) => {
                    report.error(format!("item {item_key}"), format!("extraData is not valid JSON: {e}"));
                    continue;
                }
            };

            let prefab = item.get("prefabName").and_then(Value::as_str).unwrap_or("");
            let content = item.get("contentString").and_then(Value::as_str).unwrap_or("");
            let section = format!("item {item_key}, {prefab}");

            if let Some(schema) = registry.get(prefab) {
                for error in validate_extra_data(schema, &extra) {
                    report.error(&section, error.to_string());
                }
                for issue in check_content(schema, content) {
                    push_content_issue(&section, &issue, &mut report);
                }
            }

            if prefab == "ResizableCube" {
                validate_cube_color_keys(&section, &extra, &mut report);
            }

            if let Some(Value::Array(tasks)) = extra.get("Tasks") {
                for message in validate_tasks(prefab, tasks) {
                    report.error(&section, message);
                }
            }
        }
    }

    if let Some(quests) = root.get("quests").and_then(Value::as_object) {
        if !quests.is_empty() {
            validate_quests(quests, &mut report);
        }
    }

    validate_cross_references(root, &mut report);

    report
}

// ── Top-level structure ────────────────────────────────────────────────────

fn validate_top_level(root: &Map<String, Value>, report: &mut ValidationReport) {
    for key in ["roomItems", "settings", "roomTasks", "quests"] {
        if !root.contains_key(key) {
            report.error("root", format!("missing required key: '{key}'"));
        }
    }

    if let Some(rt) = root.get("roomTasks") {
        match rt.as_object() {
            None => report.error("roomTasks", format!("must be an object, got {}", type_name(rt))),
            Some(rt) => match rt.get("Tasks") {
                None => report.error("roomTasks", r#"must be {"Tasks": []}"#),
                Some(tasks) if !tasks.is_array() => {
                    report.error("roomTasks", "\"Tasks\" must be an array")
                }
                _ => {}
            },
        }
    }

    if let Some(items) = root.get("roomItems") {
        match items.as_object() {
            None => report.error(
                "roomItems",
                format!("must be an object, got {}", type_name(items)),
            ),
            Some(items) => {
                for key in items.keys() {
                    if !ItemId::is_valid_key(key) {
                        report.error("roomItems", format!("item key '{key}' must be a numeric string"));
                    }
                }
            }
        }
    }
}

// ── Settings ───────────────────────────────────────────────────────────────

fn validate_settings(settings: &Value, report: &mut ValidationReport) {
    let Some(settings) = settings.as_object() else {
        report.error("settings", format!("must be an object, got {}", type_name(settings)));
        return;
    };

    if settings.is_empty() {
        report.error("settings", "settings is empty; start from the default settings");
        return;
    }

    let wrong: Vec<&str> = SETTINGS_WRONG_KEYS
        .iter()
        .copied()
        .filter(|k| settings.contains_key(*k))
        .collect();
    let expected_present = SETTINGS_EXPECTED_KEYS.iter().any(|k| settings.contains_key(*k));

    if !wrong.is_empty() && !expected_present {
        report.error(
            "settings",
            format!(
                "uses a custom format (found {wrong:?}) instead of the platform schema; needs roomBase, isNight, roomSettingsExtraData, ..."
            ),
        );
        return;
    }
    for key in &wrong {
        report.error("settings", format!("unexpected key \"{key}\"; not a platform settings field"));
    }

    match settings.get("roomBase") {
        None => report.error("settings", "missing \"roomBase\"; should be \"BlankScene\" or similar"),
        Some(Value::String(base)) if !VALID_ROOM_BASES.contains(&base.as_str()) => {
            report.warning("settings", format!("unknown roomBase \"{base}\""));
        }
        _ => {}
    }

    if !settings.contains_key("roomSettingsExtraData") {
        report.error("settings", "missing \"roomSettingsExtraData\"; start from the default settings");
    }

    if let Some(tr) = settings.get("tasksRefresh") {
        if !tr.is_boolean() {
            report.error(
                "settings",
                format!("tasksRefresh must be a boolean, got {}", type_name(tr)),
            );
        }
    }

    // The inner layer must be a JSON string encoding an object
    if let Some(rsed) = settings.get("roomSettingsExtraData") {
        match rsed {
            Value::String(raw) if raw.is_empty() => {}
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Err(e) => report.error("settings", format!("roomSettingsExtraData is not valid JSON: {e}")),
                Ok(parsed) => match parsed.as_object() {
                    None => report.error(
                        "settings",
                        format!("roomSettingsExtraData must parse to an object, got {}", type_name(&parsed)),
                    ),
                    Some(inner) => validate_numeric_parameters(inner, report),
                },
            },
            other => report.error(
                "settings",
                format!("roomSettingsExtraData must be a JSON string, got {}", type_name(other)),
            ),
        }
    }
}

fn validate_numeric_parameters(inner: &Map<String, Value>, report: &mut ValidationReport) {
    let Some(params) = inner.get("numericParameters") else {
        return;
    };
    let Some(params) = params.as_array() else {
        report.error(
            "settings",
            format!("numericParameters must be an array, got {}", type_name(params)),
        );
        return;
    };
    for (i, param) in params.iter().enumerate() {
        match param.as_object() {
            None => report.error("settings", format!("numericParameters[{i}] must be an object")),
            Some(param) => {
                if !param.contains_key("N") {
                    report.error(
                        "settings",
                        format!("numericParameters[{i}] missing \"N\" (variable name)"),
                    );
                }
                if let Some(vt) = param.get("VT") {
                    if !vt.is_i64() && !vt.is_u64() {
                        report.error(
                            "settings",
                            format!("numericParameters[{i}] VT must be an integer, got {}", type_name(vt)),
                        );
                    }
                }
            }
        }
    }
}

// ── Items ──────────────────────────────────────────────────────────────────

fn validate_item_structure(
    item_key: &str,
    item: &Map<String, Value>,
    all_keys: &BTreeSet<&str>,
    registry: &SchemaRegistry,
    report: &mut ValidationReport,
) {
    let section = format!("item {item_key}");

    match item.get("prefabName").and_then(Value::as_str) {
        None => report.error(&section, "missing 'prefabName'"),
        Some(prefab) if !registry.contains(prefab) => {
            report.error(&section, format!("invalid prefabName '{prefab}'; not a known item type"));
        }
        _ => {}
    }

    check_vector(&section, item, "pos", &["x", "y", "z"], report);
    check_vector(&section, item, "rot", &["x", "y", "z", "w"], report);
    check_vector(&section, item, "scale", &["x", "y", "z"], report);

    match item.get("extraData") {
        None => report.error(&section, "missing 'extraData'"),
        Some(Value::String(_)) => {}
        Some(other) => report.error(
            &section,
            format!("extraData must be a JSON string, got {}", type_name(other)),
        ),
    }

    let parent_id = item.get("parentItemID").and_then(Value::as_u64).unwrap_or(0);
    if parent_id != 0 && !all_keys.contains(parent_id.to_string().as_str()) {
        report.error(&section, format!("parentItemID {parent_id} references non-existent item"));
    }
}

fn check_vector(
    section: &str,
    item: &Map<String, Value>,
    key: &str,
    components: &[&str],
    report: &mut ValidationReport,
) {
    match item.get(key) {
        None => report.error(section, format!("missing '{key}'")),
        Some(Value::Object(v)) => {
            for axis in components {
                if !v.contains_key(*axis) {
                    report.error(section, format!("{key} missing '{axis}' component"));
                }
            }
        }
        Some(_) => {}
    }
}

fn validate_cube_color_keys(section: &str, extra: &Map<String, Value>, report: &mut ValidationReport) {
    for mistake in CUBE_COLOR_MISTAKES {
        if extra.contains_key(*mistake) {
            report.error(section, format!("extraData uses \"{mistake}\" for color; should be \"col\""));
        }
    }

    // "c" is the collider toggle; a string there is a misplaced color
    if let Some(Value::String(_)) = extra.get("c") {
        report.error(
            section,
            "extraData uses \"c\" (string) for color; should be \"col\". \"c\" is the collider toggle (bool)",
        );
    }

    if let Some(Value::String(col)) = extra.get("col") {
        if !Color::is_valid_hex(col) {
            report.error(
                section,
                format!("invalid color value \"{col}\"; must be 6-char hex (e.g. \"FF0000\")"),
            );
        }
    }
}

fn push_content_issue(section: &str, issue: &ContentIssue, report: &mut ValidationReport) {
    match issue {
        ContentIssue::Missing { expected } => {
            report.error(section, format!("contentString is empty; must be {expected}"))
        }
        ContentIssue::MissingPrefix { prefix } => {
            report.error(section, format!("contentString missing \"{prefix}\" prefix"))
        }
        ContentIssue::MissingQueryFlag { flag } => {
            report.error(section, format!("contentString missing '{flag}' suffix"))
        }
        // The effect catalog lags the platform; unknown names survive
        ContentIssue::UnknownEffect { name } => {
            report.warning(section, format!("unknown addressable effect \"{name}\""))
        }
        ContentIssue::NotInSet { value, allowed } => report.error(
            section,
            format!("contentString \"{value}\" is not one of {allowed:?}"),
        ),
        ContentIssue::NotEmpty { value } => {
            report.error(section, format!("contentString must be empty, got \"{value}\""))
        }
    }
}

// ── Quests ─────────────────────────────────────────────────────────────────

fn validate_quests(quests: &Map<String, Value>, report: &mut ValidationReport) {
    const REQUIRED_FIELDS: &[&str] = &[
        "EntryId", "Name", "Description", "Status", "Group", "Enabled", "Creator", "id",
    ];
    const VALID_GROUPS: &[&str] = &["", "multiplayer", "nonPersistent"];

    let all_ids: BTreeSet<&str> = quests.keys().map(|k| k.as_str()).collect();
    // EntryId -> entries, for pairing validation
    let mut entry_groups: Vec<(&str, Vec<&Map<String, Value>>)> = Vec::new();

    for (quest_id, quest) in quests {
        let section = format!("quest {quest_id}");
        let Some(quest) = quest.as_object() else {
            report.error(&section, "quest is not an object");
            continue;
        };

        if quest.get("id").and_then(Value::as_str) != Some(quest_id.as_str()) {
            report.error(
                &section,
                format!("\"id\" field ({:?}) does not match map key ({quest_id})", quest.get("id")),
            );
        }

        if !is_valid_quest_id(quest_id) {
            report.error(&section, "invalid quest id format; should be m + 10-16 lowercase alphanumerics");
        }

        for field in REQUIRED_FIELDS {
            if !quest.contains_key(*field) {
                report.error(&section, format!("missing required field \"{field}\""));
            }
        }

        let entry_id = quest.get("EntryId").and_then(Value::as_str).unwrap_or("");
        if !entry_id.is_empty() && uuid::Uuid::try_parse(entry_id).is_err() {
            report.error(&section, format!("EntryId \"{entry_id}\" is not a valid UUID"));
        }

        if let Some(name) = quest.get("Name").and_then(Value::as_str) {
            if !name.is_empty() && !is_valid_quest_name(name) {
                report.error(
                    &section,
                    format!("Name \"{name}\" should follow N_suffix format (e.g. \"0_activate\")"),
                );
            }
        }

        if let Some(desc) = quest.get("Description").and_then(Value::as_str) {
            if !desc.is_empty() && desc != "created in unity" {
                report.error(&section, format!("Description must be \"created in unity\", got \"{desc}\""));
            }
        }

        if let Some(status) = quest.get("Status").and_then(Value::as_str) {
            if !status.is_empty() && status != "inProgress" && status != "completed" {
                report.error(
                    &section,
                    format!("Status must be \"inProgress\" or \"completed\", got \"{status}\""),
                );
            }
        }

        match quest.get("Group") {
            Some(Value::String(group)) if !VALID_GROUPS.contains(&group.as_str()) => {
                report.error(
                    &section,
                    format!("Group must be \"\", \"nonPersistent\", or \"multiplayer\", got \"{group}\""),
                );
            }
            Some(other) if !other.is_string() => {
                report.error(&section, format!("Group must be a string, got {}", type_name(other)));
            }
            _ => {}
        }

        if let Some(dg) = quest.get("DisplayGroup") {
            if !dg.is_string() {
                report.error(&section, format!("DisplayGroup must be a string, got {}", type_name(dg)));
            }
        }

        for field in ["Enabled", "AutoStart", "TriggeredByInventory", "Tracked", "Visible"] {
            if let Some(v) = quest.get(field) {
                if !v.is_boolean() {
                    report.error(&section, format!("{field} must be a boolean, got {}", type_name(v)));
                }
            }
        }

        for field in ["RepeatableLimit", "FinishTime"] {
            if let Some(v) = quest.get(field) {
                if !v.is_number() {
                    report.error(&section, format!("{field} must be a number, got {}", type_name(v)));
                }
            }
        }

        validate_requirements(&section, quest, &all_ids, report);

        if let Some(rewards) = quest.get("Rewards") {
            if !rewards.is_array() {
                report.error(&section, format!("Rewards must be an array, got {}", type_name(rewards)));
            }
        }
        if let Some(msg) = quest.get("SuccessMsg") {
            if !msg.is_string() {
                report.error(&section, format!("SuccessMsg must be a string, got {}", type_name(msg)));
            }
        }

        if !entry_id.is_empty() {
            match entry_groups.iter_mut().find(|(id, _)| *id == entry_id) {
                Some((_, entries)) => entries.push(quest),
                None => entry_groups.push((entry_id, vec![quest])),
            }
        }
    }

    // Pairing: each EntryId has exactly an inProgress and a completed entry
    for (entry_id, entries) in &entry_groups {
        if entries.len() != 2 {
            report.error(
                "quests",
                format!(
                    "EntryId \"{entry_id}\" has {} entries; must have exactly 2 (inProgress + completed)",
                    entries.len()
                ),
            );
            continue;
        }

        let statuses: Vec<&str> = entries
            .iter()
            .map(|e| e.get("Status").and_then(Value::as_str).unwrap_or(""))
            .collect();
        if !statuses.contains(&"inProgress") {
            report.error("quests", format!("EntryId \"{entry_id}\" missing inProgress entry"));
        }
        if !statuses.contains(&"completed") {
            report.error("quests", format!("EntryId \"{entry_id}\" missing completed entry"));
        }

        let ids: BTreeSet<&str> = entries
            .iter()
            .map(|e| e.get("id").and_then(Value::as_str).unwrap_or(""))
            .collect();
        if ids.len() < 2 {
            report.error(
                "quests",
                format!("EntryId \"{entry_id}\" pair has duplicate quest ids; each entry must have a different id"),
            );
        }

        for field in ["Group", "Name", "DisplayGroup"] {
            let values: Vec<Option<&Value>> = entries.iter().map(|e| e.get(field)).collect();
            if values[0] != values[1] {
                report.error(
                    "quests",
                    format!("EntryId \"{entry_id}\" pair has mismatched {field}: {values:?}"),
                );
            }
        }
    }
}

fn validate_requirements(
    section: &str,
    quest: &Map<String, Value>,
    all_ids: &BTreeSet<&str>,
    report: &mut ValidationReport,
) {
    let Some(reqs) = quest.get("Requirements") else {
        return;
    };
    let Some(reqs) = reqs.as_array() else {
        report.error(section, format!("Requirements must be an array, got {}", type_name(reqs)));
        return;
    };

    for (i, req) in reqs.iter().enumerate() {
        let Some(req) = req.as_object() else {
            report.error(section, format!("Requirements[{i}] must be an object"));
            continue;
        };
        for field in ["type", "id", "amount"] {
            if !req.contains_key(field) {
                report.error(section, format!("Requirements[{i}] missing \"{field}\""));
            }
        }
        if let Some(kind) = req.get("type").and_then(Value::as_str) {
            if !kind.is_empty() && kind != "quest" {
                report.error(section, format!("Requirements[{i}] unknown type \"{kind}\"; expected \"quest\""));
            }
        }
        if let Some(id) = req.get("id").and_then(Value::as_str) {
            if !id.is_empty() && !all_ids.is_empty() && !all_ids.contains(id) {
                report.error(section, format!("Requirements[{i}] references quest \"{id}\" not found in quests"));
            }
        }
        if let Some(amount) = req.get("amount").and_then(Value::as_f64) {
            if amount < 0.0 {
                report.error(section, format!("Requirements[{i}] amount must be non-negative, got {amount}"));
            }
        }
    }
}

// ── Cross-references ───────────────────────────────────────────────────────

fn validate_cross_references(root: &Map<String, Value>, report: &mut ValidationReport) {
    let empty = Map::new();
    let items = root.get("roomItems").and_then(Value::as_object).unwrap_or(&empty);
    let quests = root.get("quests").and_then(Value::as_object).unwrap_or(&empty);
    let settings = root.get("settings").and_then(Value::as_object).unwrap_or(&empty);

    let quest_ids: BTreeSet<&str> = quests.keys().map(|k| k.as_str()).collect();

    // Names declared in settings, referenced from effects
    let mut variables: BTreeSet<String> = BTreeSet::new();
    let mut camera_states: BTreeSet<String> = BTreeSet::new();
    let mut movement_states: BTreeSet<String> = BTreeSet::new();

    if let Some(raw) = settings.get("roomSettingsExtraData").and_then(Value::as_str) {
        if !raw.is_empty() {
            if let Ok(inner) = serde_json::from_str::<Value>(raw) {
                collect_names(&inner, "numericParameters", "N", &mut variables);
                collect_names(&inner, "customCameraStates", "stateName", &mut camera_states);
                collect_names(&inner, "movementStates", "movementStateName", &mut movement_states);
            }
        }
    }

    for (item_key, item) in items {
        let Some(item) = item.as_object() else { continue };
        let prefab = item.get("prefabName").and_then(Value::as_str).unwrap_or("");
        let raw = item.get("extraData").and_then(Value::as_str).unwrap_or("");
        let Ok(extra) = parse_extra(raw) else { continue };
        let Some(Value::Array(tasks)) = extra.get("Tasks") else {
            continue;
        };

        let section = format!("item {item_key}, {prefab}");

        for (i, task) in tasks.iter().enumerate() {
            let Some(task) = task.as_object() else { continue };

            // Quest linkage: id format, name format, existence
            if let Some(trigger_id) = task.get("TaskTriggerId").and_then(Value::as_str) {
                if !trigger_id.is_empty() {
                    if !is_valid_quest_id(trigger_id) {
                        report.error(
                            &section,
                            format!("Tasks[{i}] TaskTriggerId \"{trigger_id}\" is not a valid quest id"),
                        );
                    } else if !quest_ids.is_empty() && !quest_ids.contains(trigger_id) {
                        report.error(
                            &section,
                            format!("Tasks[{i}] TaskTriggerId \"{trigger_id}\" not found in quests"),
                        );
                    }
                    if let Some(name) = task.get("Name").and_then(Value::as_str) {
                        if !name.is_empty() && !is_valid_quest_name(name) {
                            report.error(
                                &section,
                                format!("Tasks[{i}] quest Name \"{name}\" should follow N_suffix format"),
                            );
                        }
                    }
                }
            }

            // Effector references into settings-declared names
            let effector = task
                .get("Effector")
                .and_then(Value::as_object)
                .or_else(|| {
                    task.get("DirectEffector")
                        .and_then(Value::as_object)
                        .and_then(|d| d.get("Effector"))
                        .and_then(Value::as_object)
                });
            let Some(effector) = effector else { continue };
            let etype = effector.get("$type").and_then(Value::as_str).unwrap_or("");

            if matches!(etype, "UpdateScoreEvent" | "DisplayValueEvent" | "HideValueEvent") {
                if let Some(label) = effector.get("label").and_then(Value::as_str) {
                    if !label.is_empty() && !variables.is_empty() && !variables.contains(label) {
                        report.error(
                            &section,
                            format!(
                                "Tasks[{i}] {etype} references variable \"{label}\" not defined in settings numericParameters"
                            ),
                        );
                    }
                }
            }

            if etype == "ChangeCamState" {
                if let Some(state) = effector.get("camState").and_then(Value::as_str) {
                    if !state.is_empty() && !camera_states.is_empty() && !camera_states.contains(state) {
                        report.error(
                            &section,
                            format!("Tasks[{i}] ChangeCamState references camera state \"{state}\" not defined in settings"),
                        );
                    }
                }
            }

            if etype == "ChangeMovementProfile" {
                if let Some(profile) = effector.get("mvmtProfile").and_then(Value::as_str) {
                    if !profile.is_empty() && !movement_states.is_empty() && !movement_states.contains(profile)
                    {
                        report.error(
                            &section,
                            format!(
                                "Tasks[{i}] ChangeMovementProfile references movement state \"{profile}\" not defined in settings"
                            ),
                        );
                    }
                }
            }
        }
    }
}

fn collect_names(inner: &Value, list_key: &str, name_key: &str, out: &mut BTreeSet<String>) {
    if let Some(entries) = inner.get(list_key).and_then(Value::as_array) {
        for entry in entries {
            if let Some(name) = entry.get(name_key).and_then(Value::as_str) {
                out.insert(name.to_string());
            }
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn parse_extra(raw: &str) -> std::result::Result<Map<String, Value>, String> {
    if raw.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected an object, got {}", type_name(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{create_quest_pair, QuestPairOptions};
    use crate::snapshot::Snapshot;
    use portico_core::Vec3;
    use portico_item::builders::{Addressable, Cube, Trigger};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builtin()
    }

    fn validate_snapshot(snapshot: &Snapshot) -> ValidationReport {
        let value = serde_json::to_value(snapshot).unwrap();
        validate_value(value, &registry())
    }

    #[test]
    fn test_starter_snapshot_is_valid() {
        let report = validate_snapshot(&Snapshot::starter());
        assert!(report.is_valid(), "{:#?}", report.violations);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_built_room_is_valid() {
        let mut snapshot = Snapshot::starter();
        let (item, extra) = Cube::new(Vec3::new(0.0, 0.5, 0.0)).color("FF0000").build();
        snapshot.add_item(item, &extra);
        let (item, extra) = Trigger::new(Vec3::new(3.0, 1.0, 0.0), Vec3::splat(2.0)).build();
        snapshot.add_item(item, &extra);
        let (item, extra) = Addressable::new(Vec3::new(5.0, 0.5, 0.0), "Fire2").build();
        snapshot.add_item(item, &extra);

        let pair = create_quest_pair(0, "gate", "uid-1", QuestPairOptions::default());
        snapshot.quests.extend(pair.entries);

        let report = validate_snapshot(&snapshot);
        assert!(report.is_valid(), "{:#?}", report.violations);
    }

    #[test]
    fn test_missing_top_level_keys() {
        let report = validate_value(json!({}), &registry());
        assert_eq!(report.error_count(), 4);
    }

    #[test]
    fn test_non_numeric_item_key() {
        let report = validate_value(
            json!({
                "roomItems": {"abc": {"prefabName": "GLB"}},
                "settings": crate::settings::RoomSettings::default(),
                "roomTasks": {"Tasks": []},
                "quests": {}
            }),
            &registry(),
        );
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("must be a numeric string")));
    }

    #[test]
    fn test_unknown_prefab() {
        let report = validate_value(
            json!({
                "roomItems": {"0": {
                    "prefabName": "FlyingCarpet",
                    "pos": {"x": 0, "y": 0, "z": 0},
                    "rot": {"x": 0, "y": 0, "z": 0, "w": 1},
                    "scale": {"x": 1, "y": 1, "z": 1},
                    "extraData": "{}"
                }},
                "settings": crate::settings::RoomSettings::default(),
                "roomTasks": {"Tasks": []},
                "quests": {}
            }),
            &registry(),
        );
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("invalid prefabName 'FlyingCarpet'")));
    }

    #[test]
    fn test_cube_color_key_mistake() {
        let mut snapshot = Snapshot::new();
        let (mut item, _) = Cube::new(Vec3::ZERO).build();
        item.extra_data = Some(r#"{"color":"FF0000","Tasks":[]}"#.to_string());
        snapshot.room_items.insert(ItemId::from_raw(0), item);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("should be \"col\"")));
    }

    #[test]
    fn test_unknown_addressable_effect_is_warning() {
        let mut snapshot = Snapshot::new();
        let (item, extra) = Addressable::new(Vec3::ZERO, "BrandNewEffect").build();
        snapshot.add_item(item, &extra);

        let report = validate_snapshot(&snapshot);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_dangling_parent() {
        let mut snapshot = Snapshot::new();
        let (mut item, extra) = Cube::new(Vec3::ZERO).build();
        item.parent_item_id = 42;
        item.set_extra(&extra);
        snapshot.room_items.insert(ItemId::from_raw(0), item);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("references non-existent item")));
    }

    #[test]
    fn test_extra_data_invalid_json() {
        let mut snapshot = Snapshot::new();
        let (mut item, _) = Cube::new(Vec3::ZERO).build();
        item.extra_data = Some("{broken".to_string());
        snapshot.room_items.insert(ItemId::from_raw(0), item);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("extraData is not valid JSON")));
    }

    #[test]
    fn test_quest_pairing_violations() {
        let mut snapshot = Snapshot::new();
        let pair = create_quest_pair(0, "solo", "uid-1", QuestPairOptions::default());
        // Keep only the inProgress entry; pairing is now broken
        let in_progress = pair.entries.get(&pair.quest_id).unwrap().clone();
        snapshot.quests.insert(pair.quest_id.clone(), in_progress);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("must have exactly 2")));
    }

    #[test]
    fn test_task_references_unknown_quest() {
        let mut snapshot = Snapshot::new();
        let pair = create_quest_pair(0, "gate", "uid-1", QuestPairOptions::default());
        snapshot.quests.extend(pair.entries);

        let (item, mut extra) = Cube::new(Vec3::ZERO).build();
        extra.push_task(portico_logic::quest_trigger(
            "mlhzzzzzzzzzzzz",
            "0_gate",
            181,
            serde_json::json!({"$type": "OnClickEvent"}),
        ));
        snapshot.add_item(item, &extra);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("not found in quests")));
    }

    #[test]
    fn test_undeclared_variable_reference() {
        let mut snapshot = Snapshot::new();
        let mut inner = snapshot.settings.parse_extra_data().unwrap();
        inner.add_variable("coins");
        snapshot.settings.set_extra_data(&inner);

        let (item, mut extra) = Cube::new(Vec3::ZERO).build();
        extra.push_task(portico_logic::basic_interaction(
            serde_json::json!({"$type": "OnClickEvent"}),
            serde_json::json!({"$type": "DisplayValueEvent", "label": "gems", "color": "FFFFFF"}),
        ));
        snapshot.add_item(item, &extra);

        let report = validate_snapshot(&snapshot);
        assert!(report
            .violations
            .iter()
            .any(|v| v.message.contains("variable \"gems\" not defined")));
    }

    #[test]
    fn test_separated_format_normalized_before_validation() {
        let data = json!({
            "roomItems": {"0": {
                "prefabName": "WorldText",
                "pos": {"x": 0, "y": 1, "z": 0},
                "rot": {"x": 0, "y": 0, "z": 0, "w": 1},
                "scale": {"x": 1, "y": 1, "z": 1}
            }},
            "settings": crate::settings::RoomSettings::default(),
            "roomTasks": {"Tasks": []},
            "quests": {},
            "logic": {"0": {"text": "hello", "lookAtCamera": true, "Tasks": []}}
        });

        let report = validate_value(data, &registry());
        assert!(report.is_valid(), "{:#?}", report.violations);
    }
}
