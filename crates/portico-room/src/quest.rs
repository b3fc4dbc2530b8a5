//! Quest entries and pair generation.
//!
//! A quest is stored as TWO entries in the flat quests map: an
//! `inProgress` entry and a `completed` entry sharing one `EntryId` but
//! keyed by different quest ids. Triggers/effects reference the
//! inProgress id.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A prerequisite on another quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub delete: bool,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Requirement {
    /// Require another quest to be completed `amount` times
    pub fn quest(id: &str, amount: i64) -> Self {
        Self {
            delete: false,
            amount,
            kind: "quest".to_string(),
            id: id.to_string(),
        }
    }
}

/// One quest entry in the flat quests map.
///
/// Unknown fields (editor-internal extras like `GetStatus`) ride along in
/// `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quest {
    pub entry_id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub display_group: String,
    pub enabled: bool,
    #[serde(default)]
    pub repeatable_limit: i64,
    #[serde(default)]
    pub finish_time: i64,
    #[serde(default)]
    pub auto_start: bool,
    #[serde(default)]
    pub triggered_by_inventory: bool,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    pub creator: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub tracked: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub extra_text: String,
    #[serde(rename = "id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_msg: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Quest id format: `m` + 10-16 lowercase alphanumerics. Generated ids
/// use the `mlh` prefix; editor-generated ones vary (`mk`, `ml`, ...).
pub fn is_valid_quest_id(id: &str) -> bool {
    match id.strip_prefix('m') {
        Some(suffix) => {
            (10..=16).contains(&suffix.len())
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        None => false,
    }
}

/// Quest name format: `N_suffix` (e.g. `0_activate`)
pub fn is_valid_quest_name(name: &str) -> bool {
    match name.split_once('_') {
        Some((prefix, suffix)) => {
            !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) && !suffix.is_empty()
        }
        None => false,
    }
}

/// Generate a quest id: `mlh` + 11-14 random lowercase alphanumerics
pub fn generate_quest_id() -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(11..=14);
    let suffix: String = (0..len)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect();
    format!("mlh{suffix}")
}

/// Options for [`create_quest_pair`]
#[derive(Debug, Clone, Default)]
pub struct QuestPairOptions {
    /// Sync quest state across all players
    pub multiplayer: bool,
    /// Activate when a player enters the room
    pub auto_start: bool,
    /// Show in the player's quest log
    pub visible: bool,
    /// Quest log group label
    pub display_group: String,
    pub requirements: Vec<Requirement>,
    /// Max completions; 0 = unlimited
    pub repeatable_limit: i64,
    /// Seconds before auto-expiry; 0 = no limit
    pub finish_time: i64,
    /// Shown on completion (completed entry only)
    pub success_msg: String,
}

/// A generated quest pair, ready to merge into a snapshot's quests map
#[derive(Debug, Clone)]
pub struct QuestPair {
    pub entries: BTreeMap<String, Quest>,
    /// The inProgress entry's id, referenced by triggers/effects
    pub quest_id: String,
    pub quest_name: String,
}

/// Create an inProgress/completed quest pair.
///
/// `creator` is the room owner's platform user id and must be set for
/// the engine to accept the quest.
pub fn create_quest_pair(
    number: u32,
    name_suffix: &str,
    creator: &str,
    options: QuestPairOptions,
) -> QuestPair {
    let entry_id = Uuid::new_v4().to_string();
    let id_progress = generate_quest_id();
    let id_completed = generate_quest_id();
    let quest_name = format!("{number}_{name_suffix}");

    let base = Quest {
        entry_id,
        name: quest_name.clone(),
        description: "created in unity".to_string(),
        status: String::new(),
        group: if options.multiplayer {
            "multiplayer".to_string()
        } else {
            String::new()
        },
        display_group: options.display_group.clone(),
        enabled: true,
        repeatable_limit: options.repeatable_limit,
        finish_time: options.finish_time,
        auto_start: options.auto_start,
        triggered_by_inventory: false,
        requirements: options.requirements.clone(),
        creator: creator.to_string(),
        template_name: String::new(),
        tracked: true,
        visible: options.visible,
        extra_text: String::new(),
        id: String::new(),
        rewards: None,
        success_msg: None,
        extra: Map::new(),
    };

    let in_progress = Quest {
        status: "inProgress".to_string(),
        id: id_progress.clone(),
        ..base.clone()
    };
    let completed = Quest {
        status: "completed".to_string(),
        id: id_completed.clone(),
        rewards: Some(vec![]),
        success_msg: Some(options.success_msg),
        ..base
    };

    let mut entries = BTreeMap::new();
    entries.insert(id_progress.clone(), in_progress);
    entries.insert(id_completed, completed);

    QuestPair {
        entries,
        quest_id: id_progress,
        quest_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_id_format() {
        assert!(is_valid_quest_id("mlh9kkyxvll8ql"));
        assert!(is_valid_quest_id("mk1234567890"));
        assert!(!is_valid_quest_id("xlh9kkyxvll8ql"));
        assert!(!is_valid_quest_id("mlhABC"));
        assert!(!is_valid_quest_id("m"));
        assert!(!is_valid_quest_id("mshort"));
    }

    #[test]
    fn test_quest_name_format() {
        assert!(is_valid_quest_name("0_activate"));
        assert!(is_valid_quest_name("12_collect_coins"));
        assert!(!is_valid_quest_name("activate"));
        assert!(!is_valid_quest_name("_activate"));
        assert!(!is_valid_quest_name("a_activate"));
        assert!(!is_valid_quest_name("0_"));
    }

    #[test]
    fn test_generated_ids_are_valid() {
        for _ in 0..32 {
            let id = generate_quest_id();
            assert!(id.starts_with("mlh"));
            assert!(is_valid_quest_id(&id), "{id}");
        }
    }

    #[test]
    fn test_pair_shape() {
        let pair = create_quest_pair(0, "gate_puzzle", "uid-123", QuestPairOptions::default());
        assert_eq!(pair.entries.len(), 2);
        assert_eq!(pair.quest_name, "0_gate_puzzle");

        let in_progress = pair.entries.get(&pair.quest_id).unwrap();
        assert_eq!(in_progress.status, "inProgress");
        assert!(in_progress.rewards.is_none());

        let completed = pair
            .entries
            .values()
            .find(|q| q.status == "completed")
            .unwrap();
        assert_eq!(completed.entry_id, in_progress.entry_id);
        assert_ne!(completed.id, in_progress.id);
        assert_eq!(completed.rewards, Some(vec![]));
        assert_eq!(completed.success_msg.as_deref(), Some(""));
        assert_eq!(completed.description, "created in unity");
    }

    #[test]
    fn test_multiplayer_group() {
        let pair = create_quest_pair(
            1,
            "shared",
            "uid-123",
            QuestPairOptions {
                multiplayer: true,
                ..Default::default()
            },
        );
        for quest in pair.entries.values() {
            assert_eq!(quest.group, "multiplayer");
        }
    }

    #[test]
    fn test_wire_field_names() {
        let pair = create_quest_pair(0, "gate", "uid-123", QuestPairOptions::default());
        let quest = pair.entries.get(&pair.quest_id).unwrap();
        let json = serde_json::to_value(quest).unwrap();

        for key in [
            "EntryId",
            "Name",
            "Description",
            "Status",
            "Group",
            "DisplayGroup",
            "Enabled",
            "RepeatableLimit",
            "FinishTime",
            "AutoStart",
            "TriggeredByInventory",
            "Requirements",
            "Creator",
            "TemplateName",
            "Tracked",
            "Visible",
            "ExtraText",
            "id",
        ] {
            assert!(json.get(key).is_some(), "missing wire key {key}");
        }
        // inProgress entries carry no Rewards/SuccessMsg
        assert!(json.get("Rewards").is_none());
        assert!(json.get("SuccessMsg").is_none());
    }

    #[test]
    fn test_requirement_roundtrip() {
        let req = Requirement::quest("mlhabc123def45", 1);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "quest");
        assert_eq!(json["amount"], 1);
        assert_eq!(json["delete"], false);
    }
}
