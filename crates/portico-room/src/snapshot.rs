//! The snapshot document.
//!
//! Two formats exist on the wire:
//! - embedded: each item carries its payload as an `extraData` string
//! - separated: payloads live in a top-level `logic` map keyed by item id
//!
//! Tools consume the embedded format; [`Snapshot::normalize`] converts on
//! load, [`Snapshot::split_logic`] converts back.

use crate::quest::Quest;
use crate::settings::RoomSettings;
use portico_core::{ItemId, PorticoError, Result, Vec3};
use portico_item::{builders::Spawn, ExtraData, Item};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level `roomTasks` object; always `{"Tasks": []}` in practice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomTasks {
    #[serde(rename = "Tasks")]
    pub tasks: Vec<Value>,
}

/// A full room snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "roomItems")]
    pub room_items: BTreeMap<ItemId, Item>,
    pub settings: RoomSettings,
    #[serde(rename = "roomTasks", default)]
    pub room_tasks: RoomTasks,
    #[serde(default)]
    pub quests: BTreeMap<String, Quest>,
    /// Separated-format payload map; `None` once normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<BTreeMap<ItemId, Value>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            room_items: BTreeMap::new(),
            settings: RoomSettings::default(),
            room_tasks: RoomTasks::default(),
            quests: BTreeMap::new(),
            logic: None,
        }
    }
}

impl Snapshot {
    /// An empty snapshot with platform-default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// A starter room: default settings plus one default spawn point
    pub fn starter() -> Self {
        let mut snapshot = Self::new();
        let (mut item, extra) = Spawn::new(Vec3::new(0.0, 0.2, 0.0)).build();
        item.set_extra(&extra);
        snapshot.room_items.insert(ItemId::from_raw(0), item);
        snapshot
    }

    /// Next free item id (max + 1)
    pub fn next_item_id(&self) -> ItemId {
        ItemId::from_raw(
            self.room_items
                .keys()
                .next_back()
                .map(|id| id.raw() + 1)
                .unwrap_or(0),
        )
    }

    /// Insert an item/payload pair under the next free id
    pub fn add_item(&mut self, mut item: Item, extra: &ExtraData) -> ItemId {
        let id = self.next_item_id();
        item.set_extra(extra);
        self.room_items.insert(id, item);
        id
    }

    /// Merge a separated `logic` map into the items as embedded extraData.
    ///
    /// Payload entries for ids with no matching item are dropped; upstream
    /// data is known to contain orphaned entries.
    pub fn normalize(&mut self) {
        let Some(logic) = self.logic.take() else {
            return;
        };
        for (id, entry) in logic {
            if let Some(item) = self.room_items.get_mut(&id) {
                item.extra_data = Some(match entry {
                    Value::String(s) => s,
                    other => other.to_string(),
                });
            }
        }
    }

    /// Extract embedded extraData into a separated `logic` map.
    /// Fails if any item's payload is not valid JSON.
    pub fn split_logic(&mut self) -> Result<()> {
        let mut logic = self.logic.take().unwrap_or_default();
        for (id, item) in &mut self.room_items {
            if let Some(raw) = item.extra_data.take() {
                if raw.is_empty() {
                    continue;
                }
                let parsed: Value = serde_json::from_str(&raw).map_err(|e| {
                    PorticoError::SnapshotError(format!("item {id}: extraData is not valid JSON: {e}"))
                })?;
                logic.insert(*id, parsed);
            }
        }
        self.logic = Some(logic);
        Ok(())
    }

    /// Encode every separated logic entry as a compact JSON string, the
    /// form the platform backend expects on upload.
    pub fn serialize_logic(&mut self) {
        if let Some(logic) = &mut self.logic {
            for entry in logic.values_mut() {
                if !entry.is_string() {
                    *entry = Value::String(entry.to_string());
                }
            }
        }
    }

    /// Parse every item's payload, keyed by item id
    pub fn parsed_payloads(&self) -> BTreeMap<ItemId, ExtraData> {
        self.room_items
            .iter()
            .filter_map(|(id, item)| item.parse_extra().ok().map(|extra| (*id, extra)))
            .collect()
    }
}

/// Value-level normalize for raw documents (the validator works on raw
/// JSON so it can report shape problems instead of failing to parse).
pub fn normalize_value(data: &mut Value) {
    let Some(obj) = data.as_object_mut() else {
        return;
    };
    let Some(logic) = obj.remove("logic") else {
        return;
    };
    let Some(logic) = logic.as_object() else {
        return;
    };
    let Some(items) = obj.get_mut("roomItems").and_then(Value::as_object_mut) else {
        return;
    };

    for (id, entry) in logic {
        if let Some(item) = items.get_mut(id).and_then(Value::as_object_mut) {
            let encoded = match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            item.insert("extraData".to_string(), Value::String(encoded));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_item::builders::Cube;
    use serde_json::json;

    #[test]
    fn test_starter_has_default_spawn() {
        let snapshot = Snapshot::starter();
        assert_eq!(snapshot.room_items.len(), 1);
        let spawn = snapshot.room_items.values().next().unwrap();
        assert_eq!(spawn.prefab_name, "SpawnPoint");

        let extra = spawn.parse_extra().unwrap();
        assert_eq!(extra.get("n").unwrap(), "");
    }

    #[test]
    fn test_add_item_assigns_sequential_ids() {
        let mut snapshot = Snapshot::new();
        let (a, ea) = Cube::new(Vec3::ZERO).build();
        let (b, eb) = Cube::new(Vec3::ONE).build();

        let id_a = snapshot.add_item(a, &ea);
        let id_b = snapshot.add_item(b, &eb);
        assert_eq!(id_a.raw(), 0);
        assert_eq!(id_b.raw(), 1);
        assert_eq!(snapshot.next_item_id().raw(), 2);
    }

    #[test]
    fn test_normalize_merges_logic() {
        let json = json!({
            "roomItems": {
                "0": {
                    "prefabName": "ResizableCube",
                    "pos": {"x": 0.0, "y": 0.5, "z": 0.0},
                    "rot": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0},
                    "scale": {"x": 1.0, "y": 1.0, "z": 1.0},
                    "placed": true,
                    "locked": false
                }
            },
            "settings": RoomSettings::default(),
            "roomTasks": {"Tasks": []},
            "quests": {},
            "logic": {
                "0": {"col": "FF0000", "Tasks": []},
                "99": {"col": "orphaned"}
            }
        });

        let mut snapshot: Snapshot = serde_json::from_value(json).unwrap();
        snapshot.normalize();

        assert!(snapshot.logic.is_none());
        let item = snapshot.room_items.get(&ItemId::from_raw(0)).unwrap();
        let extra = item.parse_extra().unwrap();
        assert_eq!(extra.get("col").unwrap(), "FF0000");
        // Orphaned entry 99 dropped
        assert_eq!(snapshot.room_items.len(), 1);
    }

    #[test]
    fn test_split_then_normalize_roundtrip() {
        let mut snapshot = Snapshot::new();
        let (item, extra) = Cube::new(Vec3::ZERO).color("00FF00").build();
        snapshot.add_item(item, &extra);

        snapshot.split_logic().unwrap();
        let logic = snapshot.logic.as_ref().unwrap();
        assert_eq!(logic[&ItemId::from_raw(0)]["col"], "00FF00");
        assert!(snapshot.room_items[&ItemId::from_raw(0)].extra_data.is_none());

        snapshot.normalize();
        let extra = snapshot.room_items[&ItemId::from_raw(0)].parse_extra().unwrap();
        assert_eq!(extra.get("col").unwrap(), "00FF00");
    }

    #[test]
    fn test_serialize_logic_encodes_strings() {
        let mut snapshot = Snapshot::new();
        let (item, extra) = Cube::new(Vec3::ZERO).build();
        snapshot.add_item(item, &extra);
        snapshot.split_logic().unwrap();
        snapshot.serialize_logic();

        let entry = &snapshot.logic.as_ref().unwrap()[&ItemId::from_raw(0)];
        let raw = entry.as_str().unwrap();
        assert!(raw.contains("\"col\""));
        assert!(!raw.contains(' '));
    }

    #[test]
    fn test_normalize_value() {
        let mut data = json!({
            "roomItems": {"3": {"prefabName": "GLB"}},
            "logic": {"3": {"Tasks": []}}
        });
        normalize_value(&mut data);
        assert!(data.get("logic").is_none());
        assert_eq!(data["roomItems"]["3"]["extraData"], "{\"Tasks\":[]}");
    }
}
