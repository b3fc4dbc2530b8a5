//! Query result formatting

use portico_core::ItemId;
use portico_item::Item;
use serde_json::{Map, Value};

/// Query result types
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// Matched items in numeric id order
    Items(Vec<(ItemId, Item)>),
    /// Distinct prefab names
    Prefabs(Vec<String>),
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        match self {
            QueryResult::Items(items) => items.is_empty(),
            QueryResult::Prefabs(prefabs) => prefabs.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QueryResult::Items(items) => items.len(),
            QueryResult::Prefabs(prefabs) => prefabs.len(),
        }
    }
}

/// Format a result as pretty JSON. Items render as an object keyed by
/// item id, the same shape as a snapshot's `roomItems`.
pub fn format_json(result: &QueryResult) -> String {
    match result {
        QueryResult::Items(items) => {
            let mut map = Map::new();
            for (id, item) in items {
                map.insert(
                    id.to_string(),
                    serde_json::to_value(item).unwrap_or(Value::Null),
                );
            }
            serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_else(|_| "{}".to_string())
        }
        QueryResult::Prefabs(prefabs) => {
            serde_json::to_string_pretty(prefabs).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::{Quat, Vec3};

    #[test]
    fn test_format_items_keyed_by_id() {
        let item = Item::base("GLB", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        let result = QueryResult::Items(vec![(ItemId::from_raw(47), item)]);

        let json = format_json(&result);
        assert!(json.contains("\"47\""));
        assert!(json.contains("\"prefabName\": \"GLB\""));
    }

    #[test]
    fn test_format_prefabs() {
        let result = QueryResult::Prefabs(vec!["GLB".to_string(), "Trigger".to_string()]);
        let json = format_json(&result);
        assert!(json.contains("GLB"));
        assert!(json.contains("Trigger"));
    }
}
