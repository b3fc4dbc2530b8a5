//! Query execution against a snapshot

use crate::output::QueryResult;
use crate::parser::{Condition, Operator, Query, QueryValue};
use portico_core::{ItemId, Vec3};
use portico_item::{ExtraData, Item};
use portico_room::Snapshot;
use serde_json::Value;

/// Programmatic filters composed (AND) with the query language
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Items within `radius` of `center` (3D Euclidean distance)
    pub near: Option<(Vec3, f32)>,
    /// Items with at least one task subscription
    pub has_tasks: bool,
    /// Items with at least one effector wired up
    pub has_effects: bool,
    /// Children of this item id
    pub parent: Option<u64>,
    /// Case-insensitive text search across string fields and payload
    pub search: Option<String>,
    /// Items whose task wiring mentions this quest name
    pub quest: Option<String>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.near.is_none()
            && !self.has_tasks
            && !self.has_effects
            && self.parent.is_none()
            && self.search.is_none()
            && self.quest.is_none()
    }
}

/// Execute a query plus programmatic filters against a snapshot.
/// Item results keep numeric id order.
pub fn execute_query(snapshot: &Snapshot, query: &Query, filter: &ItemFilter) -> QueryResult {
    match query.resource.as_str() {
        "items" => {
            let mut matched = Vec::new();
            for (id, item) in &snapshot.room_items {
                let extra = item.parse_extra().unwrap_or_default();
                let passes_conditions = query
                    .conditions
                    .iter()
                    .all(|cond| matches_condition(*id, item, &extra, cond));
                if passes_conditions && matches_filter(item, &extra, filter) {
                    matched.push((*id, item.clone()));
                }
            }
            QueryResult::Items(matched)
        }
        "prefabs" => {
            // Distinct prefab names across the room
            let mut prefabs: Vec<String> = snapshot
                .room_items
                .values()
                .map(|item| item.prefab_name.clone())
                .collect();
            prefabs.sort();
            prefabs.dedup();
            QueryResult::Prefabs(prefabs)
        }
        _ => QueryResult::Items(vec![]),
    }
}

fn matches_condition(id: ItemId, item: &Item, extra: &ExtraData, condition: &Condition) -> bool {
    match get_field_value(id, item, extra, &condition.field) {
        None => false,
        Some(value) => compare_values(&value, condition.operator, &condition.value),
    }
}

fn get_field_value(id: ItemId, item: &Item, extra: &ExtraData, field: &str) -> Option<FieldValue> {
    // Item-level fields
    match field {
        "id" => return Some(FieldValue::Number(id.raw() as f64)),
        "prefab" => return Some(FieldValue::String(item.prefab_name.clone())),
        "parent" => return Some(FieldValue::Number(item.parent_item_id as f64)),
        "content" => return Some(FieldValue::String(item.content_string.clone())),
        "locked" => return Some(FieldValue::Bool(item.locked)),
        "placed" => return Some(FieldValue::Bool(item.placed)),
        "pos.x" => return Some(FieldValue::Number(item.pos.x as f64)),
        "pos.y" => return Some(FieldValue::Number(item.pos.y as f64)),
        "pos.z" => return Some(FieldValue::Number(item.pos.z as f64)),
        "scale.x" => return Some(FieldValue::Number(item.scale.x as f64)),
        "scale.y" => return Some(FieldValue::Number(item.scale.y as f64)),
        "scale.z" => return Some(FieldValue::Number(item.scale.z as f64)),
        _ => {}
    }

    // Payload fields: "extra.col", "extra.destructionEffect.radius", ...
    if let Some(path) = field.strip_prefix("extra.") {
        let mut current: Option<&Value> = None;
        for (i, part) in path.split('.').enumerate() {
            current = match (i, &current) {
                (0, _) => extra.get(part),
                (_, Some(value)) => value.get(part),
                (_, None) => return None,
            };
        }
        return current.and_then(json_to_field_value);
    }

    // Bare payload key: existence check
    if extra.contains_key(field) {
        return Some(FieldValue::Bool(true));
    }

    None
}

fn json_to_field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::String(s) => Some(FieldValue::String(s.clone())),
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        _ => None,
    }
}

#[derive(Debug, Clone)]
enum FieldValue {
    String(String),
    Number(f64),
    Bool(bool),
}

fn compare_values(field: &FieldValue, op: Operator, query: &QueryValue) -> bool {
    match (field, query) {
        (FieldValue::String(f), QueryValue::String(q)) => match op {
            Operator::Equal => f == q,
            Operator::NotEqual => f != q,
            Operator::Contains => f.contains(q.as_str()),
            _ => false,
        },
        (FieldValue::Number(f), QueryValue::Number(q)) => match op {
            Operator::Equal => (f - q).abs() < f64::EPSILON,
            Operator::NotEqual => (f - q).abs() >= f64::EPSILON,
            Operator::GreaterThan => f > q,
            Operator::LessThan => f < q,
            Operator::GreaterThanOrEqual => f >= q,
            Operator::LessThanOrEqual => f <= q,
            Operator::Contains => false,
        },
        (FieldValue::Bool(f), QueryValue::Boolean(q)) => match op {
            Operator::Equal => f == q,
            Operator::NotEqual => f != q,
            _ => false,
        },
        // Type mismatch
        _ => false,
    }
}

fn matches_filter(item: &Item, extra: &ExtraData, filter: &ItemFilter) -> bool {
    if let Some((center, radius)) = filter.near {
        if item.pos.distance(&center) > radius {
            return false;
        }
    }

    if filter.has_tasks && extra.tasks().is_empty() {
        return false;
    }

    if filter.has_effects {
        let any_effect = extra.tasks().iter().any(|task| {
            task.get("Effector").is_some()
                || task
                    .get("DirectEffector")
                    .and_then(|d| d.get("Effector"))
                    .is_some()
        });
        if !any_effect {
            return false;
        }
    }

    if let Some(parent) = filter.parent {
        if item.parent_item_id != parent || item.parent_item_id == 0 {
            return false;
        }
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let item_value = serde_json::to_value(item).unwrap_or(Value::Null);
        let in_item = value_contains_text(&item_value, &needle);
        let in_extra = extra
            .as_map()
            .values()
            .any(|v| value_contains_text(v, &needle));
        if !in_item && !in_extra {
            return false;
        }
    }

    if let Some(quest) = &filter.quest {
        let needle = quest.to_lowercase();
        let mentioned = extra
            .tasks()
            .iter()
            .any(|task| value_contains_text(task, &needle));
        if !mentioned {
            return false;
        }
    }

    true
}

/// Case-insensitive text search through every string in a JSON tree
fn value_contains_text(value: &Value, needle_lower: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle_lower),
        Value::Array(arr) => arr.iter().any(|v| value_contains_text(v, needle_lower)),
        Value::Object(map) => map.values().any(|v| value_contains_text(v, needle_lower)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use portico_item::builders::{Cube, Glb, Trigger};
    use portico_logic::{basic_interaction, quest_trigger};
    use serde_json::json;

    fn test_room() -> Snapshot {
        let mut snapshot = Snapshot::new();

        let (item, extra) = Cube::new(Vec3::new(0.0, 0.5, 0.0)).color("FF0000").title("floor").build();
        snapshot.add_item(item, &extra);

        let (item, mut extra) = Trigger::new(Vec3::new(10.0, 1.0, 0.0), Vec3::splat(2.0)).build();
        extra.push_task(quest_trigger(
            "mlhabc123def45",
            "0_gate",
            181,
            json!({"$type": "OnEnterEvent"}),
        ));
        snapshot.add_item(item, &extra);

        let (mut item, mut extra) = Glb::new(Vec3::new(10.0, 0.0, 2.0), "https://cdn.example.com/door.glb").build();
        item.parent_item_id = 1;
        extra.push_task(basic_interaction(
            json!({"$type": "OnClickEvent"}),
            json!({"$type": "HideObjectEvent"}),
        ));
        snapshot.add_item(item, &extra);

        snapshot
    }

    #[test]
    fn test_query_all_items() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_query_by_prefab() {
        let snapshot = test_room();
        let query = parse_query("items where prefab == 'Trigger'").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());

        if let QueryResult::Items(items) = result {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].0.raw(), 1);
        } else {
            panic!("expected Items result");
        }
    }

    #[test]
    fn test_query_extra_field() {
        let snapshot = test_room();
        let query = parse_query("items where extra.col == 'FF0000'").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_query_numeric_comparison() {
        let snapshot = test_room();
        let query = parse_query("items where pos.x >= 10").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_query_and_chain() {
        let snapshot = test_room();
        let query = parse_query("items where pos.x >= 10 and prefab == 'GLB'").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_spatial_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            near: Some((Vec3::new(10.0, 0.0, 0.0), 3.0)),
            ..Default::default()
        };
        let result = execute_query(&snapshot, &query, &filter);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_has_tasks_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            has_tasks: true,
            ..Default::default()
        };
        let result = execute_query(&snapshot, &query, &filter);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_has_effects_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            has_effects: true,
            ..Default::default()
        };
        // Only the GLB has a DirectEffector; the trigger's task is a bare
        // quest trigger
        let result = execute_query(&snapshot, &query, &filter);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_parent_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            parent: Some(1),
            ..Default::default()
        };
        let result = execute_query(&snapshot, &query, &filter);
        if let QueryResult::Items(items) = result {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].1.prefab_name, "GLB");
        } else {
            panic!("expected Items result");
        }
    }

    #[test]
    fn test_search_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            search: Some("DOOR".to_string()),
            ..Default::default()
        };
        let result = execute_query(&snapshot, &query, &filter);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_quest_filter() {
        let snapshot = test_room();
        let query = parse_query("items").unwrap();
        let filter = ItemFilter {
            quest: Some("0_gate".to_string()),
            ..Default::default()
        };
        let result = execute_query(&snapshot, &query, &filter);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_prefabs_resource() {
        let snapshot = test_room();
        let query = parse_query("prefabs").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        if let QueryResult::Prefabs(prefabs) = result {
            assert_eq!(prefabs, vec!["GLB", "ResizableCube", "Trigger"]);
        } else {
            panic!("expected Prefabs result");
        }
    }

    #[test]
    fn test_bare_key_existence() {
        let snapshot = test_room();
        let query = parse_query("items where title == true").unwrap();
        let result = execute_query(&snapshot, &query, &ItemFilter::default());
        assert_eq!(result.len(), 1);
    }
}
