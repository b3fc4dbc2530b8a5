//! Extra-data payloads

use portico_core::{PorticoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An item's behavioral payload: an open JSON object carried on the wire
/// as a compact JSON string inside `extraData` (or a `logic` map entry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraData(Map<String, Value>);

impl ExtraData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload pre-seeded with empty `Tasks`/`ViewNodes` arrays, the way
    /// the editor writes most prefabs.
    pub fn with_wiring() -> Self {
        let mut map = Map::new();
        map.insert("Tasks".into(), Value::Array(vec![]));
        map.insert("ViewNodes".into(), Value::Array(vec![]));
        Self(map)
    }

    /// Parse an extraData string. Empty input parses to an empty payload;
    /// non-object JSON is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_json::from_str(raw)?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PorticoError::ParseError(format!(
                "extraData must be a JSON object, got {other}"
            ))),
        }
    }

    /// Serialize without whitespace, matching the platform's encoding.
    pub fn to_compact_string(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a task subscription to the `Tasks` array, creating it if
    /// the payload has none.
    pub fn push_task(&mut self, task: Value) {
        match self.0.get_mut("Tasks") {
            Some(Value::Array(tasks)) => tasks.push(task),
            _ => {
                self.0.insert("Tasks".into(), Value::Array(vec![task]));
            }
        }
    }

    pub fn tasks(&self) -> &[Value] {
        match self.0.get("Tasks") {
            Some(Value::Array(tasks)) => tasks,
            _ => &[],
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtraData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_string_parses_empty() {
        let extra = ExtraData::parse("").unwrap();
        assert!(extra.is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(ExtraData::parse("[1,2,3]").is_err());
        assert!(ExtraData::parse("not json").is_err());
    }

    #[test]
    fn test_compact_encoding() {
        let mut extra = ExtraData::new();
        extra.insert("col", json!("FF0000"));
        extra.insert("e", json!(1.5));
        let s = extra.to_compact_string();
        assert!(!s.contains(' '));
        assert!(s.contains("\"col\":\"FF0000\""));
    }

    #[test]
    fn test_push_task_creates_array() {
        let mut extra = ExtraData::new();
        extra.push_task(json!({"$type": "TaskTriggerSubscription"}));
        assert_eq!(extra.tasks().len(), 1);

        let mut wired = ExtraData::with_wiring();
        wired.push_task(json!({"$type": "TaskEffectorSubscription"}));
        assert_eq!(wired.tasks().len(), 1);
    }
}
