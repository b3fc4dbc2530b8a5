//! Task subscription wrappers.
//!
//! Assemble trigger/effector payloads into the subscription dicts the
//! engine reads from an item's Tasks array.

use serde_json::{json, Map, Value};
use uuid::Uuid;

/// A direct trigger → effect wiring, no quest involved.
///
/// The simplest pattern: when the trigger fires, the effect runs.
pub fn basic_interaction(trigger: Value, effector: Value) -> Value {
    json!({
        "$type": "TaskTriggerSubscription",
        "Trigger": trigger,
        "DirectEffector": {
            "Effector": effector,
            "Id": Uuid::new_v4().to_string(),
            "TargetState": 2,
            "Name": ""
        },
        "Id": Uuid::new_v4().to_string(),
        "TargetState": 2,
        "Name": ""
    })
}

/// A quest-linked effect: fires when the quest reaches `target_state`
/// (0 = not active, 1 = active, 2 = completed). State 0 omits the
/// TargetState key, matching editor output.
pub fn quest_effector(quest_id: &str, quest_name: &str, target_state: i64, effector: Value) -> Value {
    let mut task = match json!({
        "$type": "TaskEffectorSubscription",
        "Effector": effector,
        "Id": Uuid::new_v4().to_string(),
        "Name": quest_name,
        "TaskTriggerId": quest_id
    }) {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    if target_state > 0 {
        task.insert("TargetState".into(), json!(target_state));
    }
    Value::Object(task)
}

/// A quest-linked trigger: advances the quest through the encoded
/// `target_state` transition (111, 121, 181, ...) when the trigger fires.
pub fn quest_trigger(quest_id: &str, quest_name: &str, target_state: i64, trigger: Value) -> Value {
    json!({
        "$type": "TaskTriggerSubscription",
        "Trigger": trigger,
        "Id": Uuid::new_v4().to_string(),
        "TargetState": target_state,
        "Name": quest_name,
        "TaskTriggerId": quest_id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{effectors, triggers};

    #[test]
    fn test_basic_interaction_shape() {
        let task = basic_interaction(triggers::on_click(), effectors::hide());

        assert_eq!(task["$type"], "TaskTriggerSubscription");
        assert_eq!(task["Trigger"]["$type"], "OnClickEvent");
        assert_eq!(task["DirectEffector"]["Effector"]["$type"], "HideObjectEvent");
        assert_eq!(task["TargetState"], 2);
        assert!(task["Id"].as_str().unwrap().len() == 36);
    }

    #[test]
    fn test_quest_effector_omits_state_zero() {
        let on_inactive = quest_effector("mlhabc123def45", "0_gate", 0, effectors::show());
        assert!(on_inactive.get("TargetState").is_none());

        let on_complete = quest_effector("mlhabc123def45", "0_gate", 2, effectors::hide());
        assert_eq!(on_complete["TargetState"], 2);
        assert_eq!(on_complete["TaskTriggerId"], "mlhabc123def45");
    }

    #[test]
    fn test_quest_trigger_shape() {
        let task = quest_trigger("mlhabc123def45", "0_gate", 181, triggers::on_enter());
        assert_eq!(task["$type"], "TaskTriggerSubscription");
        assert_eq!(task["TargetState"], 181);
        assert_eq!(task["Name"], "0_gate");
    }
}
