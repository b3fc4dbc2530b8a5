//! Structural validation of an item's Tasks array

use crate::catalog::{
    case_fixups, is_known_effect, is_known_trigger, required_params, transform_key_mixup,
    LINKED_TASK_STATES, TRIGGER_CUBE_ONLY, VISIBLE_ONLY_TRIGGERS,
};
use serde_json::Value;

/// Validate every task subscription in a Tasks array.
///
/// `prefab` is the owning item's prefab name, used for trigger/item
/// compatibility checks. Returns one message per problem; quest linkage
/// (does the referenced quest exist, id format) is checked by the
/// snapshot validator, which has the quest table in hand.
pub fn validate_tasks(prefab: &str, tasks: &[Value]) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, task) in tasks.iter().enumerate() {
        let Some(task) = task.as_object() else {
            errors.push(format!("Tasks[{i}] is not an object"));
            continue;
        };

        let task_type = task.get("$type").and_then(Value::as_str).unwrap_or("");

        match task_type {
            "TaskEffectorSubscription" => {
                match task.get("Effector").and_then(Value::as_object) {
                    None => {
                        errors.push(format!("Tasks[{i}] TaskEffectorSubscription missing Effector"))
                    }
                    Some(effector) => validate_effector(i, effector, &mut errors),
                }
            }
            "TaskTriggerSubscription" => {
                match task.get("Trigger").and_then(Value::as_object) {
                    None => {
                        errors.push(format!("Tasks[{i}] TaskTriggerSubscription missing Trigger"))
                    }
                    Some(trigger) => {
                        let ttype = trigger.get("$type").and_then(Value::as_str).unwrap_or("");
                        if !is_known_trigger(ttype) {
                            errors.push(format!("Tasks[{i}] unknown trigger type \"{ttype}\""));
                        } else {
                            if TRIGGER_CUBE_ONLY.contains(&ttype) && prefab != "Trigger" {
                                errors.push(format!(
                                    "Tasks[{i}] {ttype} only works on Trigger items, not {prefab}"
                                ));
                            }
                            if VISIBLE_ONLY_TRIGGERS.contains(&ttype) && prefab == "Trigger" {
                                errors.push(format!(
                                    "Tasks[{i}] {ttype} on a Trigger item; Triggers are invisible during play, use a visible item"
                                ));
                            }
                        }
                    }
                }

                // Direct trigger -> effect wiring
                if let Some(effector) = task
                    .get("DirectEffector")
                    .and_then(Value::as_object)
                    .and_then(|d| d.get("Effector"))
                    .and_then(Value::as_object)
                {
                    validate_effector(i, effector, &mut errors);
                }

                // Quest-linked triggers use encoded state transitions
                let has_quest_link = task
                    .get("TaskTriggerId")
                    .and_then(Value::as_str)
                    .map(|s| !s.is_empty())
                    .unwrap_or(false);
                if has_quest_link {
                    if let Some(ts) = task.get("TargetState").and_then(Value::as_i64) {
                        if !LINKED_TASK_STATES.contains(&ts) {
                            errors.push(format!(
                                "Tasks[{i}] TargetState {ts} is not a valid quest transition; valid: {LINKED_TASK_STATES:?}"
                            ));
                        }
                    }
                }
            }
            "" => errors.push(format!("Tasks[{i}] missing $type")),
            other => errors.push(format!(
                "Tasks[{i}] unknown task $type \"{other}\"; must be TaskEffectorSubscription or TaskTriggerSubscription"
            )),
        }
    }

    errors
}

fn validate_effector(i: usize, effector: &serde_json::Map<String, Value>, errors: &mut Vec<String>) {
    let etype = effector.get("$type").and_then(Value::as_str).unwrap_or("");
    if !is_known_effect(etype) {
        errors.push(format!("Tasks[{i}] unknown effect type \"{etype}\""));
        return;
    }

    for param in required_params(etype) {
        if !effector.contains_key(*param) {
            errors.push(format!("Tasks[{i}] {etype} missing required param \"{param}\""));
        }
    }

    for (wrong, correct) in case_fixups(etype) {
        if effector.contains_key(*wrong) && !effector.contains_key(*correct) {
            errors.push(format!(
                "Tasks[{i}] {etype} uses \"{wrong}\"; should be \"{correct}\""
            ));
        }
    }

    if let Some((wrong, correct)) = transform_key_mixup(etype) {
        if effector.contains_key(wrong) {
            errors.push(format!(
                "Tasks[{i}] {etype} uses \"{wrong}\"; should be \"{correct}\""
            ));
        }
    }

    // linkedTasks entries carry their own encoded transitions
    if etype == "RunTriggersFromEffector" {
        if let Some(linked) = effector.get("linkedTasks").and_then(Value::as_array) {
            for (j, lt) in linked.iter().enumerate() {
                if let Some(ts) = lt.get("TargetState").and_then(Value::as_i64) {
                    if !LINKED_TASK_STATES.contains(&ts) {
                        errors.push(format!(
                            "Tasks[{i}] RunTriggersFromEffector linkedTasks[{j}] has invalid TargetState {ts}"
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{basic_interaction, quest_trigger};
    use crate::{effectors, triggers};
    use serde_json::json;

    #[test]
    fn test_builder_output_validates_clean() {
        let tasks = vec![
            basic_interaction(triggers::on_click(), effectors::notification("Hi", "FFFFFF", false)),
            quest_trigger("mlhabc123def45", "0_gate", 181, triggers::on_collide()),
        ];
        assert!(validate_tasks("ResizableCube", &tasks).is_empty());
    }

    #[test]
    fn test_unknown_effect_type() {
        let tasks = vec![json!({
            "$type": "TaskEffectorSubscription",
            "Effector": {"$type": "ExplodePlayer"},
            "Id": "x", "Name": ""
        })];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown effect type"));
    }

    #[test]
    fn test_missing_required_param() {
        let tasks = vec![basic_interaction(
            triggers::on_click(),
            json!({"$type": "TeleportEvent", "sn": ""}),
        )];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors[0].contains("missing required param \"id\""));
    }

    #[test]
    fn test_sound_case_mistake() {
        let tasks = vec![basic_interaction(
            triggers::on_click(),
            json!({"$type": "PlaySoundOnce", "url": "x.mp3"}),
        )];
        let errors = validate_tasks("ResizableCube", &tasks);
        // Missing required "Url" and the casing hint
        assert!(errors.iter().any(|e| e.contains("should be \"Url\"")));
    }

    #[test]
    fn test_transform_key_mixup() {
        let tasks = vec![basic_interaction(
            triggers::on_click(),
            json!({"$type": "MoveToSpot", "_transformState": {"duration": 0.0}, "TS": {}}),
        )];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors.iter().any(|e| e.contains("should be \"_transformState\"")));
    }

    #[test]
    fn test_enter_trigger_on_visible_item() {
        let tasks = vec![basic_interaction(triggers::on_enter(), effectors::hide())];

        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors.iter().any(|e| e.contains("only works on Trigger items")));

        assert!(validate_tasks("Trigger", &tasks).is_empty());
    }

    #[test]
    fn test_click_trigger_on_trigger_cube() {
        let tasks = vec![basic_interaction(triggers::on_click(), effectors::hide())];
        let errors = validate_tasks("Trigger", &tasks);
        assert!(errors.iter().any(|e| e.contains("invisible during play")));
    }

    #[test]
    fn test_invalid_quest_transition() {
        let tasks = vec![quest_trigger("mlhabc123def45", "0_gate", 999, triggers::on_click())];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors.iter().any(|e| e.contains("not a valid quest transition")));
    }

    #[test]
    fn test_invalid_linked_task_state() {
        let tasks = vec![basic_interaction(
            triggers::on_click(),
            json!({
                "$type": "RunTriggersFromEffector",
                "linkedTasks": [{"TargetState": 100, "TaskTriggerId": "mlhabc123def45"}]
            }),
        )];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors.iter().any(|e| e.contains("invalid TargetState 100")));
    }

    #[test]
    fn test_missing_type() {
        let tasks = vec![json!({"Trigger": {"$type": "OnClickEvent"}})];
        let errors = validate_tasks("ResizableCube", &tasks);
        assert!(errors[0].contains("missing $type"));
    }
}
