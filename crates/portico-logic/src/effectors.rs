//! Effector payload builders.
//!
//! Each function returns the inner `{"$type": "...", ...}` payload. Wrap
//! with [`crate::task::basic_interaction`] or [`crate::task::quest_effector`]
//! before pushing into an item's Tasks array.

use serde_json::{json, Map, Value};
use uuid::Uuid;

// ── Visibility ──────────────────────────────────────────────────────────────

/// Show a hidden item.
pub fn show() -> Value {
    json!({"$type": "ShowObjectEvent"})
}

/// Hide an item (invisible + no collider).
pub fn hide() -> Value {
    json!({"$type": "HideObjectEvent"})
}

pub fn show_outline() -> Value {
    json!({"$type": "ShowOutline"})
}

pub fn hide_outline() -> Value {
    json!({"$type": "HideOutline"})
}

/// Duplicate the item, optionally at a new transform.
/// `destroy_after` of 0 keeps the duplicate forever.
pub fn duplicate(
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
    destroy_after: f32,
) -> Value {
    let mut e = object(json!({"$type": "DuplicateItem"}));
    let mut ts = Map::new();
    if let Some(p) = position {
        ts.insert("position".into(), json!(p));
    }
    if let Some(r) = rotation {
        ts.insert("rotation".into(), json!(r));
    }
    if let Some(s) = scale {
        ts.insert("scale".into(), json!(s));
    }
    if !ts.is_empty() {
        e.insert("TS".into(), Value::Object(ts));
    }
    if destroy_after > 0.0 {
        e.insert("destroyAfterTime".into(), json!(destroy_after));
    }
    Value::Object(e)
}

// ── Movement & transform ───────────────────────────────────────────────────

/// Animate the item to a new transform over `duration` seconds.
///
/// Values are absolute world-space by default. With `relative`, they are
/// offsets that accumulate on every trigger (scale is additive).
pub fn move_to_spot(
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
    duration: f32,
    relative: bool,
) -> Value {
    let mut state = object(json!({"duration": duration}));
    if let Some(p) = position {
        state.insert("position".into(), json!(p));
    }
    if let Some(r) = rotation {
        state.insert("rotation".into(), json!(r));
    }
    if let Some(s) = scale {
        state.insert("scale".into(), json!(s));
    }
    let mut e = object(json!({"$type": "MoveToSpot", "_transformState": state}));
    if relative {
        e.insert("relative".into(), json!(true));
    }
    Value::Object(e)
}

/// Teleport the item to the player's position.
pub fn move_item_to_player() -> Value {
    json!({"$type": "MoveItemToPlayer"})
}

/// Multi-keyframe item animation. `transform_states` carries the keyframes;
/// `states` is the legacy keyframe list the engine still requires alongside.
pub fn animation(transform_states: Vec<Value>, states: Vec<Value>, looped: bool, seamless: bool) -> Value {
    json!({
        "$type": "PortalsAnimation",
        "stateEvents": [],
        "_transformStates": transform_states,
        "states": states,
        "loopAnimation": looped,
        "seamless": seamless
    })
}

// ── Player effects ─────────────────────────────────────────────────────────

/// Apply velocity to the player. `local` makes it relative to player facing.
pub fn velocity(vel: [f32; 3], local: bool) -> Value {
    json!({"$type": "AddVelocityToPlayer", "vel": vel, "local": local})
}

/// Teleport the player to a room/spawn. Same room id = respawn in place.
pub fn teleport(room_id: &str, spawn_name: &str, spawn_radius: f32) -> Value {
    json!({"$type": "TeleportEvent", "id": room_id, "sn": spawn_name, "sr": spawn_radius})
}

pub fn heal(amount: i64) -> Value {
    json!({"$type": "ChangePlayerHealth", "healthChange": amount})
}

pub fn damage(amount: i64) -> Value {
    json!({"$type": "ChangePlayerHealth", "op": 2, "healthChange": amount})
}

pub fn damage_over_time() -> Value {
    json!({"$type": "DamageOverTime"})
}

pub fn lock_movement() -> Value {
    json!({"$type": "LockMovement"})
}

pub fn unlock_movement() -> Value {
    json!({"$type": "UnlockMovement"})
}

pub fn start_auto_run() -> Value {
    json!({"$type": "StartAutoRun"})
}

pub fn stop_auto_run() -> Value {
    json!({"$type": "StopAutoRun"})
}

/// Make the player perform an emote (e.g. "Wave", "Salute", "Robot").
pub fn emote(animation_name: &str) -> Value {
    json!({"$type": "PlayerEmote", "animationName": animation_name})
}

pub fn mute_player() -> Value {
    json!({"$type": "MutePlayer"})
}

pub fn hide_all_players() -> Value {
    json!({"$type": "HideAllPlayersEvent"})
}

pub fn lock_avatar_change() -> Value {
    json!({"$type": "LockAvatarChange"})
}

pub fn unlock_avatar_change() -> Value {
    json!({"$type": "UnlockAvatarChange"})
}

pub fn display_avatar_screen() -> Value {
    json!({"$type": "DisplayAvatarScreen"})
}

pub fn change_avatar(url: &str, persistent: bool) -> Value {
    json!({"$type": "ChangeAvatarEffector", "Url": url, "Persistent": persistent})
}

/// Switch to a movement profile configured in room settings.
pub fn change_movement_profile(profile: &str) -> Value {
    json!({"$type": "ChangeMovementProfile", "mvmtProfile": profile})
}

pub fn equip_wearable(item_id: &str) -> Value {
    json!({"$type": "ChangeRoundyWearableEffector", "ItemID": item_id})
}

// ── Camera ─────────────────────────────────────────────────────────────────

pub fn lock_camera() -> Value {
    json!({"$type": "LockCamera"})
}

pub fn unlock_camera() -> Value {
    json!({"$type": "UnlockCamera"})
}

pub fn camera_zoom(zoom_amount: f32, lock_zoom: bool) -> Value {
    json!({"$type": "ChangeCameraZoom", "zoomAmount": zoom_amount, "lockZoom": lock_zoom})
}

pub fn toggle_free_cam() -> Value {
    json!({"$type": "ToggleFreeCam"})
}

/// Switch to a named camera state configured in room settings.
pub fn change_cam_state(cam_state: &str, transition_speed: f32) -> Value {
    json!({"$type": "ChangeCamState", "camState": cam_state, "transitionSpeed": transition_speed})
}

/// Overlay an image on the camera. Alpha 0.0–1.0.
pub fn camera_filter(url: &str, alpha: f32) -> Value {
    json!({"$type": "SetCameraFilter", "url": url, "alpha": alpha})
}

pub fn toggle_cursor_lock(lock: bool) -> Value {
    json!({"$type": "ToggleLockCursor", "lockCursor": lock})
}

// ── UI & notifications ─────────────────────────────────────────────────────

/// Show a notification pill. Text supports `<b>`, `<i>`, `<color=#hex>` tags.
pub fn notification(text: &str, color: &str, hide_background: bool) -> Value {
    json!({"$type": "NotificationPillEvent", "nt": text, "c": color, "hideBackground": hide_background})
}

// ── Values (variables) ─────────────────────────────────────────────────────

pub fn display_value(label: &str, color: &str) -> Value {
    json!({"$type": "DisplayValueEvent", "label": label, "color": color})
}

pub fn hide_value(label: &str) -> Value {
    json!({"$type": "HideValueEvent", "label": label})
}

/// Modify a numeric variable. `op` None sets the value outright;
/// 1 = add, 2 = subtract, 3 = multiply, 4 = divide.
pub fn update_value(label: &str, op: Option<i64>, change: f64) -> Value {
    let mut e = object(json!({"$type": "UpdateScoreEvent", "scoreChange": change}));
    if let Some(op) = op {
        e.insert("op".into(), json!(op));
    }
    if !label.is_empty() {
        e.insert("label".into(), json!(label));
    }
    Value::Object(e)
}

pub fn update_string_value(label: &str, text: &str) -> Value {
    json!({"$type": "UpdateScoreEventString", "targetText": text, "label": label})
}

// ── Function effects ───────────────────────────────────────────────────────

/// Evaluate an NCalc expression, e.g. `"$N{coins} >= 10.0"`.
pub fn function(expression: &str) -> Value {
    json!({"$type": "FunctionEffector", "V": expression})
}

// ── Quest/task control ─────────────────────────────────────────────────────

/// A quest state transition fired by [`run_triggers`].
pub struct LinkedTask<'a> {
    pub quest_id: &'a str,
    pub quest_name: &'a str,
    /// Encoded transition, see [`crate::catalog::LINKED_TASK_STATES`]
    pub target_state: i64,
    pub delay: f32,
}

/// Trigger state changes on other quests. `use_random` fires one random
/// entry instead of all of them.
pub fn run_triggers(linked_tasks: &[LinkedTask<'_>], use_random: bool) -> Value {
    let tasks: Vec<Value> = linked_tasks
        .iter()
        .map(|t| {
            let trigger = if t.delay > 0.0 {
                json!({"Delay": t.delay})
            } else {
                json!({})
            };
            json!({
                "Trigger": trigger,
                "Id": Uuid::new_v4().to_string(),
                "TargetState": t.target_state,
                "Name": t.quest_name,
                "TaskTriggerId": t.quest_id
            })
        })
        .collect();

    let mut e = object(json!({"$type": "RunTriggersFromEffector", "linkedTasks": tasks}));
    if use_random {
        e.insert("useRandom".into(), json!(true));
    }
    Value::Object(e)
}

/// Reset every quest in the room to its initial state.
pub fn reset_all_tasks() -> Value {
    json!({"$type": "ResetAllTasks"})
}

// ── Timers ─────────────────────────────────────────────────────────────────

pub fn start_timer(timer_name: &str, countdown_id: &str) -> Value {
    json!({"$type": "StartTimerEffect", "tn": timer_name, "ci": countdown_id})
}

/// Stop a running timer (fires the OnTimerStopped trigger).
pub fn stop_timer(timer_name: &str, countdown_id: &str) -> Value {
    json!({"$type": "StopTimerEffect", "tn": timer_name, "ci": countdown_id})
}

/// Cancel a timer without firing the stopped trigger.
pub fn cancel_timer(timer_name: &str) -> Value {
    json!({"$type": "CancelTimerEffect", "tn": timer_name})
}

// ── Leaderboard ────────────────────────────────────────────────────────────

/// Post the player's current score. Time-based leaderboards record
/// automatically on StopTimerEffect; this is for numeric variables.
pub fn post_score(label: &str) -> Value {
    let mut e = object(json!({"$type": "PostScoreToLeaderboard"}));
    if !label.is_empty() {
        e.insert("label".into(), json!(label));
    }
    Value::Object(e)
}

pub fn clear_leaderboard(label: &str) -> Value {
    json!({"$type": "ClearLeaderboard", "label": label})
}

pub fn open_leaderboard(leaderboard_name: &str) -> Value {
    json!({"$type": "OpenLeaderboardEffect", "lb": leaderboard_name})
}

// ── Audio ──────────────────────────────────────────────────────────────────

/// Play an MP3 once, audible within `distance` meters.
pub fn play_sound_once(url: &str, distance: f32) -> Value {
    json!({"$type": "PlaySoundOnce", "Url": url, "Dist": distance})
}

/// Loop an MP3. Distance -1 is global (heard everywhere).
pub fn play_sound_loop(url: &str, distance: f32, preload: bool) -> Value {
    json!({"$type": "PlaySoundInALoop", "Url": url, "Dist": distance, "Preload": preload})
}

/// Stop a playing sound by URL. Note the lowercase `url`; this effect
/// disagrees with the play effects on casing.
pub fn stop_sound(url: &str, fade_out: f32) -> Value {
    json!({"$type": "StopSound", "url": url, "fadeOut": fade_out})
}

pub fn change_audius(playlist: &str) -> Value {
    json!({"$type": "ChangeAudiusEffect", "ap": playlist})
}

// ── Environment ────────────────────────────────────────────────────────────

pub fn change_bloom(intensity: f32, clamp: f32, diffusion: f32) -> Value {
    json!({"$type": "ChangeBloom", "Intensity": intensity, "Clamp": clamp, "Diffusion": diffusion})
}

pub fn change_time_of_day() -> Value {
    json!({"$type": "ChangeTimeOfDay"})
}

pub fn rotate_skybox(rotation: f32, duration: f32) -> Value {
    json!({"$type": "RotateSkybox", "rotation": rotation, "duration": duration})
}

/// Change fog color and draw distance. Lower distance = thicker fog.
pub fn change_fog(color: &str, distance: f32) -> Value {
    json!({"$type": "ChangeFog", "color": color, "distance": distance})
}

// ── Communication ──────────────────────────────────────────────────────────

pub fn send_iframe_message(message: &str) -> Value {
    json!({"$type": "SendMessageToIframes", "iframeMsg": message})
}

pub fn change_voice_group(group: &str) -> Value {
    json!({"$type": "ChangeVoiceGroup", "group": group})
}

// ── Iframes ────────────────────────────────────────────────────────────────

pub fn open_iframe(url: &str) -> Value {
    json!({"$type": "IframeEvent", "url": url})
}

pub fn close_iframe(url: &str) -> Value {
    json!({"$type": "IframeStopEvent", "iframeUrl": url})
}

// ── NPC ────────────────────────────────────────────────────────────────────

/// Walk an NPC to a position with walk animation.
pub fn walk_npc_to_spot(position: [f32; 3], walk_speed: f32, rotation: Option<[f32; 4]>) -> Value {
    let rot = rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]);
    json!({
        "$type": "WalkNpcToSpot",
        "walkSpeed": walk_speed,
        "endPosition": position,
        "endRotation": rot
    })
}

/// Send a message to an AI NPC (makes it speak/respond).
pub fn npc_message(npc_name: &str, message: &str, repeatable: bool) -> Value {
    json!({"$type": "NPCMessageEvent", "n": npc_name, "m": message, "r": repeatable})
}

// ── EnemyNPC ───────────────────────────────────────────────────────────────

pub fn revive_enemy() -> Value {
    json!({"$type": "ReviveEnemy"})
}

pub fn reset_enemy() -> Value {
    json!({"$type": "ResetEnemy"})
}

pub fn attack_player() -> Value {
    json!({"$type": "AttackPlayer"})
}

/// Modify enemy health. op 1 = add, 2 = subtract.
pub fn change_enemy_health(op: i64, health_change: i64) -> Value {
    json!({"$type": "ChangeEnemyHealth", "op": op, "healthChange": health_change})
}

/// Spawn copies of an enemy at a named SpawnPoint.
pub fn duplicate_enemy(spawn_name: &str, count: i64, random_radius: f32) -> Value {
    json!({
        "$type": "DuplicateEnemy",
        "spawnName": spawn_name,
        "count": count,
        "randomRadius": random_radius
    })
}

// ── Token swap ─────────────────────────────────────────────────────────────

pub fn show_token_swap(swap_id: &str, typ: i64) -> Value {
    json!({"$type": "DisplaySellSwap", "id": swap_id, "typ": typ})
}

pub fn hide_token_swap() -> Value {
    json!({"$type": "HideSellSwap"})
}

// ── Inventory ──────────────────────────────────────────────────────────────

pub fn refresh_inventory() -> Value {
    json!({"$type": "RefreshUserInventory"})
}

fn object(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => unreachable!("json! object literal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::is_known_effect;

    #[test]
    fn test_payloads_carry_known_types() {
        for payload in [
            show(),
            hide(),
            teleport("room-uuid", "", 0.0),
            notification("Hello!", "00FF00", false),
            play_sound_once("https://cdn.example.com/ding.mp3", 10.0),
            stop_sound("https://cdn.example.com/ding.mp3", 0.5),
            update_value("coins", Some(1), 5.0),
            walk_npc_to_spot([1.0, 0.0, 2.0], 3.0, None),
        ] {
            let t = payload["$type"].as_str().unwrap();
            assert!(is_known_effect(t), "{t} missing from catalog");
        }
    }

    #[test]
    fn test_audio_casing() {
        let once = play_sound_once("u", 10.0);
        assert!(once.get("Url").is_some());
        assert!(once.get("Dist").is_some());

        let stop = stop_sound("u", 0.0);
        assert!(stop.get("url").is_some());
    }

    #[test]
    fn test_update_value_set_omits_op() {
        let set = update_value("score", None, 10.0);
        assert!(set.get("op").is_none());

        let add = update_value("score", Some(1), 1.0);
        assert_eq!(add["op"], 1);
    }

    #[test]
    fn test_move_to_spot_uses_transform_state() {
        let e = move_to_spot(Some([0.0, 1.0, 0.0]), None, None, 2.0, false);
        assert!(e.get("_transformState").is_some());
        assert!(e.get("TS").is_none());
        assert_eq!(e["_transformState"]["duration"], 2.0);
    }

    #[test]
    fn test_duplicate_uses_ts() {
        let e = duplicate(Some([1.0, 0.0, 0.0]), None, None, 5.0);
        assert!(e.get("TS").is_some());
        assert!(e.get("_transformState").is_none());
        assert_eq!(e["destroyAfterTime"], 5.0);
    }

    #[test]
    fn test_run_triggers_encoding() {
        let e = run_triggers(
            &[LinkedTask {
                quest_id: "mlh9kkyxvll8ql",
                quest_name: "0_activate",
                target_state: 181,
                delay: 0.0,
            }],
            false,
        );
        let tasks = e["linkedTasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["TargetState"], 181);
        assert_eq!(tasks[0]["TaskTriggerId"], "mlh9kkyxvll8ql");
        assert_eq!(tasks[0]["Trigger"], serde_json::json!({}));
    }
}
