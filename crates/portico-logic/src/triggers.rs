//! Trigger payload builders.
//!
//! Each function returns the inner `{"$type": "..."}` payload for a
//! trigger subscription.

use serde_json::{json, Value};

// ── General triggers (work on any item) ────────────────────────────────────

/// Player clicks/taps the item.
pub fn on_click() -> Value {
    json!({"$type": "OnClickEvent"})
}

/// Player collides with the item.
pub fn on_collide() -> Value {
    json!({"$type": "OnCollideEvent"})
}

pub fn collision_stopped() -> Value {
    json!({"$type": "OnCollisionStoppedEvent"})
}

pub fn hover_start() -> Value {
    json!({"$type": "OnHoverStartEvent"})
}

pub fn hover_end() -> Value {
    json!({"$type": "OnHoverEndEvent"})
}

pub fn player_logged_in() -> Value {
    json!({"$type": "OnPlayerLoggedIn"})
}

pub fn player_died() -> Value {
    json!({"$type": "OnPlayerDied"})
}

pub fn player_revived() -> Value {
    json!({"$type": "OnPlayerRevived"})
}

pub fn player_move() -> Value {
    json!({"$type": "OnPlayerMove"})
}

pub fn player_stopped_moving() -> Value {
    json!({"$type": "OnPlayerStoppedMoving"})
}

pub fn key_pressed() -> Value {
    json!({"$type": "OnKeyPressedEvent"})
}

pub fn key_released() -> Value {
    json!({"$type": "OnKeyReleasedEvent"})
}

pub fn mic_unmuted() -> Value {
    json!({"$type": "OnMicrophoneUnmuted"})
}

/// A timer stopped via StopTimerEffect.
pub fn timer_stopped() -> Value {
    json!({"$type": "OnTimerStopped"})
}

pub fn countdown_finished() -> Value {
    json!({"$type": "OnCountdownTimerFinished"})
}

/// A variable/score value was updated.
pub fn value_updated() -> Value {
    json!({"$type": "ScoreTrigger"})
}

pub fn animation_stopped() -> Value {
    json!({"$type": "OnAnimationStoppedEvent"})
}

pub fn item_collected() -> Value {
    json!({"$type": "OnItemCollectedEvent"})
}

/// A backpack/inventory item was activated.
pub fn backpack_item_activated() -> Value {
    json!({"$type": "OnItemClickEvent"})
}

pub fn player_leave() -> Value {
    json!({"$type": "PlayerLeave"})
}

pub fn swap_volume() -> Value {
    json!({"$type": "SwapVolume"})
}

// ── Trigger-cube-only (prefabName "Trigger") ───────────────────────────────

/// Player enters the trigger zone. Only fires on Trigger items.
pub fn on_enter() -> Value {
    json!({"$type": "OnEnterEvent"})
}

/// Player exits the trigger zone. Only fires on Trigger items.
pub fn on_exit() -> Value {
    json!({"$type": "OnExitEvent"})
}

// ── Item-specific ──────────────────────────────────────────────────────────

pub fn on_destroyed() -> Value {
    json!({"$type": "OnDestroyedEvent"})
}

pub fn gun_equipped() -> Value {
    json!({"$type": "OnGunEquippedTrigger"})
}

pub fn shot_hit() -> Value {
    json!({"$type": "ShotHitTrigger"})
}

pub fn got_kill() -> Value {
    json!({"$type": "GotKillTrigger"})
}

pub fn npc_sent_tag() -> Value {
    json!({"$type": "OnNpcSentTag"})
}

/// Enemy NPC was killed. `rtime` delays respawn, `delay` delays the fire.
pub fn enemy_died(rtime: f32, delay: f32) -> Value {
    json!({"$type": "OnEnemyDied", "RTime": rtime, "Delay": delay})
}

pub fn take_damage() -> Value {
    json!({"$type": "OnTakeDamageTrigger"})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::is_known_trigger;

    #[test]
    fn test_payloads_carry_known_types() {
        for payload in [
            on_click(),
            on_enter(),
            on_exit(),
            value_updated(),
            enemy_died(5.0, 0.0),
            npc_sent_tag(),
        ] {
            let t = payload["$type"].as_str().unwrap();
            assert!(is_known_trigger(t), "{t} missing from catalog");
        }
    }
}
