//! Canonical `$type` catalogs and parameter tables for the Tasks system

/// All effect `$type` values the platform accepts.
pub const EFFECT_TYPES: &[&str] = &[
    // Visibility
    "ShowObjectEvent",
    "HideObjectEvent",
    "ShowOutline",
    "HideOutline",
    // Movement & transform
    "MoveToSpot",
    "PortalsAnimation",
    "DuplicateItem",
    "MoveItemToPlayer",
    // Player effects
    "AddVelocityToPlayer",
    "TeleportEvent",
    "ChangePlayerHealth",
    "DamageOverTime",
    "LockMovement",
    "UnlockMovement",
    "StartAutoRun",
    "StopAutoRun",
    "PlayerEmote",
    "MutePlayer",
    "HideAllPlayersEvent",
    "LockAvatarChange",
    "UnlockAvatarChange",
    "DisplayAvatarScreen",
    "ChangeAvatarEffector",
    "ChangeMovementProfile",
    "ChangeRoundyWearableEffector",
    // Camera
    "LockCamera",
    "UnlockCamera",
    "ChangeCameraZoom",
    "ToggleFreeCam",
    "ChangeCamState",
    "SetCameraFilter",
    "ToggleLockCursor",
    // UI & notifications
    "NotificationPillEvent",
    // Values (variables)
    "DisplayValueEvent",
    "HideValueEvent",
    "UpdateScoreEvent",
    "UpdateScoreEventString",
    // Function effects
    "FunctionEffector",
    // Quest/task control
    "RunTriggersFromEffector",
    "ResetAllTasks",
    // Timers
    "StartTimerEffect",
    "StopTimerEffect",
    "CancelTimerEffect",
    // Leaderboard
    "PostScoreToLeaderboard",
    "ClearLeaderboard",
    "OpenLeaderboardEffect",
    // Audio
    "PlaySoundOnce",
    "PlaySoundInALoop",
    "StopSound",
    "ChangeAudiusEffect",
    // Environment
    "ChangeBloom",
    "ChangeTimeOfDay",
    "RotateSkybox",
    "ChangeFog",
    // Communication
    "SendMessageToIframes",
    "ChangeVoiceGroup",
    // Iframes
    "IframeEvent",
    "IframeStopEvent",
    // NPC
    "NPCMessageEvent",
    "WalkNpcToSpot",
    // EnemyNPC
    "ReviveEnemy",
    "ResetEnemy",
    "AttackPlayer",
    "ChangeEnemyHealth",
    "DuplicateEnemy",
    // Token swap
    "DisplaySellSwap",
    "HideSellSwap",
    // Dialogue
    "DialogEffectorDisplay",
    // Inventory
    "RefreshUserInventory",
    // Gun
    "EquipGunEffect",
    "TossGunEffect",
    "ResetGunEffect",
    // Trigger zone
    "ActivateTriggerZoneEffect",
    "DeactivateTriggerZoneEffect",
    // GLB animation
    "PlayAnimationOnce",
    "PlayAnimationInALoop",
    "StopGLBAnimation",
    // Destructible
    "RespawnDestructible",
];

/// All trigger `$type` values the platform accepts.
pub const TRIGGER_TYPES: &[&str] = &[
    // General (work on any item)
    "OnClickEvent",
    "OnCollideEvent",
    "OnCollisionStoppedEvent",
    "OnHoverStartEvent",
    "OnHoverEndEvent",
    "OnPlayerLoggedIn",
    "OnKeyPressedEvent",
    "OnKeyReleasedEvent",
    "OnPlayerDied",
    "OnPlayerRevived",
    "OnPlayerMove",
    "OnPlayerStoppedMoving",
    "OnMicrophoneUnmuted",
    "OnTimerStopped",
    "OnCountdownTimerFinished",
    "ScoreTrigger",
    "OnAnimationStoppedEvent",
    "OnItemCollectedEvent",
    "OnItemClickEvent",
    "PlayerLeave",
    "SwapVolume",
    // Trigger-cube-only (OnExitEvent is an alias for UserExitTrigger)
    "OnEnterEvent",
    "UserExitTrigger",
    "OnExitEvent",
    // Item-specific
    "OnDestroyedEvent",
    "OnGunEquippedTrigger",
    "ShotHitTrigger",
    "GotKillTrigger",
    "StartedAimingTrigger",
    "StoppedAimingTrigger",
    "OnGunTossedTrigger",
    "OnTakeDamageTrigger",
    "OnVehicleEntered",
    "OnVehicleExited",
    "OnNpcSentTag",
    "OnEnemyDied",
];

/// Triggers that only fire on Trigger items (invisible trigger cubes)
pub const TRIGGER_CUBE_ONLY: &[&str] = &["OnEnterEvent", "UserExitTrigger", "OnExitEvent"];

/// Triggers that need a visible item, never meaningful on Trigger cubes
pub const VISIBLE_ONLY_TRIGGERS: &[&str] = &["OnClickEvent", "OnHoverStartEvent", "OnHoverEndEvent"];

/// Encoded quest state transitions accepted in `TargetState` of quest
/// triggers and linked tasks (e.g. 111 = Not Active -> Active,
/// 121 = Active -> Completed, 181 = Not Active -> Completed).
pub const LINKED_TASK_STATES: &[i64] = &[101, 111, 121, 131, 141, 151, 161, 171, 181];

pub fn is_known_effect(name: &str) -> bool {
    EFFECT_TYPES.contains(&name)
}

pub fn is_known_trigger(name: &str) -> bool {
    TRIGGER_TYPES.contains(&name)
}

/// Parameters that must be present on an effector payload of the given
/// type. Effects not listed have no mandatory parameters.
pub fn required_params(effect_type: &str) -> &'static [&'static str] {
    match effect_type {
        "MoveToSpot" => &["_transformState"],
        "AddVelocityToPlayer" => &["vel"],
        "TeleportEvent" => &["id"],
        "ChangePlayerHealth" => &["healthChange"],
        "PlayerEmote" => &["animationName"],
        "ChangeAvatarEffector" => &["Url"],
        "ChangeMovementProfile" => &["mvmtProfile"],
        "ChangeRoundyWearableEffector" => &["ItemID"],
        "ChangeCameraZoom" => &["zoomAmount"],
        "ChangeCamState" => &["camState"],
        "SetCameraFilter" => &["url"],
        "ToggleLockCursor" => &["lockCursor"],
        "NotificationPillEvent" => &["nt"],
        "DisplayValueEvent" => &["label"],
        "HideValueEvent" => &["label"],
        "UpdateScoreEventString" => &["targetText", "label"],
        "FunctionEffector" => &["V"],
        "RunTriggersFromEffector" => &["linkedTasks"],
        "StartTimerEffect" => &["tn"],
        "StopTimerEffect" => &["tn"],
        "CancelTimerEffect" => &["tn"],
        "ClearLeaderboard" => &["label"],
        "OpenLeaderboardEffect" => &["lb"],
        "PlaySoundOnce" => &["Url"],
        "PlaySoundInALoop" => &["Url"],
        "StopSound" => &["url"],
        "ChangeAudiusEffect" => &["ap"],
        "ChangeBloom" => &["Intensity"],
        "RotateSkybox" => &["rotation"],
        "ChangeFog" => &["color", "distance"],
        "SendMessageToIframes" => &["iframeMsg"],
        "ChangeVoiceGroup" => &["group"],
        "NPCMessageEvent" => &["n", "m"],
        "WalkNpcToSpot" => &["endPosition"],
        "IframeEvent" => &["url"],
        "IframeStopEvent" => &["iframeUrl"],
        "DisplaySellSwap" => &["id"],
        "DuplicateEnemy" => &["spawnName"],
        _ => &[],
    }
}

/// Known capitalization mistakes per effect: (wrong key, correct key).
/// The audio effects are inconsistent on the platform side and these
/// show up constantly in hand-edited snapshots.
pub fn case_fixups(effect_type: &str) -> &'static [(&'static str, &'static str)] {
    match effect_type {
        "PlaySoundOnce" | "PlaySoundInALoop" => &[("url", "Url"), ("dist", "Dist")],
        "StopSound" => &[("Url", "url")],
        _ => &[],
    }
}

/// Transform payload key confusion between effects: (wrong key, correct key).
/// DuplicateItem takes `TS`, MoveToSpot takes `_transformState`.
pub fn transform_key_mixup(effect_type: &str) -> Option<(&'static str, &'static str)> {
    match effect_type {
        "DuplicateItem" => Some(("_transformState", "TS")),
        "MoveToSpot" => Some(("TS", "_transformState")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_membership() {
        assert!(is_known_effect("TeleportEvent"));
        assert!(is_known_effect("RespawnDestructible"));
        assert!(!is_known_effect("TeleportPlayer"));

        assert!(is_known_trigger("OnEnterEvent"));
        assert!(is_known_trigger("OnNpcSentTag"));
        assert!(!is_known_trigger("OnEnter"));
    }

    #[test]
    fn test_required_params() {
        assert_eq!(required_params("ChangeFog"), &["color", "distance"]);
        assert_eq!(required_params("ShowObjectEvent"), &[] as &[&str]);
    }

    #[test]
    fn test_no_overlap_between_cube_only_and_visible_only() {
        for t in TRIGGER_CUBE_ONLY {
            assert!(!VISIBLE_ONLY_TRIGGERS.contains(t));
        }
    }

    #[test]
    fn test_compat_sets_are_known_triggers() {
        for t in TRIGGER_CUBE_ONLY.iter().chain(VISIBLE_ONLY_TRIGGERS) {
            assert!(is_known_trigger(t), "{t} missing from TRIGGER_TYPES");
        }
    }
}
