//! Display-name shortening for triggers, effects, and prefabs

/// Shorten a trigger `$type` for table display
pub fn shorten_trigger(type_name: &str) -> String {
    let known = match type_name {
        "OnEnterEvent" => Some("Enter"),
        "OnExitEvent" | "UserExitTrigger" => Some("Exit"),
        "OnClickEvent" => Some("Click"),
        "OnCollideEvent" => Some("Collide"),
        "OnCollisionStoppedEvent" => Some("CollideEnd"),
        "OnHoverStartEvent" => Some("HoverStart"),
        "OnHoverEndEvent" => Some("HoverEnd"),
        "OnPlayerLoggedIn" => Some("LoggedIn"),
        "OnKeyPressedEvent" => Some("KeyPress"),
        "OnKeyReleasedEvent" => Some("KeyRelease"),
        "OnPlayerDied" => Some("Died"),
        "OnPlayerRevived" => Some("Revived"),
        "OnPlayerMove" => Some("Move"),
        "OnPlayerStoppedMoving" => Some("StopMove"),
        "OnTimerStopped" => Some("TimerStop"),
        "OnCountdownTimerFinished" => Some("Countdown"),
        "ScoreTrigger" => Some("ValueUpdated"),
        "OnAnimationStoppedEvent" => Some("AnimEnd"),
        "OnItemCollectedEvent" => Some("Collected"),
        "OnItemClickEvent" => Some("ItemClick"),
        "PlayerLeave" => Some("PlayerLeave"),
        "OnEnemyDied" => Some("EnemyDied"),
        "OnTakeDamageTrigger" => Some("TakeDamage"),
        _ => None,
    };
    if let Some(short) = known {
        return short.to_string();
    }

    // Fallback: strip the Event suffix and On prefix
    let mut short = type_name;
    short = short.strip_suffix("Event").unwrap_or(short);
    short = short.strip_prefix("On").unwrap_or(short);
    short.to_string()
}

/// Shorten an effect `$type` for table display
pub fn shorten_effect(type_name: &str) -> String {
    let known = match type_name {
        "TeleportEvent" => Some("Teleport"),
        "PlaySoundOnce" => Some("Sound"),
        "PlaySoundInALoop" => Some("SoundLoop"),
        "StopSound" => Some("StopSound"),
        "UpdateScoreEvent" => Some("UpdateScore"),
        "UpdateScoreEventString" => Some("UpdateScoreStr"),
        "NotificationPillEvent" => Some("Notification"),
        "ShowObjectEvent" => Some("Show"),
        "HideObjectEvent" => Some("Hide"),
        "MoveToSpot" => Some("Move"),
        "FunctionEffector" => Some("Function"),
        "RunTriggersFromEffector" => Some("RunTriggers"),
        "PortalsAnimation" => Some("Animation"),
        "DuplicateItem" => Some("Duplicate"),
        "ChangePlayerHealth" => Some("Health"),
        "LockMovement" => Some("LockMove"),
        "UnlockMovement" => Some("UnlockMove"),
        "DisplayValueEvent" => Some("DisplayValue"),
        "HideValueEvent" => Some("HideValue"),
        "StartTimerEffect" => Some("StartTimer"),
        "StopTimerEffect" => Some("StopTimer"),
        "CancelTimerEffect" => Some("CancelTimer"),
        "AddVelocityToPlayer" => Some("Velocity"),
        "LockCamera" => Some("LockCam"),
        "UnlockCamera" => Some("UnlockCam"),
        "ChangeCameraZoom" => Some("CamZoom"),
        "ChangeCamState" => Some("CamState"),
        "SetCameraFilter" => Some("CamFilter"),
        "ShowOutline" => Some("Outline"),
        "HideOutline" => Some("HideOutline"),
        "MoveItemToPlayer" => Some("MoveToPlayer"),
        "DamageOverTime" => Some("DOT"),
        "PlayerEmote" => Some("Emote"),
        "PostScoreToLeaderboard" => Some("PostScore"),
        "ClearLeaderboard" => Some("ClearLB"),
        "OpenLeaderboardEffect" => Some("OpenLB"),
        "ResetAllTasks" => Some("ResetTasks"),
        "ChangeAudiusEffect" => Some("Audius"),
        "ChangeMovementProfile" => Some("MoveProfile"),
        "NPCMessageEvent" => Some("NPCMessage"),
        "WalkNpcToSpot" => Some("WalkNPC"),
        _ => None,
    };
    if let Some(short) = known {
        return short.to_string();
    }

    let short = type_name;
    if let Some(stripped) = short.strip_suffix("Event") {
        return stripped.to_string();
    }
    if let Some(stripped) = short.strip_suffix("Effect") {
        return stripped.to_string();
    }
    short.to_string()
}

/// Abbreviate a prefab name for compact display
pub fn shorten_prefab(prefab_name: &str) -> &str {
    match prefab_name {
        "ResizableCube" => "Cube",
        "Addressable" => "VFX",
        "GlbCollectable" => "Collectible",
        "WorldText" => "Text",
        "SpawnPoint" => "Spawn",
        "DefaultPainting" => "Image",
        "DefaultVideo" => "Video",
        "PlaceableTV" => "TV",
        "CameraObject" => "Camera",
        "GLBNPC" => "NPC",
        "GLBSign" => "Sign",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shortenings() {
        assert_eq!(shorten_trigger("OnEnterEvent"), "Enter");
        assert_eq!(shorten_effect("NotificationPillEvent"), "Notification");
        assert_eq!(shorten_prefab("ResizableCube"), "Cube");
    }

    #[test]
    fn test_fallback_stripping() {
        assert_eq!(shorten_trigger("OnSomeNewEvent"), "SomeNew");
        assert_eq!(shorten_effect("SomeNewEffect"), "SomeNew");
        assert_eq!(shorten_effect("ChangeBloom"), "ChangeBloom");
        assert_eq!(shorten_prefab("Leaderboard"), "Leaderboard");
    }
}
