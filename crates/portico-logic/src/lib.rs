//! The interaction layer of room items.
//!
//! Items carry a `Tasks` array inside their extra data. Each task is
//! either a `TaskTriggerSubscription` (a trigger payload, optionally with
//! a direct effector) or a `TaskEffectorSubscription` (an effector bound
//! to a quest state). Payloads are open `$type`-discriminated JSON
//! objects owned by the platform engine; this crate knows the catalog of
//! valid types, their required parameters, builder functions for all of
//! them, and how to validate a Tasks array.

pub mod catalog;
pub mod effectors;
pub mod task;
pub mod triggers;
pub mod validate;

pub use catalog::{
    is_known_effect, is_known_trigger, required_params, LINKED_TASK_STATES, TRIGGER_CUBE_ONLY,
    VISIBLE_ONLY_TRIGGERS,
};
pub use task::{basic_interaction, quest_effector, quest_trigger};
pub use validate::validate_tasks;
