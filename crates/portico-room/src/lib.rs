//! Room snapshot documents: format, settings, quests, load/save,
//! patching, and the full validator.

mod loader;
mod patcher;
pub mod quest;
mod report;
mod saver;
pub mod settings;
mod snapshot;
pub mod validator;

pub use loader::{load_raw, load_snapshot, load_snapshot_str};
pub use patcher::{apply_patch, dry_run, Patch, PatchSummary};
pub use quest::{create_quest_pair, generate_quest_id, Quest, QuestPair, QuestPairOptions};
pub use report::{Severity, ValidationReport, Violation};
pub use saver::{save_snapshot, save_snapshot_string};
pub use settings::{RoomSettings, SettingsExtraData};
pub use snapshot::{normalize_value, RoomTasks, Snapshot};
pub use validator::{validate_file, validate_value};
