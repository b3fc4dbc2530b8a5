//! Core types shared across the Portico workspace.

pub mod error;
pub mod id;
pub mod types;

pub use error::{PorticoError, Result};
pub use id::ItemId;
pub use types::{Color, Quat, Vec3};
