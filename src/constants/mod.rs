//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod abilities;
mod camera;
mod combat;
mod dungeon;
mod effects;
mod enemies;
mod gameplay;
mod items;

pub use abilities::*;
pub use camera::*;
pub use combat::*;
pub use dungeon::*;
pub use effects::*;
pub use enemies::*;
pub use gameplay::*;
pub use items::*;
