//! Game systems organized by domain.
//!
//! This module contains all game logic systems, split into focused submodules:
//! - `ai`: enemy state machines and behavior overrides
//! - `combat`: melee, spells, contact damage, kill rewards and the combat log
//! - `experience`: XP curve and leveling
//! - `inventory`: inventory screen state and potion summaries
//! - `item_defs`: item, potion and weapon catalogs
//! - `items`: name-keyed item effects
//! - `loot`: drop tables
//! - `movement`: collision-resolved movement and knockback

pub mod ai;
pub mod combat;
pub mod experience;
pub mod inventory;
pub mod item_defs;
pub mod items;
pub mod loot;
pub mod movement;
