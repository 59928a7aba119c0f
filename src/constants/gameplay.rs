//! Core gameplay constants (player stats, leveling, buffs).

/// Player's starting health
pub const PLAYER_BASE_HEALTH: i32 = 150;
/// Player's base attack damage before weapon and level scaling
pub const PLAYER_BASE_DAMAGE: i32 = 35;
/// Player movement speed in pixels per second
pub const PLAYER_BASE_SPEED: f32 = 200.0;
/// Seconds between melee swings
pub const PLAYER_ATTACK_COOLDOWN: f32 = 0.25;
pub const PLAYER_CRIT_CHANCE: f32 = 0.12;
pub const PLAYER_CRIT_MULTIPLIER: f32 = 1.8;
/// Player collision box edge length
pub const PLAYER_SIZE: f32 = 32.0;
pub const PLAYER_DEFAULT_NAME: &str = "Hero";

// Leveling
pub const HEALTH_PER_LEVEL: i32 = 35;
pub const DAMAGE_PER_LEVEL: i32 = 6;
pub const SPEED_PER_LEVEL: f32 = 3.0;
/// XP required to go from level 1 to level 2
pub const EXP_FOR_LEVEL_2: u32 = 100;
/// Growth factor applied to the XP requirement per level
pub const EXP_SCALING: f32 = 1.0;

// Buffs
pub const SPEED_BUFF_MULTIPLIER: f32 = 1.5;
pub const RAGE_DAMAGE_MULTIPLIER: f32 = 1.3;
/// Shield Pendant barrier duration in seconds
pub const SHIELD_DURATION: f32 = 5.0;

/// Number of distinct item stacks the player can carry
pub const INVENTORY_CAPACITY: usize = 24;

// Session
/// Default save location, relative to the working directory
pub const SAVE_FILE_PATH: &str = "saves/savegame.json";
/// The previous save is copied here before every overwrite
pub const SAVE_BACKUP_PATH: &str = "saves/savegame_backup.json";
/// Simulation step used by the headless shell (60 Hz)
pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;
/// Frames the headless shell runs when the config does not say otherwise
pub const DEFAULT_HEADLESS_FRAMES: u64 = 3600;
