//! Combat constants for melee, crits, knockback and contact damage.

/// Width of the player's melee hitbox
pub const ATTACK_BOX_WIDTH: f32 = 84.0;
/// Height of the player's melee hitbox
pub const ATTACK_BOX_HEIGHT: f32 = 72.0;
/// Offset from a character's position to its visual center
pub const CENTER_OFFSET: f32 = 16.0;

/// Crit chance used by the main-loop melee resolver
pub const MELEE_CRIT_CHANCE: f32 = 0.15;
/// Crit multiplier used by the main-loop melee resolver
pub const MELEE_CRIT_MULTIPLIER: f32 = 1.8;

/// Knockback applied to survivors of a melee swing
pub const MELEE_KNOCKBACK: f32 = 20.0;
/// Knockback vectors shorter than this are ignored
pub const KNOCKBACK_MIN_LENGTH: f32 = 0.001;
/// Default hit flash duration in seconds
pub const HIT_FLASH_DURATION: f32 = 0.1;
/// How long the melee hitbox stays highlighted after a swing
pub const ATTACK_FLASH_DURATION: f32 = 0.2;

/// Contact damage is enemy attack damage divided by this (minimum 1)
pub const CONTACT_DAMAGE_DIVISOR: i32 = 50;

/// XP per enemy level on kill
pub const XP_PER_ENEMY_LEVEL: u32 = 25;
/// Score per enemy level on kill
pub const SCORE_PER_ENEMY_LEVEL: u32 = 100;

// Taming
/// Minimum player level before a boss can be tamed
pub const TAME_MIN_PLAYER_LEVEL: u32 = 35;
/// Tame succeeds when a 1-100 roll is at or below this
pub const TAME_CHANCE_PERCENT: u32 = 30;

/// Maximum number of entries kept in the combat log
pub const COMBAT_LOG_CAPACITY: usize = 50;
