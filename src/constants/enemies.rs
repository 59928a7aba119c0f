//! Enemy AI and spawning constants.

/// Chasing enemies give up once the target is farther than aggro range times this
pub const AGGRO_LEASH_FACTOR: f32 = 1.5;
/// Default enemy attack cooldown in seconds
pub const DEFAULT_ENEMY_ATTACK_COOLDOWN: f32 = 2.5;
/// Enemy collision box edge length
pub const ENEMY_SIZE: f32 = 32.0;

/// Dash, swoop and teleport only trigger within this distance of the target
pub const GAP_CLOSER_RANGE: f32 = 200.0;
/// Distance behind the target a teleporter lands
pub const TELEPORT_BEHIND_DISTANCE: f32 = 30.0;
/// Flat bonus added to a swoop hit
pub const SWOOP_DAMAGE_BONUS: i32 = 10;

/// Bat bob phase speed (radians per second)
pub const BAT_BOB_SPEED: f32 = 3.0;
/// Bat bob amplitude per frame
pub const BAT_BOB_AMPLITUDE: f32 = 2.0;

// Encounter director
/// Seconds between spawn waves
pub const ENEMY_SPAWN_INTERVAL: f32 = 6.0;
/// Live enemy cap before player level scaling
pub const BASE_MAX_ENEMIES: u32 = 3;
/// Hard upper bound on live enemies
pub const MAX_ENEMY_CAP: u32 = 8;
/// Enemies spawned per wave at most
pub const SPAWN_WAVE_SIZE: u32 = 2;

// Tier unlock levels
pub const TIER_C_UNLOCK_LEVEL: u32 = 10;
pub const TIER_B_UNLOCK_LEVEL: u32 = 20;
pub const TIER_A_UNLOCK_LEVEL: u32 = 30;
pub const TIER_S_UNLOCK_LEVEL: u32 = 40;
/// Level from which the boss can override a spawn roll
pub const BOSS_OVERRIDE_LEVEL: u32 = 15;
/// Boss override succeeds when a 1-100 roll is at or below this
pub const BOSS_OVERRIDE_PERCENT: u32 = 5;

// Companion
pub const COMPANION_BASE_HEALTH: i32 = 150;
pub const COMPANION_BASE_DAMAGE: i32 = 25;
pub const COMPANION_ATTACK_COOLDOWN: f32 = 2.0;
/// Horizontal offset from the player the companion tries to hold
pub const COMPANION_FOLLOW_OFFSET: f32 = -50.0;
pub const COMPANION_FOLLOW_SPEED: f32 = 100.0;
/// Companion stops moving when this close to its follow point
pub const COMPANION_FOLLOW_SLACK: f32 = 5.0;
/// Companion only strikes enemies within this distance
pub const COMPANION_ATTACK_RANGE: f32 = 60.0;
/// Tamed Shadow Paladin: health is base plus this per level
pub const PALADIN_COMPANION_HEALTH_PER_LEVEL: i32 = 10;
pub const PALADIN_COMPANION_BASE_DAMAGE: i32 = 30;
pub const PALADIN_COMPANION_DAMAGE_PER_LEVEL: i32 = 2;
pub const PALADIN_COMPANION_ATTACK_COOLDOWN: f32 = 2.5;
