//! Item effect and loot constants.

pub const HEALTH_POTION_HEAL: i32 = 75;
pub const HOLY_WATER_OF_LIFE_HEAL: i32 = 500;
pub const SPEED_POTION_DURATION: f32 = 8.0;
pub const STEALTH_POTION_DURATION: f32 = 6.0;
pub const RAGE_POTION_DURATION: f32 = 10.0;

/// Essence stones dropped on every kill (inclusive range)
pub const ESSENCE_STONE_DROP: (u32, u32) = (1, 5);
/// Orbs dropped by the heavy-currency bucket (inclusive range)
pub const ORB_DROP: (u32, u32) = (1, 3);
/// Food stacks dropped per food roll (inclusive range)
pub const FOOD_DROP: (u32, u32) = (1, 3);
/// Orbs bundled with the boss weapon drop
pub const BOSS_ORB_BUNDLE: u32 = 3;
/// The Venom Sword drops when the kill counter is a multiple of this
pub const VENOM_SWORD_KILL_INTERVAL: u32 = 10;
