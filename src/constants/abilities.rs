//! Spell constants: unlock levels, cooldowns, damage bonuses and areas.

// Firebolt
/// Level at which Firebolt is unlocked
pub const FIREBALL_UNLOCK_LEVEL: u32 = 5;
pub const FIREBALL_COOLDOWN: f32 = 2.0;
/// Flat bonus over the player's attack damage
pub const FIREBALL_DAMAGE_BONUS: i32 = 15;
pub const FIREBALL_HIT_FLASH: f32 = 0.15;

// Chain Lightning
pub const CHAIN_LIGHTNING_UNLOCK_LEVEL: u32 = 10;
pub const CHAIN_LIGHTNING_COOLDOWN: f32 = 6.0;
pub const CHAIN_LIGHTNING_DAMAGE_BONUS: i32 = 12;
/// Maximum number of enemies one cast can jump through
pub const CHAIN_LIGHTNING_MAX_TARGETS: usize = 3;
pub const CHAIN_LIGHTNING_HIT_FLASH: f32 = 0.1;
/// Offset from an enemy's position to the point the next jump starts from
pub const CHAIN_LIGHTNING_JUMP_OFFSET: f32 = 8.0;

// Frost Nova
pub const FROST_NOVA_UNLOCK_LEVEL: u32 = 15;
pub const FROST_NOVA_COOLDOWN: f32 = 8.0;
pub const FROST_NOVA_DAMAGE_BONUS: i32 = 10;
pub const FROST_NOVA_RADIUS: f32 = 120.0;
pub const FROST_NOVA_KNOCKBACK: f32 = 15.0;
pub const FROST_NOVA_HIT_FLASH: f32 = 0.2;

// Whirlwind
pub const WHIRLWIND_UNLOCK_LEVEL: u32 = 20;
pub const WHIRLWIND_COOLDOWN: f32 = 10.0;
pub const WHIRLWIND_DAMAGE_BONUS: i32 = 20;
pub const WHIRLWIND_RADIUS: f32 = 80.0;
pub const WHIRLWIND_KNOCKBACK: f32 = 25.0;
pub const WHIRLWIND_HIT_FLASH: f32 = 0.1;
