//! Particle, damage number and spell effect constants.

/// Downward acceleration applied to particles (pixels/s²)
pub const PARTICLE_GRAVITY: f32 = 100.0;
/// Per-frame velocity retention
pub const PARTICLE_FRICTION: f32 = 0.98;

/// Lifetime of a floating damage number in seconds
pub const DAMAGE_NUMBER_LIFETIME: f32 = 1.0;
/// Rise speed of a floating damage number (pixels/s)
pub const DAMAGE_NUMBER_RISE_SPEED: f32 = 30.0;

// Particle counts per event
pub const BLOOD_PARTICLES: usize = 5;
pub const DEATH_EXPLOSION_PARTICLES: usize = 10;
pub const SPELL_MAGIC_PARTICLES: usize = 10;
pub const FROST_MAGIC_PARTICLES: usize = 8;
pub const WHIRLWIND_EXPLOSION_PARTICLES: usize = 8;
pub const TAME_MAGIC_PARTICLES: usize = 20;
pub const LEGENDARY_MAGIC_PARTICLES: usize = 12;
pub const EPIC_MAGIC_PARTICLES: usize = 10;
pub const WEAPON_MAGIC_PARTICLES: usize = 8;
pub const FOOD_HEAL_PARTICLES: usize = 5;

// Spell effect durations
pub const FIREBALL_EFFECT_DURATION: f32 = 0.6;
pub const FROST_WAVE_EFFECT_DURATION: f32 = 0.8;
pub const CHAIN_LIGHTNING_EFFECT_DURATION: f32 = 0.4;
pub const WHIRLWIND_EFFECT_DURATION: f32 = 1.0;
pub const SPELL_READY_EFFECT_DURATION: f32 = 0.5;
pub const SHIELD_EFFECT_DURATION: f32 = 1.0;

/// Sparkle burst when the Venom Sword drops
pub const VENOM_DROP_PARTICLES: usize = 15;

/// Sparkle burst for the Shadow Paladin's guaranteed drops
pub const BOSS_DROP_PARTICLES: usize = 20;

/// Spell effects grow by this many pixels per second
pub const SPELL_EFFECT_GROWTH: f32 = 50.0;
