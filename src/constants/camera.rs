//! Camera tracking and shake constants.

/// Fraction of the remaining distance covered each frame while following the player
pub const CAMERA_FOLLOW_LERP: f32 = 0.1;
/// Default viewport width in pixels
pub const VIEWPORT_WIDTH: f32 = 1280.0;
/// Default viewport height in pixels
pub const VIEWPORT_HEIGHT: f32 = 800.0;
/// How fast the shake noise field is sampled (noise units per second)
pub const CAMERA_SHAKE_FREQUENCY: f64 = 25.0;

// Shake signatures (duration seconds, intensity pixels)
pub const MELEE_SHAKE: (f32, f32) = (0.1, 5.0);
pub const FIREBALL_SHAKE: (f32, f32) = (0.08, 4.0);
pub const CHAIN_LIGHTNING_SHAKE: (f32, f32) = (0.1, 5.0);
pub const FROST_NOVA_SHAKE: (f32, f32) = (0.12, 6.0);
pub const WHIRLWIND_SHAKE: (f32, f32) = (0.15, 8.0);
