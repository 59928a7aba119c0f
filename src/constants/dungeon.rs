//! Dungeon generation constants.

/// Map width in tiles
pub const MAP_WIDTH: usize = 80;
/// Map height in tiles
pub const MAP_HEIGHT: usize = 50;
/// Tile edge length in world pixels
pub const TILE_SIZE: f32 = 32.0;

/// Room count lower bound is this plus the floor number
pub const ROOM_COUNT_BASE_MIN: u32 = 8;
/// Room count upper bound is this plus twice the floor number
pub const ROOM_COUNT_BASE_MAX: u32 = 12;
pub const ROOM_MIN_WIDTH: i32 = 5;
pub const ROOM_MAX_WIDTH: i32 = 12;
pub const ROOM_MIN_HEIGHT: i32 = 5;
pub const ROOM_MAX_HEIGHT: i32 = 10;

/// Probability that a given interior room corner gets a decoration
pub const DECORATION_CHANCE: f64 = 0.5;
/// Corridors carve this many tiles on each side of the center line
pub const CORRIDOR_HALF_WIDTH: i32 = 1;

/// Spawn point used when a floor has no rooms
pub const FALLBACK_SPAWN: (f32, f32) = (100.0, 100.0);
/// Player levels per floor before the next floor is generated
pub const LEVELS_PER_FLOOR: u32 = 5;
