//! Continuous movement against the floor's collision query.

use glam::Vec2;

use crate::components::Body;
use crate::constants::KNOCKBACK_MIN_LENGTH;
use crate::grid::Grid;
use crate::player::Player;

/// Move a body by `delta`, or not at all if any corner would end up in a wall.
/// Returns the displacement actually applied.
pub fn move_body(body: &mut Body, grid: &Grid, delta: Vec2) -> Vec2 {
    let resolved = grid.resolve_collision(body.bounds(), delta);
    body.position += resolved;
    resolved
}

/// Apply one frame of player movement from the combined axis input
pub fn player_move(player: &mut Player, grid: &Grid, direction: Vec2, dt: f32) -> Vec2 {
    if !player.is_alive() {
        return Vec2::ZERO;
    }
    let delta = player.movement(direction, dt);
    move_body(&mut player.body, grid, delta)
}

/// Push a body `force` pixels directly away from `from`. Ignores walls.
pub fn apply_knockback(body: &mut Body, from: Vec2, force: f32) {
    let offset = body.position - from;
    let length = offset.length();
    if length > KNOCKBACK_MIN_LENGTH {
        body.position += offset / length * force;
    }
}
