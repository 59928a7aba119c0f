//! Common enemy query helpers.
//!
//! Read-only lookups over the live enemy set shared by spawning, combat and
//! the companion.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Body, Enemy, Vitals};

/// Number of enemies still alive
pub fn live_enemy_count(world: &World) -> usize {
    world
        .query::<&Vitals>()
        .with::<&Enemy>()
        .iter()
        .filter(|(_, vitals)| vitals.is_alive())
        .count()
}

/// Every live enemy with its top-left position, in world iteration order
pub fn live_enemies(world: &World) -> Vec<(Entity, Vec2)> {
    world
        .query::<(&Body, &Vitals)>()
        .with::<&Enemy>()
        .iter()
        .filter(|(_, (_, vitals))| vitals.is_alive())
        .map(|(entity, (body, _))| (entity, body.position))
        .collect()
}

/// Closest live enemy whose position lies within `max_range` of `origin`
pub fn nearest_live_enemy(world: &World, origin: Vec2, max_range: f32) -> Option<Entity> {
    live_enemies(world)
        .into_iter()
        .map(|(entity, position)| (entity, position.distance(origin)))
        .filter(|(_, distance)| *distance <= max_range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}
