use glam::Vec2;
use noise::{NoiseFn, Perlin};

use crate::constants::*;
use crate::events::GameEvent;
use crate::player::SpellKind;

/// Follow camera. `target` is the world point at the center of the viewport.
pub struct Camera {
    pub target: Vec2,
    pub viewport_width: f32,
    pub viewport_height: f32,
    shake_time: f32,
    shake_intensity: f32,
    shake_clock: f64,
    noise: Perlin,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32, seed: u32) -> Self {
        Self {
            target: Vec2::ZERO,
            viewport_width,
            viewport_height,
            shake_time: 0.0,
            shake_intensity: 0.0,
            shake_clock: 0.0,
            noise: Perlin::new(seed),
        }
    }

    /// Jump straight to a point, used when entering a floor
    pub fn snap_to(&mut self, position: Vec2) {
        self.target = position;
    }

    /// Start a shake, replacing any shake in progress
    pub fn shake(&mut self, duration: f32, intensity: f32) {
        self.shake_time = duration;
        self.shake_intensity = intensity;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_time > 0.0
    }

    /// Count the shake down. Runs even while the simulation is frozen.
    pub fn tick_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            self.shake_clock += dt as f64;
        }
    }

    /// Ease toward the player, add shake, then keep the view inside the map
    pub fn follow(&mut self, player_position: Vec2, map_size: Vec2) {
        self.target += (player_position - self.target) * CAMERA_FOLLOW_LERP;

        if self.is_shaking() {
            let t = self.shake_clock * CAMERA_SHAKE_FREQUENCY;
            let dx = self.noise.get([t, 0.5]) as f32;
            let dy = self.noise.get([0.5, t + 100.0]) as f32;
            self.target += Vec2::new(dx, dy).clamp(Vec2::NEG_ONE, Vec2::ONE) * self.shake_intensity;
        }

        let half = Vec2::new(self.viewport_width, self.viewport_height) / 2.0;
        let max = (map_size - half).max(half);
        self.target = self.target.max(half).min(max);
    }

    /// World position of the viewport's top-left corner
    pub fn top_left(&self) -> Vec2 {
        self.target - Vec2::new(self.viewport_width, self.viewport_height) / 2.0
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.top_left()
    }

    /// Visible tile range as (min_x, max_x, min_y, max_y), padded by one tile
    pub fn visible_tiles(&self, tile_size: f32) -> (i32, i32, i32, i32) {
        let top_left = self.top_left();
        let min_x = (top_left.x / tile_size).floor() as i32 - 1;
        let max_x = ((top_left.x + self.viewport_width) / tile_size).ceil() as i32 + 1;
        let min_y = (top_left.y / tile_size).floor() as i32 - 1;
        let max_y = ((top_left.y + self.viewport_height) / tile_size).ceil() as i32 + 1;
        (min_x, max_x, min_y, max_y)
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        let (duration, intensity) = match event {
            GameEvent::MeleeLanded => MELEE_SHAKE,
            GameEvent::SpellCast { spell, .. } => match spell {
                SpellKind::Fireball => FIREBALL_SHAKE,
                SpellKind::ChainLightning => CHAIN_LIGHTNING_SHAKE,
                SpellKind::FrostNova => FROST_NOVA_SHAKE,
                SpellKind::Whirlwind => WHIRLWIND_SHAKE,
            },
            _ => return,
        };
        self.shake(duration, intensity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: Vec2 = Vec2::new(2560.0, 1600.0);

    #[test]
    fn test_follow_lerps_toward_player() {
        let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, 0);
        camera.snap_to(Vec2::new(1000.0, 800.0));
        camera.follow(Vec2::new(1100.0, 800.0), MAP);
        assert!((camera.target.x - 1010.0).abs() < 1e-3);
        assert_eq!(camera.target.y, 800.0);
    }

    #[test]
    fn test_follow_clamps_to_map() {
        let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, 0);
        camera.follow(Vec2::ZERO, MAP);
        assert_eq!(camera.target, Vec2::new(640.0, 400.0));
        camera.snap_to(Vec2::new(5000.0, 5000.0));
        camera.follow(Vec2::new(5000.0, 5000.0), MAP);
        assert_eq!(camera.target, Vec2::new(1920.0, 1200.0));
    }

    #[test]
    fn test_shake_stays_within_intensity() {
        let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, 7);
        let center = Vec2::new(1200.0, 800.0);
        for step in 0..20 {
            camera.snap_to(center);
            camera.shake(0.5, 5.0);
            camera.shake_clock = step as f64 * 0.013;
            camera.follow(center, MAP);
            let offset = camera.target - center;
            assert!(offset.x.abs() <= 5.0 + 1e-3 && offset.y.abs() <= 5.0 + 1e-3);
        }
    }

    #[test]
    fn test_shake_expires() {
        let mut camera = Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, 0);
        camera.handle_event(&GameEvent::MeleeLanded);
        assert!(camera.is_shaking());
        camera.tick_shake(0.11);
        assert!(!camera.is_shaking());
    }
}
