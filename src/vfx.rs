//! Visual effects: particles, floating damage numbers and spell effects.
//!
//! These are separate from game state - they're spawned from events,
//! animated, and removed without affecting game logic.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::constants::*;
use crate::events::{DamageSource, GameEvent};
use crate::player::SpellKind;
use crate::systems::items::ItemUseResult;
use crate::systems::loot::Sparkle;

/// Named colors used by effects, as linear RGB in `0..=1`
pub mod palette {
    use glam::Vec3;

    pub const RED: Vec3 = Vec3::new(0.9, 0.16, 0.22);
    pub const ORANGE: Vec3 = Vec3::new(1.0, 0.63, 0.0);
    pub const YELLOW: Vec3 = Vec3::new(0.99, 0.98, 0.0);
    pub const SKYBLUE: Vec3 = Vec3::new(0.4, 0.75, 1.0);
    pub const GREEN: Vec3 = Vec3::new(0.0, 0.89, 0.19);
    pub const TAME: Vec3 = Vec3::new(0.39, 1.0, 0.78);
    pub const WHITE: Vec3 = Vec3::ONE;
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec3,
    pub alpha: f32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Integrate one step; returns true while still alive
    fn update(&mut self, dt: f32) -> bool {
        self.life -= dt;
        self.position += self.velocity * dt;
        self.velocity.y += PARTICLE_GRAVITY * dt;
        self.velocity *= PARTICLE_FRICTION;
        self.alpha = (self.life / self.max_life).max(0.0);
        self.life > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct DamageNumber {
    pub position: Vec2,
    pub value: i32,
    pub color: Vec3,
    pub time_left: f32,
}

impl DamageNumber {
    pub fn alpha(&self) -> f32 {
        self.time_left.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectType {
    Fireball,
    FrostWave,
    ChainLightning { to: Vec2 },
    WhirlwindSpin,
    SpellCastReady,
    ShieldActivate,
}

impl EffectType {
    pub fn duration(&self) -> f32 {
        match self {
            EffectType::Fireball => FIREBALL_EFFECT_DURATION,
            EffectType::FrostWave => FROST_WAVE_EFFECT_DURATION,
            EffectType::ChainLightning { .. } => CHAIN_LIGHTNING_EFFECT_DURATION,
            EffectType::WhirlwindSpin => WHIRLWIND_EFFECT_DURATION,
            EffectType::SpellCastReady => SPELL_READY_EFFECT_DURATION,
            EffectType::ShieldActivate => SHIELD_EFFECT_DURATION,
        }
    }

    fn initial_size(&self) -> f32 {
        match self {
            EffectType::Fireball => 20.0,
            EffectType::FrostWave => 30.0,
            EffectType::ChainLightning { .. } => 5.0,
            EffectType::WhirlwindSpin | EffectType::ShieldActivate => 40.0,
            EffectType::SpellCastReady => 15.0,
        }
    }
}

/// A one-shot spell/item effect
#[derive(Debug, Clone)]
pub struct VisualEffect {
    pub position: Vec2,
    pub effect_type: EffectType,
    pub timer: f32,
    pub duration: f32,
    pub size: f32,
}

impl VisualEffect {
    pub fn new(position: Vec2, effect_type: EffectType) -> Self {
        let duration = effect_type.duration();
        Self {
            position,
            effect_type,
            timer: duration,
            duration,
            size: effect_type.initial_size(),
        }
    }

    /// Progress from 0.0 (just started) to 1.0 (finished)
    pub fn progress(&self) -> f32 {
        1.0 - (self.timer / self.duration)
    }

    /// Update the effect, returns true if still alive
    pub fn update(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        self.size += dt * SPELL_EFFECT_GROWTH;
        self.timer > 0.0
    }
}

/// Manager for all active visual effects
#[derive(Default)]
pub struct VfxManager {
    pub particles: Vec<Particle>,
    pub damage_numbers: Vec<DamageNumber>,
    pub effects: Vec<VisualEffect>,
}

fn radial(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

impl VfxManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Vec2, effect_type: EffectType) {
        self.effects.push(VisualEffect::new(position, effect_type));
    }

    pub fn add_explosion(&mut self, position: Vec2, color: Vec3, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let velocity = radial(rng.gen_range(0.0..std::f32::consts::TAU), rng.gen_range(50.0..150.0));
            let life = rng.gen_range(0.5..1.5);
            let size = rng.gen_range(3..=5) as f32;
            self.push_particle(position, velocity, color, life, size);
        }
    }

    pub fn add_blood(&mut self, position: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let velocity = radial(rng.gen_range(0.0..std::f32::consts::TAU), rng.gen_range(30.0..80.0));
            let color = Vec3::new(rng.gen_range(150..200) as f32 / 255.0, 0.0, 0.0);
            self.push_particle(position, velocity, color, 1.0, 2.0);
        }
    }

    pub fn add_magic(&mut self, position: Vec2, color: Vec3, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let velocity = radial(rng.gen_range(0.0..std::f32::consts::TAU), rng.gen_range(20.0..60.0));
            self.push_particle(position, velocity, color, 2.0, 1.5);
        }
    }

    pub fn add_heal(&mut self, position: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let velocity = radial(rng.gen_range(0.0..std::f32::consts::TAU), rng.gen_range(10.0..40.0));
            self.push_particle(position, velocity, palette::GREEN, 1.5, 1.0);
        }
    }

    fn push_particle(&mut self, position: Vec2, velocity: Vec2, color: Vec3, life: f32, size: f32) {
        self.particles.push(Particle {
            position,
            velocity,
            color,
            alpha: 1.0,
            life,
            max_life: life,
            size,
        });
    }

    pub fn add_damage_number(&mut self, position: Vec2, value: i32, color: Vec3) {
        self.damage_numbers.push(DamageNumber {
            position,
            value,
            color,
            time_left: DAMAGE_NUMBER_LIFETIME,
        });
    }

    /// Update all effects, removing finished ones
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
        self.damage_numbers.retain_mut(|n| {
            n.time_left -= dt;
            n.position.y -= DAMAGE_NUMBER_RISE_SPEED * dt;
            n.time_left > 0.0
        });
        self.effects.retain_mut(|effect| effect.update(dt));
    }

    /// Drop everything, used on floor change
    pub fn clear(&mut self) {
        self.particles.clear();
        self.damage_numbers.clear();
        self.effects.clear();
    }

    /// Handle a game event, spawning appropriate VFX
    pub fn handle_event(&mut self, event: &GameEvent, rng: &mut impl Rng) {
        match event {
            GameEvent::EnemyHit {
                position,
                damage,
                crit,
                source,
            } => match source {
                DamageSource::Melee => {
                    self.add_blood(*position, BLOOD_PARTICLES, rng);
                    let color = if *crit { palette::ORANGE } else { palette::RED };
                    self.add_damage_number(*position - Vec2::new(0.0, 10.0), *damage, color);
                }
                DamageSource::Spell(spell) => {
                    let label = *position - Vec2::new(0.0, 12.0);
                    match spell {
                        SpellKind::Fireball => {
                            self.add_magic(*position, palette::ORANGE, SPELL_MAGIC_PARTICLES, rng);
                            self.add_damage_number(label, *damage, palette::ORANGE);
                        }
                        SpellKind::ChainLightning => {
                            self.add_magic(*position, palette::YELLOW, SPELL_MAGIC_PARTICLES, rng);
                            self.add_damage_number(label, *damage, palette::YELLOW);
                        }
                        SpellKind::FrostNova => {
                            self.add_magic(*position, palette::SKYBLUE, FROST_MAGIC_PARTICLES, rng);
                            self.add_damage_number(label, *damage, palette::SKYBLUE);
                        }
                        SpellKind::Whirlwind => {
                            self.add_explosion(*position, palette::RED, WHIRLWIND_EXPLOSION_PARTICLES, rng);
                            self.add_damage_number(label, *damage, palette::RED);
                        }
                    }
                }
                DamageSource::Companion => {
                    self.add_damage_number(*position - Vec2::new(0.0, 10.0), *damage, palette::WHITE);
                }
            },
            GameEvent::EnemyKilled { position, xp, .. } => {
                self.add_explosion(*position, palette::ORANGE, DEATH_EXPLOSION_PARTICLES, rng);
                self.add_damage_number(*position + Vec2::new(15.0, -15.0), *xp as i32, palette::YELLOW);
            }
            GameEvent::SpellCast { spell, origin, chain } => match spell {
                SpellKind::Fireball => self.spawn(*origin, EffectType::Fireball),
                SpellKind::FrostNova => self.spawn(*origin, EffectType::FrostWave),
                SpellKind::Whirlwind => self.spawn(*origin, EffectType::WhirlwindSpin),
                SpellKind::ChainLightning => {
                    let mut from = *origin;
                    for to in chain {
                        self.spawn(from, EffectType::ChainLightning { to: *to });
                        from = *to;
                    }
                }
            },
            GameEvent::LootGranted {
                position,
                sparkle: Some(sparkle),
                ..
            } => match sparkle {
                Sparkle::Magic { color, count } => self.add_magic(*position, *color, *count, rng),
                Sparkle::Heal { count } => self.add_heal(*position, *count, rng),
            },
            GameEvent::ItemUsed { position, result, .. } if *result != ItemUseResult::NotFound => {
                self.spawn(*position, EffectType::SpellCastReady);
            }
            GameEvent::ShieldRaised { position } => self.spawn(*position, EffectType::ShieldActivate),
            GameEvent::CompanionTamed { position, .. } => {
                self.add_magic(*position, palette::TAME, TAME_MAGIC_PARTICLES, rng);
            }
            GameEvent::FloorEntered { .. } => self.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_particles_fade_and_expire() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut vfx = VfxManager::new();
        vfx.add_blood(Vec2::ZERO, 5, &mut rng);
        assert_eq!(vfx.particles.len(), 5);

        vfx.update(0.5);
        assert!(vfx.particles.iter().all(|p| (p.alpha - 0.5).abs() < 1e-4));

        vfx.update(0.6);
        assert!(vfx.particles.is_empty());
    }

    #[test]
    fn test_particles_fall_under_gravity() {
        let mut vfx = VfxManager::new();
        vfx.push_particle(Vec2::ZERO, Vec2::ZERO, palette::WHITE, 2.0, 1.0);
        vfx.update(0.1);
        vfx.update(0.1);
        assert!(vfx.particles[0].position.y > 0.0);
    }

    #[test]
    fn test_damage_numbers_rise_then_expire() {
        let mut vfx = VfxManager::new();
        vfx.add_damage_number(Vec2::new(0.0, 100.0), 12, palette::RED);
        vfx.update(0.5);
        assert_eq!(vfx.damage_numbers[0].position.y, 85.0);
        vfx.update(0.6);
        assert!(vfx.damage_numbers.is_empty());
    }

    #[test]
    fn test_melee_hit_spawns_blood_and_number() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut vfx = VfxManager::new();
        vfx.handle_event(
            &GameEvent::EnemyHit {
                position: Vec2::new(50.0, 50.0),
                damage: 45,
                crit: true,
                source: DamageSource::Melee,
            },
            &mut rng,
        );
        assert_eq!(vfx.particles.len(), BLOOD_PARTICLES);
        assert_eq!(vfx.damage_numbers[0].color, palette::ORANGE);
        assert_eq!(vfx.damage_numbers[0].position, Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_chain_lightning_spawns_one_segment_per_jump() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut vfx = VfxManager::new();
        vfx.handle_event(
            &GameEvent::SpellCast {
                spell: SpellKind::ChainLightning,
                origin: Vec2::ZERO,
                chain: vec![Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)],
            },
            &mut rng,
        );
        assert_eq!(vfx.effects.len(), 2);
        assert_eq!(vfx.effects[1].position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_effect_grows_and_expires() {
        let mut effect = VisualEffect::new(Vec2::ZERO, EffectType::Fireball);
        assert!(effect.update(0.5));
        assert_eq!(effect.size, 45.0);
        assert!(!effect.update(0.25));
    }
}
