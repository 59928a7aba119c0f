//! The tamed companion: follows the player and picks off nearby enemies.

use glam::Vec2;
use hecs::{Entity, World};
use log::info;

use crate::components::{Body, Vitals};
use crate::constants::*;
use crate::queries::nearest_live_enemy;
use crate::spawning::Archetype;

#[derive(Debug, Clone)]
pub struct Companion {
    pub archetype: Archetype,
    pub body: Body,
    pub vitals: Vitals,
    pub attack_damage: i32,
    pub attack_cooldown: f32,
    pub time_since_attack: f32,
    /// Ignores all damage
    pub invulnerable: bool,
}

impl Companion {
    /// Build the companion for a tamed archetype at the player's level
    pub fn tamed(archetype: Archetype, player_level: u32, position: Vec2) -> Self {
        let level = player_level as i32;
        let (health, damage, cooldown, invulnerable) = match archetype {
            Archetype::FallenShadowPaladin => (
                COMPANION_BASE_HEALTH + level * PALADIN_COMPANION_HEALTH_PER_LEVEL,
                PALADIN_COMPANION_BASE_DAMAGE + level * PALADIN_COMPANION_DAMAGE_PER_LEVEL,
                PALADIN_COMPANION_ATTACK_COOLDOWN,
                true,
            ),
            _ => (
                COMPANION_BASE_HEALTH,
                COMPANION_BASE_DAMAGE,
                COMPANION_ATTACK_COOLDOWN,
                false,
            ),
        };
        Self {
            archetype,
            body: Body::new(position, ENEMY_SIZE),
            vitals: Vitals::new(health, player_level),
            attack_damage: damage,
            attack_cooldown: cooldown,
            time_since_attack: 0.0,
            invulnerable,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.archetype {
            Archetype::FallenShadowPaladin => "Shadow Paladin",
            other => other.name(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn take_damage(&mut self, damage: i32) -> i32 {
        if self.invulnerable {
            return 0;
        }
        self.vitals.take_damage(damage)
    }

    /// Drift toward the follow point beside the player
    pub fn follow(&mut self, player_position: Vec2, dt: f32) {
        let anchor = player_position + Vec2::new(COMPANION_FOLLOW_OFFSET, 0.0);
        let offset = anchor - self.body.position;
        let distance = offset.length();
        if distance > COMPANION_FOLLOW_SLACK {
            self.body.position += offset / distance * COMPANION_FOLLOW_SPEED * dt;
        }
    }
}

/// Owns the single companion slot
#[derive(Debug, Default)]
pub struct CompanionSystem {
    companion: Option<Companion>,
    tamed_this_run: bool,
}

impl CompanionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn companion(&self) -> Option<&Companion> {
        self.companion.as_ref()
    }

    pub fn has_companion(&self) -> bool {
        self.companion.is_some()
    }

    /// A boss kill may recruit only while the slot is empty and nothing has
    /// been tamed yet this run
    pub fn can_tame(&self) -> bool {
        self.companion.is_none() && !self.tamed_this_run
    }

    pub fn tame(&mut self, archetype: Archetype, player_level: u32, position: Vec2) -> bool {
        if !self.can_tame() {
            return false;
        }
        let companion = Companion::tamed(archetype, player_level, position);
        info!("Tamed {}!", companion.name());
        self.companion = Some(companion);
        self.tamed_this_run = true;
        true
    }

    pub fn release(&mut self) {
        if let Some(companion) = self.companion.take() {
            info!("{} released", companion.name());
        }
    }

    /// Carry the companion along to a new floor
    pub fn relocate(&mut self, position: Vec2) {
        if let Some(companion) = self.companion.as_mut() {
            companion.body.position = position;
        }
    }

    /// Start over for a new run
    pub fn reset(&mut self) {
        self.companion = None;
        self.tamed_this_run = false;
    }

    /// Follow the player and pick a target.
    ///
    /// Returns the enemy to strike and the damage when the attack cooldown
    /// has elapsed and a live enemy is within reach.
    pub fn update(&mut self, world: &World, player_position: Vec2, dt: f32) -> Option<(Entity, i32)> {
        let companion = self.companion.as_mut()?;
        if !companion.is_alive() {
            self.companion = None;
            return None;
        }

        companion.time_since_attack += dt;
        companion.follow(player_position, dt);

        if companion.time_since_attack < companion.attack_cooldown {
            return None;
        }

        let target = nearest_live_enemy(world, companion.body.position, COMPANION_ATTACK_RANGE)?;

        companion.time_since_attack = 0.0;
        Some((target, companion.attack_damage))
    }
}
