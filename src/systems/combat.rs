//! Combat resolution: melee swings, spells, contact damage and kill rewards.
//!
//! The resolver mutates enemies and the player directly and reports every
//! visible consequence as a [`GameEvent`]; particles, shake and sound are
//! produced by the consumers of those events.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info};
use rand::Rng;

use crate::components::{Aabb, Body, Enemy, Vitals};
use crate::constants::*;
use crate::engine::game_state::RunStats;
use crate::events::{DamageSource, EventQueue, GameEvent};
use crate::player::{Player, SpellKind};
use crate::queries::live_enemies;
use crate::spawning::Archetype;
use crate::systems::experience::XpCurve;
use crate::systems::item_defs::Catalogs;
use crate::systems::loot::{self, LootDrop};
use crate::systems::movement::apply_knockback;

/// Chance and multiplier for critical hits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritProfile {
    pub chance: f32,
    pub multiplier: f32,
}

impl CritProfile {
    /// Fixed profile used by the melee resolver
    pub const MELEE: CritProfile = CritProfile {
        chance: MELEE_CRIT_CHANCE,
        multiplier: MELEE_CRIT_MULTIPLIER,
    };

    /// Profile taken from the player's own crit stats
    pub fn from_player(player: &Player) -> Self {
        Self {
            chance: player.crit_chance + player.weapon.crit_chance,
            multiplier: player.crit_multiplier,
        }
    }

    /// Roll once; the multiplied damage is truncated
    pub fn roll(&self, damage: i32, rng: &mut impl Rng) -> (i32, bool) {
        if rng.gen::<f32>() < self.chance {
            ((damage as f32 * self.multiplier) as i32, true)
        } else {
            (damage, false)
        }
    }
}

/// Result of pressing attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeleeOutcome {
    /// The swing happened (cooldown had elapsed)
    pub swung: bool,
    pub hits: usize,
    pub kills: usize,
}

/// Everything a combat pass may touch besides the enemy world
pub struct CombatResolver<'a, R: Rng> {
    pub player: &'a mut Player,
    pub stats: &'a mut RunStats,
    pub catalogs: &'a Catalogs,
    pub xp_curve: &'a XpCurve,
    pub crit: CritProfile,
    /// A boss kill may still recruit a companion this pass
    pub can_tame: bool,
    pub rng: &'a mut R,
    pub events: &'a mut EventQueue,
}

impl<'a, R: Rng> CombatResolver<'a, R> {
    /// Swing at everything inside the attack box.
    ///
    /// Crits are rolled per target. Survivors flash and are knocked back from
    /// the center of the hitbox.
    pub fn melee_attack(&mut self, world: &mut World) -> MeleeOutcome {
        puffin::profile_function!();

        if !self.player.is_alive() || !self.player.can_attack() {
            return MeleeOutcome::default();
        }

        let hitbox = self.player.attack_box();
        let center = hitbox.center();
        let base_damage = self.player.compute_attack_damage();
        let mut outcome = MeleeOutcome {
            swung: true,
            ..Default::default()
        };

        for (_, (body, vitals, enemy)) in world.query_mut::<(&mut Body, &mut Vitals, &mut Enemy)>() {
            if !vitals.is_alive() || !hitbox.overlaps(&body.bounds()) {
                continue;
            }
            let (damage, crit) = self.crit.roll(base_damage, self.rng);
            let hit = Hit {
                damage,
                crit,
                source: DamageSource::Melee,
                flash: HIT_FLASH_DURATION,
                knockback: Some((center, MELEE_KNOCKBACK)),
            };
            outcome.hits += 1;
            if self.land_hit(body, vitals, enemy, hit) {
                outcome.kills += 1;
            }
        }

        if outcome.hits > 0 {
            self.events.push(GameEvent::MeleeLanded);
        }
        self.player.attack();
        outcome
    }

    /// Cast a spell if it is unlocked and off cooldown. Returns the number of
    /// enemies hit, or `None` when the cast did not happen.
    pub fn cast(&mut self, world: &mut World, spell: SpellKind) -> Option<usize> {
        puffin::profile_function!();

        if !self.player.is_alive() || !self.player.can_cast(spell) {
            return None;
        }

        let hits = match spell {
            SpellKind::Fireball => self.cast_fireball(world),
            SpellKind::ChainLightning => self.cast_chain_lightning(world),
            SpellKind::FrostNova => self.cast_area(world, spell),
            SpellKind::Whirlwind => self.cast_area(world, spell),
        };
        self.player.cast(spell);
        debug!("{} hit {} enemies", spell.name(), hits);
        Some(hits)
    }

    fn cast_fireball(&mut self, world: &mut World) -> usize {
        let hitbox = self.player.attack_box();
        let damage = self.player.compute_attack_damage() + FIREBALL_DAMAGE_BONUS;
        let mut hits = 0;

        for (_, (body, vitals, enemy)) in world.query_mut::<(&mut Body, &mut Vitals, &mut Enemy)>() {
            if !vitals.is_alive() || !hitbox.overlaps(&body.bounds()) {
                continue;
            }
            hits += 1;
            self.land_hit(body, vitals, enemy, Hit::spell(SpellKind::Fireball, damage, FIREBALL_HIT_FLASH));
        }

        self.events.push(GameEvent::SpellCast {
            spell: SpellKind::Fireball,
            origin: hitbox.center(),
            chain: Vec::new(),
        });
        hits
    }

    /// Jump from the player's center to the nearest unhit enemy, up to the
    /// target limit. Each jump continues from just inside the last target.
    fn cast_chain_lightning(&mut self, world: &mut World) -> usize {
        let origin = self.player.position() + Vec2::splat(CENTER_OFFSET);
        let damage = self.player.compute_attack_damage() + CHAIN_LIGHTNING_DAMAGE_BONUS;

        let mut available = live_enemies(world);

        let mut current = origin;
        let mut chain = Vec::new();
        for _ in 0..CHAIN_LIGHTNING_MAX_TARGETS {
            let nearest = available
                .iter()
                .enumerate()
                .map(|(index, (_, position))| {
                    let center = *position + Vec2::splat(CENTER_OFFSET);
                    (index, center.distance_squared(current))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((index, _)) = nearest else {
                break;
            };
            let (entity, _) = available.remove(index);

            let Ok((body, vitals, enemy)) = world.query_one_mut::<(&mut Body, &mut Vitals, &mut Enemy)>(entity) else {
                continue;
            };
            chain.push(body.position + Vec2::splat(CENTER_OFFSET));
            current = body.position + Vec2::splat(CHAIN_LIGHTNING_JUMP_OFFSET);
            self.land_hit(
                body,
                vitals,
                enemy,
                Hit::spell(SpellKind::ChainLightning, damage, CHAIN_LIGHTNING_HIT_FLASH),
            );
        }

        let hits = chain.len();
        self.events.push(GameEvent::SpellCast {
            spell: SpellKind::ChainLightning,
            origin,
            chain,
        });
        hits
    }

    /// Frost Nova and Whirlwind: everything whose center lies within the
    /// radius of the player's center, pushed away from the player's position.
    fn cast_area(&mut self, world: &mut World, spell: SpellKind) -> usize {
        let (radius, bonus, flash, force) = match spell {
            SpellKind::FrostNova => (
                FROST_NOVA_RADIUS,
                FROST_NOVA_DAMAGE_BONUS,
                FROST_NOVA_HIT_FLASH,
                FROST_NOVA_KNOCKBACK,
            ),
            _ => (
                WHIRLWIND_RADIUS,
                WHIRLWIND_DAMAGE_BONUS,
                WHIRLWIND_HIT_FLASH,
                WHIRLWIND_KNOCKBACK,
            ),
        };
        let position = self.player.position();
        let center = position + Vec2::splat(CENTER_OFFSET);
        let damage = self.player.compute_attack_damage() + bonus;
        let mut hits = 0;

        for (_, (body, vitals, enemy)) in world.query_mut::<(&mut Body, &mut Vitals, &mut Enemy)>() {
            if !vitals.is_alive() {
                continue;
            }
            let enemy_center = body.position + Vec2::splat(CENTER_OFFSET);
            if enemy_center.distance_squared(center) > radius * radius {
                continue;
            }
            hits += 1;
            let hit = Hit {
                knockback: Some((position, force)),
                ..Hit::spell(spell, damage, flash)
            };
            self.land_hit(body, vitals, enemy, hit);
        }

        self.events.push(GameEvent::SpellCast {
            spell,
            origin: center,
            chain: Vec::new(),
        });
        hits
    }

    /// Apply a companion's strike to one enemy. Returns true on a kill.
    pub fn companion_strike(&mut self, world: &mut World, target: Entity, damage: i32) -> bool {
        let Ok((body, vitals, enemy)) = world.query_one_mut::<(&mut Body, &mut Vitals, &mut Enemy)>(target) else {
            return false;
        };
        if !vitals.is_alive() {
            return false;
        }
        let hit = Hit {
            damage,
            crit: false,
            source: DamageSource::Companion,
            flash: HIT_FLASH_DURATION,
            knockback: None,
        };
        self.land_hit(body, vitals, enemy, hit)
    }

    /// Apply one hit. Returns true if it killed the enemy.
    fn land_hit(&mut self, body: &mut Body, vitals: &mut Vitals, enemy: &mut Enemy, hit: Hit) -> bool {
        let dealt = vitals.take_damage(hit.damage);
        self.stats.damage_dealt += dealt as u64;

        if vitals.is_alive() {
            enemy.flash_hit(hit.flash);
            if let Some((from, force)) = hit.knockback {
                apply_knockback(body, from, force);
            }
        }

        self.events.push(GameEvent::EnemyHit {
            position: body.position,
            damage: hit.damage,
            crit: hit.crit,
            source: hit.source,
        });

        if vitals.is_alive() {
            return false;
        }
        self.reward_kill(enemy.archetype, vitals.level, body.position);
        true
    }

    /// XP, score, kill count, loot and the taming check for one kill
    pub fn reward_kill(&mut self, archetype: Archetype, level: u32, position: Vec2) {
        let xp = level * XP_PER_ENEMY_LEVEL;
        let score = level * SCORE_PER_ENEMY_LEVEL;

        self.stats.score += score;
        self.stats.enemies_killed += 1;
        self.events.push(GameEvent::EnemyKilled {
            archetype,
            position,
            xp,
            score,
        });
        debug!("{} (level {}) slain for {} xp", archetype.name(), level, xp);

        if let Some(level_up) = self.player.gain_experience(xp, self.xp_curve) {
            self.events.push(GameEvent::LevelUp {
                new_level: level_up.new_level,
                unlocked_spell: level_up.unlocked_spell,
            });
        }

        if let Some(drop) = loot::roll_primary(self.rng) {
            self.grant(drop, position);
        }
        for drop in loot::roll_secondary(archetype, self.stats.enemies_killed, self.rng) {
            self.grant(drop, position);
        }

        self.try_tame(archetype, position);
    }

    fn grant(&mut self, drop: LootDrop, position: Vec2) {
        let name = self.catalogs.item_name(drop.kind);
        let stored = self.player.add_item(name, drop.quantity);
        if !stored {
            debug!("Inventory full, {} lost", name);
        }
        self.events.push(GameEvent::LootGranted {
            position,
            name,
            quantity: drop.quantity,
            sparkle: drop.sparkle,
            stored,
        });
    }

    fn try_tame(&mut self, archetype: Archetype, position: Vec2) {
        if !archetype.is_boss() || !self.can_tame || self.player.level() < TAME_MIN_PLAYER_LEVEL {
            return;
        }
        if self.rng.gen_range(1..=100) <= TAME_CHANCE_PERCENT {
            self.can_tame = false;
            info!("{} has been tamed", archetype.name());
            self.events.push(GameEvent::CompanionTamed {
                position,
                level: self.player.level(),
            });
        }
    }
}

/// One hit's parameters
#[derive(Debug, Clone, Copy)]
struct Hit {
    damage: i32,
    crit: bool,
    source: DamageSource,
    flash: f32,
    knockback: Option<(Vec2, f32)>,
}

impl Hit {
    fn spell(spell: SpellKind, damage: i32, flash: f32) -> Self {
        Self {
            damage,
            crit: false,
            source: DamageSource::Spell(spell),
            flash,
            knockback: None,
        }
    }
}

/// Every live enemy touching the player deals its contact damage.
/// Returns the total damage taken.
pub fn apply_contact_damage(world: &World, player: &mut Player, events: &mut EventQueue) -> i32 {
    puffin::profile_function!();

    let player_bounds: Aabb = player.body.bounds();
    let mut total = 0;
    for (_, (body, vitals, enemy)) in world.query::<(&Body, &Vitals, &Enemy)>().iter() {
        if !vitals.is_alive() || !player.is_alive() {
            continue;
        }
        if body.bounds().overlaps(&player_bounds) {
            let dealt = player.vitals.take_damage(enemy.contact_damage());
            total += dealt;
            events.push(GameEvent::PlayerHurt {
                damage: dealt,
                attacker: enemy.archetype,
            });
        }
    }
    total
}

/// Despawn every dead enemy. Their death effects have already fired.
pub fn remove_dead(world: &mut World) -> usize {
    let dead: Vec<Entity> = world
        .query::<&Vitals>()
        .with::<&Enemy>()
        .iter()
        .filter(|(_, vitals)| !vitals.is_alive())
        .map(|(entity, _)| entity)
        .collect();
    for entity in &dead {
        let _ = world.despawn(*entity);
    }
    dead.len()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub time: f32,
    pub text: String,
}

/// Bounded history of notable combat events, newest last
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new(COMBAT_LOG_CAPACITY)
    }
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, time: f32, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            time,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn handle_event(&mut self, event: &GameEvent, time: f32) {
        let text = match event {
            GameEvent::EnemyHit {
                damage,
                crit: true,
                source,
                ..
            } => format!("Critical {:?} hit for {}", source, damage),
            GameEvent::EnemyHit { damage, source, .. } => format!("{:?} hit for {}", source, damage),
            GameEvent::EnemyKilled { archetype, xp, .. } => format!("Slew {} (+{} XP)", archetype.name(), xp),
            GameEvent::LevelUp {
                new_level,
                unlocked_spell: Some(spell),
            } => format!("Reached level {}, learned {}", new_level, spell.name()),
            GameEvent::LevelUp { new_level, .. } => format!("Reached level {}", new_level),
            GameEvent::LootGranted {
                name,
                quantity,
                stored: true,
                ..
            } => format!("Picked up {} x{}", name, quantity),
            GameEvent::CompanionTamed { .. } => "The Fallen Shadow Paladin joins you".to_string(),
            _ => return,
        };
        self.record(time, text);
    }
}
