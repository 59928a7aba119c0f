//! The player character: stats, spells, buffs, inventory and equipment.
//!
//! The player lives outside the ECS world and is owned by the game state;
//! enemies only refer to it through [`Target::Player`](crate::components::Target).

use glam::Vec2;
use log::info;

use crate::components::{Aabb, Body, Inventory, Vitals};
use crate::constants::*;
use crate::systems::experience::{self, XpCurve};
use crate::systems::item_defs::{Catalogs, ItemKind, WeaponDef};
use crate::systems::items::{self, ItemUseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpellKind {
    Fireball,
    ChainLightning,
    FrostNova,
    Whirlwind,
}

impl SpellKind {
    pub const ALL: [SpellKind; 4] = [
        SpellKind::Fireball,
        SpellKind::ChainLightning,
        SpellKind::FrostNova,
        SpellKind::Whirlwind,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpellKind::Fireball => "Firebolt",
            SpellKind::ChainLightning => "Chain Lightning",
            SpellKind::FrostNova => "Frost Nova",
            SpellKind::Whirlwind => "Whirlwind",
        }
    }

    pub fn cooldown(&self) -> f32 {
        match self {
            SpellKind::Fireball => FIREBALL_COOLDOWN,
            SpellKind::ChainLightning => CHAIN_LIGHTNING_COOLDOWN,
            SpellKind::FrostNova => FROST_NOVA_COOLDOWN,
            SpellKind::Whirlwind => WHIRLWIND_COOLDOWN,
        }
    }

    pub fn unlock_level(&self) -> u32 {
        match self {
            SpellKind::Fireball => FIREBALL_UNLOCK_LEVEL,
            SpellKind::ChainLightning => CHAIN_LIGHTNING_UNLOCK_LEVEL,
            SpellKind::FrostNova => FROST_NOVA_UNLOCK_LEVEL,
            SpellKind::Whirlwind => WHIRLWIND_UNLOCK_LEVEL,
        }
    }

    /// The spell unlocked on reaching exactly this level, if any
    pub fn unlocked_at(level: u32) -> Option<SpellKind> {
        Self::ALL.into_iter().find(|spell| spell.unlock_level() == level)
    }
}

/// An unlocked spell and its cooldown timer (counts up)
#[derive(Debug, Clone, PartialEq)]
pub struct Spell {
    pub kind: SpellKind,
    pub cooldown: f32,
    pub since_cast: f32,
    pub mana_cost: u32,
}

impl Spell {
    /// New spells start ready to cast
    pub fn new(kind: SpellKind) -> Self {
        Self {
            kind,
            cooldown: kind.cooldown(),
            since_cast: kind.cooldown(),
            mana_cost: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.since_cast >= self.cooldown
    }
}

/// Remaining seconds on each timed buff
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Buffs {
    pub speed: f32,
    pub stealth: f32,
    pub rage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffKind {
    Speed,
    Stealth,
    Rage,
}

/// What a level-up changed, for logging and effects
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    pub new_level: u32,
    pub unlocked_spell: Option<SpellKind>,
    pub granted_items: Vec<(&'static str, u32)>,
}

pub struct Player {
    pub name: String,
    pub body: Body,
    pub vitals: Vitals,
    pub speed: f32,
    pub attack_damage: i32,
    pub attack_cooldown: f32,
    pub time_since_attack: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub speed_multiplier: f32,
    pub weapon: &'static WeaponDef,
    pub spells: Vec<Spell>,
    pub inventory: Inventory,
    pub equipped: Vec<ItemKind>,
    pub buffs: Buffs,
    /// Cosmetic barrier timer armed by the Shield Pendant
    pub shield_timer: f32,
}

impl Player {
    pub fn new(name: &str, position: Vec2, catalogs: &Catalogs) -> Self {
        Self {
            name: name.to_string(),
            body: Body::new(position, PLAYER_SIZE),
            vitals: Vitals::new(PLAYER_BASE_HEALTH, 1),
            speed: PLAYER_BASE_SPEED,
            attack_damage: PLAYER_BASE_DAMAGE,
            attack_cooldown: PLAYER_ATTACK_COOLDOWN,
            time_since_attack: 0.0,
            crit_chance: PLAYER_CRIT_CHANCE,
            crit_multiplier: PLAYER_CRIT_MULTIPLIER,
            speed_multiplier: 1.0,
            weapon: catalogs.weapon("Wooden Sword"),
            spells: Vec::new(),
            inventory: Inventory::new(INVENTORY_CAPACITY),
            equipped: Vec::new(),
            buffs: Buffs::default(),
            shield_timer: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn level(&self) -> u32 {
        self.vitals.level
    }

    pub fn is_stealthed(&self) -> bool {
        self.buffs.stealth > 0.0
    }

    pub fn is_raging(&self) -> bool {
        self.buffs.rage > 0.0
    }

    /// Advance attack, spell, buff and shield timers
    pub fn update_timers(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }

        self.time_since_attack += dt;
        for spell in &mut self.spells {
            spell.since_cast += dt;
        }

        self.buffs.speed = (self.buffs.speed - dt).max(0.0);
        self.buffs.stealth = (self.buffs.stealth - dt).max(0.0);
        self.buffs.rage = (self.buffs.rage - dt).max(0.0);
        self.shield_timer = (self.shield_timer - dt).max(0.0);

        self.speed_multiplier = if self.buffs.speed > 0.0 { SPEED_BUFF_MULTIPLIER } else { 1.0 };
    }

    /// Raw displacement for one frame. Axis inputs are independent, so a
    /// diagonal moves faster than a straight line.
    pub fn movement(&self, direction: Vec2, dt: f32) -> Vec2 {
        direction * self.speed * self.speed_multiplier * dt
    }

    pub fn can_attack(&self) -> bool {
        self.time_since_attack >= self.attack_cooldown
    }

    /// Consume the attack cooldown if it has elapsed
    pub fn attack(&mut self) {
        if self.can_attack() {
            self.time_since_attack = 0.0;
        }
    }

    pub fn compute_attack_damage(&self) -> i32 {
        let damage = self.attack_damage + self.weapon.damage + (self.level() as i32 - 1) * DAMAGE_PER_LEVEL;
        if self.is_raging() {
            (damage as f32 * RAGE_DAMAGE_MULTIPLIER) as i32
        } else {
            damage
        }
    }

    /// Melee hitbox centered on the player's sprite
    pub fn attack_box(&self) -> Aabb {
        Aabb::centered(
            self.body.position + Vec2::splat(CENTER_OFFSET),
            ATTACK_BOX_WIDTH,
            ATTACK_BOX_HEIGHT,
        )
    }

    pub fn has_spell(&self, kind: SpellKind) -> bool {
        self.spells.iter().any(|s| s.kind == kind)
    }

    pub fn can_cast(&self, kind: SpellKind) -> bool {
        self.spells.iter().find(|s| s.kind == kind).is_some_and(Spell::is_ready)
    }

    /// Reset the spell's timer. Returns false if it is locked or cooling down.
    pub fn cast(&mut self, kind: SpellKind) -> bool {
        match self.spells.iter_mut().find(|s| s.kind == kind) {
            Some(spell) if spell.is_ready() => {
                spell.since_cast = 0.0;
                true
            }
            _ => false,
        }
    }

    pub fn unlock_spell(&mut self, kind: SpellKind) {
        if !self.has_spell(kind) {
            self.spells.push(Spell::new(kind));
        }
    }

    /// Make every unlocked spell castable again
    pub fn refresh_spells(&mut self) {
        for spell in &mut self.spells {
            spell.since_cast = spell.cooldown;
        }
    }

    /// Add experience; on a level-up apply stat growth, full heal and milestones.
    pub fn gain_experience(&mut self, amount: u32, curve: &XpCurve) -> Option<LevelUp> {
        if !experience::grant_xp(&mut self.vitals, amount, curve) {
            return None;
        }

        let new_level = self.vitals.level;
        self.vitals.set_max_health(self.vitals.max_health + HEALTH_PER_LEVEL);
        self.vitals.set_health(self.vitals.max_health);
        self.attack_damage += DAMAGE_PER_LEVEL;
        self.speed += SPEED_PER_LEVEL;

        let unlocked_spell = SpellKind::unlocked_at(new_level);
        if let Some(spell) = unlocked_spell {
            self.unlock_spell(spell);
            info!("Spell unlocked: {}", spell.name());
        }

        let mut granted_items = Vec::new();
        if new_level == CHAIN_LIGHTNING_UNLOCK_LEVEL {
            granted_items.push(("Scorching Gauntlet", 1));
            granted_items.push(("Seeds of Evolution", 5));
        }
        for (name, quantity) in &granted_items {
            self.inventory.add_item(name, *quantity);
        }

        info!("Level up! {} is now level {}", self.name, new_level);
        Some(LevelUp {
            new_level,
            unlocked_spell,
            granted_items,
        })
    }

    /// Re-derive level-dependent stats and spells, used when restoring a save
    pub fn restore_level(&mut self, level: u32) {
        let level = level.max(1);
        let gained = level as i32 - 1;
        self.vitals.level = level;
        self.vitals.set_max_health(PLAYER_BASE_HEALTH + gained * HEALTH_PER_LEVEL);
        self.attack_damage = PLAYER_BASE_DAMAGE + gained * DAMAGE_PER_LEVEL;
        self.speed = PLAYER_BASE_SPEED + gained as f32 * SPEED_PER_LEVEL;
        for spell in SpellKind::ALL {
            if level >= spell.unlock_level() {
                self.unlock_spell(spell);
            }
        }
    }

    pub fn add_item(&mut self, name: &str, quantity: u32) -> bool {
        self.inventory.add_item(name, quantity)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.has_item(name)
    }

    pub fn use_item(&mut self, name: &str, catalogs: &Catalogs) -> ItemUseResult {
        items::use_item(self, name, catalogs)
    }

    /// Buffs take the longer of the remaining and the new duration
    pub fn apply_buff(&mut self, kind: BuffKind, duration: f32) {
        let slot = match kind {
            BuffKind::Speed => &mut self.buffs.speed,
            BuffKind::Stealth => &mut self.buffs.stealth,
            BuffKind::Rage => &mut self.buffs.rage,
        };
        *slot = slot.max(duration);
        if kind == BuffKind::Speed {
            self.speed_multiplier = SPEED_BUFF_MULTIPLIER;
        }
    }

    /// Only catalog equipment can be equipped
    pub fn equip(&mut self, kind: ItemKind) -> bool {
        if !kind.is_equipment() || self.is_equipped(kind) {
            return false;
        }
        self.equipped.push(kind);
        true
    }

    pub fn unequip(&mut self, kind: ItemKind) {
        self.equipped.retain(|k| *k != kind);
    }

    pub fn is_equipped(&self, kind: ItemKind) -> bool {
        self.equipped.contains(&kind)
    }

    /// Arm the cosmetic barrier. Requires the Shield Pendant.
    pub fn activate_shield(&mut self) -> bool {
        if !self.is_equipped(ItemKind::ShieldPendant) {
            return false;
        }
        self.shield_timer = SHIELD_DURATION;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("Tester", Vec2::new(100.0, 100.0), &Catalogs::init())
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.vitals.health, 150);
        assert_eq!(p.level(), 1);
        assert_eq!(p.weapon.name, "Wooden Sword");
        assert!(p.spells.is_empty());
        assert!(!p.can_attack());
    }

    #[test]
    fn test_attack_damage_formula() {
        let mut p = player();
        assert_eq!(p.compute_attack_damage(), 45);
        p.vitals.level = 3;
        assert_eq!(p.compute_attack_damage(), 57);
        p.apply_buff(BuffKind::Rage, 10.0);
        assert_eq!(p.compute_attack_damage(), (57.0_f32 * 1.3) as i32);
    }

    #[test]
    fn test_attack_box_is_centered_on_sprite() {
        let p = player();
        let hitbox = p.attack_box();
        assert_eq!(hitbox, Aabb::new(116.0 - 42.0, 116.0 - 36.0, 84.0, 72.0));
    }

    #[test]
    fn test_attack_cooldown() {
        let mut p = player();
        p.update_timers(0.2);
        assert!(!p.can_attack());
        p.update_timers(0.05);
        assert!(p.can_attack());
        p.attack();
        assert!(!p.can_attack());
    }

    #[test]
    fn test_diagonal_movement_is_not_normalized() {
        let p = player();
        let step = p.movement(Vec2::new(1.0, 1.0), 0.5);
        assert_eq!(step, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_level_up_grows_stats_and_heals() {
        let curve = XpCurve::default();
        let mut p = player();
        p.vitals.take_damage(100);
        let level_up = p.gain_experience(100, &curve).expect("should level");
        assert_eq!(level_up.new_level, 2);
        assert_eq!(p.vitals.max_health, 185);
        assert_eq!(p.vitals.health, 185);
        assert_eq!(p.attack_damage, 41);
        assert_eq!(p.speed, 203.0);
        assert_eq!(p.vitals.experience, 0);
    }

    #[test]
    fn test_single_level_up_per_grant() {
        let curve = XpCurve::default();
        let mut p = player();
        p.gain_experience(100_000, &curve);
        assert_eq!(p.level(), 2);
        assert_eq!(p.vitals.experience, 0);
    }

    #[test]
    fn test_fireball_unlocks_at_five_and_is_castable() {
        let curve = XpCurve::default();
        let mut p = player();
        p.vitals.level = 4;
        let level_up = p.gain_experience(100, &curve).expect("should level");
        assert_eq!(level_up.unlocked_spell, Some(SpellKind::Fireball));
        assert!(p.can_cast(SpellKind::Fireball));
        assert!(p.cast(SpellKind::Fireball));
        assert!(!p.can_cast(SpellKind::Fireball));
        p.update_timers(2.0);
        assert!(p.can_cast(SpellKind::Fireball));
    }

    #[test]
    fn test_level_ten_milestone_grants_items() {
        let curve = XpCurve::default();
        let mut p = player();
        p.vitals.level = 9;
        p.gain_experience(100, &curve);
        assert!(p.has_spell(SpellKind::ChainLightning));
        assert_eq!(p.inventory.quantity_of("Scorching Gauntlet"), 1);
        assert_eq!(p.inventory.quantity_of("Seeds of Evolution"), 5);
    }

    #[test]
    fn test_frost_nova_at_fifteen_is_immediately_castable() {
        let curve = XpCurve::default();
        let mut p = player();
        p.restore_level(14);
        assert!(!p.has_spell(SpellKind::FrostNova));
        let level_up = p.gain_experience(curve.xp_for_level(14), &curve).expect("should level");
        assert_eq!(level_up.new_level, 15);
        assert_eq!(level_up.unlocked_spell, Some(SpellKind::FrostNova));
        assert!(p.has_spell(SpellKind::FrostNova));
        assert!(p.can_cast(SpellKind::FrostNova));
    }

    #[test]
    fn test_locked_spell_cannot_cast() {
        let mut p = player();
        assert!(!p.can_cast(SpellKind::Whirlwind));
        assert!(!p.cast(SpellKind::Whirlwind));
    }

    #[test]
    fn test_buffs_take_max_and_count_down() {
        let mut p = player();
        p.apply_buff(BuffKind::Stealth, 6.0);
        p.apply_buff(BuffKind::Stealth, 2.0);
        assert_eq!(p.buffs.stealth, 6.0);
        assert!(p.is_stealthed());
        p.update_timers(6.0);
        assert!(!p.is_stealthed());
    }

    #[test]
    fn test_shorter_reapply_keeps_remaining_speed() {
        let mut p = player();
        p.apply_buff(BuffKind::Speed, 8.0);
        p.update_timers(3.0);
        p.apply_buff(BuffKind::Speed, 3.0);
        assert!((p.buffs.speed - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_speed_buff_raises_multiplier() {
        let mut p = player();
        p.apply_buff(BuffKind::Speed, 8.0);
        p.update_timers(1.0);
        assert_eq!(p.speed_multiplier, 1.5);
        p.update_timers(7.0);
        assert_eq!(p.speed_multiplier, 1.0);
    }

    #[test]
    fn test_equip_only_equipment() {
        let mut p = player();
        assert!(!p.equip(ItemKind::Apple));
        assert!(!p.activate_shield());
        assert!(p.equip(ItemKind::ShieldPendant));
        assert!(p.activate_shield());
        assert_eq!(p.shield_timer, 5.0);
        p.unequip(ItemKind::ShieldPendant);
        assert!(!p.is_equipped(ItemKind::ShieldPendant));
    }

    #[test]
    fn test_restore_level_rebuilds_stats() {
        let mut p = player();
        p.restore_level(16);
        assert_eq!(p.vitals.max_health, 150 + 15 * 35);
        assert_eq!(p.attack_damage, 35 + 15 * 6);
        assert!(p.has_spell(SpellKind::FrostNova));
        assert!(!p.has_spell(SpellKind::Whirlwind));
    }
}
