use glam::{Vec2, Vec3};

use crate::spawning::{Archetype, AttackFormula, Behavior, Tier};

/// Axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// The four corners, top-left first, clockwise
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
            Vec2::new(self.x, self.y + self.height),
        ]
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}

/// Position and collision size of a character. Position is the top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            size: Vec2::splat(size),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// Health, level and experience shared by every combatant.
///
/// `health` is kept in `0..=max_health`; a character is alive exactly while
/// `health > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub experience: u32,
}

impl Vitals {
    pub fn new(max_health: i32, level: u32) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            level,
            experience: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn percentage(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Subtract damage, never dropping below zero. Returns the health actually lost.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - damage.max(0)).max(0);
        before - self.health
    }

    /// Restore health up to the maximum. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health.max(1);
        self.health = self.health.min(self.max_health);
    }
}

/// AI state for enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AIState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Who an enemy is hunting. The player lives outside the ECS world, so this
/// only names the slot; enemies never own what they target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player,
}

/// Enemy record: archetype tuning plus the live AI state.
///
/// Stats are rolled once by the spawn factory and never rescaled afterwards.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub archetype: Archetype,
    pub tier: Tier,
    pub behavior: Behavior,
    pub attack_formula: AttackFormula,
    pub speed: f32,
    pub attack_damage: i32,
    pub attack_cooldown: f32,
    pub time_since_attack: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub target: Option<Target>,
    pub state: AIState,
    /// Cosmetic only, never gates logic
    pub hit_flash: f32,
    pub tint: Vec3,
    /// Time accumulated toward the behavior's special ability (dash, teleport, regen)
    pub ability_timer: f32,
    /// Phase of the cosmetic hover bob, for archetypes that fly
    pub bob_phase: Option<f32>,
}

impl Enemy {
    pub fn name(&self) -> &'static str {
        self.archetype.name()
    }

    pub fn cooldown_elapsed(&self) -> bool {
        self.time_since_attack >= self.attack_cooldown
    }

    pub fn flash_hit(&mut self, duration: f32) {
        self.hit_flash = duration;
    }

    /// Damage dealt by one deliberate attack
    pub fn strike_damage(&self) -> i32 {
        self.attack_formula.apply(self.attack_damage)
    }

    /// Damage dealt every frame while touching the player
    pub fn contact_damage(&self) -> i32 {
        (self.attack_damage / crate::constants::CONTACT_DAMAGE_DIVISOR).max(1)
    }
}

/// One stack in the player's inventory, keyed by display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub name: String,
    pub quantity: u32,
}

/// Capacity-bounded ordered inventory.
///
/// Stacks are matched by display name, so grants from different sources
/// merge into one slot as long as they use the same name.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
    pub capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    /// Add to an existing stack, or open a new slot if there is room.
    /// Returns false when the item was dropped because the inventory is full.
    pub fn add_item(&mut self, name: &str, quantity: u32) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.name == name) {
            slot.quantity += quantity;
            return true;
        }
        if self.slots.len() < self.capacity {
            self.slots.push(InventorySlot {
                name: name.to_string(),
                quantity,
            });
            return true;
        }
        false
    }

    /// Remove one unit of the named item, dropping the slot when it empties.
    pub fn take_one(&mut self, name: &str) -> bool {
        let Some(index) = self.slots.iter().position(|s| s.name == name && s.quantity > 0) else {
            return false;
        };
        self.slots[index].quantity -= 1;
        if self.slots[index].quantity == 0 {
            self.slots.remove(index);
        }
        true
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.quantity_of(name) > 0
    }

    pub fn quantity_of(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_never_goes_negative() {
        let mut vitals = Vitals::new(20, 1);
        assert_eq!(vitals.take_damage(7), 7);
        assert_eq!(vitals.health, 13);
        assert!(vitals.is_alive());

        assert_eq!(vitals.take_damage(100), 13);
        assert_eq!(vitals.health, 0);
        assert!(!vitals.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut vitals = Vitals::new(50, 1);
        vitals.take_damage(30);
        assert_eq!(vitals.heal(10), 10);
        assert_eq!(vitals.health, 30);
        assert_eq!(vitals.heal(500), 20);
        assert_eq!(vitals.health, 50);
    }

    #[test]
    fn test_damage_and_heal_invariants_hold_for_many_amounts() {
        for start in [1, 5, 20, 150] {
            for amount in [0, 1, 4, 19, 20, 21, 1000] {
                let mut vitals = Vitals::new(150, 1);
                vitals.set_health(start);
                vitals.take_damage(amount);
                assert_eq!(vitals.health, (start - amount).max(0));
                assert_eq!(vitals.is_alive(), vitals.health > 0);

                let mut vitals = Vitals::new(150, 1);
                vitals.set_health(start);
                vitals.heal(amount);
                assert_eq!(vitals.health, (start + amount).min(150));
            }
        }
    }

    #[test]
    fn test_set_health_clamps() {
        let mut vitals = Vitals::new(40, 1);
        vitals.set_health(-5);
        assert_eq!(vitals.health, 0);
        vitals.set_health(400);
        assert_eq!(vitals.health, 40);
    }

    #[test]
    fn test_aabb_overlap_excludes_touching_edges() {
        let a = Aabb::new(0.0, 0.0, 32.0, 32.0);
        let b = Aabb::new(32.0, 0.0, 32.0, 32.0);
        let c = Aabb::new(31.0, 31.0, 32.0, 32.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_aabb_centered() {
        let rect = Aabb::centered(Vec2::new(16.0, 16.0), 84.0, 72.0);
        assert_eq!(rect.x, -26.0);
        assert_eq!(rect.y, -20.0);
        assert_eq!(rect.center(), Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_inventory_stacks_by_name() {
        let mut inv = Inventory::new(24);
        inv.add_item("Health Potion", 1);
        inv.add_item("Apple", 2);
        inv.add_item("Health Potion", 2);
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.quantity_of("Health Potion"), 3);
        assert_eq!(inv.slots[0].name, "Health Potion");
    }

    #[test]
    fn test_inventory_full_drops_new_names_but_still_stacks() {
        let mut inv = Inventory::new(2);
        assert!(inv.add_item("A", 1));
        assert!(inv.add_item("B", 1));
        assert!(!inv.add_item("C", 1));
        assert!(inv.add_item("A", 4));
        assert_eq!(inv.quantity_of("A"), 5);
        assert!(!inv.has_item("C"));
    }

    #[test]
    fn test_take_one_removes_empty_slot() {
        let mut inv = Inventory::new(24);
        inv.add_item("Rage Potion", 1);
        assert!(inv.take_one("Rage Potion"));
        assert!(inv.is_empty());
        assert!(!inv.take_one("Rage Potion"));
    }
}
