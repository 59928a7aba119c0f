//! Data-driven enemy spawning.
//!
//! Every archetype is a row in a static table: base stats, per-level scaling,
//! behavior and attack formula. The factory reads the row, scales it by the
//! player's level at spawn time and spawns one enemy record into the world.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use crate::components::{AIState, Body, Enemy, Target, Vitals};
use crate::constants::*;

/// Power bracket gating when an archetype becomes spawnable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    D,
    C,
    B,
    A,
    S,
}

/// Every named enemy kind in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    // Tier D
    Goblin,
    Skeleton,
    Slime,
    FireHound,
    Bat,
    FireSpirit,
    DarkSpirit,
    LightSpirit,
    // Tier C
    ChimeraAnt,
    Werewolf,
    Cerberus,
    GiantCentipede,
    GiantSnake,
    StoneTroll,
    Minotaur,
    StoneGolem,
    SalamanderMan,
    HoneyBee,
    SkeletonHound,
    // Tier B
    AncientMummy,
    SkeletonKnight,
    ElvenArcher,
    IceElf,
    LavaGolem,
    DarkMage,
    GoblinGiant,
    Imp,
    // Tier A
    FallenShadowPaladin,
    HarpyQueen,
    Witch,
    RedOrc,
    BatWitch,
    NecromancerGeneral,
    // Tier S
    Necromancer,
    Dragon,
    Titan,
    SkeletonKing,
    GoblinMama,
    FrostKing,
    AbyssalHydra,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Goblin => "Goblin",
            Archetype::Skeleton => "Skeleton",
            Archetype::Slime => "Slime",
            Archetype::FireHound => "Fire Hound",
            Archetype::Bat => "Bat",
            Archetype::FireSpirit => "Fire Spirit",
            Archetype::DarkSpirit => "Dark Spirit",
            Archetype::LightSpirit => "Light Spirit",
            Archetype::ChimeraAnt => "Chimera Ant",
            Archetype::Werewolf => "Werewolf",
            Archetype::Cerberus => "Cerberus",
            Archetype::GiantCentipede => "Giant Centipede",
            Archetype::GiantSnake => "Giant Snake",
            Archetype::StoneTroll => "Stone Troll",
            Archetype::Minotaur => "Minotaur",
            Archetype::StoneGolem => "Stone Golem",
            Archetype::SalamanderMan => "Salamander Man",
            Archetype::HoneyBee => "Honey Bee",
            Archetype::SkeletonHound => "Skeleton Hound",
            Archetype::AncientMummy => "Ancient Mummy",
            Archetype::SkeletonKnight => "Skeleton Knight",
            Archetype::ElvenArcher => "Elven Archer",
            Archetype::IceElf => "Ice Elf",
            Archetype::LavaGolem => "Lava Golem",
            Archetype::DarkMage => "Dark Mage",
            Archetype::GoblinGiant => "Goblin Giant",
            Archetype::Imp => "Imp",
            Archetype::FallenShadowPaladin => "Fallen Shadow Paladin",
            Archetype::HarpyQueen => "Harpy Queen",
            Archetype::Witch => "Witch",
            Archetype::RedOrc => "Red Orc",
            Archetype::BatWitch => "Bat Witch",
            Archetype::NecromancerGeneral => "Necromancer General",
            Archetype::Necromancer => "Necromancer",
            Archetype::Dragon => "Dragon",
            Archetype::Titan => "Titan",
            Archetype::SkeletonKing => "Skeleton King",
            Archetype::GoblinMama => "Goblin Mama",
            Archetype::FrostKing => "Frost King",
            Archetype::AbyssalHydra => "Abyssal Hydra",
        }
    }

    /// Stat row for this archetype. Roster entries without tuning fall back
    /// to the Goblin row, so spawning never fails.
    pub fn def(&self) -> &'static ArchetypeDef {
        ARCHETYPES
            .iter()
            .find(|def| def.archetype == *self)
            .unwrap_or(&ARCHETYPES[0])
    }

    /// The one boss that can be tamed and that drops the boss bundle
    pub fn is_boss(&self) -> bool {
        matches!(self, Archetype::FallenShadowPaladin)
    }
}

/// Movement/attack specialization layered on the base state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Plain chase-and-strike
    Melee,
    /// Backs away while the target is closer than `attack_range - band`
    Kiter { band: f32 },
    /// Closes `distance` instantly on a cooldown. With `strike_bonus` set the
    /// lunge itself hits for `attack + bonus` and replaces the normal AI tick.
    Dasher {
        cooldown: f32,
        distance: f32,
        strike_bonus: Option<i32>,
    },
    /// Reappears `behind` pixels on the far side of the target on a cooldown
    Teleporter { cooldown: f32, behind: f32 },
    /// Restores `amount` health every `interval` seconds
    Regenerator { amount: i32, interval: f32 },
}

/// How a deliberate attack converts attack damage into damage dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackFormula {
    Quarter,
    Third,
    Full,
    Bonus(i32),
}

impl AttackFormula {
    pub fn apply(&self, attack_damage: i32) -> i32 {
        match self {
            AttackFormula::Quarter => attack_damage / 4,
            AttackFormula::Third => attack_damage / 3,
            AttackFormula::Full => attack_damage,
            AttackFormula::Bonus(bonus) => attack_damage + bonus,
        }
    }
}

/// `base + level * per_level / divisor`, integer arithmetic
#[derive(Debug, Clone, Copy)]
pub struct StatScale {
    pub base: i32,
    pub per_level: i32,
    pub divisor: i32,
}

impl StatScale {
    const fn linear(base: i32, per_level: i32) -> Self {
        Self { base, per_level, divisor: 1 }
    }

    const fn halved(base: i32) -> Self {
        Self { base, per_level: 1, divisor: 2 }
    }

    pub fn at(&self, level: u32) -> i32 {
        self.base + level as i32 * self.per_level / self.divisor
    }
}

/// Definition of an enemy archetype - all the data needed to spawn one
#[derive(Debug, Clone)]
pub struct ArchetypeDef {
    pub archetype: Archetype,
    pub tier: Tier,
    pub health: StatScale,
    pub speed: f32,
    pub attack: StatScale,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub behavior: Behavior,
    pub attack_formula: AttackFormula,
    /// Display tint as RGB
    pub tint: [u8; 3],
    /// Cosmetic hover bob
    pub hovers: bool,
}

const fn row(
    archetype: Archetype,
    tier: Tier,
    health: StatScale,
    speed: f32,
    attack: StatScale,
    ranges: (f32, f32),
    attack_cooldown: f32,
    tint: [u8; 3],
) -> ArchetypeDef {
    ArchetypeDef {
        archetype,
        tier,
        health,
        speed,
        attack,
        aggro_range: ranges.0,
        attack_range: ranges.1,
        attack_cooldown,
        behavior: Behavior::Melee,
        attack_formula: AttackFormula::Quarter,
        tint,
        hovers: false,
    }
}

impl ArchetypeDef {
    const fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    const fn with_formula(mut self, attack_formula: AttackFormula) -> Self {
        self.attack_formula = attack_formula;
        self
    }

    const fn hovering(mut self) -> Self {
        self.hovers = true;
        self
    }

    /// Spawn this archetype scaled to the given player level
    pub fn spawn(&self, world: &mut World, player_level: u32, position: Vec2) -> Entity {
        let [r, g, b] = self.tint;
        let enemy = Enemy {
            archetype: self.archetype,
            tier: self.tier,
            behavior: self.behavior,
            attack_formula: self.attack_formula,
            speed: self.speed,
            attack_damage: self.attack.at(player_level),
            attack_cooldown: self.attack_cooldown,
            time_since_attack: 0.0,
            aggro_range: self.aggro_range,
            attack_range: self.attack_range,
            target: Some(Target::Player),
            state: AIState::Idle,
            hit_flash: 0.0,
            tint: Vec3::new(r as f32, g as f32, b as f32) / 255.0,
            ability_timer: 0.0,
            bob_phase: self.hovers.then_some(0.0),
        };
        world.spawn((
            Body::new(position, ENEMY_SIZE),
            Vitals::new(self.health.at(player_level), player_level),
            enemy,
        ))
    }
}

use Archetype as K;
use Tier::{A, B, C, D, S};

/// The archetype table. The first row is the fallback for untuned archetypes.
pub static ARCHETYPES: &[ArchetypeDef] = &[
    // Tier D
    row(K::Goblin, D, StatScale::linear(20, 2), 50.0, StatScale::halved(5), (80.0, 35.0), 2.5, [0, 228, 48]),
    row(K::Skeleton, D, StatScale::linear(25, 3), 40.0, StatScale::halved(6), (90.0, 35.0), 3.0, [200, 200, 200]),
    row(K::Slime, D, StatScale::linear(18, 2), 40.0, StatScale::halved(4), (70.0, 30.0), 2.8, [0, 255, 100]),
    row(K::FireHound, D, StatScale::linear(22, 2), 80.0, StatScale::halved(5), (100.0, 40.0), 2.5, [255, 182, 193]),
    row(K::Bat, D, StatScale::linear(16, 1), 100.0, StatScale::halved(4), (60.0, 30.0), 2.2, [50, 50, 50]).hovering(),
    row(K::FireSpirit, D, StatScale::linear(20, 2), 80.0, StatScale::linear(5, 1), (90.0, 30.0), 2.2, [255, 161, 0]),
    row(K::DarkSpirit, D, StatScale::linear(25, 2), 70.0, StatScale::linear(6, 1), (100.0, 35.0), 2.4, [112, 31, 126]),
    row(K::LightSpirit, D, StatScale::linear(22, 2), 90.0, StatScale::linear(4, 1), (80.0, 30.0), 2.0, [200, 200, 50]),
    // Tier C
    row(K::ChimeraAnt, C, StatScale::linear(35, 3), 70.0, StatScale::linear(8, 1), (120.0, 40.0), 3.5, [150, 75, 0]),
    row(K::Werewolf, C, StatScale::linear(40, 4), 90.0, StatScale::linear(10, 1), (130.0, 45.0), 3.8, [139, 69, 19]),
    row(K::Cerberus, C, StatScale::linear(45, 5), 85.0, StatScale::linear(12, 2), (140.0, 50.0), 4.0, [100, 0, 0]),
    row(K::GiantCentipede, C, StatScale::linear(30, 3), 60.0, StatScale::linear(9, 1), (120.0, 50.0), 3.2, [128, 0, 128]),
    row(K::Minotaur, C, StatScale::linear(38, 3), 75.0, StatScale::linear(11, 1), (115.0, 45.0), 3.5, [253, 249, 0]),
    row(K::StoneGolem, C, StatScale::linear(60, 6), 50.0, StatScale::linear(14, 2), (100.0, 50.0), 4.5, [130, 130, 130])
        .with_behavior(Behavior::Regenerator { amount: 5, interval: 10.0 }),
    row(K::SalamanderMan, C, StatScale::linear(40, 3), 60.0, StatScale::linear(8, 2), (120.0, 40.0), 3.0, [180, 180, 255]),
    row(K::HoneyBee, C, StatScale::linear(18, 1), 150.0, StatScale::linear(4, 1), (100.0, 30.0), 1.6, [253, 249, 0]),
    row(K::SkeletonHound, C, StatScale::linear(35, 3), 100.0, StatScale::linear(7, 1), (120.0, 45.0), 2.0, [180, 180, 180]),
    // Tier B
    row(K::AncientMummy, B, StatScale::linear(80, 6), 40.0, StatScale::linear(12, 2), (140.0, 50.0), 3.5, [200, 180, 100]),
    row(K::SkeletonKnight, B, StatScale::linear(55, 5), 55.0, StatScale::linear(12, 2), (130.0, 50.0), 3.2, [180, 180, 255])
        .with_formula(AttackFormula::Full),
    row(K::ElvenArcher, B, StatScale::linear(40, 3), 100.0, StatScale::linear(10, 1), (150.0, 120.0), 2.0, [150, 255, 150])
        .with_behavior(Behavior::Kiter { band: 40.0 })
        .with_formula(AttackFormula::Full),
    row(K::LavaGolem, B, StatScale::linear(100, 10), 35.0, StatScale::linear(20, 2), (130.0, 50.0), 4.5, [255, 80, 30])
        .with_behavior(Behavior::Regenerator { amount: 10, interval: 8.0 }),
    row(K::DarkMage, B, StatScale::linear(45, 4), 45.0, StatScale::linear(18, 2), (150.0, 120.0), 2.8, [200, 50, 200])
        .with_behavior(Behavior::Kiter { band: 70.0 })
        .with_formula(AttackFormula::Bonus(5)),
    row(K::GoblinGiant, B, StatScale::linear(90, 8), 40.0, StatScale::linear(15, 2), (140.0, 55.0), 4.0, [100, 200, 100])
        .with_formula(AttackFormula::Full),
    row(K::Imp, B, StatScale::linear(35, 2), 120.0, StatScale::linear(6, 1), (100.0, 30.0), 1.8, [255, 50, 50])
        .with_behavior(Behavior::Teleporter { cooldown: 5.0, behind: TELEPORT_BEHIND_DISTANCE })
        .with_formula(AttackFormula::Full),
    // Tier A
    row(K::FallenShadowPaladin, A, StatScale::linear(180, 10), 100.0, StatScale::linear(35, 3), (150.0, 60.0), 3.5, [100, 50, 150])
        .with_behavior(Behavior::Dasher { cooldown: 5.0, distance: 150.0, strike_bonus: None })
        .with_formula(AttackFormula::Third),
    row(K::HarpyQueen, A, StatScale::linear(120, 8), 120.0, StatScale::linear(18, 2), (160.0, 55.0), 2.5, [255, 200, 100])
        .with_behavior(Behavior::Dasher { cooldown: 6.0, distance: 180.0, strike_bonus: Some(SWOOP_DAMAGE_BONUS) })
        .with_formula(AttackFormula::Full),
    row(K::Witch, A, StatScale::linear(90, 8), 80.0, StatScale::linear(25, 2), (150.0, 120.0), 2.2, [200, 122, 255]),
    // Tier S
    row(K::Necromancer, S, StatScale::linear(120, 10), 60.0, StatScale::linear(30, 2), (160.0, 140.0), 3.0, [112, 31, 126])
        .with_formula(AttackFormula::Full),
];

/// Spawnable pools per tier, in roll order
pub const TIER_D_POOL: [Archetype; 5] = [K::Goblin, K::Skeleton, K::Slime, K::FireHound, K::Bat];
pub const TIER_C_POOL: [Archetype; 6] = [
    K::ChimeraAnt,
    K::Werewolf,
    K::Cerberus,
    K::GiantCentipede,
    K::GiantSnake,
    K::StoneTroll,
];
pub const TIER_B_POOL: [Archetype; 7] = [
    K::AncientMummy,
    K::SkeletonKnight,
    K::ElvenArcher,
    K::LavaGolem,
    K::DarkMage,
    K::GoblinGiant,
    K::Imp,
];
pub const TIER_A_POOL: [Archetype; 2] = [K::HarpyQueen, K::Witch];
pub const TIER_S_POOL: [Archetype; 1] = [K::Necromancer];

/// Spawn one enemy of the given archetype, scaled to the player's level
pub fn spawn_enemy(world: &mut World, archetype: Archetype, player_level: u32, position: Vec2) -> Entity {
    let def = archetype.def();
    debug!(
        "Spawning {} (level {}) at ({:.0}, {:.0})",
        def.archetype.name(),
        player_level,
        position.x,
        position.y
    );
    def.spawn(world, player_level, position)
}

/// Pick an archetype for the next spawn from everything the player's level unlocks.
///
/// From the boss override level a small independent roll can force the boss
/// regardless of the pool.
pub fn select_archetype(player_level: u32, rng: &mut impl Rng) -> Archetype {
    let mut pool: Vec<Archetype> = TIER_D_POOL.to_vec();
    if player_level >= TIER_C_UNLOCK_LEVEL {
        pool.extend_from_slice(&TIER_C_POOL);
    }
    if player_level >= TIER_B_UNLOCK_LEVEL {
        pool.extend_from_slice(&TIER_B_POOL);
    }
    if player_level >= TIER_A_UNLOCK_LEVEL {
        pool.extend_from_slice(&TIER_A_POOL);
    }
    if player_level >= TIER_S_UNLOCK_LEVEL {
        pool.extend_from_slice(&TIER_S_POOL);
    }

    if player_level >= BOSS_OVERRIDE_LEVEL && rng.gen_range(1..=100) <= BOSS_OVERRIDE_PERCENT {
        return Archetype::FallenShadowPaladin;
    }

    pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_goblin_scaling() {
        let def = Archetype::Goblin.def();
        assert_eq!(def.health.at(1), 22);
        assert_eq!(def.attack.at(1), 5);
        assert_eq!(def.attack.at(3), 6);
        assert_eq!(def.health.at(10), 40);
    }

    #[test]
    fn test_untuned_archetype_falls_back_to_goblin() {
        for archetype in [Archetype::Dragon, Archetype::GiantSnake, Archetype::StoneTroll] {
            assert_eq!(archetype.def().archetype, Archetype::Goblin);
        }
    }

    #[test]
    fn test_late_rows_are_found() {
        assert_eq!(Archetype::Witch.def().archetype, Archetype::Witch);
        assert_eq!(Archetype::Necromancer.def().tier, Tier::S);
    }

    #[test]
    fn test_spawned_enemy_stats_are_fixed_at_creation() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Archetype::Cerberus, 4, Vec2::new(64.0, 64.0));
        let vitals = *world.get::<&Vitals>(e).unwrap();
        let enemy = world.get::<&Enemy>(e).unwrap();
        assert_eq!(vitals.max_health, 45 + 5 * 4);
        assert_eq!(vitals.level, 4);
        assert_eq!(enemy.attack_damage, 12 + 2 * 4);
        assert_eq!(enemy.attack_cooldown, 4.0);
        assert_eq!(enemy.state, AIState::Idle);
        assert_eq!(enemy.target, Some(Target::Player));
    }

    #[test]
    fn test_attack_formulas() {
        assert_eq!(AttackFormula::Quarter.apply(21), 5);
        assert_eq!(AttackFormula::Third.apply(38), 12);
        assert_eq!(AttackFormula::Full.apply(17), 17);
        assert_eq!(AttackFormula::Bonus(5).apply(20), 25);
    }

    #[test]
    fn test_low_level_pool_is_tier_d_only() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let archetype = select_archetype(3, &mut rng);
            assert!(TIER_D_POOL.contains(&archetype), "{archetype:?}");
        }
    }

    #[test]
    fn test_tier_c_unlocks_at_ten() {
        let mut rng = StdRng::seed_from_u64(21);
        let picks: Vec<_> = (0..400).map(|_| select_archetype(10, &mut rng)).collect();
        assert!(picks.iter().any(|a| TIER_C_POOL.contains(a)));
        assert!(picks.iter().all(|a| TIER_D_POOL.contains(a) || TIER_C_POOL.contains(a)));
    }

    #[test]
    fn test_boss_override_only_from_level_fifteen() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!((0..500).all(|_| select_archetype(14, &mut rng) != Archetype::FallenShadowPaladin));
        assert!((0..2000).any(|_| select_archetype(15, &mut rng) == Archetype::FallenShadowPaladin));
    }
}
