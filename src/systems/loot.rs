//! Kill rewards: the primary and secondary loot tables.
//!
//! Both tables roll an integer in `1..=100` and map it onto fixed buckets.
//! Rolling returns plain drop records; the combat pass adds them to the
//! player's inventory and spawns the sparkles.

use glam::Vec3;
use rand::Rng;

use crate::constants::*;
use crate::spawning::Archetype;
use crate::systems::item_defs::ItemKind;

/// Buckets of the primary (per-kill) table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryBucket {
    Legendary,
    Epic,
    Weapon,
    Food,
    Potion,
    Nothing,
}

/// Buckets of the secondary table rolled after the guaranteed drops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryBucket {
    Rare,
    Orbs,
    Potion,
    Food,
    Nothing,
}

pub fn primary_bucket(roll: u32) -> PrimaryBucket {
    match roll {
        0..=5 => PrimaryBucket::Legendary,
        6..=15 => PrimaryBucket::Epic,
        16..=25 => PrimaryBucket::Weapon,
        26..=50 => PrimaryBucket::Food,
        51..=70 => PrimaryBucket::Potion,
        _ => PrimaryBucket::Nothing,
    }
}

pub fn secondary_bucket(roll: u32) -> SecondaryBucket {
    match roll {
        0..=10 => SecondaryBucket::Rare,
        11..=30 => SecondaryBucket::Orbs,
        31..=60 => SecondaryBucket::Potion,
        61..=80 => SecondaryBucket::Food,
        _ => SecondaryBucket::Nothing,
    }
}

const LEGENDARY_ITEMS: [ItemKind; 3] = [ItemKind::CloakOfInvisibility, ItemKind::MysticalRune, ItemKind::AncientKey];
const EPIC_ITEMS: [ItemKind; 5] = [
    ItemKind::RingOfFire,
    ItemKind::AmuletOfIce,
    ItemKind::BootsOfSwiftness,
    ItemKind::MagicOrb,
    ItemKind::ShieldPendant,
];
const WEAPON_DROPS: [ItemKind; 2] = [ItemKind::ThrowingKnife, ItemKind::Shuriken];
const FOOD_DROPS: [ItemKind; 4] = [ItemKind::Meat, ItemKind::Apple, ItemKind::Bread, ItemKind::Cheese];
const POTION_DROPS: [ItemKind; 5] = [
    ItemKind::HealthPotion,
    ItemKind::SpeedPotion,
    ItemKind::StealthPotion,
    ItemKind::RagePotion,
    ItemKind::ManaPotion,
];
const RARE_ITEMS: [ItemKind; 5] = [
    ItemKind::HolyWaterOfLife,
    ItemKind::Stardust,
    ItemKind::PaladinNecklace,
    ItemKind::SeedsOfEvolution,
    ItemKind::MysticalRune,
];

/// Visual flourish attached to a drop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sparkle {
    Magic { color: Vec3, count: usize },
    Heal { count: usize },
}

impl Sparkle {
    fn magic(rgb: [u8; 3], count: usize) -> Self {
        Sparkle::Magic {
            color: Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0,
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootDrop {
    pub kind: ItemKind,
    pub quantity: u32,
    pub sparkle: Option<Sparkle>,
}

impl LootDrop {
    fn single(kind: ItemKind) -> Self {
        Self { kind, quantity: 1, sparkle: None }
    }

    fn with_sparkle(mut self, sparkle: Sparkle) -> Self {
        self.sparkle = Some(sparkle);
        self
    }
}

fn pick(pool: &[ItemKind], rng: &mut impl Rng) -> ItemKind {
    pool[rng.gen_range(0..pool.len())]
}

fn roll_range(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    rng.gen_range(range.0..=range.1)
}

/// Primary per-kill drop. At most one item stack.
pub fn roll_primary(rng: &mut impl Rng) -> Option<LootDrop> {
    let drop = match primary_bucket(rng.gen_range(1..=100)) {
        PrimaryBucket::Legendary => LootDrop::single(pick(&LEGENDARY_ITEMS, rng))
            .with_sparkle(Sparkle::magic([255, 215, 0], LEGENDARY_MAGIC_PARTICLES)),
        PrimaryBucket::Epic => {
            LootDrop::single(pick(&EPIC_ITEMS, rng)).with_sparkle(Sparkle::magic([200, 0, 200], EPIC_MAGIC_PARTICLES))
        }
        PrimaryBucket::Weapon => LootDrop::single(pick(&WEAPON_DROPS, rng))
            .with_sparkle(Sparkle::magic([192, 192, 192], WEAPON_MAGIC_PARTICLES)),
        PrimaryBucket::Food => {
            let kind = pick(&FOOD_DROPS, rng);
            LootDrop {
                kind,
                quantity: roll_range(FOOD_DROP, rng),
                sparkle: Some(Sparkle::Heal { count: FOOD_HEAL_PARTICLES }),
            }
        }
        PrimaryBucket::Potion => LootDrop::single(pick(&POTION_DROPS, rng)),
        PrimaryBucket::Nothing => return None,
    };
    Some(drop)
}

/// Secondary drops: essence stones always, archetype specials, then one
/// roll on the secondary table.
///
/// `kills` is the run's kill count including this kill.
pub fn roll_secondary(archetype: Archetype, kills: u32, rng: &mut impl Rng) -> Vec<LootDrop> {
    let mut drops = vec![LootDrop {
        kind: ItemKind::EssenceStones,
        quantity: roll_range(ESSENCE_STONE_DROP, rng),
        sparkle: None,
    }];

    if archetype == Archetype::GiantSnake && kills % VENOM_SWORD_KILL_INTERVAL == 0 {
        drops.push(
            LootDrop::single(ItemKind::VenomSword).with_sparkle(Sparkle::magic([0, 200, 0], VENOM_DROP_PARTICLES)),
        );
    }

    if archetype.is_boss() {
        drops.push(LootDrop::single(ItemKind::DemonKingLongSword));
        drops.push(LootDrop {
            kind: ItemKind::Orbs,
            quantity: BOSS_ORB_BUNDLE,
            sparkle: Some(Sparkle::magic([200, 0, 200], BOSS_DROP_PARTICLES)),
        });
    }

    match secondary_bucket(rng.gen_range(1..=100)) {
        SecondaryBucket::Rare => drops.push(
            LootDrop::single(pick(&RARE_ITEMS, rng))
                .with_sparkle(Sparkle::magic([255, 215, 0], LEGENDARY_MAGIC_PARTICLES)),
        ),
        SecondaryBucket::Orbs => drops.push(LootDrop {
            kind: ItemKind::Orbs,
            quantity: roll_range(ORB_DROP, rng),
            sparkle: Some(Sparkle::magic([255, 200, 0], WEAPON_MAGIC_PARTICLES)),
        }),
        SecondaryBucket::Potion => drops.push(LootDrop::single(pick(&POTION_DROPS, rng))),
        SecondaryBucket::Food => {
            let kind = pick(&FOOD_DROPS, rng);
            drops.push(LootDrop {
                kind,
                quantity: roll_range(FOOD_DROP, rng),
                sparkle: None,
            });
        }
        SecondaryBucket::Nothing => {}
    }

    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_primary_bucket_boundaries() {
        assert_eq!(primary_bucket(1), PrimaryBucket::Legendary);
        assert_eq!(primary_bucket(5), PrimaryBucket::Legendary);
        assert_eq!(primary_bucket(6), PrimaryBucket::Epic);
        assert_eq!(primary_bucket(15), PrimaryBucket::Epic);
        assert_eq!(primary_bucket(16), PrimaryBucket::Weapon);
        assert_eq!(primary_bucket(25), PrimaryBucket::Weapon);
        assert_eq!(primary_bucket(26), PrimaryBucket::Food);
        assert_eq!(primary_bucket(50), PrimaryBucket::Food);
        assert_eq!(primary_bucket(51), PrimaryBucket::Potion);
        assert_eq!(primary_bucket(70), PrimaryBucket::Potion);
        assert_eq!(primary_bucket(71), PrimaryBucket::Nothing);
        assert_eq!(primary_bucket(100), PrimaryBucket::Nothing);
    }

    #[test]
    fn test_primary_bucket_sizes_over_all_rolls() {
        let count = |bucket| (1..=100).filter(|r| primary_bucket(*r) == bucket).count();
        assert_eq!(count(PrimaryBucket::Legendary), 5);
        assert_eq!(count(PrimaryBucket::Epic), 10);
        assert_eq!(count(PrimaryBucket::Weapon), 10);
        assert_eq!(count(PrimaryBucket::Food), 25);
        assert_eq!(count(PrimaryBucket::Potion), 20);
        assert_eq!(count(PrimaryBucket::Nothing), 30);
    }

    #[test]
    fn test_secondary_bucket_sizes_over_all_rolls() {
        let count = |bucket| (1..=100).filter(|r| secondary_bucket(*r) == bucket).count();
        assert_eq!(count(SecondaryBucket::Rare), 10);
        assert_eq!(count(SecondaryBucket::Orbs), 20);
        assert_eq!(count(SecondaryBucket::Potion), 30);
        assert_eq!(count(SecondaryBucket::Food), 20);
        assert_eq!(count(SecondaryBucket::Nothing), 20);
        assert_eq!(secondary_bucket(10), SecondaryBucket::Rare);
        assert_eq!(secondary_bucket(11), SecondaryBucket::Orbs);
    }

    #[test]
    fn test_secondary_always_drops_essence_stones() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let drops = roll_secondary(Archetype::Goblin, 1, &mut rng);
            let stones = &drops[0];
            assert_eq!(stones.kind, ItemKind::EssenceStones);
            assert!((1..=5).contains(&stones.quantity));
        }
    }

    #[test]
    fn test_venom_sword_on_every_tenth_kill_of_giant_snake() {
        let mut rng = StdRng::seed_from_u64(4);
        let has_venom = |drops: &[LootDrop]| drops.iter().any(|d| d.kind == ItemKind::VenomSword);

        assert!(has_venom(&roll_secondary(Archetype::GiantSnake, 10, &mut rng)));
        assert!(has_venom(&roll_secondary(Archetype::GiantSnake, 20, &mut rng)));
        assert!(!has_venom(&roll_secondary(Archetype::GiantSnake, 11, &mut rng)));
        assert!(!has_venom(&roll_secondary(Archetype::Goblin, 10, &mut rng)));
    }

    #[test]
    fn test_boss_drops_sword_and_orbs() {
        let mut rng = StdRng::seed_from_u64(9);
        let drops = roll_secondary(Archetype::FallenShadowPaladin, 3, &mut rng);
        assert!(drops.iter().any(|d| d.kind == ItemKind::DemonKingLongSword));
        assert!(drops.iter().any(|d| d.kind == ItemKind::Orbs && d.quantity == 3));
    }

    #[test]
    fn test_primary_food_stacks_one_to_three() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..300 {
            if let Some(drop) = roll_primary(&mut rng) {
                if drop.kind.is_food() {
                    assert!((1..=3).contains(&drop.quantity));
                } else {
                    assert_eq!(drop.quantity, 1);
                }
            }
        }
    }
}
