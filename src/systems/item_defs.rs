//! Item definitions - all item, potion and weapon properties in one place.
//!
//! Each catalog is a static table keyed by an enum. Lookups by kind or by
//! display name never fail: an unknown key falls back to the first row.

use log::info;

use crate::constants::*;

/// Every item the game knows about, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    // Consumables
    HealthPotion,
    SpeedPotion,
    StealthPotion,
    RagePotion,
    ManaPotion,
    HolyWaterOfLife,
    Stardust,
    // Food
    Meat,
    Apple,
    Bread,
    MagicalFruit,
    Cheese,
    // Equipment
    ShieldPendant,
    RingOfFire,
    AmuletOfIce,
    BootsOfSwiftness,
    CloakOfInvisibility,
    PaladinNecklace,
    // Weapons
    ScorchingGauntlet,
    DemonKingLongSword,
    VenomSword,
    // Throwables
    Shuriken,
    ThrowingKnife,
    MagicOrb,
    // Currency
    EssenceStones,
    Orbs,
    // Evolution
    SeedsOfEvolution,
    // Quest
    AncientKey,
    TreasureMap,
    MysticalRune,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Complete definition of an item's properties
#[derive(Debug)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub name: &'static str,
    pub description: &'static str,
    pub color: [u8; 3],
    pub rarity: Rarity,
    pub max_stack: u32,
    /// Healing amount, throw damage, etc.
    pub effect_value: f32,
    /// Buff duration in seconds
    pub effect_duration: f32,
}

impl ItemKind {
    pub fn is_consumable(&self) -> bool {
        matches!(
            self,
            ItemKind::HealthPotion
                | ItemKind::SpeedPotion
                | ItemKind::StealthPotion
                | ItemKind::RagePotion
                | ItemKind::ManaPotion
        )
    }

    pub fn is_food(&self) -> bool {
        matches!(
            self,
            ItemKind::Meat | ItemKind::Apple | ItemKind::Bread | ItemKind::MagicalFruit | ItemKind::Cheese
        )
    }

    /// Equippable magic items. The Paladin Necklace is deliberately not in this range.
    pub fn is_equipment(&self) -> bool {
        matches!(
            self,
            ItemKind::ShieldPendant
                | ItemKind::RingOfFire
                | ItemKind::AmuletOfIce
                | ItemKind::BootsOfSwiftness
                | ItemKind::CloakOfInvisibility
        )
    }

    pub fn is_throwable(&self) -> bool {
        matches!(self, ItemKind::Shuriken | ItemKind::ThrowingKnife | ItemKind::MagicOrb)
    }
}

const fn item(
    kind: ItemKind,
    name: &'static str,
    description: &'static str,
    color: [u8; 3],
    rarity: Rarity,
    max_stack: u32,
    effect_value: f32,
    effect_duration: f32,
) -> ItemDef {
    ItemDef {
        kind,
        name,
        description,
        color,
        rarity,
        max_stack,
        effect_value,
        effect_duration,
    }
}

use ItemKind as I;
use Rarity::{Common, Epic, Legendary, Rare};

/// Static table of all item definitions
pub static ITEM_DEFS: &[ItemDef] = &[
    // =========================================================================
    // CONSUMABLES
    // =========================================================================
    item(I::HealthPotion, "Health Potion", "Restore 75 HP", [255, 100, 100], Common, 10, HEALTH_POTION_HEAL as f32, 0.0),
    item(I::SpeedPotion, "Speed Potion", "+50% speed for 8s", [0, 200, 255], Rare, 5, 0.0, SPEED_POTION_DURATION),
    item(I::StealthPotion, "Stealth Potion", "Invisible for 6s", [100, 100, 150], Rare, 5, 0.0, STEALTH_POTION_DURATION),
    item(I::RagePotion, "Rage Potion", "+30% damage for 10s", [200, 0, 0], Rare, 5, 0.0, RAGE_POTION_DURATION),
    item(I::ManaPotion, "Mana Potion", "Restore all spell charges", [150, 100, 255], Rare, 5, 0.0, 0.0),
    item(I::HolyWaterOfLife, "Holy Water of Life", "Cure all curses", [255, 255, 200], Epic, 3, HOLY_WATER_OF_LIFE_HEAL as f32, 0.0),
    item(I::Stardust, "Stardust", "Enhance mana permanently", [200, 200, 255], Epic, 10, 0.0, 0.0),
    // =========================================================================
    // FOOD
    // =========================================================================
    item(I::Meat, "Raw Meat", "Restore 30 HP", [160, 82, 45], Common, 20, 30.0, 0.0),
    item(I::Apple, "Apple", "Restore 15 HP", [200, 0, 0], Common, 25, 15.0, 0.0),
    item(I::Bread, "Bread", "Restore 20 HP", [210, 180, 140], Common, 30, 20.0, 0.0),
    item(I::MagicalFruit, "Magical Fruit", "Restore 60 HP + Mana", [255, 20, 147], Epic, 3, 60.0, 0.0),
    item(I::Cheese, "Cheese", "Restore 25 HP", [255, 215, 0], Common, 15, 25.0, 0.0),
    // =========================================================================
    // EQUIPMENT
    // =========================================================================
    item(I::ShieldPendant, "Shield Pendant", "Create protective barrier", [173, 216, 230], Epic, 1, 0.0, 0.0),
    item(I::RingOfFire, "Ring of Fire", "+20% fire damage", [255, 69, 0], Epic, 1, 0.0, 0.0),
    item(I::AmuletOfIce, "Amulet of Ice", "+20% frost damage", [0, 191, 255], Epic, 1, 0.0, 0.0),
    item(I::BootsOfSwiftness, "Boots of Swiftness", "+25% movement speed", [64, 224, 208], Epic, 1, 0.0, 0.0),
    item(I::CloakOfInvisibility, "Cloak of Invisibility", "Stealth on demand", [128, 128, 128], Legendary, 1, 0.0, 0.0),
    item(I::PaladinNecklace, "Paladin Necklace", "Takes 30% less damage", [255, 215, 0], Legendary, 1, 0.0, 0.0),
    // =========================================================================
    // WEAPONS
    // =========================================================================
    item(I::ScorchingGauntlet, "Scorching Gauntlet", "+40% fire damage, Lvl 10+", [255, 100, 0], Epic, 1, 0.0, 0.0),
    item(I::DemonKingLongSword, "Demon King Long Sword", "Massive damage, Shadow Paladin drop", [200, 0, 0], Legendary, 1, 0.0, 0.0),
    item(I::VenomSword, "Venom Sword", "Poison damage, Giant Snake drop", [0, 200, 0], Epic, 1, 0.0, 0.0),
    // =========================================================================
    // THROWABLES
    // =========================================================================
    item(I::Shuriken, "Shuriken", "Throw for 15 damage", [192, 192, 192], Rare, 20, 15.0, 0.0),
    item(I::ThrowingKnife, "Throwing Knife", "Throw for 20 damage", [169, 169, 169], Rare, 15, 20.0, 0.0),
    item(I::MagicOrb, "Magic Orb", "Throw for 30 magic damage", [138, 43, 226], Epic, 10, 30.0, 0.0),
    // =========================================================================
    // CURRENCY
    // =========================================================================
    item(I::EssenceStones, "Essence Stone", "Common currency", [100, 255, 100], Common, 999, 0.0, 0.0),
    item(I::Orbs, "Orb", "Rare currency", [255, 200, 0], Legendary, 99, 0.0, 0.0),
    item(I::SeedsOfEvolution, "Seed of Evolution", "Create fierce goblin companion", [0, 200, 100], Epic, 1, 0.0, 0.0),
    // =========================================================================
    // QUEST
    // =========================================================================
    item(I::AncientKey, "Ancient Key", "Opens ancient doors", [218, 165, 32], Legendary, 1, 0.0, 0.0),
    item(I::TreasureMap, "Treasure Map", "Leads to treasure", [139, 69, 19], Epic, 1, 0.0, 0.0),
    item(I::MysticalRune, "Mystical Rune", "Powerful magical artifact", [75, 0, 130], Legendary, 1, 0.0, 0.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotionKind {
    Health,
    Speed,
    Stealth,
    Rage,
    Mana,
}

#[derive(Debug)]
pub struct PotionDef {
    pub kind: PotionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub heal: i32,
    pub duration: f32,
    pub rarity: Rarity,
}

pub static POTION_DEFS: &[PotionDef] = &[
    PotionDef {
        kind: PotionKind::Health,
        name: "Health Potion",
        description: "Restores 75 HP",
        heal: HEALTH_POTION_HEAL,
        duration: 0.0,
        rarity: Common,
    },
    PotionDef {
        kind: PotionKind::Speed,
        name: "Speed Potion",
        description: "Increases speed by 50% for 8 seconds",
        heal: 0,
        duration: SPEED_POTION_DURATION,
        rarity: Rare,
    },
    PotionDef {
        kind: PotionKind::Stealth,
        name: "Stealth Potion",
        description: "Become invisible for 6 seconds",
        heal: 0,
        duration: STEALTH_POTION_DURATION,
        rarity: Rare,
    },
    PotionDef {
        kind: PotionKind::Rage,
        name: "Rage Potion",
        description: "Increase damage by 30% for 10 seconds",
        heal: 0,
        duration: RAGE_POTION_DURATION,
        rarity: Rare,
    },
    PotionDef {
        kind: PotionKind::Mana,
        name: "Mana Potion",
        description: "Restore mana",
        heal: 0,
        duration: 0.0,
        rarity: Epic,
    },
    PotionDef {
        kind: PotionKind::Health,
        name: "Holy Water of Life",
        description: "Restores complete HP & curses",
        heal: HOLY_WATER_OF_LIFE_HEAL,
        duration: 0.0,
        rarity: Common,
    },
];

/// Weapon stats. The first row is the starter weapon and the lookup fallback.
#[derive(Debug)]
pub struct WeaponDef {
    pub name: &'static str,
    pub damage: i32,
    pub speed_multiplier: f32,
    pub crit_chance: f32,
    pub description: &'static str,
    pub required_level: u32,
}

pub static WEAPON_DEFS: &[WeaponDef] = &[
    WeaponDef { name: "Wooden Sword", damage: 10, speed_multiplier: 1.0, crit_chance: 0.0, description: "Basic starter weapon", required_level: 1 },
    WeaponDef { name: "Iron Katana", damage: 18, speed_multiplier: 1.2, crit_chance: 0.05, description: "Fast and sharp", required_level: 5 },
    WeaponDef { name: "Steel Dagger", damage: 12, speed_multiplier: 1.5, crit_chance: 0.10, description: "Fastest weapon with crit bonus", required_level: 10 },
    WeaponDef { name: "Shuriken", damage: 15, speed_multiplier: 0.8, crit_chance: 0.0, description: "Ranged throwing weapon", required_level: 15 },
    WeaponDef { name: "Shadow Ball", damage: 22, speed_multiplier: 0.7, crit_chance: 0.0, description: "Magical attack", required_level: 20 },
];

/// Read-only view over the catalogs, built once at startup and passed by
/// reference to whatever needs a lookup.
#[derive(Debug, Clone, Copy)]
pub struct Catalogs {
    items: &'static [ItemDef],
    potions: &'static [PotionDef],
    weapons: &'static [WeaponDef],
}

impl Catalogs {
    pub fn init() -> Self {
        info!(
            "Catalogs loaded: {} items, {} potions, {} weapons",
            ITEM_DEFS.len(),
            POTION_DEFS.len(),
            WEAPON_DEFS.len()
        );
        Self {
            items: ITEM_DEFS,
            potions: POTION_DEFS,
            weapons: WEAPON_DEFS,
        }
    }

    pub fn item(&self, kind: ItemKind) -> &'static ItemDef {
        self.items.iter().find(|def| def.kind == kind).unwrap_or(&self.items[0])
    }

    pub fn item_by_name(&self, name: &str) -> &'static ItemDef {
        self.items.iter().find(|def| def.name == name).unwrap_or(&self.items[0])
    }

    pub fn item_name(&self, kind: ItemKind) -> &'static str {
        self.item(kind).name
    }

    /// Exact-name match without the fallback, for callers that must tell
    /// unknown names apart
    pub fn find_item(&self, name: &str) -> Option<&'static ItemDef> {
        self.items.iter().find(|def| def.name == name)
    }

    pub fn potion(&self, kind: PotionKind) -> &'static PotionDef {
        self.potions.iter().find(|def| def.kind == kind).unwrap_or(&self.potions[0])
    }

    pub fn potion_by_name(&self, name: &str) -> &'static PotionDef {
        self.potions.iter().find(|def| def.name == name).unwrap_or(&self.potions[0])
    }

    pub fn is_potion(&self, name: &str) -> bool {
        self.potions.iter().any(|def| def.name == name)
    }

    pub fn weapon(&self, name: &str) -> &'static WeaponDef {
        self.weapons.iter().find(|def| def.name == name).unwrap_or(&self.weapons[0])
    }

    pub fn weapons(&self) -> &'static [WeaponDef] {
        self.weapons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_definition() {
        let catalogs = Catalogs::init();
        for def in ITEM_DEFS {
            assert_eq!(catalogs.item(def.kind).name, def.name);
        }
        assert_eq!(ITEM_DEFS.len(), 30);
    }

    #[test]
    fn test_name_lookup_falls_back_to_first_entry() {
        let catalogs = Catalogs::init();
        assert_eq!(catalogs.item_by_name("Cheese").kind, ItemKind::Cheese);
        assert_eq!(catalogs.item_by_name("Pizza").kind, ItemKind::HealthPotion);
        assert!(catalogs.find_item("Pizza").is_none());
        assert_eq!(catalogs.weapon("Laser Sword").name, "Wooden Sword");
        assert_eq!(catalogs.potion_by_name("Elixir").kind, PotionKind::Health);
        assert!(catalogs.is_potion("Rage Potion"));
        assert!(!catalogs.is_potion("Cheese"));
    }

    #[test]
    fn test_category_predicates() {
        assert!(ItemKind::ManaPotion.is_consumable());
        assert!(!ItemKind::HolyWaterOfLife.is_consumable());
        assert!(ItemKind::Cheese.is_food());
        assert!(ItemKind::CloakOfInvisibility.is_equipment());
        assert!(!ItemKind::PaladinNecklace.is_equipment());
        assert!(ItemKind::MagicOrb.is_throwable());
    }

    #[test]
    fn test_weapon_table() {
        let catalogs = Catalogs::init();
        let katana = catalogs.weapon("Iron Katana");
        assert_eq!(katana.damage, 18);
        assert_eq!(katana.required_level, 5);
        assert_eq!(catalogs.weapons().len(), 5);
    }

    #[test]
    fn test_holy_water_potion() {
        let catalogs = Catalogs::init();
        assert_eq!(catalogs.potion_by_name("Holy Water of Life").heal, 500);
        assert_eq!(catalogs.potion(PotionKind::Rage).duration, 10.0);
    }
}
