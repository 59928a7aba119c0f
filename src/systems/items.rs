//! Item use: name-keyed effects applied to the player.

use log::debug;

use crate::constants::*;
use crate::player::{BuffKind, Player};
use crate::systems::item_defs::Catalogs;

/// Result of attempting to use an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemUseResult {
    /// Consumed and healed by the given amount (possibly 0 at full health)
    Healed(i32),
    /// Consumed and started or extended a buff
    Buffed(BuffKind, f32),
    /// Consumed and made every spell ready
    SpellsRefreshed,
    /// Consumed with no gameplay effect
    Consumed,
    /// No such item in the inventory
    NotFound,
}

/// Consume one unit of `name` and apply its effect.
///
/// Effects are keyed by display name; anything without an effect is still
/// consumed.
pub fn use_item(player: &mut Player, name: &str, catalogs: &Catalogs) -> ItemUseResult {
    if !player.inventory.take_one(name) {
        return ItemUseResult::NotFound;
    }

    let result = match name {
        "Health Potion" => ItemUseResult::Healed(player.vitals.heal(HEALTH_POTION_HEAL)),
        "Holy Water of Life" => ItemUseResult::Healed(player.vitals.heal(HOLY_WATER_OF_LIFE_HEAL)),
        "Speed Potion" => buff(player, BuffKind::Speed, SPEED_POTION_DURATION),
        "Stealth Potion" => buff(player, BuffKind::Stealth, STEALTH_POTION_DURATION),
        "Rage Potion" => buff(player, BuffKind::Rage, RAGE_POTION_DURATION),
        "Mana Potion" => {
            player.refresh_spells();
            ItemUseResult::SpellsRefreshed
        }
        _ => match catalogs.find_item(name) {
            Some(def) if def.kind.is_food() => ItemUseResult::Healed(player.vitals.heal(def.effect_value as i32)),
            _ => ItemUseResult::Consumed,
        },
    };

    debug!("{} used {}: {:?}", player.name, name, result);
    result
}

fn buff(player: &mut Player, kind: BuffKind, duration: f32) -> ItemUseResult {
    player.apply_buff(kind, duration);
    ItemUseResult::Buffed(kind, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (Player, Catalogs) {
        let catalogs = Catalogs::init();
        (Player::new("Tester", Vec2::ZERO, &catalogs), catalogs)
    }

    #[test]
    fn test_health_potion_heals_and_consumes() {
        let (mut player, catalogs) = setup();
        player.vitals.set_health(50);
        player.add_item("Health Potion", 2);
        assert_eq!(use_item(&mut player, "Health Potion", &catalogs), ItemUseResult::Healed(75));
        assert_eq!(player.vitals.health, 125);
        assert_eq!(player.inventory.quantity_of("Health Potion"), 1);
    }

    #[test]
    fn test_last_unit_removes_slot() {
        let (mut player, catalogs) = setup();
        player.add_item("Rage Potion", 1);
        assert!(matches!(
            use_item(&mut player, "Rage Potion", &catalogs),
            ItemUseResult::Buffed(BuffKind::Rage, _)
        ));
        assert!(player.inventory.is_empty());
        assert!(player.is_raging());
    }

    #[test]
    fn test_missing_item() {
        let (mut player, catalogs) = setup();
        assert_eq!(use_item(&mut player, "Health Potion", &catalogs), ItemUseResult::NotFound);
    }

    #[test]
    fn test_food_heals_by_catalog_value() {
        let (mut player, catalogs) = setup();
        player.vitals.set_health(10);
        player.add_item("Raw Meat", 1);
        assert_eq!(use_item(&mut player, "Raw Meat", &catalogs), ItemUseResult::Healed(30));
    }

    #[test]
    fn test_unknown_effect_is_still_consumed() {
        let (mut player, catalogs) = setup();
        player.add_item("Essence Stone", 3);
        assert_eq!(use_item(&mut player, "Essence Stone", &catalogs), ItemUseResult::Consumed);
        assert_eq!(player.inventory.quantity_of("Essence Stone"), 2);
    }
}
