//! Inventory screen state and inventory summaries.

use serde::{Deserialize, Serialize};

use crate::components::Inventory;

/// Open/closed flag plus the highlighted slot.
///
/// While open, the simulation is frozen and only selection, use and close
/// are processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryMenu {
    pub open: bool,
    pub selected: usize,
}

impl InventoryMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the cursor, clamped to the occupied slots
    pub fn navigate(&mut self, delta: i32, inventory: &Inventory) {
        if inventory.is_empty() {
            self.selected = 0;
            return;
        }
        let last = inventory.len() as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, last) as usize;
    }

    /// Name of the highlighted stack, if the cursor points at one
    pub fn selected_name<'a>(&self, inventory: &'a Inventory) -> Option<&'a str> {
        inventory.slots.get(self.selected).map(|slot| slot.name.as_str())
    }

    /// Keep the cursor valid after the inventory shrank
    pub fn clamp(&mut self, inventory: &Inventory) {
        self.selected = self.selected.min(inventory.len().saturating_sub(1));
    }
}

/// Potion stock by kind, as written to the save file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotionCounts {
    pub health: u32,
    pub speed: u32,
    pub stealth: u32,
    pub rage: u32,
    pub mana: u32,
}

impl PotionCounts {
    pub fn from_inventory(inventory: &Inventory) -> Self {
        Self {
            health: inventory.quantity_of("Health Potion"),
            speed: inventory.quantity_of("Speed Potion"),
            stealth: inventory.quantity_of("Stealth Potion"),
            rage: inventory.quantity_of("Rage Potion"),
            mana: inventory.quantity_of("Mana Potion"),
        }
    }

    /// Put the counted potions back into an inventory
    pub fn restore_into(&self, inventory: &mut Inventory) {
        for (name, quantity) in [
            ("Health Potion", self.health),
            ("Speed Potion", self.speed),
            ("Stealth Potion", self.stealth),
            ("Rage Potion", self.rage),
            ("Mana Potion", self.mana),
        ] {
            if quantity > 0 {
                inventory.add_item(name, quantity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inv = Inventory::new(24);
        inv.add_item("Health Potion", 3);
        inv.add_item("Apple", 1);
        inv.add_item("Mana Potion", 2);
        inv
    }

    #[test]
    fn test_navigation_clamps() {
        let inv = stocked();
        let mut menu = InventoryMenu::default();
        menu.toggle();
        menu.navigate(-1, &inv);
        assert_eq!(menu.selected, 0);
        menu.navigate(5, &inv);
        assert_eq!(menu.selected, 2);
        assert_eq!(menu.selected_name(&inv), Some("Mana Potion"));
    }

    #[test]
    fn test_toggle_resets_selection() {
        let inv = stocked();
        let mut menu = InventoryMenu::default();
        menu.toggle();
        menu.navigate(1, &inv);
        menu.toggle();
        assert!(!menu.open);
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_potion_counts() {
        let counts = PotionCounts::from_inventory(&stocked());
        assert_eq!(counts, PotionCounts { health: 3, mana: 2, ..Default::default() });

        let mut fresh = Inventory::new(24);
        counts.restore_into(&mut fresh);
        assert_eq!(fresh.quantity_of("Health Potion"), 3);
        assert_eq!(fresh.len(), 2);
    }
}
