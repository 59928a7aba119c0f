//! Core game state - owns the simulation data for one run.

use hecs::World;
use rand::rngs::StdRng;

use crate::companion::CompanionSystem;
use crate::constants::*;
use crate::events::GameEvent;
use crate::grid::Grid;
use crate::player::Player;
use crate::queries;
use crate::spawning::Archetype;
use crate::systems::item_defs::Catalogs;
use crate::systems::inventory::InventoryMenu;
use crate::systems::items::ItemUseResult;

/// Running totals for the current run, persisted with the save
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub score: u32,
    pub enemies_killed: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub potions_used: u32,
    pub highest_floor: u32,
}

/// Core game state - owns all simulation data.
pub struct GameState {
    /// Live enemies
    pub world: World,

    /// Current floor map
    pub grid: Grid,

    pub player: Player,

    pub companions: CompanionSystem,

    pub stats: RunStats,

    /// Current floor number, starting at 1
    pub floor: u32,

    /// Seconds of simulated play, persisted as play time
    pub game_time: f32,

    /// Seconds since the last spawn wave
    pub spawn_timer: f32,

    /// Live enemy cap, recomputed every frame
    pub max_enemies: u32,

    pub paused: bool,
    pub game_over: bool,

    pub inventory_menu: InventoryMenu,

    /// Remaining time of the melee swing highlight
    pub attack_flash: f32,

    /// Single source of gameplay randomness for the run
    pub rng: StdRng,

    /// Set once the death of the player has been announced
    pub death_announced: bool,
}

impl GameState {
    /// Live enemy cap for a player level
    pub fn max_enemies_for(level: u32) -> u32 {
        (BASE_MAX_ENEMIES + level / 2).min(MAX_ENEMY_CAP)
    }

    pub fn live_enemy_count(&self) -> usize {
        queries::live_enemy_count(&self.world)
    }

    /// Simulation advances only while neither paused nor over
    pub fn is_running(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Apply the state-side consequences of an event emitted this frame
    pub fn apply_event(&mut self, event: &GameEvent, catalogs: &Catalogs) {
        match event {
            GameEvent::PlayerHurt { damage, .. } => {
                self.stats.damage_taken += (*damage).max(0) as u64;
            }
            GameEvent::ItemUsed { name, result, .. } => {
                if *result != ItemUseResult::NotFound && catalogs.is_potion(name) {
                    self.stats.potions_used += 1;
                }
            }
            GameEvent::CompanionTamed { position, level } => {
                self.companions.tame(Archetype::FallenShadowPaladin, *level, *position);
            }
            GameEvent::FloorEntered { floor } => {
                self.stats.highest_floor = self.stats.highest_floor.max(*floor);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_enemies_scales_and_caps() {
        assert_eq!(GameState::max_enemies_for(1), 3);
        assert_eq!(GameState::max_enemies_for(4), 5);
        assert_eq!(GameState::max_enemies_for(10), 8);
        assert_eq!(GameState::max_enemies_for(40), 8);
    }
}
