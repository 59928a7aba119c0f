//! Floor progression: when to leave the current floor and how the next one
//! is set up.

use log::info;

use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;

use super::game_state::GameState;
use super::simulation::spawn_wave;

/// The player has outgrown the current floor
pub fn should_advance(player_level: u32, floor: u32) -> bool {
    player_level > floor * LEVELS_PER_FLOOR
}

/// Regenerate the map for `floor` and repopulate it.
///
/// Enemies from the old floor are discarded, the player (and companion) move
/// to a fresh spawn point and a first wave is spawned.
pub fn enter_floor(state: &mut GameState, floor: u32, events: &mut EventQueue) {
    state.floor = floor;
    state.grid = Grid::new_floor(floor, &mut state.rng);
    state.world.clear();

    let spawn = state.grid.random_spawn_position(&mut state.rng);
    state.player.body.position = spawn;
    state.companions.relocate(spawn);

    spawn_wave(state);
    info!("Entered floor {} ({} rooms)", floor, state.grid.rooms.len());
    events.push(GameEvent::FloorEntered { floor });
}

pub fn enter_next_floor(state: &mut GameState, events: &mut EventQueue) {
    let next = state.floor + 1;
    enter_floor(state, next, events);
}
