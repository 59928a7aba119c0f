//! Run setup: fresh runs, runs restored from a save, and the snapshot taken
//! when saving.

use hecs::World;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::companion::CompanionSystem;
use crate::grid::Grid;
use crate::player::Player;
use crate::save::SaveData;
use crate::systems::inventory::{InventoryMenu, PotionCounts};
use crate::systems::item_defs::Catalogs;

use super::game_state::{GameState, RunStats};
use super::simulation::spawn_wave;

/// Build the state for floor `floor` with a new level-1 player standing in a
/// random room, and spawn the first wave.
fn build_state(name: &str, floor: u32, mut rng: StdRng, catalogs: &Catalogs) -> GameState {
    let grid = Grid::new_floor(floor, &mut rng);
    let spawn = grid.random_spawn_position(&mut rng);
    let player = Player::new(name, spawn, catalogs);
    let max_enemies = GameState::max_enemies_for(player.level());

    GameState {
        world: World::new(),
        grid,
        player,
        companions: CompanionSystem::new(),
        stats: RunStats {
            highest_floor: floor,
            ..Default::default()
        },
        floor,
        game_time: 0.0,
        spawn_timer: 0.0,
        max_enemies,
        paused: false,
        game_over: false,
        inventory_menu: InventoryMenu::default(),
        attack_flash: 0.0,
        rng,
        death_announced: false,
    }
}

/// Start a new run on floor 1
pub fn new_run(name: &str, seed: u64, catalogs: &Catalogs) -> GameState {
    let mut state = build_state(name, 1, StdRng::seed_from_u64(seed), catalogs);
    spawn_wave(&mut state);
    info!("New run for {} (seed {})", name, seed);
    state
}

/// Start a run from saved progress. The saved floor is regenerated rather
/// than restored tile for tile.
pub fn restore_run(save: &SaveData, seed: u64, catalogs: &Catalogs) -> GameState {
    let floor = save.current_floor.max(1);
    let mut state = build_state(&save.player_name, floor, StdRng::seed_from_u64(seed), catalogs);

    let player = &mut state.player;
    player.restore_level(save.player_level);
    if save.player_max_health > 0 {
        player.vitals.set_max_health(save.player_max_health);
    }
    // A save taken at death comes back at full health
    if save.player_health > 0 {
        player.vitals.set_health(save.player_health);
    } else {
        player.vitals.set_health(player.vitals.max_health);
    }
    player.vitals.experience = save.player_experience;
    player.weapon = catalogs.weapon(&save.current_weapon);
    save.potions.restore_into(&mut player.inventory);

    state.stats = RunStats {
        score: save.score,
        enemies_killed: save.enemies_killed,
        damage_dealt: save.total_damage_dealt,
        damage_taken: save.total_damage_taken,
        potions_used: save.potions_used,
        highest_floor: save.highest_floor.max(floor),
    };
    state.game_time = save.play_time.max(0.0);
    state.max_enemies = GameState::max_enemies_for(state.player.level());
    spawn_wave(&mut state);

    info!(
        "Restored {} at level {} on floor {}",
        state.player.name,
        state.player.level(),
        floor
    );
    state
}

/// Progress snapshot for the save file
pub fn snapshot(state: &GameState) -> SaveData {
    let player = &state.player;
    SaveData {
        player_name: player.name.clone(),
        player_level: player.level(),
        player_health: player.vitals.health,
        player_max_health: player.vitals.max_health,
        player_experience: player.vitals.experience,
        score: state.stats.score,
        enemies_killed: state.stats.enemies_killed,
        current_floor: state.floor,
        play_time: state.game_time,
        current_weapon: player.weapon.name.to_string(),
        potions: PotionCounts::from_inventory(&player.inventory),
        total_damage_dealt: state.stats.damage_dealt,
        total_damage_taken: state.stats.damage_taken,
        potions_used: state.stats.potions_used,
        highest_floor: state.stats.highest_floor.max(state.floor),
        last_save_time: String::new(),
    }
}
