//! Simulation advancement: the per-frame encounter sequence, spawn waves and
//! the player-initiated actions (spells, items) that feed into it.

use glam::Vec2;
use hecs::World;
use log::{debug, info};
use rand::rngs::StdRng;

use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::input::{Action, ActionSnapshot};
use crate::player::SpellKind;
use crate::spawning::{select_archetype, spawn_enemy};
use crate::systems::ai;
use crate::systems::combat::{self, CombatResolver, CritProfile};
use crate::systems::experience::XpCurve;
use crate::systems::item_defs::Catalogs;
use crate::systems::items::ItemUseResult;
use crate::systems::movement::player_move;

use super::floor_transition;
use super::game_state::GameState;

/// Tuning shared by every frame of a run
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    pub catalogs: Catalogs,
    pub xp_curve: XpCurve,
    /// Roll crits from the player's stats instead of the fixed profile
    pub crit_from_player: bool,
}

impl Rules {
    pub fn new(catalogs: Catalogs, xp_curve: XpCurve) -> Self {
        Self {
            catalogs,
            xp_curve,
            crit_from_player: false,
        }
    }
}

/// Split the state into the enemy world and a resolver over everything else
fn resolver<'a>(
    state: &'a mut GameState,
    rules: &'a Rules,
    events: &'a mut EventQueue,
) -> (&'a mut World, CombatResolver<'a, StdRng>) {
    let crit = if rules.crit_from_player {
        CritProfile::from_player(&state.player)
    } else {
        CritProfile::MELEE
    };
    let can_tame = state.companions.can_tame();
    (
        &mut state.world,
        CombatResolver {
            player: &mut state.player,
            stats: &mut state.stats,
            catalogs: &rules.catalogs,
            xp_curve: &rules.xp_curve,
            crit,
            can_tame,
            rng: &mut state.rng,
            events,
        },
    )
}

/// Spawn up to one wave, never exceeding the live cap. Returns how many
/// enemies were created.
pub fn spawn_wave(state: &mut GameState) -> usize {
    let live = state.live_enemy_count() as u32;
    let count = SPAWN_WAVE_SIZE.min(state.max_enemies.saturating_sub(live)) as usize;
    if count == 0 {
        return 0;
    }

    let level = state.player.level();
    let positions = state.grid.spawn_positions(count, &mut state.rng);
    for position in positions {
        let archetype = select_archetype(level, &mut state.rng);
        spawn_enemy(&mut state.world, archetype, level, position);
    }
    debug!("Spawned wave of {} ({} live before)", count, live);
    count
}

/// Advance one frame.
///
/// Timers always tick. With the inventory open nothing else moves. Otherwise
/// the order is: player, enemies, companion, melee, contact damage, dead
/// removal, floor advance, spawn wave, cap, death.
pub fn step(state: &mut GameState, rules: &Rules, actions: &ActionSnapshot, dt: f32, events: &mut EventQueue) {
    puffin::profile_function!();

    state.game_time += dt;
    state.spawn_timer += dt;
    state.attack_flash = (state.attack_flash - dt).max(0.0);

    if state.inventory_menu.open {
        return;
    }

    {
        puffin::profile_scope!("player");
        state.player.update_timers(dt);
        player_move(&mut state.player, &state.grid, actions.move_direction(), dt);
    }

    ai::update_enemies(&mut state.world, &state.grid, &mut state.player, dt, events);

    let player_position = state.player.position();
    if let Some((target, damage)) = state.companions.update(&state.world, player_position, dt) {
        let (world, mut combat) = resolver(state, rules, events);
        combat.companion_strike(world, target, damage);
    }

    if actions.was_pressed(Action::Attack) {
        let (world, mut combat) = resolver(state, rules, events);
        if combat.melee_attack(world).swung {
            state.attack_flash = ATTACK_FLASH_DURATION;
        }
    }

    combat::apply_contact_damage(&state.world, &mut state.player, events);
    combat::remove_dead(&mut state.world);

    if floor_transition::should_advance(state.player.level(), state.floor) {
        floor_transition::enter_next_floor(state, events);
    }

    if state.spawn_timer >= ENEMY_SPAWN_INTERVAL && (state.live_enemy_count() as u32) < state.max_enemies {
        spawn_wave(state);
        state.spawn_timer = 0.0;
    }

    state.max_enemies = GameState::max_enemies_for(state.player.level());

    if !state.player.is_alive() {
        state.game_over = true;
        if !state.death_announced {
            state.death_announced = true;
            info!("{} has fallen with {} points", state.player.name, state.stats.score);
            events.push(GameEvent::PlayerDied {
                score: state.stats.score,
            });
        }
    }
}

/// Cast a spell. Returns the number of enemies hit, or `None` if it was not
/// castable.
pub fn cast_spell(state: &mut GameState, rules: &Rules, spell: SpellKind, events: &mut EventQueue) -> Option<usize> {
    let (world, mut combat) = resolver(state, rules, events);
    combat.cast(world, spell)
}

/// Use one unit of an inventory item by name, announcing it on success
pub fn use_item(state: &mut GameState, rules: &Rules, name: &str, events: &mut EventQueue) -> ItemUseResult {
    let result = state.player.use_item(name, &rules.catalogs);
    if result != ItemUseResult::NotFound {
        events.push(GameEvent::ItemUsed {
            name: name.to_string(),
            result,
            position: state.player.position() + Vec2::splat(CENTER_OFFSET),
        });
    }
    state.inventory_menu.clamp(&state.player.inventory);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Body, Vitals};
    use crate::engine::initialization::new_run;
    use crate::grid::Grid;
    use crate::spawning::Archetype;
    use crate::systems::item_defs::Catalogs;

    fn rules() -> Rules {
        Rules::new(Catalogs::init(), XpCurve::default())
    }

    fn quiet_state(seed: u64) -> GameState {
        let mut state = new_run("Tester", seed, &Catalogs::init());
        state.world.clear();
        state
    }

    fn open_floor() -> Grid {
        let mut rng = <StdRng as rand::SeedableRng>::seed_from_u64(0);
        let mut grid = Grid::with_size(40, 40, 1, &mut rng);
        for tile in grid.tiles.iter_mut() {
            *tile = crate::tile::TileType::Floor;
        }
        grid
    }

    #[test]
    fn test_inventory_open_freezes_simulation() {
        let mut state = quiet_state(1);
        let rules = rules();
        let mut events = EventQueue::new();
        let start = state.player.position();
        state.inventory_menu.open = true;

        let mut actions = ActionSnapshot::new();
        actions.hold(Action::MoveRight);
        step(&mut state, &rules, &actions, 0.5, &mut events);

        assert_eq!(state.player.position(), start);
        assert!((state.game_time - 0.5).abs() < 1e-6);
        assert!((state.spawn_timer - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_wave_respects_cap() {
        let mut state = quiet_state(2);
        state.max_enemies = 3;
        assert_eq!(spawn_wave(&mut state), 2);
        assert_eq!(spawn_wave(&mut state), 1);
        assert_eq!(spawn_wave(&mut state), 0);
        assert_eq!(state.live_enemy_count(), 3);
    }

    #[test]
    fn test_spawn_timer_triggers_wave_and_resets() {
        let mut state = quiet_state(3);
        let rules = rules();
        let mut events = EventQueue::new();
        state.spawn_timer = ENEMY_SPAWN_INTERVAL - 0.01;

        step(&mut state, &rules, &ActionSnapshot::new(), 0.02, &mut events);
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.live_enemy_count(), 2);
    }

    #[test]
    fn test_melee_kill_is_removed_and_rewarded() {
        let mut state = quiet_state(4);
        let rules = rules();
        let mut events = EventQueue::new();
        state.grid = open_floor();
        state.player.body.position = Vec2::new(300.0, 300.0);
        state.player.time_since_attack = PLAYER_ATTACK_COOLDOWN;
        let goblin = spawn_enemy(&mut state.world, Archetype::Goblin, 1, Vec2::new(310.0, 310.0));
        if let Ok(mut vitals) = state.world.get::<&mut Vitals>(goblin) {
            vitals.set_health(1);
        }

        let mut actions = ActionSnapshot::new();
        actions.press(Action::Attack);
        step(&mut state, &rules, &actions, 0.016, &mut events);

        assert_eq!(state.stats.enemies_killed, 1);
        assert_eq!(state.stats.score, 100);
        assert!(state.world.get::<&Body>(goblin).is_err());
        assert_eq!(state.attack_flash, ATTACK_FLASH_DURATION);
    }

    #[test]
    fn test_holding_attack_does_not_swing() {
        let mut state = quiet_state(4);
        let rules = rules();
        let mut events = EventQueue::new();
        state.grid = open_floor();
        state.player.body.position = Vec2::new(300.0, 300.0);
        let goblin = spawn_enemy(&mut state.world, Archetype::Goblin, 1, Vec2::new(310.0, 310.0));
        let full = state.world.get::<&Vitals>(goblin).map(|v| v.health).unwrap();

        let mut actions = ActionSnapshot::new();
        actions.hold(Action::Attack);
        let mut swings = 0;
        for _ in 0..60 {
            step(&mut state, &rules, &actions, 1.0 / 60.0, &mut events);
            if state.attack_flash > 0.0 {
                swings += 1;
            }
        }

        assert_eq!(swings, 0);
        assert!(!events.drain().any(|e| e == GameEvent::MeleeLanded));
        assert_eq!(state.world.get::<&Vitals>(goblin).map(|v| v.health).unwrap(), full);
    }

    #[test]
    fn test_floor_advances_past_level_threshold() {
        let mut state = quiet_state(5);
        let rules = rules();
        let mut events = EventQueue::new();
        state.player.restore_level(6);
        spawn_enemy(&mut state.world, Archetype::Slime, 6, Vec2::new(5.0, 5.0));

        step(&mut state, &rules, &ActionSnapshot::new(), 0.016, &mut events);

        assert_eq!(state.floor, 2);
        assert!(events.iter().any(|e| *e == GameEvent::FloorEntered { floor: 2 }));
        assert!(state.live_enemy_count() <= 2);
    }

    #[test]
    fn test_death_announced_once() {
        let mut state = quiet_state(6);
        let rules = rules();
        let mut events = EventQueue::new();
        state.player.vitals.take_damage(10_000);

        step(&mut state, &rules, &ActionSnapshot::new(), 0.016, &mut events);
        step(&mut state, &rules, &ActionSnapshot::new(), 0.016, &mut events);

        assert!(state.game_over);
        let deaths = events.iter().filter(|e| matches!(e, GameEvent::PlayerDied { .. })).count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_use_item_reports_and_counts_only_real_uses() {
        let mut state = quiet_state(7);
        let rules = rules();
        let mut events = EventQueue::new();
        state.player.vitals.take_damage(100);
        state.player.add_item("Health Potion", 1);

        assert_eq!(use_item(&mut state, &rules, "Health Potion", &mut events), ItemUseResult::Healed(75));
        assert_eq!(use_item(&mut state, &rules, "Health Potion", &mut events), ItemUseResult::NotFound);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_locked_spell_does_not_cast() {
        let mut state = quiet_state(8);
        let rules = rules();
        let mut events = EventQueue::new();
        assert_eq!(cast_spell(&mut state, &rules, SpellKind::Fireball, &mut events), None);
        assert!(events.is_empty());
    }
}
