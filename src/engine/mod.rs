//! Game engine - owns all game state and provides a clean API to the application shell.
//!
//! The engine handles:
//! - Game state (enemies, map, player, companion, run totals)
//! - Input processing from the per-tick action snapshot
//! - Simulation advancement
//! - Event processing (effects, camera, audio cues, combat log, stats)
//! - Save/load hookup
//!
//! The application shell (main.rs) only handles:
//! - Producing action snapshots
//! - Supplying an audio sink and a renderer
//! - Driving the tick at a fixed dt

pub mod floor_transition;
pub mod game_state;
pub mod initialization;
pub mod simulation;

pub use game_state::{GameState, RunStats};
pub use simulation::Rules;

use log::{error, info, warn};

use crate::audio::{AudioSink, SoundEvent};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::input::{Action, ActionSnapshot};
use crate::player::SpellKind;
use crate::save::SaveStore;
use crate::systems::combat::CombatLog;
use crate::systems::item_defs::Catalogs;
use crate::vfx::VfxManager;

/// Mode signalled by the menu shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMode {
    MainMenu,
    NewGame,
    LoadGame,
    Settings,
    Playing,
    Paused,
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// The player asked to leave the run loop
    pub quit: bool,
    pub game_over: bool,
    /// Events produced (and consumed) this tick
    pub events: usize,
}

const QUICK_POTIONS: [(Action, &str); 4] = [
    (Action::QuickHealth, "Health Potion"),
    (Action::QuickSpeed, "Speed Potion"),
    (Action::QuickStealth, "Stealth Potion"),
    (Action::QuickRage, "Rage Potion"),
];

const SPELL_KEYS: [(Action, SpellKind); 4] = [
    (Action::Cast1, SpellKind::Fireball),
    (Action::Cast2, SpellKind::ChainLightning),
    (Action::Cast3, SpellKind::FrostNova),
    (Action::Cast4, SpellKind::Whirlwind),
];

/// The game engine - owns all game state and simulation logic.
pub struct GameEngine {
    pub config: GameConfig,

    pub rules: Rules,

    /// Current menu mode
    pub mode: MenuMode,

    /// Run state - None until a game is started from the menu
    pub state: Option<GameState>,

    /// Visual effects manager
    pub vfx: VfxManager,

    pub camera: Camera,

    /// Event queue for game events
    pub events: EventQueue,

    pub combat_log: CombatLog,

    pub saves: SaveStore,

    /// Seed of the run in progress; the next run uses the following one
    seed: u64,
}

impl GameEngine {
    /// Create an engine on the main menu.
    pub fn new(config: GameConfig, catalogs: Catalogs) -> Self {
        let seed = config.resolve_seed();
        let mut rules = Rules::new(catalogs, config.xp_curve());
        rules.crit_from_player = config.crit_from_player;
        let saves = SaveStore::new(config.save_path.clone(), config.backup_path.clone());
        let camera = Camera::new(config.viewport_width, config.viewport_height, seed as u32);

        Self {
            config,
            rules,
            mode: MenuMode::MainMenu,
            state: None,
            vfx: VfxManager::new(),
            camera,
            events: EventQueue::new(),
            combat_log: CombatLog::default(),
            saves,
            seed,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.mode == MenuMode::Playing && self.state.is_some()
    }

    /// React to a mode change from the menu shell.
    ///
    /// New game wipes the save and starts fresh under `name`; load game
    /// restores the save or falls back to a fresh run.
    pub fn handle_menu(&mut self, mode: MenuMode, name: Option<&str>) {
        match mode {
            MenuMode::NewGame => {
                if let Err(e) = self.saves.delete() {
                    warn!("Could not delete old save: {}", e);
                }
                let name = name.unwrap_or(self.config.player_name.as_str()).to_string();
                self.start_fresh(&name);
            }
            MenuMode::LoadGame => match self.saves.load_or_none() {
                Some(save) => {
                    let state = initialization::restore_run(&save, self.next_seed(), &self.rules.catalogs);
                    self.begin(state);
                }
                None => {
                    info!("No save to load, starting a new run");
                    let name = name.unwrap_or(self.config.player_name.as_str()).to_string();
                    self.start_fresh(&name);
                }
            },
            MenuMode::Paused => {
                if let Some(state) = self.state.as_mut() {
                    state.paused = true;
                }
                self.mode = MenuMode::Paused;
            }
            MenuMode::Playing => {
                if let Some(state) = self.state.as_mut() {
                    state.paused = false;
                    self.mode = MenuMode::Playing;
                }
            }
            MenuMode::MainMenu | MenuMode::Settings => self.mode = mode,
        }
    }

    /// Start a fresh run on floor 1
    pub fn start_fresh(&mut self, name: &str) {
        let state = initialization::new_run(name, self.next_seed(), &self.rules.catalogs);
        self.begin(state);
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.seed;
        self.seed = self.seed.wrapping_add(1);
        seed
    }

    fn begin(&mut self, state: GameState) {
        self.vfx.clear();
        self.events.clear();
        self.combat_log.clear();
        self.camera.snap_to(state.player.position());
        self.camera.follow(state.player.position(), state.grid.pixel_size());
        self.state = Some(state);
        self.mode = MenuMode::Playing;
    }

    /// Write the current run to disk. Failures are logged and announced.
    pub fn save(&mut self) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        let snapshot = initialization::snapshot(state);
        match self.saves.save(&snapshot) {
            Ok(()) => {
                self.events.push(GameEvent::GameSaved);
                true
            }
            Err(e) => {
                error!("Save failed: {}", e);
                self.events.push(GameEvent::SaveFailed { reason: e.to_string() });
                false
            }
        }
    }

    /// Advance one frame: input, simulation, then event fan-out.
    pub fn tick(&mut self, dt: f32, actions: &ActionSnapshot, audio: &mut dyn AudioSink) -> TickResult {
        puffin::profile_function!();

        if self.state.is_none() || !matches!(self.mode, MenuMode::Playing | MenuMode::Paused) {
            return TickResult::default();
        }

        let mut result = TickResult::default();
        self.process_input(actions, &mut result);

        if let Some(state) = self.state.as_mut() {
            if state.is_running() {
                self.camera.tick_shake(dt);
                simulation::step(state, &self.rules, actions, dt, &mut self.events);
                if !state.inventory_menu.open {
                    self.vfx.update(dt);
                    self.camera.follow(state.player.position(), state.grid.pixel_size());
                }
            }
            self.mode = if state.paused { MenuMode::Paused } else { MenuMode::Playing };
        }

        result.events = self.process_events(audio);
        result.game_over = self.state.as_ref().map_or(false, |s| s.game_over);
        result
    }

    /// Handle this tick's actions before the simulation runs
    fn process_input(&mut self, actions: &ActionSnapshot, result: &mut TickResult) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if actions.was_pressed(Action::ToggleInventory) {
            state.inventory_menu.toggle();
        }

        if state.inventory_menu.open {
            if actions.was_pressed(Action::NavigateUp) {
                state.inventory_menu.navigate(-1, &state.player.inventory);
            }
            if actions.was_pressed(Action::NavigateDown) {
                state.inventory_menu.navigate(1, &state.player.inventory);
            }
            if actions.was_pressed(Action::UseItem) || actions.was_pressed(Action::Confirm) {
                if let Some(name) = state.inventory_menu.selected_name(&state.player.inventory) {
                    let name = name.to_string();
                    simulation::use_item(state, &self.rules, &name, &mut self.events);
                }
            }
            if actions.was_pressed(Action::Cancel) {
                state.inventory_menu.close();
            }
            return;
        }

        if actions.was_pressed(Action::Pause) {
            state.paused = !state.paused;
        }
        if actions.was_pressed(Action::Quit) {
            result.quit = true;
        }
        if actions.was_pressed(Action::Confirm) && state.game_over {
            let name = state.player.name.clone();
            info!("Restarting run for {}", name);
            self.start_fresh(&name);
            return;
        }
        if actions.was_pressed(Action::Save) {
            self.save();
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.paused || state.game_over || !state.player.is_alive() {
            return;
        }

        for (action, potion) in QUICK_POTIONS {
            if actions.was_pressed(action) && state.player.has_item(potion) {
                simulation::use_item(state, &self.rules, potion, &mut self.events);
            }
        }

        if actions.was_pressed(Action::Shield) && state.player.activate_shield() {
            self.events.push(GameEvent::ShieldRaised {
                position: state.player.position(),
            });
        }

        // One cast per tick, first pressed key wins
        if let Some((_, spell)) = SPELL_KEYS.iter().find(|(action, _)| actions.was_pressed(*action)) {
            simulation::cast_spell(state, &self.rules, *spell, &mut self.events);
        }
    }

    /// Fan every queued event out to its consumers. Returns how many there were.
    fn process_events(&mut self, audio: &mut dyn AudioSink) -> usize {
        puffin::profile_function!();

        let events: Vec<GameEvent> = self.events.drain().collect();
        let Some(state) = self.state.as_mut() else {
            return events.len();
        };

        for event in &events {
            state.apply_event(event, &self.rules.catalogs);
            self.vfx.handle_event(event, &mut state.rng);
            self.camera.handle_event(event);
            self.combat_log.handle_event(event, state.game_time);
            if let Some(sound) = SoundEvent::for_event(event) {
                audio.play(sound);
            }
            match event {
                GameEvent::FloorEntered { .. } => {
                    self.camera.snap_to(state.player.position());
                }
                GameEvent::SaveFailed { reason } => {
                    self.combat_log.record(state.game_time, format!("Save failed: {}", reason));
                }
                GameEvent::GameSaved => {
                    self.combat_log.record(state.game_time, "Game saved");
                }
                _ => {}
            }
        }
        events.len()
    }
}
