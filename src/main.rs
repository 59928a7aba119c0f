mod audio;
mod camera;
mod companion;
mod components;
mod config;
mod constants;
mod dungeon_gen;
mod engine;
mod error;
mod events;
mod grid;
mod input;
mod player;
mod queries;
mod render;
mod save;
mod spawning;
mod systems;
mod tile;
mod vfx;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use audio::{AudioSink, LogAudio};
use config::GameConfig;
use engine::{GameEngine, MenuMode};
use error::StartupError;
use input::Autopilot;
use render::{draw_frame, CommandRecorder};
use systems::item_defs::Catalogs;

/// Frames the autopilot walks in one direction before turning
const AUTOPILOT_LEG_FRAMES: u64 = 90;

/// Real-time dungeon crawler, headless runner
#[derive(Parser, Debug)]
#[command(name = "dungeon-crawler")]
#[command(version, about = "Dungeon crawler - fight your way down", long_about = None)]
struct Args {
    /// Continue from the save file instead of starting fresh
    #[arg(long)]
    load: bool,

    /// Player name for a new run
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Path to the JSON config file
    #[arg(default_value = "config.json")]
    config: PathBuf,
}

fn prepare_save_dir(save_path: &Path) -> Result<(), StartupError> {
    let Some(dir) = save_path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(dir).map_err(|source| StartupError::SaveDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn run(args: Args) -> Result<(), StartupError> {
    let config = GameConfig::load(&args.config)?;
    prepare_save_dir(&config.save_path)?;
    puffin::set_scopes_on(config.profiling);

    let catalogs = Catalogs::init();
    let frame_dt = config.frame_dt;
    let frame_limit = config.headless_frames;
    let mut audio = LogAudio::new(config.volumes);
    audio.set_volumes(config.volumes);

    let mut engine = GameEngine::new(config, catalogs);
    let mode = if args.load { MenuMode::LoadGame } else { MenuMode::NewGame };
    engine.handle_menu(mode, args.name.as_deref());

    let mut autopilot = Autopilot::new(AUTOPILOT_LEG_FRAMES);
    let mut recorder = CommandRecorder::default();
    let mut frames = 0u64;

    loop {
        puffin::GlobalProfiler::lock().new_frame();

        let actions = autopilot.next_snapshot();
        let result = engine.tick(frame_dt, &actions, &mut audio);
        frames += 1;

        if let Some(state) = engine.state.as_ref() {
            recorder.clear();
            draw_frame(&mut recorder, state, &engine.camera, &engine.vfx, &engine.combat_log);
        }

        if result.quit || result.game_over || (frame_limit > 0 && frames >= frame_limit) {
            break;
        }
    }

    engine.save();
    if let Some(state) = engine.state.as_ref() {
        info!(
            "Run ended after {} frames: {} at level {}, floor {}, score {}, {} kills, {} sounds",
            frames,
            state.player.name,
            state.player.level(),
            state.floor,
            state.stats.score,
            state.stats.enemies_killed,
            audio.played.len()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Startup failed: {}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["dungeon-crawler"]).unwrap();
        assert!(!args.load);
        assert_eq!(args.name, None);
        assert_eq!(args.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_args_load_name_and_config() {
        let args = Args::try_parse_from(["dungeon-crawler", "--load", "--name", "Ayla", "custom.json"]).unwrap();
        assert!(args.load);
        assert_eq!(args.name.as_deref(), Some("Ayla"));
        assert_eq!(args.config, PathBuf::from("custom.json"));
    }

    #[test]
    fn test_args_reject_unknown_flag_and_missing_name() {
        assert!(Args::try_parse_from(["dungeon-crawler", "--lod"]).is_err());
        assert!(Args::try_parse_from(["dungeon-crawler", "--name"]).is_err());
    }
}
