//! Sound cues. Playback is the shell's business; the core only says which
//! cue fired and at what volumes.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::events::{DamageSource, GameEvent};
use crate::player::SpellKind;
use crate::systems::items::ItemUseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    AttackSword,
    AttackMagic,
    EnemyHit,
    PlayerHit,
    PickupItem,
    LevelUp,
    GameOver,
    PotionUse,
}

impl SoundEvent {
    /// The cue a game event triggers, if any
    pub fn for_event(event: &GameEvent) -> Option<SoundEvent> {
        match event {
            GameEvent::MeleeLanded => Some(SoundEvent::AttackSword),
            GameEvent::SpellCast {
                spell: SpellKind::Fireball | SpellKind::FrostNova,
                ..
            } => Some(SoundEvent::AttackMagic),
            // Melee and spells already sound on the swing or cast
            GameEvent::EnemyHit {
                source: DamageSource::Companion,
                ..
            } => Some(SoundEvent::EnemyHit),
            GameEvent::PlayerHurt { .. } => Some(SoundEvent::PlayerHit),
            GameEvent::LevelUp { .. } => Some(SoundEvent::LevelUp),
            GameEvent::LootGranted { stored: true, .. } => Some(SoundEvent::PickupItem),
            GameEvent::ItemUsed { result, .. } => match result {
                ItemUseResult::Healed(_) | ItemUseResult::Buffed(..) | ItemUseResult::SpellsRefreshed => {
                    Some(SoundEvent::PotionUse)
                }
                _ => None,
            },
            GameEvent::PlayerDied { .. } => Some(SoundEvent::GameOver),
            _ => None,
        }
    }
}

/// Master/music/sfx levels, each clamped to `0..=1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volumes {
    pub master: f32,
    pub music: f32,
    pub sfx: f32,
}

impl Default for Volumes {
    fn default() -> Self {
        Self {
            master: 0.7,
            music: 0.5,
            sfx: 0.8,
        }
    }
}

impl Volumes {
    pub fn clamped(self) -> Self {
        Self {
            master: self.master.clamp(0.0, 1.0),
            music: self.music.clamp(0.0, 1.0),
            sfx: self.sfx.clamp(0.0, 1.0),
        }
    }

    /// Effective gain for a sound effect
    pub fn effect_gain(&self) -> f32 {
        self.master * self.sfx
    }
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&mut self, sound: SoundEvent);
    fn set_volumes(&mut self, volumes: Volumes);
}

/// Writes each cue to the log; the default sink for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    volumes: Volumes,
    pub played: Vec<SoundEvent>,
}

impl LogAudio {
    pub fn new(volumes: Volumes) -> Self {
        Self {
            volumes: volumes.clamped(),
            played: Vec::new(),
        }
    }

    pub fn volumes(&self) -> Volumes {
        self.volumes
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundEvent) {
        debug!("sound {:?} at gain {:.2}", sound, self.volumes.effect_gain());
        self.played.push(sound);
    }

    fn set_volumes(&mut self, volumes: Volumes) {
        self.volumes = volumes.clamped();
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundEvent) {}
    fn set_volumes(&mut self, _volumes: Volumes) {}
}
