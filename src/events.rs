//! Game event system for decoupled communication between systems.
//!
//! Combat, AI and the director emit events; VFX, camera, audio and the
//! combat log consume them at the end of the frame.

use glam::Vec2;

use crate::player::SpellKind;
use crate::spawning::Archetype;
use crate::systems::items::ItemUseResult;
use crate::systems::loot::Sparkle;

/// What dealt a hit to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Melee,
    Spell(SpellKind),
    Companion,
}

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An enemy took damage
    EnemyHit {
        position: Vec2,
        damage: i32,
        crit: bool,
        source: DamageSource,
    },
    /// An enemy died; rewards already granted
    EnemyKilled {
        archetype: Archetype,
        position: Vec2,
        xp: u32,
        score: u32,
    },
    /// The player took damage from contact or a deliberate attack
    PlayerHurt { damage: i32, attacker: Archetype },
    /// A melee swing connected with at least one enemy
    MeleeLanded,
    /// A spell went off. `chain` holds the jump points of chain lightning.
    SpellCast {
        spell: SpellKind,
        origin: Vec2,
        chain: Vec<Vec2>,
    },
    /// Player leveled up
    LevelUp {
        new_level: u32,
        unlocked_spell: Option<SpellKind>,
    },
    /// A drop was added to the inventory (or lost to a full one)
    LootGranted {
        position: Vec2,
        name: &'static str,
        quantity: u32,
        sparkle: Option<Sparkle>,
        stored: bool,
    },
    /// The player consumed an item
    ItemUsed {
        name: String,
        result: ItemUseResult,
        position: Vec2,
    },
    /// The pendant shield was raised
    ShieldRaised { position: Vec2 },
    /// The Shadow Paladin joined the player
    CompanionTamed { position: Vec2, level: u32 },
    /// A new floor was generated and entered
    FloorEntered { floor: u32 },
    /// The player died this frame
    PlayerDied { score: u32 },
    GameSaved,
    SaveFailed { reason: String },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Drop pending events unprocessed
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Peek at pending events without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
