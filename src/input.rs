//! Input handling: the per-tick action snapshot the shell hands to the engine.
//!
//! The shell maps raw keys to [`Action`]s; the engine only ever asks whether an
//! action is held or was pressed this tick.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Attack,
    Cast1,
    Cast2,
    Cast3,
    Cast4,
    Shield,
    ToggleInventory,
    UseItem,
    Pause,
    Quit,
    Save,
    Confirm,
    Cancel,
    NavigateUp,
    NavigateDown,
    QuickHealth,
    QuickSpeed,
    QuickStealth,
    QuickRage,
}

/// Held and freshly pressed actions for one tick
#[derive(Debug, Clone, Default)]
pub struct ActionSnapshot {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl ActionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as held this tick
    pub fn hold(&mut self, action: Action) -> &mut Self {
        self.down.insert(action);
        self
    }

    /// Mark an action as pressed (and held) this tick
    pub fn press(&mut self, action: Action) -> &mut Self {
        self.pressed.insert(action);
        self.down.insert(action);
        self
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Combine the four movement axes. Opposite keys cancel; diagonals are
    /// left unnormalized.
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Action::MoveUp) {
            dir.y -= 1.0;
        }
        if self.is_down(Action::MoveDown) {
            dir.y += 1.0;
        }
        if self.is_down(Action::MoveLeft) {
            dir.x -= 1.0;
        }
        if self.is_down(Action::MoveRight) {
            dir.x += 1.0;
        }
        dir
    }

    pub fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}

/// Scripted input for headless runs: wanders in a slow square, swings every
/// tick and cycles through the spell keys.
pub struct Autopilot {
    frame: u64,
    frames_per_leg: u64,
}

impl Autopilot {
    pub fn new(frames_per_leg: u64) -> Self {
        Self {
            frame: 0,
            frames_per_leg: frames_per_leg.max(1),
        }
    }

    pub fn next_snapshot(&mut self) -> ActionSnapshot {
        let mut snapshot = ActionSnapshot::new();
        let leg = (self.frame / self.frames_per_leg) % 4;
        snapshot.hold(match leg {
            0 => Action::MoveRight,
            1 => Action::MoveDown,
            2 => Action::MoveLeft,
            _ => Action::MoveUp,
        });
        snapshot.press(Action::Attack);

        let cast = match self.frame % 240 {
            0 => Some(Action::Cast1),
            60 => Some(Action::Cast2),
            120 => Some(Action::Cast3),
            180 => Some(Action::Cast4),
            _ => None,
        };
        if let Some(action) = cast {
            snapshot.press(action);
        }
        if self.frame % 600 == 599 {
            snapshot.press(Action::QuickHealth);
        }

        self.frame += 1;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_implies_down() {
        let mut snapshot = ActionSnapshot::new();
        snapshot.press(Action::Attack).hold(Action::MoveLeft);
        assert!(snapshot.was_pressed(Action::Attack));
        assert!(snapshot.is_down(Action::Attack));
        assert!(snapshot.is_down(Action::MoveLeft));
        assert!(!snapshot.was_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_move_direction_diagonal() {
        let mut snapshot = ActionSnapshot::new();
        snapshot.hold(Action::MoveUp).hold(Action::MoveRight);
        assert_eq!(snapshot.move_direction(), Vec2::new(1.0, -1.0));
        snapshot.hold(Action::MoveDown);
        assert_eq!(snapshot.move_direction(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_autopilot_cycles_legs() {
        let mut pilot = Autopilot::new(2);
        let first = pilot.next_snapshot();
        assert!(first.is_down(Action::MoveRight));
        assert!(first.was_pressed(Action::Cast1));
        pilot.next_snapshot();
        let third = pilot.next_snapshot();
        assert!(third.is_down(Action::MoveDown));
        assert!(third.was_pressed(Action::Attack));
    }
}
