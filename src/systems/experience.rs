//! Experience and leveling system.

use crate::components::Vitals;

/// Leveling curve: experience needed to leave a level is
/// `exp_for_level_2 * scaling^(level - 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpCurve {
    pub exp_for_level_2: u32,
    pub scaling: f32,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            exp_for_level_2: crate::constants::EXP_FOR_LEVEL_2,
            scaling: crate::constants::EXP_SCALING,
        }
    }
}

impl XpCurve {
    /// XP needed to advance from `level` to the next one
    pub fn xp_for_level(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1) as i32;
        (self.exp_for_level_2 as f32 * self.scaling.powi(exponent)).round() as u32
    }

    /// Progress toward the next level (0.0 to 1.0)
    pub fn progress(&self, vitals: &Vitals) -> f32 {
        let needed = self.xp_for_level(vitals.level).max(1);
        (vitals.experience as f32 / needed as f32).min(1.0)
    }
}

/// Add XP and apply at most one level-up.
///
/// When the threshold is crossed the level goes up by exactly one and
/// experience resets to zero; the surplus is discarded.
pub fn grant_xp(vitals: &mut Vitals, amount: u32, curve: &XpCurve) -> bool {
    vitals.experience = vitals.experience.saturating_add(amount);
    if vitals.experience >= curve.xp_for_level(vitals.level) {
        vitals.level += 1;
        vitals.experience = 0;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_level_flat_curve() {
        let curve = XpCurve::default();
        assert_eq!(curve.xp_for_level(1), 100);
        assert_eq!(curve.xp_for_level(7), 100);
    }

    #[test]
    fn test_xp_for_level_scaled_curve() {
        let curve = XpCurve { exp_for_level_2: 100, scaling: 1.5 };
        assert_eq!(curve.xp_for_level(1), 100);
        assert_eq!(curve.xp_for_level(2), 150);
        assert_eq!(curve.xp_for_level(3), 225);
    }

    #[test]
    fn test_grant_xp_no_level_up() {
        let mut vitals = Vitals::new(150, 1);
        assert!(!grant_xp(&mut vitals, 10, &XpCurve::default()));
        assert_eq!(vitals.experience, 10);
        assert_eq!(vitals.level, 1);
    }

    #[test]
    fn test_grant_xp_single_level_up_discards_surplus() {
        let mut vitals = Vitals::new(150, 1);
        vitals.experience = 90;
        assert!(grant_xp(&mut vitals, 10_000, &XpCurve::default()));
        assert_eq!(vitals.level, 2);
        assert_eq!(vitals.experience, 0);
    }

    #[test]
    fn test_xp_progress() {
        let mut vitals = Vitals::new(150, 1);
        vitals.experience = 50;
        assert_eq!(XpCurve::default().progress(&vitals), 0.5);
    }
}
