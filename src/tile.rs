//! Floor tile and decoration kinds.

use glam::Vec3;

/// Terrain of a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
    Door,
    Trap,
}

impl TileType {
    /// Whether characters can stand on this tile. Only walls block.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }

    /// Placeholder color used when no tile texture is available
    pub fn color(&self) -> Vec3 {
        match self {
            TileType::Wall => Vec3::new(0.31, 0.31, 0.31),
            TileType::Floor => Vec3::new(0.39, 0.39, 0.39),
            TileType::Door => Vec3::new(1.0, 0.63, 0.0),
            TileType::Trap => Vec3::new(0.9, 0.16, 0.22),
        }
    }
}

/// Cosmetic props placed in room corners. Never block movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Water,
    MagicStone,
    Torch,
    Rune,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 4] = [
        DecorationKind::Water,
        DecorationKind::MagicStone,
        DecorationKind::Torch,
        DecorationKind::Rune,
    ];

    pub fn color(&self) -> Vec3 {
        match self {
            DecorationKind::Water => Vec3::new(0.2, 0.4, 0.9),
            DecorationKind::MagicStone => Vec3::new(0.6, 0.2, 0.9),
            DecorationKind::Torch => Vec3::new(1.0, 0.6, 0.1),
            DecorationKind::Rune => Vec3::new(0.3, 0.9, 0.7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_walls_block() {
        assert!(!TileType::Wall.is_walkable());
        assert!(TileType::Floor.is_walkable());
        assert!(TileType::Door.is_walkable());
        assert!(TileType::Trap.is_walkable());
    }
}
