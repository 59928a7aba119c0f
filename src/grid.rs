//! The current floor: tile grid, rooms, decorations and the spatial queries
//! movement and spawning rely on.

use glam::Vec2;
use log::info;
use rand::Rng;

use crate::components::Aabb;
use crate::constants::*;
use crate::dungeon_gen::{Decoration, DungeonGenerator, Rect};
use crate::tile::TileType;

pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<TileType>,
    /// Rooms in generation order; the first one is the spawn room
    pub rooms: Vec<Rect>,
    pub decorations: Vec<Decoration>,
    pub floor: u32,
}

impl Grid {
    /// Generate a standard-size floor.
    pub fn new_floor(floor: u32, rng: &mut impl Rng) -> Self {
        Self::with_size(MAP_WIDTH, MAP_HEIGHT, floor, rng)
    }

    pub fn with_size(width: usize, height: usize, floor: u32, rng: &mut impl Rng) -> Self {
        let result = DungeonGenerator::generate(width, height, floor, rng);
        info!(
            "Generated floor {} with {} rooms and {} decorations",
            floor,
            result.rooms.len(),
            result.decorations.len()
        );

        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            tiles: result.tiles,
            rooms: result.rooms,
            decorations: result.decorations,
            floor,
        }
    }

    /// Build a grid from explicit tiles. Used by tests and tools.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileType>, rooms: Vec<Rect>) -> Self {
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            tiles,
            rooms,
            decorations: Vec::new(),
            floor: 1,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    /// Map size in world pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    pub fn spawn_room(&self) -> Option<Rect> {
        self.rooms.first().copied()
    }

    /// Wall test for a world-space point. Anything off the map counts as wall.
    pub fn is_wall(&self, world_x: f32, world_y: f32) -> bool {
        let gx = (world_x / self.tile_size).floor() as i32;
        let gy = (world_y / self.tile_size).floor() as i32;
        match self.get(gx, gy) {
            Some(tile) => !tile.is_walkable(),
            None => true,
        }
    }

    /// Uniformly pick a room, then a tile strictly inside its one-tile margin.
    pub fn random_spawn_position(&self, rng: &mut impl Rng) -> Vec2 {
        if self.rooms.is_empty() {
            return Vec2::new(FALLBACK_SPAWN.0, FALLBACK_SPAWN.1);
        }

        let room = self.rooms[rng.gen_range(0..self.rooms.len())];
        let tx = rng.gen_range(room.x + 1..=room.x + room.width - 2);
        let ty = rng.gen_range(room.y + 1..=room.y + room.height - 2);
        Vec2::new(tx as f32 * self.tile_size, ty as f32 * self.tile_size)
    }

    /// `count` independent spawn picks; positions may coincide.
    pub fn spawn_positions(&self, count: usize, rng: &mut impl Rng) -> Vec<Vec2> {
        (0..count).map(|_| self.random_spawn_position(rng)).collect()
    }

    /// All-or-nothing corner-sampled collision: if any corner of the moved
    /// bounds lands on a wall the whole movement is rejected.
    pub fn resolve_collision(&self, bounds: Aabb, movement: Vec2) -> Vec2 {
        let moved = bounds.translated(movement);
        let blocked = moved.corners().iter().any(|c| self.is_wall(c.x, c.y));
        if blocked {
            Vec2::ZERO
        } else {
            movement
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// 10x10 grid with a walkable 6x6 room at (2,2)
    fn small_grid() -> Grid {
        let mut tiles = vec![TileType::Wall; 100];
        for y in 2..8 {
            for x in 2..8 {
                tiles[y * 10 + x] = TileType::Floor;
            }
        }
        Grid::from_tiles(10, 10, tiles, vec![Rect::new(2, 2, 6, 6)])
    }

    #[test]
    fn test_is_wall_out_of_bounds() {
        let grid = small_grid();
        assert!(grid.is_wall(-1.0, 100.0));
        assert!(grid.is_wall(100.0, 10_000.0));
        assert!(grid.is_wall(0.0, 0.0));
        assert!(!grid.is_wall(2.0 * TILE_SIZE, 2.0 * TILE_SIZE));
    }

    #[test]
    fn test_resolve_collision_accepts_or_rejects_whole_move() {
        let grid = small_grid();
        let bounds = Aabb::new(3.0 * TILE_SIZE, 3.0 * TILE_SIZE, 32.0, 32.0);

        let free = Vec2::new(10.0, 5.0);
        assert_eq!(grid.resolve_collision(bounds, free), free);

        // Far enough left that the left corners hit the wall column at x = 1
        let into_wall = Vec2::new(-40.0, 3.0);
        assert_eq!(grid.resolve_collision(bounds, into_wall), Vec2::ZERO);
    }

    #[test]
    fn test_resolve_collision_is_idempotent() {
        let grid = small_grid();
        let bounds = Aabb::new(100.0, 90.0, 32.0, 32.0);
        for movement in [Vec2::new(3.0, 0.0), Vec2::new(-70.0, 0.0), Vec2::new(0.0, 200.0)] {
            let first = grid.resolve_collision(bounds, movement);
            let second = grid.resolve_collision(bounds, movement);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_spawn_positions_are_inside_room_interiors() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new_floor(1, &mut rng);
        let positions = grid.spawn_positions(50, &mut rng);
        assert_eq!(positions.len(), 50);
        for pos in positions {
            let tx = (pos.x / TILE_SIZE) as i32;
            let ty = (pos.y / TILE_SIZE) as i32;
            assert!(grid.rooms.iter().any(|r| {
                tx >= r.x + 1 && tx <= r.x + r.width - 2 && ty >= r.y + 1 && ty <= r.y + r.height - 2
            }));
            let body = Aabb::new(pos.x, pos.y, 32.0, 32.0);
            assert!(body.corners().iter().all(|c| !grid.is_wall(c.x, c.y)));
        }
    }

    #[test]
    fn test_empty_floor_spawns_at_fallback() {
        let grid = Grid::from_tiles(4, 4, vec![TileType::Wall; 16], Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(grid.random_spawn_position(&mut rng), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_every_floor_tile_reachable_from_spawn_room() {
        for seed in [1_u64, 42, 1234] {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = Grid::new_floor(1, &mut rng);
            let start = grid.spawn_room().expect("floor has rooms").center();

            let mut seen = vec![false; grid.width * grid.height];
            let mut queue = VecDeque::from([start]);
            seen[start.1 as usize * grid.width + start.0 as usize] = true;
            while let Some((x, y)) = queue.pop_front() {
                for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if !matches!(grid.get(nx, ny), Some(TileType::Floor | TileType::Door)) {
                        continue;
                    }
                    let idx = ny as usize * grid.width + nx as usize;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            for (idx, tile) in grid.tiles.iter().enumerate() {
                if *tile == TileType::Floor {
                    assert!(seen[idx], "seed {seed}: tile {idx} unreachable");
                }
            }
        }
    }
}
