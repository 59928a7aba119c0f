//! Room-and-corridor floor generation.
//!
//! Rooms are dropped at random positions (overlaps allowed) and then chained
//! together in generation order with wide L-shaped corridors, which keeps
//! every carved tile reachable from the first room.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::tile::{DecorationKind, TileType};

/// A rectangle of tiles representing a room
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// The four tiles one step in from each corner (top-left, top-right, bottom-left, bottom-right)
    pub fn interior_corners(&self) -> [(i32, i32); 4] {
        let left = self.x + 1;
        let right = self.x + self.width - 2;
        let top = self.y + 1;
        let bottom = self.y + self.height - 2;
        [(left, top), (right, top), (left, bottom), (right, bottom)]
    }
}

/// A cosmetic prop, positioned in world pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub position: Vec2,
    pub kind: DecorationKind,
}

/// Everything a generation pass produces
pub struct DungeonResult {
    pub tiles: Vec<TileType>,
    /// Rooms in generation order; the first one is the spawn room
    pub rooms: Vec<Rect>,
    pub decorations: Vec<Decoration>,
}

pub struct DungeonGenerator {
    width: usize,
    height: usize,
    tiles: Vec<TileType>,
}

impl DungeonGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; width * height],
        }
    }

    /// Generate one floor. Deterministic for a given RNG stream.
    pub fn generate(width: usize, height: usize, floor_num: u32, rng: &mut impl Rng) -> DungeonResult {
        let mut gen = Self::new(width, height);

        let min_rooms = ROOM_COUNT_BASE_MIN + floor_num;
        let max_rooms = ROOM_COUNT_BASE_MAX + floor_num * 2;
        let room_count = rng.gen_range(min_rooms..=max_rooms);

        let mut rooms = Vec::with_capacity(room_count as usize);
        for _ in 0..room_count {
            if let Some(room) = gen.random_room(rng) {
                gen.carve_room(&room);
                rooms.push(room);
            }
        }

        let decorations = Self::place_decorations(&rooms, rng);

        for pair in rooms.windows(2) {
            gen.connect_rooms(&pair[0], &pair[1]);
        }

        DungeonResult {
            tiles: gen.tiles,
            rooms,
            decorations,
        }
    }

    /// Pick a room size and a position that leaves a one-tile margin to the map edge.
    fn random_room(&self, rng: &mut impl Rng) -> Option<Rect> {
        let width = rng.gen_range(ROOM_MIN_WIDTH..=ROOM_MAX_WIDTH);
        let height = rng.gen_range(ROOM_MIN_HEIGHT..=ROOM_MAX_HEIGHT);

        let max_x = self.width as i32 - width - 2;
        let max_y = self.height as i32 - height - 2;
        if max_x < 1 || max_y < 1 {
            return None;
        }

        let x = rng.gen_range(1..=max_x);
        let y = rng.gen_range(1..=max_y);
        Some(Rect::new(x, y, width, height))
    }

    fn place_decorations(rooms: &[Rect], rng: &mut impl Rng) -> Vec<Decoration> {
        let mut decorations = Vec::new();
        for room in rooms {
            for (tx, ty) in room.interior_corners() {
                if !rng.gen_bool(DECORATION_CHANCE) {
                    continue;
                }
                let kind = DecorationKind::ALL[rng.gen_range(0..DecorationKind::ALL.len())];
                decorations.push(Decoration {
                    position: Vec2::new(tx as f32 * TILE_SIZE, ty as f32 * TILE_SIZE),
                    kind,
                });
            }
        }
        decorations
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(idx) = self.get_index(x, y) {
            self.tiles[idx] = tile_type;
        }
    }

    fn carve_room(&mut self, room: &Rect) {
        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                self.set_tile(x, y, TileType::Floor);
            }
        }
    }

    /// Connect two rooms with a three-wide L-shaped corridor, horizontal leg first.
    fn connect_rooms(&mut self, from: &Rect, to: &Rect) {
        let (x1, y1) = from.center();
        let (x2, y2) = to.center();
        self.create_h_corridor(x1, x2, y1);
        self.create_v_corridor(y1, y2, x2);
    }

    fn create_h_corridor(&mut self, x1: i32, x2: i32, y: i32) {
        let mut x = x1;
        while x != x2 {
            x += (x2 - x).signum();
            for offset in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
                self.set_tile(x, y + offset, TileType::Floor);
            }
        }
    }

    fn create_v_corridor(&mut self, y1: i32, y2: i32, x: i32) {
        let mut y = y1;
        while y != y2 {
            y += (y2 - y).signum();
            for offset in -CORRIDOR_HALF_WIDTH..=CORRIDOR_HALF_WIDTH {
                self.set_tile(x + offset, y, TileType::Floor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(floor: u32, seed: u64) -> DungeonResult {
        let mut rng = StdRng::seed_from_u64(seed);
        DungeonGenerator::generate(MAP_WIDTH, MAP_HEIGHT, floor, &mut rng)
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.center(), (5, 5));

        let rect2 = Rect::new(5, 5, 4, 6);
        assert_eq!(rect2.center(), (7, 8));
    }

    #[test]
    fn test_interior_corners() {
        let rect = Rect::new(2, 3, 5, 6);
        assert_eq!(rect.interior_corners(), [(3, 4), (5, 4), (3, 7), (5, 7)]);
    }

    #[test]
    fn test_dungeon_generates_tiles() {
        let result = generate(1, 7);
        assert_eq!(result.tiles.len(), MAP_WIDTH * MAP_HEIGHT);
        assert!(result.tiles.iter().any(|t| *t == TileType::Floor));
        assert!(result.tiles.iter().any(|t| *t == TileType::Wall));
    }

    #[test]
    fn test_room_count_scales_with_floor() {
        for floor in 1..=4 {
            for seed in 0..10 {
                let result = generate(floor, seed);
                let count = result.rooms.len() as u32;
                assert!(count >= 8 + floor, "floor {floor} seed {seed}: {count}");
                assert!(count <= 12 + 2 * floor, "floor {floor} seed {seed}: {count}");
            }
        }
    }

    #[test]
    fn test_rooms_respect_size_and_margin() {
        let result = generate(3, 11);
        for room in &result.rooms {
            assert!((ROOM_MIN_WIDTH..=ROOM_MAX_WIDTH).contains(&room.width));
            assert!((ROOM_MIN_HEIGHT..=ROOM_MAX_HEIGHT).contains(&room.height));
            assert!(room.x >= 1 && room.y >= 1);
            assert!(room.x + room.width <= MAP_WIDTH as i32 - 2);
            assert!(room.y + room.height <= MAP_HEIGHT as i32 - 2);
        }
    }

    #[test]
    fn test_decorations_sit_on_room_corners() {
        let result = generate(2, 5);
        for deco in &result.decorations {
            let tx = (deco.position.x / TILE_SIZE) as i32;
            let ty = (deco.position.y / TILE_SIZE) as i32;
            assert!(result
                .rooms
                .iter()
                .any(|room| room.interior_corners().contains(&(tx, ty))));
        }
        assert!(result.decorations.len() <= result.rooms.len() * 4);
    }

    #[test]
    fn test_same_seed_same_floor() {
        let a = generate(2, 99);
        let b = generate(2, 99);
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.decorations, b.decorations);
    }

    #[test]
    fn test_corridor_is_three_wide() {
        let mut gen = DungeonGenerator::new(20, 20);
        gen.connect_rooms(&Rect::new(2, 2, 5, 5), &Rect::new(12, 12, 5, 5));
        // Horizontal leg runs along y = 4, vertical leg along x = 14
        for y in 3..=5 {
            assert_eq!(gen.tiles[gen.get_index(8, y).unwrap()], TileType::Floor);
        }
        for x in 13..=15 {
            assert_eq!(gen.tiles[gen.get_index(x, 9).unwrap()], TileType::Floor);
        }
        assert_eq!(gen.tiles[gen.get_index(8, 7).unwrap()], TileType::Wall);
    }
}
