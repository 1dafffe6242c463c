//! Tile grid: maze text parsing, pixel-to-tile lookup, collision resolution
//! and tile speed effects.
//!
//! The tricky part of Tilt Maze: resolving a circular marble against a grid
//! of uniform square walls. Collision is deliberately approximate - eight
//! circumference samples around the marble's *current* center, axis-aligned
//! response - which is fine for square walls but does not prevent tunneling
//! at extreme speeds.

use glam::DVec2;

use super::marble::Marble;
use crate::consts::{DIAGONAL_SAMPLE_FACTOR, WALL_BOUNCE_DAMPING};

/// Tile classification. Only `Wall` is solid; the rest carry a velocity
/// multiplier applied while the marble sits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    /// Halves velocity (`<`)
    Slow,
    /// 1.5x velocity (`>`)
    Fast,
    /// 0.75x velocity (`(`)
    SlowMild,
    /// 1.25x velocity (`)`)
    FastMild,
}

impl TileKind {
    /// Map a maze-text character to a tile kind. Unknown characters are
    /// treated as floor.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => TileKind::Wall,
            '.' => TileKind::Floor,
            '<' => TileKind::Slow,
            '>' => TileKind::Fast,
            '(' => TileKind::SlowMild,
            ')' => TileKind::FastMild,
            _ => TileKind::Floor,
        }
    }

    /// Inverse of `from_char`
    pub fn to_char(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Slow => '<',
            TileKind::Fast => '>',
            TileKind::SlowMild => '(',
            TileKind::FastMild => ')',
        }
    }

    pub fn is_solid(self) -> bool {
        self == TileKind::Wall
    }

    /// Velocity multiplier applied while the marble is on this tile
    pub fn speed_multiplier(self) -> f64 {
        match self {
            TileKind::Wall | TileKind::Floor => 1.0,
            TileKind::Slow => 0.5,
            TileKind::Fast => 1.5,
            TileKind::SlowMild => 0.75,
            TileKind::FastMild => 1.25,
        }
    }
}

/// A single grid cell. Immutable after the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    /// Grid coordinates
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub fn solid(&self) -> bool {
        self.kind.is_solid()
    }

    pub fn effect(&self) -> f64 {
        self.kind.speed_multiplier()
    }
}

/// A rectangular grid of tiles centered inside a fixed viewport.
///
/// Built once from maze text and replaced wholesale on regeneration, never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    /// Grid dimensions in tiles
    pub width: i32,
    pub height: i32,
    /// Tile edge length in pixels
    pub tile_size: i32,
    /// Pixel offsets centering the grid in the viewport; negative when the
    /// maze is larger than the viewport
    pub offset_x: i32,
    pub offset_y: i32,
}

impl TileGrid {
    /// Parse maze rows into a grid. Width is the longest observed row;
    /// shorter rows are padded with Wall out to that width. Unknown
    /// characters become Floor.
    pub fn parse<S: AsRef<str>>(
        rows: &[S],
        tile_size: i32,
        viewport_width: i32,
        viewport_height: i32,
    ) -> Self {
        let height = rows.len() as i32;
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0) as i32;

        let offset_x = (viewport_width - width * tile_size) / 2;
        let offset_y = (viewport_height - height * tile_size) / 2;

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0i32;
            for c in row.as_ref().chars() {
                tiles.push(Tile {
                    kind: TileKind::from_char(c),
                    x,
                    y: y as i32,
                });
                x += 1;
            }
            while x < width {
                tiles.push(Tile {
                    kind: TileKind::Wall,
                    x,
                    y: y as i32,
                });
                x += 1;
            }
        }

        Self {
            tiles,
            width,
            height,
            tile_size,
            offset_x,
            offset_y,
        }
    }

    /// Parse a maze from a single newline-separated string (leading and
    /// trailing blank lines ignored)
    pub fn from_text(text: &str, tile_size: i32, viewport_width: i32, viewport_height: i32) -> Self {
        let rows: Vec<&str> = text.trim().split('\n').collect();
        Self::parse(&rows, tile_size, viewport_width, viewport_height)
    }

    /// Serialize back to maze text. `parse(render(g))` reproduces `g`
    /// tile-for-tile.
    pub fn render(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tiles[(y * self.width + x) as usize].kind.to_char())
                    .collect()
            })
            .collect()
    }

    /// Tile under a pixel coordinate, or None outside the grid.
    /// Out-of-bounds is routine (collision samples run past the edges), so
    /// this never errors.
    pub fn tile_at(&self, pixel_x: f64, pixel_y: f64) -> Option<&Tile> {
        let grid_x = ((pixel_x - self.offset_x as f64) / self.tile_size as f64) as i32;
        let grid_y = ((pixel_y - self.offset_y as f64) / self.tile_size as f64) as i32;

        if grid_x < 0 || grid_x >= self.width || grid_y < 0 || grid_y >= self.height {
            return None;
        }

        Some(&self.tiles[(grid_y * self.width + grid_x) as usize])
    }

    /// Tile kind at grid coordinates, None outside the grid
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TileKind> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(self.tiles[(y * self.width + x) as usize].kind)
    }

    /// Solidity at grid coordinates; out-of-bounds reads as open so border
    /// sprites resolve to edge pieces
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.kind_at(x, y).is_some_and(|k| k.is_solid())
    }

    /// True when the pixel coordinate lands on a wall tile
    pub fn is_wall_at(&self, pixel_x: f64, pixel_y: f64) -> bool {
        self.tile_at(pixel_x, pixel_y).is_some_and(|t| t.solid())
    }

    /// Speed multiplier at a pixel coordinate, 1.0 outside the grid
    pub fn effect_at(&self, pixel_x: f64, pixel_y: f64) -> f64 {
        self.tile_at(pixel_x, pixel_y)
            .map_or(1.0, |t| t.effect())
    }

    /// Resolve a proposed marble move against the walls.
    ///
    /// Samples eight points on the marble's circumference at its current
    /// (pre-move) center: the four cardinals at full radius and the four
    /// diagonals at radius * 0.707. Any solid sample the velocity is
    /// heading into freezes that position axis at the current value and
    /// reflects the velocity component with damping.
    ///
    /// Returns the corrected position to commit.
    pub fn resolve(&self, marble: &mut Marble, proposed: DVec2) -> DVec2 {
        let r = marble.radius;
        let d = r * DIAGONAL_SAMPLE_FACTOR;

        let sample_offsets = [
            (-r, 0.0), // Left
            (r, 0.0),  // Right
            (0.0, -r), // Top
            (0.0, r),  // Bottom
            (-d, -d),  // Top-left
            (d, -d),   // Top-right
            (-d, d),   // Bottom-left
            (d, d),    // Bottom-right
        ];

        let mut corrected = proposed;

        for (dx, dy) in sample_offsets {
            if !self.is_wall_at(marble.pos.x + dx, marble.pos.y + dy) {
                continue;
            }

            // Only respond when the velocity is driving into the wall side
            if dx < 0.0 && marble.vel.x < 0.0 || dx > 0.0 && marble.vel.x > 0.0 {
                corrected.x = marble.pos.x;
                marble.vel.x = -marble.vel.x * WALL_BOUNCE_DAMPING;
            }

            if dy < 0.0 && marble.vel.y < 0.0 || dy > 0.0 && marble.vel.y > 0.0 {
                corrected.y = marble.pos.y;
                marble.vel.y = -marble.vel.y * WALL_BOUNCE_DAMPING;
            }
        }

        corrected
    }

    /// Apply the speed effect of the tile under the marble's center,
    /// once per tick after collision resolution
    pub fn apply_tile_effects(&self, marble: &mut Marble) {
        let effect = self.effect_at(marble.pos.x, marble.pos.y);
        if effect != 1.0 {
            marble.vel.x *= effect;
            marble.vel.y *= effect;
        }
    }
}
