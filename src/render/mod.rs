//! Tile-to-sprite resolution
//!
//! The rendering layer is a pluggable collaborator: the grid never touches
//! pixels. A `TileRenderer` turns a tile coordinate into an asset
//! reference, and the shell draws whatever that reference names. The
//! default resolver reproduces the stock look: stone walls picked by their
//! 8-neighbor solidity pattern, grass floors varied deterministically per
//! coordinate, flat tints for speed tiles.

use crate::sim::{TileGrid, TileKind};

/// Which sprite sheet a cell reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Grass,
    Stone,
}

/// Opaque visual asset reference; no pixels here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRef {
    /// A (row, col) cell in a sprite sheet
    Cell {
        sheet: SheetKind,
        row: u32,
        col: u32,
    },
    /// Flat RGBA fill (speed tiles)
    Tint([u8; 4]),
}

/// Capability-injection point for the asset layer
pub trait TileRenderer {
    fn resolve(&self, grid: &TileGrid, x: i32, y: i32) -> SpriteRef;
}

/// Grass floor cells of the stock sheet
const GRASS_TILES: [(u32, u32); 13] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 0),
    (1, 1),
    (2, 0),
    (2, 1),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
];

/// Default resolver for the stock grass/stone sheets
#[derive(Debug, Default)]
pub struct SpriteSheetResolver;

impl SpriteSheetResolver {
    /// Pick a stone cell from the open sides around a wall. Checks the four
    /// edge neighbors (N/W/E/S); corners follow from the edge combination.
    fn wall_sprite(grid: &TileGrid, x: i32, y: i32) -> SpriteRef {
        let n = grid.is_solid(x, y - 1);
        let w = grid.is_solid(x - 1, y);
        let e = grid.is_solid(x + 1, y);
        let s = grid.is_solid(x, y + 1);

        let (row, col) = match (n, w, e, s) {
            (false, false, false, false) => (3, 3),
            (false, false, false, true) => (0, 3),
            (false, _, false, false) => (3, 2),
            (false, false, _, false) => (3, 0),
            (false, _, _, false) => (3, 1),
            (_, false, false, _) => (1, 3),
            (_, _, _, false) => (2, 1),
            (_, _, false, _) => (1, 2),
            (_, false, _, _) => (1, 0),
            (false, _, _, _) => (0, 1),
            _ => (1, 1),
        };

        SpriteRef::Cell {
            sheet: SheetKind::Stone,
            row,
            col,
        }
    }

    /// Stable pseudo-random grass pick: same coordinate, same sprite
    fn floor_sprite(grid: &TileGrid, x: i32, y: i32) -> SpriteRef {
        let index = ((x + y * grid.width) * 289).rem_euclid(GRASS_TILES.len() as i32) as usize;
        let (row, col) = GRASS_TILES[index];
        SpriteRef::Cell {
            sheet: SheetKind::Grass,
            row,
            col,
        }
    }
}

impl TileRenderer for SpriteSheetResolver {
    fn resolve(&self, grid: &TileGrid, x: i32, y: i32) -> SpriteRef {
        match grid.kind_at(x, y).unwrap_or(TileKind::Floor) {
            TileKind::Wall => Self::wall_sprite(grid, x, y),
            TileKind::Slow => SpriteRef::Tint([100, 50, 50, 255]),
            TileKind::Fast => SpriteRef::Tint([50, 100, 50, 255]),
            TileKind::SlowMild => SpriteRef::Tint([80, 50, 60, 255]),
            TileKind::FastMild => SpriteRef::Tint([50, 80, 60, 255]),
            TileKind::Floor => Self::floor_sprite(grid, x, y),
        }
    }
}
