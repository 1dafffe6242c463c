//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (forces are per-tick impulses)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod marble;
pub mod mazegen;
pub mod tick;

pub use grid::{Tile, TileGrid, TileKind};
pub use marble::Marble;
pub use mazegen::MazeGenerator;
pub use tick::{GameSession, TickInput};
