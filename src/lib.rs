//! Tilt Maze - a tilt-controlled marble maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (marble physics, tile grid, maze generation)
//! - `input`: Device orientation ingestion and tilt-force conversion
//! - `render`: Tile-to-sprite resolution seam for the rendering layer
//! - `settings`: Data-driven tunables

pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: i32 = 1280;
    pub const VIEWPORT_HEIGHT: i32 = 720;

    /// Size of each tile in pixels
    pub const TILE_SIZE: i32 = 32;

    /// Marble defaults
    pub const MARBLE_RADIUS: f64 = 15.0;
    pub const MARBLE_FRICTION: f64 = 0.98;

    /// Velocity components below this magnitude snap to zero to stop jitter
    pub const VELOCITY_EPSILON: f64 = 0.01;

    /// Damping applied when reflecting off a maze wall
    pub const WALL_BOUNCE_DAMPING: f64 = 0.3;
    /// Damping applied when reflecting off the viewport edges
    pub const EDGE_BOUNCE_DAMPING: f64 = 0.8;

    /// Impulse per tick while a tilt key is held
    pub const KEY_TILT_FORCE: f64 = 0.2;
    /// Orientation angles scale to force as angle / 90 * this
    pub const ORIENTATION_FORCE_SCALE: f64 = 0.5;
    /// Bounded orientation event queue capacity
    pub const ORIENTATION_QUEUE_CAPACITY: usize = 10;

    /// Fraction of floor cells replaced with speed tiles
    pub const SPECIAL_TILE_DENSITY: f64 = 0.15;

    /// Radius scale for the diagonal collision sample points (~cos 45°)
    pub const DIAGONAL_SAMPLE_FACTOR: f64 = 0.707;
}
