//! Fixed timestep simulation tick
//!
//! The session advances at a fixed rate (60 Hz, driven by the shell).
//! Per tick: gather one force source (orientation event if pending,
//! otherwise keyboard tilt), handle discrete commands, integrate the
//! marble, resolve the proposal against the walls, commit, then apply
//! tile speed effects. Rendering reads the result and never feeds back.

use glam::DVec2;
use rand::Rng;

use super::grid::TileGrid;
use super::marble::Marble;
use super::mazegen::MazeGenerator;
use crate::input::{OrientationReceiver, tilt_force};
use crate::settings::Settings;

/// Input commands for a single tick, mapped from keys by the shell
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tilt impulse for this tick (already scaled)
    pub tilt: DVec2,
    /// Reset the marble to the viewport center
    pub reset: bool,
    /// Throw away the maze and carve a fresh one
    pub regenerate: bool,
}

impl TickInput {
    /// Map held directional keys to a tilt impulse
    pub fn from_keys(left: bool, right: bool, up: bool, down: bool, force: f64) -> Self {
        let mut tilt = DVec2::ZERO;
        if left {
            tilt.x -= force;
        }
        if right {
            tilt.x += force;
        }
        if up {
            tilt.y -= force;
        }
        if down {
            tilt.y += force;
        }
        Self {
            tilt,
            ..Default::default()
        }
    }
}

/// One game session: a marble, the current maze, and the orientation
/// consumer. Lives for as long as the player does; the maze is replaced
/// wholesale on regeneration, the marble is reset rather than recreated.
#[derive(Debug)]
pub struct GameSession {
    pub marble: Marble,
    pub grid: TileGrid,
    settings: Settings,
    orientation: OrientationReceiver,
    base_seed: u64,
    regen_count: u64,
    pub time_ticks: u64,
}

impl GameSession {
    pub fn new(settings: Settings, orientation: OrientationReceiver) -> Self {
        let base_seed = settings
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        log::info!("New session, base seed {base_seed}");

        let grid = build_maze(&settings, base_seed);
        let spawn = spawn_point(&grid);
        let marble = Marble::new(spawn.x, spawn.y, settings.marble_radius, settings.friction);

        Self {
            marble,
            grid,
            settings,
            orientation,
            base_seed,
            regen_count: 0,
            time_ticks: 0,
        }
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self, input: &TickInput) {
        // One force source per tick: a pending orientation event wins,
        // otherwise the keyboard tilt applies.
        if let Some(event) = self.orientation.poll() {
            let force = tilt_force(&event);
            self.marble.add_force(force.x, force.y);
        } else {
            self.marble.add_force(input.tilt.x, input.tilt.y);
        }

        if input.reset {
            self.marble.reset(DVec2::new(
                self.settings.viewport_width as f64 / 2.0,
                self.settings.viewport_height as f64 / 2.0,
            ));
        }

        if input.regenerate {
            self.regenerate_maze();
        }

        let proposed = self.marble.integrate();
        let corrected = self.grid.resolve(&mut self.marble, proposed);
        self.marble.set_position(corrected.x, corrected.y);
        self.grid.apply_tile_effects(&mut self.marble);

        self.time_ticks += 1;
    }

    /// Swap in a freshly carved maze and respawn the marble. Runs between
    /// ticks only, so no tick ever sees a half-built grid.
    pub fn regenerate_maze(&mut self) {
        self.regen_count += 1;
        let seed = self.base_seed.wrapping_add(self.regen_count);
        self.grid = build_maze(&self.settings, seed);

        let spawn = spawn_point(&self.grid);
        self.marble.reset(spawn);
        log::info!(
            "Generated {}x{} maze (seed {seed})",
            self.grid.width,
            self.grid.height
        );
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Carve a maze sized to the viewport, leaving a tile of border slack on
/// each side, and seed it with speed tiles
fn build_maze(settings: &Settings, seed: u64) -> TileGrid {
    let mut maze_width = settings.viewport_width / settings.tile_size - 2;
    let mut maze_height = settings.viewport_height / settings.tile_size - 2;
    // Shrink to odd rather than letting the generator round up past the
    // viewport
    if maze_width % 2 == 0 {
        maze_width -= 1;
    }
    if maze_height % 2 == 0 {
        maze_height -= 1;
    }

    let rows = MazeGenerator::generate_with_special_tiles(
        maze_width,
        maze_height,
        settings.special_tile_density,
        seed,
    );

    TileGrid::parse(
        &rows,
        settings.tile_size,
        settings.viewport_width,
        settings.viewport_height,
    )
}

/// Fixed open start area: two tiles in from the grid origin
fn spawn_point(grid: &TileGrid) -> DVec2 {
    DVec2::new(
        (grid.offset_x + 2 * grid.tile_size) as f64,
        (grid.offset_y + 2 * grid.tile_size) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{OrientationEvent, orientation_channel};

    fn session_with_seed(seed: u64) -> (GameSession, crate::input::OrientationSender) {
        let (tx, rx) = orientation_channel();
        let settings = Settings {
            seed: Some(seed),
            ..Default::default()
        };
        (GameSession::new(settings, rx), tx)
    }

    /// Swap the generated maze for an open box and park the marble in the
    /// middle, so movement assertions don't depend on maze topology
    fn open_arena(session: &mut GameSession) {
        let rows = [
            "###########",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "###########",
        ];
        session.grid = TileGrid::parse(&rows, 32, 1280, 720);
        let center = DVec2::new(
            (session.grid.offset_x + 5 * 32 + 16) as f64,
            (session.grid.offset_y + 3 * 32 + 16) as f64,
        );
        session.marble.reset(center);
    }

    #[test]
    fn test_keyboard_tilt_moves_marble() {
        let (mut session, _tx) = session_with_seed(1);
        open_arena(&mut session);
        let start = session.marble.pos;

        let input = TickInput::from_keys(false, true, false, false, 0.2);
        for _ in 0..20 {
            session.tick(&input);
        }

        assert!(session.marble.pos.x > start.x);
        assert_eq!(session.time_ticks, 20);
    }

    #[test]
    fn test_orientation_event_preempts_keyboard() {
        let (mut session, tx) = session_with_seed(1);
        open_arena(&mut session);

        // Keyboard says right, orientation says left and harder
        tx.push(OrientationEvent {
            gamma: -90.0,
            ..Default::default()
        });
        let input = TickInput::from_keys(false, true, false, false, 0.2);
        session.tick(&input);

        // Only the orientation force applied this tick
        assert!(session.marble.vel.x < 0.0);
    }

    #[test]
    fn test_keyboard_used_when_queue_empty() {
        let (mut session, _tx) = session_with_seed(1);
        open_arena(&mut session);
        let input = TickInput::from_keys(true, false, false, false, 0.2);
        session.tick(&input);
        assert!(session.marble.vel.x < 0.0);
    }

    #[test]
    fn test_reset_centers_marble() {
        let (mut session, _tx) = session_with_seed(1);
        session.marble.set_velocity(4.0, 4.0);

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        session.tick(&input);

        // One integrate ran after the reset; the marble is at (or within a
        // velocity-less step of) the viewport center
        assert_eq!(session.marble.pos, DVec2::new(640.0, 360.0));
        assert_eq!(session.marble.vel, DVec2::ZERO);
    }

    #[test]
    fn test_regenerate_swaps_grid_and_respawns() {
        let (mut session, _tx) = session_with_seed(7);
        let before = session.grid.render();

        let input = TickInput {
            regenerate: true,
            ..Default::default()
        };
        session.tick(&input);

        assert_ne!(session.grid.render(), before);
        assert_eq!(session.marble.vel, DVec2::ZERO);
    }

    #[test]
    fn test_same_seed_same_session_maze() {
        let (a, _txa) = session_with_seed(42);
        let (b, _txb) = session_with_seed(42);
        assert_eq!(a.grid.render(), b.grid.render());
    }

    #[test]
    fn test_maze_fits_viewport() {
        let (session, _tx) = session_with_seed(3);
        let grid = &session.grid;
        assert!(grid.width * grid.tile_size <= session.settings().viewport_width);
        assert!(grid.height * grid.tile_size <= session.settings().viewport_height);
        assert!(grid.offset_x >= 0 && grid.offset_y >= 0);
    }

    #[test]
    fn test_marble_settles_without_input() {
        let (mut session, _tx) = session_with_seed(5);
        open_arena(&mut session);
        session.marble.set_velocity(1.0, 0.0);

        let input = TickInput::default();
        for _ in 0..600 {
            session.tick(&input);
        }

        assert_eq!(session.marble.vel, DVec2::ZERO);
    }
}
