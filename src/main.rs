//! Tilt Maze entry point
//!
//! Headless driver: carves a maze, wires the orientation channel, and runs
//! a scripted session. A windowed shell would replace the script with real
//! keyboard state and a sensor callback, and hand each tile to a
//! `TileRenderer` for drawing.

use std::path::Path;
use std::thread;
use std::time::Duration;

use tilt_maze::Settings;
use tilt_maze::input::orientation_channel;
use tilt_maze::render::{SpriteSheetResolver, TileRenderer};
use tilt_maze::sim::{GameSession, TickInput};

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("tilt-maze.json"));
    let (orientation_tx, orientation_rx) = orientation_channel();
    let mut session = GameSession::new(settings, orientation_rx);

    println!("Controls (windowed shell): arrows/WASD tilt, R resets, M regenerates");
    for row in session.grid.render() {
        println!("{row}");
    }

    // Stand-in for the device sensor: a producer thread feeding tilt
    // readings through the bounded queue
    let producer = thread::spawn(move || {
        for i in 0..120 {
            let phase = i as f64 / 120.0 * std::f64::consts::TAU;
            orientation_tx.ingest(&[0.0, 30.0 * phase.sin(), 45.0 * phase.cos()]);
            thread::sleep(Duration::from_millis(2));
        }
    });

    // Scripted keyboard: tilt right for a second, then down, then coast
    let force = session.settings().key_tilt_force;
    for tick in 0..600u32 {
        let input = match tick {
            0..60 => TickInput::from_keys(false, true, false, false, force),
            60..120 => TickInput::from_keys(false, false, false, true, force),
            _ => TickInput::default(),
        };
        session.tick(&input);

        if tick % 120 == 0 {
            let (x, y) = session.marble.position();
            let (vx, vy) = session.marble.velocity();
            log::info!("tick {tick}: pos ({x:.1}, {y:.1}) vel ({vx:.2}, {vy:.2})");
        }
    }
    producer.join().expect("orientation producer panicked");

    let (x, y) = session.marble.position();
    println!("Marble came to rest near ({x:.0}, {y:.0}) after {} ticks", session.time_ticks);

    // Show what the asset layer would be asked to draw for the marble's tile
    if let Some(tile) = session.grid.tile_at(x, y) {
        let sprite = SpriteSheetResolver.resolve(&session.grid, tile.x, tile.y);
        log::debug!("tile under marble resolves to {sprite:?}");
    }
}
