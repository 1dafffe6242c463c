//! Procedural maze generation
//!
//! Randomized recursive backtracking over an odd-dimensioned wall lattice:
//! cells at odd coordinates are rooms, cells at even coordinates are the
//! walls between them. The walk is expressed as an explicit stack so maze
//! area never bounds the call stack. Generation is a pure function of
//! (width, height, seed).

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg32;

const WALL: u8 = b'#';
const FLOOR: u8 = b'.';

/// Replacement candidates for `add_special_tiles`
const SPECIAL_TILES: [u8; 4] = [b'<', b'>', b'(', b')'];

/// Two-step carve directions: up, right, down, left
const DIRECTIONS: [(i32, i32); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Creates ASCII mazes of arbitrary size
#[derive(Debug)]
pub struct MazeGenerator {
    width: i32,
    height: i32,
    cells: Vec<u8>,
    rng: Pcg32,
}

impl MazeGenerator {
    /// Dimensions are rounded up to odd values; the carve algorithm only
    /// visits odd-indexed cells and needs the even lattice left as walls.
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        let width = if width % 2 == 0 { width + 1 } else { width };
        let height = if height % 2 == 0 { height + 1 } else { height };

        Self {
            width,
            height,
            cells: vec![WALL; (width * height) as usize],
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Generate a perfect maze (exactly one path between any two floor
    /// cells) and return it as fixed-length rows over `{'#', '.'}`.
    pub fn generate(&mut self) -> Vec<String> {
        self.cells.fill(WALL);

        // Degenerate sizes (< 3 in either axis) have no room for the start
        // cell; they come out as solid wall, which is still a valid
        // bordered maze.
        if self.width >= 3 && self.height >= 3 {
            self.set(1, 1, FLOOR);
            self.carve_passages(1, 1);
        }

        self.ensure_border();

        self.cells
            .chunks(self.width as usize)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect()
    }

    /// Depth-first carve from (x, y), iteratively.
    ///
    /// Each frame holds its own shuffled direction order and a cursor, so
    /// the walk is step-for-step equivalent to the recursive formulation:
    /// try the frame's next direction; on success push a child frame, on
    /// exhaustion pop (backtrack).
    fn carve_passages(&mut self, x: i32, y: i32) {
        struct Frame {
            x: i32,
            y: i32,
            dirs: [(i32, i32); 4],
            next: usize,
        }

        let mut stack = vec![Frame {
            x,
            y,
            dirs: self.shuffled_directions(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.dirs.len() {
                stack.pop();
                continue;
            }

            let (dx, dy) = frame.dirs[frame.next];
            frame.next += 1;

            let nx = frame.x + dx;
            let ny = frame.y + dy;

            if self.is_valid_cell(nx, ny) && self.get(nx, ny) == WALL {
                // Knock out the wall between the two rooms, then descend
                self.set(frame.x + dx / 2, frame.y + dy / 2, FLOOR);
                self.set(nx, ny, FLOOR);
                let dirs = self.shuffled_directions();
                stack.push(Frame {
                    x: nx,
                    y: ny,
                    dirs,
                    next: 0,
                });
            }
        }
    }

    fn shuffled_directions(&mut self) -> [(i32, i32); 4] {
        let mut dirs = DIRECTIONS;
        dirs.shuffle(&mut self.rng);
        dirs
    }

    /// Carve targets are interior odd-coordinate rooms only
    fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        x > 0 && x < self.width - 1 && y > 0 && y < self.height - 1 && x % 2 == 1 && y % 2 == 1
    }

    /// Force every border cell back to wall so the maze is fully enclosed
    /// regardless of carve reach
    fn ensure_border(&mut self) {
        for x in 0..self.width {
            self.set(x, 0, WALL);
            self.set(x, self.height - 1, WALL);
        }
        for y in 0..self.height {
            self.set(0, y, WALL);
            self.set(self.width - 1, y, WALL);
        }
    }

    fn get(&self, x: i32, y: i32) -> u8 {
        self.cells[(y * self.width + x) as usize]
    }

    fn set(&mut self, x: i32, y: i32, c: u8) {
        self.cells[(y * self.width + x) as usize] = c;
    }

    /// Replace floor cells with speed tiles, each independently with
    /// probability `density`. A density outside (0, 1] returns the input
    /// unchanged - an explicit clamp, not an error.
    pub fn add_special_tiles(&mut self, rows: &[String], density: f64) -> Vec<String> {
        if density <= 0.0 || density > 1.0 {
            return rows.to_vec();
        }

        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| {
                        if c == FLOOR as char && self.rng.random::<f64>() < density {
                            SPECIAL_TILES[self.rng.random_range(0..SPECIAL_TILES.len())] as char
                        } else {
                            c
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Generate a maze and sprinkle speed tiles in one call
    pub fn generate_with_special_tiles(
        width: i32,
        height: i32,
        density: f64,
        seed: u64,
    ) -> Vec<String> {
        let mut generator = Self::new(width, height, seed);
        let rows = generator.generate();
        generator.add_special_tiles(&rows, density)
    }
}
