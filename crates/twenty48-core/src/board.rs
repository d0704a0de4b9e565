//! Board engine: grid representation, slide/merge, tile spawning and
//! terminal detection.
//!
//! Every direction is resolved by reorienting the grid so the move becomes a
//! left slide, compacting each row, then undoing the reorientation:
//!
//! | Direction | Before          | After           |
//! |-----------|-----------------|-----------------|
//! | Up        | rotate 90° ccw  | rotate 90° cw   |
//! | Down      | rotate 90° cw   | rotate 90° ccw  |
//! | Left      | identity        | identity        |
//! | Right     | mirror          | mirror          |

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Direction;
use crate::reward::{Reward, RewardFunction};

/// Side length of the board
pub const SIZE: usize = 4;

/// Largest tile a 4x4 board can hold
pub const MAX_TILE: u32 = 1 << 17;

/// One row of tile values
pub type Row = [u32; SIZE];

/// 4x4 tile grid. Zero is an empty cell, anything else is a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid([Row; SIZE]);

impl Grid {
    /// A grid with no tiles
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    pub fn from_rows(rows: [Row; SIZE]) -> Self {
        Grid(rows)
    }

    pub fn rows(&self) -> &[Row; SIZE] {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.0[row][col] = value;
    }

    /// Coordinates of every empty cell, row-major
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.0.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    pub fn count_empty(&self) -> usize {
        self.cells().filter(|&v| v == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells().all(|v| v != 0)
    }

    /// Highest tile value on the board
    pub fn max_tile(&self) -> u32 {
        self.cells().max().unwrap_or(0)
    }

    /// Sum of `value / 2` over every occupied cell
    pub fn merge_sum(&self) -> u64 {
        self.cells().map(|v| u64::from(v / 2)).sum()
    }

    /// Every cell is zero or a power of two in `2..=MAX_TILE`
    pub fn is_valid(&self) -> bool {
        self.cells()
            .all(|v| v == 0 || ((2..=MAX_TILE).contains(&v) && v.is_power_of_two()))
    }

    /// Nonzero tile values, sorted ascending
    pub fn tiles(&self) -> Vec<u32> {
        let mut tiles: Vec<u32> = self.cells().filter(|&v| v != 0).collect();
        tiles.sort_unstable();
        tiles
    }

    fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }

    /// Rotate 90° counter-clockwise
    pub fn rotate_ccw(&self) -> Grid {
        let mut out = Grid::EMPTY;
        for i in 0..SIZE {
            for j in 0..SIZE {
                out.0[i][j] = self.0[j][SIZE - 1 - i];
            }
        }
        out
    }

    /// Rotate 90° clockwise
    pub fn rotate_cw(&self) -> Grid {
        let mut out = Grid::EMPTY;
        for i in 0..SIZE {
            for j in 0..SIZE {
                out.0[i][j] = self.0[SIZE - 1 - j][i];
            }
        }
        out
    }

    /// Mirror left-to-right
    pub fn mirror(&self) -> Grid {
        let mut out = *self;
        for row in out.0.iter_mut() {
            row.reverse();
        }
        out
    }

    fn compact_left(&self) -> Grid {
        Grid(self.0.map(compact_row))
    }

    /// Slide and merge toward `direction`. No tile is spawned.
    pub fn shift(&self, direction: Direction) -> Grid {
        match direction {
            Direction::Up => self.rotate_ccw().compact_left().rotate_cw(),
            Direction::Down => self.rotate_cw().compact_left().rotate_ccw(),
            Direction::Left => self.compact_left(),
            Direction::Right => self.mirror().compact_left().mirror(),
        }
    }
}

impl From<[Row; SIZE]> for Grid {
    fn from(rows: [Row; SIZE]) -> Self {
        Grid(rows)
    }
}

impl From<Grid> for [Row; SIZE] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(2).to_string().len();
        for row in &self.0 {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>width$}", v)).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Left-compact a single row.
///
/// Zeros are dropped, then one left-to-right sweep merges adjacent equal
/// pairs. A freshly merged tile never merges again in the same sweep, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
pub fn compact_row(row: Row) -> Row {
    let tiles: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut out = [0; SIZE];
    let mut write = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[write] = tiles[i].saturating_mul(2);
            i += 2;
        } else {
            out[write] = tiles[i];
            i += 1;
        }
        write += 1;
    }
    out
}

/// Distribution of newly spawned tile values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPolicy {
    /// Probability that a spawned tile is a 4 rather than a 2
    pub four_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            four_probability: 0.5,
        }
    }
}

impl SpawnPolicy {
    /// The 90/10 weighting used by most 2048 clients
    pub fn classic() -> Self {
        Self {
            four_probability: 0.1,
        }
    }

    /// Out-of-range probabilities are clamped to [0, 1]; NaN falls back to 0.5
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let p = if self.four_probability.is_nan() {
            0.5
        } else {
            self.four_probability.clamp(0.0, 1.0)
        };
        if rng.gen_bool(p) { 4 } else { 2 }
    }
}

/// Place one tile on a uniformly chosen empty cell.
///
/// Returns the cell that was filled, or `None` when the grid is full.
pub fn spawn_tile<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    policy: &SpawnPolicy,
) -> Option<(usize, usize)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    grid.set(row, col, policy.draw(rng));
    Some((row, col))
}

/// An empty grid seeded with two random tiles
pub fn new_game<R: Rng + ?Sized>(rng: &mut R, policy: &SpawnPolicy) -> Grid {
    let mut grid = Grid::EMPTY;
    spawn_tile(&mut grid, rng, policy);
    spawn_tile(&mut grid, rng, policy);
    grid
}

/// Result of applying one move
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Board after the move (and the spawn, if any)
    pub grid: Grid,
    /// Reward for the transition
    pub reward: Reward,
    /// Whether sliding or merging altered any cell
    pub changed: bool,
    /// Cell filled by the post-move spawn
    pub spawned: Option<(usize, usize)>,
}

/// Apply `direction` to a copy of `grid`.
///
/// The reward is computed on the slid board before the spawn. A move that
/// changes nothing spawns nothing.
pub fn apply_move<R, F>(
    grid: &Grid,
    direction: Direction,
    rng: &mut R,
    policy: &SpawnPolicy,
    reward_fn: &F,
) -> MoveOutcome
where
    R: Rng + ?Sized,
    F: RewardFunction<State = Grid> + ?Sized,
{
    let mut next = grid.shift(direction);
    let changed = next != *grid;
    let reward = reward_fn.compute(grid, &next);
    let spawned = if changed {
        spawn_tile(&mut next, rng, policy)
    } else {
        None
    };
    MoveOutcome {
        grid: next,
        reward,
        changed,
        spawned,
    }
}

/// True when the grid is full and no direction changes it
pub fn is_terminal(grid: &Grid) -> bool {
    if !grid.is_full() {
        return false;
    }
    Direction::ALL.iter().all(|&d| grid.shift(d) == *grid)
}
