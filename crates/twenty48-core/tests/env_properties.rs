//! Property tests for the board engine over generated grids.
//!
//! Invariants covered:
//! - Every direction equals a left slide in the matching reoriented frame.
//! - Sliding preserves the total tile value; merge-free moves keep the exact
//!   multiset of tiles.
//! - A changing move spawns exactly one 2 or 4 on a previously empty cell.
//! - A no-op move returns the board untouched with reward -1.
//! - Terminal detection agrees with a direct adjacency scan.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use twenty48_core::board::SIZE;
use twenty48_core::{
    Direction, Environment, Game2048Env, Grid, MergeReward, SpawnPolicy, apply_move, is_terminal,
};

fn grid_strategy() -> impl Strategy<Value = Grid> {
    let cell = prop_oneof![
        3 => Just(0u32),
        4 => (1u32..=11).prop_map(|k| 1u32 << k),
    ];
    prop::collection::vec(cell, SIZE * SIZE).prop_map(|cells| {
        let mut grid = Grid::EMPTY;
        for (i, v) in cells.into_iter().enumerate() {
            grid.set(i / SIZE, i % SIZE, v);
        }
        grid
    })
}

fn full_grid_strategy() -> impl Strategy<Value = Grid> {
    prop::collection::vec(1u32..=3, SIZE * SIZE).prop_map(|cells| {
        let mut grid = Grid::EMPTY;
        for (i, k) in cells.into_iter().enumerate() {
            grid.set(i / SIZE, i % SIZE, 1 << k);
        }
        grid
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn total(grid: &Grid) -> u64 {
    grid.rows().iter().flatten().map(|&v| u64::from(v)).sum()
}

fn has_adjacent_pair(grid: &Grid) -> bool {
    (0..SIZE).any(|r| {
        (0..SIZE).any(|c| {
            let v = grid.get(r, c);
            (c + 1 < SIZE && grid.get(r, c + 1) == v) || (r + 1 < SIZE && grid.get(r + 1, c) == v)
        })
    })
}

proptest! {
    #[test]
    fn directions_match_reoriented_left_slide(grid in grid_strategy()) {
        prop_assert_eq!(
            grid.shift(Direction::Up),
            grid.rotate_ccw().shift(Direction::Left).rotate_cw()
        );
        prop_assert_eq!(
            grid.shift(Direction::Down),
            grid.rotate_cw().shift(Direction::Left).rotate_ccw()
        );
        prop_assert_eq!(
            grid.shift(Direction::Right),
            grid.mirror().shift(Direction::Left).mirror()
        );
    }

    #[test]
    fn sliding_conserves_value(grid in grid_strategy(), direction in direction_strategy()) {
        let next = grid.shift(direction);
        prop_assert_eq!(total(&next), total(&grid));
        prop_assert!(next.is_valid());
        if next.tiles().len() == grid.tiles().len() {
            prop_assert_eq!(next.tiles(), grid.tiles());
        }
    }

    #[test]
    fn changing_move_spawns_one_tile(
        grid in grid_strategy(),
        direction in direction_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let slid = grid.shift(direction);
        let out = apply_move(&grid, direction, &mut rng, &SpawnPolicy::default(), &MergeReward::default());

        prop_assert_eq!(out.changed, slid != grid);
        if out.changed {
            let diffs: Vec<(usize, usize)> = (0..SIZE)
                .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
                .filter(|&(r, c)| out.grid.get(r, c) != slid.get(r, c))
                .collect();
            prop_assert_eq!(diffs.len(), 1);
            let (r, c) = diffs[0];
            prop_assert_eq!(slid.get(r, c), 0);
            prop_assert!(matches!(out.grid.get(r, c), 2 | 4));
            prop_assert_eq!(out.spawned, Some((r, c)));
        } else {
            prop_assert_eq!(out.grid, grid);
            prop_assert_eq!(out.reward.value, -1.0);
            prop_assert!(out.spawned.is_none());
        }
    }

    #[test]
    fn terminal_matches_adjacency_scan(grid in full_grid_strategy()) {
        prop_assert_eq!(is_terminal(&grid), !has_adjacent_pair(&grid));
    }

    #[test]
    fn seeded_envs_agree(seed in any::<u64>(), actions in prop::collection::vec(0i64..4, 1..60)) {
        let mut a = Game2048Env::with_seed(seed);
        let mut b = Game2048Env::with_seed(seed);
        for action in actions {
            let ra = a.step_index(action).unwrap();
            let rb = b.step_index(action).unwrap();
            prop_assert_eq!(ra.observation, rb.observation);
            prop_assert!(ra.observation.is_valid());
            prop_assert_eq!(ra.done, rb.done);
        }
        prop_assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());
    }
}
