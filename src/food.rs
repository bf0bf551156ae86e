use log::{debug, warn};
use rand::Rng;
use serde::Serialize;

use crate::body::{Cell, GridBody};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    #[must_use]
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }

    /// Places food with bounded retries; see [`place`].
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        body: &GridBody,
        grid_count: i32,
        max_attempts: u32,
    ) -> Self {
        Self::new(place(rng, body, grid_count, max_attempts))
    }
}

/// Samples uniformly random cells until one is off the body.
///
/// Gives up after `max_attempts` samples and returns the last sample even if
/// the body covers it. On a nearly full board food can therefore land on the
/// snake.
#[must_use]
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    body: &GridBody,
    grid_count: i32,
    max_attempts: u32,
) -> Cell {
    debug_assert!(grid_count > 0);

    let mut candidate = sample(rng, grid_count);
    for attempt in 1..max_attempts.max(1) {
        if !body.occupies(candidate) {
            debug!("food placed at {candidate:?} after {attempt} attempt(s)");
            return candidate;
        }
        candidate = sample(rng, grid_count);
    }

    if body.occupies(candidate) {
        warn!(
            "food placement exhausted {max_attempts} attempts; spawning on body at {candidate:?}"
        );
    }

    candidate
}

fn sample<R: Rng + ?Sized>(rng: &mut R, grid_count: i32) -> Cell {
    Cell::new(rng.gen_range(0..grid_count), rng.gen_range(0..grid_count))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use crate::body::{Cell, GridBody};

    use super::{place, Food};

    /// Counts how many values the placer draws.
    struct CountingRng {
        inner: StdRng,
        draws: u32,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    fn full_board_except(grid_count: i32, free: Option<Cell>) -> GridBody {
        let mut cells = Vec::new();
        for row in 0..grid_count {
            for col in 0..grid_count {
                let cell = Cell::new(col, row);
                if Some(cell) != free {
                    cells.push(cell);
                }
            }
        }
        GridBody::from_cells(cells).expect("test body should be non-empty")
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let body = GridBody::from_cells(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)])
            .expect("test body should be non-empty");

        for _ in 0..100 {
            let cell = place(&mut rng, &body, 6, 100);
            assert!(!body.occupies(cell));
            assert!((0..6).contains(&cell.col) && (0..6).contains(&cell.row));
        }
    }

    #[test]
    fn placement_is_replayable_from_seed() {
        let body = GridBody::new(Cell::new(3, 3));

        let first: Vec<Cell> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| place(&mut rng, &body, 8, 100)).collect()
        };
        let second: Vec<Cell> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| place(&mut rng, &body, 8, 100)).collect()
        };

        assert_eq!(first, second);
    }

    #[test]
    fn full_board_returns_occupied_cell_after_bounded_attempts() {
        let body = full_board_except(4, None);
        let mut rng = CountingRng {
            inner: StdRng::seed_from_u64(3),
            draws: 0,
        };

        let cell = place(&mut rng, &body, 4, 100);

        assert!(body.occupies(cell));
        // Two coordinates per sample; `gen_range` may draw more than once per
        // coordinate, but not unboundedly for a small range.
        assert!(rng.draws >= 200);
        assert!(rng.draws < 1_000);
    }

    #[test]
    fn single_free_cell_is_usually_found() {
        let free = Cell::new(1, 1);
        let body = full_board_except(2, Some(free));
        let mut rng = StdRng::seed_from_u64(11);

        // 1 - (3/4)^100 is effectively certain for a fixed seed.
        assert_eq!(place(&mut rng, &body, 2, 100), free);
    }

    #[test]
    fn spawn_wraps_placement() {
        let mut rng = StdRng::seed_from_u64(5);
        let body = GridBody::new(Cell::new(0, 0));

        let food = Food::spawn(&mut rng, &body, 1, 100);

        // A 1x1 grid leaves nowhere else to go.
        assert_eq!(food.cell, Cell::new(0, 0));
    }
}
