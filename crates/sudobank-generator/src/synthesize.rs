//! Randomized synthesis of complete grids.

use rand::Rng;
use rand::seq::SliceRandom as _;
use sudobank_core::{Grid, Position};

/// Produces a fully filled, solved grid.
///
/// Backtracks over cells in row-major order, trying the digits 1-9 in a
/// freshly shuffled order at each cell — the shuffle is what makes
/// successive calls produce different grids, unlike the deterministic
/// solver. Starting from an empty grid the search always terminates with a
/// complete Latin-square-style solution, so there is no failure path.
///
/// Like the solver, the search runs on an explicit frame stack: one frame
/// per cell holding that cell's shuffled digit order and a cursor into it.
///
/// # Examples
///
/// ```
/// use sudobank_generator::{seeded_rng, synthesize_complete};
///
/// let mut rng = seeded_rng(7);
/// let grid = synthesize_complete(&mut rng);
/// assert!(grid.is_solved());
///
/// // Same seed, same grid.
/// assert_eq!(grid, synthesize_complete(&mut seeded_rng(7)));
/// ```
#[must_use]
pub fn synthesize_complete<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    let mut grid = Grid::EMPTY;
    let mut frames: Vec<Frame> = Vec::with_capacity(81);
    let mut depth = 0_usize;

    loop {
        if depth == 81 {
            debug_assert!(grid.is_solved());
            return grid;
        }
        if frames.len() == depth {
            frames.push(Frame::shuffled(rng));
        }

        let pos = Position::from_index(depth as u8);
        if let Some(digit) = frames[depth].next_legal(&grid, pos) {
            grid.set(pos, digit);
            depth += 1;
            continue;
        }

        // Every digit failed here; drop the frame and revisit the previous
        // cell. Exhausting the first cell just means a fresh reshuffle.
        frames.pop();
        if depth > 0 {
            depth -= 1;
            grid.clear(Position::from_index(depth as u8));
        }
    }
}

struct Frame {
    order: [u8; 9],
    cursor: usize,
}

impl Frame {
    fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    fn next_legal(&mut self, grid: &Grid, pos: Position) -> Option<u8> {
        while self.cursor < 9 {
            let digit = self.order[self.cursor];
            self.cursor += 1;
            if grid.is_legal(pos, digit) {
                return Some(digit);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::seeded_rng;

    use super::*;

    #[test]
    fn test_synthesized_grids_are_solved() {
        let mut rng = seeded_rng(0);
        for _ in 0..20 {
            assert!(synthesize_complete(&mut rng).is_solved());
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        assert_eq!(
            synthesize_complete(&mut seeded_rng(123)),
            synthesize_complete(&mut seeded_rng(123)),
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        // Not guaranteed in principle, but a collision here would point at
        // broken seed threading.
        let grids: Vec<_> = (0..10)
            .map(|seed| synthesize_complete(&mut seeded_rng(seed)))
            .collect();
        let first = grids[0];
        assert!(grids.iter().any(|grid| *grid != first));
    }
}
