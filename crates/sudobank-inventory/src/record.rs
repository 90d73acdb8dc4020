//! Puzzle records.

use sudobank_core::{Grid, Tier};

/// A banked puzzle: difficulty tier, givens, and the full solution.
///
/// Records are immutable once created. Construction checks the record's
/// internal consistency, so a [`PuzzleRecord`] in hand is always a valid
/// puzzle: the solution is a solved grid and every given agrees with it.
/// Nothing stronger than `(tier, givens)` identifies a record; duplicate
/// puzzles across generation runs are tolerated by design, since play-time
/// consumers draw randomly among a tier's records.
///
/// # Examples
///
/// ```
/// use sudobank_core::Tier;
/// use sudobank_generator::{seeded_rng, synthesize_complete};
/// use sudobank_inventory::PuzzleRecord;
///
/// let solution = synthesize_complete(&mut seeded_rng(2));
/// let record = PuzzleRecord::new(Tier::Hard, solution, solution)?;
/// assert_eq!(record.tier(), Tier::Hard);
/// # Ok::<(), sudobank_inventory::RecordError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleRecord {
    tier: Tier,
    givens: Grid,
    solution: Grid,
}

/// Errors detected when assembling a puzzle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RecordError {
    /// The solution grid is not a valid complete grid.
    #[display("solution grid is not solved")]
    SolutionNotSolved,
    /// A non-zero given disagrees with the solution.
    #[display("givens are not a subset of the solution")]
    GivensMismatch,
}

impl PuzzleRecord {
    /// Creates a record after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SolutionNotSolved`] if `solution` is not a
    /// complete, conflict-free grid, or [`RecordError::GivensMismatch`] if
    /// any non-zero cell of `givens` differs from `solution`.
    pub fn new(tier: Tier, givens: Grid, solution: Grid) -> Result<Self, RecordError> {
        if !solution.is_solved() {
            return Err(RecordError::SolutionNotSolved);
        }
        if !givens.is_completed_by(&solution) {
            return Err(RecordError::GivensMismatch);
        }
        Ok(Self {
            tier,
            givens,
            solution,
        })
    }

    /// Returns the difficulty tier.
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Returns the carved givens.
    #[must_use]
    pub fn givens(&self) -> &Grid {
        &self.givens
    }

    /// Returns the full solution.
    #[must_use]
    pub fn solution(&self) -> &Grid {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use sudobank_core::Position;
    use sudobank_generator::{seeded_rng, synthesize_complete};

    use super::*;

    #[test]
    fn test_valid_record() {
        let solution = synthesize_complete(&mut seeded_rng(41));
        let mut givens = solution;
        givens.clear(Position::new(0, 0));

        let record = PuzzleRecord::new(Tier::Extreme, givens, solution).unwrap();
        assert_eq!(record.tier(), Tier::Extreme);
        assert_eq!(record.givens().blank_count(), 1);
        assert!(record.solution().is_solved());
    }

    #[test]
    fn test_rejects_unsolved_solution() {
        let mut solution = synthesize_complete(&mut seeded_rng(43));
        solution.clear(Position::new(4, 4));
        assert_eq!(
            PuzzleRecord::new(Tier::Hard, Grid::EMPTY, solution),
            Err(RecordError::SolutionNotSolved)
        );
    }

    #[test]
    fn test_rejects_mismatched_givens() {
        let solution = synthesize_complete(&mut seeded_rng(47));
        let mut givens = solution;
        let pos = Position::new(0, 0);
        let wrong = if solution.get(pos) == 9 { 1 } else { solution.get(pos) + 1 };
        givens.clear(Position::new(0, 1));

        // Force a single disagreeing given.
        let mut cells = *givens.cells();
        cells[pos.index()] = wrong;
        let givens = Grid::from_cells(cells).unwrap();

        assert_eq!(
            PuzzleRecord::new(Tier::Hard, givens, solution),
            Err(RecordError::GivensMismatch)
        );
    }
}
