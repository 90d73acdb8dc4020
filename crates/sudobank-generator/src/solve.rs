//! Deterministic solving and capped solution counting.
//!
//! Both entry points share one iterative backtracking engine that tries
//! digits 1-9 in ascending order at each empty cell. [`solve`] stops at the
//! first full assignment; [`count_solutions`] keeps searching until it has
//! found `cap` solutions or exhausted the tree, which is what makes it
//! usable as a uniqueness oracle — a first-solution search cannot tell
//! "unique" from "has multiple solutions".

use std::time::Instant;

use sudobank_core::{Grid, Position};

/// How often the search checks its deadline, in explored nodes.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Outcome of a capped solution-counting search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The search finished; `0` means unsolvable, values below the cap are
    /// exact, and the cap itself means "at least this many".
    Counted(usize),
    /// The deadline elapsed mid-search; no count can be reported.
    DeadlineExceeded,
}

/// Instrumentation collected by a search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    nodes: u64,
}

impl SearchStats {
    /// Returns the number of digit placements explored.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

/// Verdict of the uniqueness oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    /// Exactly one completion exists.
    Unique,
    /// Zero or at least two completions exist.
    NotUnique,
    /// The search hit its deadline; callers must treat this as "not proven
    /// unique" and reject.
    Unknown,
}

/// Finds the first solution of a partial grid, if any.
///
/// The input is copied; the caller's grid is never mutated. Digits are
/// tried in ascending order, so the result is deterministic for a given
/// input. Grids whose givens already conflict are unsolvable and return
/// `None` immediately.
///
/// # Examples
///
/// ```
/// use sudobank_core::{Grid, Position};
/// use sudobank_generator::solve;
///
/// let solution: Grid = "
///     534678912 672195348 198342567
///     859761423 426853791 713924856
///     961537284 287419635 345286179
/// "
/// .parse()?;
///
/// let mut givens = solution;
/// givens.clear(Position::new(0, 0));
/// assert_eq!(solve(&givens), Some(solution));
/// # Ok::<(), sudobank_core::GridParseError>(())
/// ```
#[must_use]
pub fn solve(grid: &Grid) -> Option<Grid> {
    if grid.has_conflicts() {
        return None;
    }
    let mut search = Backtracker::new(grid);
    match search.next_solution(None) {
        Step::Solution(solution) => Some(solution),
        Step::Exhausted | Step::DeadlineExceeded => None,
    }
}

/// Counts completions of a partial grid, up to `cap`.
///
/// The search abandons a branch as soon as the running count reaches
/// `cap`, so proving "two or more" does not require enumerating the whole
/// tree. With `cap = 2` this is the uniqueness oracle; with `cap = 1` it
/// is a governed solvability check.
///
/// If `deadline` is given and elapses mid-search, the result is
/// [`SearchOutcome::DeadlineExceeded`] and no count is reported.
#[must_use]
pub fn count_solutions(grid: &Grid, cap: usize, deadline: Option<Instant>) -> SearchOutcome {
    count_solutions_with_stats(grid, cap, deadline).0
}

/// Like [`count_solutions`], but also reports search instrumentation.
#[must_use]
pub fn count_solutions_with_stats(
    grid: &Grid,
    cap: usize,
    deadline: Option<Instant>,
) -> (SearchOutcome, SearchStats) {
    if grid.has_conflicts() || cap == 0 {
        return (SearchOutcome::Counted(0), SearchStats::default());
    }
    let mut search = Backtracker::new(grid);
    let mut count = 0;
    loop {
        match search.next_solution(deadline) {
            Step::Solution(_) => {
                count += 1;
                if count >= cap {
                    return (SearchOutcome::Counted(count), search.stats);
                }
            }
            Step::Exhausted => return (SearchOutcome::Counted(count), search.stats),
            Step::DeadlineExceeded => return (SearchOutcome::DeadlineExceeded, search.stats),
        }
    }
}

/// Decides whether a partial grid has exactly one completion.
///
/// Runs [`count_solutions`] with a cap of 2. A deadline overrun yields
/// [`Uniqueness::Unknown`] rather than a guess; the carver treats that as
/// a rejection, so a timeout can never let a multi-solution puzzle
/// through.
#[must_use]
pub fn is_uniquely_solvable(grid: &Grid, deadline: Option<Instant>) -> Uniqueness {
    match count_solutions(grid, 2, deadline) {
        SearchOutcome::Counted(1) => Uniqueness::Unique,
        SearchOutcome::Counted(_) => Uniqueness::NotUnique,
        SearchOutcome::DeadlineExceeded => Uniqueness::Unknown,
    }
}

enum Step {
    Solution(Grid),
    Exhausted,
    DeadlineExceeded,
}

/// Iterative backtracking over the empty cells of a grid.
///
/// One frame per empty cell: `cursors[depth]` is the next digit to try at
/// `empties[depth]`. Calling [`Backtracker::next_solution`] repeatedly
/// yields every completion in ascending digit order until the tree is
/// exhausted.
struct Backtracker {
    work: Grid,
    empties: Vec<Position>,
    cursors: Vec<u8>,
    depth: usize,
    yielded: bool,
    stats: SearchStats,
}

impl Backtracker {
    fn new(grid: &Grid) -> Self {
        let empties: Vec<_> = grid.empty_positions().collect();
        let cursors = vec![1; empties.len()];
        Self {
            work: *grid,
            empties,
            cursors,
            depth: 0,
            yielded: false,
            stats: SearchStats::default(),
        }
    }

    fn next_solution(&mut self, deadline: Option<Instant>) -> Step {
        // Resume below the solution yielded by the previous call.
        if self.yielded {
            self.yielded = false;
            if !self.backtrack() {
                return Step::Exhausted;
            }
        }
        loop {
            if self.depth == self.empties.len() {
                self.yielded = true;
                return Step::Solution(self.work);
            }
            if let Some(deadline) = deadline
                && self.stats.nodes % DEADLINE_CHECK_INTERVAL == 0
                && Instant::now() >= deadline
            {
                return Step::DeadlineExceeded;
            }

            let pos = self.empties[self.depth];
            let mut placed = false;
            while self.cursors[self.depth] <= 9 {
                let digit = self.cursors[self.depth];
                self.cursors[self.depth] += 1;
                self.stats.nodes += 1;
                if self.work.is_legal(pos, digit) {
                    self.work.set(pos, digit);
                    self.depth += 1;
                    placed = true;
                    break;
                }
            }
            if !placed {
                self.cursors[self.depth] = 1;
                if !self.backtrack() {
                    return Step::Exhausted;
                }
            }
        }
    }

    /// Steps back to the previous frame, clearing its placement. Returns
    /// `false` when the root is exhausted.
    fn backtrack(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        self.work.clear(self.empties[self.depth]);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sudobank_core::Position;

    use super::*;

    const SOLVED: &str = "
        534678912 672195348 198342567
        859761423 426853791 713924856
        961537284 287419635 345286179
    ";

    fn solved_grid() -> Grid {
        SOLVED.parse().unwrap()
    }

    #[test]
    fn test_solve_restores_removed_cell() {
        let solution = solved_grid();
        let mut givens = solution;
        givens.clear(Position::new(0, 0));

        assert_eq!(solve(&givens), Some(solution));
        assert_eq!(
            is_uniquely_solvable(&givens, None),
            Uniqueness::Unique,
        );
    }

    #[test]
    fn test_solve_classic_puzzle() {
        let givens: Grid = "
            53..7....
            6..195...
            .98....6.
            8...6...3
            4..8.3..1
            7...2...6
            .6....28.
            ...419..5
            ....8..79
        "
        .parse()
        .unwrap();

        assert_eq!(solve(&givens), Some(solved_grid()));
    }

    #[test]
    fn test_solve_rejects_conflicting_givens() {
        let mut grid = Grid::EMPTY;
        grid.set(Position::new(0, 0), 5);
        grid.set(Position::new(0, 1), 5);
        assert_eq!(solve(&grid), None);
        assert_eq!(count_solutions(&grid, 2, None), SearchOutcome::Counted(0));
    }

    #[test]
    fn test_solved_grid_counts_to_one() {
        let grid = solved_grid();
        assert_eq!(count_solutions(&grid, 2, None), SearchOutcome::Counted(1));
    }

    #[test]
    fn test_unsolvable_counts_to_zero() {
        // Cell (0, 0) is empty but every digit collides with its peers.
        let grid: Grid = "
            .12345678
            34.......
            56.......
            7........
            8........
            9........
            .........
            .........
            .........
        "
        .parse()
        .unwrap();
        assert_eq!(count_solutions(&grid, 2, None), SearchOutcome::Counted(0));
        assert_eq!(solve(&grid), None);
        assert_eq!(is_uniquely_solvable(&grid, None), Uniqueness::NotUnique);
    }

    /// Blanking the 6/7 rectangle at rows {0, 3} × columns {3, 4} admits a
    /// second completion with the pair swapped in both rows.
    fn two_solution_grid() -> Grid {
        let mut grid = solved_grid();
        for (row, col) in [(0, 3), (0, 4), (3, 3), (3, 4)] {
            grid.clear(Position::new(row, col));
        }
        grid
    }

    #[test]
    fn test_swappable_rectangle_is_not_unique() {
        let grid = two_solution_grid();
        assert_eq!(count_solutions(&grid, 2, None), SearchOutcome::Counted(2));
        assert_eq!(count_solutions(&grid, 3, None), SearchOutcome::Counted(2));
        assert_eq!(is_uniquely_solvable(&grid, None), Uniqueness::NotUnique);

        // The deterministic solver still finds one of the two completions.
        let solved = solve(&grid).unwrap();
        assert!(solved.is_solved());
        assert!(grid.is_completed_by(&solved));
    }

    #[test]
    fn test_counting_stops_at_cap() {
        // An empty grid has a vast number of completions; reaching the cap
        // must happen after a tiny fraction of the tree.
        let (outcome, stats) = count_solutions_with_stats(&Grid::EMPTY, 2, None);
        assert_eq!(outcome, SearchOutcome::Counted(2));
        assert!(
            stats.nodes() < 100_000,
            "cap-2 search explored {} nodes",
            stats.nodes()
        );
    }

    #[test]
    fn test_expired_deadline_reports_unknown() {
        let deadline = Instant::now() - Duration::from_millis(1);
        assert_eq!(
            count_solutions(&Grid::EMPTY, 2, Some(deadline)),
            SearchOutcome::DeadlineExceeded
        );
        assert_eq!(
            is_uniquely_solvable(&Grid::EMPTY, Some(deadline)),
            Uniqueness::Unknown
        );
    }

    #[test]
    fn test_cap_one_is_a_solvability_check() {
        let mut givens = solved_grid();
        givens.clear(Position::new(8, 8));
        assert_eq!(count_solutions(&givens, 1, None), SearchOutcome::Counted(1));
    }
}
