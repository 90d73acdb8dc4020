//! Cell removal with rollback.

use std::time::Instant;

use rand::{Rng, RngExt};
use sudobank_core::{Grid, Position};

use crate::governor::{Governor, RunAbort};
use crate::solve::{SearchOutcome, count_solutions};

/// Acceptance predicate evaluated after each tentative removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The partial grid must remain solvable. This is the weaker predicate
    /// used by the on-demand fallback path; it does not rule out multiple
    /// solutions.
    Solvable,
    /// The partial grid must remain solvable with exactly one completion.
    /// Used for every persisted puzzle.
    UniquelySolvable,
}

/// Result of a carve run.
///
/// `removed` may fall short of the requested target when the attempt
/// budget or the per-puzzle deadline ran out first; the givens are still a
/// valid puzzle satisfying the acceptance predicate, just with fewer
/// blanks than the tier nominally calls for.
#[derive(Debug, Clone, Copy)]
pub struct Carved {
    /// The carved puzzle.
    pub givens: Grid,
    /// Number of cells blanked.
    pub removed: usize,
    /// Removal attempts consumed.
    pub attempts: usize,
}

/// Carves a puzzle out of a complete grid.
///
/// Repeatedly picks a uniformly random cell, tentatively blanks it, and
/// keeps the removal only if the acceptance predicate still holds;
/// otherwise the cell is restored and another attempt is made. The loop
/// stops when `blank_target` cells are gone or the attempt budget
/// (`governor.budgets().max_carve_attempts`) is spent.
///
/// The governor is consulted between attempts: the per-puzzle deadline
/// ends the carve early (a partial success), and the predicate itself runs
/// under that deadline, so an oracle timeout rejects the removal rather
/// than letting an unproven puzzle through.
///
/// # Errors
///
/// Returns [`RunAbort`] when the run-level wall-clock budget or memory
/// ceiling is exceeded; the caller should stop the whole run and keep what
/// it already has.
///
/// # Examples
///
/// ```
/// use sudobank_generator::{
///     Acceptance, Budgets, Governor, carve, seeded_rng, synthesize_complete,
/// };
///
/// let mut rng = seeded_rng(1);
/// let solution = synthesize_complete(&mut rng);
/// let governor = Governor::new(Budgets::unthrottled());
///
/// let carved = carve(&solution, 30, Acceptance::UniquelySolvable, &governor, &mut rng)?;
/// assert!(carved.removed <= 30);
/// assert!(carved.givens.is_completed_by(&solution));
/// # Ok::<(), sudobank_generator::RunAbort>(())
/// ```
pub fn carve<R: Rng + ?Sized>(
    solution: &Grid,
    blank_target: usize,
    acceptance: Acceptance,
    governor: &Governor,
    rng: &mut R,
) -> Result<Carved, RunAbort> {
    debug_assert!(solution.is_solved());

    let deadline = governor.puzzle_deadline();
    let max_attempts = governor.budgets().max_carve_attempts;
    let mut givens = *solution;
    let mut removed = 0;
    let mut attempts = 0;

    while removed < blank_target && attempts < max_attempts {
        attempts += 1;
        governor.check_run()?;
        if Instant::now() >= deadline {
            log::warn!(
                "puzzle budget elapsed after {removed} removals, \
                 keeping the partial carve"
            );
            break;
        }

        let pos = Position::from_index(rng.random_range(0..81));
        let digit = givens.get(pos);
        if digit == 0 {
            continue;
        }

        givens.clear(pos);
        if accepted(&givens, acceptance, deadline) {
            removed += 1;
        } else {
            givens.set(pos, digit);
        }
        governor.throttle();
    }

    log::debug!("carved {removed}/{blank_target} blanks in {attempts} attempts");
    Ok(Carved {
        givens,
        removed,
        attempts,
    })
}

/// Runs the acceptance predicate under the puzzle deadline. A deadline
/// overrun inside the search counts as a rejection (fail closed).
fn accepted(grid: &Grid, acceptance: Acceptance, deadline: Instant) -> bool {
    let cap = match acceptance {
        Acceptance::Solvable => 1,
        Acceptance::UniquelySolvable => 2,
    };
    match count_solutions(grid, cap, Some(deadline)) {
        SearchOutcome::Counted(count) => match acceptance {
            Acceptance::Solvable => count >= 1,
            Acceptance::UniquelySolvable => count == 1,
        },
        SearchOutcome::DeadlineExceeded => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use proptest::prelude::*;

    use crate::{
        Budgets, Uniqueness, is_uniquely_solvable, seeded_rng, solve, synthesize_complete,
    };

    use super::*;

    fn test_governor() -> Governor {
        Governor::new(Budgets::unthrottled())
    }

    #[test]
    fn test_unique_carve_is_sound() {
        let mut rng = seeded_rng(11);
        let solution = synthesize_complete(&mut rng);
        let carved = carve(
            &solution,
            40,
            Acceptance::UniquelySolvable,
            &test_governor(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(carved.givens.blank_count(), carved.removed);
        assert!(carved.givens.is_completed_by(&solution));
        // The one completion is the grid we started from.
        assert_eq!(solve(&carved.givens), Some(solution));
        assert_eq!(
            is_uniquely_solvable(&carved.givens, None),
            Uniqueness::Unique
        );
    }

    #[test]
    fn test_carve_never_exceeds_target() {
        let mut rng = seeded_rng(17);
        let solution = synthesize_complete(&mut rng);
        let carved = carve(&solution, 25, Acceptance::Solvable, &test_governor(), &mut rng)
            .unwrap();

        assert!(carved.removed <= 25);
        assert!(carved.givens.blank_count() <= 25);
        assert!(solve(&carved.givens).is_some());
    }

    #[test]
    fn test_acceptance_holds_on_final_givens() {
        // Re-running the predicate on the finished puzzle must agree.
        let mut rng = seeded_rng(23);
        let solution = synthesize_complete(&mut rng);
        let carved = carve(
            &solution,
            45,
            Acceptance::UniquelySolvable,
            &test_governor(),
            &mut rng,
        )
        .unwrap();

        let far_deadline = Instant::now() + Duration::from_secs(60);
        assert!(accepted(
            &carved.givens,
            Acceptance::UniquelySolvable,
            far_deadline
        ));
    }

    #[test]
    fn test_exhausted_run_budget_aborts() {
        let governor = Governor::new(Budgets {
            run_budget: Duration::ZERO,
            ..Budgets::unthrottled()
        });
        std::thread::sleep(Duration::from_millis(2));

        let mut rng = seeded_rng(3);
        let solution = synthesize_complete(&mut rng);
        let result = carve(
            &solution,
            40,
            Acceptance::UniquelySolvable,
            &governor,
            &mut rng,
        );
        assert_eq!(result.unwrap_err(), RunAbort::TimeBudget);
    }

    #[test]
    fn test_expired_puzzle_deadline_is_partial_success() {
        let governor = Governor::new(Budgets {
            puzzle_budget: Duration::ZERO,
            ..Budgets::unthrottled()
        });
        let mut rng = seeded_rng(5);
        let solution = synthesize_complete(&mut rng);
        let carved = carve(
            &solution,
            40,
            Acceptance::UniquelySolvable,
            &governor,
            &mut rng,
        )
        .unwrap();

        assert_eq!(carved.removed, 0);
        assert_eq!(carved.givens, solution);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Whatever the seed and target, a unique-acceptance carve leaves a
        /// grid the oracle counts exactly one completion for.
        #[test]
        fn test_unique_carve_counts_to_one(seed in any::<u64>(), target in 1usize..=20) {
            let mut rng = seeded_rng(seed);
            let solution = synthesize_complete(&mut rng);
            let carved = carve(
                &solution,
                target,
                Acceptance::UniquelySolvable,
                &test_governor(),
                &mut rng,
            )
            .unwrap();

            prop_assert_eq!(
                count_solutions(&carved.givens, 2, None),
                SearchOutcome::Counted(1)
            );
        }
    }

    #[test]
    fn test_zero_target_removes_nothing() {
        let mut rng = seeded_rng(29);
        let solution = synthesize_complete(&mut rng);
        let carved = carve(
            &solution,
            0,
            Acceptance::UniquelySolvable,
            &test_governor(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(carved.removed, 0);
        assert_eq!(carved.attempts, 0);
        assert_eq!(carved.givens, solution);
    }
}
