//! On-demand fallback generation.
//!
//! When the presentation layer asks for a tier with no banked record, it
//! falls back to synthesizing a puzzle on the spot. This path validates
//! **solvability only** — unlike the offline inventory, it does not prove
//! the puzzle has a single solution. That asymmetry is deliberate and
//! load-bearing: the fallback must stay fast enough for interactive use,
//! and callers that need the uniqueness guarantee must draw from the
//! inventory instead.

use std::time::Duration;

use rand::Rng;
use sudobank_core::{Grid, Tier};

use crate::carve::{Acceptance, carve};
use crate::governor::{Budgets, Governor, RunAbort};

/// A puzzle produced by the fallback path.
///
/// The solution is the synthesized grid the givens were carved from; it is
/// *a* completion of the givens, but not necessarily the only one.
#[derive(Debug, Clone, Copy)]
pub struct OnDemandPuzzle {
    /// Difficulty tier the puzzle was carved for.
    pub tier: Tier,
    /// The carved givens.
    pub givens: Grid,
    /// The complete grid the givens were carved from.
    pub solution: Grid,
}

/// Generates a single puzzle immediately, without the uniqueness oracle.
///
/// Carves with [`Acceptance::Solvable`] under a short per-puzzle budget
/// and no throttle delay. The result may admit more than one solution.
///
/// # Errors
///
/// Returns [`RunAbort::MemoryCeiling`] if the process is already over the
/// memory ceiling; the wall-clock budget is sized so it cannot expire
/// within a single fallback carve.
pub fn generate_on_demand<R: Rng + ?Sized>(
    tier: Tier,
    rng: &mut R,
) -> Result<OnDemandPuzzle, RunAbort> {
    let governor = Governor::new(Budgets {
        run_budget: Duration::from_secs(60),
        puzzle_budget: Duration::from_secs(5),
        throttle_delay: Duration::ZERO,
        ..Budgets::default()
    });

    let solution = crate::synthesize_complete(rng);
    let carved = carve(
        &solution,
        tier.blank_target(),
        Acceptance::Solvable,
        &governor,
        rng,
    )?;

    log::debug!(
        "on-demand {tier} puzzle: {} blanks (target {})",
        carved.removed,
        tier.blank_target()
    );
    Ok(OnDemandPuzzle {
        tier,
        givens: carved.givens,
        solution,
    })
}

#[cfg(test)]
mod tests {
    use crate::{seeded_rng, solve};

    use super::*;

    #[test]
    fn test_on_demand_puzzle_is_solvable() {
        let mut rng = seeded_rng(31);
        let puzzle = generate_on_demand(Tier::Easy, &mut rng).unwrap();

        assert_eq!(puzzle.tier, Tier::Easy);
        assert!(puzzle.solution.is_solved());
        assert!(puzzle.givens.is_completed_by(&puzzle.solution));
        assert!(solve(&puzzle.givens).is_some());
        assert!(puzzle.givens.blank_count() <= Tier::Easy.blank_target());
    }
}
