//! Puzzle synthesis, solving, and carving for sudobank.
//!
//! This crate houses the search-heavy half of the pipeline:
//!
//! - [`synthesize`]: randomized synthesis of complete, solved grids
//! - [`solve`]: deterministic first-solution search and the capped
//!   solution counter used as a uniqueness oracle
//! - [`carve`]: cell removal with rollback under an acceptance predicate
//! - [`governor`]: wall-clock and memory ceilings around the search
//! - [`on_demand`]: the weaker, solvable-only fallback generation path
//!
//! All backtracking runs on an explicit frame stack, so recursion depth is
//! bounded and deadlines are checked between frames rather than at call
//! granularity. Randomness is always threaded through a caller-supplied
//! generator; use [`seeded_rng`] for reproducible runs and [`entropy_rng`]
//! in production paths.
//!
//! # Examples
//!
//! ```
//! use sudobank_generator::{seeded_rng, solve, synthesize_complete};
//!
//! let mut rng = seeded_rng(42);
//! let solution = synthesize_complete(&mut rng);
//! assert!(solution.is_solved());
//!
//! // A solved grid is its own unique solution.
//! assert_eq!(solve(&solution), Some(solution));
//! ```

pub mod carve;
pub mod governor;
pub mod on_demand;
pub mod solve;
pub mod synthesize;

use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

pub use self::{
    carve::{Acceptance, Carved, carve},
    governor::{Budgets, Governor, RunAbort},
    on_demand::{OnDemandPuzzle, generate_on_demand},
    solve::{SearchOutcome, SearchStats, Uniqueness, count_solutions, is_uniquely_solvable, solve},
    synthesize::synthesize_complete,
};

/// Creates a reproducible generator from a 64-bit seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed)
}

/// Creates a generator seeded from system entropy.
#[must_use]
pub fn entropy_rng() -> Pcg64Mcg {
    Pcg64Mcg::from_rng(&mut rand::rng())
}
