//! The batch replenishment run.

use std::time::Duration;

use rand::Rng;
use sudobank_core::Tier;
use sudobank_generator::{Acceptance, Budgets, Governor, RunAbort, carve, synthesize_complete};

use crate::inventory::Inventory;
use crate::record::PuzzleRecord;

/// Target record counts per tier.
///
/// Easy and medium puzzles are carved on demand at play time, so their
/// targets default to zero; only the search-expensive tiers are banked
/// ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    /// Easy records to keep banked.
    pub easy: usize,
    /// Medium records to keep banked.
    pub medium: usize,
    /// Hard records to keep banked.
    pub hard: usize,
    /// Extreme records to keep banked.
    pub extreme: usize,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            easy: 0,
            medium: 0,
            hard: 100,
            extreme: 50,
        }
    }
}

impl Targets {
    /// Targets with every tier at zero, for selective overrides.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            easy: 0,
            medium: 0,
            hard: 0,
            extreme: 0,
        }
    }

    /// Returns the target count for one tier.
    #[must_use]
    pub fn target(&self, tier: Tier) -> usize {
        match tier {
            Tier::Easy => self.easy,
            Tier::Medium => self.medium,
            Tier::Hard => self.hard,
            Tier::Extreme => self.extreme,
        }
    }
}

/// What a replenishment run accomplished.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    /// Records generated and committed.
    pub generated: usize,
    /// Puzzles abandoned (rejected record or skipped failure).
    pub skipped: usize,
    /// Why the run stopped early, if it did.
    pub aborted: Option<RunAbort>,
    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

/// Tops the inventory up to its per-tier targets.
///
/// For each tier with a shortfall, synthesizes a complete grid and carves
/// it with the [`Acceptance::UniquelySolvable`] predicate, once per
/// missing record. Every committed record passed its predicate in full;
/// a puzzle that fails mid-generation is skipped and the run continues
/// with the next. A run-level abort (wall clock or memory) ends the run
/// early — already-committed records are unaffected and the report says
/// why the run stopped.
///
/// Tiers already at or above target are left untouched; existing records
/// are never regenerated or deduplicated.
pub fn replenish<R: Rng + ?Sized>(
    inventory: &mut Inventory,
    targets: &Targets,
    budgets: &Budgets,
    rng: &mut R,
) -> RunReport {
    let governor = Governor::new(*budgets);
    let mut report = RunReport::default();

    'run: for tier in Tier::ALL {
        let present = inventory.count(tier);
        let target = targets.target(tier);
        let missing = target.saturating_sub(present);
        if missing == 0 {
            continue;
        }
        log::info!("replenishing {tier}: {present}/{target} banked, generating {missing}");

        for n in 1..=missing {
            if let Err(abort) = governor.check_run() {
                log::warn!("stopping run early: {abort}");
                report.aborted = Some(abort);
                break 'run;
            }

            let solution = synthesize_complete(rng);
            let carved = match carve(
                &solution,
                tier.blank_target(),
                Acceptance::UniquelySolvable,
                &governor,
                rng,
            ) {
                Ok(carved) => carved,
                Err(abort) => {
                    log::warn!("stopping run early: {abort}");
                    report.aborted = Some(abort);
                    break 'run;
                }
            };

            match PuzzleRecord::new(tier, carved.givens, solution) {
                Ok(record) => {
                    inventory.push(record);
                    report.generated += 1;
                    log::info!(
                        "{tier} {n}/{missing}: {} blanks in {} attempts",
                        carved.removed,
                        carved.attempts
                    );
                }
                Err(err) => {
                    report.skipped += 1;
                    log::warn!("skipping {tier} puzzle {n}/{missing}: {err}");
                }
            }
        }
    }

    report.elapsed = governor.elapsed();
    log::info!(
        "run finished: {} generated, {} skipped, {:.1?} elapsed",
        report.generated,
        report.skipped,
        report.elapsed
    );
    report
}
