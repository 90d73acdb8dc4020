//! Resource ceilings around search-heavy operations.
//!
//! Three independent ceilings apply to a generation run:
//!
//! 1. a global wall-clock budget — exceeded, the whole run aborts
//!    gracefully and whatever was produced so far is kept;
//! 2. a per-puzzle wall-clock budget — exceeded, the current puzzle
//!    attempt is abandoned and the run moves on;
//! 3. a memory ceiling on resident-set size — exceeded, the run aborts.
//!
//! A cooperative micro-delay between carve attempts caps sustained CPU
//! utilization; it affects scheduling fairness only, never correctness.

use std::thread;
use std::time::{Duration, Instant};

/// Resource budgets for a generation run.
///
/// All knobs have fixed defaults and every one is overridable.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sudobank_generator::Budgets;
///
/// let budgets = Budgets {
///     puzzle_budget: Duration::from_secs(10),
///     ..Budgets::default()
/// };
/// assert_eq!(budgets.max_carve_attempts, 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Wall-clock budget for the entire run.
    pub run_budget: Duration,
    /// Wall-clock budget for a single puzzle.
    pub puzzle_budget: Duration,
    /// Resident-set ceiling in bytes.
    pub memory_ceiling: u64,
    /// Sleep inserted between carve attempts.
    pub throttle_delay: Duration,
    /// Maximum removal attempts per puzzle.
    pub max_carve_attempts: usize,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            run_budget: Duration::from_secs(60 * 60),
            puzzle_budget: Duration::from_secs(60),
            memory_ceiling: 1024 * 1024 * 1024,
            throttle_delay: Duration::from_millis(5),
            max_carve_attempts: 300,
        }
    }
}

impl Budgets {
    /// Defaults without the throttle sleep, for tests and benchmarks.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self {
            throttle_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Reason a generation run must stop early.
///
/// A run abort is not an error for records already committed: callers
/// persist what they have and exit cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RunAbort {
    /// The global wall-clock budget elapsed.
    #[display("run wall-clock budget exhausted")]
    TimeBudget,
    /// Resident-set size crossed the configured ceiling.
    #[display("memory ceiling exceeded ({resident} bytes resident)")]
    MemoryCeiling {
        /// Resident-set size observed, in bytes.
        resident: u64,
    },
}

/// Tracks a run's resource budgets.
///
/// Created once per generation run; search loops call [`Governor::check_run`]
/// between attempts and take per-puzzle deadlines from
/// [`Governor::puzzle_deadline`].
#[derive(Debug)]
pub struct Governor {
    budgets: Budgets,
    started: Instant,
}

impl Governor {
    /// Starts governing a run, beginning the run clock now.
    #[must_use]
    pub fn new(budgets: Budgets) -> Self {
        Self {
            budgets,
            started: Instant::now(),
        }
    }

    /// Returns the budgets this governor enforces.
    #[must_use]
    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Returns wall-clock time elapsed since the run started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Checks the run-level ceilings.
    ///
    /// # Errors
    ///
    /// Returns [`RunAbort::TimeBudget`] when the global wall-clock budget
    /// has elapsed, or [`RunAbort::MemoryCeiling`] when resident-set size
    /// exceeds the ceiling. On platforms without a memory probe only the
    /// wall clock is checked.
    pub fn check_run(&self) -> Result<(), RunAbort> {
        if self.elapsed() > self.budgets.run_budget {
            return Err(RunAbort::TimeBudget);
        }
        if let Some(resident) = resident_bytes()
            && resident > self.budgets.memory_ceiling
        {
            return Err(RunAbort::MemoryCeiling { resident });
        }
        Ok(())
    }

    /// Returns the deadline for a puzzle attempt starting now.
    #[must_use]
    pub fn puzzle_deadline(&self) -> Instant {
        Instant::now() + self.budgets.puzzle_budget
    }

    /// Sleeps for the configured inter-attempt delay, if any.
    pub fn throttle(&self) {
        if !self.budgets.throttle_delay.is_zero() {
            thread::sleep(self.budgets.throttle_delay);
        }
    }
}

/// Resident-set size of this process in bytes, if the platform exposes it.
#[cfg(target_os = "linux")]
fn resident_bytes() -> Option<u64> {
    // VmRSS is reported in kB regardless of the kernel page size.
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let vm_rss = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib: u64 = vm_rss.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

#[cfg(not(target_os = "linux"))]
fn resident_bytes() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_governor_passes() {
        let governor = Governor::new(Budgets::unthrottled());
        assert_eq!(governor.check_run(), Ok(()));
    }

    #[test]
    fn test_zero_run_budget_aborts() {
        let governor = Governor::new(Budgets {
            run_budget: Duration::ZERO,
            ..Budgets::unthrottled()
        });
        thread::sleep(Duration::from_millis(2));
        assert_eq!(governor.check_run(), Err(RunAbort::TimeBudget));
    }

    #[test]
    fn test_tiny_memory_ceiling_aborts_when_probed() {
        let governor = Governor::new(Budgets {
            memory_ceiling: 1,
            ..Budgets::unthrottled()
        });
        match governor.check_run() {
            Err(RunAbort::MemoryCeiling { resident }) => assert!(resident > 1),
            // No probe on this platform; only the wall clock applies.
            Ok(()) => assert!(resident_bytes().is_none()),
            Err(RunAbort::TimeBudget) => panic!("run clock cannot have elapsed"),
        }
    }

    #[test]
    fn test_resident_bytes_is_plausible_when_probed() {
        if let Some(resident) = resident_bytes() {
            // A running test binary is well past 1 MiB resident.
            assert!(resident > 1024 * 1024);
        }
    }

    #[test]
    fn test_puzzle_deadline_is_in_the_future() {
        let governor = Governor::new(Budgets::default());
        assert!(governor.puzzle_deadline() > Instant::now());
    }
}
