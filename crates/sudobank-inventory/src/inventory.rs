//! The in-memory record set.

use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom as _;
use sudobank_core::Tier;

use crate::record::PuzzleRecord;

/// The bank of puzzle records, grouped by tier only at query time.
///
/// Records are unordered as far as consumers are concerned: play-time
/// draws are uniformly random within a tier, and no ordering guarantee
/// exists between puzzles. Records are only ever appended (after a carve
/// fully commits) or dropped wholesale by [`Inventory::clear`]; there is
/// no in-place update.
///
/// # Examples
///
/// ```
/// use sudobank_core::Tier;
/// use sudobank_inventory::Inventory;
///
/// let inventory = Inventory::new();
/// assert_eq!(inventory.count(Tier::Hard), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<PuzzleRecord>,
}

/// Which records [`Inventory::clear`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Remove every record.
    All,
    /// Remove records of one tier, keeping the rest.
    Tier(Tier),
}

/// Error returned when parsing an unknown clear mode.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown clear mode {name:?}")]
pub struct ClearModeParseError {
    /// The unrecognized mode string.
    name: String,
}

impl FromStr for ClearMode {
    type Err = ClearModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::Tier)
            .map_err(|_| ClearModeParseError { name: s.to_owned() })
    }
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory from existing records.
    #[must_use]
    pub fn from_records(records: Vec<PuzzleRecord>) -> Self {
        Self { records }
    }

    /// Returns all records.
    #[must_use]
    pub fn records(&self) -> &[PuzzleRecord] {
        &self.records
    }

    /// Returns the total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the inventory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records of one tier.
    #[must_use]
    pub fn count(&self, tier: Tier) -> usize {
        self.records
            .iter()
            .filter(|record| record.tier() == tier)
            .count()
    }

    /// Appends a fully committed record.
    pub fn push(&mut self, record: PuzzleRecord) {
        self.records.push(record);
    }

    /// Removes the records selected by `mode`.
    ///
    /// Returns the number of records removed.
    pub fn clear(&mut self, mode: ClearMode) -> usize {
        let before = self.records.len();
        match mode {
            ClearMode::All => self.records.clear(),
            ClearMode::Tier(tier) => self.records.retain(|record| record.tier() != tier),
        }
        before - self.records.len()
    }

    /// Draws a record of the given tier uniformly at random.
    ///
    /// Returns `None` when the tier has no records; the caller is expected
    /// to fall back to on-demand generation
    /// ([`sudobank_generator::generate_on_demand`]), accepting that the
    /// fallback does **not** carry the inventory's unique-solution
    /// guarantee.
    pub fn pick_random<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> Option<&PuzzleRecord> {
        let of_tier: Vec<&PuzzleRecord> = self
            .records
            .iter()
            .filter(|record| record.tier() == tier)
            .collect();
        of_tier.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sudobank_core::Position;
    use sudobank_generator::{seeded_rng, synthesize_complete};

    use super::*;

    fn record(tier: Tier, seed: u64) -> PuzzleRecord {
        let solution = synthesize_complete(&mut seeded_rng(seed));
        let mut givens = solution;
        givens.clear(Position::new(0, 0));
        PuzzleRecord::new(tier, givens, solution).unwrap()
    }

    fn sample() -> Inventory {
        Inventory::from_records(vec![
            record(Tier::Hard, 1),
            record(Tier::Hard, 2),
            record(Tier::Extreme, 3),
        ])
    }

    #[test]
    fn test_counts_per_tier() {
        let inventory = sample();
        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.count(Tier::Hard), 2);
        assert_eq!(inventory.count(Tier::Extreme), 1);
        assert_eq!(inventory.count(Tier::Easy), 0);
    }

    #[test]
    fn test_clear_one_tier_keeps_the_rest() {
        let mut inventory = sample();
        assert_eq!(inventory.clear(ClearMode::Tier(Tier::Hard)), 2);
        assert_eq!(inventory.count(Tier::Hard), 0);
        assert_eq!(inventory.count(Tier::Extreme), 1);
    }

    #[test]
    fn test_clear_all() {
        let mut inventory = sample();
        assert_eq!(inventory.clear(ClearMode::All), 3);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_clear_mode_parsing() {
        assert_eq!("all".parse::<ClearMode>().unwrap(), ClearMode::All);
        assert_eq!(
            "hard".parse::<ClearMode>().unwrap(),
            ClearMode::Tier(Tier::Hard)
        );
        assert_eq!(
            "extreme".parse::<ClearMode>().unwrap(),
            ClearMode::Tier(Tier::Extreme)
        );
        assert!("everything".parse::<ClearMode>().is_err());
    }

    #[test]
    fn test_pick_random_draws_matching_tier() {
        let inventory = sample();
        let mut rng = seeded_rng(7);

        let mut seen = HashSet::new();
        for _ in 0..100 {
            let picked = inventory.pick_random(Tier::Hard, &mut rng).unwrap();
            assert_eq!(picked.tier(), Tier::Hard);
            seen.insert(*picked.givens());
        }
        // Both hard records should show up across 100 uniform draws.
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_pick_random_empty_tier_is_none() {
        let inventory = sample();
        let mut rng = seeded_rng(7);
        assert!(inventory.pick_random(Tier::Medium, &mut rng).is_none());
    }
}
