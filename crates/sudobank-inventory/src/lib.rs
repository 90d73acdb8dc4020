//! Puzzle inventory management for sudobank.
//!
//! The inventory is the bank of pre-validated, uniquely-solvable puzzle
//! records the presentation layer draws from at play time:
//!
//! - [`record`]: the immutable `(tier, givens, solution)` triple
//! - [`wire`]: the persisted format — a TypeScript data module consumed
//!   verbatim by the presentation layer, no runtime parsing step
//! - [`inventory`]: the in-memory record set with per-tier counting,
//!   clearing, and uniform random draws
//! - [`orchestrator`]: the batch run that tops the bank up to its
//!   per-tier targets
//!
//! # Examples
//!
//! ```
//! use sudobank_core::Tier;
//! use sudobank_generator::{Budgets, seeded_rng};
//! use sudobank_inventory::{Inventory, Targets, replenish};
//!
//! let mut inventory = Inventory::new();
//! let targets = Targets {
//!     hard: 1,
//!     extreme: 0,
//!     ..Targets::empty()
//! };
//!
//! let mut rng = seeded_rng(9);
//! let report = replenish(&mut inventory, &targets, &Budgets::unthrottled(), &mut rng);
//! assert_eq!(report.generated, 1);
//! assert_eq!(inventory.count(Tier::Hard), 1);
//! ```

pub mod inventory;
pub mod orchestrator;
pub mod record;
pub mod wire;

pub use self::{
    inventory::{ClearMode, ClearModeParseError, Inventory},
    orchestrator::{RunReport, Targets, replenish},
    record::{PuzzleRecord, RecordError},
};
