//! Core data structures for the sudobank puzzle pipeline.
//!
//! This crate provides the value types shared by puzzle generation and
//! inventory management:
//!
//! - [`grid`]: the 9×9 grid and its constraint predicate
//! - [`position`]: row/column board coordinates
//! - [`tier`]: named difficulty levels and their blank-cell targets
//!
//! # Examples
//!
//! ```
//! use sudobank_core::{Grid, Position};
//!
//! let mut grid = Grid::EMPTY;
//! grid.set(Position::new(0, 0), 5);
//!
//! // 5 now conflicts along row 0, column 0, and the top-left box.
//! assert!(!grid.is_legal(Position::new(0, 8), 5));
//! assert!(!grid.is_legal(Position::new(8, 0), 5));
//! assert!(!grid.is_legal(Position::new(2, 2), 5));
//! assert!(grid.is_legal(Position::new(8, 8), 5));
//! ```

pub mod grid;
pub mod position;
pub mod tier;

pub use self::{
    grid::{Grid, GridParseError},
    position::Position,
    tier::{Tier, TierParseError},
};
