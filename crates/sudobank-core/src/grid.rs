//! The 9×9 grid and its constraint predicate.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::Position;

/// A 9×9 sudoku grid.
///
/// Each cell holds a digit 1-9, or 0 for empty. A *complete* grid has no
/// empty cells; a complete grid is *solved* when every row, column, and 3×3
/// box contains each of 1-9 exactly once. A *partial* grid only needs to be
/// free of duplicate non-zero digits within any row, column, or box (see
/// [`Grid::has_conflicts`]).
///
/// Grids are plain value types: copying is cheap and every search operates
/// on its own copy, so a caller's grid is never mutated behind its back.
///
/// # String format
///
/// Grids convert to and from an 81-character row-major string, with `.`
/// for empty cells. Parsing also accepts `0` and `_` for empty cells and
/// ignores whitespace, so fixtures can be laid out as 9 rows.
///
/// # Examples
///
/// ```
/// use sudobank_core::{Grid, Position};
///
/// let grid: Grid = "
///     53..7....
///     6..195...
///     .98....6.
///     8...6...3
///     4..8.3..1
///     7...2...6
///     .6....28.
///     ...419..5
///     ....8..79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)), 5);
/// assert_eq!(grid.blank_count(), 51);
/// assert!(!grid.has_conflicts());
/// # Ok::<(), sudobank_core::GridParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u8; 81],
}

/// Errors that can occur when building a grid from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input did not contain exactly 81 cells.
    #[display("expected 81 cells, got {len}")]
    WrongLength {
        /// Number of cells found.
        len: usize,
    },
    /// The input contained a character that is not a digit or blank marker.
    #[display("unexpected character {ch:?} in grid string")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
    },
    /// A cell value was outside the range 0-9.
    #[display("cell {index} holds {value}, expected 0-9")]
    ValueOutOfRange {
        /// Flat row-major cell index.
        index: usize,
        /// The offending value.
        value: u8,
    },
}

impl Grid {
    /// The grid with all 81 cells empty.
    pub const EMPTY: Self = Self { cells: [0; 81] };

    /// Builds a grid from a flat row-major cell array.
    ///
    /// # Errors
    ///
    /// Returns [`GridParseError::ValueOutOfRange`] if any cell is greater
    /// than 9.
    pub fn from_cells(cells: [u8; 81]) -> Result<Self, GridParseError> {
        if let Some((index, &value)) = cells.iter().enumerate().find(|&(_, &value)| value > 9) {
            return Err(GridParseError::ValueOutOfRange { index, value });
        }
        Ok(Self { cells })
    }

    /// Returns the flat row-major cell array.
    #[must_use]
    pub const fn cells(&self) -> &[u8; 81] {
        &self.cells
    }

    /// Returns the digit at a position, 0 if the cell is empty.
    #[must_use]
    pub const fn get(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    /// Places a digit at a position.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9. Use [`Grid::clear`] to
    /// empty a cell.
    pub const fn set(&mut self, pos: Position, digit: u8) {
        assert!(1 <= digit && digit <= 9, "digit must be 1-9");
        self.cells[pos.index()] = digit;
    }

    /// Empties the cell at a position.
    pub const fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = 0;
    }

    /// Returns `true` if placing `digit` at `pos` would not duplicate it
    /// within the position's row, column, or 3×3 box.
    ///
    /// This is a pure predicate over the current grid contents (27 cell
    /// comparisons); it does not modify the grid, and it does not exempt
    /// the cell at `pos` itself.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    #[must_use]
    pub fn is_legal(&self, pos: Position, digit: u8) -> bool {
        assert!((1..=9).contains(&digit), "digit must be 1-9");

        for i in 0..9 {
            if self.get(Position::new(pos.row(), i)) == digit
                || self.get(Position::new(i, pos.col())) == digit
            {
                return false;
            }
        }

        let origin = pos.box_origin();
        for dr in 0..3 {
            for dc in 0..3 {
                if self.get(Position::new(origin.row() + dr, origin.col() + dc)) == digit {
                    return false;
                }
            }
        }

        true
    }

    /// Returns `true` if any row, column, or box contains a duplicate
    /// non-zero digit.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        houses().any(|house| {
            let mut seen = [false; 10];
            house.into_iter().any(|pos| {
                let digit = self.get(pos) as usize;
                digit != 0 && std::mem::replace(&mut seen[digit], true)
            })
        })
    }

    /// Returns `true` if no cell is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// Returns `true` if the grid is complete and every row, column, and
    /// box is a permutation of 1-9.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && !self.has_conflicts()
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 0).count()
    }

    /// Returns an iterator over the positions of all empty cells in
    /// row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&pos| self.get(pos) == 0)
    }

    /// Returns an iterator over the positions of all filled cells in
    /// row-major order.
    pub fn filled_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&pos| self.get(pos) != 0)
    }

    /// Returns `true` if `self` agrees with `other` on every non-zero cell
    /// of `self`.
    ///
    /// This is the "completion" relation between a puzzle's givens and its
    /// solution.
    #[must_use]
    pub fn is_completed_by(&self, other: &Self) -> bool {
        self.cells
            .iter()
            .zip(&other.cells)
            .all(|(&given, &full)| given == 0 || given == full)
    }
}

fn houses() -> impl Iterator<Item = [Position; 9]> {
    let rows = (0..9).map(|row| std::array::from_fn(|i| Position::new(row, i as u8)));
    let cols = (0..9).map(|col| std::array::from_fn(|i| Position::new(i as u8, col)));
    let boxes = (0..9).map(|b| {
        let origin = Position::new(b / 3 * 3, b % 3 * 3);
        std::array::from_fn(|i| {
            let i = i as u8;
            Position::new(origin.row() + i / 3, origin.col() + i % 3)
        })
    });
    rows.chain(cols).chain(boxes)
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            if cell == 0 {
                f.write_str(".")?;
            } else {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [0; 81];
        let mut len = 0;
        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let value = match ch {
                '.' | '_' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => return Err(GridParseError::UnexpectedChar { ch }),
            };
            if len < 81 {
                cells[len] = value;
            }
            len += 1;
        }
        if len != 81 {
            return Err(GridParseError::WrongLength { len });
        }
        Ok(Self { cells })
    }
}
