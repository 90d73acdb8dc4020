//! Board position types.

use std::fmt::{self, Display};

/// A cell coordinate on the 9×9 board.
///
/// Rows and columns are both in the range 0-8, with (0, 0) at the top-left
/// corner. Positions map to flat indices in row-major order
/// (`index = row * 9 + col`), which is also the order used by the persisted
/// puzzle format.
///
/// # Examples
///
/// ```
/// use sudobank_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.index(), 43);
/// assert_eq!(Position::from_index(43), pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from row and column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 9 or greater.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self { row, col }
    }

    /// Creates a position from a flat row-major index (0-80).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81, "index out of range");
        Self {
            row: index / 9,
            col: index % 9,
        }
    }

    /// Returns the row coordinate (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column coordinate (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the flat row-major index (`row * 9 + col`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// Returns the top-left corner of the 3×3 box containing this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use sudobank_core::Position;
    ///
    /// assert_eq!(Position::new(4, 7).box_origin(), Position::new(3, 6));
    /// ```
    #[must_use]
    pub const fn box_origin(self) -> Self {
        Self {
            row: self.row - self.row % 3,
            col: self.col - self.col % 3,
        }
    }

    /// Returns an iterator over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self::from_index)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}
