//! The persisted inventory format.
//!
//! The inventory is persisted as a TypeScript data module (`puzzles.ts`)
//! that the presentation layer imports directly — the file *is* the data,
//! there is no runtime parsing step on the consumer side. The contract:
//!
//! - one record per line: `["tier", [81 ints], [81 ints]],`
//! - tier names lower-case, arrays row-major (`index = row * 9 + col`)
//! - givens use 0 for blanks; solutions are all 1-9
//!
//! Reading back is lenient by design: a missing file, a record with the
//! wrong arity, an out-of-range digit, or an inconsistent puzzle is
//! dropped (or the whole file treated as absent) rather than failing the
//! run — generation then proceeds as if those records never existed.

use std::io;
use std::path::Path;

use sudobank_core::Grid;

use crate::inventory::Inventory;
use crate::record::PuzzleRecord;

const HEADER: &str = "\
// Pre-generated puzzles for hard and extreme difficulties
// Format: [difficulty, puzzle, solution]
// Puzzle and solution are flattened arrays of 81 numbers (0 for empty cells)

export const preGeneratedPuzzles = [
";

const FOOTER: &str = "\
];

// Helper function to convert flattened array back to 2D grid
export const arrayToGrid = (arr: number[]): number[][] => {
  const grid = [];
  for (let i = 0; i < 9; i++) {
    grid.push(arr.slice(i * 9, (i + 1) * 9));
  }
  return grid;
};

// Helper function to convert 2D grid to flattened array
export const gridToArray = (grid: number[][]): number[] => {
  return grid.flat();
};
";

/// Renders an inventory as the persisted TypeScript module.
#[must_use]
pub fn render(inventory: &Inventory) -> String {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + inventory.len() * 512);
    out.push_str(HEADER);
    for record in inventory.records() {
        out.push_str("  [\"");
        out.push_str(record.tier().as_str());
        out.push_str("\", ");
        push_cells(&mut out, record.givens());
        out.push_str(", ");
        push_cells(&mut out, record.solution());
        out.push_str("],\n");
    }
    out.push_str(FOOTER);
    out
}

fn push_cells(out: &mut String, grid: &Grid) {
    out.push('[');
    for (i, cell) in grid.cells().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push((b'0' + cell) as char);
    }
    out.push(']');
}

/// Extracts every well-formed record from persisted module text.
///
/// Lines that do not parse as a record (the module header, helpers, or
/// corrupted entries) are skipped silently; records that parse but fail
/// the [`PuzzleRecord`] consistency check are dropped with a warning.
#[must_use]
pub fn parse(content: &str) -> Inventory {
    let mut records = Vec::new();
    for line in content.lines() {
        match parse_line(line) {
            Some(Ok(record)) => records.push(record),
            Some(Err(err)) => log::warn!("dropping inconsistent persisted record: {err}"),
            None => {}
        }
    }
    Inventory::from_records(records)
}

/// Parses one `["tier", [...], [...]],` line. `None` means the line is not
/// record-shaped at all; `Some(Err)` means it is, but fails validation.
fn parse_line(line: &str) -> Option<Result<PuzzleRecord, crate::record::RecordError>> {
    let line = line.trim().trim_end_matches(',');
    let rest = line.strip_prefix("[\"")?;
    let (tier, rest) = rest.split_once('"')?;
    let tier = tier.parse().ok()?;
    let rest = rest.strip_prefix(", ")?;
    let (givens, rest) = split_array(rest)?;
    let rest = rest.strip_prefix(", ")?;
    let (solution, rest) = split_array(rest)?;
    if rest != "]" {
        return None;
    }
    Some(PuzzleRecord::new(tier, givens, solution))
}

fn split_array(s: &str) -> Option<(Grid, &str)> {
    let body = s.strip_prefix('[')?;
    let (body, rest) = body.split_once(']')?;
    let mut cells = [0_u8; 81];
    let mut len = 0;
    for part in body.split(',') {
        if len == 81 {
            return None;
        }
        cells[len] = part.trim().parse().ok()?;
        len += 1;
    }
    if len != 81 {
        return None;
    }
    Some((Grid::from_cells(cells).ok()?, rest))
}

/// Loads the persisted inventory from disk.
///
/// A missing or unreadable file, or one containing no recognizable
/// records, yields an empty inventory — never an error (the generator
/// then rebuilds from scratch).
#[must_use]
pub fn load(path: &Path) -> Inventory {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let inventory = parse(&content);
            log::info!(
                "loaded {} persisted records from {}",
                inventory.len(),
                path.display()
            );
            inventory
        }
        Err(err) => {
            log::info!(
                "no usable inventory at {} ({err}), starting empty",
                path.display()
            );
            Inventory::new()
        }
    }
}

/// Writes the inventory back to disk in the persisted format.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be written.
pub fn save(path: &Path, inventory: &Inventory) -> io::Result<()> {
    std::fs::write(path, render(inventory))
}
