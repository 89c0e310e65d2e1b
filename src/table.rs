//! The square operation table [`Table`].

use crate::prelude::*;

/// A square grid mapping each ordered pair of element indices to the result
/// of the operation on that pair.
///
/// Cell `(i, j)` holds the result of applying the operation to the `i`-th
/// element on the left and the `j`-th element on the right. Cells are stored
/// flat in row-major order. Entries are arbitrary values of the element type:
/// a result absent from the element sequence is representable, and is exactly
/// what a closure violation looks like.
///
/// ## Invariants
///
/// The table is always square: the backing vector holds `side²` cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Table<E> {
    /// Row count, equal to the column count.
    side: usize,
    /// All cells, row-major.
    cells: Vec<E>,
}

/// An out-of-range access to a [`Table`] or [`Elems`] slot. These indicate a
/// contract violation by the caller, not a recoverable input condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// An element index at or past the cardinality.
    Elem {
        /// The rejected index.
        index: usize,
        /// Cardinality of the sequence at the time of access.
        card: usize,
    },
    /// A cell coordinate at or past the table side.
    Cell {
        /// The rejected row.
        row: usize,
        /// The rejected column.
        col: usize,
        /// Side of the table at the time of access.
        side: usize,
    },
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Elem { index, card } => {
                write!(f, "element index {index} out of bounds for {card} elements")
            }
            Self::Cell { row, col, side } => {
                write!(f, "cell ({row}, {col}) out of bounds for a {side}\u{d7}{side} table")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Failure to reallocate a container during a resize. Fatal: the containers
/// are left empty but consistent, and must be resized again before use.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllocError {
    /// The requested cell count `side²` overflows `usize`.
    Overflow,
    /// The host refused the backing allocation.
    Host(TryReserveError),
}

impl From<TryReserveError> for AllocError {
    fn from(err: TryReserveError) -> Self {
        Self::Host(err)
    }
}

impl Display for AllocError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Overflow => f.write_str("table cell count overflows usize"),
            Self::Host(err) => write!(f, "allocation failed: {err}"),
        }
    }
}

impl std::error::Error for AllocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Overflow => None,
            Self::Host(err) => Some(err),
        }
    }
}

// -------------------- Basic traits -------------------- //

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            side: 0,
            cells: Vec::new(),
        }
    }
}

/// Writes the table as its list of rows.
impl<E: Debug> Debug for Table<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.rows()).finish()
    }
}

/// Displays the table with cells separated by spaces and rows by newlines.
impl<E: Display> Display for Table<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut rows = self.rows();
        if let Some(row) = rows.next() {
            write_row(f, row)?;
            for row in rows {
                f.write_char('\n')?;
                write_row(f, row)?;
            }
        }
        Ok(())
    }
}

/// Writes one table row, cells separated by spaces.
fn write_row<E: Display>(f: &mut Formatter<'_>, row: &[E]) -> FmtResult {
    let mut iter = row.iter();
    if let Some(fst) = iter.next() {
        write!(f, "{fst}")?;
        for cell in iter {
            write!(f, " {cell}")?;
        }
    }
    Ok(())
}

impl<E> std::ops::Index<(usize, usize)> for Table<E> {
    type Output = E;

    /// ## Panics
    ///
    /// Panics if either coordinate is out of bounds. Use [`Table::get`] for
    /// checked access.
    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(
            row < self.side && col < self.side,
            "cell ({row}, {col}) out of bounds for a {0}\u{d7}{0} table",
            self.side
        );
        &self.cells[row * self.side + col]
    }
}

// -------------------- Access -------------------- //

impl<E> Table<E> {
    /// Row count of the table, equal to its column count.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the table is 0×0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// The cell at `(row, col)`, if in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&E> {
        if row < self.side && col < self.side {
            self.cells.get(row * self.side + col)
        } else {
            None
        }
    }

    /// Mutable access to the cell at `(row, col)`, if in bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut E> {
        if row < self.side && col < self.side {
            self.cells.get_mut(row * self.side + col)
        } else {
            None
        }
    }

    /// Overwrites the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: E) -> Result<(), IndexError> {
        let side = self.side;
        match self.get_mut(row, col) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(IndexError::Cell { row, col, side }),
        }
    }

    /// Iterate over the rows of the table as slices, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[E]> {
        // `chunks` panics on 0; an empty table has no cells to chunk anyway.
        self.cells.chunks(self.side.max(1))
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> std::slice::Iter<E> {
        self.cells.iter()
    }
}

// -------------------- Sizing -------------------- //

impl<E> Table<E> {
    /// Discards all cells, back to a 0×0 table.
    pub(crate) fn clear(&mut self) {
        self.side = 0;
        self.cells.clear();
    }

    /// Reallocates to a `side`×`side` table of default-initialized cells,
    /// losing all previous contents.
    ///
    /// ## Errors
    ///
    /// Fails under host resource exhaustion, or if `side²` overflows `usize`.
    /// The table is left empty on failure.
    pub fn resize(&mut self, side: usize) -> Result<(), AllocError>
    where
        E: Default,
    {
        self.clear();
        let len = side.checked_mul(side).ok_or(AllocError::Overflow)?;
        self.cells.try_reserve_exact(len)?;
        self.cells.resize_with(len, E::default);
        self.side = side;
        Ok(())
    }
}

/// Tests for [`Table`].
#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a `side`×`side` table whose `(i, j)` cell holds `i * side + j`.
    fn iota(side: usize) -> Table<usize> {
        let mut table = Table::default();
        table.resize(side).unwrap();
        for row in 0..side {
            for col in 0..side {
                table.set(row, col, row * side + col).unwrap();
            }
        }
        table
    }

    /// Resizing reports the new dimensions and default-fills every cell.
    #[test]
    fn resize() {
        let mut table = Table::<u32>::default();
        assert!(table.is_empty());

        table.resize(2).unwrap();
        assert_eq!(table.side(), 2);
        assert!(table.cells().all(|&cell| cell == 0));

        table.set(1, 1, 9).unwrap();
        table.resize(3).unwrap();
        assert_eq!(table.side(), 3);
        assert!(
            table.cells().all(|&cell| cell == 0),
            "old contents must be lost"
        );
    }

    /// Out-of-bounds reads and writes are rejected.
    #[test]
    fn bounds() {
        let mut table = iota(2);
        assert_eq!(table.get(1, 1), Some(&3));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 2), None);
        assert_eq!(
            table.set(2, 0, 9),
            Err(IndexError::Cell {
                row: 2,
                col: 0,
                side: 2
            })
        );
    }

    /// Rows come out in order, as slices of the right length.
    #[test]
    fn rows() {
        let table = iota(3);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows, [[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(Table::<u32>::default().rows().count(), 0);
    }

    /// Display layout.
    #[test]
    fn display() {
        assert_eq!(iota(2).to_string(), "0 1\n2 3");
        assert_eq!(Table::<u32>::default().to_string(), "");
    }
}
