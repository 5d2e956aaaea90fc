use std::fmt;

use crate::{Error, Result};

/// A Cayley table of order `n`.
///
/// An `n x n` array with entries in `{0..n-1}`; `get(a, b)` is the product of
/// `a` and `b`. Construction checks the shape and the entry range only. The
/// Latin property is checked separately by [`CayleyTable::is_latin`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CayleyTable {
    n: usize,
    cells: Vec<usize>,
}

impl CayleyTable {
    /// Creates the cyclic table of order `n`: `T[r][c] = (r + c) mod n`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn new_cyclic(n: usize) -> Self {
        assert!(n >= 1, "order must be at least 1");
        let cells = (0..n)
            .flat_map(|r| (0..n).map(move |c| (r + c) % n))
            .collect();
        Self { n, cells }
    }

    /// Builds a table from its rows.
    ///
    /// Fails if there are no rows, if any row length differs from the number
    /// of rows, or if an entry is not below the order.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyTable);
        }
        let mut cells = Vec::with_capacity(n * n);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::NotSquare {
                    row: r,
                    len: row.len(),
                    order: n,
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if value >= n {
                    return Err(Error::EntryOutOfRange {
                        row: r,
                        column: c,
                        value,
                        order: n,
                    });
                }
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { n, cells })
    }

    /// Builds a table from a row-major cell vector of length `n * n`.
    pub(crate) fn from_cells(n: usize, cells: Vec<usize>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        debug_assert!(cells.iter().all(|&v| v < n));
        Self { n, cells }
    }

    /// Returns the order of the table.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the value at position `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r >= n` or `c >= n`.
    pub fn get(&self, r: usize, c: usize) -> usize {
        assert!(r < self.n && c < self.n, "index out of bounds");
        self.cells[r * self.n + c]
    }

    /// Returns row `r` as a slice.
    pub fn row(&self, r: usize) -> &[usize] {
        &self.cells[r * self.n..(r + 1) * self.n]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks_exact(self.n)
    }

    /// Returns the cells as a flat slice in row-major order.
    ///
    /// The cell at position (r, c) is at index `r * n + c`.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Returns true if every row and every column is a permutation of `0..n`.
    pub fn is_latin(&self) -> bool {
        probe_latin(self.n, |r, c| self.cells[r * self.n + c])
    }
}

/// Returns true if `rows` is a square array forming a Latin square.
///
/// Any row whose length differs from the number of rows makes the check fail,
/// as does an empty array.
pub fn is_latin_square<R: AsRef<[usize]>>(rows: &[R]) -> bool {
    let n = rows.len();
    if n == 0 || rows.iter().any(|row| row.as_ref().len() != n) {
        return false;
    }
    probe_latin(n, |r, c| rows[r].as_ref()[c])
}

/// Checks row `i` and column `i` together for every `i`, reusing two presence
/// arrays. Stops at the first repeated or out-of-range value.
fn probe_latin(n: usize, get: impl Fn(usize, usize) -> usize) -> bool {
    let mut row_seen = vec![false; n];
    let mut col_seen = vec![false; n];
    for i in 0..n {
        row_seen.fill(false);
        col_seen.fill(false);
        for j in 0..n {
            let row_value = get(i, j);
            let col_value = get(j, i);
            if row_value >= n || col_value >= n || row_seen[row_value] || col_seen[col_value] {
                return false;
            }
            row_seen[row_value] = true;
            col_seen[col_value] = true;
        }
    }
    true
}

/// Renders the table with a header row and a row label column.
impl fmt::Display for CayleyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.n - 1).to_string().len();
        write!(f, "{:>width$} |", "")?;
        for c in 0..self.n {
            write!(f, " {c:>width$}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}-+{}",
            "-".repeat(width),
            "-".repeat((width + 1) * self.n)
        )?;
        for (r, row) in self.rows().enumerate() {
            write!(f, "{r:>width$} |")?;
            for v in row {
                write!(f, " {v:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_is_latin() {
        for n in 1..=10 {
            let table = CayleyTable::new_cyclic(n);
            assert!(table.is_latin(), "cyclic table of order {} should be Latin", n);
        }
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = CayleyTable::from_rows(&[vec![0usize, 1], vec![1]]).unwrap_err();
        assert!(matches!(
            err,
            Error::NotSquare {
                row: 1,
                len: 1,
                order: 2
            }
        ));
    }

    #[test]
    fn from_rows_rejects_large_entries() {
        let err = CayleyTable::from_rows(&[[0usize, 2], [1, 0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::EntryOutOfRange {
                row: 0,
                column: 1,
                value: 2,
                order: 2
            }
        ));
    }

    #[test]
    fn from_rows_rejects_empty() {
        let rows: Vec<Vec<usize>> = Vec::new();
        assert!(matches!(
            CayleyTable::from_rows(&rows),
            Err(Error::EmptyTable)
        ));
    }

    #[test]
    fn from_rows_accepts_non_latin() {
        let table = CayleyTable::from_rows(&[[0usize, 0], [0, 0]]).unwrap();
        assert_eq!(table.n(), 2);
        assert!(!table.is_latin());
    }

    #[test]
    fn validator_rejects_repeated_column_value() {
        // Rows are permutations, columns are not.
        let rows: [[usize; 3]; 3] = [[0, 1, 2], [0, 1, 2], [1, 2, 0]];
        assert!(!is_latin_square(&rows));
    }

    #[test]
    fn validator_rejects_repeated_row_value() {
        let rows: [[usize; 3]; 3] = [[0, 0, 2], [1, 2, 0], [2, 1, 1]];
        assert!(!is_latin_square(&rows));
    }

    #[test]
    fn validator_rejects_out_of_range_and_ragged() {
        assert!(!is_latin_square(&[[0usize, 3, 1], [1, 0, 2], [2, 1, 0]]));
        assert!(!is_latin_square(&[vec![0usize, 1], vec![1, 0, 2]]));
        let empty: [[usize; 0]; 0] = [];
        assert!(!is_latin_square(&empty));
    }

    #[test]
    fn validator_agrees_with_table_check() {
        let rows: [[usize; 3]; 3] = [[1, 0, 2], [2, 1, 0], [0, 2, 1]];
        let table = CayleyTable::from_rows(&rows).unwrap();
        assert!(is_latin_square(&rows));
        assert!(table.is_latin());
    }

    #[test]
    fn display_renders_header_and_rows() {
        let table = CayleyTable::new_cyclic(3);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  | 0 1 2");
        assert_eq!(lines[1], "--+------");
        assert_eq!(lines[2], "0 | 0 1 2");
        assert_eq!(lines[4], "2 | 2 0 1");
    }

    #[test]
    fn rows_iterate_in_order() {
        let table = CayleyTable::new_cyclic(4);
        let rows: Vec<&[usize]> = table.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], &[1, 2, 3, 0]);
        assert_eq!(table.row(3), &[3, 0, 1, 2]);
    }
}
