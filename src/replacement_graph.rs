//! Sequential replacement-graph construction of Latin squares.
//!
//! Rows are filled left to right with symbols drawn uniformly from those still
//! unused in both the row and the column. When a column has no such symbol,
//! the row is repaired instead of backtracking: a symbol `e` that the column
//! can still take is evicted from its position in the row prefix, that
//! position takes another symbol its column could take at the start of the
//! row, and the displaced duplicate is chased along the prefix until a symbol
//! not yet in the row is placed. `e` is then free for the conflicting column.
//!
//! The choices at each position form the replacement graph: the availability
//! snapshot of every column taken when the row began, with `e` removed so it
//! never lands back in the row. Committed rows are never revisited.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::CayleyTable;
use crate::symbols::SymbolSet;

/// Working state for one table. All sets are allocated once and reused for
/// every row.
pub(crate) struct ReplacementGraphState {
    n: usize,
    /// Symbols not yet placed in each column, including the current row.
    column_available: Vec<SymbolSet>,
    /// `column_available` as it stood when the current row began.
    row_start: Vec<SymbolSet>,
    /// Replacement graph for the current repair episode.
    graph: Vec<SymbolSet>,
    /// Symbols not yet placed in the current row.
    row_available: SymbolSet,
    /// Symbols placed along the current displacement chain.
    path: SymbolSet,
    /// Filled prefix of the current row.
    row: Vec<usize>,
    candidates: Vec<usize>,
    /// Committed rows, row-major.
    cells: Vec<usize>,
    repair_budget: usize,
}

impl ReplacementGraphState {
    /// Create an empty state for a table of order `n`.
    ///
    /// `repair_budget` is the number of displacement steps one attempt at a
    /// row may spend before the row is started over.
    pub fn new(n: usize, repair_budget: usize) -> Self {
        debug_assert!(n >= 1 && repair_budget >= 1);
        Self {
            n,
            column_available: vec![SymbolSet::full(n); n],
            row_start: vec![SymbolSet::full(n); n],
            graph: vec![SymbolSet::empty(n); n],
            row_available: SymbolSet::full(n),
            path: SymbolSet::empty(n),
            row: Vec::with_capacity(n),
            candidates: Vec::with_capacity(n),
            cells: Vec::with_capacity(n * n),
            repair_budget,
        }
    }

    /// Number of committed rows.
    pub fn rows_done(&self) -> usize {
        self.cells.len() / self.n
    }

    pub fn is_complete(&self) -> bool {
        self.rows_done() == self.n
    }

    /// Convert to a table. Only valid once every row is committed.
    pub fn into_table(self) -> CayleyTable {
        debug_assert!(self.is_complete(), "cannot convert a partial table");
        CayleyTable::from_cells(self.n, self.cells)
    }

    /// Build and commit the next row.
    pub fn fill_row<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug_assert!(!self.is_complete());
        self.begin_row();
        let mut steps = 0;
        while self.row.len() < self.n {
            let column = self.row.len();
            self.candidates.clear();
            self.candidates.extend(
                self.column_available[column]
                    .iter()
                    .filter(|&s| self.row_available.contains(s)),
            );
            if let Some(&symbol) = self.candidates.choose(rng) {
                self.place(symbol);
                continue;
            }

            trace!(row = self.rows_done(), column, "column conflict");
            if !self.repair(column, rng, &mut steps) {
                debug!(
                    row = self.rows_done(),
                    steps, "repair budget exhausted, restarting row"
                );
                self.restart_row();
                steps = 0;
            }
        }
        self.commit_row();
    }

    /// Snapshot column availability and reset the row.
    fn begin_row(&mut self) {
        for (start, live) in self.row_start.iter_mut().zip(&self.column_available) {
            start.assign(live);
        }
        self.row.clear();
        self.row_available.fill();
    }

    /// Undo every placement made in the current row.
    fn restart_row(&mut self) {
        for (live, start) in self.column_available.iter_mut().zip(&self.row_start) {
            live.assign(start);
        }
        self.row.clear();
        self.row_available.fill();
    }

    /// Append `symbol` at the next column of the row.
    fn place(&mut self, symbol: usize) {
        let column = self.row.len();
        self.column_available[column].remove(symbol);
        self.row_available.remove(symbol);
        self.row.push(symbol);
    }

    fn commit_row(&mut self) {
        debug_assert_eq!(self.row.len(), self.n);
        debug_assert!(self.row_available.is_empty());
        self.cells.extend_from_slice(&self.row);
    }

    fn position_of(&self, symbol: usize) -> Option<usize> {
        self.row.iter().position(|&s| s == symbol)
    }

    /// Free a symbol for `column` by displacing it along the row prefix.
    ///
    /// Returns false when the step budget runs out or the chain reaches a
    /// position with no choices left; the caller restarts the row.
    fn repair<R: Rng + ?Sized>(&mut self, column: usize, rng: &mut R, steps: &mut usize) -> bool {
        for c in 0..=column {
            self.graph[c].assign(&self.row_start[c]);
        }

        let initial = self.column_available[column].choose(rng);
        for set in &mut self.graph[..=column] {
            set.remove(initial);
        }

        // Anything the column can take that is not in the row would not have
        // conflicted.
        let Some(mut position) = self.position_of(initial) else {
            return true;
        };
        let mut evicted = initial;
        self.path.clear();

        loop {
            if *steps >= self.repair_budget {
                return false;
            }
            *steps += 1;

            self.candidates.clear();
            self.candidates.extend(
                self.graph[position]
                    .iter()
                    .filter(|&s| !self.path.contains(s)),
            );
            if self.candidates.is_empty() {
                self.path.clear();
                self.candidates.extend(self.graph[position].iter());
            }
            let Some(&replacement) = self.candidates.choose(rng) else {
                return false;
            };

            let next = self.position_of(replacement);
            self.row[position] = replacement;
            self.path.insert(replacement);

            if !self.row.contains(&evicted) {
                self.row_available.insert(evicted);
            }
            self.row_available.remove(replacement);
            self.column_available[position].insert(evicted);
            self.column_available[position].remove(replacement);

            match next {
                // The replacement was not in the row yet: the prefix is
                // duplicate-free again.
                None => return true,
                Some(p) => {
                    position = p;
                    evicted = replacement;
                }
            }
        }
    }
}
