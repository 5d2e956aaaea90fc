//! Flat text format for Cayley tables.
//!
//! The first value is the order `n`, followed by `n * n` entries in row-major
//! order, separated by any whitespace. Anything after the last entry is
//! ignored, which leaves room for a trailing summary.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::subquasigroup::SubquasigroupReport;
use crate::{CayleyTable, Error, Result};

/// Parses a table from text.
pub fn parse_table(text: &str) -> Result<CayleyTable> {
    let mut tokens = text.split_whitespace().enumerate();
    let mut next_value = |found: usize, expected: usize| -> Result<usize> {
        let (position, token) = tokens.next().ok_or(Error::Truncated { expected, found })?;
        token.parse::<usize>().map_err(|_| Error::Parse {
            position,
            token: token.to_string(),
        })
    };

    let n = next_value(0, 1)?;
    let expected = n.saturating_mul(n).saturating_add(1);
    let mut rows = Vec::new();
    for r in 0..n {
        let mut row = Vec::new();
        for c in 0..n {
            row.push(next_value(1 + r * n + c, expected)?);
        }
        rows.push(row);
    }
    CayleyTable::from_rows(&rows)
}

/// Reads a table from a file.
pub fn read_table(path: impl AsRef<Path>) -> Result<CayleyTable> {
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}

/// Reads a table from any reader, such as standard input, until end of input.
pub fn read_table_from<R: Read>(mut reader: R) -> Result<CayleyTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_table(&text)
}

/// Writes the order line followed by one line per row.
pub fn write_table<W: Write>(writer: &mut W, table: &CayleyTable) -> Result<()> {
    writeln!(writer, "{}", table.n())?;
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Writes the table followed by a summary of both detections.
pub fn write_report<W: Write>(
    writer: &mut W,
    table: &CayleyTable,
    report: &SubquasigroupReport,
) -> Result<()> {
    write_table(writer, table)?;
    writeln!(writer)?;
    writeln!(writer, "Results:")?;
    writeln!(writer, "{report}")?;
    Ok(())
}
