use std::io;

/// Errors produced while building, reading or operating on Cayley tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `apply` was called with an operand outside `0..order`.
    #[error("operands ({a}, {b}) out of range for quasigroup of order {order}")]
    OutOfRange { a: usize, b: usize, order: usize },

    #[error("table has no rows")]
    EmptyTable,

    #[error("row {row} has {len} entries, expected {order}")]
    NotSquare { row: usize, len: usize, order: usize },

    #[error("entry {value} at ({row}, {column}) is not below the order {order}")]
    EntryOutOfRange {
        row: usize,
        column: usize,
        value: usize,
        order: usize,
    },

    #[error("{name} = {value} is not coprime to the order {order}")]
    NotCoprime {
        name: &'static str,
        value: usize,
        order: usize,
    },

    #[error("constant {value} must be below the order {order}")]
    ConstantOutOfRange { value: usize, order: usize },

    #[error("permutation of length {len} is not a permutation of 0..{order}")]
    InvalidPermutation { len: usize, order: usize },

    #[error("token {position} ({token:?}) is not a non-negative integer")]
    Parse { position: usize, token: String },

    #[error("expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
