#![doc = include_str!("../README.md")]

mod error;
mod generator;
pub mod io;
mod quasigroup;
mod replacement_graph;
pub mod simple;
mod square;
mod subquasigroup;
mod symbols;
#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Error, Result};
pub use generator::{Generator, GeneratorParams, generate};
pub use quasigroup::Quasigroup;
pub use square::{CayleyTable, is_latin_square};
pub use subquasigroup::{SubquasigroupDetector, SubquasigroupKind, SubquasigroupReport};
