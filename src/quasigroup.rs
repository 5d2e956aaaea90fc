use crate::subquasigroup::{SubquasigroupDetector, SubquasigroupKind, SubquasigroupReport};
use crate::{CayleyTable, Error, Result};

/// A finite quasigroup given by its Cayley table.
///
/// The table is taken as is: no Latin check happens here. Use
/// [`CayleyTable::is_latin`] first when the table comes from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quasigroup {
    table: CayleyTable,
}

impl Quasigroup {
    pub fn new(table: CayleyTable) -> Self {
        Self { table }
    }

    /// Number of elements.
    pub fn order(&self) -> usize {
        self.table.n()
    }

    pub fn table(&self) -> &CayleyTable {
        &self.table
    }

    /// Returns `a * b`.
    ///
    /// Fails with [`Error::OutOfRange`] when either operand is not below the
    /// order.
    pub fn apply(&self, a: usize, b: usize) -> Result<usize> {
        let order = self.order();
        if a >= order || b >= order {
            return Err(Error::OutOfRange { a, b, order });
        }
        Ok(self.product(a, b))
    }

    /// Unchecked product for operands the caller already knows are in range.
    #[inline]
    pub(crate) fn product(&self, a: usize, b: usize) -> usize {
        self.table.cells()[a * self.order() + b]
    }

    /// Returns true if a closed subset of the given kind exists.
    pub fn has_subquasigroups(&self, kind: SubquasigroupKind) -> bool {
        SubquasigroupDetector::new(self).has_subquasigroups(kind)
    }

    /// Runs both detections.
    pub fn report(&self) -> SubquasigroupReport {
        SubquasigroupDetector::new(self).report()
    }
}

impl From<CayleyTable> for Quasigroup {
    fn from(table: CayleyTable) -> Self {
        Self::new(table)
    }
}
