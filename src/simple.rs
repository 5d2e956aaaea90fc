//! Arithmetic table constructions: cyclic groups and affine quasigroups.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::symbols::SymbolSet;
use crate::{CayleyTable, Error, Result};

/// Greatest common divisor by Euclid's algorithm.
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        a %= b;
        std::mem::swap(&mut a, &mut b);
    }
    a
}

/// The cyclic group of order `n`: `x * y = (x + y) mod n`.
///
/// # Panics
/// Panics if `n == 0`.
pub fn cyclic(n: usize) -> CayleyTable {
    CayleyTable::new_cyclic(n)
}

/// Coefficients of `x * y = (alpha * x + beta * f(y) + constant) mod n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineParams {
    pub alpha: usize,
    pub beta: usize,
    pub constant: usize,
}

impl Default for AffineParams {
    fn default() -> Self {
        Self {
            alpha: 1,
            beta: 1,
            constant: 0,
        }
    }
}

impl AffineParams {
    /// Checks that `alpha` and `beta` are units modulo `n` and that the
    /// constant is a residue.
    pub fn validate(&self, n: usize) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if gcd(value, n) != 1 {
                return Err(Error::NotCoprime {
                    name,
                    value,
                    order: n,
                });
            }
        }
        if self.constant >= n {
            return Err(Error::ConstantOutOfRange {
                value: self.constant,
                order: n,
            });
        }
        Ok(())
    }
}

/// An affine quasigroup together with the permutation `f` it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffineQuasigroup {
    pub table: CayleyTable,
    pub permutation: Vec<usize>,
}

/// A uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);
    permutation
}

/// Builds an affine quasigroup of order `n` with a random permutation `f`.
pub fn affine<R: Rng + ?Sized>(
    n: usize,
    params: AffineParams,
    rng: &mut R,
) -> Result<AffineQuasigroup> {
    params.validate(n)?;
    let permutation = random_permutation(n, rng);
    affine_with_permutation(n, params, permutation)
}

/// Builds an affine quasigroup of order `n` from an explicit permutation.
pub fn affine_with_permutation(
    n: usize,
    params: AffineParams,
    permutation: Vec<usize>,
) -> Result<AffineQuasigroup> {
    params.validate(n)?;
    let mut seen = SymbolSet::empty(n);
    if permutation.len() != n || !permutation.iter().all(|&v| v < n && seen.insert(v)) {
        return Err(Error::InvalidPermutation {
            len: permutation.len(),
            order: n,
        });
    }

    let (alpha, beta, constant) = (params.alpha % n, params.beta % n, params.constant);
    let cells = (0..n)
        .flat_map(|x| {
            let permutation = &permutation;
            (0..n).map(move |y| (alpha * x + beta * permutation[y] + constant) % n)
        })
        .collect();
    Ok(AffineQuasigroup {
        table: CayleyTable::from_cells(n, cells),
        permutation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 5), 1);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(gcd(9, 0), 9);
    }

    #[test]
    fn affine_tables_are_latin() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for (n, alpha, beta, constant) in [
            (1, 1, 1, 0),
            (2, 1, 1, 1),
            (5, 3, 2, 4),
            (8, 3, 5, 7),
            (10, 3, 7, 4),
            (11, 6, 10, 9),
        ] {
            let params = AffineParams {
                alpha,
                beta,
                constant,
            };
            let q = affine(n, params, &mut rng).unwrap();
            assert!(q.table.is_latin(), "order {}", n);
        }
    }

    #[test]
    fn affine_with_identity_permutation_matches_formula() {
        let params = AffineParams {
            alpha: 2,
            beta: 1,
            constant: 3,
        };
        let q = affine_with_permutation(5, params, (0..5).collect()).unwrap();
        for x in 0..5 {
            for y in 0..5 {
                assert_eq!(q.table.get(x, y), (2 * x + y + 3) % 5);
            }
        }
        assert!(q.table.is_latin());
    }

    #[test]
    fn affine_rejects_non_unit_coefficients() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = affine(
            6,
            AffineParams {
                alpha: 2,
                ..Default::default()
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::NotCoprime {
                name: "alpha",
                value: 2,
                order: 6
            }
        ));

        let err = affine(
            6,
            AffineParams {
                beta: 3,
                ..Default::default()
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotCoprime { name: "beta", .. }));
    }

    #[test]
    fn affine_rejects_large_constant() {
        let params = AffineParams {
            constant: 5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(5),
            Err(Error::ConstantOutOfRange { value: 5, order: 5 })
        ));
    }

    #[test]
    fn affine_rejects_bad_permutation() {
        let params = AffineParams::default();
        for permutation in [vec![0, 1, 1], vec![0, 1], vec![0, 1, 3]] {
            assert!(matches!(
                affine_with_permutation(3, params, permutation),
                Err(Error::InvalidPermutation { order: 3, .. })
            ));
        }
    }

    #[test]
    fn random_permutation_is_permutation() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut p = random_permutation(16, &mut rng);
        p.sort_unstable();
        assert_eq!(p, (0..16).collect::<Vec<_>>());
    }
}
