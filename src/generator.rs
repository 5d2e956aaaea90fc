use crate::CayleyTable;
use crate::replacement_graph::ReplacementGraphState;
use rand::Rng;

/// Parameters for the replacement-graph generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorParams {
    /// Displacement steps one attempt at a row may spend on conflict repair
    /// before the row is started over from its initial state.
    ///
    /// If `None`, uses 8×n². Repair chains are short in practice, so the
    /// budget is only reached on rare unlucky walks.
    pub repair_budget: Option<usize>,
}

impl GeneratorParams {
    fn budget_for(&self, n: usize) -> usize {
        self.repair_budget
            .unwrap_or_else(|| n.saturating_mul(n).saturating_mul(8))
    }
}

/// Generates a random Latin square of order `n` row by row.
///
/// Conflicts are repaired with the sequential replacement-graph method, so no
/// committed row is ever undone. The output is deterministic given the same
/// RNG state and parameters.
///
/// # Panics
/// Panics if:
/// - `n == 0`
/// - `repair_budget` is `Some(0)`
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R, params: &GeneratorParams) -> CayleyTable {
    assert!(n >= 1, "n must be at least 1");
    let budget = params.budget_for(n);
    assert!(budget >= 1, "repair_budget must be positive");

    let mut state = ReplacementGraphState::new(n, budget);
    while !state.is_complete() {
        state.fill_row(rng);
    }
    state.into_table()
}

/// An iterator that produces independent random Latin squares of one order.
///
/// # Example
///
/// ```
/// use latin_quasigroup::{Generator, GeneratorParams};
/// use rand_chacha::ChaCha20Rng;
/// use rand::SeedableRng;
///
/// let rng = ChaCha20Rng::seed_from_u64(0);
/// let generator = Generator::new(7, rng, GeneratorParams::default());
///
/// for table in generator.take(10) {
///     assert!(table.is_latin());
/// }
/// ```
pub struct Generator<R> {
    n: usize,
    rng: R,
    params: GeneratorParams,
}

impl<R: Rng> Generator<R> {
    /// Create a new generator for tables of order `n`.
    ///
    /// # Panics
    /// Panics if:
    /// - `n == 0`
    /// - `repair_budget` is `Some(0)`
    pub fn new(n: usize, rng: R, params: GeneratorParams) -> Self {
        assert!(n >= 1, "n must be at least 1");
        assert!(
            params.budget_for(n) >= 1,
            "repair_budget must be positive"
        );
        Self { n, rng, params }
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = CayleyTable;

    fn next(&mut self) -> Option<Self::Item> {
        Some(generate(self.n, &mut self.rng, &self.params))
    }
}
