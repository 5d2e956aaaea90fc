use rand::Rng;

/// A subset of the symbols `0..n` backed by a presence array.
///
/// Iteration is in ascending symbol order, so random picks are reproducible
/// for a seeded RNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymbolSet {
    present: Vec<bool>,
    len: usize,
}

impl SymbolSet {
    pub fn empty(n: usize) -> Self {
        Self {
            present: vec![false; n],
            len: 0,
        }
    }

    pub fn full(n: usize) -> Self {
        Self {
            present: vec![true; n],
            len: n,
        }
    }

    /// Resets to the full set without reallocating.
    pub fn fill(&mut self) {
        self.present.fill(true);
        self.len = self.present.len();
    }

    /// Copies `other` into `self`. Both sets must range over the same `n`.
    pub fn assign(&mut self, other: &SymbolSet) {
        self.present.copy_from_slice(&other.present);
        self.len = other.len;
    }

    pub fn clear(&mut self) {
        self.present.fill(false);
        self.len = 0;
    }

    #[inline]
    pub fn contains(&self, s: usize) -> bool {
        self.present[s]
    }

    pub fn insert(&mut self, s: usize) -> bool {
        if self.present[s] {
            return false;
        }
        self.present[s] = true;
        self.len += 1;
        true
    }

    pub fn remove(&mut self, s: usize) -> bool {
        if !self.present[s] {
            return false;
        }
        self.present[s] = false;
        self.len -= 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter_map(|(s, &p)| p.then_some(s))
    }

    /// Picks a member uniformly at random.
    ///
    /// # Panics
    /// Panics if the set is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        assert!(!self.is_empty(), "cannot choose from an empty symbol set");
        let k = rng.random_range(0..self.len());
        self.iter()
            .nth(k)
            .expect("symbol set length out of sync with its members")
    }
}
