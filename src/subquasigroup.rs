//! Detection of closed subsets of a quasigroup.
//!
//! Candidate subsets are generated from squaring orbits: starting at `x`, the
//! walk `x, x*x, (x*x)*(x*x), ...` runs until an element repeats. Each distinct
//! orbit is closed under the full operation by fixed-point iteration, and the
//! result is classified by size.
//!
//! Seeding from orbits is a heuristic. An idempotent quasigroup (`x*x = x` for
//! all `x`) only produces singleton orbits, so its subquasigroups are never
//! found.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use tracing::trace;

use crate::Quasigroup;

/// Which kind of subquasigroup to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubquasigroupKind {
    /// Fewer elements than the whole quasigroup.
    ///
    /// The closure of a seed is abandoned as soon as it grows past half the
    /// order. This holds for closed subsets of Latin squares but not for
    /// arbitrary tables.
    Proper,
    /// More than one element.
    NonTrivial,
}

impl SubquasigroupKind {
    fn policy(self, order: usize) -> ClosurePolicy {
        match self {
            SubquasigroupKind::Proper => ClosurePolicy {
                early_exit_above: Some(order / 2),
            },
            SubquasigroupKind::NonTrivial => ClosurePolicy {
                early_exit_above: None,
            },
        }
    }
}

/// Controls when a closure computation gives up.
#[derive(Debug, Clone, Copy)]
struct ClosurePolicy {
    early_exit_above: Option<usize>,
}

impl ClosurePolicy {
    fn exceeded(&self, size: usize) -> bool {
        self.early_exit_above.is_some_and(|bound| size > bound)
    }
}

/// A closed set is a witness when it is neither a single element nor the
/// whole quasigroup.
fn qualifies(size: usize, order: usize) -> bool {
    size > 1 && size < order
}

/// A growing set of elements with O(1) membership.
struct ClosedSet {
    members: Vec<usize>,
    present: Vec<bool>,
}

impl ClosedSet {
    fn with_seed(order: usize, seed: &BTreeSet<usize>) -> Self {
        let mut set = Self {
            members: Vec::with_capacity(order),
            present: vec![false; order],
        };
        for &x in seed {
            set.insert(x);
        }
        set
    }

    fn insert(&mut self, x: usize) -> bool {
        if self.present[x] {
            return false;
        }
        self.present[x] = true;
        self.members.push(x);
        true
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn into_sorted(mut self) -> Vec<usize> {
        self.members.sort_unstable();
        self.members
    }
}

/// Answers of both detections for one quasigroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubquasigroupReport {
    pub proper: bool,
    pub non_trivial: bool,
}

impl fmt::Display for SubquasigroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = |found: bool| if found { "present" } else { "absent" };
        writeln!(f, "- proper subquasigroups: {}", presence(self.proper))?;
        writeln!(
            f,
            "- non-trivial subquasigroups: {}",
            presence(self.non_trivial)
        )?;
        if self.proper && self.non_trivial {
            write!(f, "The quasigroup contains proper non-trivial subquasigroups.")
        } else {
            write!(
                f,
                "The quasigroup does not contain subquasigroups that are both proper and non-trivial."
            )
        }
    }
}

/// Searches a quasigroup for closed subsets.
pub struct SubquasigroupDetector<'a> {
    quasigroup: &'a Quasigroup,
}

impl<'a> SubquasigroupDetector<'a> {
    pub fn new(quasigroup: &'a Quasigroup) -> Self {
        Self { quasigroup }
    }

    /// Returns true if some orbit closes to a set of the given kind.
    pub fn has_subquasigroups(&self, kind: SubquasigroupKind) -> bool {
        self.witness(kind).is_some()
    }

    /// Returns the first qualifying closed set, sorted ascending.
    pub fn witness(&self, kind: SubquasigroupKind) -> Option<Vec<usize>> {
        let order = self.quasigroup.order();
        let policy = kind.policy(order);
        let mut checked: HashSet<BTreeSet<usize>> = HashSet::new();

        for start in 0..order {
            let orbit = self.orbit(start);
            if checked.contains(&orbit) {
                continue;
            }
            // An idempotent element only ever closes to itself.
            if orbit.len() > 1 {
                if let Some(closed) = self.close(&orbit, policy) {
                    trace!(start, size = closed.len(), ?kind, "orbit closed");
                    if qualifies(closed.len(), order) {
                        return Some(closed.into_sorted());
                    }
                }
            }
            checked.insert(orbit);
        }
        None
    }

    /// Runs both detections.
    pub fn report(&self) -> SubquasigroupReport {
        SubquasigroupReport {
            proper: self.has_subquasigroups(SubquasigroupKind::Proper),
            non_trivial: self.has_subquasigroups(SubquasigroupKind::NonTrivial),
        }
    }

    /// Elements visited by repeated squaring from `start`, up to the first
    /// repeat.
    ///
    /// # Panics
    /// Panics if `start` is not below the order.
    pub fn orbit(&self, start: usize) -> BTreeSet<usize> {
        assert!(start < self.quasigroup.order(), "start out of range");
        let mut orbit = BTreeSet::new();
        let mut x = start;
        while orbit.insert(x) {
            x = self.quasigroup.product(x, x);
        }
        orbit
    }

    /// Closes `seed` under the operation. Returns `None` if the policy
    /// abandons the seed.
    fn close(&self, seed: &BTreeSet<usize>, policy: ClosurePolicy) -> Option<ClosedSet> {
        if policy.exceeded(seed.len()) {
            return None;
        }
        let mut set = ClosedSet::with_seed(self.quasigroup.order(), seed);
        let mut changed = true;
        while changed {
            changed = false;
            let round = set.len();
            for i in 0..round {
                for j in 0..round {
                    let product = self.quasigroup.product(set.members[i], set.members[j]);
                    if set.insert(product) {
                        changed = true;
                        if policy.exceeded(set.len()) {
                            return None;
                        }
                    }
                }
            }
        }
        Some(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CayleyTable;

    fn cyclic(n: usize) -> Quasigroup {
        Quasigroup::new(CayleyTable::new_cyclic(n))
    }

    #[test]
    fn cyclic_order_four_has_both() {
        let q = cyclic(4);
        assert!(q.has_subquasigroups(SubquasigroupKind::Proper));
        assert!(q.has_subquasigroups(SubquasigroupKind::NonTrivial));
        let detector = SubquasigroupDetector::new(&q);
        assert_eq!(detector.witness(SubquasigroupKind::Proper), Some(vec![0, 2]));
    }

    #[test]
    fn cyclic_order_two_has_neither() {
        let q = cyclic(2);
        assert_eq!(
            q.report(),
            SubquasigroupReport {
                proper: false,
                non_trivial: false
            }
        );
    }

    #[test]
    fn cyclic_order_three_has_neither() {
        let q = cyclic(3);
        assert!(!q.has_subquasigroups(SubquasigroupKind::Proper));
        assert!(!q.has_subquasigroups(SubquasigroupKind::NonTrivial));
    }

    #[test]
    fn order_one_has_neither() {
        let q = cyclic(1);
        assert!(!q.has_subquasigroups(SubquasigroupKind::Proper));
        assert!(!q.has_subquasigroups(SubquasigroupKind::NonTrivial));
    }

    #[test]
    fn cyclic_groups_follow_primality() {
        for n in 2..=30 {
            let prime = (2..n).all(|d| n % d != 0);
            let report = cyclic(n).report();
            assert_eq!(report.proper, !prime, "proper, n={}", n);
            assert_eq!(report.non_trivial, !prime, "non-trivial, n={}", n);
        }
    }

    #[test]
    fn orbit_walks_squares_until_repeat() {
        let q = cyclic(8);
        let detector = SubquasigroupDetector::new(&q);
        assert_eq!(detector.orbit(3), BTreeSet::from([3, 6, 4, 0]));
        assert_eq!(detector.orbit(0), BTreeSet::from([0]));
    }

    #[test]
    fn detection_is_repeatable() {
        let q = cyclic(12);
        for kind in [SubquasigroupKind::Proper, SubquasigroupKind::NonTrivial] {
            assert_eq!(q.has_subquasigroups(kind), q.has_subquasigroups(kind));
        }
    }

    #[test]
    fn proper_threshold_abandons_large_closed_sets() {
        // Not a Latin square: {0, 1} is closed and larger than 3 / 2.
        let table = CayleyTable::from_rows(&[[0usize, 1, 2], [1, 0, 2], [2, 2, 0]]).unwrap();
        let q = Quasigroup::new(table);
        assert!(!q.has_subquasigroups(SubquasigroupKind::Proper));
        assert!(q.has_subquasigroups(SubquasigroupKind::NonTrivial));
    }

    #[test]
    fn idempotent_steiner_quasigroup_seeds_only_singletons() {
        // Steiner quasigroup of the Fano plane: x*x = x, otherwise the third
        // point on the line through x and y. Every line is closed, but every
        // squaring orbit is a singleton.
        let lines = [
            [0, 1, 3],
            [1, 2, 4],
            [2, 3, 5],
            [3, 4, 6],
            [4, 5, 0],
            [5, 6, 1],
            [6, 0, 2],
        ];
        let mut rows = vec![vec![0usize; 7]; 7];
        for (x, row) in rows.iter_mut().enumerate() {
            row[x] = x;
        }
        for line in lines {
            for i in 0..3 {
                for j in 0..3 {
                    if i != j {
                        rows[line[i]][line[j]] = line[3 - i - j];
                    }
                }
            }
        }
        let table = CayleyTable::from_rows(&rows).unwrap();
        assert!(table.is_latin());
        let q = Quasigroup::new(table);
        assert!(!q.has_subquasigroups(SubquasigroupKind::Proper));
        assert!(!q.has_subquasigroups(SubquasigroupKind::NonTrivial));
    }

    #[test]
    fn report_display_records_both_answers() {
        let text = cyclic(6).report().to_string();
        assert!(text.contains("- proper subquasigroups: present"));
        assert!(text.contains("- non-trivial subquasigroups: present"));

        let text = cyclic(5).report().to_string();
        assert!(text.contains("- proper subquasigroups: absent"));
        assert!(text.contains("- non-trivial subquasigroups: absent"));
    }
}
