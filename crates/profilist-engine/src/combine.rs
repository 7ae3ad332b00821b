// Combination expansion: singles, ordered pairs and ordered triples of
// variants, produced lazily per outer index.

use std::iter;

/// Separators placed between the two halves of a pair.
pub const PAIR_SEPARATORS: [&str; 3] = ["", "_", "@"];

/// Separators placed between the three parts of a triple.
pub const TRIPLE_SEPARATORS: [&str; 2] = ["", "_"];

/// How many variants may be joined into one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CombinationDepth {
    /// Variants only.
    Singles,
    /// Variants and ordered pairs.
    Pairs,
    /// Variants, ordered pairs and ordered triples.
    Triples,
}

impl CombinationDepth {
    /// Map 1, 2, 3 to singles, pairs, triples.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Singles),
            2 => Some(Self::Pairs),
            3 => Some(Self::Triples),
            _ => None,
        }
    }
}

impl Default for CombinationDepth {
    fn default() -> Self {
        Self::Triples
    }
}

/// The combination space over a sorted, distinct variant list `V`.
///
/// Every candidate belongs to exactly one outer index: the position in `V`
/// of its first component. [`for_outer`](Self::for_outer) yields that slice
/// of the space lazily, which lets workers partition the space by outer
/// index without coordinating.
///
/// For outer index `i` with `a = V[i]`:
/// - `a` itself
/// - for every `b` in `V` other than `a`: `ab`, `a_b`, `a@b`
/// - for every `b`, `c` in `V` (repeats allowed): `abc`, `a_b_c`
#[derive(Debug, Clone, Copy)]
pub struct Combinations<'a> {
    variants: &'a [String],
    depth: CombinationDepth,
}

impl<'a> Combinations<'a> {
    pub fn new(variants: &'a [String], depth: CombinationDepth) -> Self {
        Self { variants, depth }
    }

    /// Number of outer indices (the size of `V`).
    pub fn outer_len(&self) -> usize {
        self.variants.len()
    }

    /// Candidates whose first component is `V[outer]`.
    ///
    /// # Panics
    ///
    /// Panics if `outer >= self.outer_len()`.
    pub fn for_outer(self, outer: usize) -> impl Iterator<Item = String> + 'a {
        let variants = self.variants;
        let first = variants[outer].as_str();

        let pairs = (self.depth >= CombinationDepth::Pairs)
            .then(move || {
                variants
                    .iter()
                    .enumerate()
                    .filter(move |&(j, _)| j != outer)
                    .flat_map(move |(_, second)| {
                        PAIR_SEPARATORS
                            .into_iter()
                            .map(move |sep| join(&[first, second.as_str()], sep))
                    })
            })
            .into_iter()
            .flatten();

        let triples = (self.depth >= CombinationDepth::Triples)
            .then(move || {
                variants.iter().flat_map(move |second| {
                    variants.iter().flat_map(move |third| {
                        TRIPLE_SEPARATORS
                            .into_iter()
                            .map(move |sep| join(&[first, second.as_str(), third.as_str()], sep))
                    })
                })
            })
            .into_iter()
            .flatten();

        iter::once(first.to_string()).chain(pairs).chain(triples)
    }

    /// Every candidate in the space, outer index by outer index.
    pub fn iter(self) -> impl Iterator<Item = String> + 'a {
        (0..self.outer_len()).flat_map(move |outer| self.for_outer(outer))
    }

    /// Number of candidates the space yields (duplicates included).
    ///
    /// Saturates at `u128::MAX`.
    pub fn candidate_count(&self) -> u128 {
        let n = self.variants.len() as u128;
        let mut total = n;
        if self.depth >= CombinationDepth::Pairs {
            let pairs = n.saturating_mul(n.saturating_sub(1));
            total = total.saturating_add(pairs.saturating_mul(PAIR_SEPARATORS.len() as u128));
        }
        if self.depth >= CombinationDepth::Triples {
            let triples = n.saturating_mul(n).saturating_mul(n);
            total = total.saturating_add(triples.saturating_mul(TRIPLE_SEPARATORS.len() as u128));
        }
        total
    }
}

fn join(parts: &[&str], sep: &str) -> String {
    let len = parts.iter().map(|p| p.len()).sum::<usize>() + sep.len() * (parts.len() - 1);
    let mut out = String::with_capacity(len);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    fn variants(words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    fn collect(combos: Combinations<'_>) -> HashSet<String> {
        combos.iter().collect()
    }

    #[test]
    fn pair_examples() {
        let v = variants(&["juan", "max"]);
        let out = collect(Combinations::new(&v, CombinationDepth::Pairs));
        for expected in ["juanmax", "juan_max", "juan@max", "maxjuan", "max_juan", "max@juan"] {
            assert!(out.contains(expected), "missing {expected}");
        }
        assert!(!out.contains("juanjuan"));
        assert!(!out.contains("maxmax"));
        assert!(out.contains("juan"));
        assert!(out.contains("max"));
        assert_eq!(out.len(), 2 + 6);
    }

    #[test]
    fn triples_allow_repetition() {
        let v = variants(&["juan", "max"]);
        let out = collect(Combinations::new(&v, CombinationDepth::Triples));
        assert!(out.contains("juanjuanjuan"));
        assert!(out.contains("juan_juan_juan"));
        assert!(out.contains("maxjuanmax"));
        assert!(out.contains("max_juan_max"));
        // Self-pairs only appear as a prefix of a triple, never on their own.
        assert!(!out.contains("juanjuan"));
        assert!(!out.contains("juan@juan"));
    }

    #[test]
    fn singles_only() {
        let v = variants(&["a", "b", "c"]);
        let out: Vec<String> = Combinations::new(&v, CombinationDepth::Singles).iter().collect();
        assert_eq!(out, ["a", "b", "c"]);
    }

    #[test]
    fn candidate_count_matches_iteration() {
        let v = variants(&["a", "b", "c", "d"]);
        for depth in [
            CombinationDepth::Singles,
            CombinationDepth::Pairs,
            CombinationDepth::Triples,
        ] {
            let combos = Combinations::new(&v, depth);
            assert_eq!(combos.iter().count() as u128, combos.candidate_count());
        }
        // 4 + 4*3*3 + 4^3*2
        assert_eq!(Combinations::new(&v, CombinationDepth::Triples).candidate_count(), 4 + 36 + 128);
    }

    #[test]
    fn outer_slices_partition_the_space() {
        let v = variants(&["x", "y", "z"]);
        let combos = Combinations::new(&v, CombinationDepth::Triples);
        let mut by_outer = 0;
        for outer in 0..combos.outer_len() {
            for candidate in combos.for_outer(outer) {
                assert!(candidate.starts_with(v[outer].as_str()));
                by_outer += 1;
            }
        }
        assert_eq!(by_outer as u128, combos.candidate_count());
    }

    #[test]
    fn empty_variant_list() {
        let v: Vec<String> = Vec::new();
        let combos = Combinations::new(&v, CombinationDepth::Triples);
        assert_eq!(combos.iter().count(), 0);
        assert_eq!(combos.candidate_count(), 0);
    }

    #[test]
    fn depth_levels() {
        assert_eq!(CombinationDepth::from_level(1), Some(CombinationDepth::Singles));
        assert_eq!(CombinationDepth::from_level(3), Some(CombinationDepth::Triples));
        assert_eq!(CombinationDepth::from_level(0), None);
        assert_eq!(CombinationDepth::from_level(4), None);
        assert_eq!(CombinationDepth::default(), CombinationDepth::Triples);
    }
}
