// Variant strategy: composes rules and expands whole token sets

use std::sync::atomic::AtomicBool;

use hashbrown::HashSet;
use profilist_core::SubstitutionTable;
use tracing::debug;

use super::rules::{CaseForms, LeetSubstitution, SpecialAffixes, VariantRule};
use crate::pool;

/// Optional variant rules beyond the standard case and leetspeak forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantOptions {
    /// Characters prepended and appended to the lowercase token.
    /// Empty disables the rule.
    pub affix_chars: Vec<char>,
}

/// An ordered list of variant rules applied to every token.
pub struct VariantStrategy {
    rules: Vec<Box<dyn VariantRule>>,
}

impl VariantStrategy {
    /// Case forms plus the substitution closure over `table`.
    pub fn standard(table: SubstitutionTable) -> Self {
        Self::with_options(table, &VariantOptions::default())
    }

    /// The standard rules followed by whatever `options` enables.
    pub fn with_options(table: SubstitutionTable, options: &VariantOptions) -> Self {
        let mut rules: Vec<Box<dyn VariantRule>> =
            vec![Box::new(CaseForms), Box::new(LeetSubstitution::new(table))];
        if !options.affix_chars.is_empty() {
            rules.push(Box::new(SpecialAffixes::new(options.affix_chars.iter().copied())));
        }
        Self { rules }
    }

    /// Number of rules in this strategy.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// All variants of a single token.
    pub fn variants(&self, token: &str) -> HashSet<String> {
        let mut out = HashSet::new();
        self.expand_into(token, &mut out);
        out
    }

    /// Union of the variants of every token, sorted.
    ///
    /// Tokens are expanded in parallel on `workers` threads (0 picks one per
    /// CPU), each worker collecting into its own set; the sets are merged at
    /// the end. The sorted output gives downstream stages a stable index
    /// space regardless of hash or thread order.
    pub fn expand_all(&self, tokens: &HashSet<String>, workers: usize) -> Vec<String> {
        let mut ordered: Vec<&str> = tokens.iter().map(String::as_str).collect();
        ordered.sort_unstable();

        let never = AtomicBool::new(false);
        let drained = pool::run_indexed(
            pool::resolve_workers(workers),
            ordered.len(),
            &never,
            HashSet::new,
            |local: &mut HashSet<String>, index| self.expand_into(ordered[index], local),
        );

        let mut merged: HashSet<String> = HashSet::new();
        for partial in drained.states {
            if merged.is_empty() {
                merged = partial;
            } else {
                merged.extend(partial);
            }
        }
        merged.remove("");

        let mut variants: Vec<String> = merged.into_iter().collect();
        variants.sort_unstable();
        debug!(
            tokens = ordered.len(),
            variants = variants.len(),
            "expanded token variants"
        );
        variants
    }

    fn expand_into(&self, token: &str, out: &mut HashSet<String>) {
        for rule in &self.rules {
            rule.expand(token, out);
        }
    }
}
