// Variant generation: case forms and leetspeak substitutions per token
//
// Architecture:
//   - `rules`: individual transformations (VariantRule trait)
//   - `strategy`: composes rules and expands whole token sets in parallel

pub mod rules;
pub mod strategy;

use hashbrown::HashSet;
use profilist_core::SubstitutionTable;

pub use rules::{CaseForms, LeetSubstitution, SpecialAffixes, VariantRule, substitution_closure};
pub use strategy::{VariantOptions, VariantStrategy};

/// All variants of one token under the standard rules.
///
/// The result holds the lowercase, uppercase and capitalized forms of
/// `token` plus the full substitution closure of its lowercase form.
pub fn variants_of(token: &str, table: &SubstitutionTable) -> HashSet<String> {
    let mut out = HashSet::new();
    CaseForms.expand(token, &mut out);
    out.extend(substitution_closure(&token.to_lowercase(), table));
    out
}
