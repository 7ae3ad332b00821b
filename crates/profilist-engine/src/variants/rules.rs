// Individual variant rules: each adds one family of transformed forms of a
// token to the variant set.

use hashbrown::HashSet;
use profilist_core::{CaseForm, SubstitutionTable};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One family of token transformations.
///
/// Rules only ever add to `out`; a rule never removes what another rule
/// produced. Implementations must be pure: the same token always yields the
/// same forms.
pub trait VariantRule: Send + Sync {
    /// Add this rule's forms of `token` to `out`.
    fn expand(&self, token: &str, out: &mut HashSet<String>);
}

// ---------------------------------------------------------------------------
// CaseForms
// ---------------------------------------------------------------------------

/// Lowercase, uppercase and capitalized forms of the token.
pub struct CaseForms;

impl VariantRule for CaseForms {
    fn expand(&self, token: &str, out: &mut HashSet<String>) {
        for form in CaseForm::ALL {
            out.insert(form.apply(token));
        }
    }
}

// ---------------------------------------------------------------------------
// LeetSubstitution
// ---------------------------------------------------------------------------

/// Substitution closure of the lowercase token (see [`substitution_closure`]).
pub struct LeetSubstitution {
    table: SubstitutionTable,
}

impl LeetSubstitution {
    pub fn new(table: SubstitutionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }
}

impl VariantRule for LeetSubstitution {
    fn expand(&self, token: &str, out: &mut HashSet<String>) {
        out.extend(substitution_closure(&token.to_lowercase(), &self.table));
    }
}

/// Every combination of substitutions over the characters of `lowered`.
///
/// Positions are scanned left to right. At each substitutable position,
/// every variant accumulated so far is branched once per replacement glyph
/// (only that position changes) and the originals are kept. The unmodified
/// input is always the first element.
///
/// The result has exactly the product, over substitutable positions, of
/// `1 + glyph count` elements, all distinct: the table never maps a letter
/// to itself or repeats a glyph, and a position is still unmodified in every
/// variant when it is reached.
pub fn substitution_closure(lowered: &str, table: &SubstitutionTable) -> Vec<String> {
    let seed: Vec<char> = lowered.chars().collect();
    let mut variants: Vec<Vec<char>> = vec![seed.clone()];

    for (pos, &c) in seed.iter().enumerate() {
        let Some(glyphs) = table.glyphs(c) else {
            continue;
        };
        let existing = variants.len();
        variants.reserve(existing * glyphs.len());
        for idx in 0..existing {
            for &glyph in glyphs {
                let mut branched = variants[idx].clone();
                branched[pos] = glyph;
                variants.push(branched);
            }
        }
    }

    variants
        .into_iter()
        .map(|chars| chars.into_iter().collect())
        .collect()
}

// ---------------------------------------------------------------------------
// SpecialAffixes
// ---------------------------------------------------------------------------

/// The lowercase token with one special character prepended or appended:
/// `!juan`, `juan!`, `@juan`, ...
pub struct SpecialAffixes {
    chars: Vec<char>,
}

impl SpecialAffixes {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self { chars: unique }
    }
}

impl VariantRule for SpecialAffixes {
    fn expand(&self, token: &str, out: &mut HashSet<String>) {
        let lowered = token.to_lowercase();
        for &c in &self.chars {
            out.insert(format!("{c}{lowered}"));
            out.insert(format!("{lowered}{c}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(rule: &dyn VariantRule, token: &str) -> Vec<String> {
        let mut out = HashSet::new();
        rule.expand(token, &mut out);
        let mut v: Vec<String> = out.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn case_forms() {
        assert_eq!(expand(&CaseForms, "jUAN"), ["JUAN", "Juan", "juan"]);
    }

    #[test]
    fn case_forms_collapse_for_caseless_tokens() {
        assert_eq!(expand(&CaseForms, "90"), ["90"]);
    }

    #[test]
    fn closure_keeps_input_first() {
        let closure = substitution_closure("perez", &SubstitutionTable::builtin());
        assert_eq!(closure[0], "perez");
        // e(2) * e(2)
        assert_eq!(closure.len(), 4);
    }

    #[test]
    fn closure_size_matches_bound() {
        let table = SubstitutionTable::builtin();
        for word in ["juanperez", "futbol", "correr", "luis", "ana", "max", "1990"] {
            let closure = substitution_closure(word, &table);
            assert_eq!(closure.len(), table.closure_bound(word), "{word}");
            let unique: HashSet<&String> = closure.iter().collect();
            assert_eq!(unique.len(), closure.len(), "{word} has duplicates");
        }
    }

    #[test]
    fn closure_substitutes_positions_independently() {
        let table = SubstitutionTable::new([('l', vec!['1', '|']), ('i', vec!['1'])]);
        let closure = expand(&LeetSubstitution::new(table), "Li");
        assert_eq!(closure, ["11", "1i", "l1", "li", "|1", "|i"]);
    }

    #[test]
    fn leet_rule_lowercases_first() {
        let table = SubstitutionTable::new([('a', ['4'])]);
        assert_eq!(expand(&LeetSubstitution::new(table), "ANA"), ["4n4", "4na", "an4", "ana"]);
    }

    #[test]
    fn closure_of_empty_string() {
        assert_eq!(substitution_closure("", &SubstitutionTable::builtin()), [""]);
    }

    #[test]
    fn special_affixes() {
        let rule = SpecialAffixes::new(['!', '#', '!']);
        assert_eq!(expand(&rule, "Max"), ["!max", "#max", "max!", "max#"]);
    }
}
