// Leetspeak substitution table

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;

/// Built-in substitutions, in glyph priority order.
const BUILTIN: &[(char, &[char])] = &[
    ('a', &['@', '4']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('l', &['1', '|']),
];

/// Error type for parsing a substitution table from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionParseError {
    #[error("substitution entry {0:?} is missing '='")]
    MissingSeparator(String),
    #[error("substitution key {0:?} must be a single letter")]
    InvalidKey(String),
    #[error("substitution for {0:?} has no replacement glyphs")]
    NoGlyphs(char),
}

/// Immutable mapping from a lowercase letter to its replacement glyphs.
///
/// Glyphs are single characters, so substituting one never shifts the
/// positions of the characters after it. Glyph order is preserved and
/// duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: HashMap<char, Box<[char]>>,
}

impl SubstitutionTable {
    /// Build a table from `(letter, glyphs)` pairs.
    ///
    /// Keys are lowercased. A glyph equal to its own key, or repeated for the
    /// same key, is ignored. Keys left without glyphs are dropped. Later
    /// entries for the same key append to earlier ones.
    pub fn new<I, G>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, G)>,
        G: IntoIterator<Item = char>,
    {
        let mut map: HashMap<char, Vec<char>> = HashMap::new();
        for (key, glyphs) in entries {
            let key = fold_key(key);
            let slot = map.entry(key).or_default();
            for glyph in glyphs {
                if glyph != key && !slot.contains(&glyph) {
                    slot.push(glyph);
                }
            }
        }
        Self {
            entries: map
                .into_iter()
                .filter(|(_, glyphs)| !glyphs.is_empty())
                .map(|(key, glyphs)| (key, glyphs.into_boxed_slice()))
                .collect(),
        }
    }

    /// The built-in table: `a→@4 e→3 i→1! o→0 s→$5 l→1|`.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(|&(key, glyphs)| (key, glyphs.iter().copied())))
    }

    /// A table with no substitutions.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replacement glyphs for a lowercase character, if it is substitutable.
    pub fn glyphs(&self, c: char) -> Option<&[char]> {
        self.entries.get(&c).map(|g| &g[..])
    }

    /// Number of substitutable letters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no letter is substitutable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upper bound on the substitution closure size for `lowered`.
    ///
    /// Each substitutable position multiplies the count by
    /// `1 + glyph count`. Saturates instead of overflowing.
    pub fn closure_bound(&self, lowered: &str) -> usize {
        lowered
            .chars()
            .filter_map(|c| self.glyphs(c))
            .fold(1usize, |acc, g| acc.saturating_mul(g.len() + 1))
    }

    fn sorted_entries(&self) -> Vec<(char, &[char])> {
        let mut sorted: Vec<_> = self.entries.iter().map(|(&k, g)| (k, &g[..])).collect();
        sorted.sort_unstable_by_key(|&(k, _)| k);
        sorted
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parses `a=@4,e=3,o=0`: comma-separated entries, each a single letter,
/// `=`, and the replacement glyphs written one after another. Whitespace
/// around entries is ignored; an empty string yields an empty table.
impl FromStr for SubstitutionTable {
    type Err = SubstitutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for raw in s.split(',') {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            let (key, glyphs) = entry
                .split_once('=')
                .ok_or_else(|| SubstitutionParseError::MissingSeparator(entry.to_string()))?;
            let mut key_chars = key.trim().chars();
            let key = match (key_chars.next(), key_chars.next()) {
                (Some(k), None) if k.is_alphabetic() => k,
                _ => return Err(SubstitutionParseError::InvalidKey(key.to_string())),
            };
            let glyphs: Vec<char> = glyphs.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.is_empty() {
                return Err(SubstitutionParseError::NoGlyphs(key));
            }
            entries.push((key, glyphs));
        }
        Ok(Self::new(entries))
    }
}

impl fmt::Display for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, glyphs)) in self.sorted_entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}=")?;
            for glyph in glyphs {
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

fn fold_key(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
