// Password composition policy

use crate::character::{is_lower, is_special, is_upper};

/// Composition rules a candidate must satisfy to be kept.
///
/// Evaluation is a pure predicate over the candidate string. With every
/// `require_*` flag off, only the length rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Policy {
    /// Minimum length, counted in characters (not bytes).
    pub min_length: usize,
    /// At least one uppercase letter.
    pub require_upper: bool,
    /// At least one lowercase letter.
    pub require_lower: bool,
    /// At least one ASCII digit.
    pub require_digit: bool,
    /// At least one character from [`SPECIAL_CHARS`](crate::character::SPECIAL_CHARS).
    pub require_special: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_upper: false,
            require_lower: false,
            require_digit: false,
            require_special: false,
        }
    }
}

impl Policy {
    /// A policy that accepts every non-empty candidate.
    pub const fn permissive() -> Self {
        Self {
            min_length: 1,
            require_upper: false,
            require_lower: false,
            require_digit: false,
            require_special: false,
        }
    }

    /// Returns `true` if `candidate` satisfies every enabled rule.
    ///
    /// Rules are checked in a fixed order and the first failure short-circuits:
    /// length, uppercase, lowercase, digit, special.
    pub fn accepts(&self, candidate: &str) -> bool {
        if !self.meets_length(candidate) {
            return false;
        }
        if self.require_upper && !candidate.chars().any(is_upper) {
            return false;
        }
        if self.require_lower && !candidate.chars().any(is_lower) {
            return false;
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        if self.require_special && !candidate.chars().any(is_special) {
            return false;
        }
        true
    }

    /// Returns `true` if no character-class rule is enabled.
    pub fn is_length_only(&self) -> bool {
        !(self.require_upper || self.require_lower || self.require_digit || self.require_special)
    }

    fn meets_length(&self, candidate: &str) -> bool {
        // Byte length bounds char count from above: cheap reject first.
        if candidate.len() < self.min_length {
            return false;
        }
        candidate.chars().count() >= self.min_length
    }
}
