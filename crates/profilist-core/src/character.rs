// Character classification for password composition checks

/// Characters counted as "special" by the composition policy.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[{]}\\|;:'\",<.>/?`~";

/// Character class as seen by the composition policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// An uppercase letter (Unicode case property).
    Upper,
    /// A lowercase letter (Unicode case property).
    Lower,
    /// An ASCII decimal digit.
    Digit,
    /// A member of [`SPECIAL_CHARS`].
    Special,
    /// Anything else: caseless letters, whitespace, other symbols.
    Other,
}

/// Classify a single character.
pub fn char_class(c: char) -> CharClass {
    if is_upper(c) {
        return CharClass::Upper;
    }
    if is_lower(c) {
        return CharClass::Lower;
    }
    if c.is_ascii_digit() {
        return CharClass::Digit;
    }
    if is_special(c) {
        return CharClass::Special;
    }
    CharClass::Other
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c.is_uppercase()
}

/// Check whether a character is a lowercase letter.
pub fn is_lower(c: char) -> bool {
    c.is_lowercase()
}

/// Check whether a character belongs to the policy's special class.
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}
