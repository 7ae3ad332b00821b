// Case forms applied to seed tokens

/// A whole-word case transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseForm {
    /// Every letter lowercased: "juan".
    Lower,
    /// Every letter uppercased: "JUAN".
    Upper,
    /// First character uppercased, the rest lowercased: "Juan".
    Capitalized,
}

impl CaseForm {
    /// All case forms, in the order they are emitted.
    pub const ALL: [CaseForm; 3] = [CaseForm::Lower, CaseForm::Upper, CaseForm::Capitalized];

    /// Apply this case form to `word`.
    ///
    /// Uses full Unicode case mapping, so the result may differ in length
    /// from the input (e.g. "ß" uppercases to "SS").
    pub fn apply(self, word: &str) -> String {
        match self {
            CaseForm::Lower => word.to_lowercase(),
            CaseForm::Upper => word.to_uppercase(),
            CaseForm::Capitalized => capitalize(word),
        }
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_lower_and_upper() {
        assert_eq!(CaseForm::Lower.apply("JuAn"), "juan");
        assert_eq!(CaseForm::Upper.apply("JuAn"), "JUAN");
    }

    #[test]
    fn capitalized_lowers_the_tail() {
        assert_eq!(CaseForm::Capitalized.apply("pEREZ"), "Perez");
        assert_eq!(CaseForm::Capitalized.apply("JP"), "Jp");
    }

    #[test]
    fn capitalize_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize_leading_digit() {
        // Digits have no case; only the tail changes.
        assert_eq!(capitalize("1990ABC"), "1990abc");
    }

    #[test]
    fn non_ascii_letters() {
        assert_eq!(CaseForm::Upper.apply("\u{00F1}and\u{00FA}"), "\u{00D1}AND\u{00DA}"); // ÑANDÚ
        assert_eq!(capitalize("\u{00E1}NGEL"), "\u{00C1}ngel"); // Ángel
    }
}
