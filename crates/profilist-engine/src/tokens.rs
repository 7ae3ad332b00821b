// Token extraction: seed record to the set of base tokens

use hashbrown::HashSet;
use profilist_core::SeedRecord;

/// A non-fatal problem found while extracting tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractWarning {
    /// The birthdate did not match `D/M/YYYY`; no date tokens were emitted.
    #[error("birthdate {value:?} does not match D/M/YYYY, date tokens skipped")]
    MalformedBirthdate { value: String },
}

/// Result of token extraction.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Distinct, trimmed, non-empty base tokens. Unordered.
    pub tokens: HashSet<String>,
    /// Problems that caused some input to be skipped.
    pub warnings: Vec<ExtractWarning>,
}

/// Components of a birthdate, as written in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

impl<'a> BirthDate<'a> {
    /// Last two digits of the year.
    pub fn short_year(&self) -> &'a str {
        self.year.get(2..).unwrap_or(self.year)
    }
}

/// Parse `D/M/YYYY` where day and month have one or two ASCII digits and
/// the year has exactly four. Surrounding whitespace is ignored; anything
/// else makes the whole date invalid.
///
/// The whole trimmed string must match: trailing text such as
/// `"01/01/1990x"` is rejected, where a prefix match would accept it.
///
/// The components are returned verbatim, so `"01/01/1990"` gives day `"01"`.
pub fn parse_birthdate(input: &str) -> Option<BirthDate<'_>> {
    let mut parts = input.trim().split('/');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if digits(day, 1, 2) && digits(month, 1, 2) && digits(year, 4, 4) {
        Some(BirthDate { day, month, year })
    } else {
        None
    }
}

/// Derive the base tokens for a seed record.
///
/// - every non-blank single-valued field, trimmed
/// - day, month, year and two-digit year from a well-formed birthdate
/// - name+surname and surname+name when both are present
/// - every non-blank relative, hobby and event
///
/// A malformed birthdate is reported in [`Extraction::warnings`] and does
/// not affect the other tokens.
pub fn extract_tokens(record: &SeedRecord) -> Extraction {
    let mut extraction = Extraction::default();
    let tokens = &mut extraction.tokens;
    let mut push = |value: &str| {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !tokens.contains(trimmed) {
            tokens.insert(trimmed.to_string());
        }
    };

    for (_, value) in record.scalar_fields() {
        if let Some(value) = value {
            push(value);
        }
    }

    if let Some(raw) = record.birthdate.as_deref().filter(|d| !d.trim().is_empty()) {
        match parse_birthdate(raw) {
            Some(date) => {
                push(date.day);
                push(date.month);
                push(date.year);
                push(date.short_year());
            }
            None => extraction.warnings.push(ExtractWarning::MalformedBirthdate {
                value: raw.to_string(),
            }),
        }
    }

    let name = record.name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let surname = record.surname.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if let (Some(name), Some(surname)) = (name, surname) {
        push(&format!("{name}{surname}"));
        push(&format!("{surname}{name}"));
    }

    for entry in record.list_entries() {
        push(entry);
    }

    extraction
}
