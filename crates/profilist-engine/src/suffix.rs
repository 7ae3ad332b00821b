// Numeric suffix expansion

use std::fmt::Write;
use std::ops::RangeInclusive;

/// Default suffix range: `0` through `99`.
pub const DEFAULT_SUFFIXES: RangeInclusive<u32> = 0..=99;

/// Appends every number in a range to each candidate.
///
/// Expansion is additive: the unsuffixed candidate is always produced first,
/// followed by one form per number, written as plain decimal ("7", not "07").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixExpander {
    range: Option<(u32, u32)>,
}

impl SuffixExpander {
    /// Expander for `range`. An empty range (`start > end`) disables
    /// suffixing, like [`disabled`](Self::disabled).
    pub fn new(range: RangeInclusive<u32>) -> Self {
        let (start, end) = range.into_inner();
        Self {
            range: (start <= end).then_some((start, end)),
        }
    }

    /// Expander that passes candidates through unchanged.
    pub fn disabled() -> Self {
        Self { range: None }
    }

    /// Number of strings produced per input candidate (the candidate itself
    /// included).
    pub fn forms_per_candidate(&self) -> usize {
        match self.range {
            Some((start, end)) => (end - start) as usize + 2,
            None => 1,
        }
    }

    /// Feed `base` and each suffixed form of it to `emit`.
    ///
    /// `buf` is scratch space reused across calls so that forms rejected by
    /// the consumer never allocate.
    pub fn expand(&self, base: &str, buf: &mut String, mut emit: impl FnMut(&str)) {
        emit(base);
        let Some((start, end)) = self.range else {
            return;
        };
        buf.clear();
        buf.push_str(base);
        let base_len = buf.len();
        for n in start..=end {
            buf.truncate(base_len);
            let _ = write!(buf, "{n}");
            emit(buf.as_str());
        }
    }

    /// Collect `base` and all its suffixed forms.
    pub fn expanded(&self, base: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(self.forms_per_candidate());
        let mut buf = String::new();
        self.expand(base, &mut buf, |form| out.push(form.to_string()));
        out
    }
}

impl Default for SuffixExpander {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES)
    }
}
