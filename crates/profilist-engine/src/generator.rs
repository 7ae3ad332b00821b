// Generator: top-level integration point for wordlist generation.
//
// Owns the validated configuration (variant strategy, combination depth,
// suffix range, policy, cap, worker count) and runs the whole pipeline for
// one seed record:
//
//   SeedRecord -> tokens -> variants -> combinations -> suffixes -> policy
//              -> sink -> sorted wordlist
//
// Design notes:
// - Token extraction is sequential and cheap. Variant expansion is parallel
//   per token and materialized (it is small and downstream needs a stable
//   index space).
// - Combination, suffix and policy are fused into one streaming pass per
//   outer index; only accepted candidates reach the sink.
// - The pipeline is pure: the same record and options always give the same
//   wordlist, whatever the worker count.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::sync::atomic::AtomicBool;

use profilist_core::{Policy, SeedRecord, SubstitutionTable};
use tracing::{debug, info, warn};

use crate::combine::{CombinationDepth, Combinations};
use crate::pool;
use crate::sink::{CandidateSink, SinkOutput};
use crate::suffix::{DEFAULT_SUFFIXES, SuffixExpander};
use crate::tokens::{ExtractWarning, extract_tokens};
use crate::variants::{VariantOptions, VariantStrategy};

/// Default bound on the number of kept candidates.
///
/// The full expansion of an ordinary record runs to hundreds of millions of
/// strings, so an uncapped run can outgrow memory. Kept candidates are the
/// smallest in byte order, and the sink holds at most about twice this many
/// at any time.
pub const DEFAULT_MAX_CANDIDATES: usize = 2_000_000;

/// Error type for invalid generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Combination depth outside 1..=3.
    #[error("combination depth must be 1, 2 or 3, got {0}")]
    InvalidDepth(u8),

    /// Suffix range with start after end.
    #[error("suffix range {start}..={end} is empty")]
    EmptySuffixRange { start: u32, end: u32 },

    /// A cap of zero candidates.
    #[error("candidate cap must be at least 1")]
    ZeroCap,
}

/// Everything that shapes a run, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Composition rules for kept candidates.
    pub policy: Policy,
    /// Leetspeak substitutions.
    pub substitutions: SubstitutionTable,
    /// Extra variant rules.
    pub variants: VariantOptions,
    /// Maximum number of variants joined into one candidate (1, 2 or 3).
    pub max_depth: u8,
    /// Numeric suffixes appended to every combined candidate. `None`
    /// disables suffixing.
    pub suffixes: Option<RangeInclusive<u32>>,
    /// Keep at most this many candidates (the smallest in byte order).
    /// `None` keeps everything, with memory growing with the output.
    pub max_candidates: Option<usize>,
    /// Worker threads; 0 uses one per available CPU.
    pub workers: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            substitutions: SubstitutionTable::builtin(),
            variants: VariantOptions::default(),
            max_depth: 3,
            suffixes: Some(DEFAULT_SUFFIXES),
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
            workers: 0,
        }
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Distinct base tokens extracted from the record.
    pub tokens: usize,
    /// Distinct variants across all tokens.
    pub variants: usize,
    /// Combined candidates produced before suffixing (duplicates included).
    pub combined: u64,
    /// Strings checked against the policy (duplicates included).
    pub generated: u64,
    /// Strings that passed the policy (duplicates included).
    pub accepted: u64,
    /// Distinct candidates in the final list.
    pub kept: usize,
    /// The cap dropped some accepted candidates.
    pub truncated: bool,
    /// The run was stopped before the whole space was visited.
    pub cancelled: bool,
}

/// A finished, sorted, duplicate-free candidate list.
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    words: Vec<String>,
    stats: GenerationStats,
    warnings: Vec<ExtractWarning>,
}

impl Wordlist {
    /// Candidates in ascending byte order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Input problems skipped during token extraction.
    pub fn warnings(&self) -> &[ExtractWarning] {
        &self.warnings
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

/// Per-worker counters, merged after the pool finishes.
#[derive(Default)]
struct Tally {
    combined: u64,
    generated: u64,
    accepted: u64,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.combined += other.combined;
        self.generated += other.generated;
        self.accepted += other.accepted;
        self
    }
}

/// Runs the full pipeline with a fixed, validated configuration.
pub struct Generator {
    strategy: VariantStrategy,
    depth: CombinationDepth,
    suffixes: SuffixExpander,
    policy: Policy,
    max_candidates: Option<NonZeroUsize>,
    workers: usize,
}

impl Generator {
    /// Validate `options` and build a generator.
    pub fn new(options: GeneratorOptions) -> Result<Self, ConfigError> {
        let depth = CombinationDepth::from_level(options.max_depth)
            .ok_or(ConfigError::InvalidDepth(options.max_depth))?;

        let suffixes = match options.suffixes {
            None => SuffixExpander::disabled(),
            Some(range) => {
                let (start, end) = (*range.start(), *range.end());
                if start > end {
                    return Err(ConfigError::EmptySuffixRange { start, end });
                }
                SuffixExpander::new(range)
            }
        };

        let max_candidates = match options.max_candidates {
            None => None,
            Some(n) => Some(NonZeroUsize::new(n).ok_or(ConfigError::ZeroCap)?),
        };

        Ok(Self {
            strategy: VariantStrategy::with_options(options.substitutions, &options.variants),
            depth,
            suffixes,
            policy: options.policy,
            max_candidates,
            workers: pool::resolve_workers(options.workers),
        })
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// Resolved worker count (never 0).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Set the worker count; 0 uses one per available CPU.
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = pool::resolve_workers(workers);
    }

    pub fn set_max_candidates(&mut self, max_candidates: Option<NonZeroUsize>) {
        self.max_candidates = max_candidates;
    }

    /// Generate the wordlist for `record`.
    pub fn run(&self, record: &SeedRecord) -> Wordlist {
        self.run_until(record, &AtomicBool::new(false))
    }

    /// Generate the wordlist for `record`, stopping early once `stop` is set.
    ///
    /// Workers notice the flag between outer indices. A stopped run still
    /// returns a well-formed list (sorted, distinct, policy-conforming) made
    /// of whatever was accepted so far, with `stats.cancelled` set.
    pub fn run_until(&self, record: &SeedRecord, stop: &AtomicBool) -> Wordlist {
        let extraction = extract_tokens(record);
        for warning in &extraction.warnings {
            warn!(%warning, "skipping malformed seed input");
        }

        let variants = self.strategy.expand_all(&extraction.tokens, self.workers);
        let combos = Combinations::new(&variants, self.depth);
        let forms = self.suffixes.forms_per_candidate() as u128;
        info!(
            tokens = extraction.tokens.len(),
            variants = variants.len(),
            upper_bound = %combos.candidate_count().saturating_mul(forms),
            workers = self.workers,
            "expanding candidates"
        );

        let sink = CandidateSink::for_workers(self.workers, self.max_candidates);
        let drained = pool::run_indexed(
            self.workers,
            combos.outer_len(),
            stop,
            Tally::default,
            |tally: &mut Tally, outer| self.expand_outer(combos, outer, &sink, tally),
        );
        let tally = drained.states.into_iter().fold(Tally::default(), Tally::merge);
        let cancelled = !drained.complete;

        let SinkOutput { words, truncated } = sink.into_sorted();
        if truncated {
            warn!(
                cap = self.max_candidates.map_or(0, NonZeroUsize::get),
                "candidate cap reached, output truncated to the smallest candidates"
            );
        }
        if cancelled {
            warn!(kept = words.len(), "generation stopped early");
        }

        let stats = GenerationStats {
            tokens: extraction.tokens.len(),
            variants: variants.len(),
            combined: tally.combined,
            generated: tally.generated,
            accepted: tally.accepted,
            kept: words.len(),
            truncated,
            cancelled,
        };
        info!(
            generated = stats.generated,
            accepted = stats.accepted,
            kept = stats.kept,
            "generation finished"
        );

        Wordlist {
            words,
            stats,
            warnings: extraction.warnings,
        }
    }

    /// Stream every candidate of one outer index through suffixing and the
    /// policy into the sink.
    fn expand_outer(
        &self,
        combos: Combinations<'_>,
        outer: usize,
        sink: &CandidateSink,
        tally: &mut Tally,
    ) {
        let mut buf = String::new();
        let before = tally.combined;
        for base in combos.for_outer(outer) {
            tally.combined += 1;
            self.suffixes.expand(&base, &mut buf, |candidate| {
                tally.generated += 1;
                if self.policy.accepts(candidate) {
                    tally.accepted += 1;
                    sink.insert(candidate);
                }
            });
        }
        debug!(outer, combined = tally.combined - before, "outer index done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> GeneratorOptions {
        GeneratorOptions {
            policy: Policy::permissive(),
            substitutions: SubstitutionTable::empty(),
            max_depth: 2,
            suffixes: None,
            workers: 2,
            ..GeneratorOptions::default()
        }
    }

    fn record(words: &[&str]) -> SeedRecord {
        SeedRecord {
            hobbies: words.iter().map(|w| w.to_string()).collect(),
            ..SeedRecord::default()
        }
    }

    #[test]
    fn defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.suffixes, Some(0..=99));
        assert_eq!(options.policy.min_length, 8);
        assert_eq!(options.max_candidates, Some(DEFAULT_MAX_CANDIDATES));
        assert!(Generator::new(options).is_ok());
    }

    #[test]
    fn rejects_invalid_depth() {
        let result = Generator::new(GeneratorOptions {
            max_depth: 4,
            ..options()
        });
        assert_eq!(result.err(), Some(ConfigError::InvalidDepth(4)));
    }

    #[test]
    fn rejects_empty_suffix_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let suffixes = Some(9..=1);
        let result = Generator::new(GeneratorOptions {
            suffixes,
            ..options()
        });
        assert_eq!(
            result.err(),
            Some(ConfigError::EmptySuffixRange { start: 9, end: 1 })
        );
    }

    #[test]
    fn rejects_zero_cap() {
        let result = Generator::new(GeneratorOptions {
            max_candidates: Some(0),
            ..options()
        });
        assert_eq!(result.err(), Some(ConfigError::ZeroCap));
    }

    #[test]
    fn pairs_without_suffixes() {
        let generator = Generator::new(options()).unwrap();
        let wordlist = generator.run(&record(&["juan", "max"]));
        // Case forms of two tokens: 6 variants, 6 + 6*5*3 candidates, all distinct.
        assert_eq!(wordlist.stats().variants, 6);
        assert_eq!(wordlist.stats().combined, 6 + 90);
        assert_eq!(wordlist.len(), 96);
        assert!(wordlist.words().contains(&"juan@MAX".to_string()));
        assert!(!wordlist.words().contains(&"juanjuan".to_string()));
    }

    #[test]
    fn triples_flow_through_suffixes_and_policy() {
        let generator = Generator::new(GeneratorOptions {
            max_depth: 3,
            suffixes: Some(0..=1),
            ..options()
        })
        .unwrap();
        let wordlist = generator.run(&record(&["ab", "cd"]));
        // 6 variants: 6 singles, 6*5*3 pairs, 6^3*2 triples, 3 forms each.
        assert_eq!(wordlist.stats().combined, 6 + 90 + 432);
        assert_eq!(wordlist.stats().generated, (6 + 90 + 432) * 3);
        for expected in [
            "ab_cd_ab", "ab_cd_ab0", "abcdab1", "ab_ab_ab1", "CD_ab_Cd0", "cdcdcd", "ab@cd1",
        ] {
            assert!(wordlist.words().contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!wordlist.stats().truncated);
        assert!(!wordlist.stats().cancelled);
    }

    #[test]
    fn output_is_sorted_and_distinct() {
        let generator = Generator::new(GeneratorOptions {
            suffixes: Some(0..=3),
            ..options()
        })
        .unwrap();
        let words = generator.run(&record(&["ab", "a", "b"])).into_words();
        let mut expected = words.clone();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(words, expected);
        // "a"+"b" and "ab" collide; both survive only once.
        assert_eq!(words.iter().filter(|w| *w == "ab").count(), 1);
    }

    #[test]
    fn policy_applies_to_suffixed_forms() {
        let generator = Generator::new(GeneratorOptions {
            policy: Policy {
                min_length: 5,
                require_digit: true,
                ..Policy::default()
            },
            max_depth: 1,
            suffixes: Some(0..=10),
            ..options()
        })
        .unwrap();
        let wordlist = generator.run(&record(&["juan"]));
        assert!(wordlist.words().iter().all(|w| generator.policy().accepts(w)));
        assert!(wordlist.words().contains(&"juan0".to_string()));
        assert!(wordlist.words().contains(&"JUAN10".to_string()));
        assert!(!wordlist.words().contains(&"juan".to_string()));
    }

    #[test]
    fn cap_truncates_deterministically() {
        let capped = GeneratorOptions {
            max_candidates: Some(25),
            suffixes: Some(0..=9),
            ..options()
        };
        let one = Generator::new(GeneratorOptions {
            workers: 1,
            ..capped.clone()
        })
        .unwrap()
        .run(&record(&["ana", "luis", "max"]));
        let four = Generator::new(GeneratorOptions {
            workers: 4,
            ..capped
        })
        .unwrap()
        .run(&record(&["ana", "luis", "max"]));
        assert_eq!(one.len(), 25);
        assert!(one.stats().truncated);
        assert_eq!(one.words(), four.words());
    }

    #[test]
    fn pre_set_stop_flag_yields_empty_cancelled_list() {
        let generator = Generator::new(options()).unwrap();
        let stop = AtomicBool::new(true);
        let wordlist = generator.run_until(&record(&["juan"]), &stop);
        assert!(wordlist.is_empty());
        assert!(wordlist.stats().cancelled);
    }

    #[test]
    fn warnings_are_carried() {
        let generator = Generator::new(options()).unwrap();
        let wordlist = generator.run(&SeedRecord {
            name: Some("Juan".to_string()),
            birthdate: Some("1990-01-01".to_string()),
            ..SeedRecord::default()
        });
        assert_eq!(wordlist.warnings().len(), 1);
        assert!(!wordlist.is_empty());
    }

    #[test]
    fn empty_record_gives_empty_list() {
        let generator = Generator::new(options()).unwrap();
        let wordlist = generator.run(&SeedRecord::default());
        assert!(wordlist.is_empty());
        assert_eq!(wordlist.stats().tokens, 0);
    }

    #[test]
    fn setters() {
        let mut generator = Generator::new(options()).unwrap();
        generator.set_workers(3);
        assert_eq!(generator.workers(), 3);
        generator.set_policy(Policy {
            min_length: 100,
            ..Policy::default()
        });
        assert!(generator.run(&record(&["juan"])).is_empty());
        generator.set_policy(Policy::permissive());
        generator.set_max_candidates(NonZeroUsize::new(2));
        assert_eq!(generator.run(&record(&["juan"])).len(), 2);
    }
}
