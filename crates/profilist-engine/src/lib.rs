//! Candidate-password generation engine.
//!
//! Turns a [`SeedRecord`](profilist_core::SeedRecord) into a sorted,
//! deduplicated, policy-filtered wordlist. The stages run in a fixed order:
//!
//! - [`tokens`] -- seed record to base tokens
//! - [`variants`] -- case forms and leetspeak closures per token
//! - [`combine`] -- singles, ordered pairs and ordered triples of variants
//! - [`suffix`] -- numeric suffixes on every combined candidate
//! - policy filtering ([`Policy::accepts`](profilist_core::Policy::accepts))
//! - [`sink`] -- sharded deduplicating set, optionally capped
//!
//! The combination, suffix and policy stages are fused into one streaming
//! pass per worker (see [`generator`]); no unfiltered candidate set is ever
//! held in memory. [`output`] writes the finished list to disk.

pub mod combine;
pub mod generator;
pub mod output;
mod pool;
pub mod sink;
pub mod suffix;
pub mod tokens;
pub mod variants;

pub use combine::{CombinationDepth, Combinations};
pub use generator::{
    ConfigError, DEFAULT_MAX_CANDIDATES, GenerationStats, Generator, GeneratorOptions, Wordlist,
};
pub use output::{OutputError, write_wordlist};
pub use sink::CandidateSink;
pub use suffix::SuffixExpander;
pub use tokens::{ExtractWarning, Extraction, extract_tokens};
pub use variants::{VariantOptions, VariantStrategy, variants_of};
