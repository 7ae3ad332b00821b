//! Shared value types for profilist.
//!
//! Everything in this crate is plain configuration or input data: it is
//! built once per run, never mutated afterwards, and passed explicitly into
//! the generation engine.
//!
//! - [`seed`] -- the personal-fact record a run starts from
//! - [`substitution`] -- the leetspeak substitution table
//! - [`policy`] -- password composition rules
//! - [`character`] -- character classes used by the policy checks
//! - [`case`] -- case forms applied to seed tokens

pub mod case;
pub mod character;
pub mod policy;
pub mod seed;
pub mod substitution;

pub use case::CaseForm;
pub use policy::Policy;
pub use seed::SeedRecord;
pub use substitution::{SubstitutionParseError, SubstitutionTable};
