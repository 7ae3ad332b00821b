// profilist-cli: argument parsing, seed collection and logging setup for the
// `profilist` binary.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use profilist_core::{Policy, SeedRecord, SubstitutionTable};
use profilist_engine::{DEFAULT_MAX_CANDIDATES, GeneratorOptions, VariantOptions};
use tracing_subscriber::EnvFilter;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "dictionary.txt";

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Build a password-audit wordlist from personal facts about a target.
#[derive(Debug, Clone, Parser)]
#[command(name = "profilist", version)]
pub struct Args {
    /// Prompt for each seed field on the terminal.
    #[arg(short, long, conflicts_with = "seed")]
    pub interactive: bool,

    /// Read the seed record from a JSON file.
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Where to write the wordlist.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Minimum candidate length in characters.
    #[arg(long, value_name = "N", default_value_t = 8)]
    pub min_length: usize,

    /// Keep only candidates with an uppercase letter.
    #[arg(long)]
    pub require_upper: bool,

    /// Keep only candidates with a lowercase letter.
    #[arg(long)]
    pub require_lower: bool,

    /// Keep only candidates with a digit.
    #[arg(long)]
    pub require_digit: bool,

    /// Keep only candidates with a special character.
    #[arg(long)]
    pub require_special: bool,

    /// Join at most this many variants into one candidate (1-3).
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub max_depth: u8,

    /// Append the numbers 0..=N to every combined candidate.
    #[arg(long, value_name = "N", default_value_t = 99, conflicts_with = "no_suffix")]
    pub max_suffix: u32,

    /// Do not append numeric suffixes.
    #[arg(long)]
    pub no_suffix: bool,

    /// Keep at most N candidates (the first N in sorted order). Memory use
    /// grows with N.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CANDIDATES)]
    pub max_candidates: usize,

    /// Worker threads (0 = one per CPU).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub workers: usize,

    /// Leetspeak table, e.g. `a=@4,e=3` (default: a=@4,e=3,i=1!,l=1|,o=0,s=$5).
    #[arg(long, value_name = "TABLE")]
    pub substitutions: Option<SubstitutionTable>,

    /// Characters to prepend and append to each lowercase token.
    #[arg(long, value_name = "CHARS")]
    pub affix_chars: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The composition rules selected on the command line.
    pub fn policy(&self) -> Policy {
        Policy {
            min_length: self.min_length,
            require_upper: self.require_upper,
            require_lower: self.require_lower,
            require_digit: self.require_digit,
            require_special: self.require_special,
        }
    }

    /// Generator options selected on the command line.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            policy: self.policy(),
            substitutions: self.substitutions.clone().unwrap_or_default(),
            variants: VariantOptions {
                affix_chars: self
                    .affix_chars
                    .as_deref()
                    .map(|chars| chars.chars().collect())
                    .unwrap_or_default(),
            },
            max_depth: self.max_depth,
            suffixes: (!self.no_suffix).then_some(0..=self.max_suffix),
            max_candidates: Some(self.max_candidates),
            workers: self.workers,
        }
    }
}

// ---------------------------------------------------------------------------
// Seed input
// ---------------------------------------------------------------------------

/// Error type for obtaining a seed record.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot read seed file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid seed file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read seed fields from the terminal")]
    Prompt(#[source] io::Error),
}

/// Load a seed record from a JSON file.
///
/// Every field is optional; unknown fields are rejected so a typo does not
/// silently drop a fact.
pub fn load_seed(path: &Path) -> Result<SeedRecord, SeedError> {
    let text = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Ask for every seed field on `output`, reading answers from `input`.
///
/// Single-valued fields take the whole line; list fields are split on
/// commas. An empty answer (or end of input) leaves the field blank.
pub fn prompt_seed<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<SeedRecord, SeedError> {
    let mut ask = |label: &str| -> Result<String, SeedError> {
        write!(output, "{label}: ").map_err(SeedError::Prompt)?;
        output.flush().map_err(SeedError::Prompt)?;
        let mut line = String::new();
        input.read_line(&mut line).map_err(SeedError::Prompt)?;
        Ok(line.trim().to_string())
    };

    let mut record = SeedRecord {
        name: non_blank(ask("Name")?),
        surname: non_blank(ask("Surname")?),
        nickname: non_blank(ask("Nickname")?),
        pet: non_blank(ask("Pet name")?),
        partner: non_blank(ask("Partner name")?),
        birthplace: non_blank(ask("Birthplace")?),
        birthdate: non_blank(ask("Birthdate (DD/MM/YYYY)")?),
        ..SeedRecord::default()
    };
    record.relatives = split_list(&ask("Relatives (comma-separated)")?);
    record.hobbies = split_list(&ask("Hobbies (comma-separated)")?);
    record.events = split_list(&ask("Important events (comma-separated)")?);
    Ok(record)
}

fn non_blank(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn split_list<C: FromIterator<String>>(line: &str) -> C {
    line.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Process helpers
// ---------------------------------------------------------------------------

/// Install the global `tracing` subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level
/// (0 warn, 1 info, 2 debug, 3+ trace).
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be set (tests); the first one stays.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Render an error with its chain of causes: `outer: cause: root`.
pub fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
