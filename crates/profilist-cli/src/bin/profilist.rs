// profilist: Generate a password-audit wordlist from personal facts.
//
// The seed record comes from interactive prompts (-i), a JSON file (--seed),
// or the built-in example record when neither is given. Candidates passing
// the policy are written one per line, sorted, to the output file.
//
// Usage:
//   profilist [-i | --seed FILE] [-o FILE] [POLICY FLAGS] [GENERATION FLAGS]
//
// Run `profilist --help` for every option.

use std::io;

use clap::Parser;
use profilist_cli::{Args, describe, fatal, init_tracing, load_seed, prompt_seed};
use profilist_core::SeedRecord;
use profilist_engine::{Generator, write_wordlist};
use tracing::info;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let record = if args.interactive {
        prompt_seed(io::stdin().lock(), io::stdout()).unwrap_or_else(|e| fatal(&describe(&e)))
    } else if let Some(path) = &args.seed {
        load_seed(path).unwrap_or_else(|e| fatal(&describe(&e)))
    } else {
        info!("no seed given, using the built-in example record");
        SeedRecord::example()
    };

    let generator =
        Generator::new(args.generator_options()).unwrap_or_else(|e| fatal(&describe(&e)));
    let wordlist = generator.run(&record);

    write_wordlist(&args.output, wordlist.words()).unwrap_or_else(|e| fatal(&describe(&e)));

    println!(
        "{} candidates written to {}",
        wordlist.len(),
        args.output.display()
    );
    if wordlist.stats().truncated {
        println!(
            "note: output capped at {} candidates (first in sorted order); raise --max-candidates to keep more",
            args.max_candidates
        );
    }
}
