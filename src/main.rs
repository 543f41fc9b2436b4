// src/main.rs
//
// vue-style-flatten — one-shot unnester for a component's scoped styles
//
// - Finds the first `<style lang="css" scoped>` ... `</style>` block.
// - Rewrites a fixed set of `&`-nested selectors into flat compound selectors:
//     • a regex pass for the first nested rule of each parent group,
//     • a literal pass (first occurrence only) for every nested rule.
// - Collapses `} } }` runs to one brace, then drops closers left without a
//   matching opener.
// - Everything outside the style block is written back unchanged.
//
// Prints exactly one status line. Exit status is non-zero only on I/O errors.
// Set RUST_LOG=debug to see which rules fired.

use clap::Parser;
use std::path::PathBuf;
use vue_style_flatten::{flatten_file, DEFAULT_TARGET};

/// CLI arguments
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input file
    #[arg(default_value = DEFAULT_TARGET)]
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match flatten_file(&cli.input, cli.output.as_deref()) {
        Ok(outcome) => println!("{}", outcome.message()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
