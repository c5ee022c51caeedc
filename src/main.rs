//! Main entry point for the mkcmd CLI tool

use clap::Parser;
use mkcmd::cli::{run_cli, Args};

fn main() {
    // Argument errors exit 1 like every other failure; clap's default
    // usage-error status is 2. --help and --version still exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run_cli(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
