//! Validate and parse a file of lambda-calculus expressions and print the
//! results to standard output.
//!
//! Example usage:
//!
//!     cargo run -- \
//!         --mode-name parse_tree \
//!         --src-filepath test_programs/valid_examples.txt

use clap::Parser;
use rust_lambda_syntax::end_to_end::{run_on_lines, RunnerConfig};

fn main() {
    let runner_config = RunnerConfig::parse();

    let run_result = run_on_lines(&runner_config);

    match run_result {
        Ok(output) => {
            println!("{}", output);
        }

        Err(run_error) => {
            println!("{}", run_error);
        }
    }
}
