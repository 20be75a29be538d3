//! Code to configure and run the tokenizer and parse-tree builder over a
//! file of expression lines, one expression per line.

use std::fs;

use clap::Parser;

use crate::associativity::{add_associativity, Association};
use crate::lexical_analysis::{render_token_sequence, run_lexical_analysis};
use crate::recursive_descent_parsing::parse_recursive_descent;
use crate::tree_representation::tree_to_string;

/// Supported output modes.
pub const SUPPORTED_MODES: [&str; 2] = ["tokens", "parse_tree"];

/// Supported association choices for the optional disambiguation pass.
pub const SUPPORTED_ASSOCIATIONS: [&str; 2] = ["left", "right"];

/// Config for the runner. Instantiate via `RunnerConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct RunnerConfig {
    /// Which output to produce for each valid line. Must be present inside
    /// `SUPPORTED_MODES`.
    #[arg(short, long, default_value_t = String::from("tokens"))]
    pub mode_name: String,

    /// The input filepath to read expression lines from.
    #[arg(short, long)]
    pub src_filepath: String,

    /// Association choice applied to token sequences before further
    /// processing. Must be present inside `SUPPORTED_ASSOCIATIONS` when
    /// given.
    #[arg(short, long)]
    pub association: Option<String>,
}

/// Errors that may be thrown when running over an input file. Per-line
/// syntax and structural failures are not run errors; they are rendered into
/// the output and the run continues with the next line.
#[derive(Debug)]
pub enum RunError {
    ConfigError(String),
    InputFileError(std::io::Error),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(config_err_string) => {
                return write!(f, "Runner configuration error: {}", config_err_string);
            }

            Self::InputFileError(io_err) => {
                return write!(f, "Input file error: {}", io_err);
            }
        }
    }
}

/// Type conversions for errors.
impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputFileError(value);
    }
}

// Maps the configured association name to the pass's choice, if any.
fn parse_association_choice(config: &RunnerConfig) -> Result<Option<Association>, RunError> {
    match config.association.as_deref() {
        None => {
            return Ok(None);
        }
        Some("left") => {
            return Ok(Some(Association::Left));
        }
        Some("right") => {
            return Ok(Some(Association::Right));
        }
        Some(association_name) => {
            return Err(RunError::ConfigError(format!(
                "Unrecognized association name {}",
                association_name
            )));
        }
    };
}

/// Reads the lines of the given file, with trailing whitespace and newline
/// characters removed.
pub fn read_lines_from_file(filepath: &str) -> Result<Vec<String>, RunError> {
    let file_contents = fs::read_to_string(filepath)?;

    let lines = file_contents
        .lines()
        .map(|line| String::from(line.trim_end()))
        .collect();

    return Ok(lines);
}

/// Runs lexical analysis (and, in `parse_tree` mode, parse-tree building)
/// over every non-blank line of the configured input file, and renders one
/// report string. A failing line contributes its diagnostic and never aborts
/// the run.
pub fn run_on_lines(config: &RunnerConfig) -> Result<String, RunError> {
    if !SUPPORTED_MODES.contains(&config.mode_name.as_str()) {
        return Err(RunError::ConfigError(format!(
            "Unrecognized mode name {}",
            config.mode_name
        )));
    }

    let association_choice = parse_association_choice(config)?;
    let lines = read_lines_from_file(config.src_filepath.as_str())?;

    let mut out_lines: Vec<String> = Vec::new();
    let mut all_lines_valid = true;

    for line in &lines {
        if line.trim().is_empty() {
            continue;
        }

        let tokens = match run_lexical_analysis(line.as_str()) {
            Ok(tokens) => tokens,
            Err(syntax_error) => {
                all_lines_valid = false;
                out_lines.push(format!("Invalid input string {}: {}", line, syntax_error));
                continue;
            }
        };

        let tokens = match association_choice {
            Some(association) => add_associativity(&tokens, association),
            None => tokens,
        };

        if config.mode_name == "tokens" {
            out_lines.push(format!(
                "The tokenized string for input string {} is {}",
                line,
                render_token_sequence(&tokens)
            ));
            continue;
        }

        match parse_recursive_descent(&tokens) {
            Ok(tree) => {
                out_lines.push(format!(
                    "Parse tree for input string {}:\n{}",
                    line,
                    tree_to_string(&tree).trim_end()
                ));
            }

            Err(structural_error) => {
                all_lines_valid = false;
                out_lines.push(format!("Invalid input string {}: {}", line, structural_error));
            }
        };
    }

    if config.mode_name == "tokens" && all_lines_valid {
        out_lines.push(String::from("All lines are valid"));
    }

    return Ok(out_lines.join("\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a config pointing at one of the bundled example files.
    fn config_for(mode_name: &str, filepath: &str, association: Option<&str>) -> RunnerConfig {
        return RunnerConfig {
            mode_name: String::from(mode_name),
            src_filepath: String::from(filepath),
            association: association.map(String::from),
        };
    }

    // Test if a file of valid lines tokenizes cleanly end to end.
    #[test]
    fn test_run_tokens_mode_on_valid_examples() {
        let output = run_on_lines(&config_for(
            "tokens",
            "test_programs/valid_examples.txt",
            None,
        ))
        .expect("run_on_lines returned unexpected run error");

        assert!(output.contains("The tokenized string for input string"));
        assert!(output.ends_with("All lines are valid"));
    }

    // Test if invalid lines are reported without aborting the run.
    #[test]
    fn test_run_tokens_mode_on_invalid_examples() {
        let output = run_on_lines(&config_for(
            "tokens",
            "test_programs/invalid_examples.txt",
            None,
        ))
        .expect("run_on_lines returned unexpected run error");

        assert!(output.contains("Invalid input string"));
        assert!(!output.contains("All lines are valid"));
    }

    // Test if parse_tree mode renders indented trees for valid lines.
    #[test]
    fn test_run_parse_tree_mode_on_valid_examples() {
        let output = run_on_lines(&config_for(
            "parse_tree",
            "test_programs/valid_examples.txt",
            None,
        ))
        .expect("run_on_lines returned unexpected run error");

        assert!(output.contains("Parse tree for input string"));
        assert!(output.contains("Abstraction \\x"));
        assert!(output.contains("    Variable"));
    }

    // Test if the association pass makes wide applications parseable end to
    // end.
    #[test]
    fn test_run_parse_tree_mode_with_association() {
        let output = run_on_lines(&config_for(
            "parse_tree",
            "test_programs/wide_applications.txt",
            Some("left"),
        ))
        .expect("run_on_lines returned unexpected run error");

        assert!(output.contains("Application"));
        assert!(!output.contains("Invalid input string"));
    }

    // Test if an unrecognized mode name is a config error.
    #[test]
    fn test_run_unrecognized_mode() {
        let run_result = run_on_lines(&config_for(
            "beta_reduce",
            "test_programs/valid_examples.txt",
            None,
        ));

        assert!(matches!(run_result, Err(RunError::ConfigError(_))));
    }

    // Test if an unrecognized association name is a config error.
    #[test]
    fn test_run_unrecognized_association() {
        let run_result = run_on_lines(&config_for(
            "tokens",
            "test_programs/valid_examples.txt",
            Some("middle"),
        ));

        assert!(matches!(run_result, Err(RunError::ConfigError(_))));
    }

    // Test if a missing input file surfaces as an input file error.
    #[test]
    fn test_run_missing_input_file() {
        let run_result = run_on_lines(&config_for(
            "tokens",
            "test_programs/no_such_file.txt",
            None,
        ));

        assert!(matches!(run_result, Err(RunError::InputFileError(_))));
    }
}
