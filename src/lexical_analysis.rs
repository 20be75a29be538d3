//! Tokenizer/validator for single-line lambda-calculus expressions.
//!
//! Validation scans the character sequence once, left to right, and reports
//! the first rule violation together with the offending character index.
//! Valid input is then desugared into a flat token sequence in which every
//! dot-introduced abstraction body has been rewritten as an explicit
//! parenthesized scope.

use lazy_static::lazy_static;
use regex::Regex;

/// Represents a single token of the expression language. Scope delimiters
/// produced by desugaring a dot are indistinguishable from literal ones.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Variable { var_name: String },
    Lambda,
    LParen,
    RParen,
}

/// Represents the token sequence produced for one valid expression line.
pub type TokenSequence = Vec<Token>;

/// Display trait implementation for Token.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable { var_name } => {
                return write!(f, "{}", var_name);
            }
            Self::Lambda => {
                return write!(f, "\\");
            }
            Self::LParen => {
                return write!(f, "(");
            }
            Self::RParen => {
                return write!(f, ")");
            }
        }
    }
}

/// The different classes of syntax violations the validator can report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SyntaxErrorKind {
    InvalidVariableName,
    InvalidToken,
    AbstractionMissingVariable,
    AbstractionSpaceAfterMarker,
    AbstractionInvalidContinuation,
    EmptyGroup,
    DotAtStart,
    DotWithoutPrecedingVariable,
    UnmatchedOpenParen,
    UnmatchedCloseParen,
}

/// Represents a syntax violation at a specific character index of the input
/// line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub index: usize,
}

/// Display trait implementation for SyntaxError.
impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SyntaxErrorKind::InvalidVariableName => {
                return write!(f, "Invalid variable name starting at index {}.", self.index);
            }
            SyntaxErrorKind::InvalidToken => {
                return write!(f, "Invalid token at index {}.", self.index);
            }
            SyntaxErrorKind::AbstractionMissingVariable => {
                return write!(
                    f,
                    "Abstraction marker must be followed by a valid variable at index {}.",
                    self.index
                );
            }
            SyntaxErrorKind::AbstractionSpaceAfterMarker => {
                return write!(
                    f,
                    "Invalid space after abstraction marker at index {}.",
                    self.index
                );
            }
            SyntaxErrorKind::AbstractionInvalidContinuation => {
                return write!(f, "Invalid abstraction expression at index {}.", self.index);
            }
            SyntaxErrorKind::EmptyGroup => {
                return write!(f, "Missing expression at index {}.", self.index);
            }
            SyntaxErrorKind::DotAtStart => {
                return write!(f, "Dot encountered at invalid index {}.", self.index);
            }
            SyntaxErrorKind::DotWithoutPrecedingVariable => {
                return write!(f, "Must have a variable before dot at index {}.", self.index);
            }
            SyntaxErrorKind::UnmatchedOpenParen => {
                return write!(
                    f,
                    "Opening bracket at index {} is not matched with a closing bracket.",
                    self.index
                );
            }
            SyntaxErrorKind::UnmatchedCloseParen => {
                return write!(
                    f,
                    "Closing bracket at index {} is not matched with an opening bracket.",
                    self.index
                );
            }
        }
    }
}

// Represents one currently-open bracketing scope during desugaring. A literal
// ')' always closes the most recently opened frame regardless of its tag;
// every frame still open at end of input is closed with a synthesized RParen.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum ScopeFrame {
    Explicit,
    Implicit,
}

// Regex pattern that recognizes a valid variable name: a letter followed by
// any run of letters and digits.
lazy_static! {
    static ref var_name_rule: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$")
        .expect("Unable to compile variable name rule regex.");
}

/// Returns true if the candidate is a valid variable name, i.e. it starts
/// with a letter and contains only letters and digits.
pub fn is_valid_var_name(candidate: &str) -> bool {
    return var_name_rule.is_match(candidate);
}

// Returns the index one past the end of the maximal letter/digit run that
// starts at start_idx.
fn scan_name_run(chars: &Vec<char>, start_idx: usize) -> usize {
    let mut end_idx = start_idx;

    while end_idx < chars.len() && chars[end_idx].is_ascii_alphanumeric() {
        end_idx += 1;
    }

    return end_idx;
}

// Checks the abstraction marker at marker_idx: it must be followed
// immediately by a valid variable name, and the character after that name
// must open the body ('(' or '.') or be a space.
fn validate_abstraction_marker(chars: &Vec<char>, marker_idx: usize) -> Result<(), SyntaxError> {
    if marker_idx + 1 == chars.len() {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::AbstractionMissingVariable,
            index: marker_idx,
        });
    }

    if chars[marker_idx + 1].is_whitespace() {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::AbstractionSpaceAfterMarker,
            index: marker_idx,
        });
    }

    if !chars[marker_idx + 1].is_ascii_alphabetic() {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::AbstractionMissingVariable,
            index: marker_idx + 1,
        });
    }

    let name_end_idx = scan_name_run(chars, marker_idx + 1);

    if name_end_idx == chars.len() {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::AbstractionInvalidContinuation,
            index: marker_idx,
        });
    }

    match chars[name_end_idx] {
        '(' | '.' | ' ' => {
            return Ok(());
        }
        _ => {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::AbstractionInvalidContinuation,
                index: marker_idx,
            });
        }
    };
}

// Runs all validation rules over the character sequence in one left-to-right
// pass, failing on the first violation.
fn validate_expression(chars: &Vec<char>) -> Result<(), SyntaxError> {
    // Indices of '(' characters whose closing bracket has not been seen yet.
    let mut open_bracket_indices: Vec<usize> = Vec::new();

    let mut curr_idx = 0;

    while curr_idx < chars.len() {
        let curr_char = chars[curr_idx];

        if curr_char.is_whitespace() {
            curr_idx += 1;
        } else if curr_char.is_ascii_alphanumeric() {
            // A maximal letter/digit run is one candidate name; a run that
            // starts with a digit fails the name rule as a whole.
            let name_end_idx = scan_name_run(chars, curr_idx);
            let candidate: String = chars[curr_idx..name_end_idx].iter().collect();

            match is_valid_var_name(candidate.as_str()) {
                true => {
                    curr_idx = name_end_idx;
                }
                false => {
                    return Err(SyntaxError {
                        kind: SyntaxErrorKind::InvalidVariableName,
                        index: curr_idx,
                    });
                }
            };
        } else if curr_char == '\\' {
            validate_abstraction_marker(chars, curr_idx)?;
            curr_idx += 1;
        } else if curr_char == '(' {
            if curr_idx + 1 < chars.len() && chars[curr_idx + 1] == ')' {
                return Err(SyntaxError {
                    kind: SyntaxErrorKind::EmptyGroup,
                    index: curr_idx,
                });
            }

            open_bracket_indices.push(curr_idx);
            curr_idx += 1;
        } else if curr_char == ')' {
            if open_bracket_indices.pop().is_none() {
                return Err(SyntaxError {
                    kind: SyntaxErrorKind::UnmatchedCloseParen,
                    index: curr_idx,
                });
            }

            curr_idx += 1;
        } else if curr_char == '.' {
            if curr_idx == 0 {
                return Err(SyntaxError {
                    kind: SyntaxErrorKind::DotAtStart,
                    index: 0,
                });
            }

            if !chars[curr_idx - 1].is_ascii_alphanumeric() {
                return Err(SyntaxError {
                    kind: SyntaxErrorKind::DotWithoutPrecedingVariable,
                    index: curr_idx - 1,
                });
            }

            curr_idx += 1;
        } else {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::InvalidToken,
                index: curr_idx,
            });
        }
    }

    if let Some(&earliest_unmatched_idx) = open_bracket_indices.first() {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::UnmatchedOpenParen,
            index: earliest_unmatched_idx,
        });
    }

    return Ok(());
}

// Desugars a validated character sequence into tokens. Every '.' opens an
// implicit scope that behaves like an ordinary '(' once pushed on the frame
// stack, so the number of synthesized closers at end of input is exactly the
// remaining stack depth.
fn desugar_to_tokens(chars: &Vec<char>) -> TokenSequence {
    let mut tokens: TokenSequence = Vec::new();
    let mut scope_stack: Vec<ScopeFrame> = Vec::new();

    let mut curr_idx = 0;

    while curr_idx < chars.len() {
        let curr_char = chars[curr_idx];

        if curr_char.is_whitespace() {
            curr_idx += 1;
        } else if curr_char.is_ascii_alphanumeric() {
            let name_end_idx = scan_name_run(chars, curr_idx);

            tokens.push(Token::Variable {
                var_name: chars[curr_idx..name_end_idx].iter().collect(),
            });
            curr_idx = name_end_idx;
        } else if curr_char == '\\' {
            tokens.push(Token::Lambda);
            curr_idx += 1;
        } else if curr_char == '(' {
            scope_stack.push(ScopeFrame::Explicit);
            tokens.push(Token::LParen);
            curr_idx += 1;
        } else if curr_char == '.' {
            // The dot itself is not emitted; it becomes the opening bracket
            // of its own desugared scope.
            scope_stack.push(ScopeFrame::Implicit);
            tokens.push(Token::LParen);
            curr_idx += 1;
        } else {
            // ')' is the only remaining character class after validation.
            scope_stack.pop();
            tokens.push(Token::RParen);
            curr_idx += 1;
        }
    }

    while scope_stack.pop().is_some() {
        tokens.push(Token::RParen);
    }

    return tokens;
}

/// Validates one raw expression line and, on success, returns its token
/// sequence with dot-sugar expanded into explicit scope delimiters. Fails
/// with a `SyntaxError` on the first rule violation; no partial token
/// sequence is returned.
pub fn run_lexical_analysis(expression_str: &str) -> Result<TokenSequence, SyntaxError> {
    let chars: Vec<char> = expression_str.chars().collect();

    validate_expression(&chars)?;

    return Ok(desugar_to_tokens(&chars));
}

/// Joins the string forms of the given tokens with an underscore, the
/// display convention for tokenized lines.
pub fn render_token_sequence(tokens: &[Token]) -> String {
    let token_strings: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();

    return token_strings.join("_");
}

/// Finds the index of the `RParen` matching the `LParen` at open_idx by
/// counting nested pairs. Returns None if the sequence is not balanced or
/// open_idx does not hold an `LParen`.
pub fn find_matching_rparen(tokens: &[Token], open_idx: usize) -> Option<usize> {
    if tokens.get(open_idx) != Some(&Token::LParen) {
        return None;
    }

    let mut depth = 0;

    for curr_idx in open_idx..tokens.len() {
        match tokens[curr_idx] {
            Token::LParen => {
                depth += 1;
            }
            Token::RParen => {
                depth -= 1;

                if depth == 0 {
                    return Some(curr_idx);
                }
            }
            _ => {}
        };
    }

    return None;
}
