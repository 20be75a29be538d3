//! Recursive descent parser that builds a lambda-calculus parse tree from a
//! balanced token sequence produced by lexical analysis.

use std::fmt::Display;

use crate::lexical_analysis::{find_matching_rparen, Token};
use crate::tree_representation::{Node, ParseTree};

/// Maximum scope nesting depth accepted by the parser. Deeper input is
/// rejected with a `StructuralError` instead of growing the call stack
/// without bound.
pub const MAX_EXPRESSION_DEPTH: usize = 512;

/// Represents a parse-tree construction error: the token sequence passed
/// bracket balancing but does not match any production of the grammar. The
/// index is the position of the offending token.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StructuralError {
    pub index: usize,
}

/// Display trait implementation for StructuralError.
impl Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(
            f,
            "Token sequence does not form a well-formed expression at token index {}.",
            self.index
        );
    }
}

/// Tries to parse one complete sub-expression starting at tokens[start_idx],
/// staying inside the half-open range [start_idx, end_idx). Returns the
/// parsed node and the index one past its last token.
fn try_expression_rule(
    tokens: &Vec<Token>,
    start_idx: usize,
    end_idx: usize,
    depth: usize,
) -> Result<(Node, usize), StructuralError> {
    if start_idx >= end_idx {
        return Err(StructuralError { index: start_idx });
    }

    match &tokens[start_idx] {
        Token::Variable { var_name } => {
            return Ok((
                Node::Variable {
                    var_name: var_name.clone(),
                },
                start_idx + 1,
            ));
        }

        Token::Lambda => {
            return try_abstraction_rule(tokens, start_idx, end_idx, depth);
        }

        Token::LParen => {
            return try_group_rule(tokens, start_idx, end_idx, depth);
        }

        Token::RParen => {
            return Err(StructuralError { index: start_idx });
        }
    };
}

/// Tries to parse an expression that looks like `\[VARIABLE]([BODY])`, where
/// the opening bracket immediately follows the bound variable.
fn try_abstraction_rule(
    tokens: &Vec<Token>,
    start_idx: usize,
    end_idx: usize,
    depth: usize,
) -> Result<(Node, usize), StructuralError> {
    let bound_var = match tokens.get(start_idx + 1) {
        Some(Token::Variable { var_name }) if start_idx + 1 < end_idx => var_name.clone(),
        _ => {
            return Err(StructuralError {
                index: start_idx + 1,
            });
        }
    };

    if start_idx + 2 >= end_idx || tokens[start_idx + 2] != Token::LParen {
        return Err(StructuralError {
            index: start_idx + 2,
        });
    }

    let close_idx = match find_matching_rparen(tokens, start_idx + 2) {
        Some(close_idx) if close_idx < end_idx => close_idx,
        _ => {
            return Err(StructuralError {
                index: start_idx + 2,
            });
        }
    };

    let body = parse_scope_interior(tokens, start_idx + 3, close_idx, depth + 1)?;

    return Ok((
        Node::Abstraction {
            bound_var: bound_var,
            body: Box::new(body),
        },
        close_idx + 1,
    ));
}

/// Tries to parse an expression that looks like `([INTERIOR])`. Grouping is
/// transparent: the group denotes whatever its interior builds to.
fn try_group_rule(
    tokens: &Vec<Token>,
    start_idx: usize,
    end_idx: usize,
    depth: usize,
) -> Result<(Node, usize), StructuralError> {
    let close_idx = match find_matching_rparen(tokens, start_idx) {
        Some(close_idx) if close_idx < end_idx => close_idx,
        _ => {
            return Err(StructuralError { index: start_idx });
        }
    };

    let interior = parse_scope_interior(tokens, start_idx + 1, close_idx, depth + 1)?;

    return Ok((interior, close_idx + 1));
}

/// Parses the interior of one scope, the half-open token range [lo, hi). A
/// scope holds exactly one complete sub-expression, or exactly two forming a
/// function/argument pair; anything else is a structural error.
fn parse_scope_interior(
    tokens: &Vec<Token>,
    lo: usize,
    hi: usize,
    depth: usize,
) -> Result<Node, StructuralError> {
    if depth > MAX_EXPRESSION_DEPTH {
        return Err(StructuralError { index: lo });
    }

    let (first_expr, next_idx) = try_expression_rule(tokens, lo, hi, depth)?;

    if next_idx == hi {
        return Ok(first_expr);
    }

    let (second_expr, next_idx) = try_expression_rule(tokens, next_idx, hi, depth)?;

    if next_idx < hi {
        // A third sub-expression remains; unparenthesized multi-argument
        // application is not part of the grammar.
        return Err(StructuralError { index: next_idx });
    }

    return Ok(Node::Application {
        function: Box::new(first_expr),
        argument: Box::new(second_expr),
    });
}

/// Uses recursive descent to parse the given token sequence into a
/// `ParseTree`. The whole sequence is treated as the interior of an implicit
/// outermost scope, so a bare `x y` line and a desugared dot body build the
/// same way.
///
/// Assumes the sequence is balanced, as guaranteed by lexical analysis; an
/// empty sequence is rejected.
pub fn parse_recursive_descent(tokens: &Vec<Token>) -> Result<ParseTree, StructuralError> {
    let root = parse_scope_interior(tokens, 0, tokens.len(), 0)?;

    return Ok(ParseTree { root: root });
}
