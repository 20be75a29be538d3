//! Optional disambiguation pass over token sequences. Re-emits the sequence
//! with explicit brackets inserted so that every scope holds at most two
//! sub-expressions (folded left or right per the chosen association) and
//! every abstraction body sits in its own scope. The output is exactly the
//! shape the recursive descent parser accepts.

use crate::lexical_analysis::{find_matching_rparen, Token, TokenSequence};

/// The two bracketing disciplines for folding multi-child scopes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Association {
    Left,
    Right,
}

// One top-level sub-expression of a scope interior, as a half-open token
// range.
#[derive(Debug, Clone, Copy)]
struct ChildSpan {
    lo: usize,
    hi: usize,
}

// Splits the scope interior [lo, hi) into its top-level sub-expression
// spans. A lambda whose binder is not followed by an opening bracket claims
// the rest of the scope as its body. Shapes the splitter does not recognize
// become single-token spans and are copied through untouched.
fn split_top_level_children(tokens: &Vec<Token>, lo: usize, hi: usize) -> Vec<ChildSpan> {
    let mut children = Vec::new();
    let mut curr_idx = lo;

    while curr_idx < hi {
        match tokens[curr_idx] {
            Token::Variable { .. } => {
                children.push(ChildSpan {
                    lo: curr_idx,
                    hi: curr_idx + 1,
                });
                curr_idx += 1;
            }

            Token::LParen => match find_matching_rparen(tokens, curr_idx) {
                Some(close_idx) if close_idx < hi => {
                    children.push(ChildSpan {
                        lo: curr_idx,
                        hi: close_idx + 1,
                    });
                    curr_idx = close_idx + 1;
                }
                _ => {
                    children.push(ChildSpan {
                        lo: curr_idx,
                        hi: curr_idx + 1,
                    });
                    curr_idx += 1;
                }
            },

            Token::Lambda => {
                let has_binder = matches!(tokens.get(curr_idx + 1), Some(Token::Variable { .. }))
                    && curr_idx + 1 < hi;

                if !has_binder {
                    children.push(ChildSpan {
                        lo: curr_idx,
                        hi: curr_idx + 1,
                    });
                    curr_idx += 1;
                    continue;
                }

                let paren_body_close = match tokens.get(curr_idx + 2) {
                    Some(Token::LParen) if curr_idx + 2 < hi => {
                        find_matching_rparen(tokens, curr_idx + 2).filter(|close_idx| *close_idx < hi)
                    }
                    _ => None,
                };

                match paren_body_close {
                    Some(close_idx) => {
                        children.push(ChildSpan {
                            lo: curr_idx,
                            hi: close_idx + 1,
                        });
                        curr_idx = close_idx + 1;
                    }
                    None => {
                        // Paren-less body: the abstraction extends as far
                        // right as its scope allows.
                        children.push(ChildSpan {
                            lo: curr_idx,
                            hi: hi,
                        });
                        curr_idx = hi;
                    }
                };
            }

            Token::RParen => {
                children.push(ChildSpan {
                    lo: curr_idx,
                    hi: curr_idx + 1,
                });
                curr_idx += 1;
            }
        };
    }

    return children;
}

// Emits one normalized child span.
fn emit_child(tokens: &Vec<Token>, span: ChildSpan, association: Association, out: &mut TokenSequence) {
    match tokens[span.lo] {
        Token::Variable { .. } => {
            out.push(tokens[span.lo].clone());
        }

        Token::LParen if span.hi - span.lo >= 2 => {
            out.push(Token::LParen);
            emit_interior(tokens, span.lo + 1, span.hi - 1, association, out);
            out.push(Token::RParen);
        }

        Token::Lambda if span.hi - span.lo >= 2 => {
            out.push(Token::Lambda);
            out.push(tokens[span.lo + 1].clone());

            let has_paren_body = span.hi - span.lo >= 3 && tokens[span.lo + 2] == Token::LParen;

            if has_paren_body {
                out.push(Token::LParen);
                emit_interior(tokens, span.lo + 3, span.hi - 1, association, out);
                out.push(Token::RParen);
            } else if span.lo + 2 < span.hi {
                // Wrap the paren-less body in a synthesized scope.
                out.push(Token::LParen);
                emit_interior(tokens, span.lo + 2, span.hi, association, out);
                out.push(Token::RParen);
            }
        }

        _ => {
            // Unrecognized shape; copy through and let the parser be the
            // arbiter of structure.
            for curr_idx in span.lo..span.hi {
                out.push(tokens[curr_idx].clone());
            }
        }
    };
}

// Emits the normalized form of the scope interior [lo, hi). Scopes with one
// or two sub-expressions are re-emitted as they are; wider scopes are folded
// into nested function/argument pairs.
fn emit_interior(
    tokens: &Vec<Token>,
    lo: usize,
    hi: usize,
    association: Association,
    out: &mut TokenSequence,
) {
    let children = split_top_level_children(tokens, lo, hi);
    let child_count = children.len();

    if child_count <= 2 {
        for child in children {
            emit_child(tokens, child, association, out);
        }
        return;
    }

    match association {
        Association::Left => {
            // c1 c2 ... cn becomes ((c1 c2) c3) ... cn.
            for _ in 0..child_count - 2 {
                out.push(Token::LParen);
            }

            emit_child(tokens, children[0], association, out);
            emit_child(tokens, children[1], association, out);
            out.push(Token::RParen);

            for curr_idx in 2..child_count - 1 {
                emit_child(tokens, children[curr_idx], association, out);
                out.push(Token::RParen);
            }

            emit_child(tokens, children[child_count - 1], association, out);
        }

        Association::Right => {
            // c1 c2 ... cn becomes c1 (c2 (... cn)).
            for curr_idx in 0..child_count - 2 {
                emit_child(tokens, children[curr_idx], association, out);
                out.push(Token::LParen);
            }

            emit_child(tokens, children[child_count - 2], association, out);
            emit_child(tokens, children[child_count - 1], association, out);

            for _ in 0..child_count - 2 {
                out.push(Token::RParen);
            }
        }
    };
}

/// Re-emits the given token sequence with brackets added so the expression
/// is unambiguous under the chosen association. Sequences whose scopes are
/// already at most binary come back unchanged.
pub fn add_associativity(tokens: &Vec<Token>, association: Association) -> TokenSequence {
    let mut out = Vec::new();
    emit_interior(tokens, 0, tokens.len(), association, &mut out);
    return out;
}

#[cfg(test)]
mod tests {
    use crate::lexical_analysis::run_lexical_analysis;
    use crate::recursive_descent_parsing::parse_recursive_descent;

    use super::*;

    // Runs the lexer on a known-valid input and panics otherwise.
    fn tokens_for(input: &str) -> Vec<Token> {
        return run_lexical_analysis(input)
            .expect("run_lexical_analysis returned unexpected syntax error");
    }

    // Normalizes the input under the given association, builds the result,
    // and returns the canonical bracketed form of the tree.
    fn canonical_after(input: &str, association: Association) -> String {
        let normalized = add_associativity(&tokens_for(input), association);
        let tree = parse_recursive_descent(&normalized)
            .expect("parse_recursive_descent returned unexpected structural error");

        return format!("{}", tree.root);
    }

    // Test if a three-term sequence folds left into nested pairs.
    #[test]
    fn test_left_association() {
        assert_eq!(canonical_after("a b c", Association::Left), "((a b) c)");
        assert_eq!(
            canonical_after("(a b c d)", Association::Left),
            "(((a b) c) d)"
        );
    }

    // Test if a three-term sequence folds right into nested pairs.
    #[test]
    fn test_right_association() {
        assert_eq!(canonical_after("a b c", Association::Right), "(a (b c))");
        assert_eq!(
            canonical_after("(a b c d)", Association::Right),
            "(a (b (c d)))"
        );
    }

    // Test if already-binary scopes come back unchanged.
    #[test]
    fn test_binary_scopes_unchanged() {
        let inputs = vec!["(x y)", r"\x.x", r"(\x.x) y"];

        for input in inputs {
            let tokens = tokens_for(input);

            assert_eq!(add_associativity(&tokens, Association::Left), tokens);
            assert_eq!(add_associativity(&tokens, Association::Right), tokens);
        }
    }

    // Test if a paren-less abstraction body is wrapped in a synthesized
    // scope, making the sequence parseable.
    #[test]
    fn test_wraps_bare_abstraction_body() {
        let normalized = add_associativity(&tokens_for(r"\x x"), Association::Left);

        assert_eq!(normalized, tokens_for(r"\x.x"));
        assert!(parse_recursive_descent(&normalized).is_ok());
    }

    // Test if a wide dot body is folded inside the abstraction's scope.
    #[test]
    fn test_folds_inside_abstraction_body() {
        assert_eq!(
            canonical_after(r"\x.x y z", Association::Left),
            r"\x(((x y) z))"
        );
    }
}
