//! Data structures to represent lambda-calculus parse trees, and utility
//! functions to display them.

/// Represents one vertex of a parse tree, owning exactly the children its
/// production allows.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Node {
    Variable {
        var_name: String,
    },
    Abstraction {
        bound_var: String,
        body: Box<Node>,
    },
    Application {
        function: Box<Node>,
        argument: Box<Node>,
    },
}

/// A full parse tree. Built once from a validated token sequence and
/// read-only thereafter.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseTree {
    pub root: Node,
}

// Helper function to produce the canonical fully bracketed string form of a
// Node.
fn node_to_string_helper(node: &Node, string_so_far: &mut String) {
    match node {
        Node::Variable { var_name } => {
            string_so_far.push_str(var_name.as_str());
        }
        Node::Abstraction { bound_var, body } => {
            string_so_far.push_str(format!("\\{}(", bound_var.as_str()).as_str());
            node_to_string_helper(body, string_so_far);
            string_so_far.push(')');
        }
        Node::Application { function, argument } => {
            string_so_far.push('(');
            node_to_string_helper(function, string_so_far);
            string_so_far.push(' ');
            node_to_string_helper(argument, string_so_far);
            string_so_far.push(')');
        }
    };
}

// Converts a Node to its canonical fully bracketed string form.
pub fn node_to_string(node: &Node) -> String {
    let mut out_string = String::new();
    node_to_string_helper(node, &mut out_string);
    return out_string;
}

/// Display trait implementation for Node using the canonical bracketed form.
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", node_to_string(self).as_str());
    }
}

// Helper function to produce the indented diagnostic rendering, one line per
// node with four spaces of indentation per depth level.
fn tree_to_string_helper(node: &Node, level: usize, string_so_far: &mut String) {
    let indent = "    ".repeat(level);

    match node {
        Node::Variable { var_name } => {
            string_so_far.push_str(format!("{}Variable {}\n", indent, var_name).as_str());
        }
        Node::Abstraction { bound_var, body } => {
            string_so_far.push_str(format!("{}Abstraction \\{}\n", indent, bound_var).as_str());
            tree_to_string_helper(body, level + 1, string_so_far);
        }
        Node::Application { function, argument } => {
            string_so_far.push_str(format!("{}Application\n", indent).as_str());
            tree_to_string_helper(function, level + 1, string_so_far);
            tree_to_string_helper(argument, level + 1, string_so_far);
        }
    };
}

/// Converts a ParseTree to its indented diagnostic rendering. The exact
/// formatting is not part of the compatibility surface.
pub fn tree_to_string(tree: &ParseTree) -> String {
    let mut out_string = String::new();
    tree_to_string_helper(&tree.root, 0, &mut out_string);
    return out_string;
}

impl ParseTree {
    /// Prints the indented rendering of this tree to standard output.
    pub fn print_tree(&self) {
        print!("{}", tree_to_string(self));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds the tree for (\x.x) y by hand.
    fn sample_tree() -> ParseTree {
        return ParseTree {
            root: Node::Application {
                function: Box::new(Node::Abstraction {
                    bound_var: String::from("x"),
                    body: Box::new(Node::Variable {
                        var_name: String::from("x"),
                    }),
                }),
                argument: Box::new(Node::Variable {
                    var_name: String::from("y"),
                }),
            },
        };
    }

    // Test the canonical bracketed rendering of a tree.
    #[test]
    fn test_node_to_string() {
        let expected_output = r"(\x(x) y)";

        assert_eq!(format!("{}", sample_tree().root), expected_output);
    }

    // Test the indented diagnostic rendering of a tree.
    #[test]
    fn test_tree_to_string() {
        let expected_output = "Application\n    Abstraction \\x\n        Variable x\n    Variable y\n";

        assert_eq!(tree_to_string(&sample_tree()), expected_output);
    }
}
