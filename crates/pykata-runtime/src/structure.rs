//! Linked-structure building and invocation
//!
//! Tree-shaped test inputs arrive as constructor literals. The builder
//! binds each literal to an interpreter-side name, picks the call form,
//! runs it, and marshals the result. Two special paths:
//!
//! - A single literal whose expected value is a multi-key object is a
//!   traversal bundle: one call per key through the `<key>_traversal`
//!   naming convention, collected into one dict.
//! - Targets that need structurally-connected arguments (ancestry
//!   functions) cannot be handed freshly-constructed duplicates: two
//!   independently built literals with the same value are not the same
//!   object reference. For those, the scalar values of the 2nd and 3rd
//!   literal are located inside the first (root) structure with an
//!   interpreter-side search, and the located nodes are passed instead.

use serde_json::Value;
use tracing::debug;

use crate::classify::NODE_CONSTRUCTOR;
use crate::error::HarnessError;
use crate::marshal::{marshal, Marshaled};
use crate::scanner::scan_node_literals;
use crate::session::Session;

/// Functions whose arguments must be nodes that belong to the same
/// structure (reference identity matters, not value equality).
pub const CONNECTED_ARGUMENT_TARGETS: &[&str] = &["lowest_common_ancestor"];

/// Does this target need structurally-connected arguments?
pub fn needs_connected_arguments(function: &str) -> bool {
    CONNECTED_ARGUMENT_TARGETS.contains(&function)
}

/// Fallback node class, defined only when the submission did not bring
/// its own.
const NODE_CLASS_FALLBACK: &str = r#"
if 'TreeNode' not in globals():
    class TreeNode:
        def __init__(self, val=0, left=None, right=None):
            self.val = val
            self.left = left
            self.right = right

        def __repr__(self):
            return f"TreeNode({self.val})"

        def __str__(self):
            return f"TreeNode({self.val})"
"#;

/// Depth-first search for a node by value inside a built structure.
const LOCATE_HELPER: &str = r#"
def __kata_locate(root, target):
    if root is None:
        return None
    if root.val == target:
        return root
    found = __kata_locate(root.left, target)
    if found is not None:
        return found
    return __kata_locate(root.right, target)
"#;

/// Build the structures described by `input`, invoke `function`, and
/// marshal the result. `input` must already be literal-translated.
pub fn invoke_with_structures(
    session: &Session,
    function: &str,
    input: &str,
    expected: &Value,
) -> Result<Marshaled, HarnessError> {
    session.exec(NODE_CLASS_FALLBACK)?;

    let literals = scan_node_literals(input, NODE_CONSTRUCTOR);
    match literals.len() {
        0 => {
            // Constructor token without a parseable literal; let the
            // interpreter judge the text directly.
            let repr = session.eval_repr(&format!("{function}({input})"))?;
            Ok(marshal(repr))
        }
        1 => invoke_single(session, function, input, expected),
        _ => invoke_multiple(session, function, &literals),
    }
}

/// Single literal: bind the whole input text to one name, then call the
/// target on it — or, when the expected value is a multi-key object,
/// build the traversal-bundle call.
fn invoke_single(
    session: &Session,
    function: &str,
    input: &str,
    expected: &Value,
) -> Result<Marshaled, HarnessError> {
    session.exec(&format!("__kata_input = {input}"))?;

    let call = match expected {
        Value::Object(map) if map.len() > 1 => {
            let entries: Vec<String> = map
                .keys()
                .map(|key| format!("\"{key}\": {key}_traversal(__kata_input)"))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        _ => format!("{function}(__kata_input)"),
    };

    let repr = session.eval_repr(&call)?;
    Ok(marshal(repr))
}

/// Several literals: bind each to an indexed name and call the target
/// with all of them — or, for connected-argument targets, with nodes
/// located inside the first (root) structure.
fn invoke_multiple(
    session: &Session,
    function: &str,
    literals: &[crate::scanner::ParsedNodeLiteral],
) -> Result<Marshaled, HarnessError> {
    for (index, literal) in literals.iter().enumerate() {
        session.exec(&format!("__kata_node_{index} = {}", literal.text))?;
    }

    if literals.len() == 3 && needs_connected_arguments(function) {
        let p = leaf_value(&literals[1].text);
        let q = leaf_value(&literals[2].text);
        if let (Some(p), Some(q)) = (p, q) {
            session.exec(LOCATE_HELPER)?;
            session.exec(&format!(
                "__kata_p = __kata_locate(__kata_node_0, {p})\n__kata_q = __kata_locate(__kata_node_0, {q})"
            ))?;
            let call = format!("{function}(__kata_node_0, __kata_p, __kata_q)");
            return finish_node_call(session, &call);
        }
        debug!(function, "could not read leaf values, using the literals as-is");
    }

    let args: Vec<String> = (0..literals.len())
        .map(|index| format!("__kata_node_{index}"))
        .collect();
    let call = format!("{function}({})", args.join(", "));
    finish_node_call(session, &call)
}

/// Marshal a node-path call result. When the result is itself a
/// structural node (raw repr), re-run the call through `str()` and
/// compare the printable form instead.
fn finish_node_call(session: &Session, call: &str) -> Result<Marshaled, HarnessError> {
    let marshaled = marshal(session.eval_repr(call)?);
    if let Marshaled::Raw(ref raw) = marshaled {
        match session.eval_str(call) {
            Ok(Some(text)) => return Ok(Marshaled::Value(Value::String(text))),
            Ok(None) => {}
            Err(err) => {
                debug!(%err, raw = %raw, "str() of node result failed, keeping raw repr");
            }
        }
    }
    Ok(marshaled)
}

/// Scalar value of a single-value leaf literal, e.g. `TreeNode(5)`.
fn leaf_value(literal: &str) -> Option<i64> {
    literal
        .strip_prefix("TreeNode(")?
        .strip_suffix(')')?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_argument_targets() {
        assert!(needs_connected_arguments("lowest_common_ancestor"));
        assert!(!needs_connected_arguments("max_depth"));
        assert!(!needs_connected_arguments("inorder_traversal"));
    }

    #[test]
    fn test_leaf_value_reads_single_value_literals() {
        assert_eq!(leaf_value("TreeNode(5)"), Some(5));
        assert_eq!(leaf_value("TreeNode(-3)"), Some(-3));
        assert_eq!(leaf_value("TreeNode(5, TreeNode(6), None)"), None);
        assert_eq!(leaf_value("TreeNode()"), None);
    }

    #[test]
    fn test_fallback_node_class_defined_once() {
        let session = Session::new();
        session.exec(NODE_CLASS_FALLBACK).unwrap();
        session.exec("marker = TreeNode(7)").unwrap();
        // A second run must not clobber existing definitions.
        session.exec(NODE_CLASS_FALLBACK).unwrap();
        assert_eq!(
            session.eval_repr("marker").unwrap(),
            Some("TreeNode(7)".to_string())
        );
    }

    #[test]
    fn test_locate_helper_finds_inner_node() {
        let session = Session::new();
        session.exec(NODE_CLASS_FALLBACK).unwrap();
        session.exec(LOCATE_HELPER).unwrap();
        session
            .exec("root = TreeNode(1, TreeNode(2, TreeNode(4), None), TreeNode(3))")
            .unwrap();
        assert_eq!(
            session.eval_repr("__kata_locate(root, 4)").unwrap(),
            Some("TreeNode(4)".to_string())
        );
        assert_eq!(session.eval_repr("__kata_locate(root, 9)").unwrap(), None);
    }
}
