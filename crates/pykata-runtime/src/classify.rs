//! Call-shape classification
//!
//! A test case's input text does not come with a schema: the call shape
//! has to be inferred from the text itself. The classifier is a closed
//! four-variant enum with documented precedence instead of ad-hoc nested
//! conditionals, so the dispatch in the evaluator stays exhaustive.

/// Constructor token that marks a linked-structure (tree) input.
pub const NODE_CONSTRUCTOR: &str = "TreeNode";

/// The constructor token as it appears at a call site.
const NODE_CALL: &str = "TreeNode(";

/// How a test-case input should be turned into a call expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Brace-delimited mapping literal, passed as one dict argument.
    Mapping,
    /// Contains node-constructor literals; arguments are built
    /// interpreter-side before the call.
    LinkedStructure,
    /// Comma-separated positional arguments.
    MultiArgument,
    /// Everything else: one argument, passed through verbatim.
    SingleArgument,
}

/// Classify an input text. Precedence, first match wins:
///
/// 1. Mapping — trimmed text starts with `{` and ends with `}`. A
///    mapping literal containing a node-constructor token is still a
///    mapping (this check runs first).
/// 2. LinkedStructure — the node-constructor token appears anywhere.
/// 3. MultiArgument — the text contains a comma and does not start with
///    `[`. A leading `[` is assumed to be a single list argument even
///    when the list has internal commas.
/// 4. SingleArgument — default.
pub fn classify(input: &str) -> CallShape {
    let trimmed = input.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return CallShape::Mapping;
    }
    if input.contains(NODE_CALL) {
        return CallShape::LinkedStructure;
    }
    if input.contains(',') && !trimmed.starts_with('[') {
        return CallShape::MultiArgument;
    }
    CallShape::SingleArgument
}
