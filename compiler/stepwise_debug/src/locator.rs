//! Source locator: editor line to statement node.

use stepwise_ir::{NodeId, NodeKind, SyntaxTree};

/// Find the smallest statement enclosing the first node that starts on
/// `line` (1-based).
///
/// Lines with no node of their own (blank lines, comments, the inside of a
/// multi-line expression that started earlier) are skipped forward until a
/// node starts, up to the tree's last line. The program node itself never
/// matches. Returns `None` past the end of the tree or when the tree has no
/// locations.
pub fn locate(tree: &SyntaxTree, line: u32) -> Option<NodeId> {
    let last_line = tree.last_line()?;
    for probe in line.max(1)..=last_line {
        let found = tree.find_post_order(|_, node| {
            !matches!(node.kind, NodeKind::Program { .. }) && node.start_line() == Some(probe)
        });
        if let Some(id) = found {
            let statement = tree.statement_of(id);
            tracing::trace!(line, probe, ?id, ?statement, "located");
            return statement;
        }
    }
    tracing::trace!(line, last_line, "no node at or after line");
    None
}
