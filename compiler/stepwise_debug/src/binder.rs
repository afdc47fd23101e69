//! Breakpoint binder: editor gutter row to a tagged statement and the halt
//! predicate for the run.

use stepwise_eval::{HaltAtBreakpoint, HaltPredicate, NeverHalt};
use stepwise_ir::{NodeId, SyntaxTree};

use crate::locator::locate;

/// Result of binding the editor breakpoint to a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// No breakpoint set, or nothing executable at or after it.
    Unbound,
    /// The statement tagged as the breakpoint.
    Bound(NodeId),
}

impl Binding {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Binding::Unbound => None,
            Binding::Bound(id) => Some(id),
        }
    }

    /// Predicate to pass to the run.
    pub fn halt_predicate(self) -> &'static dyn HaltPredicate {
        match self {
            Binding::Unbound => &NeverHalt,
            Binding::Bound(_) => &HaltAtBreakpoint,
        }
    }
}

/// Tag the statement for the 0-based editor row `breakpoint_row`.
pub fn bind(tree: &mut SyntaxTree, breakpoint_row: Option<usize>) -> Binding {
    let Some(row) = breakpoint_row else {
        return Binding::Unbound;
    };
    let line = u32::try_from(row).map_or(u32::MAX, |row| row.saturating_add(1));
    match locate(tree, line) {
        Some(id) => {
            tree.set_breakpoint(id);
            tracing::debug!(row, ?id, "breakpoint bound");
            Binding::Bound(id)
        }
        None => {
            tracing::debug!(row, "breakpoint has no statement; ignored");
            Binding::Unbound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stepwise_ir::{Node, NodeKind, Span};
    use stepwise_parse::{parse, ParseOptions};

    fn tree(source: &str) -> SyntaxTree {
        parse(source, ParseOptions::default()).unwrap()
    }

    #[test]
    fn rows_are_zero_based() {
        let mut tree = tree("var a = 1;\nvar b = 2;");
        let binding = bind(&mut tree, Some(1));
        let id = binding.node().unwrap();
        assert_eq!(tree.node(id).start_line(), Some(2));
        assert_eq!(tree.breakpoint(), Some(id));
    }

    #[test]
    fn no_breakpoint_never_halts() {
        let mut tree = tree("var a = 1;");
        let binding = bind(&mut tree, None);
        assert_eq!(binding, Binding::Unbound);
        assert_eq!(tree.breakpoint(), None);
        let mut tagged = Node::new(NodeKind::EmptyStatement, Span::new(0, 1));
        tagged.is_breakpoint = true;
        assert!(!binding.halt_predicate().should_halt(&tagged));
    }

    #[test]
    fn breakpoint_past_end_is_ignored() {
        let mut tree = tree("var a = 1;");
        assert_eq!(bind(&mut tree, Some(5)), Binding::Unbound);
        assert_eq!(tree.breakpoint(), None);
    }

    #[test]
    fn bound_predicate_halts_only_on_tagged_node() {
        let mut tree = tree("var a = 1;\nvar b = 2;");
        let binding = bind(&mut tree, Some(0));
        let halt = binding.halt_predicate();
        let hits: Vec<NodeId> = tree
            .iter()
            .filter(|(_, node)| halt.should_halt(node))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, vec![binding.node().unwrap()]);
    }
}
