//! Halt predicates.
//!
//! The interpreter asks the predicate once per statement, before executing
//! it. The predicate is a parameter of each run rather than interpreter state.

use stepwise_ir::Node;

pub trait HaltPredicate {
    /// Whether execution should stop before `node` runs.
    fn should_halt(&self, node: &Node) -> bool;
}

/// Never halts.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverHalt;

impl HaltPredicate for NeverHalt {
    fn should_halt(&self, _node: &Node) -> bool {
        false
    }
}

/// Halts before the node tagged with `is_breakpoint`.
#[derive(Copy, Clone, Debug, Default)]
pub struct HaltAtBreakpoint;

impl HaltPredicate for HaltAtBreakpoint {
    fn should_halt(&self, node: &Node) -> bool {
        node.is_breakpoint
    }
}

impl<F: Fn(&Node) -> bool> HaltPredicate for F {
    fn should_halt(&self, node: &Node) -> bool {
        self(node)
    }
}

/// Why execution stopped without completing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HaltReason {
    Breakpoint,
    DebuggerStatement,
}

/// What a `debugger` statement does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DebuggerStatements {
    /// No-op.
    #[default]
    Ignore,
    /// Suspend execution as a continuation.
    Suspend,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_ir::{NodeKind, Span};

    fn statement(is_breakpoint: bool) -> Node {
        let mut node = Node::new(NodeKind::EmptyStatement, Span::new(0, 1));
        node.is_breakpoint = is_breakpoint;
        node
    }

    #[test]
    fn breakpoint_predicate_reads_the_tag() {
        assert!(HaltAtBreakpoint.should_halt(&statement(true)));
        assert!(!HaltAtBreakpoint.should_halt(&statement(false)));
        assert!(!NeverHalt.should_halt(&statement(true)));
    }

    #[test]
    fn closures_are_predicates() {
        let at_offset = |node: &Node| node.span.start == 0;
        assert!(at_offset.should_halt(&statement(false)));
    }
}
