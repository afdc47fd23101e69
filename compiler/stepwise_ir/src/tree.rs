//! Flat syntax tree arena.
//!
//! The parser allocates children before their parents and calls
//! [`SyntaxTree::finish`] once the root is known; `finish` fills in the
//! parent links. After that the tree is immutable apart from the transient
//! breakpoint marker.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Node, NodeId, NodeKind, SourceType, Span};

/// Children of one node, in source order.
pub type ChildList = SmallVec<[NodeId; 4]>;

/// Parsed program.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    source_type: SourceType,
}

impl SyntaxTree {
    pub fn new(source_type: SourceType) -> Self {
        SyntaxTree {
            nodes: Vec::new(),
            root: None,
            source_type,
        }
    }

    /// Allocate a node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Set the root and compute parent links.
    pub fn finish(&mut self, root: NodeId) {
        self.root = Some(root);
        for index in 0..self.nodes.len() {
            let parent = NodeId::new(index as u32);
            for child in self.nodes[index].kind.children() {
                if let Some(node) = self.nodes.get_mut(child.index()) {
                    node.parent = Some(parent);
                }
            }
        }
    }

    /// The `Program` node. Panics in debug builds if called before `finish`.
    #[inline]
    pub fn root(&self) -> NodeId {
        debug_assert!(self.root.is_some(), "SyntaxTree::root() before finish()");
        self.root.unwrap_or(NodeId::new(0))
    }

    #[inline]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> ChildList {
        self.kind(id).children()
    }

    /// Iterate `(id, node)` in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }

    /// Last line covered by the program, if locations were recorded.
    pub fn last_line(&self) -> Option<u32> {
        self.node(self.root()).loc.map(|loc| loc.end.line)
    }

    /// Identifier name stored in an `Identifier` node.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Whether `id` sits in statement position.
    ///
    /// A `VariableDeclaration` used as the init clause of a `for` is a
    /// declaration node but not a statement of its own.
    pub fn is_statement(&self, id: NodeId) -> bool {
        let node = self.node(id);
        if !node.kind.is_statement() {
            return false;
        }
        match node.parent.map(|p| self.kind(p)) {
            Some(NodeKind::ForStatement { init, .. }) => *init != Some(id),
            _ => true,
        }
    }

    /// Smallest statement enclosing `id` (or `id` itself if it is one).
    pub fn statement_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.is_statement(candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// First node in post-order (children before parents, left to right)
    /// satisfying `pred`, starting from the root.
    pub fn find_post_order(&self, mut pred: impl FnMut(NodeId, &Node) -> bool) -> Option<NodeId> {
        let root = self.root?;
        // (node, children already pushed)
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                if pred(id, self.node(id)) {
                    return Some(id);
                }
                continue;
            }
            stack.push((id, true));
            for child in self.children(id).into_iter().rev() {
                stack.push((child, false));
            }
        }
        None
    }

    /// Every node reachable from the root in pre-order.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.children(id).into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Parent → children map over the reachable tree; leaves have no entry.
    pub fn children_map(&self) -> FxHashMap<NodeId, ChildList> {
        let mut map: FxHashMap<NodeId, ChildList> = FxHashMap::default();
        for id in self.pre_order() {
            let children = self.children(id);
            if !children.is_empty() {
                map.insert(id, children);
            }
        }
        map
    }

    /// Tag `id` so a breakpoint-aware halt predicate stops before it.
    pub fn set_breakpoint(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.is_breakpoint = true;
        }
    }

    /// Node currently tagged as the breakpoint target, if any.
    pub fn breakpoint(&self) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.is_breakpoint)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests;
