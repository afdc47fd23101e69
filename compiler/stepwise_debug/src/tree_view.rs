//! Syntax tree view.
//!
//! Holds the last displayed tree with its parent → children map, renders an
//! indented outline, and mirrors hover over a node as a source marker.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use serde::Serialize;
use stepwise_ir::{format_number, ChildList, Literal, NodeId, NodeKind, SyntaxTree};

use crate::editor::{Editor, MarkerId, MarkerType};
use crate::translator::{span_to_range, OffsetBase};

/// A parent → child link for the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
}

#[derive(Default)]
pub struct TreeView {
    tree: Option<SyntaxTree>,
    children: FxHashMap<NodeId, ChildList>,
    hover_marker: Option<MarkerId>,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed tree.
    pub fn display(&mut self, tree: SyntaxTree) {
        self.children = tree.children_map();
        tracing::trace!(nodes = tree.len(), parents = self.children.len(), "tree displayed");
        self.tree = Some(tree);
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map_or(&[], |children| children.as_slice())
    }

    /// Links in pre-order.
    pub fn edges(&self) -> Vec<Edge> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.pre_order()
            .into_iter()
            .flat_map(|parent| {
                self.children(parent)
                    .iter()
                    .map(move |&child| Edge { parent, child })
            })
            .collect()
    }

    /// One line per node, indented two spaces per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(tree) = &self.tree {
            self.write_outline(tree, tree.root(), 0, &mut out);
        }
        out
    }

    fn write_outline(&self, tree: &SyntaxTree, id: NodeId, depth: usize, out: &mut String) {
        stepwise_stack::ensure_sufficient_stack(|| {
            let _ = writeln!(out, "{:indent$}{}", "", node_label(tree, id), indent = depth * 2);
            for &child in self.children(id) {
                self.write_outline(tree, child, depth + 1, out);
            }
        });
    }

    /// Highlight the source of `id`. Replaces the previous hover marker.
    pub fn hover(&mut self, editor: &mut impl Editor, id: NodeId, marker_class: &str) {
        self.unhover(editor);
        let Some(tree) = &self.tree else {
            return;
        };
        if id.index() >= tree.len() {
            return;
        }
        let range = span_to_range(editor, tree.span(id), OffsetBase::Plain);
        self.hover_marker = Some(editor.add_marker(range, marker_class, MarkerType::Text, false));
    }

    pub fn unhover(&mut self, editor: &mut impl Editor) {
        if let Some(id) = self.hover_marker.take() {
            editor.remove_marker(id);
        }
    }
}

/// `Type` plus the name or value a node carries, and its start position.
fn node_label(tree: &SyntaxTree, id: NodeId) -> String {
    let node = tree.node(id);
    let mut label = node.type_name().to_owned();
    match &node.kind {
        NodeKind::Identifier { name } => {
            let _ = write!(label, " {name}");
        }
        NodeKind::Literal { value } => {
            let _ = match value {
                Literal::Number(n) => write!(label, " {}", format_number(*n)),
                Literal::String(s) => write!(label, " {s:?}"),
                Literal::Bool(b) => write!(label, " {b}"),
                Literal::Null => write!(label, " null"),
            };
        }
        NodeKind::Property { key, .. } => {
            let _ = write!(label, " {key}");
        }
        _ => {}
    }
    if let Some(loc) = node.loc {
        let _ = write!(label, " @{}:{}", loc.start.line, loc.start.column);
    }
    label
}

#[cfg(test)]
mod tests;
