//! Frame/scope reconstructor.
//!
//! Turns what a run left behind into the variable list, the banner trace
//! and the program-counter markers.

use stepwise_eval::{FrameChain, ScopeRef, Value};
use stepwise_ir::SyntaxTree;

use crate::editor::{Editor, MarkerId, MarkerType};
use crate::translator::{span_to_range, OffsetBase};
use crate::view::{ExceptionBanner, Headline, VariableList};

/// Add the bindings of `scope` and its ancestors to `list`, stopping before
/// `root`. The innermost binding of a name wins.
pub fn display_scope(list: &mut VariableList, scope: &ScopeRef, root: &ScopeRef) {
    let mut current = Some(scope.clone());
    let mut depth = 0usize;
    while let Some(link) = current {
        if link.ptr_eq(root) {
            break;
        }
        {
            let link = link.borrow();
            for binding in link.bindings() {
                list.set_variable(Some(&binding.name), render_value(&binding.value));
            }
        }
        depth += 1;
        current = link.parent_scope();
    }
    tracing::trace!(depth, shown = list.len(), "scope displayed");
}

/// Display form of a value. Functions show their signature line only.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Function(_) | Value::Native(_) => elide_body(&value.to_display_string()),
        other => other.to_display_string(),
    }
}

fn elide_body(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let head = match first_line.rfind('{') {
        Some(brace) => &first_line[..=brace],
        None => first_line.trim_end(),
    };
    format!("{head} ... }}")
}

/// Show `headline` and one trace line and marker per frame, innermost
/// first. Returns the markers added.
pub fn set_exception(
    banner: &mut ExceptionBanner,
    editor: &mut impl Editor,
    tree: &SyntaxTree,
    frames: &FrameChain,
    base: OffsetBase,
    headline: Headline,
    marker_class: &str,
) -> Vec<MarkerId> {
    banner.show(headline);
    let mut markers = Vec::with_capacity(frames.len());
    for frame in frames.walk() {
        let node = tree.node(frame.pc);
        let range = span_to_range(editor, node.span, base);
        banner.push_trace(format!(
            "at: {} @ line {}, column {}",
            node.type_name(),
            range.start.row + 1,
            range.start.column
        ));
        markers.push(editor.add_marker(range, marker_class, MarkerType::Text, false));
    }
    tracing::debug!(frames = markers.len(), "exception trace rendered");
    markers
}

#[cfg(test)]
mod tests;
