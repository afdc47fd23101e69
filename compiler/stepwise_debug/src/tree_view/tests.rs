use super::*;
use crate::editor::{EditorState, Position, Range};
use pretty_assertions::assert_eq;
use stepwise_parse::{parse, ParseOptions};

fn view(source: &str) -> TreeView {
    let mut view = TreeView::new();
    view.display(parse(source, ParseOptions::default()).unwrap());
    view
}

#[test]
fn outline_is_indented_pre_order() {
    let view = view("var a = 1;\nf(a);");
    assert_eq!(
        view.outline(),
        "Program @1:0\n\
         \x20 VariableDeclaration @1:0\n\
         \x20   VariableDeclarator @1:4\n\
         \x20     Identifier a @1:4\n\
         \x20     Literal 1 @1:8\n\
         \x20 ExpressionStatement @2:0\n\
         \x20   CallExpression @2:0\n\
         \x20     Identifier f @2:0\n\
         \x20     Identifier a @2:2\n"
    );
}

#[test]
fn edges_match_children_map() {
    let view = view("x = 1;");
    let tree = view.tree().unwrap();
    let edges = view.edges();
    assert_eq!(edges.len(), tree.len() - 1);
    assert_eq!(edges[0].parent, tree.root());
    for edge in &edges {
        assert!(view.children(edge.parent).contains(&edge.child));
    }
}

#[test]
fn hover_keeps_a_single_marker() {
    let source = "var a = 1;\nf(a);";
    let mut view = view(source);
    let mut editor = EditorState::new(source);
    let call = view
        .tree()
        .unwrap()
        .iter()
        .find(|(_, node)| node.type_name() == "CallExpression")
        .map(|(id, _)| id)
        .unwrap();
    let root = view.tree().unwrap().root();
    view.hover(&mut editor, root, "programCounter");
    view.hover(&mut editor, call, "programCounter");
    let markers = editor.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(
        markers[0].range,
        Range::new(Position::new(1, 0), Position::new(1, 4))
    );
    view.unhover(&mut editor);
    assert!(editor.markers().is_empty());
}

#[test]
fn empty_view() {
    let view = TreeView::new();
    assert_eq!(view.outline(), "");
    assert!(view.edges().is_empty());
}
