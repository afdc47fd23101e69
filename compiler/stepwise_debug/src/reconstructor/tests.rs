use super::*;
use crate::editor::{EditorState, Position, Range};
use pretty_assertions::assert_eq;
use stepwise_eval::{Frame, LocalScope, Mutability, Scope};
use stepwise_parse::{parse, ParseOptions};

fn define(scope: &ScopeRef, name: &str, value: Value) {
    scope.borrow_mut().define(name, value, Mutability::Mutable);
}

fn names(list: &VariableList) -> Vec<(Option<String>, String)> {
    list.entries()
        .iter()
        .map(|entry| (entry.name.clone(), entry.value.clone()))
        .collect()
}

#[test]
fn inner_binding_shadows_outer() {
    let root: ScopeRef = LocalScope::new(Scope::new());
    define(&root, "hidden", Value::Number(0.0));
    let outer = root.child();
    define(&outer, "x", Value::Number(2.0));
    define(&outer, "y", Value::Number(3.0));
    let inner = outer.child();
    define(&inner, "x", Value::Number(1.0));

    let mut list = VariableList::new();
    display_scope(&mut list, &inner, &root);
    assert_eq!(
        names(&list),
        vec![
            (Some("x".into()), "1".into()),
            (Some("y".into()), "3".into()),
        ]
    );
}

#[test]
fn walk_without_root_reaches_chain_end() {
    let outer: ScopeRef = LocalScope::new(Scope::new());
    define(&outer, "a", Value::Bool(true));
    let unrelated: ScopeRef = LocalScope::new(Scope::new());
    let mut list = VariableList::new();
    display_scope(&mut list, &outer.child(), &unrelated);
    assert_eq!(list.get("a"), Some("true"));
}

#[test]
fn functions_render_as_signature() {
    let source = "function add(a, b) {\n  return a + b;\n}";
    let tree = parse(source, ParseOptions::default()).unwrap();
    let mut interpreter = stepwise_eval::InterpreterBuilder::new()
        .print_handler(stepwise_eval::silent_handler())
        .build(tree, source);
    let scope = interpreter.new_program_scope();
    interpreter.run_with_frame(scope.clone(), &stepwise_eval::NeverHalt);
    let add = scope.borrow().lookup("add").unwrap();
    assert_eq!(render_value(&add), "function add(a, b) { ... }");
    assert_eq!(
        render_value(&Value::native("log", stepwise_eval::NativeKind::ConsoleLog)),
        "function log() { ... }"
    );
    assert_eq!(render_value(&Value::string("s")), "s");
    assert_eq!(render_value(&Value::Undefined), "undefined");
}

#[test]
fn elides_after_last_brace_on_first_line() {
    assert_eq!(elide_body("function f() { return {a: 1}; }"), "function f() { return { ... }");
    assert_eq!(elide_body("no brace"), "no brace ... }");
}

#[test]
fn trace_lines_follow_parent_links() {
    let source = "var a = 1;\n  throw a;";
    let tree = parse(source, ParseOptions::default()).unwrap();
    let throw_stmt = tree
        .iter()
        .find(|(_, node)| node.type_name() == "ThrowStatement")
        .map(|(id, _)| id)
        .unwrap();
    let decl = tree
        .iter()
        .find(|(_, node)| node.type_name() == "VariableDeclaration")
        .map(|(id, _)| id)
        .unwrap();
    let scope: ScopeRef = LocalScope::new(Scope::new());
    let frames = FrameChain::from_frames(vec![
        Frame {
            pc: throw_stmt,
            scope: scope.clone(),
            name: Some("f".into()),
            parent: Some(1),
        },
        Frame {
            pc: decl,
            scope,
            name: None,
            parent: None,
        },
    ]);
    let mut editor = EditorState::new(source);
    let mut banner = ExceptionBanner::default();
    let markers = set_exception(
        &mut banner,
        &mut editor,
        &tree,
        &frames,
        OffsetBase::Plain,
        Headline::Exception {
            name: "Uncaught".into(),
            message: "1".into(),
        },
        "programCounter",
    );
    assert_eq!(
        banner.text(),
        "Uncaught: 1\nat: ThrowStatement @ line 2, column 2\nat: VariableDeclaration @ line 1, column 0"
    );
    assert_eq!(markers.len(), 2);
    let first = &editor.markers()[0];
    assert_eq!(first.range, Range::new(Position::new(1, 2), Position::new(1, 10)));
    assert_eq!(first.kind, MarkerType::Text);
    assert!(!first.in_front);
}
