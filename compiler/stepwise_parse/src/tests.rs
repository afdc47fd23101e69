use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stepwise_ir::{BinaryOp, LinePosition, Literal, UpdateOp, VarKind};

fn parse_ok(source: &str) -> SyntaxTree {
    parse(source, ParseOptions::default()).unwrap()
}

fn parse_err(source: &str) -> ParseError {
    parse(source, ParseOptions::default()).unwrap_err()
}

fn body(tree: &SyntaxTree) -> Vec<NodeId> {
    match tree.kind(tree.root()) {
        NodeKind::Program { body } => body.clone(),
        other => panic!("root is {other:?}"),
    }
}

fn body_types(tree: &SyntaxTree) -> Vec<&'static str> {
    body(tree).into_iter().map(|id| tree.kind(id).type_name()).collect()
}

fn expression_of(tree: &SyntaxTree, stmt: NodeId) -> NodeId {
    match tree.kind(stmt) {
        NodeKind::ExpressionStatement { expression } => *expression,
        other => panic!("not an expression statement: {other:?}"),
    }
}

#[test]
fn statement_kinds() {
    let tree = parse_ok(
        "var a = 1;\nfunction f(x) { return x; }\nif (a) { a = 2 } else ;\nwhile (a < 3) a++;\nfor (;;) { break; }\ndebugger;\nf(a);",
    );
    assert_eq!(
        body_types(&tree),
        vec![
            "VariableDeclaration",
            "FunctionDeclaration",
            "IfStatement",
            "WhileStatement",
            "ForStatement",
            "DebuggerStatement",
            "ExpressionStatement",
        ]
    );
}

#[test]
fn locations_are_one_based_lines_zero_based_columns() {
    let tree = parse_ok("var a = 1;\n  foo(a);");
    let stmts = body(&tree);
    let loc = tree.node(stmts[1]).loc.unwrap();
    assert_eq!(loc.start, LinePosition::new(2, 2));
    assert_eq!(loc.end, LinePosition::new(2, 9));
    assert_eq!(tree.last_line(), Some(2));
}

#[test]
fn locations_can_be_disabled() {
    let options = ParseOptions {
        locations: false,
        ..ParseOptions::default()
    };
    let tree = parse("var a = 1;", options).unwrap();
    assert!(tree.iter().all(|(_, node)| node.loc.is_none()));
}

#[test]
fn declaration_span_covers_semicolon() {
    let source = "let x = 1, y;";
    let tree = parse_ok(source);
    let decl = body(&tree)[0];
    assert_eq!(tree.span(decl), Span::new(0, source.len() as u32));
    match tree.kind(decl) {
        NodeKind::VariableDeclaration { kind, declarations } => {
            assert_eq!(*kind, VarKind::Let);
            assert_eq!(declarations.len(), 2);
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn semicolons_inserted_at_line_breaks() {
    let tree = parse_ok("var a = 1\nvar b = a\na\n++b");
    assert_eq!(
        body_types(&tree),
        vec![
            "VariableDeclaration",
            "VariableDeclaration",
            "ExpressionStatement",
            "ExpressionStatement",
        ]
    );
    let update = expression_of(&tree, body(&tree)[3]);
    assert!(matches!(
        tree.kind(update),
        NodeKind::UpdateExpression {
            operator: UpdateOp::Increment,
            prefix: true,
            ..
        }
    ));
}

#[test]
fn return_followed_by_newline_has_no_argument() {
    let tree = parse_ok("function f() {\n  return\n  1\n}");
    let return_stmt = tree
        .iter()
        .find(|(_, node)| node.type_name() == "ReturnStatement")
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(tree.kind(return_stmt), &NodeKind::ReturnStatement { argument: None });
}

#[test]
fn missing_semicolon_on_same_line_is_an_error() {
    let err = parse_err("var a = 1 var b = 2");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.message, "expected `;`, found `var`");
    assert_eq!(err.span, Span::new(10, 13));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let tree = parse_ok("1 + 2 * 3;");
    let expr = expression_of(&tree, body(&tree)[0]);
    let NodeKind::BinaryExpression {
        operator: BinaryOp::Add,
        left,
        right,
    } = tree.kind(expr)
    else {
        panic!("{:?}", tree.kind(expr));
    };
    assert_eq!(
        tree.kind(*left),
        &NodeKind::Literal {
            value: Literal::Number(1.0)
        }
    );
    assert!(matches!(
        tree.kind(*right),
        NodeKind::BinaryExpression {
            operator: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn assignment_is_right_associative() {
    let tree = parse_ok("a = b += 1;");
    let expr = expression_of(&tree, body(&tree)[0]);
    let NodeKind::AssignmentExpression { right, .. } = tree.kind(expr) else {
        panic!("{:?}", tree.kind(expr));
    };
    assert_eq!(tree.kind(*right).type_name(), "AssignmentExpression");
}

#[test]
fn call_and_member_chain() {
    let tree = parse_ok("a.b[0](1).c;");
    let expr = expression_of(&tree, body(&tree)[0]);
    let NodeKind::MemberExpression {
        object, computed, ..
    } = tree.kind(expr)
    else {
        panic!("{:?}", tree.kind(expr));
    };
    assert!(!computed);
    let NodeKind::CallExpression { callee, arguments } = tree.kind(*object) else {
        panic!("{:?}", tree.kind(*object));
    };
    assert_eq!(arguments.len(), 1);
    assert!(matches!(
        tree.kind(*callee),
        NodeKind::MemberExpression { computed: true, .. }
    ));
}

#[test]
fn new_with_and_without_arguments() {
    let tree = parse_ok("new Error('boom'); new Error;");
    for stmt in body(&tree) {
        let expr = expression_of(&tree, stmt);
        assert_eq!(tree.kind(expr).type_name(), "NewExpression");
    }
}

#[test]
fn object_and_array_literals() {
    let tree = parse_ok("var o = { a: 1, 'b': [1, 2,], 3: null, };");
    let object = tree
        .iter()
        .find_map(|(_, node)| match &node.kind {
            NodeKind::ObjectExpression { properties } => Some(properties.clone()),
            _ => None,
        })
        .unwrap();
    let keys: Vec<String> = object
        .iter()
        .map(|id| match tree.kind(*id) {
            NodeKind::Property { key, .. } => key.clone(),
            other => panic!("{other:?}"),
        })
        .collect();
    assert_eq!(keys, vec!["a", "b", "3"]);
}

#[test]
fn wrapped_source_is_one_function_expression() {
    let tree = parse_ok("(function() {\nvar x = 1;\n});");
    let stmts = body(&tree);
    assert_eq!(stmts.len(), 1);
    let expr = expression_of(&tree, stmts[0]);
    assert_eq!(tree.kind(expr).type_name(), "FunctionExpression");
    assert_eq!(tree.span(expr), Span::new(1, 26));
}

#[test]
fn for_init_declaration_is_not_a_statement() {
    let tree = parse_ok("for (var i = 0; i < 3; i++) {}");
    let decl = tree
        .iter()
        .find(|(_, node)| node.type_name() == "VariableDeclaration")
        .map(|(id, _)| id)
        .unwrap();
    assert!(!tree.is_statement(decl));
    assert_eq!(tree.statement_of(decl), Some(body(&tree)[0]));
}

#[test]
fn parents_are_linked() {
    let tree = parse_ok("function f(a) { return a + 1; }\nf(2);");
    let root = tree.root();
    for (id, node) in tree.iter() {
        if id == root {
            assert_eq!(node.parent, None);
        } else {
            let parent = node.parent.unwrap();
            assert!(tree.children(parent).contains(&id));
            assert!(tree.span(parent).contains_span(node.span));
        }
    }
}

#[test]
fn unsupported_constructs_are_rejected() {
    for source in [
        "try { a() } catch (e) {}",
        "class A {}",
        "switch (a) {}",
        "var f = x => x;",
        "var f = (x) => x;",
    ] {
        let err = parse_err(source);
        assert_eq!(err.kind, ParseErrorKind::Unsupported, "{source}");
    }
    assert_eq!(parse_err("try {}").message, "try/catch statements are not supported");
}

#[test]
fn context_errors() {
    assert_eq!(parse_err("return 1;").kind, ParseErrorKind::IllegalReturn);
    assert_eq!(parse_err("break;").kind, ParseErrorKind::IllegalBreak);
    assert_eq!(
        parse_err("while (1) { function f() { continue; } }").kind,
        ParseErrorKind::IllegalContinue
    );
    assert_eq!(parse_err("1 = 2;").kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(parse_err("f()++;").kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(parse_err("throw\nnew Error();").kind, ParseErrorKind::NewlineAfterThrow);
}

#[test]
fn lex_errors_surface_as_parse_errors() {
    let err = parse_err("var s = 'open");
    assert_eq!(err.kind, ParseErrorKind::Lex);
    assert_eq!(err.message, "unterminated string literal");
}

#[test]
fn unclosed_block() {
    let err = parse_err("function f() {");
    assert_eq!(err.message, "expected `}`, found end of input");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let tree = parse_ok(&source);
    assert_eq!(body_types(&tree), vec!["ExpressionStatement"]);
}

proptest! {
    #[test]
    fn one_statement_per_line(values in prop::collection::vec(0u32..1000, 1..20)) {
        let source: String = values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("var x{i} = {v}\n"))
            .collect();
        let tree = parse_ok(&source);
        let stmts = body(&tree);
        prop_assert_eq!(stmts.len(), values.len());
        for (i, stmt) in stmts.iter().enumerate() {
            prop_assert_eq!(tree.node(*stmt).start_line(), Some(i as u32 + 1));
        }
    }
}
