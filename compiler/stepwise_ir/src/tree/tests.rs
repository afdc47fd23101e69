use super::*;
use crate::{Literal, VarKind};
use pretty_assertions::assert_eq;

fn leaf(tree: &mut SyntaxTree, kind: NodeKind, start: u32, end: u32) -> NodeId {
    tree.alloc(Node::new(kind, Span::new(start, end)))
}

/// `f(1);\nfor (var i = 0;;) ;`
fn sample() -> (SyntaxTree, Sample) {
    let mut tree = SyntaxTree::new(SourceType::Script);
    let callee = leaf(&mut tree, NodeKind::Identifier { name: "f".into() }, 0, 1);
    let arg = leaf(
        &mut tree,
        NodeKind::Literal {
            value: Literal::Number(1.0),
        },
        2,
        3,
    );
    let call = leaf(
        &mut tree,
        NodeKind::CallExpression {
            callee,
            arguments: vec![arg],
        },
        0,
        4,
    );
    let stmt = leaf(&mut tree, NodeKind::ExpressionStatement { expression: call }, 0, 5);
    let i = leaf(&mut tree, NodeKind::Identifier { name: "i".into() }, 15, 16);
    let zero = leaf(
        &mut tree,
        NodeKind::Literal {
            value: Literal::Number(0.0),
        },
        19,
        20,
    );
    let declarator = leaf(
        &mut tree,
        NodeKind::VariableDeclarator {
            id: i,
            init: Some(zero),
        },
        15,
        20,
    );
    let decl = leaf(
        &mut tree,
        NodeKind::VariableDeclaration {
            kind: VarKind::Var,
            declarations: vec![declarator],
        },
        11,
        20,
    );
    let empty = leaf(&mut tree, NodeKind::EmptyStatement, 24, 25);
    let for_stmt = leaf(
        &mut tree,
        NodeKind::ForStatement {
            init: Some(decl),
            test: None,
            update: None,
            body: empty,
        },
        6,
        25,
    );
    let program = leaf(
        &mut tree,
        NodeKind::Program {
            body: vec![stmt, for_stmt],
        },
        0,
        25,
    );
    tree.finish(program);
    (
        tree,
        Sample {
            callee,
            call,
            stmt,
            i,
            decl,
            for_stmt,
            program,
        },
    )
}

struct Sample {
    callee: NodeId,
    call: NodeId,
    stmt: NodeId,
    i: NodeId,
    decl: NodeId,
    for_stmt: NodeId,
    program: NodeId,
}

#[test]
fn parents_are_linked() {
    let (tree, s) = sample();
    assert_eq!(tree.parent(s.callee), Some(s.call));
    assert_eq!(tree.parent(s.call), Some(s.stmt));
    assert_eq!(tree.parent(s.stmt), Some(s.program));
    assert_eq!(tree.parent(s.program), None);
}

#[test]
fn statement_of_sub_expression() {
    let (tree, s) = sample();
    assert_eq!(tree.statement_of(s.callee), Some(s.stmt));
    assert_eq!(tree.statement_of(s.stmt), Some(s.stmt));
}

#[test]
fn for_init_declaration_is_not_a_statement() {
    let (tree, s) = sample();
    assert!(!tree.is_statement(s.decl));
    assert_eq!(tree.statement_of(s.i), Some(s.for_stmt));
}

#[test]
fn program_has_no_enclosing_statement() {
    let (tree, s) = sample();
    assert_eq!(tree.statement_of(s.program), None);
}

#[test]
fn post_order_visits_children_first() {
    let (tree, s) = sample();
    let first = tree.find_post_order(|_, _| true);
    assert_eq!(first, Some(s.callee));
    let first_statement = tree.find_post_order(|_, node| node.kind.is_statement());
    assert_eq!(first_statement, Some(s.stmt));
}

#[test]
fn children_map_skips_leaves() {
    let (tree, s) = sample();
    let map = tree.children_map();
    assert_eq!(map.get(&s.program).map(|c| c.to_vec()), Some(vec![s.stmt, s.for_stmt]));
    assert!(!map.contains_key(&s.callee));
    assert_eq!(tree.pre_order().first(), Some(&s.program));
    assert_eq!(tree.pre_order().len(), tree.len());
}

#[test]
fn breakpoint_tag() {
    let (mut tree, s) = sample();
    assert_eq!(tree.breakpoint(), None);
    tree.set_breakpoint(s.stmt);
    assert!(tree.node(s.stmt).is_breakpoint);
    assert_eq!(tree.breakpoint(), Some(s.stmt));
}
