use super::*;
use crate::halt::HaltAtBreakpoint;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;
use stepwise_parse::{parse, ParseOptions};

fn interpreter(source: &str) -> Interpreter {
    build(source, InterpreterBuilder::new())
}

fn build(source: &str, builder: InterpreterBuilder) -> Interpreter {
    let tree = parse(source, ParseOptions::default()).unwrap();
    builder.print_handler(buffer_handler()).build(tree, source)
}

fn run(source: &str) -> (Interpreter, Outcome) {
    let mut interp = interpreter(source);
    let scope = interp.new_program_scope();
    let outcome = interp.run_with_frame(scope, &NeverHalt);
    (interp, outcome)
}

fn completed_scope(outcome: &Outcome) -> ScopeRef {
    match outcome {
        Outcome::Completed { scope } => scope.clone(),
        other => panic!("expected completion, got {other:?}"),
    }
}

fn get(scope: &ScopeRef, name: &str) -> String {
    scope
        .borrow()
        .lookup(name)
        .map(|v| v.to_display_string())
        .unwrap_or_else(|| panic!("{name} is unbound"))
}

fn raised(outcome: Outcome) -> (ThrownError, FrameChain) {
    match outcome {
        Outcome::Raised { error, frames } => (error, frames),
        other => panic!("expected a throw, got {other:?}"),
    }
}

/// First statement starting on `line`.
fn statement_on_line(tree: &SyntaxTree, line: u32) -> NodeId {
    tree.iter()
        .find(|(id, node)| tree.is_statement(*id) && node.start_line() == Some(line))
        .map(|(id, _)| id)
        .unwrap()
}

fn pc_types(interp: &Interpreter, frames: &FrameChain) -> Vec<&'static str> {
    frames
        .walk()
        .map(|frame| interp.tree().node(frame.pc).type_name())
        .collect()
}

#[test]
fn sum_loop() {
    let (_, outcome) = run(
        "var array = [0, 1, 2, 3, 4, 5],\n    sum = 0;\n\nfor (var i = 0; i < array.length; i++)\n  sum += array[i];",
    );
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "sum"), "15");
    assert_eq!(get(&scope, "i"), "6");
    let names: Vec<String> = scope.borrow().bindings().iter().map(|b| b.name.clone()).collect();
    assert_eq!(names, vec!["array", "sum", "i"]);
}

#[test]
fn sum_reduce() {
    let (_, outcome) = run(
        "var array = [0, 1, 2, 3, 4, 5];\nvar sum = array.reduce(function(acc,  n) {\n  return acc + n;\n});",
    );
    assert_eq!(get(&completed_scope(&outcome), "sum"), "15");
}

#[test]
fn recursive_fibonacci() {
    let (_, outcome) = run(
        "function fibo(n) {\n  if (n <= 1)\n    return n;\n  return fibo(n - 1) + fibo(n - 2);\n}\n\nvar fib6 = fibo(6);",
    );
    assert_eq!(get(&completed_scope(&outcome), "fib6"), "8");
}

#[test]
fn parameters_shadow_globals() {
    let (_, outcome) = run(
        "var a = 1;\nvar b = 2;\n\nfunction square(a) {\n  var sq = a * a;\n  return sq;\n}\n\nvar s = square(b);",
    );
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "a"), "1");
    assert_eq!(get(&scope, "s"), "4");
    assert!(scope.borrow().lookup("sq").is_none());
}

#[test]
fn undeclared_name_raises_reference_error() {
    let (interp, outcome) = run(
        "var x = 1;\nfor (var i = 0; i < 5; i++) {\n  y += 1;\n  if (i == 3)\n    debugger;\n  x += i;\n}",
    );
    let (error, frames) = raised(outcome);
    assert_eq!(error.name, "ReferenceError");
    assert_eq!(error.message, "y is not defined");
    assert_eq!(frames.len(), 1);
    let top = frames.top().unwrap();
    let node = interp.tree().node(top.pc);
    assert_eq!(node.type_name(), "AssignmentExpression");
    assert_eq!(node.start_line(), Some(3));
    assert_eq!(get(&top.scope, "x"), "1");
    assert_eq!(get(&top.scope, "i"), "0");
}

#[test]
fn breakpoint_halts_before_the_statement() {
    let source = "var total = 0;\nfor (var i = 0; i < 4; i++) {\n  total += i;\n}\nvar done = true;";
    let mut tree = parse(source, ParseOptions::default()).unwrap();
    let target = statement_on_line(&tree, 5);
    tree.set_breakpoint(target);
    let mut interp = InterpreterBuilder::new().build(tree, source);
    let scope = interp.new_program_scope();
    let outcome = interp.run_with_frame(scope, &HaltAtBreakpoint);
    let Outcome::Halted { frames, reason } = outcome else {
        panic!("expected a halt, got {outcome:?}");
    };
    assert_eq!(reason, HaltReason::Breakpoint);
    let top = frames.top().unwrap();
    assert_eq!(top.pc, target);
    assert_eq!(get(&top.scope, "total"), "6");
    assert_eq!(get(&top.scope, "done"), "undefined");
}

#[test]
fn breakpoint_inside_loop_stops_on_first_iteration() {
    let source = "var total = 0;\nfor (var i = 0; i < 4; i++) {\n  total += i;\n}";
    let mut tree = parse(source, ParseOptions::default()).unwrap();
    tree.set_breakpoint(statement_on_line(&tree, 3));
    let mut interp = InterpreterBuilder::new().build(tree, source);
    let scope = interp.new_program_scope();
    let outcome = interp.run_with_frame(scope, &HaltAtBreakpoint);
    let scope = outcome.scope().unwrap();
    assert_eq!(get(&scope, "i"), "0");
    assert_eq!(get(&scope, "total"), "0");
}

#[test]
fn breakpoint_on_function_body_halts_on_entry() {
    let source = "function f(a)\n{\n  var b = a + 1;\n  return b;\n}\nvar x = f(1);";
    let mut tree = parse(source, ParseOptions::default()).unwrap();
    let body = statement_on_line(&tree, 2);
    assert_eq!(tree.node(body).type_name(), "BlockStatement");
    tree.set_breakpoint(body);
    let mut interp = InterpreterBuilder::new().build(tree, source);
    let scope = interp.new_program_scope();
    let outcome = interp.run_with_frame(scope, &HaltAtBreakpoint);
    let Outcome::Halted { frames, reason } = outcome else {
        panic!("expected a halt, got {outcome:?}");
    };
    assert_eq!(reason, HaltReason::Breakpoint);
    assert_eq!(frames.len(), 2);
    let top = frames.top().unwrap();
    assert_eq!(top.pc, body);
    assert_eq!(get(&top.scope, "a"), "1");
    assert_eq!(get(&top.scope, "b"), "undefined");
    assert_eq!(get(&top.scope, "x"), "undefined");
}

#[test]
fn closure_predicate_is_accepted() {
    let mut interp = interpreter("var a = 1;\nvar b = 2;");
    let scope = interp.new_program_scope();
    let second_line = |node: &stepwise_ir::Node| node.start_line() == Some(2);
    let outcome = interp.run_with_frame(scope, &second_line);
    assert!(matches!(outcome, Outcome::Halted { .. }));
}

#[test]
fn debugger_statements_are_ignored_by_default() {
    let source = "var n = 0;\nwhile (n < 3) {\n  n++;\n  debugger;\n}";
    let (_, outcome) = run(source);
    assert_eq!(get(&completed_scope(&outcome), "n"), "3");

    let mut interp = build(
        source,
        InterpreterBuilder::new().debugger_statements(DebuggerStatements::Suspend),
    );
    let scope = interp.new_program_scope();
    let outcome = interp.run_with_frame(scope, &NeverHalt);
    let Outcome::Halted { frames, reason } = outcome else {
        panic!("expected a halt, got {outcome:?}");
    };
    assert_eq!(reason, HaltReason::DebuggerStatement);
    assert_eq!(get(&frames.top().unwrap().scope, "n"), "1");
}

#[test]
fn nested_calls_capture_every_frame() {
    let source = "function inner(v) {\n  throw new Error('bad ' + v);\n}\nfunction outer() {\n  return inner(2);\n}\nouter();";
    let (interp, outcome) = run(source);
    let (error, frames) = raised(outcome);
    assert_eq!(error.name, "Error");
    assert_eq!(error.message, "bad 2");
    frames.validate().unwrap();
    assert_eq!(
        pc_types(&interp, &frames),
        vec!["ThrowStatement", "CallExpression", "CallExpression"]
    );
    let names: Vec<Option<&str>> = frames.walk().map(|f| f.name.as_deref()).collect();
    assert_eq!(names, vec![Some("inner"), Some("outer"), None]);
    let lines: Vec<Option<u32>> = frames
        .walk()
        .map(|f| interp.tree().node(f.pc).start_line())
        .collect();
    assert_eq!(lines, vec![Some(2), Some(5), Some(7)]);
}

#[test]
fn thrown_non_errors_are_uncaught() {
    let (_, outcome) = run("throw 'boom';");
    let (error, _) = raised(outcome);
    assert_eq!(error.name, "Uncaught");
    assert_eq!(error.message, "boom");
}

#[test]
fn runaway_recursion_is_a_range_error() {
    let mut interp = build(
        "function f() { return f(); }\nf();",
        InterpreterBuilder::new().max_call_depth(50),
    );
    let scope = interp.new_program_scope();
    let (error, frames) = raised(interp.run_with_frame(scope, &NeverHalt));
    assert_eq!(error.name, "RangeError");
    assert_eq!(error.message, "Maximum call stack size exceeded");
    assert_eq!(frames.len(), 50);
}

#[test]
fn const_and_block_scopes() {
    let (_, outcome) = run("let x = 1;\n{\n  let x = 2;\n  var y = x;\n}");
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "x"), "1");
    assert_eq!(get(&scope, "y"), "2");

    let (error, _) = raised(run("const k = 1;\nk = 2;").1);
    assert_eq!(error.name, "TypeError");
    assert_eq!(error.message, "Assignment to constant variable.");
}

#[test]
fn lexical_for_binding_does_not_leak() {
    let (_, outcome) = run("var n = 0;\nfor (let i = 0; i < 3; i++) n += i;");
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "n"), "3");
    assert!(scope.borrow().lookup("i").is_none());
}

#[test]
fn hoisting() {
    let (_, outcome) = run("var before = typeof later;\nvar r = f();\nfunction f() { return 7; }\nvar later = 1;");
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "before"), "undefined");
    assert_eq!(get(&scope, "r"), "7");
}

#[test]
fn closures_share_their_scope() {
    let (_, outcome) = run(
        "function counter() {\n  var n = 0;\n  return function() { n += 1; return n; };\n}\nvar c = counter();\nc();\nvar last = c();",
    );
    assert_eq!(get(&completed_scope(&outcome), "last"), "2");
}

#[test]
fn named_function_expressions_see_themselves() {
    let (_, outcome) = run("var f = function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); };\nvar r = f(5);");
    assert_eq!(get(&completed_scope(&outcome), "r"), "120");
}

#[test]
fn type_errors() {
    let cases = [
        ("var o = {};\no.f();", "o.f is not a function"),
        ("var u;\nu.x;", "Cannot read properties of undefined (reading 'x')"),
        ("null.x = 1;", "Cannot set properties of null (setting 'x')"),
        ("[].reduce(function(a, b) { return a; });", "Reduce of empty array with no initial value"),
        ("new Math.floor(1);", "Math.floor is not a constructor"),
    ];
    for (source, message) in cases {
        let (error, _) = raised(run(source).1);
        assert_eq!(error.name, "TypeError", "{source}");
        assert_eq!(error.message, message, "{source}");
    }
}

#[test]
fn array_members() {
    let (_, outcome) = run(
        "var a = [1, 2, 3];\nvar n = a.push(4, 5);\nvar last = a.pop();\nvar doubled = a.map(function(v) { return v * 2; }).join('-');\nvar part = a.slice(1, -1);\nvar where = a.indexOf(3);\nvar missing = a.indexOf(9);\nvar seen = 0;\na.forEach(function(v, i) { seen += i; });\nvar init = a.reduce(function(acc, v) { return acc + v; }, 10);\na[6] = 'x';",
    );
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "n"), "5");
    assert_eq!(get(&scope, "last"), "5");
    assert_eq!(get(&scope, "doubled"), "2-4-6-8");
    assert_eq!(get(&scope, "part"), "2,3");
    assert_eq!(get(&scope, "where"), "2");
    assert_eq!(get(&scope, "missing"), "-1");
    assert_eq!(get(&scope, "seen"), "6");
    assert_eq!(get(&scope, "init"), "20");
    assert_eq!(get(&scope, "a"), "1,2,3,4,,,x");
}

#[test]
fn string_members() {
    let (_, outcome) = run(
        "var s = 'Stepwise';\nvar up = s.toUpperCase();\nvar low = s.toLowerCase();\nvar c = s.charAt(4);\nvar at = s.indexOf('wise');\nvar len = s.length;\nvar first = s[0];",
    );
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "up"), "STEPWISE");
    assert_eq!(get(&scope, "low"), "stepwise");
    assert_eq!(get(&scope, "c"), "w");
    assert_eq!(get(&scope, "at"), "4");
    assert_eq!(get(&scope, "len"), "8");
    assert_eq!(get(&scope, "first"), "S");
}

#[test]
fn objects_and_errors() {
    let (_, outcome) = run(
        "var o = { a: 1 };\no.b = o.a + 1;\no['c'] = 3;\nvar sum = o.a + o.b + o.c;\nvar e = TypeError('nope');\nvar name = e.name;\nvar m = Math.max(1, 7, 3) - Math.min(4, 2) + Math.abs(-1) + Math.floor(2.7);",
    );
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "sum"), "6");
    assert_eq!(get(&scope, "name"), "TypeError");
    assert_eq!(get(&scope, "e"), "TypeError: nope");
    assert_eq!(get(&scope, "m"), "8");
}

#[test]
fn console_log_goes_to_the_print_handler() {
    let (interp, outcome) = run("console.log('sum', 1 + 2, [1, 'b'], { k: null });");
    completed_scope(&outcome);
    assert_eq!(
        interp.print_handler().get_output(),
        "sum 3 [ 1, 'b' ] { k: null }\n"
    );
}

#[test]
fn logical_and_conditional() {
    let (_, outcome) = run("var a = 0 || 'x';\nvar b = 1 && 0;\nvar c = b ? 'yes' : 'no';\nvar d = !a;");
    let scope = completed_scope(&outcome);
    assert_eq!(get(&scope, "a"), "x");
    assert_eq!(get(&scope, "b"), "0");
    assert_eq!(get(&scope, "c"), "no");
    assert_eq!(get(&scope, "d"), "false");
}

#[test]
fn break_and_continue() {
    let (_, outcome) = run(
        "var odd = 0;\nfor (var i = 0; i < 10; i++) {\n  if (i % 2 == 0) continue;\n  if (i > 7) break;\n  odd += i;\n}",
    );
    assert_eq!(get(&completed_scope(&outcome), "odd"), "16");
}

#[test]
fn stack_is_reset_between_runs() {
    let mut interp = interpreter("function f() { throw 1; }\nf();");
    for _ in 0..2 {
        let scope = interp.new_program_scope();
        let (_, frames) = raised(interp.run_with_frame(scope, &NeverHalt));
        assert_eq!(frames.len(), 2);
    }
}

#[test]
fn program_scope_is_a_child_of_globals() {
    let interp = interpreter("");
    let scope = interp.new_program_scope();
    let parent = scope.parent_scope().unwrap();
    assert!(parent.ptr_eq(interp.globals()));
    assert!(interp.globals().borrow().has_own("console"));
}
