use super::*;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn wrap(body: &str) -> String {
    format!("(function() {{\n{body}\n}});")
}

fn runtime() -> Runtime {
    Runtime::new(InterpreterBuilder::new().print_handler(buffer_handler()))
}

fn get(frame: &Frame, name: &str) -> String {
    frame
        .scope
        .borrow()
        .lookup(name)
        .map(|v| v.to_display_string())
        .unwrap_or_else(|| panic!("{name} is unbound"))
}

#[test]
fn completion_keeps_the_callee_frame() {
    let runtime = runtime();
    let callable = runtime
        .evaluate_callable(&wrap("var a = 2;\nvar b = a * 21;"))
        .unwrap();
    let reified = runtime.run(callable).unwrap();
    assert!(!reified.is_continuation);
    assert_eq!(reified.frames.len(), 1);
    let frame = reified.current_frame().unwrap();
    assert_eq!(get(frame, "b"), "42");
    assert!(matches!(reified.into_outcome(), Some(Outcome::Completed { .. })));
}

#[test]
fn debugger_statement_suspends() {
    let runtime = runtime();
    let source = wrap("var n = 0;\nwhile (true) {\n  n++;\n  if (n == 3) debugger;\n}");
    let reified = runtime.run(runtime.evaluate_callable(&source).unwrap()).unwrap();
    assert!(reified.is_continuation);
    let frame = reified.current_frame().unwrap();
    assert_eq!(get(frame, "n"), "3");
    assert_eq!(reified.tree().node(frame.pc).type_name(), "DebuggerStatement");
    assert!(matches!(
        reified.into_outcome(),
        Some(Outcome::Halted {
            reason: HaltReason::DebuggerStatement,
            ..
        })
    ));
}

#[test]
fn throws_unwind_with_frames() {
    let runtime = runtime();
    let source = wrap("function f() {\n  return missing;\n}\nf();");
    let unwind = runtime
        .run(runtime.evaluate_callable(&source).unwrap())
        .unwrap_err();
    assert_eq!(unwind.error.name, "ReferenceError");
    assert_eq!(unwind.error.message, "missing is not defined");
    let frames = unwind.recreate_frames().unwrap();
    let types: Vec<&str> = frames
        .walk()
        .map(|frame| unwind.tree().node(frame.pc).type_name())
        .collect();
    assert_eq!(types, vec!["Identifier", "CallExpression"]);
    assert!(matches!(unwind.into_outcome(), Outcome::Raised { .. }));
}

#[test]
fn offsets_are_relative_to_the_wrapped_source() {
    let runtime = runtime();
    let unwind = runtime
        .run(runtime.evaluate_callable(&wrap("throw 1;")).unwrap())
        .unwrap_err();
    let pc = unwind.frames.top().unwrap().pc;
    // "(function() {" plus the newline.
    assert_eq!(unwind.tree().span(pc).start, 14);
}

#[test]
fn non_function_sources_are_rejected() {
    let runtime = runtime();
    assert!(matches!(
        runtime.evaluate_callable("1 + 2;"),
        Err(EvalCallableError::NotCallable)
    ));
    assert!(matches!(
        runtime.evaluate_callable("var a; var b;"),
        Err(EvalCallableError::NotCallable)
    ));
    assert!(matches!(
        runtime.evaluate_callable("(function() {"),
        Err(EvalCallableError::Parse(_))
    ));
}

#[test]
fn callable_exposes_its_function() {
    let runtime = runtime();
    let callable = runtime.evaluate_callable(&wrap("")).unwrap();
    assert!(callable.function().name.is_none());
    assert_eq!(callable.interpreter().source(), wrap(""));
}
