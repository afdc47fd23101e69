//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::rc::Rc;

use stepwise_ir::SyntaxTree;

use super::Interpreter;
use crate::environment::{Mutability, ScopeRef};
use crate::frames::CallStack;
use crate::halt::DebuggerStatements;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::{ErrorKind, NativeKind, Object, Value};

/// Default call depth limit.
///
/// WASM runs on the browser's fixed stack, so its limit is lower.
pub const DEFAULT_MAX_CALL_DEPTH: usize = if cfg!(target_arch = "wasm32") {
    1_000
} else {
    10_000
};

/// Builder for creating Interpreter instances.
///
/// The builder is cheap to clone, so one configured builder can produce an
/// interpreter per run.
#[derive(Clone)]
pub struct InterpreterBuilder {
    max_call_depth: usize,
    debugger_statements: DebuggerStatements,
    print_handler: Option<SharedPrintHandler>,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            debugger_statements: DebuggerStatements::default(),
            print_handler: None,
        }
    }

    /// Maximum number of nested activations, the program frame included.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// What `debugger` statements do.
    #[must_use]
    pub fn debugger_statements(mut self, mode: DebuggerStatements) -> Self {
        self.debugger_statements = mode;
        self
    }

    /// Set the handler receiving `console.log` output. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Build an interpreter for `tree`, which was parsed from `source`.
    pub fn build(self, tree: SyntaxTree, source: impl Into<Rc<str>>) -> Interpreter {
        let globals = ScopeRef::default();
        install_globals(&globals);
        Interpreter {
            tree: Rc::new(tree),
            source: source.into(),
            globals,
            stack: CallStack::new(self.max_call_depth),
            max_call_depth: self.max_call_depth,
            debugger_statements: self.debugger_statements,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}

/// Populate the global scope with the built-in bindings.
fn install_globals(globals: &ScopeRef) {
    let mut scope = globals.borrow_mut();
    scope.define("undefined", Value::Undefined, Mutability::Immutable);
    scope.define("NaN", Value::Number(f64::NAN), Mutability::Immutable);
    scope.define("Infinity", Value::Number(f64::INFINITY), Mutability::Immutable);

    for kind in ErrorKind::ALL {
        scope.define(
            kind.name(),
            Value::native(kind.name(), NativeKind::ErrorConstructor(kind)),
            Mutability::Immutable,
        );
    }

    let mut console = Object::default();
    console.set("log", Value::native("log", NativeKind::ConsoleLog));
    scope.define("console", Value::object(console), Mutability::Immutable);

    let mut math = Object::default();
    math.set("floor", Value::native("floor", NativeKind::MathFloor));
    math.set("max", Value::native("max", NativeKind::MathMax));
    math.set("min", Value::native("min", NativeKind::MathMin));
    math.set("abs", Value::native("abs", NativeKind::MathAbs));
    scope.define("Math", Value::object(math), Mutability::Immutable);
}
