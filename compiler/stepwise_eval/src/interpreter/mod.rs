//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! [`Interpreter`] owns the per-run state: the parsed tree, the source text
//! closures render from, the global scope and the live [`CallStack`]. Each
//! entry point builds a short-lived [`Executor`] that borrows that state
//! together with the caller's [`HaltPredicate`] and walks the tree:
//!
//! - `exec` - statements, hoisting, block scopes
//! - `expr` - expressions, assignment, member access
//! - `call` - closures, `new`, argument binding
//! - `natives` - built-in globals, array and string members
//!
//! Non-local control flow (return, break, continue, throw, halt) travels as
//! `Err(ControlAction)` so `?` unwinds the Rust stack back to the entry
//! point, which turns it into an [`Outcome`].

mod builder;
mod call;
mod exec;
mod expr;
mod natives;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use std::rc::Rc;

use stepwise_ir::{NodeId, NodeKind, SyntaxTree};

use crate::environment::ScopeRef;
use crate::errors::EvalCallableError;
use crate::frames::{Activation, CallStack, FrameChain};
use crate::halt::{DebuggerStatements, HaltPredicate, HaltReason, NeverHalt};
use crate::outcome::{Outcome, ThrownError};
use crate::print_handler::{PrintHandlerImpl, SharedPrintHandler};
use crate::value::{Closure, Value};

/// Non-local exit from the statement or expression being evaluated.
#[derive(Debug)]
pub(crate) enum ControlAction {
    Return(Value),
    Break,
    Continue,
    /// A thrown value with the stack captured at the throw site.
    Throw { value: Value, frames: FrameChain },
    /// Execution stopped before a statement.
    Halt {
        reason: HaltReason,
        frames: FrameChain,
    },
}

pub(crate) type EvalResult = Result<Value, ControlAction>;
pub(crate) type ExecResult = Result<(), ControlAction>;

/// How a reified call ended.
pub(crate) enum ReifiedRun {
    /// Returned; the chain holds the callee's final activation.
    Returned(FrameChain),
    /// Stopped at a `debugger` statement or a halt.
    Suspended(FrameChain),
    Raised { value: Value, frames: FrameChain },
}

/// Interpreter over one parsed tree.
pub struct Interpreter {
    tree: Rc<SyntaxTree>,
    source: Rc<str>,
    globals: ScopeRef,
    stack: CallStack,
    max_call_depth: usize,
    debugger_statements: DebuggerStatements,
    print_handler: SharedPrintHandler,
}

impl Interpreter {
    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Shared handle to the tree, for results that outlive the interpreter.
    pub fn shared_tree(&self) -> Rc<SyntaxTree> {
        Rc::clone(&self.tree)
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of every scope chain this interpreter creates.
    #[inline]
    pub fn globals(&self) -> &ScopeRef {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Fresh top-level scope whose parent is the global scope.
    pub fn new_program_scope(&self) -> ScopeRef {
        self.globals.child()
    }

    /// Execute the whole program in a new top-level activation bound to
    /// `scope`. `halt` is consulted before every statement.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = self.tree.len()))]
    pub fn run_with_frame(&mut self, scope: ScopeRef, halt: &dyn HaltPredicate) -> Outcome {
        let tree = Rc::clone(&self.tree);
        let result = self.executor(halt).run_program(tree.root(), &scope);
        self.reset_stack();
        let outcome = match result {
            Ok(()) | Err(ControlAction::Return(_) | ControlAction::Break | ControlAction::Continue) => {
                Outcome::Completed { scope }
            }
            Err(ControlAction::Throw { value, frames }) => Outcome::Raised {
                error: ThrownError::from_value(value),
                frames,
            },
            Err(ControlAction::Halt { reason, frames }) => Outcome::Halted { frames, reason },
        };
        tracing::debug!(
            outcome = outcome_name(&outcome),
            frames = outcome.frames().map_or(0, FrameChain::len),
            "run finished"
        );
        outcome
    }

    /// Evaluate a program consisting of a single expression statement and
    /// return the function it produces.
    pub(crate) fn evaluate_lone_function(&mut self) -> Result<Rc<Closure>, EvalCallableError> {
        let tree = Rc::clone(&self.tree);
        let root = tree.root();
        let expression = match tree.kind(root) {
            NodeKind::Program { body } if body.len() == 1 => match tree.kind(body[0]) {
                NodeKind::ExpressionStatement { expression } => *expression,
                _ => return Err(EvalCallableError::NotCallable),
            },
            _ => return Err(EvalCallableError::NotCallable),
        };
        let scope = self.new_program_scope();
        let result = self
            .executor(&NeverHalt)
            .eval_in_program(root, &scope, expression);
        self.reset_stack();
        match result {
            Ok(Value::Function(closure)) => Ok(closure),
            _ => Err(EvalCallableError::NotCallable),
        }
    }

    /// Call `function` with no arguments on an empty stack, keeping the
    /// callee's activation when it returns.
    pub(crate) fn call_reified(
        &mut self,
        function: &Rc<Closure>,
        halt: &dyn HaltPredicate,
    ) -> ReifiedRun {
        let result = self.executor(halt).call_reified(function);
        self.reset_stack();
        match result {
            Ok(frames) => ReifiedRun::Returned(frames),
            Err(ControlAction::Halt { frames, .. }) => ReifiedRun::Suspended(frames),
            Err(ControlAction::Throw { value, frames }) => ReifiedRun::Raised { value, frames },
            Err(ControlAction::Return(_) | ControlAction::Break | ControlAction::Continue) => {
                ReifiedRun::Returned(FrameChain::default())
            }
        }
    }

    fn executor<'a>(&'a mut self, halt: &'a dyn HaltPredicate) -> Executor<'a> {
        Executor {
            tree: &self.tree,
            source: &self.source,
            globals: &self.globals,
            stack: &mut self.stack,
            print: &self.print_handler,
            debugger_statements: self.debugger_statements,
            halt,
        }
    }

    fn reset_stack(&mut self) {
        self.stack = CallStack::new(self.max_call_depth);
    }
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Completed { .. } => "completed",
        Outcome::Halted { .. } => "halted",
        Outcome::Raised { .. } => "raised",
    }
}

/// Borrowed view of an [`Interpreter`] for the duration of one entry point.
pub(crate) struct Executor<'a> {
    tree: &'a SyntaxTree,
    source: &'a Rc<str>,
    globals: &'a ScopeRef,
    stack: &'a mut CallStack,
    print: &'a PrintHandlerImpl,
    debugger_statements: DebuggerStatements,
    halt: &'a dyn HaltPredicate,
}

impl<'a> Executor<'a> {
    /// Innermost scope of the running activation.
    fn scope(&self) -> ScopeRef {
        self.stack
            .top()
            .map_or_else(|| self.globals.clone(), |top| top.scope.clone())
    }

    /// Replace the running activation's scope, returning the previous one.
    fn swap_scope(&mut self, scope: ScopeRef) -> ScopeRef {
        match self.stack.top_mut() {
            Some(top) => std::mem::replace(&mut top.scope, scope),
            None => scope,
        }
    }

    #[inline]
    fn set_pc(&mut self, id: NodeId) {
        if let Some(top) = self.stack.top_mut() {
            top.pc = id;
        }
    }

    /// Throw `value` with the current stack.
    fn throw(&self, value: Value) -> ControlAction {
        ControlAction::Throw {
            value,
            frames: self.stack.capture(),
        }
    }

    /// Throw `value` with the running activation's pc moved to `id`.
    fn throw_at(&mut self, id: NodeId, value: Value) -> ControlAction {
        self.set_pc(id);
        self.throw(value)
    }

    fn halt_with(&self, reason: HaltReason) -> ControlAction {
        tracing::debug!(?reason, depth = self.stack.depth(), "halting");
        ControlAction::Halt {
            reason,
            frames: self.stack.capture(),
        }
    }

    /// Source text of a node.
    fn source_text(&self, id: NodeId) -> &'a str {
        let source: &'a str = self.source;
        source.get(self.tree.span(id).to_range()).unwrap_or_default()
    }

    /// Run a `Program` node in a new top-level activation.
    fn run_program(&mut self, root: NodeId, scope: &ScopeRef) -> ExecResult {
        let tree = self.tree;
        self.push_activation(root, scope.clone(), None)?;
        let body: &[NodeId] = match tree.kind(root) {
            NodeKind::Program { body } => body,
            _ => &[],
        };
        self.hoist_declarations(body, scope);
        let result = self.exec_statements(body);
        self.stack.pop();
        result
    }

    /// Evaluate one expression of a program in a top-level activation.
    fn eval_in_program(&mut self, root: NodeId, scope: &ScopeRef, expression: NodeId) -> EvalResult {
        self.push_activation(root, scope.clone(), None)?;
        let result = self.eval(expression);
        self.stack.pop();
        result
    }

    fn push_activation(
        &mut self,
        pc: NodeId,
        scope: ScopeRef,
        name: Option<String>,
    ) -> ExecResult {
        let activation = Activation { pc, scope, name };
        if self.stack.push(activation).is_err() {
            tracing::debug!(depth = self.stack.depth(), "call stack exhausted");
            return Err(self.throw(crate::errors::call_stack_exceeded()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
