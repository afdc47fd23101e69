//! Reified runtime for the wrapped-function execution path.
//!
//! The source is wrapped as an anonymous function expression, evaluated to a
//! callable and then run so that the callee's activation survives the call:
//! on return it is kept for display, at a `debugger` statement it is the
//! suspended continuation, and on a throw it is the top of the unwound chain.

use std::rc::Rc;

use stepwise_ir::SyntaxTree;
use stepwise_parse::ParseOptions;

use crate::errors::{EvalCallableError, FrameChainError};
use crate::frames::{Frame, FrameChain};
use crate::halt::{DebuggerStatements, HaltReason, NeverHalt};
use crate::interpreter::{Interpreter, InterpreterBuilder, ReifiedRun};
use crate::outcome::{Outcome, ThrownError};
use crate::value::Closure;

/// Runs callables with continuation capture.
pub struct Runtime {
    builder: InterpreterBuilder,
}

impl Runtime {
    /// `debugger` statements always suspend under the runtime.
    pub fn new(builder: InterpreterBuilder) -> Self {
        Runtime {
            builder: builder.debugger_statements(DebuggerStatements::Suspend),
        }
    }

    /// Parse `wrapped_source` and evaluate its single expression to a
    /// function.
    #[tracing::instrument(level = "debug", skip_all, fields(len = wrapped_source.len()))]
    pub fn evaluate_callable(&self, wrapped_source: &str) -> Result<Callable, EvalCallableError> {
        let tree = stepwise_parse::parse(wrapped_source, ParseOptions::default())?;
        let mut interpreter = self.builder.clone().build(tree, wrapped_source);
        let function = interpreter.evaluate_lone_function()?;
        Ok(Callable {
            interpreter,
            function,
        })
    }

    /// Call `callable` with no arguments.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, mut callable: Callable) -> Result<Reified, Unwind> {
        let tree = callable.interpreter.shared_tree();
        match callable.interpreter.call_reified(&callable.function, &NeverHalt) {
            ReifiedRun::Returned(frames) => Ok(Reified {
                frames,
                is_continuation: false,
                tree,
            }),
            ReifiedRun::Suspended(frames) => {
                tracing::debug!(frames = frames.len(), "suspended as continuation");
                Ok(Reified {
                    frames,
                    is_continuation: true,
                    tree,
                })
            }
            ReifiedRun::Raised { value, frames } => {
                let error = ThrownError::from_value(value);
                tracing::debug!(name = %error.name, frames = frames.len(), "unwound");
                Err(Unwind {
                    error,
                    frames,
                    tree,
                })
            }
        }
    }
}

/// A function ready to run, with the interpreter that owns its tree.
pub struct Callable {
    interpreter: Interpreter,
    function: Rc<Closure>,
}

impl Callable {
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn function(&self) -> &Rc<Closure> {
        &self.function
    }
}

/// A completed or suspended run.
#[derive(Clone, Debug)]
pub struct Reified {
    /// The callee's activation, plus its callers when suspended.
    pub frames: FrameChain,
    /// Stopped at a `debugger` statement rather than returning.
    pub is_continuation: bool,
    tree: Rc<SyntaxTree>,
}

impl Reified {
    /// The retained or suspended activation.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.top()
    }

    /// Tree the frames' program counters point into.
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// `None` when no activation was retained.
    pub fn into_outcome(self) -> Option<Outcome> {
        if self.is_continuation {
            return Some(Outcome::Halted {
                frames: self.frames,
                reason: HaltReason::DebuggerStatement,
            });
        }
        let scope = self.current_frame()?.scope.clone();
        Some(Outcome::Completed { scope })
    }
}

/// An uncaught throw out of the callable.
#[derive(Clone, Debug)]
pub struct Unwind {
    pub error: ThrownError,
    pub frames: FrameChain,
    tree: Rc<SyntaxTree>,
}

impl Unwind {
    /// Validated frame chain of the throw site.
    pub fn recreate_frames(&self) -> Result<&FrameChain, FrameChainError> {
        self.frames.validate()?;
        Ok(&self.frames)
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn into_outcome(self) -> Outcome {
        Outcome::Raised {
            error: self.error,
            frames: self.frames,
        }
    }
}

#[cfg(test)]
mod tests;
