//! Stepwise Eval - tree-walking interpreter for the Stepwise debugger.
//!
//! # Architecture
//!
//! - `Scope` / `ScopeRef`: scope chain rooted at the interpreter's globals
//! - `CallStack` / `FrameChain`: live activations and their snapshots
//! - `HaltPredicate`: per-statement halting strategy passed into each run
//! - `Outcome`: completed, halted or raised, as a value
//! - `Runtime`: the reified path that keeps the callee's frame
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch

mod environment;
pub mod errors;
mod frames;
mod halt;
pub mod interpreter;
mod operators;
mod outcome;
mod print_handler;
mod runtime;
mod value;

pub use environment::{AssignError, Binding, LocalScope, Mutability, Scope, ScopeRef};
pub use errors::{EvalCallableError, FrameChainError};
pub use frames::{Activation, CallStack, ChainWalk, Frame, FrameChain, StackOverflow};
pub use halt::{DebuggerStatements, HaltAtBreakpoint, HaltPredicate, HaltReason, NeverHalt};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary, evaluate_update};
pub use outcome::{Outcome, ThrownError};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use runtime::{Callable, Reified, Runtime, Unwind};
pub use value::{
    ArrayMethod, ArrayRef, Closure, ErrorKind, ErrorObject, NativeFunction, NativeKind, Object,
    ObjectRef, StringMethod, Value,
};
