//! Centralized error constructors for the evaluator.
//!
//! Script-level failures are JavaScript error values thrown inside the
//! interpreter; only failures of the host API are Rust errors.

use stepwise_parse::ParseError;
use thiserror::Error;

use crate::value::{ErrorKind, Value};

pub use crate::frames::FrameChainError;

/// Failure turning wrapped source text into a callable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalCallableError {
    #[error("failed to parse wrapped source: {0}")]
    Parse(#[from] ParseError),
    #[error("wrapped source does not evaluate to a function")]
    NotCallable,
}

// Reference errors

pub fn not_defined(name: &str) -> Value {
    Value::error(ErrorKind::ReferenceError, format!("{name} is not defined"))
}

// Type errors

pub fn assignment_to_constant() -> Value {
    Value::error(ErrorKind::TypeError, "Assignment to constant variable.")
}

pub fn not_a_function(callee_text: &str) -> Value {
    Value::error(
        ErrorKind::TypeError,
        format!("{callee_text} is not a function"),
    )
}

pub fn not_a_constructor(callee_text: &str) -> Value {
    Value::error(
        ErrorKind::TypeError,
        format!("{callee_text} is not a constructor"),
    )
}

pub fn cannot_read_property(receiver: &Value, key: &str) -> Value {
    Value::error(
        ErrorKind::TypeError,
        format!(
            "Cannot read properties of {} (reading '{key}')",
            receiver.to_display_string()
        ),
    )
}

pub fn cannot_set_property(receiver: &Value, key: &str) -> Value {
    Value::error(
        ErrorKind::TypeError,
        format!(
            "Cannot set properties of {} (setting '{key}')",
            receiver.to_display_string()
        ),
    )
}

pub fn reduce_of_empty_array() -> Value {
    Value::error(
        ErrorKind::TypeError,
        "Reduce of empty array with no initial value",
    )
}

// Range errors

pub fn call_stack_exceeded() -> Value {
    Value::error(ErrorKind::RangeError, "Maximum call stack size exceeded")
}

pub fn invalid_array_length() -> Value {
    Value::error(ErrorKind::RangeError, "Invalid array length")
}
