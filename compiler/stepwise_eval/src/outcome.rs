//! Result of driving a program or callable to a stop.

use crate::environment::ScopeRef;
use crate::frames::FrameChain;
use crate::halt::HaltReason;
use crate::value::Value;

/// How a run ended. Expected halts are values, not errors.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// Ran to the end; `scope` is the scope to display.
    Completed { scope: ScopeRef },
    /// Stopped before a breakpoint statement or at a `debugger` statement.
    Halted {
        frames: FrameChain,
        reason: HaltReason,
    },
    /// A value was thrown and not caught.
    Raised {
        error: ThrownError,
        frames: FrameChain,
    },
}

impl Outcome {
    /// Frames of a halted or raised run.
    pub fn frames(&self) -> Option<&FrameChain> {
        match self {
            Outcome::Completed { .. } => None,
            Outcome::Halted { frames, .. } | Outcome::Raised { frames, .. } => Some(frames),
        }
    }

    /// Scope to display: the completed scope or the top frame's scope.
    pub fn scope(&self) -> Option<ScopeRef> {
        match self {
            Outcome::Completed { scope } => Some(scope.clone()),
            other => other.frames()?.top().map(|frame| frame.scope.clone()),
        }
    }
}

/// A thrown value with the `name` and `message` shown in the banner.
#[derive(Clone, Debug)]
pub struct ThrownError {
    pub value: Value,
    pub name: String,
    pub message: String,
}

impl ThrownError {
    /// Error objects report their own name and message; any other thrown
    /// value is reported as `Uncaught` with its string form.
    pub fn from_value(value: Value) -> Self {
        let (name, message) = match &value {
            Value::Error(err) => (err.name.clone(), err.message.clone()),
            other => ("Uncaught".to_owned(), other.to_display_string()),
        };
        ThrownError {
            value,
            name,
            message,
        }
    }
}
