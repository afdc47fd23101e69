//! Errors surfaced by the debugger.
//!
//! Only host-level failures are errors: malformed source, a wrapper that does
//! not evaluate to a function, or a corrupt frame chain. A script that throws
//! is a normal outcome rendered in the exception banner.

use stepwise_eval::{EvalCallableError, FrameChainError};
use stepwise_parse::ParseError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DebugError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Wrap(#[from] EvalCallableError),
    #[error("invalid frame chain: {0}")]
    FrameChain(#[from] FrameChainError),
}
