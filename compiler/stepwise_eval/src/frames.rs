//! Call frames.
//!
//! - [`CallStack`]: the live activation stack, pushed per call and popped on
//!   return
//! - [`FrameChain`]: an immutable snapshot of that stack, taken when
//!   execution halts or an exception unwinds, innermost frame first
//!
//! Snapshot frames link to their caller by index into the same chain, so a
//! chain is acyclic by construction and needs no back-pointers.

use stepwise_ir::NodeId;
use thiserror::Error;

use crate::environment::ScopeRef;

/// One live activation.
#[derive(Clone, Debug)]
pub struct Activation {
    /// Statement or expression being evaluated.
    pub pc: NodeId,
    /// Innermost scope of the activation; block scopes replace it while active.
    pub scope: ScopeRef,
    /// Function name; `None` for the program and anonymous functions.
    pub name: Option<String>,
}

/// Live call stack with a depth limit.
#[derive(Clone, Debug)]
pub struct CallStack {
    activations: Vec<Activation>,
    max_depth: usize,
}

/// The depth limit was reached; the activation was not pushed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StackOverflow;

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            activations: Vec::new(),
            max_depth,
        }
    }

    pub fn push(&mut self, activation: Activation) -> Result<(), StackOverflow> {
        if self.activations.len() >= self.max_depth {
            return Err(StackOverflow);
        }
        self.activations.push(activation);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Activation> {
        self.activations.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.activations.len()
    }

    #[inline]
    pub fn top(&self) -> Option<&Activation> {
        self.activations.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut Activation> {
        self.activations.last_mut()
    }

    /// Snapshot the stack, innermost activation first.
    pub fn capture(&self) -> FrameChain {
        let len = self.activations.len();
        let frames = self
            .activations
            .iter()
            .rev()
            .enumerate()
            .map(|(i, activation)| Frame {
                pc: activation.pc,
                scope: activation.scope.clone(),
                name: activation.name.clone(),
                parent: (i + 1 < len).then_some(i + 1),
            })
            .collect();
        FrameChain { frames }
    }
}

/// A captured activation.
#[derive(Clone, Debug)]
pub struct Frame {
    pub pc: NodeId,
    pub scope: ScopeRef,
    pub name: Option<String>,
    /// Index of the calling frame in the owning chain.
    pub parent: Option<usize>,
}

/// Snapshot of the call stack, innermost frame at index 0.
#[derive(Clone, Debug, Default)]
pub struct FrameChain {
    frames: Vec<Frame>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FrameChainError {
    #[error("frame chain is empty")]
    Empty,
    #[error("frame {index} links to parent {parent} in a chain of {len}")]
    BadParent {
        index: usize,
        parent: usize,
        len: usize,
    },
}

impl FrameChain {
    /// Build a chain from frames ordered innermost first.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        FrameChain { frames }
    }

    /// Check the chain is non-empty and every parent link points strictly
    /// further from the top.
    pub fn validate(&self) -> Result<(), FrameChainError> {
        if self.frames.is_empty() {
            return Err(FrameChainError::Empty);
        }
        let len = self.frames.len();
        for (index, frame) in self.frames.iter().enumerate() {
            if let Some(parent) = frame.parent {
                if parent <= index || parent >= len {
                    return Err(FrameChainError::BadParent { index, parent, len });
                }
            }
        }
        Ok(())
    }

    /// Innermost frame.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Walk from the top frame through `parent` links.
    pub fn walk(&self) -> ChainWalk<'_> {
        ChainWalk {
            chain: self,
            next: if self.frames.is_empty() { None } else { Some(0) },
        }
    }
}

/// Iterator following `parent` links from the top frame.
pub struct ChainWalk<'a> {
    chain: &'a FrameChain,
    next: Option<usize>,
}

impl<'a> Iterator for ChainWalk<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<&'a Frame> {
        let frame = self.chain.get(self.next?)?;
        self.next = frame.parent;
        Some(frame)
    }
}

#[cfg(test)]
mod tests;
