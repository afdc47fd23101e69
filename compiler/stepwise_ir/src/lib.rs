//! Stepwise IR - syntax tree types shared by the parser, interpreter and debugger.
//!
//! - Spans for byte ranges
//! - `LineOffsetTable` for offset ↔ line/column
//! - Flat `SyntaxTree` arena addressed by `NodeId`
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - **Parent links instead of back-pointers**: navigation only, no ownership
//! - **Per-run trees**: a tree is parsed, executed and dropped; nothing is
//!   carried between runs

mod line_table;
mod node;
mod number;
mod span;
mod tree;

pub use line_table::{LineOffsetTable, LinePosition};
pub use node::{
    AssignOp, BinaryOp, Literal, LogicalOp, Node, NodeId, NodeKind, SourceLocation, SourceType,
    UnaryOp, UpdateOp, VarKind,
};
pub use number::format_number;
pub use span::{Span, SpanError};
pub use tree::{ChildList, SyntaxTree};
