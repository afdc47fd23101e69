//! Position translator: interpreter offsets to editor positions.
//!
//! The `run` path executes a wrapped copy of the editor text: the wrap
//! prefix and one newline come first, so every offset it reports is shifted
//! by `prefix_len + 1`. The `step` path executes the text as is.

use stepwise_ir::Span;

use crate::editor::{Editor, Position, Range};

/// Shift applied to offsets reported by an execution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OffsetBase {
    /// Offsets index the editor text directly.
    #[default]
    Plain,
    /// Offsets index the text wrapped behind a prefix of this many bytes.
    Wrapped { prefix_len: usize },
}

impl OffsetBase {
    /// Offset in the editor text; shifts below the prefix clamp to zero.
    pub fn unshift(self, offset: usize) -> usize {
        match self {
            OffsetBase::Plain => offset,
            OffsetBase::Wrapped { prefix_len } => offset.saturating_sub(prefix_len + 1),
        }
    }
}

pub fn to_row_column(editor: &impl Editor, offset: usize, base: OffsetBase) -> Position {
    editor.index_to_position(base.unshift(offset))
}

/// Editor range covered by `span`.
pub fn span_to_range(editor: &impl Editor, span: Span, base: OffsetBase) -> Range {
    Range::new(
        to_row_column(editor, span.start as usize, base),
        to_row_column(editor, span.end as usize, base),
    )
}
