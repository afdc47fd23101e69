//! Editor model.
//!
//! The debugger reads the text and the breakpoint gutter through [`Editor`]
//! and writes source markers back through it. [`EditorState`] is the
//! in-memory implementation used by the CLI, the playground and tests.
//! Rows and columns are 0-based; columns count characters.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use stepwise_ir::LineOffsetTable;

/// A 0-based row/column position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// How a marker is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerType {
    Text,
    FullLine,
    ScreenLine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerId(u32);

impl MarkerId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub range: Range,
    pub class: String,
    pub kind: MarkerType,
    pub in_front: bool,
}

/// Editor operations the debugger depends on.
pub trait Editor {
    fn text(&self) -> &str;

    /// Replace the whole document.
    fn set_text(&mut self, text: &str);

    /// Row of the first gutter breakpoint.
    fn breakpoint_row(&self) -> Option<usize>;

    /// Document position of a byte offset; offsets past the end clamp.
    fn index_to_position(&self, offset: usize) -> Position;

    fn add_marker(&mut self, range: Range, class: &str, kind: MarkerType, in_front: bool)
        -> MarkerId;

    /// Removing an unknown id does nothing.
    fn remove_marker(&mut self, id: MarkerId);

    /// All markers, in creation order.
    fn markers(&self) -> Vec<Marker>;

    fn clear_breakpoints(&mut self);
}

/// In-memory editor document.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    text: String,
    lines: LineOffsetTable,
    breakpoints: BTreeSet<usize>,
    markers: BTreeMap<MarkerId, Marker>,
    next_marker: u32,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        let mut state = EditorState::default();
        state.set_text(text);
        state
    }

    /// Toggle a gutter breakpoint on.
    pub fn set_breakpoint(&mut self, row: usize) {
        self.breakpoints.insert(row);
    }

    pub fn clear_breakpoint(&mut self, row: usize) {
        self.breakpoints.remove(&row);
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.breakpoints.iter().copied()
    }
}

impl Editor for EditorState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.lines = LineOffsetTable::build(text);
    }

    fn breakpoint_row(&self) -> Option<usize> {
        self.breakpoints.first().copied()
    }

    fn index_to_position(&self, offset: usize) -> Position {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        let pos = self.lines.position(&self.text, offset);
        Position {
            row: pos.line.saturating_sub(1) as usize,
            column: pos.column as usize,
        }
    }

    fn add_marker(
        &mut self,
        range: Range,
        class: &str,
        kind: MarkerType,
        in_front: bool,
    ) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            id,
            Marker {
                id,
                range,
                class: class.to_owned(),
                kind,
                in_front,
            },
        );
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn markers(&self) -> Vec<Marker> {
        self.markers.values().cloned().collect()
    }

    fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }
}

/// Remove every marker of `class`.
pub fn remove_markers_of_class(editor: &mut impl Editor, class: &str) {
    let stale: Vec<MarkerId> = editor
        .markers()
        .into_iter()
        .filter(|marker| marker.class == class)
        .map(|marker| marker.id)
        .collect();
    for id in stale {
        editor.remove_marker(id);
    }
}
