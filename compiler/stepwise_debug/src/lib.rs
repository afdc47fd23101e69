//! Stepwise Debug - breakpoint resolution and stepwise execution.
//!
//! # Architecture
//!
//! ```text
//! editor row ──► locator ──► binder ──► driver ──► Outcome
//!                                         │
//!            view ◄── reconstructor ◄─────┘
//!                          │
//!                     translator (wrapped offsets → editor rows)
//! ```
//!
//! - [`locate`]: line → smallest enclosing statement, scanning forward
//! - [`bind`]: tags the breakpoint statement and picks the halt predicate
//! - [`Debugger`]: `step` (direct) and `run` (wrapped, reified) sessions
//! - [`display_scope`] / [`set_exception`]: variable list and banner trace
//! - [`to_row_column`]: undoes the wrap prefix shift

mod binder;
mod config;
mod driver;
mod editor;
mod error;
mod examples;
mod locator;
mod reconstructor;
mod translator;
mod tree_view;
mod view;

pub use binder::{bind, Binding};
pub use config::DebuggerConfig;
pub use driver::{Debugger, Report, RunStatus};
pub use editor::{
    remove_markers_of_class, Editor, EditorState, Marker, MarkerId, MarkerType, Position, Range,
};
pub use error::DebugError;
pub use examples::{Example, UnknownExample};
pub use locator::locate;
pub use reconstructor::{display_scope, render_value, set_exception};
pub use translator::{span_to_range, to_row_column, OffsetBase};
pub use tree_view::{Edge, TreeView};
pub use view::{ExceptionBanner, Headline, Snapshot, VariableEntry, VariableList};
