//! Debug view: the variable list and the exception banner.

use std::fmt;

use serde::Serialize;

use crate::editor::Marker;

/// One row of the variable list. A `None` name is a status line such as
/// "not run yet".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariableEntry {
    pub name: Option<String>,
    pub value: String,
}

/// Variables in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableList {
    entries: Vec<VariableEntry>,
}

impl VariableList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally.
    pub fn add_variable(&mut self, name: Option<&str>, value: impl Into<String>) {
        self.entries.push(VariableEntry {
            name: name.map(str::to_owned),
            value: value.into(),
        });
    }

    /// Append unless `name` is already listed. Status lines are always added.
    pub fn set_variable(&mut self, name: Option<&str>, value: impl Into<String>) {
        if let Some(name) = name {
            if self.contains(name) {
                return;
            }
        }
        self.add_variable(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name.as_deref() == Some(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| entry.value.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[VariableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for VariableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match &entry.name {
                Some(name) => writeln!(f, "{name} = {}", entry.value)?,
                None => writeln!(f, "({})", entry.value)?,
            }
        }
        Ok(())
    }
}

/// First line of the banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Headline {
    Exception { name: String, message: String },
    DebuggerStatement,
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Headline::Exception { name, message } => write!(f, "{name}: {message}"),
            Headline::DebuggerStatement => f.write_str("Stopped execution: Debugger statement"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExceptionBanner {
    pub visible: bool,
    pub headline: Option<Headline>,
    /// `at: <Type> @ line L, column C`, innermost frame first.
    pub trace: Vec<String>,
}

impl ExceptionBanner {
    pub fn hide(&mut self) {
        *self = ExceptionBanner::default();
    }

    pub fn show(&mut self, headline: Headline) {
        self.visible = true;
        self.headline = Some(headline);
        self.trace.clear();
    }

    pub fn push_trace(&mut self, line: String) {
        self.trace.push(line);
    }

    /// Banner text, one line per entry; empty when hidden.
    pub fn text(&self) -> String {
        if !self.visible {
            return String::new();
        }
        let mut out = self
            .headline
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        for line in &self.trace {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// Everything the UI shows after an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub variables: VariableList,
    pub banner: ExceptionBanner,
    pub markers: Vec<Marker>,
    pub output: String,
}
