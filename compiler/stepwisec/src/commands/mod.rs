//! Command handlers for the Stepwise CLI.
//!
//! `step` and `run` drive a [`Debugger`] over a file or a built-in example
//! and print the resulting view; `ast` prints the tree outline.

use serde::Serialize;
use stepwise_debug::{
    DebugError, Debugger, EditorState, Example, Report, RunStatus, Snapshot,
};

mod render;

pub use render::render_text;

/// Which execution path to take.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Direct interpretation, honours `--break`.
    Step,
    /// Wrapped function through the reified runtime.
    Run,
}

/// Options shared by `step`, `run` and `example`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugOptions {
    /// 1-based source line.
    pub breakpoint_line: Option<usize>,
    pub json: bool,
}

/// Parse trailing options. Returns the first positional argument, if any.
pub fn parse_debug_options(args: &[String]) -> Result<(Option<String>, DebugOptions), String> {
    let mut options = DebugOptions::default();
    let mut positional = None;
    for arg in args {
        if let Some(line) = arg.strip_prefix("--break=") {
            match line.parse::<usize>() {
                Ok(line) if line > 0 => options.breakpoint_line = Some(line),
                _ => return Err(format!("invalid breakpoint line '{line}'")),
            }
        } else if arg == "--json" {
            options.json = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if positional.is_none() {
            positional = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok((positional, options))
}

#[derive(Serialize)]
struct JsonView<'a> {
    status: RunStatus,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

/// Debug `source` and render the view as text or JSON.
pub fn debug_source(source: &str, mode: Mode, options: &DebugOptions) -> Result<String, DebugError> {
    let mut editor = EditorState::new(source);
    if let Some(line) = options.breakpoint_line {
        editor.set_breakpoint(line - 1);
    }
    let mut debugger = Debugger::new(editor);
    let report = match mode {
        Mode::Step => debugger.step()?,
        Mode::Run => debugger.run()?,
    };
    Ok(render(&report, &debugger.snapshot(), options.json))
}

fn render(report: &Report, snapshot: &Snapshot, json: bool) -> String {
    if !json {
        return render_text(report.status, snapshot);
    }
    let view = JsonView {
        status: report.status,
        snapshot,
    };
    // Plain data with string keys; serialization cannot fail.
    serde_json::to_string_pretty(&view).unwrap_or_default()
}

/// Indented outline of the tree parsed from `source`.
pub fn ast_source(source: &str) -> Result<String, DebugError> {
    let mut debugger = Debugger::new(EditorState::new(source));
    debugger.display_ast()?;
    Ok(debugger.tree_view().outline())
}

/// The source of a built-in example.
pub fn example_source(name: &str) -> Result<&'static str, String> {
    name.parse::<Example>()
        .map(Example::source)
        .map_err(|err| format!("{err}; available: {}", example_names()))
}

pub fn example_names() -> String {
    Example::ALL.map(Example::name).join(", ")
}

/// `step <file>` / `run <file>`.
pub fn debug_file(path: &str, mode: Mode, options: &DebugOptions) {
    let source = read_file(path);
    print_or_exit(debug_source(&source, mode, options));
}

/// `ast <file>`.
pub fn ast_file(path: &str) {
    let source = read_file(path);
    print_or_exit(ast_source(&source));
}

/// `example <name>`: list the source, then debug it.
pub fn debug_example(name: &str, mode: Mode, options: &DebugOptions) {
    let source = match example_source(name) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };
    if !options.json {
        println!("{}", numbered(source));
        println!();
    }
    print_or_exit(debug_source(source, mode, options));
}

/// `source` with 1-based line numbers.
pub fn numbered(source: &str) -> String {
    let width = source.lines().count().max(1).to_string().len();
    source
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:>width$} | {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_or_exit(result: Result<String, DebugError>) {
    match result {
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
