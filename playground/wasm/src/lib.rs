//! Stepwise Playground WASM Bindings
//!
//! Exposes a debugger session to JavaScript. The page owns the editor
//! widget and mirrors its text and gutter into the session; every call
//! returns the debug view as JSON.

use serde::Serialize;
use stepwise_debug::{
    Debugger, Edge, Editor, EditorState, Example, Range, RunStatus, Snapshot,
};
use stepwise_ir::NodeId;
use wasm_bindgen::prelude::*;

// Import console.log from JavaScript
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Initialize the WASM module (called once on load).
#[wasm_bindgen(start)]
pub fn init() {
    std::panic::set_hook(Box::new(console_error_panic_hook));
}

fn console_error_panic_hook(info: &std::panic::PanicHookInfo) {
    log(&info.to_string());
}

/// View returned to the page after every call.
#[derive(Serialize)]
struct Response {
    status: Option<RunStatus>,
    error: Option<String>,
    #[serde(flatten)]
    snapshot: Snapshot,
}

#[derive(Serialize)]
struct TreeNode {
    id: NodeId,
    #[serde(rename = "type")]
    type_name: &'static str,
    range: Range,
}

#[derive(Serialize)]
struct TreeLayout {
    nodes: Vec<TreeNode>,
    edges: Vec<Edge>,
    error: Option<String>,
}

/// One editor's debugger.
#[wasm_bindgen]
pub struct DebugSession {
    debugger: Debugger<EditorState>,
}

#[wasm_bindgen]
impl DebugSession {
    /// New session with the `error` example loaded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> DebugSession {
        let mut debugger = Debugger::new(EditorState::default());
        debugger.load_example(Example::default());
        DebugSession { debugger }
    }

    pub fn text(&self) -> String {
        self.debugger.editor().text().to_owned()
    }

    /// The editor text changed.
    pub fn set_text(&mut self, text: &str) -> String {
        self.debugger.on_change(text);
        self.view(None, None)
    }

    /// Load a built-in example by name; unknown names leave the text as is.
    pub fn load_example(&mut self, name: &str) -> String {
        match name.parse::<Example>() {
            Ok(example) => {
                self.debugger.load_example(example);
                self.view(None, None)
            }
            Err(err) => self.view(None, Some(err.to_string())),
        }
    }

    /// Gutter breakpoint on the 0-based `row`.
    pub fn set_breakpoint(&mut self, row: usize) {
        let editor = self.debugger.editor_mut();
        editor.clear_breakpoints();
        editor.set_breakpoint(row);
    }

    pub fn clear_breakpoints(&mut self) {
        self.debugger.editor_mut().clear_breakpoints();
    }

    pub fn reset(&mut self) -> String {
        self.debugger.reset();
        self.view(None, None)
    }

    pub fn step(&mut self) -> String {
        match self.debugger.step() {
            Ok(report) => self.view(Some(report.status), None),
            Err(err) => self.view(None, Some(err.to_string())),
        }
    }

    pub fn run(&mut self) -> String {
        match self.debugger.run() {
            Ok(report) => self.view(Some(report.status), None),
            Err(err) => self.view(None, Some(err.to_string())),
        }
    }

    /// Nodes and links of the tree shown by the last `run`.
    pub fn tree(&self) -> String {
        let tree_view = self.debugger.tree_view();
        let editor = self.debugger.editor();
        let nodes = tree_view
            .tree()
            .map(|tree| {
                tree.pre_order()
                    .into_iter()
                    .map(|id| TreeNode {
                        id,
                        type_name: tree.node(id).type_name(),
                        range: stepwise_debug::span_to_range(
                            editor,
                            tree.span(id),
                            stepwise_debug::OffsetBase::Plain,
                        ),
                    })
                    .collect()
            })
            .unwrap_or_default();
        to_json(&TreeLayout {
            nodes,
            edges: tree_view.edges(),
            error: None,
        })
    }

    pub fn hover(&mut self, node: u32) -> String {
        self.debugger.hover(NodeId::new(node));
        self.view(None, None)
    }

    pub fn unhover(&mut self) -> String {
        self.debugger.unhover();
        self.view(None, None)
    }

    fn view(&self, status: Option<RunStatus>, error: Option<String>) -> String {
        to_json(&Response {
            status,
            error,
            snapshot: self.debugger.snapshot(),
        })
    }
}

impl Default for DebugSession {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(r#"{{"error":"Serialization error: {e}"}}"#)
    })
}

/// Get version information.
#[wasm_bindgen]
pub fn version() -> String {
    format!("Stepwise {}", env!("CARGO_PKG_VERSION"))
}
