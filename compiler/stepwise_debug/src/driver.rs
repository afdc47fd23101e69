//! Execution driver: the debugger session.
//!
//! `step` interprets the editor text directly and honours the gutter
//! breakpoint. `run` wraps the text as a function body and runs it through
//! the reified runtime, where `debugger` statements suspend. Both paths feed
//! their outcome through the same display logic.

use serde::Serialize;
use stepwise_eval::{buffer_handler, FrameChain, InterpreterBuilder, Outcome, Runtime, ScopeRef};
use stepwise_ir::{NodeId, SyntaxTree};
use stepwise_parse::ParseOptions;

use crate::binder::bind;
use crate::config::DebuggerConfig;
use crate::editor::{remove_markers_of_class, Editor};
use crate::error::DebugError;
use crate::examples::Example;
use crate::reconstructor::{display_scope, set_exception};
use crate::translator::OffsetBase;
use crate::tree_view::TreeView;
use crate::view::{ExceptionBanner, Headline, Snapshot, VariableList};

const NOT_RUN_YET: &str = "not run yet";
const NO_EXCEPTION: &str = "no exception triggered";

/// How the last `step` or `run` ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Completed,
    /// Stopped at the breakpoint or a `debugger` statement.
    Halted,
    Raised,
    /// Nothing produced a scope to show.
    NoScope,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub status: RunStatus,
    /// Captured `console.log` output.
    pub output: String,
}

pub struct Debugger<E: Editor> {
    editor: E,
    config: DebuggerConfig,
    builder: InterpreterBuilder,
    variables: VariableList,
    banner: ExceptionBanner,
    tree_view: TreeView,
    output: String,
}

impl<E: Editor> Debugger<E> {
    pub fn new(editor: E) -> Self {
        Self::with_config(editor, DebuggerConfig::default(), InterpreterBuilder::new())
    }

    pub fn with_config(editor: E, config: DebuggerConfig, builder: InterpreterBuilder) -> Self {
        let mut debugger = Debugger {
            editor,
            config,
            builder,
            variables: VariableList::new(),
            banner: ExceptionBanner::default(),
            tree_view: TreeView::new(),
            output: String::new(),
        };
        debugger.reset();
        debugger
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    pub fn variables(&self) -> &VariableList {
        &self.variables
    }

    pub fn banner(&self) -> &ExceptionBanner {
        &self.banner
    }

    pub fn tree_view(&self) -> &TreeView {
        &self.tree_view
    }

    /// Current view state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            variables: self.variables.clone(),
            banner: self.banner.clone(),
            markers: self.editor.markers(),
            output: self.output.clone(),
        }
    }

    /// Back to the "not run yet" state.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.clear_run_state();
        self.variables.add_variable(None, NOT_RUN_YET);
    }

    /// The editor text changed.
    pub fn on_change(&mut self, text: &str) {
        self.editor.set_text(text);
        self.reset();
    }

    /// Replace the text with `example` and drop all breakpoints.
    pub fn load_example(&mut self, example: Example) {
        tracing::debug!(%example, "loading example");
        self.editor.set_text(example.source());
        self.editor.clear_breakpoints();
        self.reset();
    }

    /// Parse the editor text into the tree view.
    pub fn display_ast(&mut self) -> Result<(), DebugError> {
        let tree = stepwise_parse::parse(self.editor.text(), ParseOptions::default())?;
        self.tree_view.display(tree);
        Ok(())
    }

    pub fn hover(&mut self, id: NodeId) {
        self.tree_view.hover(&mut self.editor, id, &self.config.marker_class);
    }

    pub fn unhover(&mut self) {
        self.tree_view.unhover(&mut self.editor);
    }

    /// Interpret the editor text up to the breakpoint, or to the end.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn step(&mut self) -> Result<Report, DebugError> {
        self.variables.clear();
        self.clear_run_state();

        let source = self.editor.text().to_owned();
        let mut tree = stepwise_parse::parse(&source, ParseOptions::default())?;
        let binding = bind(&mut tree, self.editor.breakpoint_row());

        let print = buffer_handler();
        let mut interpreter = self
            .builder
            .clone()
            .print_handler(print.clone())
            .build(tree, source);
        let root = interpreter.globals().clone();
        let scope = interpreter.new_program_scope();
        let outcome = interpreter.run_with_frame(scope, binding.halt_predicate());

        let status = self.show_outcome(outcome, &root, interpreter.tree())?;
        Ok(self.finish(status, print.get_output()))
    }

    /// Run the editor text as the body of a function through the reified
    /// runtime.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> Result<Report, DebugError> {
        self.display_ast()?;
        self.variables.clear();
        self.clear_run_state();

        let wrapped = self.config.wrap(self.editor.text());
        let base = OffsetBase::Wrapped {
            prefix_len: self.config.wrap_prefix_len(),
        };
        let print = buffer_handler();
        let runtime = Runtime::new(self.builder.clone().print_handler(print.clone()));
        let callable = runtime.evaluate_callable(&wrapped)?;
        let root = callable.interpreter().globals().clone();

        let status = match runtime.run(callable) {
            Ok(reified) => match reified.current_frame().map(|frame| frame.scope.clone()) {
                Some(scope) => {
                    display_scope(&mut self.variables, &scope, &root);
                    if reified.is_continuation {
                        self.show_frames(
                            reified.tree(),
                            &reified.frames,
                            base,
                            Headline::DebuggerStatement,
                        );
                        RunStatus::Halted
                    } else {
                        RunStatus::Completed
                    }
                }
                None => self.show_no_scope(),
            },
            Err(unwind) => {
                let frames = unwind.recreate_frames()?;
                match frames.top().map(|frame| frame.scope.clone()) {
                    Some(scope) => {
                        display_scope(&mut self.variables, &scope, &root);
                        let headline = Headline::Exception {
                            name: unwind.error.name.clone(),
                            message: unwind.error.message.clone(),
                        };
                        self.show_frames(unwind.tree(), frames, base, headline);
                        RunStatus::Raised
                    }
                    None => self.show_no_scope(),
                }
            }
        };
        Ok(self.finish(status, print.get_output()))
    }

    /// Display an outcome of the direct path. Offsets are plain.
    fn show_outcome(
        &mut self,
        outcome: Outcome,
        root: &ScopeRef,
        tree: &SyntaxTree,
    ) -> Result<RunStatus, DebugError> {
        let Some(scope) = outcome.scope() else {
            return Ok(self.show_no_scope());
        };
        display_scope(&mut self.variables, &scope, root);
        let status = match outcome {
            Outcome::Completed { .. } => RunStatus::Completed,
            Outcome::Halted { frames, .. } => {
                frames.validate()?;
                self.show_frames(tree, &frames, OffsetBase::Plain, Headline::DebuggerStatement);
                RunStatus::Halted
            }
            Outcome::Raised { error, frames } => {
                frames.validate()?;
                let headline = Headline::Exception {
                    name: error.name,
                    message: error.message,
                };
                self.show_frames(tree, &frames, OffsetBase::Plain, headline);
                RunStatus::Raised
            }
        };
        Ok(status)
    }

    fn show_frames(
        &mut self,
        tree: &SyntaxTree,
        frames: &FrameChain,
        base: OffsetBase,
        headline: Headline,
    ) {
        set_exception(
            &mut self.banner,
            &mut self.editor,
            tree,
            frames,
            base,
            headline,
            &self.config.marker_class,
        );
    }

    fn show_no_scope(&mut self) -> RunStatus {
        self.variables.set_variable(None, NO_EXCEPTION);
        RunStatus::NoScope
    }

    /// Hide the banner and drop the markers of the previous run.
    fn clear_run_state(&mut self) {
        self.banner.hide();
        self.output.clear();
        remove_markers_of_class(&mut self.editor, &self.config.marker_class);
    }

    fn finish(&mut self, status: RunStatus, output: String) -> Report {
        tracing::debug!(
            ?status,
            variables = self.variables.len(),
            trace = self.banner.trace.len(),
            "debug view updated"
        );
        self.output.clone_from(&output);
        Report { status, output }
    }
}
