//! Function calls: closure creation, argument binding and activations.

use std::rc::Rc;

use stepwise_ir::{NodeId, NodeKind};

use super::{ControlAction, EvalResult, ExecResult, Executor};
use crate::environment::{Mutability, ScopeRef};
use crate::errors::{not_a_constructor, not_a_function};
use crate::frames::FrameChain;
use crate::halt::HaltReason;
use crate::value::{Closure, NativeKind, Object, Value};

impl Executor<'_> {
    /// Create a closure over `scope` for the function node `node`.
    pub(super) fn make_closure(
        &self,
        node: NodeId,
        name: Option<&str>,
        params: &[NodeId],
        body: NodeId,
        scope: ScopeRef,
    ) -> Value {
        let tree = self.tree;
        let params = params
            .iter()
            .filter_map(|&param| tree.identifier_name(param))
            .map(str::to_owned)
            .collect();
        Value::Function(Rc::new(Closure {
            name: name.map(str::to_owned),
            params,
            body,
            scope,
            span: tree.span(node),
            source: Rc::clone(self.source),
        }))
    }

    /// A named function expression sees its own name in a scope between the
    /// closure and its defining scope.
    pub(super) fn function_expression(
        &mut self,
        node: NodeId,
        name: Option<NodeId>,
        params: &[NodeId],
        body: NodeId,
    ) -> Value {
        let tree = self.tree;
        let name = name.and_then(|id| tree.identifier_name(id));
        let Some(name) = name else {
            return self.make_closure(node, None, params, body, self.scope());
        };
        let name_scope = self.scope().child();
        let closure = self.make_closure(node, Some(name), params, body, name_scope.clone());
        name_scope
            .borrow_mut()
            .define(name, closure.clone(), Mutability::Immutable);
        closure
    }

    fn eval_arguments(&mut self, arguments: &[NodeId]) -> Result<Vec<Value>, ControlAction> {
        let mut args = Vec::with_capacity(arguments.len());
        for &argument in arguments {
            args.push(self.eval(argument)?);
        }
        Ok(args)
    }

    pub(super) fn eval_call(&mut self, id: NodeId, callee: NodeId, arguments: &[NodeId]) -> EvalResult {
        let function = self.eval(callee)?;
        let args = self.eval_arguments(arguments)?;
        self.set_pc(id);
        let callee_text = self.source_text(callee);
        self.call_value(&function, args, callee_text)
    }

    pub(super) fn eval_new(&mut self, id: NodeId, callee: NodeId, arguments: &[NodeId]) -> EvalResult {
        let constructor = self.eval(callee)?;
        let args = self.eval_arguments(arguments)?;
        self.set_pc(id);
        match &constructor {
            Value::Native(native) if matches!(native.kind, NativeKind::ErrorConstructor(_)) => {
                self.call_native(native, args)
            }
            Value::Function(closure) => {
                // No `this`: a constructor yields its returned object, or a
                // fresh empty one.
                let result = self.call_closure(closure, args)?;
                Ok(match result {
                    Value::Object(_) | Value::Array(_) | Value::Error(_) => result,
                    _ => Value::object(Object::default()),
                })
            }
            _ => {
                let text = self.source_text(callee);
                Err(self.throw(not_a_constructor(text)))
            }
        }
    }

    /// Call any value; `callee_text` names it in the `TypeError` raised for
    /// non-functions.
    pub(super) fn call_value(
        &mut self,
        function: &Value,
        args: Vec<Value>,
        callee_text: &str,
    ) -> EvalResult {
        match function {
            Value::Function(closure) => self.call_closure(closure, args),
            Value::Native(native) => self.call_native(native, args),
            _ => Err(self.throw(not_a_function(callee_text))),
        }
    }

    pub(super) fn call_closure(&mut self, closure: &Rc<Closure>, args: Vec<Value>) -> EvalResult {
        self.enter_function(closure, args)?;
        let result = self.run_function_body(closure);
        self.stack.pop();
        match result {
            Ok(()) | Err(ControlAction::Break | ControlAction::Continue) => Ok(Value::Undefined),
            Err(ControlAction::Return(value)) => Ok(value),
            Err(other) => Err(other),
        }
    }

    /// Call `closure` with no arguments and snapshot its activation before
    /// popping it.
    pub(super) fn call_reified(&mut self, closure: &Rc<Closure>) -> Result<FrameChain, ControlAction> {
        self.enter_function(closure, Vec::new())?;
        let result = self.run_function_body(closure);
        let frames = self.stack.capture();
        self.stack.pop();
        match result {
            Ok(())
            | Err(ControlAction::Return(_) | ControlAction::Break | ControlAction::Continue) => {
                Ok(frames)
            }
            Err(other) => Err(other),
        }
    }

    /// Push an activation for `closure` with its parameters bound and its
    /// declarations hoisted.
    fn enter_function(&mut self, closure: &Rc<Closure>, args: Vec<Value>) -> ExecResult {
        let scope = closure.scope.child();
        {
            let mut bindings = scope.borrow_mut();
            let mut args = args.into_iter();
            for param in &closure.params {
                let value = args.next().unwrap_or(Value::Undefined);
                bindings.define(param, value, Mutability::Mutable);
            }
        }
        self.push_activation(closure.body, scope.clone(), closure.name.clone())?;
        tracing::trace!(name = ?closure.name, depth = self.stack.depth(), "call");
        let body = function_body(self.tree, closure.body);
        self.hoist_declarations(body, &scope);
        Ok(())
    }

    /// The body block is never run through `exec_statement`, so a breakpoint
    /// bound to it is checked here, after the parameters are bound.
    fn run_function_body(&mut self, closure: &Rc<Closure>) -> ExecResult {
        if self.halt.should_halt(self.tree.node(closure.body)) {
            return Err(self.halt_with(HaltReason::Breakpoint));
        }
        let body = function_body(self.tree, closure.body);
        self.exec_statements(body)
    }
}

fn function_body(tree: &stepwise_ir::SyntaxTree, body: NodeId) -> &[NodeId] {
    match tree.kind(body) {
        NodeKind::BlockStatement { body } => body,
        _ => &[],
    }
}
