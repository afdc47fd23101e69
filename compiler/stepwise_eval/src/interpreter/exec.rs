//! Statement execution, declaration hoisting and block scopes.

use stepwise_ir::{NodeId, NodeKind, SyntaxTree, VarKind};

use super::{ControlAction, ExecResult, Executor};
use crate::environment::{Mutability, ScopeRef};
use crate::halt::{DebuggerStatements, HaltReason};
use crate::Value;

impl Executor<'_> {
    pub(super) fn exec_statements(&mut self, body: &[NodeId]) -> ExecResult {
        for &stmt in body {
            self.exec_statement(stmt)?;
        }
        Ok(())
    }

    pub(super) fn exec_statement(&mut self, id: NodeId) -> ExecResult {
        stepwise_stack::ensure_sufficient_stack(|| self.exec_statement_inner(id))
    }

    fn exec_statement_inner(&mut self, id: NodeId) -> ExecResult {
        let tree = self.tree;
        let node = tree.node(id);
        self.set_pc(id);
        if self.halt.should_halt(node) {
            return Err(self.halt_with(HaltReason::Breakpoint));
        }
        match &node.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.exec_declaration(*kind, declarations)
            }
            // Bound when the enclosing scope was entered.
            NodeKind::FunctionDeclaration { .. } | NodeKind::EmptyStatement => Ok(()),
            NodeKind::ExpressionStatement { expression } => self.eval(*expression).map(drop),
            NodeKind::BlockStatement { body } => self.exec_block(body),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(*test)?.is_truthy() {
                    self.exec_statement(*consequent)
                } else if let Some(alternate) = alternate {
                    self.exec_statement(*alternate)
                } else {
                    Ok(())
                }
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => self.exec_for(*init, *test, *update, *body),
            NodeKind::WhileStatement { test, body } => {
                while self.eval(*test)?.is_truthy() {
                    match self.exec_statement(*body) {
                        Ok(()) | Err(ControlAction::Continue) => {}
                        Err(ControlAction::Break) => break,
                        Err(other) => return Err(other),
                    }
                }
                Ok(())
            }
            NodeKind::ReturnStatement { argument } => {
                let value = match argument {
                    Some(argument) => self.eval(*argument)?,
                    None => Value::Undefined,
                };
                Err(ControlAction::Return(value))
            }
            NodeKind::ThrowStatement { argument } => {
                let value = self.eval(*argument)?;
                Err(self.throw_at(id, value))
            }
            NodeKind::BreakStatement => Err(ControlAction::Break),
            NodeKind::ContinueStatement => Err(ControlAction::Continue),
            NodeKind::DebuggerStatement => match self.debugger_statements {
                DebuggerStatements::Ignore => Ok(()),
                DebuggerStatements::Suspend => Err(self.halt_with(HaltReason::DebuggerStatement)),
            },
            _ => self.eval(id).map(drop),
        }
    }

    /// `var` declarators assign to the hoisted binding; `let`/`const` define
    /// in the innermost scope.
    fn exec_declaration(&mut self, kind: VarKind, declarations: &[NodeId]) -> ExecResult {
        let tree = self.tree;
        for &declarator in declarations {
            let NodeKind::VariableDeclarator { id, init } = tree.kind(declarator) else {
                continue;
            };
            let name = tree.identifier_name(*id).unwrap_or_default();
            match kind {
                VarKind::Var => {
                    if let Some(init) = init {
                        let value = self.eval(*init)?;
                        self.set_pc(declarator);
                        self.assign_or_define(name, value);
                    }
                }
                VarKind::Let | VarKind::Const => {
                    let value = match init {
                        Some(init) => self.eval(*init)?,
                        None => Value::Undefined,
                    };
                    let mutability = if kind == VarKind::Const {
                        Mutability::Immutable
                    } else {
                        Mutability::Mutable
                    };
                    self.scope().borrow_mut().define(name, value, mutability);
                }
            }
        }
        Ok(())
    }

    /// Assign through the chain, defining locally if hoisting missed it.
    fn assign_or_define(&mut self, name: &str, value: Value) {
        let scope = self.scope();
        if scope.borrow().lookup(name).is_some() {
            let assigned = scope.borrow_mut().assign(name, value.clone());
            if assigned.is_ok() {
                return;
            }
        }
        scope.borrow_mut().define(name, value, Mutability::Mutable);
    }

    fn exec_block(&mut self, body: &[NodeId]) -> ExecResult {
        if !declares_lexically(self.tree, body) {
            return self.exec_statements(body);
        }
        let block_scope = self.scope().child();
        self.hoist_functions(body, &block_scope);
        let outer = self.swap_scope(block_scope);
        let result = self.exec_statements(body);
        self.swap_scope(outer);
        result
    }

    fn exec_for(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> ExecResult {
        let tree = self.tree;
        let lexical_init = init.is_some_and(|init| {
            matches!(tree.kind(init), NodeKind::VariableDeclaration { kind, .. } if kind.is_lexical())
        });
        let outer = lexical_init.then(|| {
            let loop_scope = self.scope().child();
            self.swap_scope(loop_scope)
        });
        let result = self.run_for(init, test, update, body);
        if let Some(outer) = outer {
            self.swap_scope(outer);
        }
        result
    }

    fn run_for(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> ExecResult {
        let tree = self.tree;
        if let Some(init) = init {
            match tree.kind(init) {
                NodeKind::VariableDeclaration { kind, declarations } => {
                    self.set_pc(init);
                    self.exec_declaration(*kind, declarations)?;
                }
                _ => {
                    self.eval(init)?;
                }
            }
        }
        loop {
            if let Some(test) = test {
                if !self.eval(test)?.is_truthy() {
                    break;
                }
            }
            match self.exec_statement(body) {
                Ok(()) | Err(ControlAction::Continue) => {}
                Err(ControlAction::Break) => break,
                Err(other) => return Err(other),
            }
            if let Some(update) = update {
                self.eval(update)?;
            }
        }
        Ok(())
    }

    /// Hoist `var` names and function declarations of a function or program
    /// body into `scope`.
    pub(super) fn hoist_declarations(&mut self, body: &[NodeId], scope: &ScopeRef) {
        let mut names = Vec::new();
        for &stmt in body {
            collect_var_names(self.tree, stmt, &mut names);
        }
        {
            let mut scope = scope.borrow_mut();
            for name in names {
                if !scope.has_own(name) {
                    scope.define(name, Value::Undefined, Mutability::Mutable);
                }
            }
        }
        self.hoist_functions(body, scope);
    }

    /// Bind the function declarations directly inside `body`.
    fn hoist_functions(&mut self, body: &[NodeId], scope: &ScopeRef) {
        let tree = self.tree;
        for &stmt in body {
            if let NodeKind::FunctionDeclaration { id, params, body } = tree.kind(stmt) {
                let name = tree.identifier_name(*id).unwrap_or_default();
                let closure = self.make_closure(stmt, Some(name), params, *body, scope.clone());
                scope
                    .borrow_mut()
                    .define(name, closure, Mutability::Mutable);
            }
        }
    }
}

/// Whether a block needs its own scope.
fn declares_lexically(tree: &SyntaxTree, body: &[NodeId]) -> bool {
    body.iter().any(|&stmt| match tree.kind(stmt) {
        NodeKind::VariableDeclaration { kind, .. } => kind.is_lexical(),
        NodeKind::FunctionDeclaration { .. } => true,
        _ => false,
    })
}

/// `var` names declared by `id`, not descending into nested functions.
fn collect_var_names<'t>(tree: &'t SyntaxTree, id: NodeId, out: &mut Vec<&'t str>) {
    match tree.kind(id) {
        NodeKind::VariableDeclaration {
            kind: VarKind::Var,
            declarations,
        } => {
            for &declarator in declarations {
                if let NodeKind::VariableDeclarator { id, .. } = tree.kind(declarator) {
                    out.extend(tree.identifier_name(*id));
                }
            }
        }
        NodeKind::BlockStatement { body } => {
            for &stmt in body {
                collect_var_names(tree, stmt, out);
            }
        }
        NodeKind::IfStatement {
            consequent,
            alternate,
            ..
        } => {
            collect_var_names(tree, *consequent, out);
            if let Some(alternate) = alternate {
                collect_var_names(tree, *alternate, out);
            }
        }
        NodeKind::ForStatement { init, body, .. } => {
            if let Some(init) = init {
                collect_var_names(tree, *init, out);
            }
            collect_var_names(tree, *body, out);
        }
        NodeKind::WhileStatement { body, .. } => collect_var_names(tree, *body, out),
        _ => {}
    }
}
