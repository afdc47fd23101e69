//! Expression evaluation: identifiers, literals, operators, assignment and
//! member access.

use stepwise_ir::{format_number, AssignOp, Literal, LogicalOp, NodeId, NodeKind, UnaryOp, UpdateOp};

use super::{ControlAction, EvalResult, Executor};
use crate::environment::AssignError;
use crate::errors::{assignment_to_constant, not_defined};
use crate::operators::{evaluate_binary, evaluate_unary, evaluate_update};
use crate::value::{Object, Value};

impl Executor<'_> {
    pub(super) fn eval(&mut self, id: NodeId) -> EvalResult {
        stepwise_stack::ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: NodeId) -> EvalResult {
        let tree = self.tree;
        self.set_pc(id);
        match tree.kind(id) {
            NodeKind::Identifier { name } => self.lookup(name),
            NodeKind::Literal { value } => Ok(literal_value(value)),
            NodeKind::ArrayExpression { elements } => {
                let mut items = Vec::with_capacity(elements.len());
                for &element in elements {
                    items.push(self.eval(element)?);
                }
                Ok(Value::array(items))
            }
            NodeKind::ObjectExpression { properties } => {
                let mut object = Object::default();
                for &property in properties {
                    if let NodeKind::Property { key, value } = tree.kind(property) {
                        let value = self.eval(*value)?;
                        object.set(key, value);
                    }
                }
                Ok(Value::object(object))
            }
            NodeKind::FunctionExpression {
                id: name,
                params,
                body,
            } => Ok(self.function_expression(id, *name, params, *body)),
            NodeKind::UnaryExpression { operator, argument } => {
                // `typeof` tolerates undeclared names.
                if *operator == UnaryOp::TypeOf {
                    if let Some(name) = tree.identifier_name(*argument) {
                        if self.scope().borrow().lookup(name).is_none() {
                            return Ok(Value::string("undefined"));
                        }
                    }
                }
                let operand = self.eval(*argument)?;
                Ok(evaluate_unary(*operator, &operand))
            }
            NodeKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => self.eval_update(id, *operator, *prefix, *argument),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let left = self.eval(*left)?;
                let right = self.eval(*right)?;
                Ok(evaluate_binary(*operator, &left, &right))
            }
            NodeKind::LogicalExpression {
                operator,
                left,
                right,
            } => {
                let left = self.eval(*left)?;
                let short_circuits = match operator {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.eval(*right)
                }
            }
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => self.eval_assignment(id, *operator, *left, *right),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(*test)?.is_truthy() {
                    self.eval(*consequent)
                } else {
                    self.eval(*alternate)
                }
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.eval_call(id, *callee, arguments)
            }
            NodeKind::NewExpression { callee, arguments } => {
                self.eval_new(id, *callee, arguments)
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                let receiver = self.eval(*object)?;
                let key = self.property_key(*property, *computed)?;
                self.set_pc(id);
                self.get_member(&receiver, &key)
            }
            // Statements and structural nodes never reach expression position.
            _ => Ok(Value::Undefined),
        }
    }

    /// Read `name` from the scope chain.
    fn lookup(&mut self, name: &str) -> EvalResult {
        let found = self.scope().borrow().lookup(name);
        found.ok_or_else(|| self.throw(not_defined(name)))
    }

    /// Assign to the nearest binding of `name`.
    fn assign(&mut self, name: &str, value: Value) -> Result<(), ControlAction> {
        let result = self.scope().borrow_mut().assign(name, value);
        match result {
            Ok(()) => Ok(()),
            Err(AssignError::Immutable) => Err(self.throw(assignment_to_constant())),
            Err(AssignError::Undefined) => Err(self.throw(not_defined(name))),
        }
    }

    /// Key of a member access: the identifier for `a.b`, the evaluated and
    /// stringified expression for `a[b]`.
    fn property_key(&mut self, property: NodeId, computed: bool) -> Result<String, ControlAction> {
        if !computed {
            return Ok(self
                .tree
                .identifier_name(property)
                .unwrap_or_default()
                .to_owned());
        }
        Ok(match self.eval(property)? {
            Value::Number(n) => format_number(n),
            other => other.to_display_string(),
        })
    }

    fn eval_assignment(
        &mut self,
        id: NodeId,
        operator: AssignOp,
        left: NodeId,
        right: NodeId,
    ) -> EvalResult {
        let tree = self.tree;
        match tree.kind(left) {
            NodeKind::Identifier { name } => {
                let value = match operator {
                    AssignOp::Assign => self.eval(right)?,
                    AssignOp::Compound(op) => {
                        let current = self.lookup(name)?;
                        let rhs = self.eval(right)?;
                        evaluate_binary(op, &current, &rhs)
                    }
                };
                self.set_pc(id);
                self.assign(name, value.clone())?;
                Ok(value)
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                let receiver = self.eval(*object)?;
                let key = self.property_key(*property, *computed)?;
                let value = match operator {
                    AssignOp::Assign => self.eval(right)?,
                    AssignOp::Compound(op) => {
                        self.set_pc(id);
                        let current = self.get_member(&receiver, &key)?;
                        let rhs = self.eval(right)?;
                        evaluate_binary(op, &current, &rhs)
                    }
                };
                self.set_pc(id);
                self.set_member(&receiver, &key, value.clone())?;
                Ok(value)
            }
            // The parser rejects other targets.
            _ => self.eval(right),
        }
    }

    fn eval_update(
        &mut self,
        id: NodeId,
        operator: UpdateOp,
        prefix: bool,
        argument: NodeId,
    ) -> EvalResult {
        let tree = self.tree;
        let (old, new) = match tree.kind(argument) {
            NodeKind::Identifier { name } => {
                let current = self.lookup(name)?;
                let (old, new) = evaluate_update(operator, &current);
                self.set_pc(id);
                self.assign(name, Value::Number(new))?;
                (old, new)
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                let receiver = self.eval(*object)?;
                let key = self.property_key(*property, *computed)?;
                self.set_pc(id);
                let current = self.get_member(&receiver, &key)?;
                let (old, new) = evaluate_update(operator, &current);
                self.set_member(&receiver, &key, Value::Number(new))?;
                (old, new)
            }
            _ => return Ok(Value::Number(f64::NAN)),
        };
        Ok(Value::Number(if prefix { new } else { old }))
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}
