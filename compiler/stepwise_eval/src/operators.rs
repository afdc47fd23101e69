//! Binary and unary operator semantics.
//!
//! Direct enum dispatch over the fixed operator set. None of these can throw
//! in the supported language subset: type mixing follows JavaScript's
//! coercion rules instead of raising.

use stepwise_ir::{BinaryOp, UnaryOp, UpdateOp};

use crate::Value;

/// Evaluate `left <op> right`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        // Rust's `%` on f64 truncates like JavaScript's.
        BinaryOp::Rem => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Lt => Value::Bool(compare(left, right, |o| o.is_lt())),
        BinaryOp::LtEq => Value::Bool(compare(left, right, |o| o.is_le())),
        BinaryOp::Gt => Value::Bool(compare(left, right, |o| o.is_gt())),
        BinaryOp::GtEq => Value::Bool(compare(left, right, |o| o.is_ge())),
        BinaryOp::LooseEq => Value::Bool(left.loose_equals(right)),
        BinaryOp::LooseNotEq => Value::Bool(!left.loose_equals(right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(right)),
    }
}

/// `+` concatenates when either side converts to a string primitive.
fn add(left: &Value, right: &Value) -> Value {
    let concatenates = |v: &Value| {
        matches!(
            v,
            Value::String(_)
                | Value::Array(_)
                | Value::Object(_)
                | Value::Function(_)
                | Value::Native(_)
                | Value::Error(_)
        )
    };
    if concatenates(left) || concatenates(right) {
        let mut out = left.to_display_string();
        out.push_str(&right.to_display_string());
        return Value::string(out);
    }
    Value::Number(left.to_number() + right.to_number())
}

/// Relational comparison: lexicographic for two strings, numeric otherwise.
/// Any comparison involving NaN is false.
fn compare(left: &Value, right: &Value, test: fn(std::cmp::Ordering) -> bool) -> bool {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return test(a.cmp(b));
    }
    left.to_number()
        .partial_cmp(&right.to_number())
        .is_some_and(test)
}

/// Evaluate a unary operator on an already evaluated operand.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Value {
    match op {
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        UnaryOp::Neg => Value::Number(-operand.to_number()),
        UnaryOp::Plus => Value::Number(operand.to_number()),
        UnaryOp::TypeOf => Value::string(operand.type_of()),
    }
}

/// Old and new numeric values of `++`/`--`.
pub fn evaluate_update(op: UpdateOp, operand: &Value) -> (f64, f64) {
    let old = operand.to_number();
    let new = match op {
        UpdateOp::Increment => old + 1.0,
        UpdateOp::Decrement => old - 1.0,
    };
    (old, new)
}
