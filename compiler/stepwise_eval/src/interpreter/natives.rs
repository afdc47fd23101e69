//! Built-in functions and the members of built-in values.
//!
//! Methods are looked up by name on each access and returned as a native
//! function bound to the receiver, so `arr.push` evaluates to a callable
//! value like any other member.

use std::rc::Rc;

use super::{ControlAction, EvalResult, Executor};
use crate::errors::{
    cannot_read_property, cannot_set_property, invalid_array_length, reduce_of_empty_array,
};
use crate::value::{
    join_values, ArrayMethod, ArrayRef, ErrorKind, NativeFunction, NativeKind, StringMethod, Value,
};

/// Largest index an assignment may grow an array to.
const MAX_ARRAY_GROWTH: usize = 1 << 24;

impl Executor<'_> {
    /// `receiver[key]`.
    pub(super) fn get_member(&mut self, receiver: &Value, key: &str) -> EvalResult {
        Ok(match receiver {
            Value::Undefined | Value::Null => {
                return Err(self.throw(cannot_read_property(receiver, key)));
            }
            Value::Array(items) => {
                if key == "length" {
                    Value::Number(items.borrow().len() as f64)
                } else if let Some(index) = array_index(key) {
                    items.borrow().get(index).cloned().unwrap_or(Value::Undefined)
                } else if let Some(method) = ArrayMethod::lookup(key) {
                    bound(method.name(), NativeKind::Array(method), receiver)
                } else {
                    Value::Undefined
                }
            }
            Value::String(s) => {
                if key == "length" {
                    Value::Number(s.chars().count() as f64)
                } else if let Some(index) = array_index(key) {
                    s.chars()
                        .nth(index)
                        .map_or(Value::Undefined, |c| Value::string(c.to_string()))
                } else if let Some(method) = StringMethod::lookup(key) {
                    bound(method.name(), NativeKind::String(method), receiver)
                } else {
                    Value::Undefined
                }
            }
            Value::Object(object) => object.borrow().get(key).cloned().unwrap_or(Value::Undefined),
            Value::Error(err) => match key {
                "name" => Value::string(err.name.as_str()),
                "message" => Value::string(err.message.as_str()),
                _ => Value::Undefined,
            },
            Value::Function(closure) => match key {
                "name" => Value::string(closure.name.as_deref().unwrap_or_default()),
                "length" => Value::Number(closure.params.len() as f64),
                _ => Value::Undefined,
            },
            Value::Native(native) => match key {
                "name" => Value::string(native.name),
                _ => Value::Undefined,
            },
            Value::Bool(_) | Value::Number(_) => Value::Undefined,
        })
    }

    /// `receiver[key] = value`. Writes to primitives are dropped.
    pub(super) fn set_member(
        &mut self,
        receiver: &Value,
        key: &str,
        value: Value,
    ) -> Result<(), ControlAction> {
        match receiver {
            Value::Undefined | Value::Null => Err(self.throw(cannot_set_property(receiver, key))),
            Value::Array(items) => {
                let Some(index) = array_index(key) else {
                    return Ok(());
                };
                if index > MAX_ARRAY_GROWTH {
                    return Err(self.throw(invalid_array_length()));
                }
                let mut items = items.borrow_mut();
                if index >= items.len() {
                    items.resize(index + 1, Value::Undefined);
                }
                items[index] = value;
                Ok(())
            }
            Value::Object(object) => {
                object.borrow_mut().set(key, value);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub(super) fn call_native(&mut self, native: &NativeFunction, args: Vec<Value>) -> EvalResult {
        Ok(match native.kind {
            NativeKind::ConsoleLog => {
                let line: Vec<String> = args.iter().map(Value::inspect).collect();
                self.print.println(&line.join(" "));
                Value::Undefined
            }
            NativeKind::MathFloor => Value::Number(nth(&args, 0).to_number().floor()),
            NativeKind::MathAbs => Value::Number(nth(&args, 0).to_number().abs()),
            NativeKind::MathMax => Value::Number(fold_numbers(&args, f64::NEG_INFINITY, f64::max)),
            NativeKind::MathMin => Value::Number(fold_numbers(&args, f64::INFINITY, f64::min)),
            NativeKind::ErrorConstructor(kind) => construct_error(kind, &nth(&args, 0)),
            NativeKind::Array(method) => {
                let Some(Value::Array(items)) = &native.receiver else {
                    return Err(self.throw(detached(native.name)));
                };
                return self.call_array_method(method, items, native.receiver.as_ref(), args);
            }
            NativeKind::String(method) => {
                let Some(Value::String(s)) = &native.receiver else {
                    return Err(self.throw(detached(native.name)));
                };
                call_string_method(method, s, &nth(&args, 0))
            }
        })
    }

    fn call_array_method(
        &mut self,
        method: ArrayMethod,
        items: &ArrayRef,
        receiver: Option<&Value>,
        args: Vec<Value>,
    ) -> EvalResult {
        let array = receiver.cloned().unwrap_or(Value::Undefined);
        let arg = |i: usize| nth(&args, i);
        match method {
            ArrayMethod::Push => {
                let mut items = items.borrow_mut();
                items.extend(args.iter().cloned());
                Ok(Value::Number(items.len() as f64))
            }
            ArrayMethod::Pop => Ok(items.borrow_mut().pop().unwrap_or(Value::Undefined)),
            ArrayMethod::IndexOf => {
                let needle = arg(0);
                let position = items.borrow().iter().position(|v| v.strict_equals(&needle));
                Ok(Value::Number(position.map_or(-1.0, |i| i as f64)))
            }
            ArrayMethod::Join => {
                let separator = match arg(0) {
                    Value::Undefined => ",".to_owned(),
                    other => other.to_display_string(),
                };
                Ok(Value::string(join_values(&items.borrow(), &separator)))
            }
            ArrayMethod::Slice => {
                let items = items.borrow();
                let len = items.len();
                let start = relative_index(&arg(0), len, 0);
                let end = relative_index(&arg(1), len, len);
                let slice = items.get(start..end.max(start)).unwrap_or_default();
                Ok(Value::array(slice.to_vec()))
            }
            ArrayMethod::ForEach => {
                let callback = arg(0);
                let mut index = 0;
                while let Some(item) = element(items, index) {
                    let args = vec![item, Value::Number(index as f64), array.clone()];
                    self.call_callback(&callback, args)?;
                    index += 1;
                }
                Ok(Value::Undefined)
            }
            ArrayMethod::Map => {
                let callback = arg(0);
                let mut mapped = Vec::with_capacity(items.borrow().len());
                let mut index = 0;
                while let Some(item) = element(items, index) {
                    let args = vec![item, Value::Number(index as f64), array.clone()];
                    mapped.push(self.call_callback(&callback, args)?);
                    index += 1;
                }
                Ok(Value::array(mapped))
            }
            ArrayMethod::Reduce => {
                let callback = arg(0);
                let (mut accumulator, mut index) = if args.len() >= 2 {
                    (arg(1), 0)
                } else {
                    match element(items, 0) {
                        Some(first) => (first, 1),
                        None => return Err(self.throw(reduce_of_empty_array())),
                    }
                };
                while let Some(item) = element(items, index) {
                    let args = vec![
                        accumulator,
                        item,
                        Value::Number(index as f64),
                        array.clone(),
                    ];
                    accumulator = self.call_callback(&callback, args)?;
                    index += 1;
                }
                Ok(accumulator)
            }
        }
    }

    fn call_callback(&mut self, callback: &Value, args: Vec<Value>) -> EvalResult {
        let text = callback.inspect();
        self.call_value(callback, args, &text)
    }
}

/// Argument `i`, `undefined` when missing.
fn nth(args: &[Value], i: usize) -> Value {
    args.get(i).cloned().unwrap_or(Value::Undefined)
}

/// A method value bound to `receiver`.
fn bound(name: &'static str, kind: NativeKind, receiver: &Value) -> Value {
    Value::Native(Rc::new(NativeFunction {
        name,
        kind,
        receiver: Some(receiver.clone()),
    }))
}

/// Element `index`, read fresh so callbacks may grow or shrink the array.
fn element(items: &ArrayRef, index: usize) -> Option<Value> {
    items.borrow().get(index).cloned()
}

/// Canonical array index: digits without leading zeros.
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

/// Resolve a possibly negative `slice` bound against `len`.
fn relative_index(value: &Value, len: usize, default: usize) -> usize {
    if matches!(value, Value::Undefined) {
        return default;
    }
    let n = value.to_number();
    if n.is_nan() {
        return 0;
    }
    let n = n.trunc();
    if n < 0.0 {
        (len as f64 + n).max(0.0) as usize
    } else {
        n.min(len as f64) as usize
    }
}

fn fold_numbers(args: &[Value], init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    args.iter().map(Value::to_number).fold(init, |acc, n| {
        if acc.is_nan() || n.is_nan() {
            f64::NAN
        } else {
            pick(acc, n)
        }
    })
}

fn construct_error(kind: ErrorKind, message: &Value) -> Value {
    let message = match message {
        Value::Undefined => String::new(),
        other => other.to_display_string(),
    };
    Value::error(kind, message)
}

fn call_string_method(method: StringMethod, s: &str, arg: &Value) -> Value {
    match method {
        StringMethod::ToUpperCase => Value::string(s.to_uppercase()),
        StringMethod::ToLowerCase => Value::string(s.to_lowercase()),
        StringMethod::CharAt => {
            let index = arg.to_number();
            let index = if index.is_nan() { 0.0 } else { index.trunc() };
            let c = (index >= 0.0)
                .then(|| s.chars().nth(index as usize))
                .flatten();
            Value::string(c.map(String::from).unwrap_or_default())
        }
        StringMethod::IndexOf => {
            let needle = arg.to_display_string();
            let position = s
                .find(needle.as_str())
                .map_or(-1.0, |byte| s[..byte].chars().count() as f64);
            Value::Number(position)
        }
    }
}

fn detached(name: &str) -> Value {
    Value::error(
        ErrorKind::TypeError,
        format!("{name} called on a value of the wrong type"),
    )
}
