//! Runtime values.
//!
//! Primitives are stored inline; arrays and objects are shared mutable
//! handles so aliasing behaves like JavaScript. Functions keep the source
//! text they were declared with so the debug view can render them.

use std::fmt;
use std::rc::Rc;

use stepwise_ir::{format_number, NodeId, Span};

use crate::environment::{LocalScope, ScopeRef};

pub type ArrayRef = LocalScope<Vec<Value>>;
pub type ObjectRef = LocalScope<Object>;

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(Rc<Closure>),
    Native(Rc<NativeFunction>),
    Error(Rc<ErrorObject>),
}

/// Plain object; properties keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct Object {
    properties: Vec<(String, Value)>,
}

impl Object {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key.to_owned(), value)),
        }
    }

    pub fn properties(&self) -> &[(String, Value)] {
        &self.properties
    }
}

/// A user-defined function closed over its defining scope.
pub struct Closure {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: NodeId,
    pub scope: ScopeRef,
    /// Span of the whole declaration or expression.
    pub span: Span,
    pub source: Rc<str>,
}

impl Closure {
    /// Source text of the function.
    pub fn source_text(&self) -> &str {
        self.source.get(self.span.to_range()).unwrap_or_default()
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

/// Error object: `name` and `message`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorObject {
    pub name: String,
    pub message: String,
}

impl ErrorObject {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ErrorObject {
            name: kind.name().to_owned(),
            message: message.into(),
        }
    }
}

/// Built-in error constructors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    ReferenceError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::Error,
        ErrorKind::TypeError,
        ErrorKind::RangeError,
        ErrorKind::ReferenceError,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
        }
    }
}

/// A built-in function, optionally bound to a receiver (`arr.push`).
#[derive(Clone, Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    pub kind: NativeKind,
    pub receiver: Option<Value>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NativeKind {
    ConsoleLog,
    MathFloor,
    MathMax,
    MathMin,
    MathAbs,
    ErrorConstructor(ErrorKind),
    Array(ArrayMethod),
    String(StringMethod),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrayMethod {
    Push,
    Pop,
    IndexOf,
    Join,
    Slice,
    ForEach,
    Map,
    Reduce,
}

impl ArrayMethod {
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "push" => ArrayMethod::Push,
            "pop" => ArrayMethod::Pop,
            "indexOf" => ArrayMethod::IndexOf,
            "join" => ArrayMethod::Join,
            "slice" => ArrayMethod::Slice,
            "forEach" => ArrayMethod::ForEach,
            "map" => ArrayMethod::Map,
            "reduce" => ArrayMethod::Reduce,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            ArrayMethod::Push => "push",
            ArrayMethod::Pop => "pop",
            ArrayMethod::IndexOf => "indexOf",
            ArrayMethod::Join => "join",
            ArrayMethod::Slice => "slice",
            ArrayMethod::ForEach => "forEach",
            ArrayMethod::Map => "map",
            ArrayMethod::Reduce => "reduce",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StringMethod {
    ToUpperCase,
    ToLowerCase,
    CharAt,
    IndexOf,
}

impl StringMethod {
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "toUpperCase" => StringMethod::ToUpperCase,
            "toLowerCase" => StringMethod::ToLowerCase,
            "charAt" => StringMethod::CharAt,
            "indexOf" => StringMethod::IndexOf,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            StringMethod::ToUpperCase => "toUpperCase",
            StringMethod::ToLowerCase => "toLowerCase",
            StringMethod::CharAt => "charAt",
            StringMethod::IndexOf => "indexOf",
        }
    }
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Value {
        Value::String(s.into())
    }

    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(LocalScope::new(items))
    }

    pub fn object(object: Object) -> Value {
        Value::Object(LocalScope::new(object))
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Value {
        Value::Error(Rc::new(ErrorObject::new(kind, message)))
    }

    pub fn native(name: &'static str, kind: NativeKind) -> Value {
        Value::Native(Rc::new(NativeFunction {
            name,
            kind,
            receiver: None,
        }))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Native(_))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_)
            | Value::Object(_)
            | Value::Function(_)
            | Value::Native(_)
            | Value::Error(_) => true,
        }
    }

    /// Result of the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Null | Value::Array(_) | Value::Object(_) | Value::Error(_) => "object",
        }
    }

    /// JavaScript `Number(v)`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Array(_) => string_to_number(&self.to_display_string()),
            Value::Object(_) | Value::Function(_) | Value::Native(_) | Value::Error(_) => f64::NAN,
        }
    }

    /// JavaScript `String(v)`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_owned(),
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.to_string(),
            Value::Array(items) => join_values(&items.borrow(), ","),
            Value::Object(_) => "[object Object]".to_owned(),
            Value::Function(closure) => closure.source_text().to_owned(),
            Value::Native(native) => format!("function {}() {{ [native code] }}", native.name),
            Value::Error(err) if err.message.is_empty() => err.name.clone(),
            Value::Error(err) => format!("{}: {}", err.name, err.message),
        }
    }

    /// Console-style rendering: strings are bare at the top level, quoted
    /// inside containers.
    pub fn inspect(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            other => other.inspect_nested(0),
        }
    }

    fn inspect_nested(&self, depth: usize) -> String {
        match self {
            Value::String(s) => format!("'{s}'"),
            Value::Array(_) | Value::Object(_) if depth > 2 => "[...]".to_owned(),
            Value::Array(items) => {
                let items = items.borrow();
                if items.is_empty() {
                    return "[]".to_owned();
                }
                let parts: Vec<String> = items.iter().map(|v| v.inspect_nested(depth + 1)).collect();
                format!("[ {} ]", parts.join(", "))
            }
            Value::Object(object) => {
                let object = object.borrow();
                if object.properties().is_empty() {
                    return "{}".to_owned();
                }
                let parts: Vec<String> = object
                    .properties()
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.inspect_nested(depth + 1)))
                    .collect();
                format!("{{ {} }}", parts.join(", "))
            }
            Value::Function(closure) => match &closure.name {
                Some(name) => format!("[Function: {name}]"),
                None => "[Function (anonymous)]".to_owned(),
            },
            Value::Native(native) => format!("[Function: {}]", native.name),
            other => other.to_display_string(),
        }
    }

    /// `===`.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `==`.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
            (Value::Number(_), Value::String(_))
            | (Value::String(_), Value::Number(_))
            | (Value::Bool(_), _)
            | (_, Value::Bool(_)) => self.to_number() == other.to_number(),
            (Value::Array(_), Value::String(_) | Value::Number(_)) => {
                Value::string(self.to_display_string()).loose_equals(other)
            }
            (Value::String(_) | Value::Number(_), Value::Array(_)) => {
                self.loose_equals(&Value::string(other.to_display_string()))
            }
            _ => self.strict_equals(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(items) => write!(f, "Array(len={})", items.borrow().len()),
            Value::Object(_) => f.write_str("Object"),
            Value::Function(closure) => write!(f, "Function({:?})", closure.name),
            Value::Native(native) => write!(f, "Native({})", native.name),
            Value::Error(err) => write!(f, "Error({}: {})", err.name, err.message),
            other => f.write_str(&other.to_display_string()),
        }
    }
}

/// `Array.prototype.join`: holes and nullish elements become empty strings.
pub(crate) fn join_values(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Undefined | Value::Null => String::new(),
            other => other.to_display_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust accepts "inf"/"nan" spellings JavaScript does not.
        _ if trimmed.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') => {
            f64::NAN
        }
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests;
