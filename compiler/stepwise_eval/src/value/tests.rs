use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_primitives() {
    assert_eq!(Value::Undefined.to_display_string(), "undefined");
    assert_eq!(Value::Null.to_display_string(), "null");
    assert_eq!(Value::Bool(true).to_display_string(), "true");
    assert_eq!(Value::Number(55.0).to_display_string(), "55");
    assert_eq!(Value::string("hi").to_display_string(), "hi");
}

#[test]
fn display_containers() {
    let array = Value::array(vec![
        Value::Number(1.0),
        Value::Null,
        Value::array(vec![Value::Number(2.0), Value::Number(3.0)]),
    ]);
    assert_eq!(array.to_display_string(), "1,,2,3");
    assert_eq!(Value::object(Object::default()).to_display_string(), "[object Object]");
}

#[test]
fn display_errors() {
    assert_eq!(
        Value::error(ErrorKind::TypeError, "x is not a function").to_display_string(),
        "TypeError: x is not a function"
    );
    assert_eq!(Value::error(ErrorKind::Error, "").to_display_string(), "Error");
}

#[test]
fn inspect_quotes_nested_strings() {
    let mut object = Object::default();
    object.set("a", Value::array(vec![Value::string("x"), Value::Number(1.0)]));
    assert_eq!(Value::object(object).inspect(), "{ a: [ 'x', 1 ] }");
    assert_eq!(Value::string("top").inspect(), "top");
    assert_eq!(Value::array(Vec::new()).inspect(), "[]");
}

#[test]
fn truthiness() {
    for falsy in [
        Value::Undefined,
        Value::Null,
        Value::Bool(false),
        Value::Number(0.0),
        Value::Number(f64::NAN),
        Value::string(""),
    ] {
        assert!(!falsy.is_truthy(), "{falsy:?}");
    }
    assert!(Value::array(Vec::new()).is_truthy());
    assert!(Value::string("0").is_truthy());
}

#[test]
fn to_number_coercions() {
    assert_eq!(Value::string(" 42 ").to_number(), 42.0);
    assert_eq!(Value::string("").to_number(), 0.0);
    assert_eq!(Value::string("0x10").to_number(), 16.0);
    assert!(Value::string("inf").to_number().is_nan());
    assert!(Value::string("12px").to_number().is_nan());
    assert_eq!(Value::Bool(true).to_number(), 1.0);
    assert_eq!(Value::array(vec![Value::Number(7.0)]).to_number(), 7.0);
    assert!(Value::Undefined.to_number().is_nan());
}

#[test]
fn equality() {
    let array = Value::array(Vec::new());
    assert!(array.strict_equals(&array.clone()));
    assert!(!array.strict_equals(&Value::array(Vec::new())));
    assert!(Value::Null.loose_equals(&Value::Undefined));
    assert!(!Value::Null.strict_equals(&Value::Undefined));
    assert!(Value::string("1").loose_equals(&Value::Number(1.0)));
    assert!(Value::Bool(true).loose_equals(&Value::Number(1.0)));
    assert!(!Value::Null.loose_equals(&Value::Number(0.0)));
    assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
}

#[test]
fn object_set_keeps_order() {
    let mut object = Object::default();
    object.set("b", Value::Number(1.0));
    object.set("a", Value::Number(2.0));
    object.set("b", Value::Number(3.0));
    let keys: Vec<&str> = object.properties().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(object.get("b").map(Value::to_number), Some(3.0));
}

#[test]
fn method_tables() {
    assert_eq!(ArrayMethod::lookup("reduce"), Some(ArrayMethod::Reduce));
    assert_eq!(ArrayMethod::lookup("filter"), None);
    assert_eq!(StringMethod::lookup("charAt").map(StringMethod::name), Some("charAt"));
}
