use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use acc_host::{ClassDef, MethodDef, PropertyDef, Tag, Value};

use super::fixtures::Fixture;
use crate::{AccessError, ArityError, Outcome};

fn point() -> Fixture {
    Fixture::new([
        ClassDef::new("Point")
            .accessible()
            .tag(Tag::get(true))
            .tag(Tag::set(true))
            .tag(Tag::delete(true))
            .property(PropertyDef::protected("x").default_value(0))
            .property(PropertyDef::protected("y").default_value(0))
            .method(MethodDef::public("y", |_, _| Value::from("native y")))
            .method(MethodDef::public_static("origin", |_| Value::list([0, 0]))),
        ClassDef::new("Frame")
            .accessible()
            .tag(Tag::get(true))
            .tag(Tag::set(true))
            .tag(Tag::immutable())
            .property(PropertyDef::protected("w").default_value(1))
            .property(PropertyDef::protected("h").default_value(1)),
    ])
}

fn arity(result: Result<Outcome, AccessError>) -> ArityError {
    match result {
        Err(AccessError::Arity(err)) => err,
        other => panic!("expected an arity error, got {other:?}"),
    }
}

#[test]
fn single_property_forms() {
    let fx = point();
    let mut p = fx.spawn("Point");

    assert!(fx.call(&mut p, "setX", vec![Value::Int(3)]).unwrap().is_updated());
    assert_eq!(fx.call(&mut p, "getX", vec![]).unwrap().into_value(), Some(Value::Int(3)));
    assert_eq!(fx.call(&mut p, "x", vec![]).unwrap().into_value(), Some(Value::Int(3)));

    fx.call(&mut p, "x", vec![Value::Int(4)]).unwrap();
    fx.call(&mut p, "set", vec!["y".into(), Value::Int(5)]).unwrap();
    assert_eq!(fx.get(&mut p, "x"), Value::Int(4));
    assert_eq!(fx.get(&mut p, "y"), Value::Int(5));

    assert_eq!(fx.call(&mut p, "issetX", vec![]).unwrap(), Outcome::Exists(true));
    fx.call(&mut p, "unsetX", vec![]).unwrap();
    assert_eq!(fx.call(&mut p, "isset", vec!["x".into()]).unwrap(), Outcome::Exists(false));
}

#[test]
fn public_methods_take_precedence() {
    let fx = point();
    let mut p = fx.spawn("Point");

    assert_eq!(
        fx.call(&mut p, "Y", vec![]).unwrap(),
        Outcome::Value(Value::from("native y")),
    );
    assert_eq!(
        fx.call(&mut p, "origin", vec![]).unwrap(),
        Outcome::Value(Value::list([0, 0])),
    );
    // Attribute access and prefixed calls still reach the property.
    assert_eq!(fx.get(&mut p, "y"), Value::Int(0));
    assert_eq!(fx.call(&mut p, "getY", vec![]).unwrap(), Outcome::Value(Value::Int(0)));
}

#[test]
fn batch_forms() {
    let fx = point();
    let mut p = fx.spawn("Point");

    let batch = Value::map([("x", 1), ("y", 2)]);
    assert!(fx.call(&mut p, "set", vec![batch]).unwrap().is_updated());
    assert_eq!(fx.get(&mut p, "x"), Value::Int(1));
    assert_eq!(fx.get(&mut p, "y"), Value::Int(2));

    let names = Value::map([("first", "x"), ("second", "y")]);
    fx.call(&mut p, "unset", vec![names]).unwrap();
    assert!(!p.is_initialized("x"));
    assert!(!p.is_initialized("y"));

    let mut frame = fx.spawn("Frame");
    let original = frame.clone();
    let derived = fx
        .call(&mut frame, "with", vec![Value::map([("w", 640), ("h", 480)])])
        .unwrap()
        .into_derived()
        .unwrap();
    assert_eq!(frame, original);
    assert_eq!(derived.field("w"), Some(&Value::Int(640)));
    assert_eq!(derived.field("h"), Some(&Value::Int(480)));
}

#[test]
fn empty_batches_do_nothing() {
    let fx = point();
    let mut p = fx.spawn("Point");
    let original = p.clone();

    assert!(fx.call(&mut p, "set", vec![Value::Map(Vec::new())]).unwrap().is_updated());
    assert!(fx.call(&mut p, "unset", vec![Value::List(Vec::new())]).unwrap().is_updated());
    assert_eq!(p, original);

    let mut frame = fx.spawn("Frame");
    let derived = fx
        .call(&mut frame, "with", vec![Value::Map(Vec::new())])
        .unwrap()
        .into_derived()
        .unwrap();
    assert_eq!(derived, frame);
}

#[test]
fn argument_errors() {
    let fx = point();
    let mut p = fx.spawn("Point");

    assert!(matches!(
        arity(fx.call(&mut p, "get", vec![])),
        ArityError::MissingPropertyName { .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "get", vec![Value::Int(1)])),
        ArityError::PropertyNameNotString { position: 1, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "set", vec![Value::Int(1), Value::Int(2)])),
        ArityError::PropertyNameNotString { position: 2, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "setX", vec![])),
        ArityError::MissingValue { position: 1, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "set", vec!["x".into()])),
        ArityError::MissingValue { position: 2, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "getX", vec![Value::Int(1)])),
        ArityError::TooManyArguments { expected: 0, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "setX", vec![Value::Int(1), Value::Int(2)])),
        ArityError::TooManyArguments { expected: 1, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "set", vec!["x".into(), Value::Int(1), Value::Int(2)])),
        ArityError::TooManyArguments { expected: 2, .. }
    ));
    assert!(matches!(
        arity(fx.call(&mut p, "set", vec![Value::map([("x", 1)]), Value::Int(2)])),
        ArityError::BatchWithExtraArguments { .. }
    ));

    let err = arity(fx.call(&mut p, "set", vec![Value::list([1])]));
    assert_eq!(
        err,
        ArityError::NonStringKey {
            class: "Point".into(),
            method: "set".into(),
            key: "0".into(),
        }
    );
    assert!(matches!(
        arity(fx.call(&mut p, "unset", vec![Value::list([Value::from("x"), Value::Int(3)])])),
        ArityError::NonStringKey { .. }
    ));
    assert!(p.is_initialized("x"));
}

#[test]
fn unknown_methods_and_properties() {
    let fx = point();
    let mut p = fx.spawn("Point");

    let err = fx.call(&mut p, "frobnicate", vec![]).unwrap_err();
    assert!(matches!(err, AccessError::UnknownMethod { .. }));
    assert_eq!(err.to_string(), "unknown accessor method `Point::frobnicate()`");

    let err = fx.call(&mut p, "getZ", vec![]).unwrap_err();
    assert!(matches!(err, AccessError::UnknownProperty { .. }));
    let err = fx.call(&mut p, "setZ", vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, AccessError::UnknownProperty { .. }));
}
