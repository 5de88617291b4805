use alloc::vec;

use acc_host::{ClassDef, ClassTable, MethodDef, PropertyDef, Tag, Value};

use super::fixtures::{Fixture, upper};
use crate::meta::AccessorKind;
use crate::{AccessError, Operation, Outcome};

#[test]
fn plain_field_read_write() {
    let fx = Fixture::new([ClassDef::new("A").accessible().property(
        PropertyDef::protected("foo")
            .tag(Tag::get(true))
            .tag(Tag::set(true)),
    )]);
    let mut obj = fx.spawn("A");

    fx.registry.set(&mut obj, "foo", "x").unwrap();
    assert_eq!(fx.get(&mut obj, "foo"), Value::from("x"));
    assert_eq!(obj.field("foo"), Some(&Value::from("x")));
}

#[test]
fn with_applies_mutator_to_copy() {
    let mut table = ClassTable::new();
    table.register_function("upper", upper);

    let fx = Fixture::with_table(table, [ClassDef::new("B")
        .accessible()
        .tag(Tag::get(true))
        .property(
            PropertyDef::protected("foo")
                .tag(Tag::set(true))
                .tag(Tag::immutable())
                .tag(Tag::mutator("upper")),
        )]);
    let mut obj = fx.spawn("B");

    let mut derived = fx
        .call(&mut obj, "withFoo", vec!["x".into()])
        .unwrap()
        .into_derived()
        .unwrap();

    assert_eq!(fx.get(&mut derived, "foo"), Value::from("X"));
    assert_eq!(fx.get(&mut obj, "foo"), Value::Null);
    assert!(!obj.is_initialized("foo"));
}

#[test]
fn assignment_goes_through_set_endpoint() {
    let fx = Fixture::new([ClassDef::new("C")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .property(PropertyDef::protected("bar"))
        .method(MethodDef::public("setBar", |this, args| {
            let value = args.into_iter().next().unwrap_or_default();
            this.set_field("bar", Value::list([Value::from("setter"), value]))
                .unwrap();
            Value::Null
        }))]);
    let mut obj = fx.spawn("C");

    fx.registry.set(&mut obj, "bar", "y").unwrap();
    assert_eq!(
        obj.field("bar"),
        Some(&Value::list([Value::from("setter"), Value::from("y")])),
    );
}

#[test]
fn batch_unset_clears_every_property() {
    let fx = Fixture::new([ClassDef::new("D")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::delete(true))
        .property(PropertyDef::protected("a").default_value(1))
        .property(PropertyDef::protected("b").default_value(2))
        .property(PropertyDef::protected("c").default_value(3))]);
    let mut obj = fx.spawn("D");

    for name in ["a", "b", "c"] {
        assert!(fx.registry.isset(&mut obj, name).unwrap());
    }

    let outcome = fx
        .call(&mut obj, "unset", vec![Value::list(["a", "b", "c"])])
        .unwrap();
    assert!(outcome.is_updated());

    for name in ["a", "b", "c"] {
        assert!(!fx.registry.isset(&mut obj, name).unwrap());
        assert_eq!(fx.call(&mut obj, "issetA", vec![]).unwrap(), Outcome::Exists(false));
    }
}

#[test]
fn read_prefers_get_endpoint() {
    let fx = Fixture::new([ClassDef::new("Reading")
        .accessible()
        .tag(Tag::get(true))
        .property(PropertyDef::protected("plain").default_value(5))
        .property(PropertyDef::protected("computed").default_value(2))
        .method(MethodDef::protected("getComputed", |this, _| {
            let raw = this.field("computed").and_then(Value::as_int).unwrap_or(0);
            Value::Int(raw * 10)
        }))]);
    let mut obj = fx.spawn("Reading");

    assert_eq!(fx.get(&mut obj, "plain"), Value::Int(5));
    assert_eq!(fx.get(&mut obj, "computed"), Value::Int(20));
    assert_eq!(
        fx.call(&mut obj, "getComputed", vec![]).unwrap(),
        Outcome::Value(Value::Int(20)),
    );
    assert_eq!(
        fx.call(&mut obj, "getPlain", vec![]).unwrap(),
        Outcome::Value(Value::Int(5)),
    );
}

#[test]
fn immutable_round_trip() {
    let fx = Fixture::new([ClassDef::new("Frozen")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .tag(Tag::immutable())
        .property(PropertyDef::protected("foo").default_value("old"))]);
    let mut obj = fx.spawn("Frozen");

    let err = fx.call(&mut obj, "setFoo", vec!["new".into()]).unwrap_err();
    assert!(matches!(
        err,
        AccessError::MethodConsistency {
            used: AccessorKind::Set,
            expected: AccessorKind::With,
            ..
        }
    ));

    let err = fx.registry.set(&mut obj, "foo", "new").unwrap_err();
    assert!(matches!(err, AccessError::ImmutableAssignment { .. }));

    let mut derived = fx
        .call(&mut obj, "withFoo", vec!["new".into()])
        .unwrap()
        .into_derived()
        .unwrap();
    assert_eq!(fx.get(&mut derived, "foo"), Value::from("new"));
    assert_eq!(fx.get(&mut obj, "foo"), Value::from("old"));
}

#[test]
fn mutable_rejects_with() {
    let fx = Fixture::new([ClassDef::new("Loose")
        .accessible()
        .tag(Tag::set(true))
        .property(PropertyDef::protected("foo"))]);
    let mut obj = fx.spawn("Loose");

    let err = fx.call(&mut obj, "withFoo", vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(
        err,
        AccessError::MethodConsistency {
            used: AccessorKind::With,
            expected: AccessorKind::Set,
            ..
        }
    ));
    assert!(!obj.is_initialized("foo"));
}

#[test]
fn case_insensitive_class() {
    let fx = Fixture::new([ClassDef::new("Loud")
        .accessible()
        .tag(Tag::icase())
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .property(PropertyDef::protected("foo"))]);
    let mut obj = fx.spawn("Loud");

    fx.registry.set(&mut obj, "FOO", 1).unwrap();
    assert_eq!(fx.get(&mut obj, "foo"), Value::Int(1));
    assert_eq!(fx.get(&mut obj, "Foo"), Value::Int(1));

    fx.call(&mut obj, "set", vec!["fOO".into(), Value::Int(2)]).unwrap();
    assert_eq!(
        fx.call(&mut obj, "get", vec!["FOO".into()]).unwrap(),
        Outcome::Value(Value::Int(2)),
    );

    let config = fx.registry.config("Loud").unwrap();
    assert!(config.is_case_insensitive());
    let a = config.find("FOO", true).unwrap();
    let b = config.find("foo", false).unwrap();
    assert!(alloc::sync::Arc::ptr_eq(a, b));
}

#[test]
fn case_sensitive_class_matches_suffixes_loosely() {
    let fx = Fixture::new([ClassDef::new("Quiet")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .property(PropertyDef::protected("Foo").default_value(7))]);
    let mut obj = fx.spawn("Quiet");

    let err = fx.registry.get(&mut obj, "foo").unwrap_err();
    assert!(matches!(
        err,
        AccessError::UnknownProperty {
            op: Operation::Read,
            ..
        }
    ));
    let err = fx.call(&mut obj, "get", vec!["foo".into()]).unwrap_err();
    assert!(matches!(err, AccessError::UnknownProperty { .. }));

    for method in ["getFoo", "getfoo", "GETFOO", "foo", "FOO"] {
        assert_eq!(
            fx.call(&mut obj, method, vec![]).unwrap(),
            Outcome::Value(Value::Int(7)),
            "{method}",
        );
    }

    fx.call(&mut obj, "fOo", vec![Value::Int(8)]).unwrap();
    assert_eq!(fx.get(&mut obj, "Foo"), Value::Int(8));
}

#[test]
fn failing_batch_leaves_receiver_untouched() {
    let fx = Fixture::new([ClassDef::new("Batch")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .property(PropertyDef::protected("a").default_value(1))
        .property(PropertyDef::protected("b").default_value(2))
        .property(PropertyDef::protected("c").default_value(3))
        .property(
            PropertyDef::protected("fixed")
                .tag(Tag::immutable())
                .default_value(4),
        )
        .property(PropertyDef::protected("sealed").tag(Tag::set(false)))]);
    let mut obj = fx.spawn("Batch");
    let original = obj.clone();

    let failing = [
        ("missing", Value::Int(0)),
        ("fixed", Value::Int(0)),
        ("sealed", Value::Int(0)),
    ];
    for (bad, value) in failing {
        let batch = Value::map([
            ("a", Value::Int(10)),
            ("b", Value::Int(20)),
            (bad, value),
            ("c", Value::Int(30)),
        ]);
        assert!(fx.call(&mut obj, "set", vec![batch]).is_err(), "{bad}");
        assert_eq!(obj, original);
    }

    let batch = Value::map([("a", 10), ("b", 20), ("c", 30)]);
    fx.call(&mut obj, "set", vec![batch]).unwrap();
    assert_eq!(fx.get(&mut obj, "a"), Value::Int(10));
    assert_eq!(fx.get(&mut obj, "c"), Value::Int(30));
}

#[test]
fn immutable_properties_cannot_be_unset() {
    let fx = Fixture::new([ClassDef::new("Kept")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::delete(true))
        .tag(Tag::immutable())
        .property(PropertyDef::protected("a").default_value(1))
        .property(PropertyDef::protected("b").default_value(2))
        .method(MethodDef::protected("unsetB", |this, _| {
            this.clear_field("b");
            Value::Null
        }))]);
    let mut obj = fx.spawn("Kept");

    for name in ["a", "b"] {
        let err = fx.registry.unset(&mut obj, name).unwrap_err();
        assert!(matches!(err, AccessError::ImmutableUnset { .. }), "{name}");
    }
    let err = fx.call(&mut obj, "unsetB", vec![]).unwrap_err();
    assert!(matches!(err, AccessError::ImmutableUnset { .. }));

    assert!(obj.is_initialized("a"));
    assert!(obj.is_initialized("b"));
}

#[test]
fn public_properties_are_not_managed() {
    let fx = Fixture::new([ClassDef::new("Open")
        .accessible()
        .tag(Tag::get(true))
        .property(PropertyDef::public("open").tag(Tag::get(true)))]);
    let mut obj = fx.spawn("Open");

    let err = fx.registry.get(&mut obj, "open").unwrap_err();
    assert!(matches!(
        err,
        AccessError::PublicProperty {
            op: Operation::Read,
            ..
        }
    ));
    let descriptor = fx.registry.config("Open").unwrap().find("open", false).cloned().unwrap();
    assert!(descriptor.is_public());
    assert!(!descriptor.is_readable());
}

#[test]
fn snapshot_after_writes() {
    let fx = Fixture::new([ClassDef::new("Snap")
        .accessible()
        .tag(Tag::get(true))
        .tag(Tag::set(true))
        .property(PropertyDef::protected("name"))
        .property(PropertyDef::protected("tags").default_value(Value::list(["a"])))]);
    let mut obj = fx.spawn("Snap");

    fx.registry.set(&mut obj, "name", "ada").unwrap();

    let json = serde_json::to_value(&obj).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "class": "Snap",
            "fields": { "name": "ada", "tags": ["a"] },
        }),
    );
}
