//! Action processor tests: routing, fallbacks, and chaining.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use switchyard_actions::{create_action, Action, ActionCreator};
use switchyard_engine::{handle, ProcessError};

fn increase() -> ActionCreator<i64> {
    ActionCreator::new("increase").with_payload(|value: &i64| json!({ "value": value }))
}

// =========================================================================
// when
// =========================================================================

#[test]
fn handles_actions_from_the_registered_creator() {
    let n = Arc::new(AtomicI64::new(0));
    let total = Arc::clone(&n);
    let processor = handle::when(increase(), move |a: &Action| {
        let value = a.payload.as_ref().and_then(|p| p["value"].as_i64()).unwrap_or_default();
        total.fetch_add(value, Ordering::SeqCst) + value
    });

    assert_eq!(processor.process(&increase().create(4)), Ok(4));
    assert_eq!(processor.process(&increase().create(2)), Ok(6));
    assert_eq!(n.load(Ordering::SeqCst), 6);
}

#[test]
fn routes_each_registered_tag_to_its_own_handler() {
    let to_string = ActionCreator::new("tostring").with_payload(|v: &i64| json!(v));
    let to_number = ActionCreator::new("tonumber").with_payload(|v: &String| json!(v));

    let processor = handle::when(&to_string, |a: &Action| match &a.payload {
        Some(Value::Number(n)) => Value::String(n.to_string()),
        _ => Value::Null,
    })
    .when(&to_number, |a: &Action| match &a.payload {
        Some(Value::String(s)) => s.parse::<f64>().ok().map(Value::from).unwrap_or(Value::Null),
        _ => Value::Null,
    });

    assert_eq!(processor.process(&to_string.create(12345)), Ok(json!("12345")));
    assert_eq!(processor.process(&to_number.create("abcde".into())), Ok(Value::Null));
    assert_eq!(processor.process(&to_number.create("2.5".into())), Ok(json!(2.5)));
}

#[test]
fn unregistered_tag_without_fallback_reports_the_tag() {
    let processor = handle::when(increase(), |_: &Action| ());

    let err = processor.process(&Action::new("decrease")).unwrap_err();
    assert_eq!(err, ProcessError::Unhandled { tag: "decrease".into() });
    assert_eq!(
        err.to_string(),
        "no handler registered for action \"decrease\" and no fallback configured"
    );
}

// =========================================================================
// otherwise
// =========================================================================

#[test]
fn fallback_only_processor_handles_any_action() {
    let unknown = ActionCreator::new("type").with_payload(|v: &Option<String>| json!(v));
    let processor = handle::otherwise(|a: &Action| a.payload.as_ref().is_some_and(|p| !p.is_null()));

    assert_eq!(processor.process(&unknown.create(None)), Ok(false));
    assert_eq!(processor.process(&unknown.create(Some("a string".into()))), Ok(true));
    assert_eq!(processor.process(&Action::new("anything else")), Ok(false));
}

#[test]
fn fallback_result_is_exactly_the_fallback_output() {
    let fallback = |a: &Action| format!("{}:{}", a.tag, a.payload.is_some());
    let processor = handle::otherwise(fallback);

    for action in [Action::new("a"), Action::new("b").with_payload(json!(1))] {
        assert_eq!(processor.process(&action), Ok(fallback(&action)));
    }
}

#[test]
fn builds_complex_processors_with_a_catchall() {
    let x = Arc::new(AtomicI64::new(0));
    let y = Arc::new(AtomicI64::new(0));
    let move_x = ActionCreator::new("x").with_payload(|v: &i64| json!(v));
    let move_y = ActionCreator::new("y").with_payload(|v: &i64| json!(v));
    let other = create_action("other");

    let (px, py) = (Arc::clone(&x), Arc::clone(&y));
    let (rx, ry) = (Arc::clone(&x), Arc::clone(&y));
    let processor = handle::when(&move_x, move |a: &Action| {
        px.fetch_add(a.payload_as::<i64>().unwrap_or_default(), Ordering::SeqCst);
        None::<(i64, i64)>
    })
    .when(&move_y, move |a: &Action| {
        py.fetch_add(a.payload_as::<i64>().unwrap_or_default(), Ordering::SeqCst);
        None
    })
    .otherwise(move |_: &Action| Some((rx.load(Ordering::SeqCst), ry.load(Ordering::SeqCst))));

    for action in [move_x.create(3), move_y.create(4), move_x.create(-2), move_y.create(-5)] {
        processor.process(&action).unwrap();
    }
    assert_eq!(x.load(Ordering::SeqCst), 1);
    assert_eq!(y.load(Ordering::SeqCst), -1);
    assert_eq!(processor.process(&other.create(())), Ok(Some((1, -1))));
}

#[test]
fn replacing_the_catchall_uses_the_latest_one() {
    let thing = create_action("thing");
    let processor = handle::otherwise(|a: &Action| a.tag.parse::<f64>().map(|_| "number".to_string()).unwrap_or_default())
        .otherwise(|a: &Action| a.tag.clone());

    assert_eq!(processor.process(&thing.create(())), Ok("thing".to_string()));
}

#[test]
fn extending_a_processor_leaves_the_base_usable() {
    let base = handle::when("a", |_: &Action| 1);
    let extended = base.when("b", |_: &Action| 2).otherwise(|_: &Action| 0);

    assert!(base.process(&Action::new("b")).is_err());
    assert!(!base.has_fallback());
    assert_eq!(extended.process(&Action::new("a")), Ok(1));
    assert_eq!(extended.process(&Action::new("b")), Ok(2));
    assert_eq!(extended.process(&Action::new("c")), Ok(0));
    assert_eq!(extended.handled_tags().len(), 2);
}

#[test]
fn processors_can_be_shared_across_threads() {
    let hits = Arc::new(AtomicI64::new(0));
    let counter = Arc::clone(&hits);
    let processor = handle::when("hit", move |_: &Action| counter.fetch_add(1, Ordering::SeqCst));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let processor = processor.clone();
            scope.spawn(move || {
                for _ in 0..10 {
                    processor.process(&Action::new("hit")).unwrap();
                }
            });
        }
    });

    assert_eq!(hits.load(Ordering::SeqCst), 40);
}
