use std::cell::RefCell;
use std::rc::Rc;

use super::*;

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, tag: &'static str) -> impl Fn(&str, &Value, Option<&Value>) + 'static {
    let log = Rc::clone(log);
    move |name, new, old| {
        let old = old.map_or_else(|| "-".to_owned(), ToString::to_string);
        log.borrow_mut().push(format!("{tag}:{name}:{old}->{new}"));
    }
}

#[test]
fn duplicate_write_notifies_once() {
    let store = StateStore::default();
    let log: Log = Rc::default();
    let _sub = store.subscribe(["text"], recorder(&log, "a"));

    assert!(store.set("text", "hello"));
    assert!(!store.set("text", "hello"));

    assert_eq!(log.borrow().as_slice(), ["a:text:-->hello"]);
}

#[test]
fn handlers_fire_in_registration_order_per_name() {
    let store = StateStore::new([("rotation", 0.0)]);
    let log: Log = Rc::default();
    let _a = store.subscribe(["rotation", "color"], recorder(&log, "a"));
    let _b = store.subscribe(["rotation"], recorder(&log, "b"));

    store.set("rotation", 90.0);
    store.set("color", "#fff");
    store.set("unwatched", 1.0);

    assert_eq!(
        log.borrow().as_slice(),
        ["a:rotation:0->90", "b:rotation:0->90", "a:color:-->#fff"]
    );
    assert_eq!(store.get("unwatched"), Some(Value::Number(1.0)));
    assert_eq!(store.get("never"), None);
}

#[test]
fn initial_values_do_not_notify() {
    let store = StateStore::new([("text", "x")]);
    let log: Log = Rc::default();
    let _sub = store.subscribe(["text"], recorder(&log, "a"));
    assert!(!store.set("text", "x"));
    assert!(log.borrow().is_empty());
}

#[test]
fn handlers_may_write_reentrantly() {
    let store = StateStore::default();
    let log: Log = Rc::default();

    let weak = store.downgrade();
    let _derive = store.subscribe(["text"], move |_, new, _| {
        if let Some(store) = weak.upgrade() {
            store.set("length", new.to_string().len() as f64);
        }
    });
    let _watch = store.subscribe(["length"], recorder(&log, "len"));

    store.set("text", "abc");
    store.set("text", "xyz");
    store.set("text", "four");

    assert_eq!(
        log.borrow().as_slice(),
        ["len:length:-->3", "len:length:3->4"]
    );
}

#[test]
fn unsubscribe_removes_only_that_registration() {
    let store = StateStore::default();
    let log: Log = Rc::default();
    let a = store.subscribe(["x", "y"], recorder(&log, "a"));
    let _b = store.subscribe(["x"], recorder(&log, "b"));
    assert_eq!(store.listener_count("x"), 2);

    store.unsubscribe(a);
    assert_eq!(store.listener_count("x"), 1);
    assert_eq!(store.listener_count("y"), 0);

    store.set("x", 1.0);
    store.set("y", 1.0);
    assert_eq!(log.borrow().as_slice(), ["b:x:-->1"]);
}

#[test]
fn clones_share_state_and_weak_handles_expire() {
    let store = StateStore::default();
    let clone = store.clone();
    clone.set("k", true);
    assert_eq!(store.get("k"), Some(Value::Bool(true)));

    let weak = store.downgrade();
    drop(store);
    assert!(weak.upgrade().is_some());
    drop(clone);
    assert!(weak.upgrade().is_none());
}
