use settle::*;
use super::super::{init, reject_after, resolve_after, Timers};

#[test]
pub fn test_all_settled_values() {
    init();

    let p1 = Deferred::<i32, ()>::resolve(1);
    let p2 = Deferred::resolve(2);
    let p3 = Deferred::resolve(3);

    let joined: Deferred<Vec<i32>, ()> = Deferred::all(vec![p1, p2, p3]);

    assert_eq!(Ok(vec![1, 2, 3]), joined.expect());
}

#[test]
pub fn test_all_plain_values() {
    init();

    let joined: Deferred<Vec<i32>, ()> = all(vec![
        Outcome::Value(1),
        Outcome::Value(2),
        Outcome::Value(3),
    ]);

    assert_eq!(Ok(vec![1, 2, 3]), joined.expect());
}

#[test]
pub fn test_all_keeps_input_order() {
    init();

    let timers = Timers::new();

    let joined: Deferred<Vec<&'static str>, ()> = all(vec![
        resolve_after::<&'static str, ()>(&timers, 300, "slow"),
        resolve_after(&timers, 100, "fast"),
        resolve_after(&timers, 200, "middle"),
    ]);

    assert!(joined.is_pending());

    timers.run();

    assert_eq!(Ok(vec!["slow", "fast", "middle"]), joined.expect());
}

#[test]
pub fn test_all_waits_for_every_value() {
    init();

    let (a, ca) = Deferred::<i32, ()>::pair();
    let (b, cb) = Deferred::<i32, ()>::pair();

    let joined: Deferred<Vec<i32>, ()> = all(vec![a, b]);

    ca.complete(1);
    assert!(joined.is_pending());

    cb.complete(2);
    assert_eq!(Ok(vec![1, 2]), joined.expect());
}

#[test]
pub fn test_all_fails_with_first_failure() {
    init();

    let joined: Deferred<Vec<i32>, &'static str> = all(vec![
        Outcome::Value(1),
        Outcome::Failure("failing"),
        Outcome::Value(3),
    ]);

    assert_eq!(Err("failing"), joined.expect());
}

#[test]
pub fn test_all_fails_fast() {
    init();

    let timers = Timers::new();
    let (never, _c) = Deferred::<i32, &'static str>::pair();

    let joined: Deferred<Vec<i32>, &'static str> = all(vec![
        resolve_after(&timers, 100, 1),
        never,
        reject_after(&timers, 50, "second"),
        reject_after(&timers, 70, "third"),
    ]);

    timers.run();

    // Fails without waiting on the value that never settles
    assert_eq!(Err("second"), joined.expect());
}

#[test]
pub fn test_all_empty() {
    init();

    let joined: Deferred<Vec<i32>, ()> = all(Vec::<Deferred<i32, ()>>::new());

    assert_eq!(Ok(vec![]), joined.expect());
}
