use settle::*;
use super::super::{init, log};

#[test]
pub fn test_fail_before_catch() {
    init();

    let (d, c) = Deferred::<&'static str, i32>::pair();

    c.fail(123);

    let caught = d.catch(|e| {
        assert_eq!(123, e);
        Outcome::Value("caught")
    });

    assert_eq!(Ok("caught"), caught.expect());
}

#[test]
pub fn test_catch_before_fail() {
    init();

    let (d, c) = Deferred::<&'static str, i32>::pair();

    let caught = d.catch(|_| Outcome::Value("caught"));
    assert!(caught.is_pending());

    c.fail(123);

    assert_eq!(Ok("caught"), caught.expect());
}

#[test]
pub fn test_catch_forwards_success() {
    init();

    let seen = log();
    let l = seen.clone();

    let caught = Deferred::<i32, ()>::resolve(8).catch(move |e| {
        l.borrow_mut().push(e);
        Outcome::Value(0)
    });

    assert!(seen.borrow().is_empty());
    assert_eq!(Ok(8), caught.expect());
}

#[test]
pub fn test_catch_is_composable() {
    init();

    let (d, c) = Deferred::<i32, &'static str>::pair();

    let res = d
        .map(|v| v + 1)
        .map(|v| v * 2)
        .catch(|_| Outcome::Value(-1))
        .map(|v| format!("result={}", v));

    c.fail("early");

    assert_eq!(Ok("result=-1".to_string()), res.expect());
}

#[test]
pub fn test_catch_rethrow() {
    init();

    let res = Deferred::<(), &'static str>::reject("first")
        .catch(|_| Outcome::Failure("second"))
        .catch(|e| Outcome::Failure(e));

    assert_eq!(Err("second"), res.expect());
}
