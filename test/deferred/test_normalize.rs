use settle::*;
use super::super::init;

#[test]
pub fn test_resolve_plain_value() {
    init();

    let d = Deferred::<i32, ()>::resolve(4);

    assert_eq!(State::Succeeded, d.state());
    assert_eq!(Ok(4), d.expect());
}

#[test]
pub fn test_reject_plain_value() {
    init();

    let d = Deferred::<i32, &'static str>::reject("bad");

    assert_eq!(State::Failed, d.state());
    assert_eq!(Err("bad"), d.expect());
}

#[test]
pub fn test_normalize_value_and_failure() {
    init();

    let ok = Deferred::<i32, ()>::normalize(Outcome::Value(1));
    let err = Deferred::<i32, ()>::normalize(Outcome::Failure(()));

    assert_eq!(Ok(1), ok.expect());
    assert_eq!(Err(()), err.expect());
}

#[test]
pub fn test_normalize_returns_same_deferred() {
    init();

    let (d, c) = Deferred::<i32, ()>::pair();

    let same = Deferred::<i32, ()>::normalize(d.clone());
    assert!(same.ptr_eq(&d));

    let from: Deferred<i32, ()> = Outcome::Deferred(d.clone()).into();
    assert!(from.ptr_eq(&d));

    c.complete(2);
    assert_eq!(Ok(2), same.expect());
}

#[test]
pub fn test_normalize_keeps_failed_deferred() {
    init();

    let failed = Deferred::<i32, &'static str>::reject("x");
    let same = Deferred::<i32, &'static str>::normalize(failed.clone());

    assert!(same.ptr_eq(&failed));
    assert_eq!(Err("x"), same.expect());
}

#[test]
pub fn test_normalize_result() {
    init();

    let ok = Deferred::<i32, String>::normalize(Ok::<i32, String>(3));
    let err = Deferred::<i32, String>::normalize(Err::<i32, String>("e".to_string()));

    assert_eq!(Ok(3), ok.expect());
    assert_eq!(Err("e".to_string()), err.expect());
}

#[test]
pub fn test_outcome_debug() {
    let v: Outcome<i32, ()> = Outcome::Value(1);
    let d: Outcome<i32, ()> = Deferred::<i32, ()>::resolve(1).into();

    assert_eq!("Value(1)", format!("{:?}", v));
    assert_eq!("Deferred(succeeded)", format!("{:?}", d));
}
