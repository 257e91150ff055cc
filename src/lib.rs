#![crate_name = "settle"]

//! Deferred values for single-threaded, callback driven code.
//!
//! A `Deferred` starts out pending and settles exactly once, either
//! succeeding with a value or failing with an error. Observers registered
//! before settlement are queued and run in registration order when it
//! happens; observers registered afterwards run immediately.
//!
//! ```
//! use settle::{Deferred, Outcome};
//!
//! let (deferred, complete) = Deferred::<i32, String>::pair();
//!
//! let doubled = deferred.then(|v| Outcome::Value(v * 2), Outcome::Failure);
//! assert!(doubled.is_pending());
//!
//! complete.complete(21);
//! assert_eq!(Some(Ok(42)), doubled.poll());
//! ```

pub use deferred::{
    all,
    race,
    Complete,
    Deferred,
    DeferredError,
    Outcome,
    State,
};

pub mod deferred;
