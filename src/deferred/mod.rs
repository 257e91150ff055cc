//! Deferred values and the combinators built on them
//!
//! A `Deferred` is a handle to a value that may not be available yet. It is
//! created in the `Pending` state and transitions exactly once to either
//! `Succeeded` or `Failed`. The transition is driven by a `Complete`, the
//! producer side of the pair, which is usually handed to some external
//! scheduler that invokes it later.
//!
//! ## Chaining
//!
//! `Deferred::then` registers a success observer and a failure observer and
//! returns a new `Deferred` settled by whichever observer runs. Observers
//! return an `Outcome`:
//!
//! * `Outcome::Value(v)` succeeds the new deferred with `v`
//! * `Outcome::Failure(e)` fails it with `e`
//! * `Outcome::Deferred(d)` makes it mirror `d`
//!
//! ```
//! use settle::{Deferred, Outcome};
//!
//! let (deferred, complete) = Deferred::<&'static str, ()>::pair();
//!
//! let len = deferred
//!     .map(|s| s.len())
//!     .and_then(|n| Outcome::Deferred(Deferred::resolve(n + 1)));
//!
//! complete.complete("hello");
//! assert_eq!(Some(Ok(6)), len.poll());
//! ```
//!
//! ## Combinators
//!
//! `all` waits for every input to succeed, `race` settles with the first
//! input to settle. Plain values are accepted wherever a `Deferred` is, by
//! way of `Outcome`.

pub use self::error::DeferredError;
pub use self::future::{Deferred, Complete};
pub use self::join::all;
pub use self::select::race;

use std::fmt;

mod core;
mod error;
mod future;
mod join;
mod run;
mod select;

/*
 *
 * ===== State =====
 *
 */

/// The settlement state of a `Deferred`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum State {
    Pending,
    Succeeded,
    Failed,
}

impl State {
    pub fn is_pending(&self) -> bool {
        matches!(*self, State::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for State {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            State::Pending => fmt.write_str("pending"),
            State::Succeeded => fmt.write_str("succeeded"),
            State::Failed => fmt.write_str("failed"),
        }
    }
}

/*
 *
 * ===== Outcome =====
 *
 */

/// What an observer hands back to the deferred produced by chaining.
///
/// This is also the "plain value or deferred" union accepted by
/// `Deferred::normalize`, `all` and `race`.
pub enum Outcome<T, E> {
    /// Succeed with the value.
    Value(T),
    /// Fail with the error.
    Failure(E),
    /// Adopt the fate of another deferred.
    Deferred(Deferred<T, E>),
}

impl<T, E> Outcome<T, E> {
    pub fn is_deferred(&self) -> bool {
        matches!(*self, Outcome::Deferred(..))
    }
}

impl<T, E> From<Deferred<T, E>> for Outcome<T, E> {
    fn from(deferred: Deferred<T, E>) -> Outcome<T, E> {
        Outcome::Deferred(deferred)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(res: Result<T, E>) -> Outcome<T, E> {
        match res {
            Ok(v) => Outcome::Value(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Value(ref v) => write!(fmt, "Value({:?})", v),
            Outcome::Failure(ref e) => write!(fmt, "Failure({:?})", e),
            Outcome::Deferred(ref d) => write!(fmt, "Deferred({})", d.state()),
        }
    }
}
