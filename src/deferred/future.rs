use super::{join, select, DeferredError, Outcome, State};
use super::core::Core;
use log::debug;
use std::fmt;

/// A value that settles at most once, either succeeding with a `T` or
/// failing with an `E`.
///
/// `Deferred` is a shared handle: clones refer to the same underlying value
/// and observe the same settlement.
pub struct Deferred<T, E> {
    core: Core<T, E>,
}

impl<T: Clone + 'static, E: Clone + 'static> Deferred<T, E> {
    /// Creates a pending deferred and runs `task` right away with the
    /// `Complete` bound to it.
    ///
    /// An `Err` returned by `task` fails the deferred, unless `task` already
    /// settled it.
    pub fn new<F>(task: F) -> Deferred<T, E>
            where F: FnOnce(Complete<T, E>) -> Result<(), E> {
        let (deferred, complete) = Deferred::pair();

        if let Err(err) = task(complete.clone()) {
            debug!("Deferred::new; initializer returned an error");
            complete.fail(err);
        }

        deferred
    }

    /// Returns a pending deferred and the `Complete` used to settle it.
    pub fn pair() -> (Deferred<T, E>, Complete<T, E>) {
        let core = Core::new();
        let deferred = Deferred { core: core.clone() };

        (deferred, Complete { core })
    }

    /// Returns a deferred that has already succeeded with the supplied value.
    pub fn resolve(val: T) -> Deferred<T, E> {
        Deferred::new(move |c| {
            c.complete(val);
            Ok(())
        })
    }

    /// Returns a deferred that has already failed with the supplied error.
    pub fn reject(err: E) -> Deferred<T, E> {
        Deferred::new(move |c| {
            c.fail(err);
            Ok(())
        })
    }

    /// Turns an `Outcome` into a deferred.
    ///
    /// A deferred is returned as is, the very same instance. Plain values and
    /// errors are wrapped in an already settled deferred.
    pub fn normalize<O>(outcome: O) -> Deferred<T, E>
            where O: Into<Outcome<T, E>> {
        let outcome: Outcome<T, E> = outcome.into();

        match outcome {
            Outcome::Value(v) => Deferred::resolve(v),
            Outcome::Failure(e) => Deferred::reject(e),
            Outcome::Deferred(d) => d,
        }
    }

    /// Get the underlying result if present
    pub fn poll(&self) -> Option<Result<T, E>> {
        self.core.poll()
    }

    /// Get the underlying result, reporting `DeferredError::Pending` if the
    /// value has not settled yet.
    pub fn try_result(&self) -> Result<Result<T, E>, DeferredError> {
        self.poll().ok_or(DeferredError::Pending)
    }

    /// Get the underlying result if present, panic otherwise
    pub fn expect(&self) -> Result<T, E> {
        match self.poll() {
            Some(res) => res,
            None => panic!("the deferred value is not settled"),
        }
    }

    /*
     *
     * ===== Chaining =====
     *
     */

    /// Registers a success observer and a failure observer and returns a
    /// deferred settled by whichever of them runs.
    ///
    /// Exactly one observer is invoked. If this deferred is pending, both are
    /// queued and the matching one runs, in registration order, when it
    /// settles. Otherwise the matching observer runs before `then` returns.
    ///
    /// The returned deferred is settled from the observer's `Outcome`:
    /// a value succeeds it, a failure fails it and a deferred is adopted.
    /// A failure observer that returns a value therefore recovers the chain.
    pub fn then<U, S, F>(&self, on_success: S, on_failure: F) -> Deferred<U, E>
            where U: Clone + 'static,
                  S: FnOnce(T) -> Outcome<U, E> + 'static,
                  F: FnOnce(E) -> Outcome<U, E> + 'static {
        let core = self.core.clone();

        Deferred::new(move |complete| {
            let c = complete.clone();

            core.on_settle(
                move |val| absorb(on_success(val), complete),
                move |err| absorb(on_failure(err), c));

            Ok(())
        })
    }

    /// Like `then` without a failure observer: failures are forwarded
    /// unchanged.
    pub fn and_then<U, S>(&self, on_success: S) -> Deferred<U, E>
            where U: Clone + 'static,
                  S: FnOnce(T) -> Outcome<U, E> + 'static {
        self.then(on_success, Outcome::Failure)
    }

    /// Returns a deferred succeeding with `f` applied to this deferred's
    /// value. Failures are forwarded unchanged.
    pub fn map<U, F>(&self, f: F) -> Deferred<U, E>
            where U: Clone + 'static,
                  F: FnOnce(T) -> U + 'static {
        self.and_then(move |val| Outcome::Value(f(val)))
    }

    /// Registers only a failure observer. A success is forwarded unchanged.
    ///
    /// ```
    /// use settle::{Deferred, Outcome};
    ///
    /// let recovered = Deferred::<i32, &'static str>::reject("boom")
    ///     .catch(|e| Outcome::Value(e.len() as i32));
    ///
    /// assert_eq!(Ok(4), recovered.expect());
    /// ```
    pub fn catch<F>(&self, on_failure: F) -> Deferred<T, E>
            where F: FnOnce(E) -> Outcome<T, E> + 'static {
        self.then(Outcome::Value, on_failure)
    }

    /*
     *
     * ===== Combinators =====
     *
     */

    /// See `settle::all`.
    pub fn all<I, O>(items: I) -> Deferred<Vec<T>, E>
            where I: IntoIterator<Item = O>,
                  O: Into<Outcome<T, E>> {
        join::all(items)
    }

    /// See `settle::race`.
    pub fn race<I, O>(items: I) -> Deferred<T, E>
            where I: IntoIterator<Item = O>,
                  O: Into<Outcome<T, E>> {
        select::race(items)
    }
}

impl<T, E> Deferred<T, E> {
    pub fn state(&self) -> State {
        self.core.state()
    }

    /// Returns true if the deferred has not settled yet.
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    /// Returns true if `poll` will return a result.
    pub fn is_ready(&self) -> bool {
        self.state().is_settled()
    }

    /// Returns true if the deferred has settled and has failed
    pub fn is_err(&self) -> bool {
        self.state() == State::Failed
    }

    /// Returns true if both handles refer to the same deferred value.
    pub fn ptr_eq(&self, other: &Deferred<T, E>) -> bool {
        self.core.ptr_eq(&other.core)
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Deferred<T, E> {
        Deferred { core: self.core.clone() }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> From<Outcome<T, E>> for Deferred<T, E> {
    fn from(outcome: Outcome<T, E>) -> Deferred<T, E> {
        Deferred::normalize(outcome)
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Deferred {{ state: {} }}", self.state())
    }
}

/*
 *
 * ===== Complete =====
 *
 */

/// The producer side of a `Deferred`.
///
/// Only the first settlement through any clone takes effect; later calls to
/// `complete` or `fail` are ignored.
pub struct Complete<T, E> {
    core: Core<T, E>,
}

impl<T: Clone + 'static, E: Clone + 'static> Complete<T, E> {
    /// Succeeds the deferred with `val` and runs its queued success
    /// observers. Does nothing if the deferred has already settled.
    pub fn complete(&self, val: T) {
        let _ = self.core.complete(val);
    }

    /// Fails the deferred with `err` and runs its queued failure observers.
    /// Does nothing if the deferred has already settled.
    pub fn fail(&self, err: E) {
        let _ = self.core.fail(err);
    }

    /// Like `complete`, but reports `AlreadySettled` instead of ignoring it.
    pub fn try_complete(&self, val: T) -> Result<(), DeferredError> {
        self.core.complete(val)
    }

    /// Like `fail`, but reports `AlreadySettled` instead of ignoring it.
    pub fn try_fail(&self, err: E) -> Result<(), DeferredError> {
        self.core.fail(err)
    }
}

impl<T, E> Complete<T, E> {
    pub fn is_settled(&self) -> bool {
        self.core.state().is_settled()
    }
}

impl<T, E> Clone for Complete<T, E> {
    fn clone(&self) -> Complete<T, E> {
        Complete { core: self.core.clone() }
    }
}

impl<T, E> fmt::Debug for Complete<T, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Complete {{ state: {} }}", self.core.state())
    }
}

/*
 *
 * ===== Outcome absorption =====
 *
 */

// Settles the deferred behind `complete` from an observer's return value.
fn absorb<T: Clone + 'static, E: Clone + 'static>(outcome: Outcome<T, E>, complete: Complete<T, E>) {
    match outcome {
        Outcome::Value(v) => complete.complete(v),
        Outcome::Failure(e) => complete.fail(e),
        Outcome::Deferred(inner) => {
            match inner.poll() {
                Some(Ok(v)) => complete.complete(v),
                // Adopt the inner error itself, not the inner deferred
                Some(Err(e)) => complete.fail(e),
                None => {
                    debug!("absorb; inner deferred pending, mirroring");

                    let c = complete.clone();

                    inner.core.on_settle(
                        move |v| complete.complete(v),
                        move |e| c.fail(e));
                }
            }
        }
    }
}
