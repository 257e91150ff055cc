use super::{Deferred, Outcome};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Returns a deferred that succeeds once every input has succeeded, with
/// the values in input order.
///
/// The first failure observed fails the returned deferred right away. The
/// remaining inputs are left to settle on their own and their results are
/// discarded. An empty input succeeds immediately with an empty vector.
///
/// ```
/// use settle::{all, Deferred, Outcome};
///
/// let (later, complete) = Deferred::<i32, ()>::pair();
/// let joined: Deferred<Vec<i32>, ()> = all(vec![Outcome::Value(1), later.into(), Outcome::Value(3)]);
///
/// assert!(joined.is_pending());
///
/// complete.complete(2);
/// assert_eq!(Ok(vec![1, 2, 3]), joined.expect());
/// ```
pub fn all<T, E, I, O>(items: I) -> Deferred<Vec<T>, E>
        where T: Clone + 'static,
              E: Clone + 'static,
              I: IntoIterator<Item = O>,
              O: Into<Outcome<T, E>> {
    let items: Vec<Deferred<T, E>> = items.into_iter()
        .map(Deferred::normalize)
        .collect();

    Deferred::new(move |complete| {
        if items.is_empty() {
            complete.complete(Vec::new());
            return Ok(());
        }

        debug!("all; waiting on {} values", items.len());

        let join = Rc::new(RefCell::new(Join::new(items.len())));

        for (i, item) in items.into_iter().enumerate() {
            let join = join.clone();
            let (c1, c2) = (complete.clone(), complete.clone());

            item.then(
                move |val| {
                    // Release the borrow before settling, observers may run
                    let done = join.borrow_mut().put(i, val);

                    if let Some(vals) = done {
                        c1.complete(vals);
                    }

                    Outcome::Value(())
                },
                move |err| {
                    debug!("all; value at {} failed", i);
                    c2.fail(err);
                    Outcome::Value(())
                });
        }

        Ok(())
    })
}

// Collects results by input position
struct Join<T> {
    vals: Vec<Option<T>>,
    remaining: usize,
}

impl<T> Join<T> {
    fn new(len: usize) -> Join<T> {
        Join {
            vals: (0..len).map(|_| None).collect(),
            remaining: len,
        }
    }

    // Returns the full set of values once the last one arrives
    fn put(&mut self, i: usize, val: T) -> Option<Vec<T>> {
        debug_assert!(self.vals[i].is_none());

        self.vals[i] = Some(val);
        self.remaining -= 1;

        if self.remaining > 0 {
            return None;
        }

        Some(self.vals.drain(..).flatten().collect())
    }
}
