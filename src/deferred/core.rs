use super::{DeferredError, State};
use super::run::{self, Job};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::{fmt, mem};

/*
 *
 * ===== Core =====
 *
 */

// Shared state behind a `Deferred` and every `Complete` bound to it
pub struct Core<T, E> {
    inner: Rc<RefCell<CoreInner<T, E>>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Core<T, E> {
    pub fn new() -> Core<T, E> {
        Core {
            inner: Rc::new(RefCell::new(CoreInner {
                slot: Slot::Pending,
                on_success: Vec::new(),
                on_failure: Vec::new(),
                scheduled: 0,
            })),
        }
    }

    /// Returns a copy of the realized result, None while pending.
    pub fn poll(&self) -> Option<Result<T, E>> {
        match self.inner.borrow().slot {
            Slot::Pending => None,
            Slot::Succeeded(ref v) => Some(Ok(v.clone())),
            Slot::Failed(ref e) => Some(Err(e.clone())),
        }
    }

    /// Transitions to `Succeeded` and runs the queued success observers.
    ///
    /// When called from inside an observer, the queued observers run after
    /// that observer returns.
    pub fn complete(&self, val: T) -> Result<(), DeferredError> {
        let (jobs, dropped) = {
            let mut inner = self.inner.borrow_mut();
            let curr = inner.slot.state();

            if curr.is_settled() {
                debug!("Core::complete; ignored, state={}", curr);
                return Err(DeferredError::AlreadySettled(curr));
            }

            let ready = mem::take(&mut inner.on_success);
            let jobs = self.observer_jobs(ready, &val);

            inner.scheduled += jobs.len();
            inner.slot = Slot::Succeeded(val);

            (jobs, mem::take(&mut inner.on_failure))
        };

        // The failure path can no longer run
        drop(dropped);

        debug!("Core::complete; queued={}", jobs.len());
        run::run_all(jobs);

        Ok(())
    }

    /// Transitions to `Failed` and runs the queued failure observers.
    pub fn fail(&self, err: E) -> Result<(), DeferredError> {
        let (jobs, dropped) = {
            let mut inner = self.inner.borrow_mut();
            let curr = inner.slot.state();

            if curr.is_settled() {
                debug!("Core::fail; ignored, state={}", curr);
                return Err(DeferredError::AlreadySettled(curr));
            }

            let ready = mem::take(&mut inner.on_failure);
            let jobs = self.observer_jobs(ready, &err);

            inner.scheduled += jobs.len();
            inner.slot = Slot::Failed(err);

            (jobs, mem::take(&mut inner.on_success))
        };

        drop(dropped);

        debug!("Core::fail; queued={}", jobs.len());
        run::run_all(jobs);

        Ok(())
    }

    /// Registers a pair of observers. Exactly one of them is eventually
    /// invoked: later if the core is pending, right away otherwise.
    ///
    /// If the core has settled but some of its queued observers have not
    /// run yet, the observer runs after them.
    pub fn on_settle<S, F>(&self, on_success: S, on_failure: F)
            where S: FnOnce(T) + 'static,
                  F: FnOnce(E) + 'static {
        let mut inner = self.inner.borrow_mut();

        let res = match inner.slot {
            Slot::Pending => None,
            Slot::Succeeded(ref v) => Some(Ok(v.clone())),
            Slot::Failed(ref e) => Some(Err(e.clone())),
        };

        let res = match res {
            Some(res) => res,
            None => {
                trace!("Core::on_settle; queueing, position={}", inner.on_success.len());
                inner.on_success.push(Box::new(on_success));
                inner.on_failure.push(Box::new(on_failure));
                return;
            }
        };

        if inner.scheduled > 0 {
            trace!("Core::on_settle; settled, behind {} observers", inner.scheduled);
            inner.scheduled += 1;
            drop(inner);

            let core = self.clone();
            let job: Job = Box::new(move || {
                core.observer_done();

                match res {
                    Ok(v) => on_success(v),
                    Err(e) => on_failure(e),
                }
            });

            run::run_all(Some(job));
            return;
        }

        // Never invoke user code while the cell is borrowed
        drop(inner);

        trace!("Core::on_settle; already settled, invoking");

        match res {
            Ok(v) => on_success(v),
            Err(e) => on_failure(e),
        }
    }

    // One job per observer, each with its own copy of the settled value
    fn observer_jobs<V>(&self, ready: Vec<Box<dyn BoxedReceive<V>>>, val: &V) -> Vec<Job>
            where V: Clone + 'static {
        ready.into_iter()
            .map(|cb| {
                let core = self.clone();
                let val = val.clone();

                Box::new(move || {
                    core.observer_done();
                    cb.receive_boxed(val);
                }) as Job
            })
            .collect()
    }

    fn observer_done(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.scheduled = inner.scheduled.saturating_sub(1);
    }
}

impl<T, E> Core<T, E> {
    pub fn state(&self) -> State {
        self.inner.borrow().slot.state()
    }

    pub fn ptr_eq(&self, other: &Core<T, E>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T, E> Clone for Core<T, E> {
    fn clone(&self) -> Core<T, E> {
        Core { inner: self.inner.clone() }
    }
}

impl<T, E> fmt::Debug for Core<T, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => write!(fmt, "Core {{ state: {} }}", inner.slot.state()),
            Err(_) => write!(fmt, "Core {{ <borrowed> }}"),
        }
    }
}

/*
 *
 * ===== CoreInner =====
 *
 */

struct CoreInner<T, E> {
    slot: Slot<T, E>,
    // Both queues are only appended to while the slot is pending
    on_success: Vec<Box<dyn BoxedReceive<T>>>,
    on_failure: Vec<Box<dyn BoxedReceive<E>>>,
    // Observers handed to the run queue that have not started yet
    scheduled: usize,
}

enum Slot<T, E> {
    Pending,
    Succeeded(T),
    Failed(E),
}

impl<T, E> Slot<T, E> {
    fn state(&self) -> State {
        match *self {
            Slot::Pending => State::Pending,
            Slot::Succeeded(..) => State::Succeeded,
            Slot::Failed(..) => State::Failed,
        }
    }
}

/*
 *
 * ===== BoxedReceive =====
 *
 */

// Needed to allow virtual dispatch to a queued observer
trait BoxedReceive<T> {
    fn receive_boxed(self: Box<Self>, val: T);
}

impl<F: FnOnce(T), T> BoxedReceive<T> for F {
    fn receive_boxed(self: Box<F>, val: T) {
        (*self)(val)
    }
}
