//! Per-thread run queue for observer invocations.
//!
//! Settling a deferred from inside an observer does not invoke the next
//! observers on the current stack. They are appended to the queue and the
//! outermost settlement runs them once the current observer has returned, so
//! a chain of any length settles in constant stack depth.

use log::trace;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;

pub type Job = Box<dyn FnOnce()>;

struct RunQueue {
    // True while some frame on this thread is draining `jobs`
    running: bool,
    jobs: VecDeque<Job>,
}

thread_local! {
    static RUN_QUEUE: RefCell<RunQueue> = RefCell::new(RunQueue {
        running: false,
        jobs: VecDeque::new(),
    });
}

/// Appends `jobs` to the run queue, in order. If no drain is in progress on
/// this thread, drains the queue before returning.
pub fn run_all<I>(jobs: I)
        where I: IntoIterator<Item = Job> {
    let owner = RUN_QUEUE.with(|q| {
        let mut q = q.borrow_mut();
        q.jobs.extend(jobs);
        !mem::replace(&mut q.running, true)
    });

    if !owner {
        trace!("run_all; already draining, deferred");
        return;
    }

    let _reset = CallOnDrop(reset);

    loop {
        // The queue must not be borrowed while the job runs
        let job = RUN_QUEUE.with(|q| q.borrow_mut().jobs.pop_front());

        match job {
            Some(job) => job(),
            None => return,
        }
    }
}

// Leaves the queue usable after an observer panicked mid drain
fn reset() {
    let left = RUN_QUEUE.with(|q| {
        let mut q = q.borrow_mut();
        q.running = false;
        mem::take(&mut q.jobs)
    });

    if !left.is_empty() {
        trace!("run_all; discarding {} jobs", left.len());
    }
}

/// Call a function when it goes out of scope.
struct CallOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for CallOnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}
