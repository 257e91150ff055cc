use super::State;
use thiserror::Error;

/// Misuse of a deferred handle.
///
/// Failures of the computation itself travel on the deferred's own error
/// type, never through this one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DeferredError {
    #[error("deferred value is still pending")]
    Pending,
    #[error("deferred value has already {0}")]
    AlreadySettled(State),
}

impl DeferredError {
    pub fn is_pending(&self) -> bool {
        matches!(*self, DeferredError::Pending)
    }

    pub fn is_already_settled(&self) -> bool {
        matches!(*self, DeferredError::AlreadySettled(..))
    }
}
