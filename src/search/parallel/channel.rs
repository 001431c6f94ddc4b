//! Signalling between pool workers, the orchestrator and the monitor.

use crate::error::SearchError;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// A task that returned an error or panicked.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    pub worker: usize,
    pub message: String,
}

impl From<TaskFailure> for SearchError {
    fn from(failure: TaskFailure) -> Self {
        SearchError::TaskFailed {
            worker: failure.worker,
            message: failure.message,
        }
    }
}

/// Unbounded failure channel; workers never block on reporting.
pub fn failure_channel() -> (Sender<TaskFailure>, Receiver<TaskFailure>) {
    unbounded()
}

/// One-shot stop signal for a background thread.
pub fn stop_channel() -> (Sender<()>, Receiver<()>) {
    bounded(1)
}

/// Best-effort text for a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
