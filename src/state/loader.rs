//! One-shot background loader for the bundled datasets. Each controller
//! spawns exactly one loader at construction; the parse runs off the
//! interactive thread and the result crosses back over an mpsc channel,
//! drained by the controller's `poll` from the event loop. Dropping the
//! controller drops the receiver, so a still-running load finishes into a
//! closed channel and its result is silently discarded.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::data::DataError;

/// Handle to a single in-flight dataset load.
pub struct Loader<T> {
    rx: Receiver<Result<Vec<T>, DataError>>,
    _handle: JoinHandle<()>,
}

impl<T: Send + 'static> Loader<T> {
    /// Run `load` on a background thread and return a handle to collect
    /// its result.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<Vec<T>, DataError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            // The receiver may already be gone if the controller was torn
            // down; a failed send is the cancellation path, not an error.
            let _ = tx.send(load());
        });
        Self {
            rx,
            _handle: handle,
        }
    }

    /// Non-blocking check for the load result. Returns `None` while the
    /// load is still running, `Some` exactly once when it finishes.
    pub fn try_take(&mut self) -> Option<Result<Vec<T>, DataError>> {
        self.rx.try_recv().ok()
    }
}
