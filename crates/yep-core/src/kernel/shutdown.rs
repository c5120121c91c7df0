//! Explicit shutdown of the serving loop.
//!
//! The run stage hands a [`ShutdownSignal`] to the server; whoever holds the
//! matching [`ShutdownTrigger`] (the Ctrl-C handler in `start_server`, or a
//! test) ends the serving lifetime.
use std::sync::Arc;

use tokio::sync::watch;

/// Creates a connected trigger/signal pair.
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger(Arc::new(tx)), ShutdownSignal(rx))
}

/// Sending half. Cloning is cheap; any clone may trigger.
#[derive(Clone, Debug)]
pub struct ShutdownTrigger(Arc<watch::Sender<bool>>);

impl ShutdownTrigger {
    /// Requests shutdown. Calling it more than once is harmless.
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

/// Receiving half handed to the server's `run`.
#[derive(Clone, Debug)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    /// Whether shutdown has already been requested.
    pub fn is_triggered(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once shutdown is requested or every trigger is dropped.
    pub async fn wait(&mut self) {
        // A closed channel means nobody can ask for shutdown any more
        let _ = self.0.wait_for(|requested| *requested).await;
    }
}
