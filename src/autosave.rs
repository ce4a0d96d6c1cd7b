//! Periodic background flush of the full state.
//!
//! The flush runs every interval whether or not anything changed. It takes
//! the same store lock as mutating operations, so it can never write a
//! half-applied change.

use crate::store::RecordStore;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Handle to a running autosave thread.
///
/// Call [`AutosaveHandle::stop`] for an orderly shutdown; dropping the
/// handle also signals the thread to exit, without waiting for it.
pub struct AutosaveHandle {
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl AutosaveHandle {
    /// Signal the thread and wait for it to exit.
    pub fn stop(mut self) {
        let _ = self.stop.try_send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        let _ = self.stop.try_send(());
    }
}

/// Spawn an autosave thread using the store's configured interval.
pub fn spawn(store: Arc<RecordStore>) -> AutosaveHandle {
    let interval = store.config().autosave_interval;
    spawn_with_interval(store, interval)
}

/// Spawn an autosave thread flushing every `interval`.
///
/// A failed flush is logged and retried at the next tick; the in-memory
/// state stays valid either way.
pub fn spawn_with_interval(store: Arc<RecordStore>, interval: Duration) -> AutosaveHandle {
    let (stop, ticks) = bounded::<()>(1);

    let thread = std::thread::spawn(move || loop {
        match ticks.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => match store.save() {
                Ok(()) => debug!(path = %store.path().display(), "autosave flushed"),
                Err(err) => warn!(error = %err, "autosave flush failed"),
            },
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    });

    AutosaveHandle {
        stop,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_autosave_flushes_unchanged_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let store = Arc::new(RecordStore::open_at(&path));

        // Opening alone writes nothing.
        assert!(!path.exists());

        let handle = spawn_with_interval(Arc::clone(&store), Duration::from_millis(20));
        thread::sleep(Duration::from_millis(200));
        handle.stop();

        assert!(path.exists());
    }

    #[test]
    fn test_stop_terminates_thread() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::open_at(dir.path().join("data.json")));

        let handle = spawn_with_interval(store, Duration::from_secs(3600));
        // Returns promptly even though the interval is an hour.
        handle.stop();
    }
}
