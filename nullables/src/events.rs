//! Event capture for asserting on notifications.

use std::sync::{Arc, Mutex};

/// Records every event passed to its listeners, in emission order.
///
/// Clones share the same buffer, so a test can hand a listener to an event
/// bus and keep the recorder to inspect what arrived.
pub struct EventRecorder<E> {
    seen: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone + Send + 'static> EventRecorder<E> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A boxed listener that appends to this recorder.
    pub fn listener(&self) -> Box<dyn Fn(&E) + Send + Sync> {
        let seen = Arc::clone(&self.seen);
        Box::new(move |event: &E| {
            if let Ok(mut buf) = seen.lock() {
                buf.push(event.clone());
            }
        })
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<E> {
        self.seen.lock().map(|buf| buf.clone()).unwrap_or_default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<E> {
        self.seen
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().map(|buf| buf.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone + Send + 'static> Default for EventRecorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventRecorder<E> {
    fn clone(&self) -> Self {
        Self {
            seen: Arc::clone(&self.seen),
        }
    }
}
