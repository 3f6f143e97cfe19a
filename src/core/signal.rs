//! # Signals
//!
//! A `Signal<T>` is an observable value with a single writer and any number
//! of observers. It has two faces:
//!
//! - **Latest value**: a `watch` channel. Observers can read the current
//!   value at any time, even if they subscribed after it was published.
//! - **Ordered updates**: a `broadcast` channel. Each observer receives every
//!   publish made after it subscribed, in publish order.
//!
//! ```text
//! publish(v) ──┬──▶ watch     ──▶ Observer::current()
//!              └──▶ broadcast ──▶ Observer::next() / try_next()
//! ```
//!
//! Publishes are serialized so the two faces always agree on ordering:
//! the last value seen through `next()` is the value `current()` returns.

use std::sync::Mutex;

use log::warn;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};

/// How many unread updates an observer may fall behind before it lags.
const UPDATE_CAPACITY: usize = 64;

pub struct Signal<T> {
    state: watch::Sender<T>,
    updates: broadcast::Sender<T>,
    publish_lock: Mutex<()>,
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    pub fn new(initial: T) -> Self {
        let (state, _) = watch::channel(initial);
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            state,
            updates,
            publish_lock: Mutex::new(()),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Replace the current value and notify every observer.
    pub fn publish(&self, value: T) {
        let _guard = self.publish_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.state.send_replace(value.clone());
        // No observers is fine: the value is still stored for late subscribers.
        let _ = self.updates.send(value);
    }

    /// Publish only if the value differs from the current one.
    /// Returns true if a publish happened.
    pub fn publish_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let _guard = self.publish_lock.lock().unwrap_or_else(|e| e.into_inner());
        if *self.state.borrow() == value {
            return false;
        }
        self.state.send_replace(value.clone());
        let _ = self.updates.send(value);
        true
    }

    pub fn subscribe(&self) -> Observer<T> {
        let _guard = self.publish_lock.lock().unwrap_or_else(|e| e.into_inner());
        Observer {
            state: self.state.subscribe(),
            updates: self.updates.subscribe(),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.state.receiver_count()
    }
}

/// Read side of a [`Signal`].
pub struct Observer<T> {
    state: watch::Receiver<T>,
    updates: broadcast::Receiver<T>,
}

impl<T: Clone> Observer<T> {
    pub fn current(&self) -> T {
        self.state.borrow().clone()
    }

    /// Next unread update without waiting. `None` when caught up.
    ///
    /// An observer that fell more than the channel capacity behind skips the
    /// oldest updates and continues from the oldest one still retained.
    pub fn try_next(&mut self) -> Option<T> {
        loop {
            match self.updates.try_recv() {
                Ok(value) => return Some(value),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Signal observer lagged, skipped {} updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next update. `None` once the signal is dropped.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            match self.updates.recv().await {
                Ok(value) => return Some(value),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Signal observer lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
