//! Observable value cells shared between the integration and its UI.
//!
//! DESIGN
//! ======
//! A `Store` is an explicitly owned handle, cloned into whatever component
//! needs it. Every write goes through the underlying `watch` sender, so an
//! update is applied as one step and subscribers observe the new value as
//! soon as the write returns.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::watch;

/// Writable, observable cell holding a single `T`.
///
/// Clones share the same cell.
pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { tx: Arc::clone(&self.tx) }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the stored value with `f(&old)` and notify subscribers.
    ///
    /// `f` runs while the write lock is held. It must not block, and must not
    /// read this store through `with` or `snapshot`, or the call deadlocks.
    /// Read the current value from the argument instead.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.tx.send_modify(|value| *value = f(value));
    }

    /// Replace the stored value outright and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Read the current value without cloning it.
    ///
    /// Holds the read lock while `f` runs, so `f` must not write to this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.tx.borrow())
    }

    /// Observer handle. `changed().await` resolves after the next write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Store<T> {
    /// Clone of the current value.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }
}
